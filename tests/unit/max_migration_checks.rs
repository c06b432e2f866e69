//! Max migration check behaviour over real project trees.

use crate::helpers::project::TestProject;
use anyhow::Result;
use maxmig::apps::{AppConfig, ProjectRegistry};
use maxmig::commands::run_project_checks;
use maxmig::config::{Config, ConfigBuilder, ConfigInput, ProjectInput};
use rstest::rstest;

const MIGRATIONS: [&str; 3] = ["0001_init", "0002_add_field", "0003_rename"];

fn project_config(project: &TestProject) -> Config {
    ConfigBuilder::new()
        .with_file(ConfigInput {
            project: Some(ProjectInput {
                root: Some(project.root().to_string_lossy().into_owned()),
                vendored_dirs: None,
            }),
            ..ConfigInput::default()
        })
        .resolve()
        .unwrap()
}

fn check_ids(project: &TestProject, labels: &[String]) -> Result<Vec<String>> {
    let config = project_config(project);
    let registry = ProjectRegistry::load(&config)?;
    let report = run_project_checks(&config, &registry, labels, &[])?;
    Ok(report.issues.into_iter().map(|m| m.id).collect())
}

/// One app per case; the marker contents decide which single error (if any) appears
#[rstest]
#[case::latest("0003_rename\n", None)]
#[case::latest_without_newline("0003_rename", None)]
#[case::stale("0002_add_field\n", Some("maxmig.E004"))]
#[case::oldest("0001_init\n", Some("maxmig.E004"))]
#[case::merge_leftover("0003_rename\n0003_other\n", Some("maxmig.E002"))]
#[case::conflict_markers(
    "<<<<<<< HEAD\n0003_rename\n=======\n0003_other\n>>>>>>> branch\n",
    Some("maxmig.E002")
)]
#[case::unknown("0004_future\n", Some("maxmig.E003"))]
#[case::wrong_case("0003_RENAME\n", Some("maxmig.E003"))]
#[case::with_extension("0003_rename.py\n", Some("maxmig.E003"))]
fn test_marker_contents(#[case] marker: &str, #[case] expected: Option<&str>) -> Result<()> {
    let project = TestProject::new();
    project.add_app("blog", &MIGRATIONS)?;
    project.write_marker("blog", marker)?;

    let ids = check_ids(&project, &[])?;

    match expected {
        Some(id) => assert_eq!(ids, vec![id.to_string()]),
        None => assert!(ids.is_empty(), "unexpected issues: {:?}", ids),
    }
    Ok(())
}

#[test]
fn test_missing_marker_reports_app_label() -> Result<()> {
    let project = TestProject::new();
    project.add_app("blog", &MIGRATIONS)?;

    let config = project_config(&project);
    let registry = ProjectRegistry::load(&config)?;
    let report = run_project_checks(&config, &registry, &[], &[])?;

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].id, "maxmig.E001");
    assert!(report.issues[0].msg.starts_with("blog's "));
    Ok(())
}

#[test]
fn test_stale_marker_names_both_migrations() -> Result<()> {
    let project = TestProject::new();
    project.add_app("blog", &MIGRATIONS)?;
    project.write_marker("blog", "0002_add_field\n")?;

    let config = project_config(&project);
    let registry = ProjectRegistry::load(&config)?;
    let report = run_project_checks(&config, &registry, &[], &[])?;

    let message = &report.issues[0];
    assert!(message.msg.contains("'0002_add_field'"));
    assert!(message.msg.contains("'0003_rename'"));
    assert!(message.hint.as_deref().unwrap().contains("'0003_rename'"));
    Ok(())
}

#[test]
fn test_unmigrated_apps_never_report() -> Result<()> {
    let project = TestProject::new();
    let app_dir = project.add_unmigrated_app("utils")?;
    std::fs::write(app_dir.join("max_migration.txt"), "a\nb\n")?;

    let config = project_config(&project);
    let registry = vec![AppConfig::new("utils", app_dir)];
    let report = run_project_checks(&config, &registry, &[], &[])?;

    assert!(report.is_clean());
    Ok(())
}

#[test]
fn test_vendored_apps_are_not_checked() -> Result<()> {
    let project = TestProject::new();
    project.add_app("venv/lib/site-packages/thirdparty", &MIGRATIONS)?;
    project.add_app("blog", &MIGRATIONS)?;
    project.write_marker("blog", "0003_rename\n")?;

    // Discovery leaves the vendored app out of the registry entirely
    let config = project_config(&project);
    let registry = ProjectRegistry::load(&config)?;
    assert_eq!(maxmig::apps::AppRegistry::app_configs(&registry).len(), 1);

    assert!(check_ids(&project, &[])?.is_empty());
    Ok(())
}

#[test]
fn test_restricting_labels() -> Result<()> {
    let project = TestProject::new();
    project.add_app("blog", &MIGRATIONS)?;
    project.add_app("shop", &MIGRATIONS)?;
    project.write_marker("shop", "0001_init\n")?;

    assert_eq!(
        check_ids(&project, &["shop".to_string()])?,
        vec!["maxmig.E004".to_string()]
    );
    assert_eq!(
        check_ids(&project, &["blog".to_string()])?,
        vec!["maxmig.E001".to_string()]
    );
    Ok(())
}

#[test]
fn test_unknown_label_is_an_error() -> Result<()> {
    let project = TestProject::new();
    project.add_app("blog", &MIGRATIONS)?;

    let err = check_ids(&project, &["nope".to_string()]).unwrap_err();
    assert_eq!(err.to_string(), "No installed app with label 'nope'.");
    Ok(())
}

#[test]
fn test_repeated_runs_match() -> Result<()> {
    let project = TestProject::new();
    project.add_app("blog", &MIGRATIONS)?;
    project.add_app("shop", &MIGRATIONS)?;
    project.add_app("wiki", &MIGRATIONS)?;
    project.write_marker("shop", "0002_add_field\n")?;
    project.write_marker("wiki", "x\ny\n")?;

    let first = check_ids(&project, &[])?;
    let second = check_ids(&project, &[])?;

    assert_eq!(
        first,
        vec!["maxmig.E001", "maxmig.E004", "maxmig.E002"]
    );
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_silenced_ids_are_counted() -> Result<()> {
    let project = TestProject::new();
    project.add_app("blog", &MIGRATIONS)?;
    project.add_app("shop", &MIGRATIONS)?;
    project.write_marker("shop", "0001_init\n")?;

    let mut config = project_config(&project);
    config.checks.silenced = vec!["maxmig.E001".to_string()];
    let registry = ProjectRegistry::load(&config)?;
    let report = run_project_checks(&config, &registry, &[], &[])?;

    assert_eq!(report.silenced, 1);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].id, "maxmig.E004");
    Ok(())
}

#[test]
fn test_custom_marker_file_name() -> Result<()> {
    let project = TestProject::new();
    let migrations = project.add_app("blog", &MIGRATIONS)?;
    std::fs::write(migrations.join("latest.txt"), "0003_rename\n")?;

    let mut config = project_config(&project);
    config.migrations.marker_file = "latest.txt".to_string();
    let registry = ProjectRegistry::load(&config)?;
    let report = run_project_checks(&config, &registry, &[], &[])?;
    assert!(report.is_clean());

    // Messages name the configured file
    std::fs::remove_file(migrations.join("latest.txt"))?;
    let report = run_project_checks(&config, &registry, &[], &[])?;
    assert_eq!(report.issues[0].msg, "blog's latest.txt does not exist.");
    Ok(())
}
