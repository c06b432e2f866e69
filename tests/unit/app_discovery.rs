use crate::helpers::project::TestProject;
use anyhow::Result;
use maxmig::apps::{AppRegistry, MigrationsSource, ProjectRegistry};
use maxmig::config::{ConfigBuilder, load_config};

fn labels(registry: &ProjectRegistry) -> Vec<String> {
    registry
        .app_configs()
        .iter()
        .map(|app| app.label.clone())
        .collect()
}

fn load_registry(project: &TestProject) -> Result<ProjectRegistry> {
    let config_path = project.root().join("maxmig.yaml");
    let input = load_config(config_path.to_str().unwrap())?;
    let config = ConfigBuilder::new().with_file(input).resolve()?;
    ProjectRegistry::load(&config)
}

#[test]
fn test_discovery_without_config() -> Result<()> {
    let project = TestProject::new();
    project.add_app("shop", &["0001_init"])?;
    project.add_app("apps/blog", &["0001_init"])?;
    project.add_unmigrated_app("utils")?;

    let registry = load_registry(&project)?;

    assert_eq!(labels(&registry), vec!["blog", "shop"]);
    Ok(())
}

#[test]
fn test_discovery_exclude_patterns() -> Result<()> {
    let project = TestProject::new();
    project.add_app("shop", &["0001_init"])?;
    project.add_app("legacy/blog", &["0001_init"])?;
    project.write_config("discovery:\n  exclude: [\"legacy/*\"]\n")?;

    let registry = load_registry(&project)?;

    assert_eq!(labels(&registry), vec!["shop"]);
    Ok(())
}

#[test]
fn test_discovery_include_patterns() -> Result<()> {
    let project = TestProject::new();
    project.add_app("apps/shop", &["0001_init"])?;
    project.add_app("scripts/tool", &["0001_init"])?;
    project.write_config("discovery:\n  include: [\"apps/*\"]\n")?;

    let registry = load_registry(&project)?;

    assert_eq!(labels(&registry), vec!["shop"]);
    Ok(())
}

#[test]
fn test_vendored_label_does_not_collide() -> Result<()> {
    let project = TestProject::new();
    project.add_app("auth", &["0001_init"])?;
    project.add_app(
        "venv/lib/python3.12/site-packages/django/contrib/auth",
        &["0001_initial", "0012_alter_user_first_name_max_length"],
    )?;
    project.add_app(
        "venv/lib/python3.12/site-packages/django/contrib/sessions",
        &["0001_initial"],
    )?;

    let registry = load_registry(&project)?;

    assert_eq!(labels(&registry), vec!["auth"]);
    assert!(
        !registry.app_configs()[0]
            .path
            .to_string_lossy()
            .contains("site-packages")
    );
    Ok(())
}

#[test]
fn test_explicit_apps_keep_config_order() -> Result<()> {
    let project = TestProject::new();
    project.add_app("shop", &["0001_init"])?;
    project.add_app("blog", &["0001_init"])?;
    project.write_config(
        r#"
apps:
  - path: shop
  - path: blog
    label: weblog
  - path: archive
    migrate: false
"#,
    )?;

    let registry = load_registry(&project)?;

    assert_eq!(labels(&registry), vec!["shop", "weblog", "archive"]);
    assert_eq!(
        registry.get_app_config("archive").unwrap().migrations,
        MigrationsSource::Disabled
    );
    assert!(registry.app_configs()[0].path.ends_with("shop"));
    Ok(())
}

#[test]
fn test_duplicate_labels_rejected() -> Result<()> {
    let project = TestProject::new();
    project.write_config(
        r#"
apps:
  - path: one/core
  - path: two/core
"#,
    )?;

    let err = load_registry(&project).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Application labels aren't unique, duplicates: core"
    );
    Ok(())
}
