//! Verifies each first-party app's max migration marker against its migrations.
//!
//! Per app, the first failing condition wins: the marker must exist (E001),
//! be readable (E005), hold a single line (E002), name a real migration
//! (E003) and name the latest one (E004).

use crate::apps::first_party_apps;
use crate::checks::{CheckContext, CheckMessage};
use crate::constants::CHECK_ID_PREFIX;
use crate::migration::MigrationDetails;
use std::path::Path;
use tracing::{debug, warn};

/// Ways a marker file can disagree with the migrations on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerProblem {
    Missing,
    MultipleLines,
    NonexistentMigration { name: String },
    NotLatest { name: String, latest: String },
    Unreadable { error: String },
}

impl MarkerProblem {
    pub fn code(&self) -> &'static str {
        match self {
            MarkerProblem::Missing => "E001",
            MarkerProblem::MultipleLines => "E002",
            MarkerProblem::NonexistentMigration { .. } => "E003",
            MarkerProblem::NotLatest { .. } => "E004",
            MarkerProblem::Unreadable { .. } => "E005",
        }
    }

    pub fn id(&self) -> String {
        format!("{}.{}", CHECK_ID_PREFIX, self.code())
    }

    /// Build the user-facing message for an app's marker file
    pub fn to_message(&self, app_label: &str, marker_file: &str) -> CheckMessage {
        let (msg, hint) = match self {
            MarkerProblem::Missing => (
                format!("{}'s {} does not exist.", app_label, marker_file),
                format!(
                    "If you just started tracking max migrations, create {} containing the \
                     name of the app's latest migration. Otherwise, check how it has gone missing.",
                    marker_file
                ),
            ),
            MarkerProblem::MultipleLines => (
                format!("{}'s {} contains multiple lines.", app_label, marker_file),
                "This may be the result of a git merge. Fix the file to contain only the name \
                 of the latest migration."
                    .to_string(),
            ),
            MarkerProblem::NonexistentMigration { name } => (
                format!(
                    "{}'s {} points to non-existent migration '{}'.",
                    app_label, marker_file, name
                ),
                format!(
                    "Edit the {} to contain the latest migration's name.",
                    marker_file
                ),
            ),
            MarkerProblem::NotLatest { name, latest } => (
                format!(
                    "{}'s {} contains '{}', but the latest migration is '{}'.",
                    app_label, marker_file, name, latest
                ),
                format!(
                    "Edit {} to contain '{}' or rebase '{}' to be the latest migration.",
                    marker_file, latest, name
                ),
            ),
            MarkerProblem::Unreadable { error } => (
                format!(
                    "{}'s {} could not be read: {}",
                    app_label, marker_file, error
                ),
                format!("Check the permissions and encoding of {}.", marker_file),
            ),
        };

        CheckMessage::error(self.id(), msg)
            .with_hint(hint)
            .with_obj(app_label)
    }
}

/// Compare a marker file against the app's discovered migrations
pub fn inspect_marker(marker_path: &Path, details: &MigrationDetails) -> Option<MarkerProblem> {
    if !marker_path.exists() {
        return Some(MarkerProblem::Missing);
    }

    let contents = match std::fs::read_to_string(marker_path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Failed to read {}: {}", marker_path.display(), e);
            return Some(MarkerProblem::Unreadable {
                error: e.to_string(),
            });
        }
    };

    let lines: Vec<&str> = contents
        .trim()
        .split(is_line_boundary)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() > 1 {
        return Some(MarkerProblem::MultipleLines);
    }

    // A blank marker names the empty migration, which never exists
    let name = lines.first().copied().unwrap_or_default();
    if !details.names().contains(name) {
        return Some(MarkerProblem::NonexistentMigration {
            name: name.to_string(),
        });
    }

    match details.latest() {
        Some(latest) if latest != name => Some(MarkerProblem::NotLatest {
            name: name.to_string(),
            latest: latest.to_string(),
        }),
        _ => None,
    }
}

/// Line boundaries, including a bare `\r` and the Unicode separators
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Check every first-party app's max migration marker
///
/// Never fails: every problem becomes a message and apps are checked
/// independently of one another.
pub fn check_max_migration_files(ctx: &CheckContext<'_>) -> Vec<CheckMessage> {
    let marker_file = ctx.layout.marker_file();
    let mut errors = Vec::new();

    for app in first_party_apps(ctx.registry, ctx.filter) {
        // When only checking certain apps, skip the others
        if !ctx.includes_app(&app.label) {
            continue;
        }

        let details = MigrationDetails::resolve(app, ctx.layout);
        let Some(dir) = details.dir() else {
            continue;
        };

        let marker_path = dir.join(marker_file);
        match inspect_marker(&marker_path, &details) {
            Some(problem) => {
                debug!("{} for '{}'", problem.id(), app.label);
                errors.push(problem.to_message(&app.label, marker_file));
            }
            None => debug!("'{}' max migration is up to date", app.label),
        }
    }

    errors
}
