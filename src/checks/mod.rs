//! Check framework: messages, levels, tags and a registry of check functions.

pub mod max_migration;

pub use max_migration::check_max_migration_files;

use crate::apps::AppRegistry;
use crate::config::AppFilter;
use crate::migration::MigrationLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Severity of a check message, ordered from least to most serious
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug = 10,
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl Level {
    /// Section heading used when reporting messages at this level
    pub fn heading(self) -> &'static str {
        match self {
            Level::Debug => "DEBUGS",
            Level::Info => "INFOS",
            Level::Warning => "WARNINGS",
            Level::Error => "ERRORS",
            Level::Critical => "CRITICALS",
        }
    }
}

/// A single diagnostic produced by a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckMessage {
    pub level: Level,
    pub id: String,
    pub msg: String,
    pub hint: Option<String>,
    /// What the message is about, usually an app label
    pub obj: Option<String>,
}

impl CheckMessage {
    pub fn error(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            id: id.into(),
            msg: msg.into(),
            hint: None,
            obj: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_obj(mut self, obj: impl Into<String>) -> Self {
        self.obj = Some(obj.into());
        self
    }

    /// Errors and criticals fail a check run by default
    pub fn is_serious(&self, fail_level: Level) -> bool {
        self.level >= fail_level
    }
}

impl fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ({}) {}",
            self.obj.as_deref().unwrap_or("?"),
            self.id,
            self.msg
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n\tHINT: {}", hint)?;
        }
        Ok(())
    }
}

/// Groups of checks that can be run selectively
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Models,
}

/// Everything a check needs to inspect the project
pub struct CheckContext<'a> {
    pub registry: &'a dyn AppRegistry,
    pub filter: &'a AppFilter,
    pub layout: &'a MigrationLayout,
    /// Only check these app labels, when set
    pub app_labels: Option<&'a [String]>,
}

impl CheckContext<'_> {
    pub fn includes_app(&self, label: &str) -> bool {
        self.app_labels
            .is_none_or(|labels| labels.iter().any(|l| l == label))
    }
}

pub type CheckFn = fn(&CheckContext<'_>) -> Vec<CheckMessage>;

struct RegisteredCheck {
    name: &'static str,
    tags: Vec<Tag>,
    check: CheckFn,
}

/// Ordered collection of registered checks
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<RegisteredCheck>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every check maxmig ships with
    pub fn with_builtin_checks() -> Self {
        let mut registry = Self::new();
        registry.register(
            "max_migration_files",
            &[Tag::Models],
            check_max_migration_files,
        );
        registry
    }

    pub fn register(&mut self, name: &'static str, tags: &[Tag], check: CheckFn) {
        self.checks.push(RegisteredCheck {
            name,
            tags: tags.to_vec(),
            check,
        });
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check tagged with one of `tags` (all checks when `None`)
    pub fn run_checks(&self, ctx: &CheckContext<'_>, tags: Option<&[Tag]>) -> Vec<CheckMessage> {
        let mut messages = Vec::new();

        for registered in &self.checks {
            if let Some(tags) = tags
                && !registered.tags.iter().any(|t| tags.contains(t))
            {
                continue;
            }

            let found = (registered.check)(ctx);
            debug!(
                "Check '{}' produced {} messages",
                registered.name,
                found.len()
            );
            messages.extend(found);
        }

        messages
    }
}

/// Messages left after silencing, plus how many were dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub issues: Vec<CheckMessage>,
    pub silenced: usize,
}

impl CheckReport {
    pub fn new(messages: Vec<CheckMessage>, silenced_ids: &[String]) -> Self {
        let total = messages.len();
        let issues: Vec<CheckMessage> = messages
            .into_iter()
            .filter(|m| !silenced_ids.contains(&m.id))
            .collect();

        Self {
            silenced: total - issues.len(),
            issues,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_serious(&self, fail_level: Level) -> bool {
        self.issues.iter().any(|m| m.is_serious(fail_level))
    }
}
