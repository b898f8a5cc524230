//! Batch configuration.

use std::path::Path;

use handbook_markup::{DirectiveRegistry, ScriptVariant};
use serde::{Deserialize, Serialize};

use crate::error::BatchError;

/// What happens to the run when one unit fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and compile the remaining units.
    #[default]
    Continue,
    /// Stop at the first failed unit, in document order.
    Abort,
}

/// A handbook: a named selection of original chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandbookConfig {
    /// Display name (e.g., "锻炼手册").
    pub name: String,
    /// Original chapter numbers included. Empty selects every chapter.
    #[serde(default)]
    pub chapters: Vec<u32>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HandbookConfig {
    /// Whether units of an original chapter belong to this handbook.
    pub fn includes(&self, chapter: u32) -> bool {
        self.chapters.is_empty() || self.chapters.contains(&chapter)
    }
}

/// Settings for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchConfig {
    /// Script the handbook is authored in; selects the built-in registry.
    pub script: ScriptVariant,
    /// Chapter selection. `None` processes every unit.
    pub handbook: Option<HandbookConfig>,
    /// Per-unit failure policy.
    pub failure_policy: FailurePolicy,
    /// Maximum worker threads. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Replaces the built-in registry when present.
    pub registry: Option<DirectiveRegistry>,
}

impl BatchConfig {
    /// Parses a YAML document.
    ///
    /// # Example
    ///
    /// ```
    /// use handbook_batch::{BatchConfig, FailurePolicy};
    ///
    /// let config = BatchConfig::from_yaml_str(
    ///     "failurePolicy: abort\nhandbook:\n  name: 急救手册\n  chapters: [1, 2, 3]\n",
    /// )
    /// .unwrap();
    /// assert_eq!(config.failure_policy, FailurePolicy::Abort);
    /// assert!(config.handbook.unwrap().includes(2));
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self, BatchError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads and parses a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Registry the run compiles against.
    pub fn registry(&self) -> DirectiveRegistry {
        self.registry
            .clone()
            .unwrap_or_else(|| DirectiveRegistry::for_variant(self.script))
    }

    /// Whether a unit of this original chapter is processed.
    pub fn includes_chapter(&self, chapter: u32) -> bool {
        self.handbook
            .as_ref()
            .is_none_or(|handbook| handbook.includes(chapter))
    }
}
