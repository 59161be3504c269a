use serde::{Deserialize, Serialize};

use crate::analysis::{Classification, Limits};
use crate::tree::NodeKind;

/// Optional replacements for the increasing sets of the two presets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_increasing: Option<Vec<NodeKind>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_increasing: Option<Vec<NodeKind>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default = "default_expression_complexity")]
    pub max_expression_complexity: usize,
    #[serde(default = "default_function_complexity")]
    pub max_function_complexity: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Per-file analysis deadline in milliseconds. Zero disables it.
    #[serde(default)]
    pub file_timeout_ms: u64,
    #[serde(default)]
    pub disabled: Vec<String>,
    #[serde(default)]
    pub classification: ClassificationConfig,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_expression_complexity: default_expression_complexity(),
            max_function_complexity: default_function_complexity(),
            max_depth: default_max_depth(),
            file_timeout_ms: 0,
            disabled: Vec::new(),
            classification: ClassificationConfig::default(),
        }
    }
}

impl RuleConfig {
    #[must_use]
    pub fn is_enabled(&self, rule: &str) -> bool {
        !self.disabled.iter().any(|d| d == rule)
    }

    #[must_use]
    pub fn limits(&self) -> Limits {
        Limits {
            max_depth: self.max_depth,
        }
    }

    #[must_use]
    pub fn expression_classification(&self) -> Classification {
        let preset = Classification::expression_level();
        match &self.classification.expression_increasing {
            Some(kinds) => preset.replace_increasing(kinds.iter().copied()),
            None => preset,
        }
    }

    #[must_use]
    pub fn function_classification(&self) -> Classification {
        let preset = Classification::function_level();
        match &self.classification.function_increasing {
            Some(kinds) => preset.replace_increasing(kinds.iter().copied()),
            None => preset,
        }
    }
}

const fn default_expression_complexity() -> usize { 3 }
const fn default_function_complexity() -> usize { 10 }
const fn default_max_depth() -> usize { 512 }

/// On-disk layout of `sonde.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SondeToml {
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub include_patterns: Vec<regex::Regex>,
    pub exclude_patterns: Vec<regex::Regex>,
    pub rules: RuleConfig,
}
