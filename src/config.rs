use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::naming::NamingScheme;

/// Immutable settings shared by every component of a generation request.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub naming: NamingScheme,

    #[serde(default)]
    pub extensions: Extensions,

    /// Directory of template bodies; the built-in templates when unset.
    pub templates: Option<PathBuf>,

    /// Newline-delimited list of framework class names.
    pub framework_types: Option<PathBuf>,

    /// External command used for MOCK generation.
    pub mock: Option<MockConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Extensions {
    pub header: String,
    pub source: String,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            header: ".h".to_string(),
            source: ".cpp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MockConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: GeneratorConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }
}
