use std::path::PathBuf;
use thiserror::Error;

/// A source line that does not match the supported declaration grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}\n    in line: {line}")]
pub struct ParseError {
    /// The offending line, trimmed.
    pub line: String,
    /// What was expected and what was found instead.
    pub message: String,
}

impl ParseError {
    pub fn new(line: &str, message: impl Into<String>) -> Self {
        Self {
            line: line.trim().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Invalid usage: {0}")]
    Usage(String),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Naming convention violated: {0}")]
    NamingConvention(String),
    #[error("Template error in {template}: {message}")]
    Template { template: String, message: String },
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("External backend failed: {0}")]
    Backend(String),
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::Template {
            template: template.into(),
            message: message.into(),
        }
    }
}
