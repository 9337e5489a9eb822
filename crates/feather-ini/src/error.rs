use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IniError {
    #[error("duplicate section '{name}' at line {line}")]
    DuplicateSection { name: String, line: usize },

    #[error("duplicate key '{key}' in section '{section}' at line {line}")]
    DuplicateKey {
        section: String,
        key: String,
        line: usize,
    },

    #[error("section '{name}' already exists")]
    SectionExists { name: String },

    #[error("failed to read {}: {source}", display_path(.path))]
    SourceUnavailable {
        path: Option<PathBuf>,
        source: io::Error,
    },

    #[error("failed to write {}: {source}", display_path(.path))]
    DestinationUnavailable {
        path: Option<PathBuf>,
        source: io::Error,
    },

    #[error("value '{value}' of key '{key}' in section '{section}' is not a valid {expected}: {reason}")]
    MalformedValue {
        section: String,
        key: String,
        value: String,
        expected: &'static str,
        reason: String,
    },
}

impl IniError {
    /// Whether the error came from the document structure rather than from I/O
    /// or value conversion.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateSection { .. } | Self::DuplicateKey { .. } | Self::SectionExists { .. }
        )
    }

    /// 1-based input line for parse errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::DuplicateSection { line, .. } | Self::DuplicateKey { line, .. } => Some(*line),
            _ => None,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<memory>".to_string(),
    }
}

pub type IniResult<T> = Result<T, IniError>;
