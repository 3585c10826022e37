//! Error types for loading, merging and saving a kubeconfig.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// KubeconfigError covers every way a run can fail.
///
/// Each variant identifies the step that failed; nothing is retried.
#[derive(Debug, Error)]
pub enum KubeconfigError {
    #[error("argument error: {message}")]
    Argument { message: String },

    #[error("cannot fetch cluster parameters: {message}")]
    ParameterSource { message: String },

    #[error("cannot read yaml file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write yaml file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot unmarshal yaml data: {message}")]
    Parse { message: String },

    #[error("cannot marshal yaml data: {message}")]
    Serialize { message: String },

    #[error("illegal config format: {message}")]
    Schema { message: String },
}

impl KubeconfigError {
    /// Creates an argument error for a flag that was left empty.
    pub fn empty_argument(flag: &str) -> Self {
        KubeconfigError::Argument {
            message: format!("'{}' is empty", flag),
        }
    }

    /// Creates a parameter source error.
    pub fn parameter_source(message: impl Into<String>) -> Self {
        KubeconfigError::ParameterSource {
            message: message.into(),
        }
    }

    /// Creates a read error for `path`.
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        KubeconfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a write error for `path`.
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        KubeconfigError::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        KubeconfigError::Parse {
            message: message.into(),
        }
    }

    /// Creates a serialize error.
    pub fn serialize(message: impl Into<String>) -> Self {
        KubeconfigError::Serialize {
            message: message.into(),
        }
    }

    /// Creates a schema error for a reserved key that is absent.
    pub fn missing_key(key: &str) -> Self {
        KubeconfigError::Schema {
            message: format!("key '{}' is not exist", key),
        }
    }

    /// Creates a schema error for a reserved key that does not hold a list.
    pub fn not_a_list(key: &str) -> Self {
        KubeconfigError::Schema {
            message: format!("key '{}' must have array data", key),
        }
    }

    /// Process exit status for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            KubeconfigError::Argument { .. } => 2,
            KubeconfigError::ParameterSource { .. } => 3,
            KubeconfigError::Read { .. } => 4,
            KubeconfigError::Parse { .. } => 5,
            KubeconfigError::Schema { .. } => 6,
            KubeconfigError::Serialize { .. } => 7,
            KubeconfigError::Write { .. } => 8,
        }
    }

    /// The `[Error] ...` line printed on stderr, always a single line.
    pub fn diagnostic(&self) -> String {
        let message = self.to_string();
        format!("[Error] {}", message.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

pub type Result<T> = std::result::Result<T, KubeconfigError>;
