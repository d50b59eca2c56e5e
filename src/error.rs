use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseMessageError;

/// Errors raised while reading messages from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseMessageError,
    },
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: ParseMessageError) -> Self {
        LoadError::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}

/// Errors raised while rendering a threaded forest.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize threads: {0}")]
    Json(#[from] serde_json::Error),
}
