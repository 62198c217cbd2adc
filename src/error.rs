use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read model file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model document is not well-formed: {0}")]
    Parse(#[from] json5::Error),

    /// A required key is missing or holds a value of the wrong type
    #[error("Bad model field: {0}")]
    FieldType(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::FieldType(e.to_string())
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
