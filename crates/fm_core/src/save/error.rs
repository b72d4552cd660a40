use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Malformed data: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Whether retrying against another location can help.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::FileNotFound { .. } => true,
            StoreError::Json(_) | StoreError::Yaml(_) => false,
            StoreError::Malformed(_) => false,
        }
    }
}
