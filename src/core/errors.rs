use thiserror::Error;

/// Read-boundary failures. Section or field patterns that fail to match are
/// not errors; they surface as omitted keys in the output.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error: The file '{path}' was not found.")]
    FileNotFound { path: String },
    #[error("Error: An error occurred while reading the file: {0}")]
    Extraction(anyhow::Error),
}

impl CoreError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::FileNotFound { .. } => 2,
            CoreError::Extraction(_) => 3,
        }
    }
}
