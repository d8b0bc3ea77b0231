use std::fmt;
use thiserror::Error as ThisError;

/// Remote call a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CreateFolder,
    BulkUpload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::CreateFolder => write!(f, "create folder"),
            Stage::BulkUpload => write!(f, "bulk upload"),
        }
    }
}

#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum UploadError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("cannot load plan: {0}")]
    Load(String),
    #[error("invalid plan: {0}")]
    Validation(String),
    #[error("{stage} failed with status {status}: {body}")]
    Remote {
        stage: Stage,
        status: u16,
        body: String,
    },
    #[error("{stage} request failed: {message}")]
    Transport { stage: Stage, message: String },
}

impl UploadError {
    pub fn transport<D: fmt::Display>(stage: Stage, d: D) -> Self {
        UploadError::Transport {
            stage,
            message: d.to_string(),
        }
    }

    /// Process exit code for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            UploadError::Config(_) => 2,
            UploadError::Load(_) => 3,
            UploadError::Validation(_) => 4,
            UploadError::Remote { .. } => 5,
            UploadError::Transport { .. } => 6,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            UploadError::Remote { stage, .. } | UploadError::Transport { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }
}
