use thiserror::Error;

#[derive(Error, Debug)]
pub enum CustomizationError {
    #[error("Request is not authenticated for the admin API")]
    Unauthorized,
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Admin API responded with {status}: {body}")]
    Http { status: u16, body: String },
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    Settings(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CustomizationError {
    /// Whether the failure came from the remote platform rather than from this process.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Http { .. } | Self::GraphQl(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CustomizationError>;
