#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{endpoint} responded with HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Invalid {endpoint} payload: {source}")]
    Validation {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
