#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request parameters for {platform}")]
    BadRequest { platform: String },

    #[error("No results for query on {platform}")]
    NoResults { platform: String },

    #[error("{platform} returned status {status}")]
    Upstream { platform: String, status: u16 },

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("No {0} rate in exchange-rates response")]
    MissingRate(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed data: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Map a non-success upstream status to the matching failure.
    pub fn from_status(platform: &str, status: u16) -> Self {
        match status {
            400 => AppError::BadRequest {
                platform: platform.to_string(),
            },
            404 => AppError::NoResults {
                platform: platform.to_string(),
            },
            _ => AppError::Upstream {
                platform: platform.to_string(),
                status,
            },
        }
    }
}
