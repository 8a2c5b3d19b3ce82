//! Error types for the driver crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Playwright not found. Install with: npx playwright install")]
    EngineNotFound,

    #[error("browser session '{label}' exceeded the {seconds}s deadline")]
    SessionDeadline { label: String, seconds: u64 },

    #[error("unreadable session report for '{label}': {detail}")]
    MalformedReport { label: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DriverResult<T> = Result<T, DriverError>;
