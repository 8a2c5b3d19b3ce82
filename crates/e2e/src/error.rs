//! Error types for the acceptance suite

use thiserror::Error;

use crate::flow::PageState;

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("target unreachable: {url} (gave up after {attempts} attempt(s))")]
    TargetUnreachable { url: String, attempts: usize },

    #[error("illegal page transition: {from} -> {to}")]
    IllegalTransition { from: PageState, to: PageState },

    #[error("action requires the {required} page but the flow is on {actual}")]
    WrongPage { required: PageState, actual: PageState },

    #[error("invalid date of birth: {day:02}/{month:02}/{year}")]
    InvalidDateOfBirth { day: u8, month: u8, year: u16 },

    #[error("no scenario named '{0}'")]
    ScenarioNotFound(String),

    #[error("driver error: {0}")]
    Driver(#[from] moccona_driver::DriverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type SuiteResult<T> = Result<T, SuiteError>;
