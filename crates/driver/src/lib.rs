//! Browser session driver for the signup acceptance suite
//!
//! Compiles step plans into self-contained Playwright programs, runs them
//! through `node` (one process per browser session) and interprets the
//! JSON report lines the scripts print. Suite code stays free of engine
//! details: it hands over a `Vec<Step>` and gets a [`SessionReport`]
//! back, with timeout and assertion failures kept distinct.

pub mod config;
pub mod error;
pub mod locator;
pub mod playwright;
pub mod script;
pub mod step;

pub use config::{Browser, DriverConfig, Viewport};
pub use error::{DriverError, DriverResult};
pub use locator::Locator;
pub use playwright::{FailureKind, PlaywrightRunner, SessionReport, StepFailure};
pub use script::ScriptBuilder;
pub use step::{Step, UrlPattern};
