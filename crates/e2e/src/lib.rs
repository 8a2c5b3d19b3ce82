//! Acceptance suite for the Moccona business signup flow
//!
//! Drives a real browser against a live environment and asserts the
//! signup wizard's validation, navigation and account-creation semantics.
//! The wizard is modelled as a linear chain of page states; scenarios are
//! step plans compiled up front, one isolated browser session per plan.
//!
//! ```text
//! SignupEmail ──▶ SignupPersonalInfo ──▶ BusinessInfo ──▶ LoggedOut
//!      │                   │
//!      └───────────────────┴── validation errors keep the flow
//!                               on its current page
//!
//! SignupWizard ──▶ Scenario ──▶ SuiteRunner ──▶ PlaywrightRunner
//!  (flow model)    (step plan)   (sessions,      (one node process
//!                                 results)        per session)
//! ```

pub mod error;
pub mod flow;
pub mod rules;
pub mod runner;
pub mod scenario;
pub mod session;
pub mod target;

pub use error::{SuiteError, SuiteResult};
pub use flow::{PageState, SignupWizard};
pub use runner::{RunReport, ScenarioReport, SuiteRunner};
pub use scenario::Scenario;
pub use session::{EmailFactory, SequenceEmailFactory, SignupSession, UuidEmailFactory};
