//! The acceptance scenarios
//!
//! Each scenario is an independently assertable walk through the wizard,
//! compiled to a step plan up front. A scenario with a server-side
//! precondition carries its own setup plan and never depends on another
//! scenario having run.

use serde::{Deserialize, Serialize};

use moccona_driver::Step;

use crate::error::SuiteResult;
use crate::flow::SignupWizard;
use crate::rules::{self, messages};
use crate::session::{EmailFactory, SignupSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Plan run in its own browser session before `steps`
    #[serde(default)]
    pub setup: Option<Vec<Step>>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Full signup, business skip and logout with zero visible errors
pub fn account_creation(factory: &mut dyn EmailFactory) -> SuiteResult<Scenario> {
    let session = SignupSession::issue(factory);

    let mut wizard = SignupWizard::open();
    wizard
        .fill_email(&session.email)?
        .start_email_signup()?
        .expect_still_on_signup()?
        .expect_create_account_locked()?
        .fill_password(&session.password)?
        .accept_terms()?
        .expect_create_account_unlocked()?
        .submit_account_creation()?
        .expect_account_created()?
        .fill_personal_details(&session.personal)?
        .submit_personal_details()?
        .expect_business_step()?
        .skip_business_details()?
        .log_out()?;

    Ok(Scenario {
        name: "account_creation".to_string(),
        description: "valid email, password and personal details create an account end to end"
            .to_string(),
        tags: tags(&["smoke", "signup"]),
        setup: None,
        steps: wizard.into_steps(),
    })
}

/// Empty-email rejection, then the indicator partition across the
/// boundary passwords
pub fn password_criteria_ladder(factory: &mut dyn EmailFactory) -> SuiteResult<Scenario> {
    let session = SignupSession::issue(factory);

    let mut wizard = SignupWizard::open();
    wizard
        .start_email_signup()?
        .expect_email_error(messages::EMAIL_REQUIRED)?
        .expect_still_on_signup()?
        .fill_email(&session.email)?
        .start_email_signup()?
        .fill_password("")?
        .accept_terms()?;

    for password in rules::PASSWORD_LADDER {
        if !password.is_empty() {
            wizard.fill_password(password)?;
        }
        wizard.expect_password_indicators(rules::indicator_counts(password))?;
    }

    Ok(Scenario {
        name: "password_criteria_ladder".to_string(),
        description: "strength indicators partition exactly across the boundary passwords"
            .to_string(),
        tags: tags(&["signup", "validation"]),
        setup: None,
        steps: wizard.into_steps(),
    })
}

/// A non-work address is rejected at account creation and the flow stays
/// on the signup page
pub fn work_email_rejected() -> SuiteResult<Scenario> {
    let mut wizard = SignupWizard::open();
    wizard
        .fill_email("invalid-email")?
        .start_email_signup()?
        .fill_password(rules::VALID_PASSWORD)?
        .accept_terms()?
        .submit_account_creation()?
        .expect_email_error(messages::WORK_EMAIL_REQUIRED)?
        .expect_still_on_signup()?;

    Ok(Scenario {
        name: "work_email_rejected".to_string(),
        description: "a non-work address is rejected when the account is submitted".to_string(),
        tags: tags(&["signup", "validation"]),
        setup: None,
        steps: wizard.into_steps(),
    })
}

/// Re-registering an email yields the conflict message, not a new account
pub fn duplicate_account(factory: &mut dyn EmailFactory) -> SuiteResult<Scenario> {
    let seed = SignupSession::issue(factory);

    // setup: register the account the scenario collides with
    let mut setup = SignupWizard::open();
    setup
        .fill_email(&seed.email)?
        .start_email_signup()?
        .fill_password(&seed.password)?
        .accept_terms()?
        .submit_account_creation()?
        .expect_account_created()?;

    let mut wizard = SignupWizard::open();
    wizard
        .fill_email(&seed.email)?
        .start_email_signup()?
        .fill_password(&seed.password)?
        .accept_terms()?
        .submit_account_creation()?
        .expect_account_exists_error()?
        .expect_still_on_signup()?;

    Ok(Scenario {
        name: "duplicate_account".to_string(),
        description: "an already registered email is refused with the conflict message"
            .to_string(),
        tags: tags(&["signup", "conflict"]),
        setup: Some(setup.into_steps()),
        steps: wizard.into_steps(),
    })
}

/// All four personal-info fields report missing input at once
pub fn personal_info_required_fields(factory: &mut dyn EmailFactory) -> SuiteResult<Scenario> {
    let session = SignupSession::issue(factory);

    let mut wizard = SignupWizard::open();
    wizard
        .fill_email(&session.email)?
        .start_email_signup()?
        .fill_password(&session.password)?
        .accept_terms()?
        .submit_account_creation()?
        .expect_account_created()?
        .clear_personal_details()?
        .submit_personal_details()?
        .expect_personal_details_errors()?;

    Ok(Scenario {
        name: "personal_info_required_fields".to_string(),
        description: "submitting empty personal details surfaces every field error together"
            .to_string(),
        tags: tags(&["signup", "validation"]),
        setup: None,
        steps: wizard.into_steps(),
    })
}

/// The whole suite, one factory-issued identity per scenario
pub fn standard_suite(factory: &mut dyn EmailFactory) -> SuiteResult<Vec<Scenario>> {
    Ok(vec![
        account_creation(factory)?,
        password_criteria_ladder(factory)?,
        work_email_rejected()?,
        duplicate_account(factory)?,
        personal_info_required_fields(factory)?,
    ])
}
