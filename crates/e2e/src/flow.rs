//! Flow-state model of the signup wizard
//!
//! The wizard is a linear chain of page states. [`SignupWizard`] encodes
//! the legal transitions and the controls of each page, and compiles user
//! actions into driver steps. Every action with an asynchronous effect is
//! followed by a bounded wait on the resulting UI state, never a fixed
//! delay.

use std::fmt;

use serde::{Deserialize, Serialize};

use moccona_driver::{Step, UrlPattern};

use crate::error::{SuiteError, SuiteResult};
use crate::rules::{messages, IndicatorCounts};
use crate::session::PersonalDetails;

/// Entry route of the signup flow
pub const ENTRY_PATH: &str = "/app/business-signup";

/// Bound for waits whose outcome depends on a server round trip
const SERVER_VERDICT_TIMEOUT_MS: u64 = 15_000;

/// A discrete step of the signup wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    SignupEmail,
    SignupPersonalInfo,
    BusinessInfo,
    LoggedOut,
}

impl PageState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageState::SignupEmail => "signup_email",
            PageState::SignupPersonalInfo => "signup_personal_info",
            PageState::BusinessInfo => "business_info",
            PageState::LoggedOut => "logged_out",
        }
    }

    /// URL pattern that proves the flow reached this state
    pub fn url_pattern(&self) -> UrlPattern {
        match self {
            PageState::SignupEmail => UrlPattern::path_suffix("/business-signup"),
            PageState::SignupPersonalInfo => UrlPattern::path_suffix("/personal-info"),
            PageState::BusinessInfo => UrlPattern::path_suffix("/business-info"),
            PageState::LoggedOut => UrlPattern::path_suffix("/login"),
        }
    }

    /// The wizard only ever moves one state forward
    pub fn can_advance_to(self, next: PageState) -> bool {
        matches!(
            (self, next),
            (PageState::SignupEmail, PageState::SignupPersonalInfo)
                | (PageState::SignupPersonalInfo, PageState::BusinessInfo)
                | (PageState::BusinessInfo, PageState::LoggedOut)
        )
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controls the scenarios interact with, per page
mod ui {
    use moccona_driver::Locator;

    pub fn email_input() -> Locator {
        Locator::css(r#"input[name="email"]"#)
    }

    pub fn password_input() -> Locator {
        Locator::css(r#"input[name="password"]"#)
    }

    pub fn sign_up_with_email() -> Locator {
        Locator::css(r#"button:has-text("Sign up with email")"#)
    }

    pub fn create_account() -> Locator {
        Locator::text("Create account")
    }

    // The terms checkbox has no stable id; it is the third label on the page.
    pub fn terms_checkbox() -> Locator {
        Locator::css("label").nth(2)
    }

    pub fn submit_signup() -> Locator {
        Locator::test_id("email-sign-up")
    }

    pub fn password_error_indicators() -> Locator {
        Locator::test_id("ds-alert-error-icon ds-exclamation-circle-icon")
    }

    pub fn password_satisfied_indicators() -> Locator {
        Locator::test_id("ds-alert-brand-check-icon ds-check-circle-icon")
    }

    pub fn first_name_input() -> Locator {
        Locator::test_id("input-first-name")
    }

    pub fn last_name_input() -> Locator {
        Locator::test_id("input-last-name")
    }

    pub fn mobile_number_input() -> Locator {
        Locator::placeholder("345 678")
    }

    pub fn dob_day_input() -> Locator {
        Locator::test_id("dob-day-input").within(Locator::test_id("ds-input"))
    }

    pub fn dob_month_input() -> Locator {
        Locator::test_id("dob-month-input").within(Locator::test_id("ds-input"))
    }

    pub fn dob_year_input() -> Locator {
        Locator::test_id("dob-year-input").within(Locator::test_id("ds-input"))
    }

    pub fn next_button() -> Locator {
        Locator::test_id("next-button")
    }

    pub fn skip_for_now() -> Locator {
        Locator::role("button", "Skip for now")
    }

    pub fn logout() -> Locator {
        Locator::role("button", "logout")
    }

    pub fn message(text: &str) -> Locator {
        Locator::text(text)
    }
}

/// Builds the step plan for one walk through the wizard.
///
/// Methods append driver steps and track the page state. Actions that are
/// only legal on a particular page refuse to run elsewhere, and forward
/// movement goes through `advance`, which rejects anything but the next
/// state in the chain.
#[derive(Debug)]
pub struct SignupWizard {
    steps: Vec<Step>,
    state: PageState,
}

impl SignupWizard {
    /// Open the entry route and wait for the email page
    pub fn open() -> Self {
        let mut wizard = Self {
            steps: Vec::new(),
            state: PageState::SignupEmail,
        };
        wizard.push(Step::Navigate {
            path: ENTRY_PATH.to_string(),
        });
        wizard.push(Step::WaitForUrl {
            pattern: PageState::SignupEmail.url_pattern(),
            timeout_ms: None,
        });
        wizard
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    fn require(&self, required: PageState) -> SuiteResult<()> {
        if self.state != required {
            return Err(SuiteError::WrongPage {
                required,
                actual: self.state,
            });
        }
        Ok(())
    }

    fn advance(&mut self, next: PageState) -> SuiteResult<()> {
        if !self.state.can_advance_to(next) {
            return Err(SuiteError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    // Email page

    pub fn fill_email(&mut self, email: &str) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::Fill {
            locator: ui::email_input(),
            value: email.to_string(),
            timeout_ms: None,
        });
        Ok(self)
    }

    /// Submit the email and reveal the password step (or an email error)
    pub fn start_email_signup(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::Click {
            locator: ui::sign_up_with_email(),
            timeout_ms: None,
        });
        Ok(self)
    }

    /// Suspension point: the flow must still be on the signup route
    pub fn expect_still_on_signup(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::WaitForUrl {
            pattern: PageState::SignupEmail.url_pattern(),
            timeout_ms: None,
        });
        Ok(self)
    }

    /// Create account is shown but stays disabled until the form is valid
    pub fn expect_create_account_locked(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::ExpectVisible {
            locator: ui::create_account(),
            timeout_ms: None,
        });
        self.push(Step::ExpectDisabled {
            locator: ui::create_account(),
            timeout_ms: None,
        });
        Ok(self)
    }

    pub fn expect_create_account_unlocked(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::ExpectEnabled {
            locator: ui::create_account(),
            timeout_ms: None,
        });
        Ok(self)
    }

    pub fn fill_password(&mut self, password: &str) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::Fill {
            locator: ui::password_input(),
            value: password.to_string(),
            timeout_ms: None,
        });
        Ok(self)
    }

    pub fn accept_terms(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::Click {
            locator: ui::terms_checkbox(),
            timeout_ms: None,
        });
        Ok(self)
    }

    /// Suspension point: strength indicators must partition exactly
    pub fn expect_password_indicators(
        &mut self,
        counts: IndicatorCounts,
    ) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::ExpectCount {
            locator: ui::password_error_indicators(),
            count: counts.errors,
            timeout_ms: None,
        });
        self.push(Step::ExpectCount {
            locator: ui::password_satisfied_indicators(),
            count: counts.satisfied,
            timeout_ms: None,
        });
        Ok(self)
    }

    pub fn submit_account_creation(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::Click {
            locator: ui::submit_signup(),
            timeout_ms: None,
        });
        Ok(self)
    }

    /// Account accepted: the server moves the flow to personal info
    pub fn expect_account_created(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::WaitForUrl {
            pattern: PageState::SignupPersonalInfo.url_pattern(),
            timeout_ms: Some(SERVER_VERDICT_TIMEOUT_MS),
        });
        self.advance(PageState::SignupPersonalInfo)?;
        Ok(self)
    }

    /// A field-level or domain-level email error is on screen
    pub fn expect_email_error(&mut self, message: &str) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::ExpectVisible {
            locator: ui::message(message),
            timeout_ms: None,
        });
        Ok(self)
    }

    /// The duplicate-account verdict arrives asynchronously from the server
    pub fn expect_account_exists_error(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupEmail)?;
        self.push(Step::ExpectVisible {
            locator: ui::message(messages::ACCOUNT_EXISTS),
            timeout_ms: Some(SERVER_VERDICT_TIMEOUT_MS),
        });
        Ok(self)
    }

    // Personal-info page

    pub fn fill_personal_details(&mut self, details: &PersonalDetails) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupPersonalInfo)?;
        let dob = &details.date_of_birth;
        for (locator, value) in [
            (ui::first_name_input(), details.first_name.clone()),
            (ui::last_name_input(), details.last_name.clone()),
            (ui::mobile_number_input(), details.mobile_number.clone()),
            (ui::dob_day_input(), dob.day_field()),
            (ui::dob_month_input(), dob.month_field()),
            (ui::dob_year_input(), dob.year_field()),
        ] {
            self.push(Step::Fill {
                locator,
                value,
                timeout_ms: None,
            });
        }
        Ok(self)
    }

    /// Clear every personal-info field, leaving them all unpopulated
    pub fn clear_personal_details(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupPersonalInfo)?;
        for locator in [
            ui::first_name_input(),
            ui::last_name_input(),
            ui::mobile_number_input(),
            ui::dob_day_input(),
            ui::dob_month_input(),
            ui::dob_year_input(),
        ] {
            self.push(Step::Fill {
                locator,
                value: String::new(),
                timeout_ms: None,
            });
        }
        Ok(self)
    }

    pub fn submit_personal_details(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupPersonalInfo)?;
        self.push(Step::Click {
            locator: ui::next_button(),
            timeout_ms: None,
        });
        Ok(self)
    }

    /// All four required-field messages must be on screen at once
    pub fn expect_personal_details_errors(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupPersonalInfo)?;
        for message in [
            messages::FIRST_NAME_REQUIRED,
            messages::LAST_NAME_REQUIRED,
            messages::MOBILE_REQUIRED,
            messages::DOB_INVALID,
        ] {
            self.push(Step::ExpectVisible {
                locator: ui::message(message),
                timeout_ms: None,
            });
        }
        Ok(self)
    }

    /// Personal details accepted: the optional business step is next
    pub fn expect_business_step(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::SignupPersonalInfo)?;
        self.push(Step::ExpectVisible {
            locator: ui::skip_for_now(),
            timeout_ms: Some(SERVER_VERDICT_TIMEOUT_MS),
        });
        self.advance(PageState::BusinessInfo)?;
        Ok(self)
    }

    // Business-info page

    /// Business details are optional; skipping lands on the business-info
    /// route of the signed-in app
    pub fn skip_business_details(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::BusinessInfo)?;
        self.push(Step::Click {
            locator: ui::skip_for_now(),
            timeout_ms: None,
        });
        self.push(Step::WaitForUrl {
            pattern: PageState::BusinessInfo.url_pattern(),
            timeout_ms: None,
        });
        Ok(self)
    }

    /// Logging out proves an authenticated session existed
    pub fn log_out(&mut self) -> SuiteResult<&mut Self> {
        self.require(PageState::BusinessInfo)?;
        self.push(Step::Click {
            locator: ui::logout(),
            timeout_ms: None,
        });
        self.push(Step::WaitForUrl {
            pattern: PageState::LoggedOut.url_pattern(),
            timeout_ms: None,
        });
        self.advance(PageState::LoggedOut)?;
        Ok(self)
    }
}
