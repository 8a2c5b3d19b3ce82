//! Per-scenario signup identities
//!
//! Every scenario owns one [`SignupSession`]. Email addresses come from
//! an injected factory so runs stay isolated from the shared account
//! database and can be replayed deterministically when seeded.

use serde::Serialize;
use uuid::Uuid;

use crate::error::{SuiteError, SuiteResult};
use crate::rules;

/// Domain class the signup form accepts as a work address
pub const WORK_EMAIL_DOMAIN: &str = "validcompany.com";

/// Source of globally unique signup emails
pub trait EmailFactory: Send {
    fn next_email(&mut self) -> String;
}

/// Random identities for one-shot runs
#[derive(Debug, Clone, Default)]
pub struct UuidEmailFactory;

impl UuidEmailFactory {
    pub fn new() -> Self {
        Self
    }
}

impl EmailFactory for UuidEmailFactory {
    fn next_email(&mut self) -> String {
        let tag = Uuid::new_v4().simple().to_string();
        format!("test-{}@{}", &tag[..12], WORK_EMAIL_DOMAIN)
    }
}

/// Deterministic identities for replay and debugging. The same run id
/// yields the same address sequence, so a failed run can be re-examined
/// against the accounts it actually created.
#[derive(Debug, Clone)]
pub struct SequenceEmailFactory {
    run_id: String,
    next: u32,
}

impl SequenceEmailFactory {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            next: 0,
        }
    }
}

impl EmailFactory for SequenceEmailFactory {
    fn next_email(&mut self) -> String {
        let n = self.next;
        self.next += 1;
        format!("test-{}-{:03}@{}", self.run_id, n, WORK_EMAIL_DOMAIN)
    }
}

/// Day, month and year as the three DOB inputs expect them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateOfBirth {
    day: u8,
    month: u8,
    year: u16,
}

impl DateOfBirth {
    pub fn new(day: u8, month: u8, year: u16) -> SuiteResult<Self> {
        let plausible_year = (1900..=2100).contains(&year);
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !plausible_year {
            return Err(SuiteError::InvalidDateOfBirth { day, month, year });
        }
        Ok(Self { day, month, year })
    }

    pub fn day_field(&self) -> String {
        format!("{:02}", self.day)
    }

    pub fn month_field(&self) -> String {
        format!("{:02}", self.month)
    }

    pub fn year_field(&self) -> String {
        self.year.to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub date_of_birth: DateOfBirth,
}

impl PersonalDetails {
    /// Known-good details the personal-info form accepts
    pub fn sample() -> Self {
        Self {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            mobile_number: "0460 934 566".to_string(),
            date_of_birth: DateOfBirth {
                day: 14,
                month: 5,
                year: 1992,
            },
        }
    }
}

/// Everything one scenario signs up with
#[derive(Debug, Clone, Serialize)]
pub struct SignupSession {
    pub email: String,
    pub password: String,
    pub personal: PersonalDetails,
}

impl SignupSession {
    /// New session with a factory-issued email and known-good fields
    pub fn issue(factory: &mut dyn EmailFactory) -> Self {
        Self {
            email: factory.next_email(),
            password: rules::VALID_PASSWORD.to_string(),
            personal: PersonalDetails::sample(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_factory_issues_unique_work_addresses() {
        let mut factory = UuidEmailFactory::new();
        let first = factory.next_email();
        let second = factory.next_email();
        assert_ne!(first, second);
        assert!(first.ends_with("@validcompany.com"), "unexpected domain: {}", first);
        assert!(first.starts_with("test-"));
    }

    #[test]
    fn sequence_factory_replays_identically() {
        let mut first = SequenceEmailFactory::new("run7");
        let mut second = SequenceEmailFactory::new("run7");
        let a: Vec<String> = (0..3).map(|_| first.next_email()).collect();
        let b: Vec<String> = (0..3).map(|_| second.next_email()).collect();
        assert_eq!(a, b);
        assert_eq!(a[0], "test-run7-000@validcompany.com");
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn date_of_birth_rejects_impossible_dates() {
        assert!(DateOfBirth::new(14, 5, 1992).is_ok());
        assert!(DateOfBirth::new(0, 5, 1992).is_err());
        assert!(DateOfBirth::new(32, 5, 1992).is_err());
        assert!(DateOfBirth::new(14, 13, 1992).is_err());
        assert!(DateOfBirth::new(14, 5, 1850).is_err());
    }

    #[test]
    fn dob_fields_are_zero_padded() {
        let dob = DateOfBirth::new(4, 5, 1992).unwrap();
        assert_eq!(dob.day_field(), "04");
        assert_eq!(dob.month_field(), "05");
        assert_eq!(dob.year_field(), "1992");
    }

    #[test]
    fn issued_sessions_use_fresh_emails_and_a_strong_password() {
        let mut factory = SequenceEmailFactory::new("s");
        let one = SignupSession::issue(&mut factory);
        let two = SignupSession::issue(&mut factory);
        assert_ne!(one.email, two.email);
        assert_eq!(crate::rules::indicator_counts(&one.password).satisfied, 4);
    }
}
