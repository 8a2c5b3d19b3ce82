//! The validation contract asserted against the application
//!
//! The signup form owns these rules; the suite re-evaluates them locally
//! to know what the UI must show for any given input, then asserts
//! exactly that. Messages are the literal strings the form renders.

use serde::{Deserialize, Serialize};

/// Literal error messages rendered by the signup flow
pub mod messages {
    pub const EMAIL_REQUIRED: &str = "Please enter an email address.";
    pub const WORK_EMAIL_REQUIRED: &str = "Please try again with your work email address";
    pub const ACCOUNT_EXISTS: &str = "This account already exists";
    pub const FIRST_NAME_REQUIRED: &str = "Please enter your first name";
    pub const LAST_NAME_REQUIRED: &str = "Please enter your last name";
    pub const MOBILE_REQUIRED: &str = "Please enter your mobile number";
    pub const DOB_INVALID: &str = "Please enter a valid date of birth";
}

/// One independently evaluated password-strength rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordCriterion {
    MinLength,
    MixedCase,
    SpecialChar,
    Digit,
}

impl PasswordCriterion {
    pub const ALL: [PasswordCriterion; 4] = [
        PasswordCriterion::MinLength,
        PasswordCriterion::MixedCase,
        PasswordCriterion::SpecialChar,
        PasswordCriterion::Digit,
    ];

    pub fn is_met(&self, password: &str) -> bool {
        match self {
            PasswordCriterion::MinLength => password.chars().count() >= 8,
            PasswordCriterion::MixedCase => {
                password.chars().any(|c| c.is_uppercase())
                    && password.chars().any(|c| c.is_lowercase())
            }
            PasswordCriterion::SpecialChar => password.chars().any(|c| !c.is_alphanumeric()),
            PasswordCriterion::Digit => password.chars().any(|c| c.is_ascii_digit()),
        }
    }
}

/// How the strength indicators must partition for a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorCounts {
    pub satisfied: usize,
    pub errors: usize,
}

/// Expected indicator partition for `password`. `satisfied + errors`
/// always equals the criterion count.
pub fn indicator_counts(password: &str) -> IndicatorCounts {
    let satisfied = PasswordCriterion::ALL
        .iter()
        .filter(|criterion| criterion.is_met(password))
        .count();
    IndicatorCounts {
        satisfied,
        errors: PasswordCriterion::ALL.len() - satisfied,
    }
}

/// Boundary passwords, weakest first; each entry satisfies exactly one
/// more criterion than the one before it.
pub const PASSWORD_LADDER: [&str; 5] = [
    "",
    "passwordchar",
    "Passwordchar",
    "Passwordchar@",
    "ValidPassword123!",
];

/// A password satisfying all four criteria
pub const VALID_PASSWORD: &str = "ValidPassword123!";

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", 0 ; "empty")]
    #[test_case("passwordchar", 1 ; "length only")]
    #[test_case("Passwordchar", 2 ; "length and case")]
    #[test_case("Passwordchar@", 3 ; "missing digit")]
    #[test_case("ValidPassword123!", 4 ; "all criteria")]
    fn ladder_counts(password: &str, satisfied: usize) {
        let counts = indicator_counts(password);
        assert_eq!(counts.satisfied, satisfied);
        assert_eq!(counts.errors, 4 - satisfied);
    }

    #[test]
    fn counts_always_partition() {
        let inputs = [
            "",
            "a",
            "A1!",
            "abcdefgh",
            "ABCDEFGH1!",
            "p\u{e4}ssw\u{f6}rd\u{a7}",
            "12345678",
            VALID_PASSWORD,
        ];
        for password in inputs {
            let counts = indicator_counts(password);
            assert_eq!(
                counts.satisfied + counts.errors,
                PasswordCriterion::ALL.len(),
                "partition broken for {:?}",
                password
            );
        }
    }

    #[test]
    fn mixed_case_needs_both() {
        assert!(!PasswordCriterion::MixedCase.is_met("lowercase"));
        assert!(!PasswordCriterion::MixedCase.is_met("UPPERCASE"));
        assert!(PasswordCriterion::MixedCase.is_met("Mixed"));
    }

    #[test]
    fn special_char_excludes_alphanumerics() {
        assert!(!PasswordCriterion::SpecialChar.is_met("abc123XYZ"));
        // whitespace is non-alphanumeric
        assert!(PasswordCriterion::SpecialChar.is_met("abc 123"));
    }

    #[test]
    fn min_length_counts_characters_not_bytes() {
        assert!(PasswordCriterion::MinLength.is_met("p\u{e4}ssw\u{f6}rd"));
        assert!(!PasswordCriterion::MinLength.is_met("1234567"));
    }

    #[test]
    fn ladder_is_strictly_increasing() {
        let satisfied: Vec<usize> = PASSWORD_LADDER
            .iter()
            .map(|password| indicator_counts(password).satisfied)
            .collect();
        assert_eq!(satisfied, vec![0, 1, 2, 3, 4]);
    }
}
