//! Step vocabulary executed by a browser session
//!
//! Each step is either a user action or a suspension point: an explicit,
//! bounded wait on an observable end state (URL, visibility, enablement,
//! indicator count). There is deliberately no fixed-delay step.

use serde::{Deserialize, Serialize};

use crate::locator::Locator;

/// Regex matched against the page URL on both sides of the session
/// boundary: compiled into `page.waitForURL` in the generated script and
/// checked with the `regex` crate when plans are inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPattern(String);

impl UrlPattern {
    /// Pattern matching any URL ending in `path`
    pub fn path_suffix(path: &str) -> Self {
        Self(format!(".*{}", regex::escape(path)))
    }

    pub fn source(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, url: &str) -> bool {
        regex::Regex::new(&self.0)
            .map(|re| re.is_match(url))
            .unwrap_or(false)
    }
}

/// One instruction for the automation engine.
///
/// `timeout_ms` overrides the configured default bound for that step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Open a path relative to the base URL
    Navigate { path: String },

    /// Fill an input with a value, replacing existing content
    Fill {
        locator: Locator,
        value: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    Click {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Suspend until the page URL matches the pattern
    WaitForUrl {
        pattern: UrlPattern,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    ExpectVisible {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    ExpectHidden {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    ExpectEnabled {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    ExpectDisabled {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Suspend until the locator resolves to exactly `count` elements
    ExpectCount {
        locator: Locator,
        count: usize,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
}

impl Step {
    /// Short label for logs and failure reports
    pub fn label(&self) -> String {
        match self {
            Step::Navigate { path } => format!("navigate:{}", path),
            Step::Fill { locator, .. } => format!("fill:{}", locator),
            Step::Click { locator, .. } => format!("click:{}", locator),
            Step::WaitForUrl { pattern, .. } => format!("wait_for_url:{}", pattern.source()),
            Step::ExpectVisible { locator, .. } => format!("expect_visible:{}", locator),
            Step::ExpectHidden { locator, .. } => format!("expect_hidden:{}", locator),
            Step::ExpectEnabled { locator, .. } => format!("expect_enabled:{}", locator),
            Step::ExpectDisabled { locator, .. } => format!("expect_disabled:{}", locator),
            Step::ExpectCount { locator, count, .. } => {
                format!("expect_count[{}]:{}", count, locator)
            }
        }
    }

    /// True for steps that wait on an observable end state rather than
    /// performing an action
    pub fn is_suspension_point(&self) -> bool {
        !matches!(
            self,
            Step::Navigate { .. } | Step::Fill { .. } | Step::Click { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_tag_with_snake_case_actions() {
        let step = Step::ExpectCount {
            locator: Locator::test_id("icon"),
            count: 4,
            timeout_ms: None,
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains(r#""action":"expect_count""#), "unexpected json: {}", json);
    }

    #[test]
    fn labels_identify_step_and_target() {
        let click = Step::Click {
            locator: Locator::test_id("email-sign-up"),
            timeout_ms: None,
        };
        assert_eq!(click.label(), "click:testid=email-sign-up");

        let nav = Step::Navigate {
            path: "/app/business-signup".to_string(),
        };
        assert_eq!(nav.label(), "navigate:/app/business-signup");
    }

    #[test]
    fn suffix_patterns_match_real_urls() {
        let pattern = UrlPattern::path_suffix("/personal-info");
        assert!(pattern.matches("https://app-moccona.letsweel.com/app/personal-info"));
        assert!(!pattern.matches("https://app-moccona.letsweel.com/app/business-signup"));
    }

    #[test]
    fn escaped_patterns_only_match_literal_paths() {
        let pattern = UrlPattern::path_suffix("/business-signup");
        assert!(pattern.matches("http://x/app/business-signup"));
        assert!(!pattern.matches("http://x/app/business_signup"));
    }

    #[test]
    fn waits_and_expectations_are_suspension_points() {
        let wait = Step::WaitForUrl {
            pattern: UrlPattern::path_suffix("/login"),
            timeout_ms: None,
        };
        assert!(wait.is_suspension_point());

        let click = Step::Click {
            locator: Locator::css("a"),
            timeout_ms: None,
        };
        assert!(!click.is_suspension_point());
    }
}
