//! Plan-level checks for the signup scenarios
//!
//! These run without a browser: they build the suite and inspect the
//! compiled step plans.

use std::collections::HashSet;

use moccona_driver::Step;
use moccona_e2e::scenario::{self, Scenario};
use moccona_e2e::session::SequenceEmailFactory;

fn suite(run_id: &str) -> Vec<Scenario> {
    let mut factory = SequenceEmailFactory::new(run_id);
    scenario::standard_suite(&mut factory).expect("suite builds")
}

fn find<'a>(scenarios: &'a [Scenario], name: &str) -> &'a Scenario {
    scenarios
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("missing scenario {}", name))
}

/// Values filled into the email input, in plan order
fn filled_emails(steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Fill { locator, value, .. }
                if locator.to_string() == r#"input[name="email"]"# =>
            {
                Some(value.clone())
            }
            _ => None,
        })
        .collect()
}

fn waits_matching(steps: &[Step], url: &str) -> usize {
    steps
        .iter()
        .filter(|step| matches!(step, Step::WaitForUrl { pattern, .. } if pattern.matches(url)))
        .count()
}

#[test]
fn the_suite_covers_the_five_flows() {
    let scenarios = suite("cover");
    let names: HashSet<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
    let expected: HashSet<&str> = [
        "account_creation",
        "password_criteria_ladder",
        "work_email_rejected",
        "duplicate_account",
        "personal_info_required_fields",
    ]
    .into_iter()
    .collect();
    assert_eq!(names, expected);
}

#[test]
fn every_plan_opens_at_the_entry_route() {
    for scenario in suite("entry") {
        let mut plans = vec![&scenario.steps];
        if let Some(setup) = &scenario.setup {
            plans.push(setup);
        }
        for steps in plans {
            assert!(
                matches!(&steps[0], Step::Navigate { path } if path == "/app/business-signup"),
                "{} does not start at the signup route",
                scenario.name
            );
            assert!(
                matches!(&steps[1], Step::WaitForUrl { .. }),
                "{} does not wait for the entry page after navigating",
                scenario.name
            );
        }
    }
}

#[test]
fn account_creation_waits_on_every_transition() {
    let scenarios = suite("waits");
    let steps = &find(&scenarios, "account_creation").steps;

    // one wait per page the flow passes through, in order
    assert_eq!(waits_matching(steps, "https://x/app/personal-info"), 1);
    assert_eq!(waits_matching(steps, "https://x/app/business-info"), 1);
    assert_eq!(waits_matching(steps, "https://x/login"), 1);

    let submit = steps
        .iter()
        .position(|s| s.label() == "click:testid=email-sign-up")
        .expect("account submission step");
    assert!(
        matches!(&steps[submit + 1], Step::WaitForUrl { pattern, .. }
            if pattern.matches("https://x/app/personal-info")),
        "account submission must suspend on the personal-info URL"
    );
}

#[test]
fn ladder_counts_descend_as_criteria_are_met() {
    let scenarios = suite("ladder");
    let steps = &find(&scenarios, "password_criteria_ladder").steps;

    let mut errors = Vec::new();
    let mut satisfied = Vec::new();
    for step in steps {
        if let Step::ExpectCount { locator, count, .. } = step {
            let label = locator.to_string();
            if label.contains("ds-alert-error-icon") {
                errors.push(*count);
            } else if label.contains("ds-alert-brand-check-icon") {
                satisfied.push(*count);
            }
        }
    }

    assert_eq!(errors, vec![4, 3, 2, 1, 0]);
    assert_eq!(satisfied, vec![0, 1, 2, 3, 4]);
}

#[test]
fn duplicate_account_registers_its_own_seed() {
    let scenarios = suite("dup");
    let scenario = find(&scenarios, "duplicate_account");
    let setup = scenario.setup.as_ref().expect("setup plan");

    let setup_emails = filled_emails(setup);
    let main_emails = filled_emails(&scenario.steps);
    assert_eq!(setup_emails.len(), 1);
    assert_eq!(setup_emails, main_emails, "setup must register the colliding address");

    // setup finishes account creation; the main plan never leaves signup
    assert_eq!(waits_matching(setup, "https://x/app/personal-info"), 1);
    assert_eq!(waits_matching(&scenario.steps, "https://x/app/personal-info"), 0);

    let conflict = scenario
        .steps
        .iter()
        .any(|s| s.label() == "expect_visible:text=This account already exists");
    assert!(conflict, "main plan must assert the conflict message");
}

#[test]
fn scenario_identities_never_collide() {
    let scenarios = suite("iso");
    let mut per_scenario: Vec<HashSet<String>> = Vec::new();

    for scenario in &scenarios {
        let mut emails: HashSet<String> = filled_emails(&scenario.steps).into_iter().collect();
        if let Some(setup) = &scenario.setup {
            emails.extend(filled_emails(setup));
        }
        per_scenario.push(emails);
    }

    for (i, a) in per_scenario.iter().enumerate() {
        for (j, b) in per_scenario.iter().enumerate() {
            if i < j {
                assert!(
                    a.is_disjoint(b),
                    "{} and {} share a signup email",
                    scenarios[i].name,
                    scenarios[j].name
                );
            }
        }
    }
}

#[test]
fn seeded_suites_replay_identically() {
    let first = serde_json::to_string(&suite("replay")).expect("serializes");
    let second = serde_json::to_string(&suite("replay")).expect("serializes");
    assert_eq!(first, second);

    let other = serde_json::to_string(&suite("different")).expect("serializes");
    assert_ne!(first, other);
}

#[test]
fn personal_info_errors_follow_an_explicit_submit() {
    let scenarios = suite("empty");
    let steps = &find(&scenarios, "personal_info_required_fields").steps;

    let submit = steps
        .iter()
        .position(|s| s.label() == "click:testid=next-button")
        .expect("personal-info submit step");
    let first_error = steps
        .iter()
        .position(|s| s.label().starts_with("expect_visible:text=Please enter your first name"))
        .expect("first-name error expectation");
    assert!(
        submit < first_error,
        "field errors must be asserted after the form is submitted"
    );

    // all four messages, asserted in the same session
    let error_count = steps
        .iter()
        .filter(|s| {
            let label = s.label();
            label.starts_with("expect_visible:text=Please enter")
        })
        .count();
    assert_eq!(error_count, 4);
}
