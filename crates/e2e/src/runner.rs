//! Suite orchestration: sessions, accounting and the results artifact

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use moccona_driver::{
    DriverConfig, FailureKind, PlaywrightRunner, SessionReport, Step, StepFailure,
};

use crate::error::SuiteResult;
use crate::scenario::Scenario;
use crate::target;

/// Which plan of a scenario a report refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Main,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Main => "main",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub steps_total: usize,
    pub steps_completed: usize,
    pub final_url: Option<String>,
    pub duration_ms: u64,
}

/// The step a scenario died on, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFailure {
    pub phase: Phase,
    pub step: usize,
    pub label: String,
    pub kind: FailureKind,
    pub message: String,
    pub url: Option<String>,
    pub screenshot: Option<PathBuf>,
}

impl ScenarioFailure {
    fn new(phase: Phase, failure: StepFailure) -> Self {
        Self {
            phase,
            step: failure.step,
            label: failure.label,
            kind: failure.kind,
            message: failure.message,
            url: failure.url,
            screenshot: failure.screenshot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    pub phases: Vec<PhaseReport>,
    pub failure: Option<ScenarioFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub scenarios: Vec<ScenarioReport>,
}

/// Drives scenarios through isolated browser sessions
pub struct SuiteRunner {
    driver: PlaywrightRunner,
}

impl SuiteRunner {
    pub fn new(config: DriverConfig) -> SuiteResult<Self> {
        Ok(Self {
            driver: PlaywrightRunner::new(config)?,
        })
    }

    pub fn config(&self) -> &DriverConfig {
        self.driver.config()
    }

    /// Run every scenario, preflighting the target first
    pub async fn run(&self, scenarios: &[Scenario]) -> SuiteResult<RunReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        target::wait_until_reachable(&self.config().base_url, crate::flow::ENTRY_PATH).await?;

        info!(
            "Running {} scenario(s) against {}",
            scenarios.len(),
            self.config().base_url
        );

        let mut reports = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        for scenario in scenarios {
            let report = self.run_scenario(scenario).await?;
            if report.passed {
                passed += 1;
                info!("✓ {} ({} ms)", report.name, report.duration_ms);
            } else {
                failed += 1;
                let summary = report
                    .failure
                    .as_ref()
                    .map(|f| {
                        format!(
                            "{} phase, step {} ({}): {}",
                            f.phase.as_str(),
                            f.step,
                            f.label,
                            f.message
                        )
                    })
                    .unwrap_or_else(|| "unknown failure".to_string());
                error!("✗ {} - {}", report.name, summary);
            }
            reports.push(report);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Scenario results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(RunReport {
            started_at,
            base_url: self.config().base_url.clone(),
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            scenarios: reports,
        })
    }

    /// Run one scenario: its setup plan first in its own session, then the
    /// main plan. A setup failure fails the scenario without running the
    /// main plan.
    pub async fn run_scenario(&self, scenario: &Scenario) -> SuiteResult<ScenarioReport> {
        let start = Instant::now();
        debug!("running scenario: {}", scenario.name);

        let mut phases = Vec::new();
        let mut failure = None;

        if let Some(setup_steps) = &scenario.setup {
            let (report, fail) = self
                .run_phase(&scenario.name, Phase::Setup, setup_steps)
                .await?;
            phases.push(report);
            failure = fail;
        }

        if failure.is_none() {
            let (report, fail) = self
                .run_phase(&scenario.name, Phase::Main, &scenario.steps)
                .await?;
            phases.push(report);
            failure = fail;
        }

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            passed: failure.is_none(),
            duration_ms: start.elapsed().as_millis() as u64,
            phases,
            failure,
        })
    }

    async fn run_phase(
        &self,
        scenario: &str,
        phase: Phase,
        steps: &[Step],
    ) -> SuiteResult<(PhaseReport, Option<ScenarioFailure>)> {
        let label = format!("{}-{}", scenario, phase.as_str());
        let SessionReport {
            steps_total,
            steps_completed,
            failure,
            final_url,
            duration_ms,
        } = self.driver.run_steps(&label, steps).await?;

        let failure = failure.map(|f| ScenarioFailure::new(phase, f));
        let report = PhaseReport {
            phase,
            steps_total,
            steps_completed,
            final_url,
            duration_ms,
        };
        Ok((report, failure))
    }

    /// Write the results artifact and return its path
    pub fn write_report(&self, report: &RunReport) -> SuiteResult<PathBuf> {
        std::fs::create_dir_all(&self.config().artifact_dir)?;

        let path = self.config().artifact_dir.join("suite-results.json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}
