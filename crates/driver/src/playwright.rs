//! Executes generated scripts through node and interprets their reports

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::{debug, warn};

use crate::config::DriverConfig;
use crate::error::{DriverError, DriverResult};
use crate::script::ScriptBuilder;
use crate::step::Step;

/// Why a step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A bounded wait elapsed before the page reached the awaited state
    Timeout,
    /// The page answered but the expectation did not hold
    Assertion,
}

/// The step a session stopped on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: usize,
    pub label: String,
    pub kind: FailureKind,
    pub message: String,
    pub url: Option<String>,
    pub screenshot: Option<PathBuf>,
}

/// Outcome of one browser session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub steps_total: usize,
    pub steps_completed: usize,
    pub failure: Option<StepFailure>,
    pub final_url: Option<String>,
    pub duration_ms: u64,
}

impl SessionReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Runs step plans through Playwright, one node process per session
pub struct PlaywrightRunner {
    config: DriverConfig,
}

impl PlaywrightRunner {
    pub fn new(config: DriverConfig) -> DriverResult<Self> {
        Self::check_engine_installed()?;
        std::fs::create_dir_all(config.screenshot_dir())?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn check_engine_installed() -> DriverResult<()> {
        let status = std::process::Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(s) if s.success() => Ok(()),
            _ => Err(DriverError::EngineNotFound),
        }
    }

    /// Run `steps` in one isolated browser session. `label` names the
    /// session in logs and artifact files.
    pub async fn run_steps(&self, label: &str, steps: &[Step]) -> DriverResult<SessionReport> {
        let screenshot = self.config.screenshot_dir().join(format!("{}.png", label));
        let script = ScriptBuilder::new(&self.config).build(steps, &screenshot);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("session.js");
        std::fs::write(&script_path, &script)?;

        debug!("running session '{}' ({} steps)", label, steps.len());

        let start = Instant::now();
        let deadline = Duration::from_secs(self.config.session_deadline_secs);
        let child = TokioCommand::new("node")
            .arg(&script_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(deadline, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                return Err(DriverError::SessionDeadline {
                    label: label.to_string(),
                    seconds: self.config.session_deadline_secs,
                });
            }
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() && !stdout.contains("\"ok\":false") {
            // node died before the script could report
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DriverError::MalformedReport {
                label: label.to_string(),
                detail: first_lines(&stderr, 5),
            });
        }

        parse_report(label, steps, &stdout, &screenshot, duration_ms)
    }
}

#[derive(Debug, Deserialize)]
struct ReportLine {
    #[serde(default)]
    step: Option<usize>,
    #[serde(default)]
    done: bool,
    ok: bool,
    #[serde(default)]
    timeout: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

fn parse_report(
    label: &str,
    steps: &[Step],
    stdout: &str,
    screenshot: &Path,
    duration_ms: u64,
) -> DriverResult<SessionReport> {
    let mut completed = 0usize;
    let mut failure = None;
    let mut final_url = None;
    let mut saw_verdict = false;

    for line in stdout.lines() {
        let line = line.trim();
        if !line.starts_with('{') {
            // engine noise
            continue;
        }
        let parsed: ReportLine = match serde_json::from_str(line) {
            Ok(parsed) => parsed,
            Err(_) => continue,
        };

        if parsed.done {
            final_url = parsed.url;
            saw_verdict = true;
        } else if parsed.ok {
            completed += 1;
        } else {
            let step = parsed.step.unwrap_or(completed);
            let kind = if parsed.timeout {
                FailureKind::Timeout
            } else {
                FailureKind::Assertion
            };
            failure = Some(StepFailure {
                step,
                label: steps.get(step).map(Step::label).unwrap_or_default(),
                kind,
                message: parsed
                    .error
                    .unwrap_or_else(|| "unreported failure".to_string()),
                url: parsed.url.clone(),
                screenshot: screenshot.exists().then(|| screenshot.to_path_buf()),
            });
            final_url = parsed.url;
            saw_verdict = true;
        }
    }

    if !saw_verdict {
        return Err(DriverError::MalformedReport {
            label: label.to_string(),
            detail: format!("no verdict line in {} bytes of output", stdout.len()),
        });
    }

    if let Some(f) = &failure {
        warn!(
            "session '{}' failed at step {} ({}): {}",
            label, f.step, f.label, f.message
        );
    }

    Ok(SessionReport {
        steps_total: steps.len(),
        steps_completed: completed,
        failure,
        final_url,
        duration_ms,
    })
}

fn first_lines(text: &str, n: usize) -> String {
    text.lines().take(n).collect::<Vec<_>>().join("\n")
}
