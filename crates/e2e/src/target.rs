//! Target environment preflight

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{SuiteError, SuiteResult};

const PROBE_INTERVAL: Duration = Duration::from_millis(500);
const PROBE_DEADLINE: Duration = Duration::from_secs(30);
const PROBE_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll the entry route until it answers, so an unreachable environment
/// fails the run up front instead of one scenario at a time.
pub async fn wait_until_reachable(base_url: &str, entry_path: &str) -> SuiteResult<()> {
    probe(format!("{}{}", base_url, entry_path), PROBE_DEADLINE).await
}

async fn probe(url: String, deadline: Duration) -> SuiteResult<()> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_REQUEST_TIMEOUT)
        .build()?;

    let give_up = Instant::now() + deadline;
    let mut attempts = 0usize;

    loop {
        attempts += 1;
        match client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("target reachable: {} ({} attempt(s))", url, attempts);
                return Ok(());
            }
            Ok(resp) => {
                debug!("target answered {} on attempt {}", resp.status(), attempts);
            }
            Err(e) => {
                debug!("target probe {} failed: {}", attempts, e);
            }
        }

        if Instant::now() >= give_up {
            warn!("giving up on {} after {} attempt(s)", url, attempts);
            return Err(SuiteError::TargetUnreachable { url, attempts });
        }

        tokio::time::sleep(PROBE_INTERVAL).await;
    }
}
