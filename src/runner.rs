//! One dynip run: load state, resolve, decide, update, persist.

use crate::decider::{should_update, unix_now};
use crate::error::Result;
use crate::resolver::IpResolver;
use crate::state::PersistedState;
use crate::updater::DnsUpdater;
use std::path::PathBuf;

/// Per-run inputs taken from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub state_file: PathBuf,
    pub hosts: Vec<String>,
    pub staleness_days: u32,
    pub force: bool,
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub current_ip: String,
    pub reasons: Vec<String>,
    pub success: bool,
}

impl RunOutcome {
    /// Whether an update was attempted at all.
    pub fn updated(&self) -> bool {
        !self.reasons.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.success {
            0
        } else {
            1
        }
    }
}

/// Execute a single run.
///
/// Resolution and state-load failures are returned as errors and leave the
/// state file untouched. An update failure is logged and reported through
/// [`RunOutcome::success`]; the state file is still rewritten in that case.
pub async fn run(
    options: &RunOptions,
    resolver: &IpResolver,
    updater: &dyn DnsUpdater,
) -> Result<RunOutcome> {
    let mut state = PersistedState::load(&options.state_file)?;

    let current_ip = resolver.resolve_current_ip().await?;
    let reasons = should_update(&state, &current_ip, options.staleness_days, options.force);

    let mut success = true;
    if reasons.is_empty() {
        tracing::info!("IP {} unchanged, no update needed", current_ip);
    } else {
        tracing::info!(
            "Updating hosts {}: {:?}",
            options.hosts.join(","),
            reasons
        );

        match updater.update(&options.hosts).await {
            Ok(_) => state.record_success(&current_ip, unix_now()),
            Err(e) => {
                tracing::error!("Update via {} failed: {}", updater.name(), e);
                success = false;
            }
        }
    }

    state.record_run(&reasons, success, unix_now());
    state.save(&options.state_file)?;

    Ok(RunOutcome {
        current_ip,
        reasons,
        success,
    })
}
