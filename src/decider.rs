//! Decide whether the DNS record needs updating.

use crate::state::PersistedState;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Current Unix time in fractional seconds.
pub fn unix_now() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Reasons to push an update, in order. Empty means nothing to do.
pub fn should_update(
    state: &PersistedState,
    current_ip: &str,
    staleness_days: u32,
    force: bool,
) -> Vec<String> {
    should_update_at(state, current_ip, staleness_days, force, unix_now())
}

/// Same as [`should_update`] with an explicit clock reading.
pub fn should_update_at(
    state: &PersistedState,
    current_ip: &str,
    staleness_days: u32,
    force: bool,
    now: f64,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if state.ip.as_deref() != Some(current_ip) {
        reasons.push(format!(
            "IP changed from {} to {}",
            state.ip.as_deref().unwrap_or("None"),
            current_ip
        ));
    }

    // Absent and zero both mean never updated.
    let old_time = state.update_time.unwrap_or(0.0);
    if old_time != 0.0 {
        let elapsed = now - old_time;
        if elapsed >= f64::from(staleness_days) * SECONDS_PER_DAY {
            reasons.push(format!(
                "Last update happened {:.1} days ago",
                elapsed / SECONDS_PER_DAY
            ));
        }
    }

    if force {
        reasons.push("Update forced".to_string());
    }

    reasons
}
