//! # dynip
//!
//! A tiny dynamic DNS updater.
//!
//! Each run discovers the public IPv4 address through a shuffled list of
//! checkip endpoints, decides whether the DNS record needs refreshing (IP
//! changed, last update too old, or forced), pings a dyndns-style update URL
//! when it does, and records what happened in a JSON state file.
//!
//! ## Usage
//!
//! ```bash
//! dynip -a user:pass -u https://dyn.example.net/nic/update -h home.example.com
//!
//! # Refresh even if nothing changed, with verbose logs
//! DYNIP_AUTH=token dynip -u https://dyn.example.net/update -h a.example.com -h b.example.com -f -D
//! ```

pub mod config;
pub mod decider;
pub mod error;
pub mod resolver;
pub mod runner;
pub mod state;
pub mod updater;

pub use config::{Config, Credentials};
pub use decider::should_update;
pub use error::{DynipError, Result};
pub use resolver::IpResolver;
pub use runner::{run, RunOptions, RunOutcome};
pub use state::PersistedState;
pub use updater::{DnsUpdater, DynDnsUpdater};
