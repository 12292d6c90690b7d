//! Session configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::ice::{Role, DEFAULT_POLL_INTERVAL};

/// Upper bound on how long to wait for gathering to settle.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

/// How long to wait for the peer's descriptor to appear.
pub const DEFAULT_RENDEZVOUS_TIMEOUT: Duration = Duration::from_secs(300);

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything one side of the session needs to run.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub role: Role,
    /// Directory shared with the peer for descriptor exchange
    pub rendezvous_dir: PathBuf,
    pub stun_urls: Vec<String>,
    pub settle: Duration,
    pub poll_interval: Duration,
    pub rendezvous_timeout: Duration,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl SessionConfig {
    /// Defaults for `role`, exchanging through the current directory.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            rendezvous_dir: PathBuf::from("."),
            stun_urls: Vec::new(),
            settle: DEFAULT_SETTLE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            rendezvous_timeout: DEFAULT_RENDEZVOUS_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}
