//! Static bridge configuration.

use std::time::Duration;

/// Default timeout for operations without a dedicated bound.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default number of retries after a failed attempt.
pub const DEFAULT_RETRIES: u32 = 1;

/// Per-operation time bounds.
///
/// Agent turns get a much larger bound than everything else because the
/// agent may run tools before replying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTimeouts {
    /// `agent --message ...`
    pub agent_turn: Duration,
    /// `gateway health`
    pub health: Duration,
    /// `status`, `plugins list`, `nodes status`
    pub status: Duration,
    /// `voicecall status|end`
    pub call: Duration,
    /// `approvals ...`
    pub approvals: Duration,
}

impl Default for OperationTimeouts {
    fn default() -> Self {
        Self {
            agent_turn: Duration::from_mins(2),
            health: Duration::from_secs(15),
            status: Duration::from_secs(40),
            call: Duration::from_secs(30),
            approvals: Duration::from_secs(30),
        }
    }
}

impl OperationTimeouts {
    /// Use the same bound for every operation.
    #[must_use]
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            agent_turn: timeout,
            health: timeout,
            status: timeout,
            call: timeout,
            approvals: timeout,
        }
    }
}

/// Configuration for [`OpenClawBridge`](crate::OpenClawBridge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Path or name of the gateway CLI binary.
    pub binary: String,
    /// Gateway URL, injected into every subprocess environment.
    pub gateway_url: String,
    /// Optional gateway token, injected when present.
    pub gateway_token: Option<String>,
    /// Bound for [`execute`](crate::OpenClawBridge::execute) calls made
    /// with `None`. Named operations use [`timeouts`](Self::timeouts).
    pub default_timeout: Duration,
    /// Retries after the first failed attempt.
    pub retries: u32,
    /// Per-operation bounds.
    pub timeouts: OperationTimeouts,
}

impl BridgeConfig {
    /// Create a config with default timeouts and retries.
    #[must_use]
    pub fn new(binary: impl Into<String>, gateway_url: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            gateway_url: gateway_url.into(),
            gateway_token: None,
            default_timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            timeouts: OperationTimeouts::default(),
        }
    }

    /// Set the gateway token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.gateway_token = Some(token.into());
        self
    }

    /// Set the retry count.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the per-operation timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, timeouts: OperationTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the default timeout.
    #[must_use]
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}
