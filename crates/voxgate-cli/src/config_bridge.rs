//! Bridge from `voxgate_config::AppConfig` to runtime types.

use std::time::Duration;

use voxgate_bridge::{BridgeConfig, OperationTimeouts};
use voxgate_config::{AppConfig, TimeoutsSection};
use voxgate_telemetry::{LogConfig, LogFormat};

/// Gateway CLI settings for [`voxgate_bridge::OpenClawBridge`].
#[must_use]
pub(crate) fn to_bridge_config(config: &AppConfig) -> BridgeConfig {
    let gateway = &config.gateway;
    let mut bridge = BridgeConfig::new(&gateway.binary, &gateway.gateway_url)
        .with_retries(gateway.retries)
        .with_default_timeout(Duration::from_millis(gateway.default_timeout_ms))
        .with_timeouts(to_operation_timeouts(&gateway.timeouts));
    if let Some(token) = gateway.gateway_token.as_deref().filter(|t| !t.is_empty()) {
        bridge = bridge.with_token(token);
    }
    bridge
}

fn to_operation_timeouts(section: &TimeoutsSection) -> OperationTimeouts {
    OperationTimeouts {
        agent_turn: Duration::from_millis(section.agent_turn_ms),
        health: Duration::from_millis(section.health_ms),
        status: Duration::from_millis(section.status_ms),
        call: Duration::from_millis(section.call_ms),
        approvals: Duration::from_millis(section.approvals_ms),
    }
}

/// Logging setup for `voxgate_telemetry::setup_logging`.
///
/// An unrecognised format falls back to compact output.
#[must_use]
pub(crate) fn to_log_config(config: &AppConfig) -> LogConfig {
    let logging = &config.logging;
    let format = logging.format.parse().unwrap_or(LogFormat::Compact);

    let mut log = LogConfig::new(&logging.level).with_format(format);
    for directive in &logging.directives {
        log = log.with_directive(directive);
    }
    if let Some(dir) = &logging.directory {
        log = log.with_file_logging(dir);
    }
    log
}

/// Interval between background health probes.
#[must_use]
pub(crate) fn health_interval(config: &AppConfig) -> Duration {
    Duration::from_secs(config.health.interval_secs)
}
