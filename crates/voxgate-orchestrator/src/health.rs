//! Periodic gateway health polling.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};
use voxgate_bridge::GatewayBridge;
use voxgate_core::GatewayHealth;

/// Default polling interval.
pub const DEFAULT_HEALTH_INTERVAL: Duration = Duration::from_secs(15);

const HEALTH_CHANNEL_CAPACITY: usize = 16;

/// Polls [`GatewayBridge::health`] on a fixed schedule.
///
/// Every tick runs as its own task, so a slow probe never delays the
/// schedule and ticks may overlap. Results are broadcast to subscribers in
/// completion order.
pub struct HealthMonitor<B> {
    bridge: Arc<B>,
    sender: broadcast::Sender<GatewayHealth>,
    schedule: Mutex<Option<JoinHandle<()>>>,
}

impl<B> HealthMonitor<B>
where
    B: GatewayBridge + 'static,
{
    /// Create a stopped monitor.
    #[must_use]
    pub fn new(bridge: Arc<B>) -> Self {
        let (sender, _) = broadcast::channel(HEALTH_CHANNEL_CAPACITY);
        Self {
            bridge,
            sender,
            schedule: Mutex::new(None),
        }
    }

    /// Receive health results.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GatewayHealth> {
        self.sender.subscribe()
    }

    /// Start polling: one probe now, then one per `interval`.
    ///
    /// No-op while already running. Must be called inside a tokio runtime.
    pub fn start(&self, interval: Duration) {
        let mut schedule = self.schedule.lock().unwrap_or_else(PoisonError::into_inner);
        if schedule.is_some() {
            return;
        }

        let interval = if interval.is_zero() {
            DEFAULT_HEALTH_INTERVAL
        } else {
            interval
        };
        let bridge = Arc::clone(&self.bridge);
        let sender = self.sender.clone();

        debug!(interval = ?interval, "Health monitor started");
        *schedule = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let bridge = Arc::clone(&bridge);
                let sender = sender.clone();
                tokio::spawn(async move {
                    let health = bridge.health().await;
                    trace!(reachable = health.reachable, "Health tick");
                    let _ = sender.send(health);
                });
            }
        }));
    }

    /// Stop the schedule.
    ///
    /// Probes already in flight still complete and publish.
    pub fn stop(&self) {
        let handle = self
            .schedule
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("Health monitor stopped");
        }
    }

    /// Whether the schedule is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.schedule
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<B> Drop for HealthMonitor<B> {
    fn drop(&mut self) {
        let handle = self
            .schedule
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}
