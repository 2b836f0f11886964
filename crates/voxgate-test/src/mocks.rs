//! Mock implementations for testing.

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use voxgate_bridge::{BridgeError, BridgeResult, GatewayBridge};
use voxgate_core::{AgentTurnRequest, AgentTurnResponse, CallStatus, GatewayHealth};

use crate::fixtures::test_agent_reply;

/// Text-returning gateway operations that can be scripted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    /// `status`
    Status,
    /// `plugins list`
    Plugins,
    /// `nodes status`
    Nodes,
    /// `voicecall end`
    EndCall,
    /// `approvals allowlist add`
    AllowlistAdd,
    /// `approvals allowlist remove`
    AllowlistRemove,
    /// `approvals get`
    Approvals,
}

impl MockOp {
    fn default_output(self) -> &'static str {
        match self {
            Self::Status => "gateway running",
            Self::Plugins => "voicecall (enabled)",
            Self::Nodes => "0 nodes paired",
            Self::EndCall => "call ended",
            Self::AllowlistAdd => "allowlist entry added",
            Self::AllowlistRemove => "allowlist entry removed",
            Self::Approvals => "approvals: allowlist",
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted [`GatewayBridge`] for tests.
///
/// Agent turns pop queued replies; with an empty queue they succeed with an
/// echo of the request text. Text operations pop their own queues and fall
/// back to a fixed output. Every call is recorded.
#[derive(Debug, Clone)]
pub struct MockBridge {
    agent_replies: Arc<Mutex<VecDeque<BridgeResult<AgentTurnResponse>>>>,
    agent_requests: Arc<Mutex<Vec<AgentTurnRequest>>>,
    health_delay: Option<Duration>,
    text_replies: Arc<Mutex<HashMap<MockOp, VecDeque<BridgeResult<String>>>>>,
    calls: Arc<Mutex<Vec<String>>>,
    health: Arc<Mutex<GatewayHealth>>,
    health_checks: Arc<Mutex<usize>>,
    call_statuses: Arc<Mutex<VecDeque<BridgeResult<CallStatus>>>>,
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBridge {
    /// Create a mock with a reachable gateway and no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent_replies: Arc::new(Mutex::new(VecDeque::new())),
            agent_requests: Arc::new(Mutex::new(Vec::new())),
            health_delay: None,
            text_replies: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            health: Arc::new(Mutex::new(GatewayHealth {
                reachable: true,
                url: "ws://127.0.0.1:18789".to_string(),
                detail: Some("ok".to_string()),
            })),
            health_checks: Arc::new(Mutex::new(0)),
            call_statuses: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queue a successful agent reply.
    #[must_use]
    pub fn with_agent_reply(self, text: impl Into<String>) -> Self {
        self.queue_agent_result(Ok(test_agent_reply(text)));
        self
    }

    /// Queue a failed agent turn.
    #[must_use]
    pub fn with_agent_error(self, error: BridgeError) -> Self {
        self.queue_agent_result(Err(error));
        self
    }

    /// Make every health probe take `delay` before answering.
    #[must_use]
    pub fn with_health_delay(mut self, delay: Duration) -> Self {
        self.health_delay = Some(delay);
        self
    }

    /// Queue a result for a text operation.
    #[must_use]
    pub fn with_text_result(self, op: MockOp, result: BridgeResult<String>) -> Self {
        lock(&self.text_replies)
            .entry(op)
            .or_default()
            .push_back(result);
        self
    }

    /// Set the health result returned by every probe.
    #[must_use]
    pub fn with_health(self, health: GatewayHealth) -> Self {
        self.set_health(health);
        self
    }

    /// Queue a call status result.
    #[must_use]
    pub fn with_call_status(self, result: BridgeResult<CallStatus>) -> Self {
        lock(&self.call_statuses).push_back(result);
        self
    }

    /// Queue an agent turn result.
    pub fn queue_agent_result(&self, result: BridgeResult<AgentTurnResponse>) {
        lock(&self.agent_replies).push_back(result);
    }

    /// Replace the health result.
    pub fn set_health(&self, health: GatewayHealth) {
        *lock(&self.health) = health;
    }

    /// Every agent turn request received, in order.
    #[must_use]
    pub fn agent_requests(&self) -> Vec<AgentTurnRequest> {
        lock(&self.agent_requests).clone()
    }

    /// Every non-agent call received, as `op args...` strings.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Number of health probes so far.
    #[must_use]
    pub fn health_checks(&self) -> usize {
        *lock(&self.health_checks)
    }

    fn record(&self, call: String) {
        lock(&self.calls).push(call);
    }

    fn text_result(&self, op: MockOp) -> BridgeResult<String> {
        lock(&self.text_replies)
            .get_mut(&op)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(op.default_output().to_string()))
    }
}

#[async_trait]
impl GatewayBridge for MockBridge {
    async fn agent_turn(&self, request: &AgentTurnRequest) -> BridgeResult<AgentTurnResponse> {
        lock(&self.agent_requests).push(request.clone());
        let queued = lock(&self.agent_replies).pop_front();
        queued.unwrap_or_else(|| Ok(test_agent_reply(format!("ok: {}", request.text))))
    }

    async fn health(&self) -> GatewayHealth {
        {
            let mut count = lock(&self.health_checks);
            *count = count.saturating_add(1);
        }
        if let Some(delay) = self.health_delay {
            tokio::time::sleep(delay).await;
        }
        lock(&self.health).clone()
    }

    async fn status(&self) -> BridgeResult<String> {
        self.record("status".to_string());
        self.text_result(MockOp::Status)
    }

    async fn list_plugins(&self) -> BridgeResult<String> {
        self.record("plugins list".to_string());
        self.text_result(MockOp::Plugins)
    }

    async fn list_nodes_status(&self) -> BridgeResult<String> {
        self.record("nodes status".to_string());
        self.text_result(MockOp::Nodes)
    }

    async fn call_status(&self, call_id: &str) -> BridgeResult<CallStatus> {
        self.record(format!("voicecall status {call_id}"));
        let queued = lock(&self.call_statuses).pop_front();
        queued.unwrap_or_else(|| {
            Ok(CallStatus {
                found: false,
                call: None,
                raw: json!({ "found": false }),
            })
        })
    }

    async fn end_call(&self, call_id: &str) -> BridgeResult<String> {
        self.record(format!("voicecall end {call_id}"));
        self.text_result(MockOp::EndCall)
    }

    async fn add_allowlist_entry(&self, pattern: &str, agent: &str) -> BridgeResult<String> {
        self.record(format!("allowlist add {agent} {pattern}"));
        self.text_result(MockOp::AllowlistAdd)
    }

    async fn remove_allowlist_entry(&self, pattern: &str, agent: &str) -> BridgeResult<String> {
        self.record(format!("allowlist remove {agent} {pattern}"));
        self.text_result(MockOp::AllowlistRemove)
    }

    async fn approvals_snapshot(&self) -> BridgeResult<String> {
        self.record("approvals get".to_string());
        self.text_result(MockOp::Approvals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxgate_core::AgentTurnMode;

    #[tokio::test]
    async fn test_agent_queue_then_echo() {
        let bridge = MockBridge::new()
            .with_agent_reply("first")
            .with_agent_error(BridgeError::Unavailable("down".into()));

        let request = AgentTurnRequest::new("k", "web", "hello", AgentTurnMode::Text);
        assert_eq!(bridge.agent_turn(&request).await.unwrap().text, "first");
        assert!(bridge.agent_turn(&request).await.is_err());
        assert_eq!(bridge.agent_turn(&request).await.unwrap().text, "ok: hello");
        assert_eq!(bridge.agent_requests().len(), 3);
    }

    #[tokio::test]
    async fn test_text_ops_record_calls() {
        let bridge = MockBridge::new()
            .with_text_result(MockOp::Nodes, Err(BridgeError::Unavailable("x".into())));

        assert_eq!(bridge.status().await.unwrap(), "gateway running");
        assert!(bridge.list_nodes_status().await.is_err());
        assert_eq!(bridge.list_nodes_status().await.unwrap(), "0 nodes paired");
        bridge.add_allowlist_entry("git *", "*").await.unwrap();

        assert_eq!(
            bridge.calls(),
            vec!["status", "nodes status", "nodes status", "allowlist add * git *"]
        );
    }

    #[tokio::test]
    async fn test_health_counts() {
        let bridge = MockBridge::new();
        assert!(bridge.health().await.reachable);
        assert_eq!(bridge.health_checks(), 1);
    }
}
