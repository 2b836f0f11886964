//! Broadcast bus carrying session events to every subscriber.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{trace, warn};

use crate::event::VoiceEvent;

/// Default channel capacity for the event bus.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting session events.
///
/// Each published event is delivered in order to every receiver that
/// exists at publish time. Receivers subscribed later never see it, and a
/// receiver that falls more than `capacity` events behind loses the oldest.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Arc<VoiceEvent>>,
    capacity: usize,
}

impl EventBus {
    /// Create a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, capacity }
    }

    /// Publish an event.
    ///
    /// Returns the number of receivers that got it.
    pub fn publish(&self, event: VoiceEvent) -> usize {
        let event_type = event.event_type();
        if let Ok(count) = self.sender.send(Arc::new(event)) {
            trace!(event_type, receiver_count = count, "Event published");
            count
        } else {
            trace!(event_type, "No receivers for event");
            0
        }
    }

    /// Subscribe to all events.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe(), None)
    }

    /// Subscribe to events whose type matches `pattern`.
    ///
    /// The pattern is an exact type (`agent.reply`) or a trailing wildcard
    /// (`transcript.*`).
    #[must_use]
    pub fn subscribe_type(&self, pattern: impl Into<String>) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe(), Some(pattern.into()))
    }

    /// Number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver for events from the event bus.
pub struct EventReceiver {
    receiver: broadcast::Receiver<Arc<VoiceEvent>>,
    type_pattern: Option<String>,
}

impl EventReceiver {
    fn new(receiver: broadcast::Receiver<Arc<VoiceEvent>>, type_pattern: Option<String>) -> Self {
        Self {
            receiver,
            type_pattern,
        }
    }

    fn matches(&self, event: &VoiceEvent) -> bool {
        let Some(pattern) = &self.type_pattern else {
            return true;
        };
        let event_type = event.event_type();
        if let Some(prefix) = pattern.strip_suffix('*') {
            event_type.starts_with(prefix)
        } else {
            event_type == pattern
        }
    }

    /// Receive the next matching event.
    ///
    /// Returns `None` once every bus handle is dropped. Lagged events are
    /// logged and skipped.
    pub async fn recv(&mut self) -> Option<Arc<VoiceEvent>> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(event);
                    }
                },
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(skipped = count, "Event receiver lagged, events dropped");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Receive the next matching event without waiting.
    pub fn try_recv(&mut self) -> Option<Arc<VoiceEvent>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(event);
                    }
                },
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    warn!(skipped = count, "Event receiver lagged, events dropped");
                },
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => return None,
            }
        }
    }

    /// Take every matching event currently queued.
    pub fn drain(&mut self) -> Vec<Arc<VoiceEvent>> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{StateChange, VoiceEventKind};

    fn final_event(text: &str) -> VoiceEvent {
        VoiceEvent::new(
            "main",
            "web",
            VoiceEventKind::TranscriptFinal { text: text.into() },
        )
    }

    fn error_event() -> VoiceEvent {
        VoiceEvent::new(
            "main",
            "web",
            VoiceEventKind::Error {
                message: "boom".into(),
            },
        )
    }

    #[tokio::test]
    async fn test_publish_and_receive() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        assert_eq!(bus.publish(final_event("hello")), 1);

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "transcript.final");
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);
        assert_eq!(bus.publish(error_event()), 2);
        assert!(first.try_recv().is_some());
        assert!(second.try_recv().is_some());

        drop(second);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_no_subscribers() {
        let bus = EventBus::with_capacity(8);
        assert_eq!(bus.capacity(), 8);
        assert_eq!(bus.publish(error_event()), 0);
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let bus = EventBus::new();
        bus.publish(error_event());

        let mut receiver = bus.subscribe();
        assert!(receiver.try_recv().is_none());
    }

    #[test]
    fn test_type_filter_exact_and_wildcard() {
        let bus = EventBus::new();
        let mut errors = bus.subscribe_type("error");
        let mut transcripts = bus.subscribe_type("transcript.*");

        bus.publish(final_event("one"));
        bus.publish(error_event());
        bus.publish(VoiceEvent::new(
            "main",
            "web",
            VoiceEventKind::TranscriptPartial { text: "tw".into() },
        ));
        bus.publish(VoiceEvent::new(
            "main",
            "web",
            VoiceEventKind::StateChanged(StateChange::message("hi")),
        ));

        let errs = errors.drain();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].event_type(), "error");

        let types: Vec<_> = transcripts.drain().iter().map(|e| e.event_type()).collect();
        assert_eq!(types, vec!["transcript.final", "transcript.partial"]);
    }

    #[test]
    fn test_lagged_receiver_keeps_newest() {
        let bus = EventBus::with_capacity(2);
        let mut receiver = bus.subscribe();

        for text in ["a", "b", "c"] {
            bus.publish(final_event(text));
        }

        let texts: Vec<String> = receiver
            .drain()
            .iter()
            .map(|e| match &e.kind {
                VoiceEventKind::TranscriptFinal { text } => text.clone(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(texts, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_closed() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();
        drop(bus);
        assert!(receiver.recv().await.is_none());
    }
}
