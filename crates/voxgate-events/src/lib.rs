//! Voxgate Events - The event stream of a voice session.
//!
//! Every externally observable effect of the orchestrator is published as a
//! [`VoiceEvent`] on an [`EventBus`]. Events are the only artifact crossing
//! the boundary to a UI; nothing about transcript handling is returned
//! synchronously.
//!
//! # Example
//!
//! ```rust
//! use voxgate_events::{EventBus, VoiceEvent, VoiceEventKind};
//!
//! # async fn example() {
//! let bus = EventBus::new();
//! let mut receiver = bus.subscribe();
//!
//! bus.publish(VoiceEvent::new(
//!     "main",
//!     "web",
//!     VoiceEventKind::TranscriptFinal { text: "status".into() },
//! ));
//!
//! let event = receiver.recv().await.unwrap();
//! assert_eq!(event.event_type(), "transcript.final");
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod bus;
mod event;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus, EventReceiver};
pub use event::{ApprovalPayload, StateChange, VoiceEvent, VoiceEventKind};
