//! Subcommand implementations.

pub(crate) mod chat;
pub(crate) mod gateway;
pub(crate) mod workspaces;

use voxgate_events::EventReceiver;

use crate::render::render_event;

/// Print every event queued on `events`.
pub(crate) fn print_pending(events: &mut EventReceiver) {
    for event in events.drain() {
        if let Some(line) = render_event(&event) {
            println!("{line}");
        }
    }
}
