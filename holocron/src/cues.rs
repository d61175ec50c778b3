//! Audio cue triggering
//!
//! Maps data-change events to cues and hands them to a player. Players are
//! fire-and-forget: nothing is returned and no failure reaches the caller.

use holocron_common::events::{Cue, EventBus, HolocronEvent};
use tracing::debug;

/// Identifiers whose renaming triggers a cue
pub const DARTH_VADER: &str = "Darth Vader";
pub const YODA: &str = "Yoda";
pub const OBI_WAN_KENOBI: &str = "Obi-Wan Kenobi";

/// Cue played when the record originally identified as `id` is renamed
pub fn cue_for_name_change(id: &str) -> Option<Cue> {
    match id {
        DARTH_VADER => Some(Cue::DarthVaderNameChange),
        YODA => Some(Cue::YodaNameChange),
        OBI_WAN_KENOBI => Some(Cue::ObiWanKenobiNameChange),
        _ => None,
    }
}

/// Something that can play a cue
pub trait CuePlayer: Send + Sync {
    fn play(&self, cue: Cue);
}

/// Publishes cues on the event bus for whichever surface plays sound
#[derive(Clone)]
pub struct EventCuePlayer {
    event_bus: EventBus,
}

impl EventCuePlayer {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

impl CuePlayer for EventCuePlayer {
    fn play(&self, cue: Cue) {
        debug!(cue = %cue, asset = cue.asset_path(), "Triggering cue");
        self.event_bus.emit_lossy(HolocronEvent::cue(cue));
    }
}
