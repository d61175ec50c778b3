//! Event types for the holocron event system
//!
//! Provides the shared event definitions and the EventBus used to deliver
//! audio cues and batch notifications to whatever surface is listening.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

/// Audio cue identifiers
///
/// Each cue maps to one fixed sound asset. Cues are fire-and-forget: the
/// core never learns whether anything actually played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// A batch produced no records at all
    NoData,
    /// The record originally identified as "Darth Vader" was renamed
    DarthVaderNameChange,
    /// The record originally identified as "Yoda" was renamed
    YodaNameChange,
    /// The record originally identified as "Obi-Wan Kenobi" was renamed
    ObiWanKenobiNameChange,
}

impl Cue {
    /// All cues, in declaration order
    pub const ALL: [Cue; 4] = [
        Cue::NoData,
        Cue::DarthVaderNameChange,
        Cue::YodaNameChange,
        Cue::ObiWanKenobiNameChange,
    ];

    /// Path of the sound asset for this cue
    pub fn asset_path(self) -> &'static str {
        match self {
            Cue::NoData => "assets/sound/destroy.mp3",
            Cue::DarthVaderNameChange => "assets/sound/darth-vader-name-change.mp3",
            Cue::YodaNameChange => "assets/sound/yoda-name-change.mp3",
            Cue::ObiWanKenobiNameChange => "assets/sound/obi-wan-kenobi-name-change.mp3",
        }
    }

    /// Stable identifier used in logs and serialized events
    pub fn as_str(self) -> &'static str {
        match self {
            Cue::NoData => "no_data",
            Cue::DarthVaderNameChange => "darth_vader_name_change",
            Cue::YodaNameChange => "yoda_name_change",
            Cue::ObiWanKenobiNameChange => "obi_wan_kenobi_name_change",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holocron event types
///
/// Events are broadcast via EventBus and can be serialized for logging or
/// forwarding to another surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HolocronEvent {
    /// An audio cue should be played
    CueTriggered {
        /// Which cue
        cue: Cue,
        /// Sound asset for the cue
        asset: String,
        /// When the cue was triggered
        timestamp: DateTime<Utc>,
    },

    /// A fetch batch finished and its merged result was persisted
    BatchCompleted {
        /// Number of names requested
        requested: usize,
        /// Number of records in the merged result
        merged: usize,
        /// When the batch finished
        timestamp: DateTime<Utc>,
    },

    /// An edited record was committed to its storage slot
    PersonSaved {
        /// Slot index the record was written to
        index: usize,
        /// Name of the record after the edit
        name: String,
        /// When the record was saved
        timestamp: DateTime<Utc>,
    },
}

impl HolocronEvent {
    /// Build a CueTriggered event stamped with the current time
    pub fn cue(cue: Cue) -> Self {
        HolocronEvent::CueTriggered {
            cue,
            asset: cue.asset_path().to_string(),
            timestamp: crate::time::now(),
        }
    }

    /// Event type name, matching the serde tag
    pub fn event_type(&self) -> &'static str {
        match self {
            HolocronEvent::CueTriggered { .. } => "CueTriggered",
            HolocronEvent::BatchCompleted { .. } => "BatchCompleted",
            HolocronEvent::PersonSaved { .. } => "PersonSaved",
        }
    }
}

/// Central event distribution bus
///
/// Uses tokio::broadcast internally:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Lagged message detection for slow subscribers
///
/// # Examples
///
/// ```
/// use holocron_common::events::{Cue, EventBus, HolocronEvent};
///
/// let event_bus = EventBus::new(16);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(HolocronEvent::cue(Cue::NoData));
///
/// match rx.try_recv() {
///     Ok(HolocronEvent::CueTriggered { cue, .. }) => assert_eq!(cue, Cue::NoData),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<HolocronEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// * `capacity` - Number of events to buffer before dropping old events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<HolocronEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: HolocronEvent,
    ) -> Result<usize, broadcast::error::SendError<HolocronEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: HolocronEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
