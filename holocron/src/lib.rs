//! holocron library interface
//!
//! Fetches character records from the people API, merges them with locally
//! persisted edits, and drives the per-card edit/save flow.

pub mod cues;
pub mod models;
pub mod render;
pub mod roster;
pub mod services;
pub mod store;

use cues::{CuePlayer, EventCuePlayer};
use holocron_common::config::TomlConfig;
use holocron_common::events::EventBus;
use holocron_common::Result;
use roster::Roster;
use services::{Aggregator, PeopleFetcher, PeopleSource, SwapiClient};
use std::sync::Arc;
use store::{KeyValueStorage, RecordStore};

/// Shared application context
///
/// Wires one storage backend and one remote source into the store, fetcher,
/// aggregator and cue player.
#[derive(Clone)]
pub struct AppState {
    /// Slot-based record store over the injected backend
    pub store: RecordStore,
    /// Single-name lookups
    pub fetcher: PeopleFetcher,
    /// Cue and batch notifications
    pub event_bus: EventBus,
    /// Cue player publishing on `event_bus`
    pub cues: Arc<dyn CuePlayer>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        source: Arc<dyn PeopleSource>,
        event_bus: EventBus,
    ) -> Self {
        let store = RecordStore::new(storage);
        let fetcher = PeopleFetcher::new(store.clone(), source);
        let cues: Arc<dyn CuePlayer> = Arc::new(EventCuePlayer::new(event_bus.clone()));
        Self {
            store,
            fetcher,
            event_bus,
            cues,
        }
    }

    /// Build the context with an HTTP client configured from `config`
    pub fn from_config(
        config: &TomlConfig,
        storage: Arc<dyn KeyValueStorage>,
        event_bus: EventBus,
    ) -> Result<Self> {
        let client = SwapiClient::new(
            config.api_base_url.clone(),
            holocron_common::time::secs_to_duration(config.request_timeout_secs),
        )
        .map_err(|e| holocron_common::Error::Config(e.to_string()))?;
        Ok(Self::new(storage, Arc::new(client), event_bus))
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.fetcher.clone(), self.cues.clone(), self.event_bus.clone())
    }

    /// Cards for the records currently persisted
    pub fn roster(&self) -> Result<Roster> {
        Roster::load(self.store.clone(), self.cues.clone(), self.event_bus.clone())
    }
}
