//! Single-name lookup with the local cache shortcut
//!
//! A record already in the store is returned as-is and the remote source is
//! never consulted for it: cached records are not refreshed.

use super::swapi_client::PeopleSource;
use crate::models::Person;
use crate::store::RecordStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Fixed message shown to users for any transport or server failure
pub const UNAVAILABLE_MESSAGE: &str = "Data not available. Please try again later or contact us.";

/// Lookup errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote search returned zero results
    #[error("The Jedi you are looking for is not here: {0}")]
    NotFound(String),

    /// Transport or server failure; the cause is logged, not carried
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable,

    /// The local cache could not be read
    #[error("Store error: {0}")]
    Store(#[from] holocron_common::Error),
}

/// Looks up one person at a time, store first
#[derive(Clone)]
pub struct PeopleFetcher {
    store: RecordStore,
    source: Arc<dyn PeopleSource>,
}

impl PeopleFetcher {
    pub fn new(store: RecordStore, source: Arc<dyn PeopleSource>) -> Self {
        Self { store, source }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Fetch one person by name
    ///
    /// The first remote result is taken and its identifier overwritten with
    /// its name.
    pub async fn fetch_one(&self, name: &str) -> Result<Person, FetchError> {
        if let Some(cached) = self.store.find_by_name(name)? {
            debug!(name = %name, "Serving person from local store");
            return Ok(cached);
        }

        let results = self.source.search(name).await.map_err(|e| {
            error!(name = %name, error = %e, "Error fetching data");
            FetchError::Unavailable
        })?;

        let mut person = results
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NotFound(name.to_string()))?;
        person.derive_id();

        Ok(person)
    }
}
