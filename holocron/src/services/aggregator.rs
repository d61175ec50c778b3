//! Batch lookup, merge with the local store, and write-back
//!
//! Every name is looked up concurrently on the current task. Individual
//! failures become empty contributions; the batch itself never fails.

use super::fetcher::PeopleFetcher;
use crate::cues::CuePlayer;
use crate::models::Person;
use futures::future::join_all;
use holocron_common::events::{Cue, EventBus, HolocronEvent};
use holocron_common::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of one batch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    /// Merged records, cached ones first
    pub people: Vec<Person>,
    /// User-visible error flag
    pub error_flag: bool,
    /// Whether the "no data" signal was raised
    pub no_data: bool,
}

/// Seed with `cached`, then append each fetched record whose name and
/// identifier are both unseen
///
/// Cached records always win over freshly fetched ones.
pub fn merge_unique(cached: Vec<Person>, fetched: Vec<Person>) -> Vec<Person> {
    let mut merged = cached;
    for person in fetched {
        let seen = merged
            .iter()
            .any(|p| p.name == person.name || p.id == person.id);
        if !seen {
            merged.push(person);
        }
    }
    merged
}

/// Fans out name lookups and reconciles them with the store
pub struct Aggregator {
    fetcher: PeopleFetcher,
    cues: Arc<dyn CuePlayer>,
    event_bus: EventBus,
}

impl Aggregator {
    pub fn new(fetcher: PeopleFetcher, cues: Arc<dyn CuePlayer>, event_bus: EventBus) -> Self {
        Self {
            fetcher,
            cues,
            event_bus,
        }
    }

    /// Fetch, merge, and persist; returns the merged records
    pub async fn fetch_many<S: AsRef<str>>(&self, names: &[S]) -> Vec<Person> {
        self.fetch_many_outcome(names).await.people
    }

    /// Fetch, merge, and persist; returns the records with the UI flags
    pub async fn fetch_many_outcome<S: AsRef<str>>(&self, names: &[S]) -> BatchOutcome {
        let fetched = self.fetch_all(names).await;

        match self.merge_and_persist(fetched) {
            Ok(people) => {
                let no_data = people.is_empty();
                if no_data {
                    warn!(requested = names.len(), "Batch produced no data");
                    self.cues.play(Cue::NoData);
                }

                info!(requested = names.len(), merged = people.len(), "Batch completed");
                self.event_bus.emit_lossy(HolocronEvent::BatchCompleted {
                    requested: names.len(),
                    merged: people.len(),
                    timestamp: holocron_common::time::now(),
                });

                BatchOutcome {
                    people,
                    error_flag: false,
                    no_data,
                }
            }
            Err(e) => {
                // Merge failures degrade to an empty result with the error flag cleared
                error!(error = %e, "Error merging batch");
                BatchOutcome {
                    people: Vec::new(),
                    error_flag: false,
                    no_data: false,
                }
            }
        }
    }

    /// Look up every name concurrently and flatten the results
    async fn fetch_all<S: AsRef<str>>(&self, names: &[S]) -> Vec<Person> {
        let lookups = names.iter().map(|name| {
            let name = name.as_ref();
            async move {
                match self.fetcher.fetch_one(name).await {
                    Ok(person) => vec![person],
                    Err(e) => {
                        warn!(name = %name, error = %e, "Error fetching data for name");
                        Vec::new()
                    }
                }
            }
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }

    fn merge_and_persist(&self, fetched: Vec<Person>) -> Result<Vec<Person>> {
        let store = self.fetcher.store();
        let merged = merge_unique(store.list()?, fetched);
        store.replace_all(&merged)?;
        Ok(merged)
    }
}
