//! Remote lookup and batch aggregation services

pub mod aggregator;
pub mod fetcher;
pub mod swapi_client;

pub use aggregator::{merge_unique, Aggregator, BatchOutcome};
pub use fetcher::{FetchError, PeopleFetcher, UNAVAILABLE_MESSAGE};
pub use swapi_client::{PeopleSource, SearchResponse, SwapiClient, SwapiError};
