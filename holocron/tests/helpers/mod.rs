//! Shared test helpers: in-memory people source and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use holocron::models::Person;
use holocron::services::{PeopleSource, SwapiError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// People source answering from a fixed catalogue
///
/// Names listed as failing answer with a server error. Every call is
/// counted and recorded.
#[derive(Default)]
pub struct StubSource {
    catalogue: HashMap<String, Person>,
    failing: HashSet<String>,
    calls: AtomicUsize,
    queried: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn with_people(names: &[&str]) -> Self {
        let mut source = Self::default();
        for name in names {
            source.catalogue.insert(name.to_lowercase(), remote_person(name));
        }
        source
    }

    pub fn failing_for(mut self, name: &str) -> Self {
        self.failing.insert(name.to_lowercase());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl PeopleSource for StubSource {
    async fn search(&self, name: &str) -> Result<Vec<Person>, SwapiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(name.to_string());

        let key = name.to_lowercase();
        if self.failing.contains(&key) {
            return Err(SwapiError::Api(500, "upstream down".to_string()));
        }
        Ok(self.catalogue.get(&key).cloned().into_iter().collect())
    }
}

/// A record as the remote API returns it: no identifier, extra fields present
pub fn remote_person(name: &str) -> Person {
    let mut person = Person {
        name: name.to_string(),
        height: "172".to_string(),
        mass: "77".to_string(),
        gender: "male".to_string(),
        ..Person::default()
    };
    person.extra.insert(
        "url".to_string(),
        serde_json::Value::String(format!("https://swapi.dev/api/people/{}/", name.len())),
    );
    person
}

pub fn desired_names() -> Vec<String> {
    ["Yoda", "Darth Vader", "Obi-Wan Kenobi"]
        .iter()
        .map(|n| n.to_string())
        .collect()
}
