//! Slot-based record persistence
//!
//! Each record lives in its own slot, keyed `savedPeople_<index>`, holding a
//! JSON array with exactly one encoded record. Slots are contiguous from 0:
//! the first missing slot ends enumeration.

use super::kv::KeyValueStorage;
use crate::models::Person;
use holocron_common::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Key prefix shared by every record slot
pub const SLOT_PREFIX: &str = "savedPeople";

/// Storage key of slot `index`
pub fn slot_key(index: usize) -> String {
    format!("{}_{}", SLOT_PREFIX, index)
}

/// Record store over an injected key-value backend
#[derive(Clone)]
pub struct RecordStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl RecordStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Read every record, slot 0 upward, until the first missing slot
    ///
    /// An empty slot value counts as missing. A slot that does not decode is
    /// a fatal read error.
    pub fn list(&self) -> Result<Vec<Person>> {
        let mut people = Vec::new();
        let mut index = 0;

        while let Some(data) = self.read_slot(index)? {
            let slot: Vec<Person> =
                serde_json::from_str(&data).map_err(|source| Error::CorruptSlot {
                    key: slot_key(index),
                    source,
                })?;
            people.extend(slot);
            index += 1;
        }

        debug!(slots = index, records = people.len(), "Listed saved people");
        Ok(people)
    }

    /// Replace the whole collection
    ///
    /// Removes every existing contiguous slot, then writes `records[i]` into
    /// slot `i`. Not atomic: a failure part-way leaves old and new slots mixed.
    pub fn replace_all(&self, records: &[Person]) -> Result<()> {
        let mut cleared = 0;
        while self.read_slot(cleared)?.is_some() {
            self.storage.remove(&slot_key(cleared))?;
            cleared += 1;
        }

        for (index, person) in records.iter().enumerate() {
            self.write_slot(index, person)?;
        }

        info!(
            cleared,
            written = records.len(),
            backend = self.storage.backend_name(),
            "Replaced saved people"
        );
        Ok(())
    }

    /// Overwrite slot `index` only
    ///
    /// Neighbouring slots are neither shifted nor validated; the caller keeps
    /// the index consistent with the last `list()`.
    pub fn update_one(&self, index: usize, person: &Person) -> Result<()> {
        self.write_slot(index, person)?;
        debug!(index, name = %person.name, "Updated saved person");
        Ok(())
    }

    /// Find a stored record whose identifier matches `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Result<Option<Person>> {
        Ok(self.locate_by_name(name)?.map(|(_, person)| person))
    }

    /// Like [`RecordStore::find_by_name`], also returning the slot index
    pub fn locate_by_name(&self, name: &str) -> Result<Option<(usize, Person)>> {
        let wanted = name.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .enumerate()
            .find(|(_, person)| person.id.to_lowercase() == wanted))
    }

    fn read_slot(&self, index: usize) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(&slot_key(index))?
            .filter(|data| !data.is_empty()))
    }

    fn write_slot(&self, index: usize, person: &Person) -> Result<()> {
        let encoded = serde_json::to_string(std::slice::from_ref(person))?;
        self.storage.set(&slot_key(index), &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn store() -> (Arc<MemoryStorage>, RecordStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = RecordStore::new(storage.clone());
        (storage, store)
    }

    fn people(names: &[&str]) -> Vec<Person> {
        names.iter().map(|n| Person::named(*n)).collect()
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let (_, store) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_replace_all_then_list_preserves_order() {
        let (_, store) = store();
        for count in 0..5 {
            let names = ["Yoda", "Darth Vader", "Obi-Wan Kenobi", "Leia Organa"];
            let written = people(&names[..count.min(4)]);
            store.replace_all(&written).unwrap();
            assert_eq!(store.list().unwrap(), written);
        }
    }

    #[test]
    fn test_replace_all_drops_trailing_slots() {
        let (storage, store) = store();
        store.replace_all(&people(&["A", "B", "C"])).unwrap();
        store.replace_all(&people(&["D"])).unwrap();

        assert_eq!(store.list().unwrap(), people(&["D"]));
        assert_eq!(storage.keys(), vec![slot_key(0)]);
    }

    #[test]
    fn test_slot_value_is_single_element_array() {
        let (storage, store) = store();
        store.replace_all(&people(&["Yoda"])).unwrap();

        let raw = storage.get("savedPeople_0").unwrap().unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded.as_array().map(|a| a.len()), Some(1));
        assert_eq!(decoded[0]["name"], "Yoda");
    }

    #[test]
    fn test_gap_terminates_enumeration() {
        let (storage, store) = store();
        store.replace_all(&people(&["A", "B", "C"])).unwrap();
        storage.remove(&slot_key(1)).unwrap();

        assert_eq!(store.list().unwrap(), people(&["A"]));
    }

    #[test]
    fn test_empty_slot_value_terminates_enumeration() {
        let (storage, store) = store();
        storage.set(&slot_key(0), "").unwrap();
        assert!(store.list().unwrap().is_empty());

        store.replace_all(&people(&["A", "B"])).unwrap();
        storage.set(&slot_key(1), "").unwrap();
        assert_eq!(store.list().unwrap(), people(&["A"]));
        assert!(store.find_by_name("b").unwrap().is_none());
    }

    #[test]
    fn test_update_one_overwrites_only_that_slot() {
        let (_, store) = store();
        store.replace_all(&people(&["A", "B", "C"])).unwrap();

        let mut edited = Person::named("B");
        edited.name = "B prime".to_string();
        store.update_one(1, &edited).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed[0].name, "A");
        assert_eq!(listed[1].name, "B prime");
        assert_eq!(listed[1].id, "B");
        assert_eq!(listed[2].name, "C");
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let (_, store) = store();
        store.replace_all(&people(&["Darth Vader", "Yoda"])).unwrap();

        let lower = store.find_by_name("yoda").unwrap();
        let exact = store.find_by_name("Yoda").unwrap();
        assert!(lower.is_some());
        assert_eq!(lower, exact);
        assert!(store.find_by_name("Han Solo").unwrap().is_none());
    }

    #[test]
    fn test_find_by_name_matches_identifier_not_display_name() {
        let (_, store) = store();
        let mut renamed = Person::named("Yoda");
        renamed.name = "Master Yoda".to_string();
        store.replace_all(&[renamed]).unwrap();

        assert!(store.find_by_name("yoda").unwrap().is_some());
        assert!(store.find_by_name("master yoda").unwrap().is_none());
    }

    #[test]
    fn test_locate_by_name_reports_slot_index() {
        let (_, store) = store();
        store.replace_all(&people(&["Darth Vader", "Yoda"])).unwrap();

        let (index, person) = store.locate_by_name("YODA").unwrap().unwrap();
        assert_eq!(index, 1);
        assert_eq!(person.name, "Yoda");
    }

    #[test]
    fn test_corrupt_slot_is_fatal() {
        let (storage, store) = store();
        store.replace_all(&people(&["A"])).unwrap();
        storage.set(&slot_key(1), "{not json").unwrap();

        match store.list() {
            Err(Error::CorruptSlot { key, .. }) => assert_eq!(key, "savedPeople_1"),
            other => panic!("expected CorruptSlot, got {:?}", other),
        }
        assert!(store.find_by_name("A").is_err());
    }
}
