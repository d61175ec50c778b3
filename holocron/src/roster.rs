//! Per-card edit/save state machine
//!
//! Each card is `Viewing` or `Editing`, independently of every other card:
//! - begin_edit: Viewing → Editing, snapshots the working copy as the original
//! - save: Editing → Viewing, commits the working copy to its storage slot
//! - cancel: Editing → Viewing, restores the working copy from the original

use crate::cues::{cue_for_name_change, CuePlayer};
use crate::models::Person;
use crate::store::RecordStore;
use holocron_common::events::{Cue, EventBus, HolocronEvent};
use holocron_common::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Display state of one card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    Viewing,
    Editing,
}

/// One displayed record with its working and original copies
#[derive(Debug, Clone)]
pub struct Card {
    working: Person,
    original: Person,
    mode: CardMode,
}

impl Card {
    pub fn new(person: Person) -> Self {
        Self {
            original: person.clone(),
            working: person,
            mode: CardMode::Viewing,
        }
    }

    /// Value currently shown (and edited)
    pub fn working(&self) -> &Person {
        &self.working
    }

    /// Pre-edit snapshot
    pub fn original(&self) -> &Person {
        &self.original
    }

    pub fn mode(&self) -> CardMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == CardMode::Editing
    }
}

/// The displayed collection of cards
pub struct Roster {
    cards: Vec<Card>,
    store: RecordStore,
    cues: Arc<dyn CuePlayer>,
    event_bus: EventBus,
}

impl Roster {
    /// Build cards for `people`; card `i` saves to storage slot `i`
    pub fn new(
        people: Vec<Person>,
        store: RecordStore,
        cues: Arc<dyn CuePlayer>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            cards: people.into_iter().map(Card::new).collect(),
            store,
            cues,
            event_bus,
        }
    }

    /// Build cards from the records currently in the store
    pub fn load(store: RecordStore, cues: Arc<dyn CuePlayer>, event_bus: EventBus) -> Result<Self> {
        let people = store.list()?;
        Ok(Self::new(people, store, cues, event_bus))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Result<&Card> {
        self.cards
            .get(index)
            .ok_or_else(|| Error::InvalidInput(format!("No card at index {}", index)))
    }

    fn card_mut(&mut self, index: usize) -> Result<&mut Card> {
        self.cards
            .get_mut(index)
            .ok_or_else(|| Error::InvalidInput(format!("No card at index {}", index)))
    }

    fn editing_card_mut(&mut self, index: usize, action: &str) -> Result<&mut Card> {
        let card = self.card_mut(index)?;
        if card.mode != CardMode::Editing {
            return Err(Error::InvalidTransition(format!(
                "Cannot {} card {}: not being edited",
                action, index
            )));
        }
        Ok(card)
    }

    /// Viewing → Editing
    pub fn begin_edit(&mut self, index: usize) -> Result<()> {
        let card = self.card_mut(index)?;
        if card.mode == CardMode::Editing {
            return Err(Error::InvalidTransition(format!(
                "Card {} is already being edited",
                index
            )));
        }
        card.original = card.working.clone();
        card.mode = CardMode::Editing;
        debug!(index, name = %card.working.name, "Editing card");
        Ok(())
    }

    /// Change one field of the working copy of an editing card
    pub fn set_field(
        &mut self,
        index: usize,
        property: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        self.editing_card_mut(index, "modify")?
            .working
            .set_field(property, value)
    }

    /// Editing → Viewing, committing the working copy
    ///
    /// Returns the cue played, if the rename of a distinguished record
    /// triggered one. On a store failure the card stays in Editing.
    pub fn save(&mut self, index: usize) -> Result<Option<Cue>> {
        let card = self.editing_card_mut(index, "save")?;
        let edited = card.working.clone();

        self.store.update_one(index, &edited)?;

        let card = self.card_mut(index)?;
        let cue = if edited.name != card.original.name {
            cue_for_name_change(&card.original.id)
        } else {
            None
        };
        card.original = edited.clone();
        card.mode = CardMode::Viewing;

        info!(index, name = %edited.name, "Saved card");
        self.event_bus.emit_lossy(HolocronEvent::PersonSaved {
            index,
            name: edited.name,
            timestamp: holocron_common::time::now(),
        });

        if let Some(cue) = cue {
            self.cues.play(cue);
        }
        Ok(cue)
    }

    /// Editing → Viewing, discarding the working copy
    pub fn cancel(&mut self, index: usize) -> Result<()> {
        let card = self.editing_card_mut(index, "cancel")?;
        card.working = card.original.clone();
        card.mode = CardMode::Viewing;
        debug!(index, "Cancelled edit");
        Ok(())
    }
}
