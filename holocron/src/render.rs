//! Plain-text card rendering for the command-line surface

use crate::models::{Person, EDIT_FIELDS};
use crate::roster::{Card, CardMode};

/// Shown instead of cards when a batch produced nothing
pub const NO_DATA_TEXT: &str = "No data available. The Force is not with us today.";

/// Render one record as a labelled block
pub fn render_person(index: usize, person: &Person) -> String {
    let mut out = format!("[{}] {}\n", index, person.name);
    for field in EDIT_FIELDS.iter().skip(1) {
        let label = format!("{}:", field.label);
        let value = person.field(field.property).unwrap_or_default();
        let line = if field.suffix.is_empty() {
            format!("    {:<11} {}\n", label, value)
        } else {
            format!("    {:<11} {} {}\n", label, value, field.suffix)
        };
        out.push_str(&line);
    }
    out
}

/// Render a card, marking cards that are being edited
pub fn render_card(index: usize, card: &Card) -> String {
    let mut out = render_person(index, card.working());
    if card.mode() == CardMode::Editing {
        out.push_str("    (editing)\n");
    }
    out
}

/// Render a list of records, or the no-data text when there are none
pub fn render_people(people: &[Person]) -> String {
    if people.is_empty() {
        return format!("{}\n", NO_DATA_TEXT);
    }
    people
        .iter()
        .enumerate()
        .map(|(i, p)| render_person(i, p))
        .collect::<Vec<_>>()
        .join("\n")
}
