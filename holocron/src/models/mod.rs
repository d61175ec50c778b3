//! Data models for holocron

pub mod person;

pub use person::{edit_field, EditField, FieldKind, Person, EDIT_FIELDS};
