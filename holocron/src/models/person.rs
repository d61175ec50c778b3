//! Character record and the editable-field table

use holocron_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A character record as returned by the people API and as persisted in
/// a storage slot
///
/// `id` is never supplied by the remote system. It is derived from `name`
/// when a record is fetched and serves as the de-duplication key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Person {
    /// Identifier (the record's name at fetch time)
    #[serde(default)]
    pub id: String,
    /// Display name, e.g. "Luke Skywalker"
    pub name: String,
    /// Height in centimeters, e.g. "172"
    #[serde(default)]
    pub height: String,
    /// Mass in kilograms, e.g. "77"
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub hair_color: String,
    #[serde(default)]
    pub skin_color: String,
    #[serde(default)]
    pub eye_color: String,
    /// Birth year relative to the Battle of Yavin, e.g. "19BBY"
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub gender: String,
    /// Every other attribute the remote API returns (films, homeworld, url, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Person {
    /// Create a record with only a name, its identifier derived from it
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            ..Self::default()
        }
    }

    /// Set the identifier to the current name
    pub fn derive_id(&mut self) {
        self.id = self.name.clone();
    }

    /// Read a field by its property name
    pub fn field(&self, property: &str) -> Result<&str> {
        let value = match property {
            "id" => &self.id,
            "name" => &self.name,
            "height" => &self.height,
            "mass" => &self.mass,
            "hair_color" => &self.hair_color,
            "skin_color" => &self.skin_color,
            "eye_color" => &self.eye_color,
            "birth_year" => &self.birth_year,
            "gender" => &self.gender,
            other => {
                return Err(Error::InvalidInput(format!("Unknown property: {}", other)));
            }
        };
        Ok(value.as_str())
    }

    /// Overwrite one editable field by its property name
    ///
    /// Only properties listed in [`EDIT_FIELDS`] are editable; `id` is not.
    pub fn set_field(&mut self, property: &str, value: impl Into<String>) -> Result<()> {
        let slot = match property {
            "name" => &mut self.name,
            "height" => &mut self.height,
            "mass" => &mut self.mass,
            "hair_color" => &mut self.hair_color,
            "skin_color" => &mut self.skin_color,
            "eye_color" => &mut self.eye_color,
            "birth_year" => &mut self.birth_year,
            "gender" => &mut self.gender,
            other => {
                return Err(Error::InvalidInput(format!(
                    "Property is not editable: {}",
                    other
                )));
            }
        };
        *slot = value.into();
        Ok(())
    }
}

/// Input kind of an editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// One row of the editable-field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditField {
    pub kind: FieldKind,
    pub label: &'static str,
    pub property: &'static str,
    /// Unit displayed after the value, empty when there is none
    pub suffix: &'static str,
}

impl EditField {
    const fn text(label: &'static str, property: &'static str) -> Self {
        Self {
            kind: FieldKind::Text,
            label,
            property,
            suffix: "",
        }
    }

    const fn number(label: &'static str, property: &'static str, suffix: &'static str) -> Self {
        Self {
            kind: FieldKind::Number,
            label,
            property,
            suffix,
        }
    }
}

/// Fields a card shows and lets the user edit, in display order
pub const EDIT_FIELDS: [EditField; 8] = [
    EditField::text("Name", "name"),
    EditField::number("Height", "height", "cm"),
    EditField::number("Mass", "mass", "kg"),
    EditField::text("Hair color", "hair_color"),
    EditField::text("Skin color", "skin_color"),
    EditField::text("Eye color", "eye_color"),
    EditField::text("Birth year", "birth_year"),
    EditField::text("Gender", "gender"),
];

/// Look up the editable field for a property name
pub fn edit_field(property: &str) -> Option<&'static EditField> {
    EDIT_FIELDS.iter().find(|f| f.property == property)
}
