//! Schema 1.0 and its upgrade to 1.1
//!
//! Version 1.1 introduced actions: a 1.0 key binding carried its own script
//! and documentation, a 1.1 key binding only names an action. The 1.0 shape
//! is kept here as a frozen type that can only move forward through
//! [`Keybinding::into_current`].

use serde_json::Value;

use super::MigrationStep;
use crate::codec::schema::{FieldKind, FieldSpec, SectionSchema};
use crate::codec::{encode_action, encode_keybinding, parse_key};
use crate::error::ParsingError;
use crate::key::KeyWithModifier;
use crate::path::FieldPath;
use crate::types::{self, Action};
use crate::version::Version;

/// The 1.0 → 1.1 step
pub const STEP: MigrationStep = MigrationStep::new(
    Version::new(1, 0),
    Version::new(1, 1),
    "split key bindings into actions and key bindings",
    migrate,
);

const KEYBINDING: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("key", FieldKind::String),
    FieldSpec::required("documentation", FieldKind::String),
    FieldSpec::required("name", FieldKind::String),
    FieldSpec::required("gui_path", FieldKind::String),
    FieldSpec::required("is_local", FieldKind::Boolean),
    FieldSpec::required("script", FieldKind::String),
]);

/// Identifier given to the action generated for the key binding at `index`
#[must_use]
pub fn action_identifier(index: usize) -> String {
    format!("profile.keybind.{index}")
}

/// A key binding as written by schema 1.0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: KeyWithModifier,
    pub documentation: String,
    pub name: String,
    pub gui_path: String,
    pub is_local: bool,
    pub script: String,
}

impl Keybinding {
    /// Decode a 1.0 key binding
    ///
    /// # Errors
    /// Any schema violation, reported under `keybinding`
    pub fn decode(
        value: &Value,
        diagnostics: &mut Vec<ParsingError>,
    ) -> Result<Self, ParsingError> {
        let section = KEYBINDING.validate(value, &FieldPath::single("keybinding"), diagnostics)?;
        Ok(Self {
            key: parse_key(&section.string("key")?, section.path())?,
            documentation: section.string("documentation")?,
            name: section.string("name")?,
            gui_path: section.string("gui_path")?,
            is_local: section.boolean("is_local")?,
            script: section.string("script")?,
        })
    }

    /// Split into the 1.1 action and the key binding that refers to it
    #[must_use]
    pub fn into_current(self, index: usize) -> (Action, types::Keybinding) {
        let identifier = action_identifier(index);
        let keybinding = types::Keybinding {
            key: self.key,
            action: identifier.clone(),
        };
        let action = Action {
            identifier,
            documentation: self.documentation,
            name: self.name,
            gui_path: self.gui_path,
            is_local: self.is_local,
            script: self.script,
        };
        (action, keybinding)
    }
}

/// Rewrite `keybindings` into `actions` + `keybindings`
///
/// Leaves the tree untouched when the document has no key bindings.
fn migrate(tree: &mut Value, diagnostics: &mut Vec<ParsingError>) -> Result<(), ParsingError> {
    let Some(root) = tree.as_object_mut() else {
        return Ok(());
    };
    let Some(legacy) = root.get("keybindings") else {
        return Ok(());
    };

    let legacy = legacy
        .as_array()
        .ok_or_else(|| ParsingError::wrong_kind("profile", "keybindings", "an array"))?;

    let mut actions = Vec::with_capacity(legacy.len());
    let mut keybindings = Vec::with_capacity(legacy.len());
    for (index, value) in legacy.iter().enumerate() {
        let (action, keybinding) = Keybinding::decode(value, diagnostics)?.into_current(index);
        actions.push(encode_action(&action));
        keybindings.push(encode_keybinding(&keybinding));
    }

    if root.contains_key("actions") {
        diagnostics.push(ParsingError::info(
            "Key 'actions' not supported in 'profile' version 1.0; replaced by migrated key bindings",
        ));
    }
    root.insert("actions".to_string(), Value::Array(actions));
    root.insert("keybindings".to_string(), Value::Array(keybindings));
    Ok(())
}
