//! Profile document codec
//!
//! Converts between [`Profile`] and its JSON text form.
//!
//! # Decoding
//!
//! ```text
//! text → serde_json::Value → MigrationRegistry::migrate → section schemas → Profile
//! ```
//!
//! Syntax errors and schema violations abort the decode; unknown keys are
//! recorded on the [`DecodeReport`] and otherwise ignored, so documents
//! carrying fields from a newer minor version still load.
//!
//! # Encoding
//!
//! Sections are written in canonical key order, absent optional fields and
//! empty lists are omitted, and the text is pretty-printed with two-space
//! indentation.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ParsingError, SerializeError};
use crate::migration::{AppliedMigration, MigrationRegistry};
use crate::path::FieldPath;
use crate::profile::Profile;
use crate::version::Version;

pub mod schema;
mod sections;

pub(crate) use sections::{encode_action, encode_keybinding, parse_key};

/// Everything a successful decode noticed besides the profile itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    /// Informational diagnostics (unknown keys, dangling references)
    pub diagnostics: Vec<ParsingError>,
    /// Migration steps that ran, in order
    pub migrations: Vec<AppliedMigration>,
}

impl DecodeReport {
    /// Whether the document was upgraded from an older version
    #[inline]
    #[must_use]
    pub fn was_migrated(&self) -> bool {
        !self.migrations.is_empty()
    }
}

/// Decode a profile document
///
/// # Errors
/// Returns [`ParsingError`] on syntax errors, schema violations and failed
/// migrations
pub fn decode(text: &str) -> Result<Profile, ParsingError> {
    decode_with_report(text).map(|(profile, _)| profile)
}

/// Decode a profile document, keeping diagnostics and the migration record
///
/// # Errors
/// Same as [`decode`]
pub fn decode_with_report(text: &str) -> Result<(Profile, DecodeReport), ParsingError> {
    decode_with_registry(text, &MigrationRegistry::with_defaults())
}

/// Decode a profile document using a specific migration registry
///
/// # Errors
/// Same as [`decode`]
pub fn decode_with_registry(
    text: &str,
    registry: &MigrationRegistry,
) -> Result<(Profile, DecodeReport), ParsingError> {
    let mut tree: Value = serde_json::from_str(text)?;

    let mut diagnostics = Vec::new();
    let migrations = registry.migrate(&mut tree, &mut diagnostics)?;
    let profile = decode_tree(&tree, &mut diagnostics)?;

    for keybinding in profile.dangling_keybindings() {
        tracing::warn!(
            target: "profile",
            "Key binding '{}' refers to unknown action '{}'",
            keybinding.key,
            keybinding.action
        );
        diagnostics.push(ParsingError::info(format!(
            "Key binding '{}' refers to unknown action '{}'",
            keybinding.key, keybinding.action
        )));
    }

    Ok((
        profile,
        DecodeReport {
            diagnostics,
            migrations,
        },
    ))
}

/// Decode an already-migrated document tree
///
/// # Errors
/// Returns the first schema violation
pub fn decode_tree(
    tree: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Profile, ParsingError> {
    let root = sections::PROFILE.validate(tree, &FieldPath::single("profile"), diagnostics)?;

    let version = root
        .get("version")
        .ok_or_else(|| ParsingError::missing_field("profile", "version"))?;

    let mut profile = Profile::new();
    profile.version = sections::decode_version(version, diagnostics)?;

    profile.modules = root
        .array("modules")?
        .iter()
        .map(|v| sections::decode_module(v, diagnostics))
        .collect::<Result<_, _>>()?;
    profile.meta = root
        .get("meta")
        .map(|v| sections::decode_meta(v, diagnostics))
        .transpose()?;
    profile.assets = root.string_list("assets")?;
    profile.properties = root
        .array("properties")?
        .iter()
        .map(|v| sections::decode_property(v, diagnostics))
        .collect::<Result<_, _>>()?;
    profile.actions = root
        .array("actions")?
        .iter()
        .map(|v| sections::decode_action(v, diagnostics))
        .collect::<Result<_, _>>()?;
    profile.keybindings = root
        .array("keybindings")?
        .iter()
        .map(|v| sections::decode_keybinding(v, diagnostics))
        .collect::<Result<_, _>>()?;
    profile.time = root
        .get("time")
        .map(|v| sections::decode_time(v, diagnostics))
        .transpose()?;
    profile.delta_times = root.number_list("delta_times")?;
    profile.camera = root
        .get("camera")
        .map(|v| sections::decode_camera(v, diagnostics))
        .transpose()?;
    profile.mark_nodes = root.string_list("mark_nodes")?;
    profile.additional_scripts = root.string_list("additional_scripts")?;

    Ok(profile)
}

/// Encode a profile into its canonical document tree
#[must_use]
pub fn encode_tree(profile: &Profile) -> Value {
    fn list<T>(map: &mut Map<String, Value>, key: &str, items: &[T], f: impl Fn(&T) -> Value) {
        if !items.is_empty() {
            map.insert(key.to_string(), items.iter().map(f).collect());
        }
    }

    let mut map = Map::new();
    map.insert(
        "version".to_string(),
        sections::encode_version(profile.version),
    );
    list(&mut map, "modules", &profile.modules, sections::encode_module);
    if let Some(meta) = &profile.meta {
        map.insert("meta".to_string(), sections::encode_meta(meta));
    }
    list(&mut map, "assets", &profile.assets, |a| a.clone().into());
    list(&mut map, "properties", &profile.properties, sections::encode_property);
    list(&mut map, "actions", &profile.actions, sections::encode_action);
    list(&mut map, "keybindings", &profile.keybindings, sections::encode_keybinding);
    if let Some(time) = &profile.time {
        map.insert("time".to_string(), sections::encode_time(time));
    }
    list(&mut map, "delta_times", &profile.delta_times, |d| (*d).into());
    if let Some(camera) = &profile.camera {
        map.insert("camera".to_string(), sections::encode_camera(camera));
    }
    list(&mut map, "mark_nodes", &profile.mark_nodes, |n| n.clone().into());
    list(
        &mut map,
        "additional_scripts",
        &profile.additional_scripts,
        |s| s.clone().into(),
    );
    Value::Object(map)
}

/// Encode a profile as pretty-printed JSON text
///
/// # Errors
/// Returns error if the JSON writer fails
pub fn encode(profile: &Profile) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(&encode_tree(profile))?)
}

/// Read the `version` of a raw document tree
pub(crate) fn read_version(tree: &Value) -> Result<Version, ParsingError> {
    let root = tree
        .as_object()
        .ok_or_else(|| ParsingError::error("'profile' must be an object"))?;
    let version = root
        .get("version")
        .ok_or_else(|| ParsingError::missing_field("profile", "version"))?;
    // Diagnostics for the version object are reported by the full decode
    sections::decode_version(version, &mut Vec::new())
}

/// Overwrite the `version` of a raw document tree
///
/// Only `major` and `minor` are replaced; any other keys of the version
/// object stay in place for the full decode to report.
pub(crate) fn write_version(tree: &mut Value, version: Version) {
    let Some(root) = tree.as_object_mut() else {
        return;
    };
    let stamped = sections::encode_version(version);
    if let (Some(Value::Object(existing)), Value::Object(fields)) =
        (root.get_mut("version"), &stamped)
    {
        existing.extend(fields.clone());
        return;
    }
    root.insert("version".to_string(), stamped);
}
