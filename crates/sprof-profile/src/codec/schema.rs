//! Declarative section schemas
//!
//! Every section of a profile document is described once by a
//! [`SectionSchema`]: the list of keys it may hold, their kinds and whether
//! they are required. The same table drives presence checks, kind checks and
//! the unknown-key scan.

use serde_json::{Map, Value};

use crate::error::ParsingError;
use crate::path::FieldPath;

/// Kind of JSON value a field must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Object,
    Array,
    Boolean,
}

impl FieldKind {
    /// Whether `value` is of this kind
    #[inline]
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Boolean => value.is_boolean(),
        }
    }

    /// Phrase used in "must be ..." messages
    #[inline]
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Number => "a number",
            Self::Object => "an object",
            Self::Array => "an array",
            Self::Boolean => "a boolean",
        }
    }
}

/// One key of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    /// A key that must be present
    #[inline]
    #[must_use]
    pub const fn required(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: true,
        }
    }

    /// A key that may be absent
    #[inline]
    #[must_use]
    pub const fn optional(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: false,
        }
    }
}

/// Schema of one section; field order is the canonical encoding order
#[derive(Debug, Clone, Copy)]
pub struct SectionSchema {
    pub fields: &'static [FieldSpec],
}

impl SectionSchema {
    /// Create a schema from its field table
    #[inline]
    #[must_use]
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// Whether `key` is part of this schema
    #[inline]
    #[must_use]
    pub fn allows(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    /// Validate `value` against this schema
    ///
    /// Checks, in table order, that required keys are present and that every
    /// present key has the declared kind. Keys outside the table are reported
    /// on `diagnostics` and otherwise ignored.
    ///
    /// # Errors
    /// Returns the first fatal violation, naming `path` and the key
    pub fn validate<'a>(
        &self,
        value: &'a Value,
        path: &FieldPath,
        diagnostics: &mut Vec<ParsingError>,
    ) -> Result<Section<'a>, ParsingError> {
        let map = value
            .as_object()
            .ok_or_else(|| ParsingError::error(format!("'{path}' must be an object")))?;

        for field in self.fields {
            match map.get(field.key) {
                None if field.required => {
                    return Err(ParsingError::missing_field(path, field.key));
                }
                None => {}
                Some(v) if !field.kind.matches(v) => {
                    return Err(ParsingError::wrong_kind(
                        path,
                        field.key,
                        field.kind.description(),
                    ));
                }
                Some(_) => {}
            }
        }

        for key in map.keys().filter(|k| !self.allows(k)) {
            tracing::info!(target: "profile", "Key '{}' not supported in '{}'", key, path);
            diagnostics.push(ParsingError::info(format!(
                "Key '{key}' not supported in '{path}'"
            )));
        }

        Ok(Section {
            path: path.clone(),
            map,
        })
    }
}

/// A section object that passed [`SectionSchema::validate`]
///
/// Accessors re-check kinds so that extraction never panics, but after a
/// successful validation they only fail for constraints the schema table
/// cannot express (integers, array element kinds).
#[derive(Debug)]
pub struct Section<'a> {
    path: FieldPath,
    map: &'a Map<String, Value>,
}

impl<'a> Section<'a> {
    /// Path the section was validated under
    #[inline]
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Raw value of a key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    fn required<T>(&self, key: &str, value: Option<T>) -> Result<T, ParsingError> {
        value.ok_or_else(|| ParsingError::missing_field(&self.path, key))
    }

    fn kind_error(&self, key: &str, kind: FieldKind) -> ParsingError {
        ParsingError::wrong_kind(&self.path, key, kind.description())
    }

    pub fn opt_string(&self, key: &str) -> Result<Option<String>, ParsingError> {
        self.get(key)
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.kind_error(key, FieldKind::String))
            })
            .transpose()
    }

    pub fn string(&self, key: &str) -> Result<String, ParsingError> {
        let value = self.opt_string(key)?;
        self.required(key, value)
    }

    pub fn opt_number(&self, key: &str) -> Result<Option<f64>, ParsingError> {
        self.get(key)
            .map(|v| v.as_f64().ok_or_else(|| self.kind_error(key, FieldKind::Number)))
            .transpose()
    }

    pub fn number(&self, key: &str) -> Result<f64, ParsingError> {
        let value = self.opt_number(key)?;
        self.required(key, value)
    }

    /// A required number that must also be a non-negative integer
    pub fn unsigned(&self, key: &str) -> Result<u32, ParsingError> {
        let value = self.required(key, self.get(key))?;
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                ParsingError::wrong_kind(&self.path, key, "a non-negative integer")
            })
    }

    pub fn boolean(&self, key: &str) -> Result<bool, ParsingError> {
        let value = self
            .get(key)
            .map(|v| v.as_bool().ok_or_else(|| self.kind_error(key, FieldKind::Boolean)))
            .transpose()?;
        self.required(key, value)
    }

    /// Array elements of an optional array key; empty when absent
    pub fn array(&self, key: &str) -> Result<&'a [Value], ParsingError> {
        match self.get(key) {
            None => Ok(&[]),
            Some(v) => v
                .as_array()
                .map(Vec::as_slice)
                .ok_or_else(|| self.kind_error(key, FieldKind::Array)),
        }
    }

    pub fn string_list(&self, key: &str) -> Result<Vec<String>, ParsingError> {
        self.array(key)?
            .iter()
            .map(|v| {
                v.as_str().map(str::to_string).ok_or_else(|| {
                    ParsingError::wrong_kind(&self.path, key, "an array of strings")
                })
            })
            .collect()
    }

    pub fn number_list(&self, key: &str) -> Result<Vec<f64>, ParsingError> {
        self.array(key)?
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    ParsingError::wrong_kind(&self.path, key, "an array of numbers")
                })
            })
            .collect()
    }
}
