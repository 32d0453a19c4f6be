//! Section codecs
//!
//! One schema table plus a decode/encode pair per section. Encoders emit
//! keys in schema order and omit absent optional fields.

use serde_json::{json, Map, Value};

use super::schema::{FieldSpec, SectionSchema};
use crate::error::ParsingError;
use crate::key::KeyWithModifier;
use crate::path::FieldPath;
use crate::types::{
    Action, Camera, CameraGoToGeo, CameraNavState, Keybinding, Meta, Module, Property, SetType,
    Time, TimeType, Vec3,
};
use crate::version::Version;

use super::schema::FieldKind::{Array, Boolean, Number, Object, String as Str};

pub(crate) const PROFILE: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("version", Object),
    FieldSpec::optional("modules", Array),
    FieldSpec::optional("meta", Object),
    FieldSpec::optional("assets", Array),
    FieldSpec::optional("properties", Array),
    FieldSpec::optional("actions", Array),
    FieldSpec::optional("keybindings", Array),
    FieldSpec::optional("time", Object),
    FieldSpec::optional("delta_times", Array),
    FieldSpec::optional("camera", Object),
    FieldSpec::optional("mark_nodes", Array),
    FieldSpec::optional("additional_scripts", Array),
]);

const VERSION: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("major", Number),
    FieldSpec::required("minor", Number),
]);

const MODULE: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("name", Str),
    FieldSpec::optional("loadedInstruction", Str),
    FieldSpec::optional("notLoadedInstruction", Str),
]);

const META: SectionSchema = SectionSchema::new(&[
    FieldSpec::optional("name", Str),
    FieldSpec::optional("version", Str),
    FieldSpec::optional("description", Str),
    FieldSpec::optional("author", Str),
    FieldSpec::optional("url", Str),
    FieldSpec::optional("license", Str),
]);

const PROPERTY: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("type", Str),
    FieldSpec::required("name", Str),
    FieldSpec::required("value", Str),
]);

const ACTION: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("identifier", Str),
    FieldSpec::required("documentation", Str),
    FieldSpec::required("name", Str),
    FieldSpec::required("gui_path", Str),
    FieldSpec::required("is_local", Boolean),
    FieldSpec::required("script", Str),
]);

const KEYBINDING: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("key", Str),
    FieldSpec::required("action", Str),
]);

const TIME: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("type", Str),
    FieldSpec::required("value", Str),
]);

const CAMERA_NAV_STATE: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("type", Str),
    FieldSpec::required("anchor", Str),
    FieldSpec::optional("aim", Str),
    FieldSpec::required("frame", Str),
    FieldSpec::required("position", Object),
    FieldSpec::optional("up", Object),
    FieldSpec::optional("yaw", Number),
    FieldSpec::optional("pitch", Number),
]);

const CAMERA_GO_TO_GEO: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("type", Str),
    FieldSpec::required("anchor", Str),
    FieldSpec::required("latitude", Number),
    FieldSpec::required("longitude", Number),
    FieldSpec::optional("altitude", Number),
]);

const VEC3: SectionSchema = SectionSchema::new(&[
    FieldSpec::required("x", Number),
    FieldSpec::required("y", Number),
    FieldSpec::required("z", Number),
]);

impl SetType {
    const ALL: [Self; 2] = [Self::SetValue, Self::SetValueSingle];

    /// Name used in documents
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::SetValue => "setPropertyValue",
            Self::SetValueSingle => "setPropertyValueSingle",
        }
    }

    fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.wire_name() == name)
    }
}

impl TimeType {
    const ALL: [Self; 2] = [Self::Absolute, Self::Relative];

    /// Name used in documents
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Relative => "relative",
        }
    }

    fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.wire_name() == name)
    }
}

/// Insert `value` under `key` when present
fn put_opt<T: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

pub(crate) fn decode_version(
    value: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Version, ParsingError> {
    let section = VERSION.validate(value, &FieldPath::single("version"), diagnostics)?;
    Ok(Version::new(
        section.unsigned("major")?,
        section.unsigned("minor")?,
    ))
}

pub(crate) fn encode_version(version: Version) -> Value {
    json!({ "major": version.major, "minor": version.minor })
}

pub(crate) fn decode_module(
    value: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Module, ParsingError> {
    let section = MODULE.validate(value, &FieldPath::single("module"), diagnostics)?;
    Ok(Module {
        name: section.string("name")?,
        loaded_instruction: section.opt_string("loadedInstruction")?,
        not_loaded_instruction: section.opt_string("notLoadedInstruction")?,
    })
}

pub(crate) fn encode_module(module: &Module) -> Value {
    let mut map = Map::new();
    map.insert("name".to_string(), module.name.clone().into());
    put_opt(&mut map, "loadedInstruction", module.loaded_instruction.clone());
    put_opt(&mut map, "notLoadedInstruction", module.not_loaded_instruction.clone());
    Value::Object(map)
}

pub(crate) fn decode_meta(
    value: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Meta, ParsingError> {
    let section = META.validate(value, &FieldPath::single("meta"), diagnostics)?;
    Ok(Meta {
        name: section.opt_string("name")?,
        version: section.opt_string("version")?,
        description: section.opt_string("description")?,
        author: section.opt_string("author")?,
        url: section.opt_string("url")?,
        license: section.opt_string("license")?,
    })
}

pub(crate) fn encode_meta(meta: &Meta) -> Value {
    let mut map = Map::new();
    put_opt(&mut map, "name", meta.name.clone());
    put_opt(&mut map, "version", meta.version.clone());
    put_opt(&mut map, "description", meta.description.clone());
    put_opt(&mut map, "author", meta.author.clone());
    put_opt(&mut map, "url", meta.url.clone());
    put_opt(&mut map, "license", meta.license.clone());
    Value::Object(map)
}

pub(crate) fn decode_property(
    value: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Property, ParsingError> {
    let section = PROPERTY.validate(value, &FieldPath::single("property"), diagnostics)?;
    let set_type = SetType::from_wire(&section.string("type")?)
        .ok_or_else(|| ParsingError::error("Unknown property set type"))?;
    Ok(Property {
        set_type,
        name: section.string("name")?,
        value: section.string("value")?,
    })
}

pub(crate) fn encode_property(property: &Property) -> Value {
    json!({
        "type": property.set_type.wire_name(),
        "name": property.name,
        "value": property.value,
    })
}

pub(crate) fn decode_action(
    value: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Action, ParsingError> {
    let section = ACTION.validate(value, &FieldPath::single("action"), diagnostics)?;
    Ok(Action {
        identifier: section.string("identifier")?,
        documentation: section.string("documentation")?,
        name: section.string("name")?,
        gui_path: section.string("gui_path")?,
        is_local: section.boolean("is_local")?,
        script: section.string("script")?,
    })
}

pub(crate) fn encode_action(action: &Action) -> Value {
    json!({
        "identifier": action.identifier,
        "documentation": action.documentation,
        "name": action.name,
        "gui_path": action.gui_path,
        "is_local": action.is_local,
        "script": action.script,
    })
}

/// Parse a key text found under `<path>.key`
pub(crate) fn parse_key(text: &str, path: &FieldPath) -> Result<KeyWithModifier, ParsingError> {
    text.parse()
        .map_err(|e| ParsingError::error(format!("'{path}.key' is not a valid key: {e}")))
}

pub(crate) fn decode_keybinding(
    value: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Keybinding, ParsingError> {
    let section = KEYBINDING.validate(value, &FieldPath::single("keybinding"), diagnostics)?;
    Ok(Keybinding {
        key: parse_key(&section.string("key")?, section.path())?,
        action: section.string("action")?,
    })
}

pub(crate) fn encode_keybinding(keybinding: &Keybinding) -> Value {
    json!({
        "key": keybinding.key.to_string(),
        "action": keybinding.action,
    })
}

pub(crate) fn decode_time(
    value: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Time, ParsingError> {
    let section = TIME.validate(value, &FieldPath::single("time"), diagnostics)?;
    let time_type = TimeType::from_wire(&section.string("type")?)
        .ok_or_else(|| ParsingError::error("Unknown time type"))?;
    Ok(Time {
        time_type,
        value: section.string("value")?,
    })
}

pub(crate) fn encode_time(time: &Time) -> Value {
    json!({
        "type": time.time_type.wire_name(),
        "value": time.value,
    })
}

fn decode_vec3(
    value: &Value,
    path: &FieldPath,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Vec3, ParsingError> {
    let section = VEC3.validate(value, path, diagnostics)?;
    Ok(Vec3::new(
        section.number("x")?,
        section.number("y")?,
        section.number("z")?,
    ))
}

fn encode_vec3(v: Vec3) -> Value {
    json!({ "x": v.x, "y": v.y, "z": v.z })
}

/// Decode a camera, dispatching on its `type` discriminator
pub(crate) fn decode_camera(
    value: &Value,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<Camera, ParsingError> {
    let path = FieldPath::single("camera");
    let discriminator = match value.get("type") {
        None => return Err(ParsingError::missing_field(&path, "type")),
        Some(v) => v
            .as_str()
            .ok_or_else(|| ParsingError::wrong_kind(&path, "type", Str.description()))?,
    };

    if discriminator == CameraNavState::TYPE {
        decode_camera_nav_state(value, &path, diagnostics).map(Camera::NavState)
    } else if discriminator == CameraGoToGeo::TYPE {
        decode_camera_go_to_geo(value, &path, diagnostics).map(Camera::GoToGeo)
    } else {
        Err(ParsingError::error("Unknown camera type"))
    }
}

fn decode_camera_nav_state(
    value: &Value,
    path: &FieldPath,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<CameraNavState, ParsingError> {
    let section = CAMERA_NAV_STATE.validate(value, path, diagnostics)?;

    let position = section
        .get("position")
        .ok_or_else(|| ParsingError::missing_field(path, "position"))?;
    let position = decode_vec3(position, &path.child("position"), diagnostics)?;
    let up = section
        .get("up")
        .map(|up| decode_vec3(up, &path.child("up"), diagnostics))
        .transpose()?;

    Ok(CameraNavState {
        anchor: section.string("anchor")?,
        aim: section.opt_string("aim")?,
        reference_frame: section.string("frame")?,
        position,
        up,
        yaw: section.opt_number("yaw")?,
        pitch: section.opt_number("pitch")?,
    })
}

fn decode_camera_go_to_geo(
    value: &Value,
    path: &FieldPath,
    diagnostics: &mut Vec<ParsingError>,
) -> Result<CameraGoToGeo, ParsingError> {
    let section = CAMERA_GO_TO_GEO.validate(value, path, diagnostics)?;
    Ok(CameraGoToGeo {
        anchor: section.string("anchor")?,
        latitude: section.number("latitude")?,
        longitude: section.number("longitude")?,
        altitude: section.opt_number("altitude")?,
    })
}

pub(crate) fn encode_camera(camera: &Camera) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), camera.type_name().into());
    match camera {
        Camera::NavState(c) => {
            map.insert("anchor".to_string(), c.anchor.clone().into());
            put_opt(&mut map, "aim", c.aim.clone());
            map.insert("frame".to_string(), c.reference_frame.clone().into());
            map.insert("position".to_string(), encode_vec3(c.position));
            put_opt(&mut map, "up", c.up.map(encode_vec3));
            put_opt(&mut map, "yaw", c.yaw);
            put_opt(&mut map, "pitch", c.pitch);
        }
        Camera::GoToGeo(c) => {
            map.insert("anchor".to_string(), c.anchor.clone().into());
            map.insert("latitude".to_string(), c.latitude.into());
            map.insert("longitude".to_string(), c.longitude.into());
            put_opt(&mut map, "altitude", c.altitude);
        }
    }
    Value::Object(map)
}
