//! Profile section types
//!
//! In-memory representation of every section of a profile document. These
//! types carry no behaviour beyond construction helpers; validation lives in
//! [`crate::codec`] and lowering to scripts in [`crate::script`].

use crate::key::KeyWithModifier;

/// A module the session expects, with instructions for both outcomes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    /// Module name as reported by the host
    pub name: String,
    /// Statement run when the module is loaded
    pub loaded_instruction: Option<String>,
    /// Statement run when the module is not loaded
    pub not_loaded_instruction: Option<String>,
}

/// Descriptive information about the profile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Meta {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub license: Option<String>,
}

/// Which host call a property override uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetType {
    /// May match several properties (identifier can contain wildcards)
    SetValue,
    /// Addresses exactly one property
    SetValueSingle,
}

/// A property override applied at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub set_type: SetType,
    /// Fully-qualified property identifier
    pub name: String,
    /// Value as a script literal, inserted verbatim
    pub value: String,
}

impl Property {
    /// Override addressing exactly one property
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            set_type: SetType::SetValueSingle,
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named, documented script that key bindings can trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Stable key referenced by [`Keybinding::action`]
    pub identifier: String,
    pub documentation: String,
    /// Display name; the identifier is used when empty
    pub name: String,
    pub gui_path: String,
    /// Whether the script runs only on this node of a cluster
    pub is_local: bool,
    pub script: String,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            identifier: String::new(),
            documentation: String::new(),
            name: String::new(),
            gui_path: "/".to_string(),
            is_local: true,
            script: String::new(),
        }
    }
}

/// Binds a key to an action identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: KeyWithModifier,
    /// Identifier of an [`Action`]; not checked on decode
    pub action: String,
}

/// How [`Time::value`] is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeType {
    /// A date-time string
    Absolute,
    /// An offset from the wall-clock time at start-up, e.g. `-1d`
    Relative,
}

/// Simulation time at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Time {
    pub time_type: TimeType,
    pub value: String,
}

impl Time {
    /// Absolute start time
    pub fn absolute(value: impl Into<String>) -> Self {
        Self {
            time_type: TimeType::Absolute,
            value: value.into(),
        }
    }

    /// Start time relative to the wall clock
    pub fn relative(value: impl Into<String>) -> Self {
        Self {
            time_type: TimeType::Relative,
            value: value.into(),
        }
    }
}

/// Three doubles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Camera given as a full navigation state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraNavState {
    pub anchor: String,
    pub aim: Option<String>,
    pub reference_frame: String,
    pub position: Vec3,
    pub up: Option<Vec3>,
    pub yaw: Option<f64>,
    pub pitch: Option<f64>,
}

impl CameraNavState {
    /// Discriminator value on the wire
    pub const TYPE: &'static str = "setNavigationState";
}

/// Camera given as a geographic position over a globe
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraGoToGeo {
    pub anchor: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

impl CameraGoToGeo {
    /// Discriminator value on the wire
    pub const TYPE: &'static str = "goToGeo";
}

/// Initial camera placement; exactly one form
#[derive(Debug, Clone, PartialEq)]
pub enum Camera {
    NavState(CameraNavState),
    GoToGeo(CameraGoToGeo),
}

impl Camera {
    /// Discriminator value of the held variant
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::NavState(_) => CameraNavState::TYPE,
            Self::GoToGeo(_) => CameraGoToGeo::TYPE,
        }
    }
}

impl From<CameraNavState> for Camera {
    fn from(camera: CameraNavState) -> Self {
        Self::NavState(camera)
    }
}

impl From<CameraGoToGeo> for Camera {
    fn from(camera: CameraGoToGeo) -> Self {
        Self::GoToGeo(camera)
    }
}
