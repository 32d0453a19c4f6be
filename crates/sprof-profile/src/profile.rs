//! Profile aggregate
//!
//! [`Profile`] is the root of a session profile: every section of the
//! document plus the operations that mutate it in memory.

use std::collections::HashSet;

use crate::codec::{self, DecodeReport};
use crate::error::{ParsingError, ProfileError, SerializeError};
use crate::live::{self, PropertyOwner};
use crate::types::{
    Action, Camera, CameraNavState, Keybinding, Meta, Module, Property, SetType, Time, Vec3,
};
use crate::version::{Version, CURRENT_VERSION};

/// A complete session profile
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub version: Version,
    pub modules: Vec<Module>,
    pub meta: Option<Meta>,
    /// Ordered, without duplicates
    pub assets: Vec<String>,
    pub properties: Vec<Property>,
    pub actions: Vec<Action>,
    pub keybindings: Vec<Keybinding>,
    pub time: Option<Time>,
    pub delta_times: Vec<f64>,
    pub camera: Option<Camera>,
    pub mark_nodes: Vec<String>,
    pub additional_scripts: Vec<String>,
    /// Turns [`add_asset`](Self::add_asset) and
    /// [`remove_asset`](Self::remove_asset) into no-ops; never persisted
    pub ignore_updates: bool,
}

impl Profile {
    /// Empty profile at the current version
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a profile document, migrating it if needed
    ///
    /// # Errors
    /// See [`codec::decode`]
    pub fn decode(text: &str) -> Result<Self, ParsingError> {
        codec::decode(text)
    }

    /// Decode a profile document, keeping the diagnostics
    ///
    /// # Errors
    /// See [`codec::decode`]
    pub fn decode_with_report(text: &str) -> Result<(Self, DecodeReport), ParsingError> {
        codec::decode_with_report(text)
    }

    /// Canonical document text
    ///
    /// # Errors
    /// See [`codec::encode`]
    pub fn serialize(&self) -> Result<String, SerializeError> {
        codec::encode(self)
    }

    /// Append `path` to the assets unless it is already listed
    pub fn add_asset(&mut self, path: impl Into<String>) {
        if self.ignore_updates {
            return;
        }

        let path = path.into();
        if !self.assets.contains(&path) {
            self.assets.push(path);
        }
    }

    /// Remove `path` from the assets
    ///
    /// # Errors
    /// [`ProfileError::AssetNotFound`] if `path` is not listed; the profile
    /// is left unchanged
    pub fn remove_asset(&mut self, path: &str) -> Result<(), ProfileError> {
        if self.ignore_updates {
            return Ok(());
        }

        let index = self
            .assets
            .iter()
            .position(|a| a == path)
            .ok_or_else(|| ProfileError::AssetNotFound(path.to_string()))?;
        self.assets.remove(index);
        Ok(())
    }

    /// Record the state of a running session
    ///
    /// Every changed property under `root` is appended as a single-value
    /// override, sub-owners before the owner's own properties. Time, delta
    /// time steps and camera are replaced from `context`, and the version is
    /// set to [`CURRENT_VERSION`].
    pub fn capture_live_state(&mut self, root: &dyn PropertyOwner, context: CaptureContext) {
        self.version = CURRENT_VERSION;

        let changed = live::changed_properties(root);
        tracing::debug!(count = changed.len(), "capturing changed properties");
        self.properties
            .extend(changed.into_iter().map(|p| Property {
                set_type: SetType::SetValueSingle,
                name: p.fully_qualified_identifier(),
                value: p.string_value(),
            }));

        self.time = Some(Time::absolute(context.current_time));
        self.delta_times = context.delta_time_steps;
        self.camera = Some(Camera::NavState(context.navigation_state.into()));
    }

    /// Key bindings whose action is not defined in this profile
    #[must_use]
    pub fn dangling_keybindings(&self) -> Vec<&Keybinding> {
        let known: HashSet<&str> = self.actions.iter().map(|a| a.identifier.as_str()).collect();
        self.keybindings
            .iter()
            .filter(|k| !known.contains(k.action.as_str()))
            .collect()
    }
}

/// Camera pose of a running session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationState {
    pub anchor: String,
    pub aim: Option<String>,
    pub reference_frame: String,
    pub position: Vec3,
    pub up: Option<Vec3>,
    pub yaw: f64,
    pub pitch: f64,
}

impl From<NavigationState> for CameraNavState {
    fn from(state: NavigationState) -> Self {
        Self {
            anchor: state.anchor,
            aim: state.aim,
            reference_frame: state.reference_frame,
            position: state.position,
            up: state.up,
            yaw: Some(state.yaw),
            pitch: Some(state.pitch),
        }
    }
}

/// Session state read by [`Profile::capture_live_state`] besides the
/// property tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureContext {
    /// Current simulation time as a date-time string
    pub current_time: String,
    /// Delta time steps configured in the session
    pub delta_time_steps: Vec<f64>,
    pub navigation_state: NavigationState,
}

impl CaptureContext {
    /// Context at `current_time` with no delta steps and a default camera
    #[must_use]
    pub fn new(current_time: impl Into<String>) -> Self {
        Self {
            current_time: current_time.into(),
            ..Self::default()
        }
    }

    /// With delta time steps
    #[inline]
    #[must_use]
    pub fn with_delta_time_steps(mut self, steps: Vec<f64>) -> Self {
        self.delta_time_steps = steps;
        self
    }

    /// With camera pose
    #[inline]
    #[must_use]
    pub fn with_navigation_state(mut self, state: NavigationState) -> Self {
        self.navigation_state = state;
        self
    }
}
