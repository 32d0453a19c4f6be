//! Testing utilities for the sprof workspace
//!
//! Shared sample documents, profile builders and an in-memory live property
//! graph.

#![allow(missing_docs)]

use sprof_profile::{
    Action, Camera, CameraGoToGeo, CameraNavState, Keybinding, KeyWithModifier, LiveProperty,
    Meta, Module, NavigationState, Profile, Property, PropertyOwner, SetType, Time, Vec3,
};

/// A 1.0 document with two legacy key bindings
pub const PROFILE_V1_0: &str = r#"{
  "version": { "major": 1, "minor": 0 },
  "assets": ["base", "scene/solarsystem/planets/earth/earth"],
  "keybindings": [
    {
      "key": "F1",
      "documentation": "Toggle the shutdown screen",
      "name": "Toggle shutdown",
      "gui_path": "/System",
      "is_local": false,
      "script": "openspace.toggleShutdown()"
    },
    {
      "key": "Ctrl+R",
      "documentation": "Reset the camera",
      "name": "Reset",
      "gui_path": "/Navigation",
      "is_local": true,
      "script": "openspace.navigation.resetCamera()"
    }
  ],
  "time": { "type": "relative", "value": "-1d" }
}"#;

/// A current-version document touching every section
pub const PROFILE_V1_1: &str = r#"{
  "version": { "major": 1, "minor": 1 },
  "modules": [
    {
      "name": "Globebrowsing",
      "loadedInstruction": "openspace.printInfo('globes')",
      "notLoadedInstruction": "openspace.printFatal('no globes')"
    }
  ],
  "meta": {
    "name": "Default",
    "version": "1.0",
    "description": "Default profile",
    "author": "Sprof",
    "url": "https://example.org",
    "license": "MIT"
  },
  "assets": ["base"],
  "properties": [
    { "type": "setPropertyValueSingle", "name": "Scene.Earth.Scale", "value": "2.0" }
  ],
  "actions": [
    {
      "identifier": "profile.toggle.trails",
      "documentation": "Toggle trails",
      "name": "Trails",
      "gui_path": "/Rendering",
      "is_local": false,
      "script": "openspace.toggleTrails()"
    }
  ],
  "keybindings": [
    { "key": "Shift+T", "action": "profile.toggle.trails" }
  ],
  "time": { "type": "absolute", "value": "2020-02-29T01:23:45.00" },
  "delta_times": [1, 60, 3600],
  "camera": {
    "type": "setNavigationState",
    "anchor": "Earth",
    "frame": "Root",
    "position": { "x": 1.0, "y": 2.0, "z": 3.0 },
    "yaw": 0.5
  },
  "mark_nodes": ["Earth", "Moon"],
  "additional_scripts": ["openspace.printInfo('ready')"]
}"#;

pub fn sample_action(identifier: &str) -> Action {
    Action {
        identifier: identifier.to_string(),
        documentation: format!("Runs {identifier}"),
        name: identifier.to_string(),
        gui_path: "/Test".to_string(),
        is_local: false,
        script: format!("run('{identifier}')"),
    }
}

pub fn sample_keybinding(key: &str, action: &str) -> Keybinding {
    Keybinding {
        key: key.parse::<KeyWithModifier>().unwrap(),
        action: action.to_string(),
    }
}

pub fn sample_nav_state() -> CameraNavState {
    CameraNavState {
        anchor: "Earth".to_string(),
        aim: Some("Moon".to_string()),
        reference_frame: "Root".to_string(),
        position: Vec3::new(1.0e7, -2.5e6, 3.0),
        up: Some(Vec3::new(0.0, 0.0, 1.0)),
        yaw: Some(0.25),
        pitch: None,
    }
}

pub fn sample_go_to_geo() -> CameraGoToGeo {
    CameraGoToGeo {
        anchor: "Mars".to_string(),
        latitude: 18.5,
        longitude: 77.5,
        altitude: Some(2.0e6),
    }
}

/// A profile with every section populated
pub fn sample_profile() -> Profile {
    let mut profile = Profile::new();
    profile.modules.push(Module {
        name: "Globebrowsing".to_string(),
        loaded_instruction: Some("a()".to_string()),
        not_loaded_instruction: Some("b()".to_string()),
    });
    profile.meta = Some(Meta {
        name: Some("Sample".to_string()),
        author: Some("Tests".to_string()),
        ..Meta::default()
    });
    profile.add_asset("base");
    profile.add_asset("scene/earth");
    profile.properties.push(Property::single("Scene.Earth.Scale", "2.0"));
    profile.properties.push(Property {
        set_type: SetType::SetValue,
        name: "Scene.*.Enabled".to_string(),
        value: "true".to_string(),
    });
    profile.actions.push(sample_action("profile.test.a"));
    profile
        .keybindings
        .push(sample_keybinding("Ctrl+A", "profile.test.a"));
    profile.time = Some(Time::relative("-1d"));
    profile.delta_times = vec![1.0, 2.5, 60.0];
    profile.camera = Some(Camera::NavState(sample_nav_state()));
    profile.mark_nodes = vec!["Earth".to_string()];
    profile.additional_scripts = vec!["print('hi')".to_string()];
    profile
}

/// In-memory live property
#[derive(Debug, Clone)]
pub struct TestProperty {
    pub identifier: String,
    pub value: String,
    pub changed: bool,
}

impl TestProperty {
    pub fn changed(identifier: &str, value: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            value: value.to_string(),
            changed: true,
        }
    }

    pub fn unchanged(identifier: &str, value: &str) -> Self {
        Self {
            changed: false,
            ..Self::changed(identifier, value)
        }
    }
}

impl LiveProperty for TestProperty {
    fn fully_qualified_identifier(&self) -> String {
        self.identifier.clone()
    }

    fn has_changed(&self) -> bool {
        self.changed
    }

    fn string_value(&self) -> String {
        self.value.clone()
    }
}

/// In-memory live property owner
#[derive(Debug, Clone, Default)]
pub struct TestOwner {
    pub properties: Vec<TestProperty>,
    pub sub_owners: Vec<TestOwner>,
}

impl TestOwner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, property: TestProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_sub_owner(mut self, owner: TestOwner) -> Self {
        self.sub_owners.push(owner);
        self
    }
}

impl PropertyOwner for TestOwner {
    fn sub_owners(&self) -> Vec<&dyn PropertyOwner> {
        self.sub_owners
            .iter()
            .map(|o| o as &dyn PropertyOwner)
            .collect()
    }

    fn properties(&self) -> Vec<&dyn LiveProperty> {
        self.properties
            .iter()
            .map(|p| p as &dyn LiveProperty)
            .collect()
    }
}

pub fn sample_navigation_state() -> NavigationState {
    NavigationState {
        anchor: "Earth".to_string(),
        aim: None,
        reference_frame: "Root".to_string(),
        position: Vec3::new(7.0e6, 0.0, 0.0),
        up: Some(Vec3::new(0.0, 0.0, 1.0)),
        yaw: 0.0,
        pitch: 0.1,
    }
}
