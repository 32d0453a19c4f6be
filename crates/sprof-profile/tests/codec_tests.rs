use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sprof_profile::{
    codec, Action, Camera, CameraGoToGeo, CameraNavState, Key, KeyModifiers, KeyWithModifier,
    Keybinding, Meta, Module, NamedKey, Profile, Property, SetType, Severity, Time, TimeType,
    Vec3, CURRENT_VERSION,
};
use sprof_test_utils::{sample_go_to_geo, sample_profile, PROFILE_V1_1};

#[test]
fn test_decode_full_document() {
    let (profile, report) = Profile::decode_with_report(PROFILE_V1_1).unwrap();

    assert!(report.diagnostics.is_empty());
    assert!(report.migrations.is_empty());
    assert_eq!(profile.version, CURRENT_VERSION);
    assert_eq!(profile.modules[0].name, "Globebrowsing");
    assert_eq!(profile.meta.as_ref().unwrap().license.as_deref(), Some("MIT"));
    assert_eq!(profile.assets, vec!["base"]);
    assert_eq!(profile.properties[0].set_type, SetType::SetValueSingle);
    assert_eq!(profile.actions[0].identifier, "profile.toggle.trails");
    assert_eq!(profile.keybindings[0].key.to_string(), "Shift+T");
    assert_eq!(profile.time.as_ref().unwrap().time_type, TimeType::Absolute);
    assert_eq!(profile.delta_times, vec![1.0, 60.0, 3600.0]);
    assert_eq!(profile.mark_nodes, vec!["Earth", "Moon"]);
    assert_eq!(profile.additional_scripts.len(), 1);

    match profile.camera.unwrap() {
        Camera::NavState(c) => {
            assert_eq!(c.anchor, "Earth");
            assert_eq!(c.reference_frame, "Root");
            assert_eq!(c.position, Vec3::new(1.0, 2.0, 3.0));
            assert_eq!(c.yaw, Some(0.5));
            assert!(c.up.is_none());
            assert!(c.pitch.is_none());
        }
        Camera::GoToGeo(_) => panic!("expected navigation state"),
    }
}

#[test]
fn test_sample_profile_round_trip() {
    let profile = sample_profile();
    let text = profile.serialize().unwrap();
    assert_eq!(Profile::decode(&text).unwrap(), profile);
}

#[test]
fn test_encode_is_canonical() {
    let text = sample_profile().serialize().unwrap();
    let again = Profile::decode(&text).unwrap().serialize().unwrap();
    assert_eq!(text, again);
}

#[test]
fn test_go_to_geo_round_trip() {
    let mut profile = Profile::new();
    profile.camera = Some(sample_go_to_geo().into());
    let text = profile.serialize().unwrap();
    assert!(text.contains("\"type\": \"goToGeo\""));
    assert_eq!(Profile::decode(&text).unwrap(), profile);
}

#[test]
fn test_unknown_fields_are_tolerated() {
    let text = r#"{
        "version": {"major": 1, "minor": 1},
        "meta": {"name": "x", "mood": "sunny"},
        "camera": {
            "type": "goToGeo", "anchor": "Earth", "latitude": 1, "longitude": 2, "zoom": 3
        }
    }"#;
    let (profile, report) = Profile::decode_with_report(text).unwrap();

    assert_eq!(profile.meta.unwrap().name.as_deref(), Some("x"));
    let messages: Vec<&str> = report.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Key 'mood' not supported in 'meta'",
            "Key 'zoom' not supported in 'camera'",
        ]
    );
    assert!(report.diagnostics.iter().all(|d| d.severity == Severity::Info));
}

#[test]
fn test_required_fields_are_rejected() {
    let err = Profile::decode(r#"{"assets": []}"#).unwrap_err();
    assert_eq!(err.message, "'profile.version' field is missing");

    let text = r#"{
        "version": {"major": 1, "minor": 1},
        "camera": {"type": "setNavigationState", "frame": "Root",
                   "position": {"x": 0, "y": 0, "z": 0}}
    }"#;
    let err = Profile::decode(text).unwrap_err();
    assert_eq!(err.message, "'camera.anchor' field is missing");
    assert_eq!(err.severity, Severity::Error);
}

#[test]
fn test_unknown_camera_type() {
    let text = r#"{
        "version": {"major": 1, "minor": 1},
        "camera": {"type": "flyTo", "anchor": "Earth"}
    }"#;
    let err = Profile::decode(text).unwrap_err();
    assert_eq!(err.message, "Unknown camera type");
}

#[test]
fn test_wrong_kinds_name_the_field() {
    let cases = [
        (r#"{"version": {"major": "1", "minor": 1}}"#, "'version.major' must be a number"),
        (r#"{"version": {"major": -1, "minor": 1}}"#, "'version.major' must be a non-negative integer"),
        (r#"{"version": {"major": 1, "minor": 1}, "assets": "base"}"#, "'profile.assets' must be an array"),
        (r#"{"version": {"major": 1, "minor": 1}, "meta": []}"#, "'profile.meta' must be an object"),
        (
            r#"{"version": {"major": 1, "minor": 1}, "actions": [{"identifier": "a", "documentation": "",
                "name": "", "gui_path": "/", "is_local": "yes", "script": ""}]}"#,
            "'action.is_local' must be a boolean",
        ),
        (
            r#"{"version": {"major": 1, "minor": 1}, "modules": [{"loadedInstruction": "a"}]}"#,
            "'module.name' field is missing",
        ),
    ];

    for (text, expected) in cases {
        let err = Profile::decode(text).unwrap_err();
        assert_eq!(err.message, expected, "decoding {text}");
    }
}

#[test]
fn test_dangling_keybinding_is_a_diagnostic() {
    let text = r#"{
        "version": {"major": 1, "minor": 1},
        "keybindings": [{"key": "F5", "action": "nowhere"}]
    }"#;
    let (profile, report) = Profile::decode_with_report(text).unwrap();
    assert_eq!(profile.keybindings.len(), 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].message,
        "Key binding 'F5' refers to unknown action 'nowhere'"
    );
}

#[test]
fn test_punctuation_key_bindings_decode() {
    let text = r#"{
        "version": {"major": 1, "minor": 1},
        "actions": [{"identifier": "zoom", "documentation": "", "name": "Zoom",
                     "gui_path": "/", "is_local": true, "script": ""}],
        "keybindings": [
            {"key": "-", "action": "zoom"},
            {"key": "Ctrl+=", "action": "zoom"}
        ]
    }"#;
    let profile = Profile::decode(text).unwrap();
    assert_eq!(
        profile.keybindings[0].key,
        KeyWithModifier::new(Key::Named(NamedKey::Minus))
    );
    assert_eq!(profile.keybindings[1].key.to_string(), "Ctrl+Equal");
}

#[test]
fn test_absent_optionals_are_not_written() {
    let mut profile = Profile::new();
    profile.modules.push(Module {
        name: "Globe".to_string(),
        loaded_instruction: None,
        not_loaded_instruction: None,
    });
    profile.camera = Some(
        CameraGoToGeo {
            anchor: "Earth".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            altitude: None,
        }
        .into(),
    );
    let text = codec::encode(&profile).unwrap();
    assert!(!text.contains("null"));
    assert!(!text.contains("Instruction"));
    assert!(!text.contains("altitude"));
}

fn number() -> impl Strategy<Value = f64> {
    // Binary fractions survive the text form exactly
    (-4_000_000i32..4_000_000).prop_map(|n| f64::from(n) / 8.0)
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._/()'\"-]{0,16}"
}

fn key() -> impl Strategy<Value = KeyWithModifier> {
    let key = prop_oneof![
        (b'A'..=b'Z').prop_map(|c| Key::Letter(char::from(c))),
        (0u8..=9).prop_map(Key::Digit),
        (1u8..=25).prop_map(Key::Function),
        (0u8..=9).prop_map(Key::Keypad),
        Just(Key::Named(NamedKey::Space)),
        Just(Key::Named(NamedKey::PageDown)),
        Just(Key::Named(NamedKey::GraveAccent)),
    ];
    (key, any::<[bool; 4]>()).prop_map(|(key, [shift, control, alt, super_key])| {
        KeyWithModifier::new(key).with_modifiers(KeyModifiers {
            shift,
            control,
            alt,
            super_key,
        })
    })
}

fn module() -> impl Strategy<Value = Module> {
    (text(), proptest::option::of(text()), proptest::option::of(text())).prop_map(
        |(name, loaded_instruction, not_loaded_instruction)| Module {
            name,
            loaded_instruction,
            not_loaded_instruction,
        },
    )
}

fn meta() -> impl Strategy<Value = Meta> {
    proptest::collection::vec(proptest::option::of(text()), 6).prop_map(|mut fields| Meta {
        license: fields.pop().flatten(),
        url: fields.pop().flatten(),
        author: fields.pop().flatten(),
        description: fields.pop().flatten(),
        version: fields.pop().flatten(),
        name: fields.pop().flatten(),
    })
}

fn property() -> impl Strategy<Value = Property> {
    (any::<bool>(), text(), text()).prop_map(|(single, name, value)| Property {
        set_type: if single {
            SetType::SetValueSingle
        } else {
            SetType::SetValue
        },
        name,
        value,
    })
}

fn action() -> impl Strategy<Value = Action> {
    (text(), text(), text(), text(), any::<bool>(), text()).prop_map(
        |(identifier, documentation, name, gui_path, is_local, script)| Action {
            identifier,
            documentation,
            name,
            gui_path,
            is_local,
            script,
        },
    )
}

fn time() -> impl Strategy<Value = Time> {
    (any::<bool>(), text()).prop_map(|(absolute, value)| {
        if absolute {
            Time::absolute(value)
        } else {
            Time::relative(value)
        }
    })
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (number(), number(), number()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn camera() -> impl Strategy<Value = Camera> {
    let nav_state = (
        text(),
        proptest::option::of(text()),
        text(),
        vec3(),
        proptest::option::of(vec3()),
        proptest::option::of(number()),
        proptest::option::of(number()),
    )
        .prop_map(|(anchor, aim, reference_frame, position, up, yaw, pitch)| {
            Camera::NavState(CameraNavState {
                anchor,
                aim,
                reference_frame,
                position,
                up,
                yaw,
                pitch,
            })
        });
    let go_to_geo = (text(), number(), number(), proptest::option::of(number())).prop_map(
        |(anchor, latitude, longitude, altitude)| {
            Camera::GoToGeo(CameraGoToGeo {
                anchor,
                latitude,
                longitude,
                altitude,
            })
        },
    );
    prop_oneof![nav_state, go_to_geo]
}

prop_compose! {
    fn profile()(
        modules in proptest::collection::vec(module(), 0..3),
        meta in proptest::option::of(meta()),
        assets in proptest::collection::vec(text(), 0..4),
        properties in proptest::collection::vec(property(), 0..4),
        actions in proptest::collection::vec(action(), 0..3),
        bindings in proptest::collection::vec((key(), text()), 0..3),
        time in proptest::option::of(time()),
        delta_times in proptest::collection::vec(number(), 0..5),
        camera in proptest::option::of(camera()),
        mark_nodes in proptest::collection::vec(text(), 0..3),
        additional_scripts in proptest::collection::vec(text(), 0..3),
    ) -> Profile {
        let mut profile = Profile::new();
        profile.modules = modules;
        profile.meta = meta;
        profile.assets = assets;
        profile.properties = properties;
        profile.actions = actions;
        profile.keybindings = bindings
            .into_iter()
            .map(|(key, action)| Keybinding { key, action })
            .collect();
        profile.time = time;
        profile.delta_times = delta_times;
        profile.camera = camera;
        profile.mark_nodes = mark_nodes;
        profile.additional_scripts = additional_scripts;
        profile
    }
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(profile in profile()) {
        let text = codec::encode(&profile).unwrap();
        let decoded = codec::decode(&text).unwrap();
        prop_assert_eq!(decoded, profile);
    }

    #[test]
    fn prop_key_text_round_trips(key in key()) {
        let parsed: KeyWithModifier = key.to_string().parse().unwrap();
        prop_assert_eq!(parsed, key);
    }
}
