use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use sprof_cli::{commands, CliConfig};
use sprof_profile::{GeneratorConfig, Profile, SectionTag, CURRENT_VERSION};
use sprof_test_utils::{PROFILE_V1_0, PROFILE_V1_1};
use tempfile::TempDir;

fn write_profile(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_validate_reports_diagnostics() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(
        &dir,
        "extra.profile",
        r#"{"version": {"major": 1, "minor": 1}, "colour": "red"}"#,
    );

    let mut out = Vec::new();
    assert!(commands::validate(&path, false, &mut out).unwrap());
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("info: Key 'colour' not supported in 'profile'"));
    assert!(out.ends_with(": ok\n"));
}

#[test]
fn test_validate_invalid_profile() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "bad.profile", r#"{"assets": []}"#);

    let mut out = Vec::new();
    assert!(!commands::validate(&path, false, &mut out).unwrap());
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "error: 'profile.version' field is missing\n"
    );
}

#[test]
fn test_validate_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "old.profile", PROFILE_V1_0);

    let mut out = Vec::new();
    assert!(commands::validate(&path, true, &mut out).unwrap());
    let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(summary["valid"], true);
    assert_eq!(summary["migrations"][0]["from"], serde_json::json!({"major": 1, "minor": 0}));
}

#[test]
fn test_validate_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.profile");
    assert!(commands::validate(&missing, false, &mut Vec::new()).is_err());
}

#[test]
fn test_migrate_to_stdout_and_file() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "old.profile", PROFILE_V1_0);

    let mut out = Vec::new();
    commands::migrate(&path, None, &mut out).unwrap();
    let migrated = Profile::decode(std::str::from_utf8(&out).unwrap()).unwrap();
    assert_eq!(migrated.version, CURRENT_VERSION);
    assert_eq!(migrated.actions.len(), 2);

    let output = dir.path().join("new.profile");
    commands::migrate(&path, Some(&output), &mut Vec::new()).unwrap();
    assert_eq!(fs::read(&output).unwrap(), out);
}

#[test]
fn test_fmt_check_and_rewrite() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "messy.profile", PROFILE_V1_1);

    assert!(!commands::fmt(&path, true).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), PROFILE_V1_1);

    assert!(!commands::fmt(&path, false).unwrap());
    assert!(commands::fmt(&path, true).unwrap());

    let formatted = Profile::decode(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(formatted, Profile::decode(PROFILE_V1_1).unwrap());
}

#[test]
fn test_generate_writes_one_file_per_section() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "default.profile", PROFILE_V1_1);
    let output_dir = dir.path().join("out");

    let written =
        commands::generate(&path, None, &output_dir, &GeneratorConfig::default()).unwrap();
    assert_eq!(written.len(), SectionTag::ALL.len());
    assert_eq!(written[0], output_dir.join("default__meta.asset"));

    let time = fs::read_to_string(output_dir.join("default__time.asset")).unwrap();
    assert!(time.contains("openspace.time.setTime(\"2020-02-29T01:23:45.00\")"));
}

#[test]
fn test_generate_uses_configured_extension_and_prefix() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(&dir, "default.profile", PROFILE_V1_1);
    let config = CliConfig::from_toml("[generate]\nasset_extension = \".lua\"\n").unwrap();

    let written = commands::generate(
        &path,
        Some("custom"),
        dir.path(),
        &config.generator_config(),
    )
    .unwrap();
    assert!(written.contains(&dir.path().join("custom__camera.lua")));
}

#[test]
fn test_generate_missing_module_instruction_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_profile(
        &dir,
        "modules.profile",
        r#"{"version": {"major": 1, "minor": 1}, "modules": [{"name": "Globe"}]}"#,
    );
    let err = commands::generate(&path, None, dir.path(), &GeneratorConfig::default())
        .unwrap_err();
    assert!(format!("{err:#}").contains("module 'Globe' has no loadedInstruction"));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sprof.toml");
    fs::write(&path, "[log]\nlevel = \"debug\"\n\n[generate]\noutput_dir = \"build\"\n").unwrap();

    let config = CliConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.generate.output_dir, Some(PathBuf::from("build")));
    assert_eq!(config.generate.asset_extension, ".asset");

    assert_eq!(CliConfig::load_or_default(None).unwrap(), CliConfig::default());
}
