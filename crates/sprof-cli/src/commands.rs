//! Subcommand implementations

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sprof_profile::{codec, script, DecodeReport, GeneratorConfig, ParsingError, Profile};

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn decode(path: &Path) -> Result<(Profile, DecodeReport)> {
    let text = read(path)?;
    codec::decode_with_report(&text).with_context(|| format!("invalid profile {}", path.display()))
}

/// Canonical text of a profile file, newline-terminated
fn canonical(profile: &Profile) -> Result<String> {
    let mut text = profile.serialize()?;
    text.push('\n');
    Ok(text)
}

#[derive(Serialize)]
struct ValidationSummary<'a> {
    valid: bool,
    error: Option<&'a ParsingError>,
    #[serde(flatten)]
    report: Option<&'a DecodeReport>,
}

/// Decode `path` and report diagnostics
///
/// # Returns
/// Whether the document is valid
///
/// # Errors
/// Returns error if the file cannot be read or `out` cannot be written
pub fn validate(path: &Path, json: bool, out: &mut impl Write) -> Result<bool> {
    let text = read(path)?;
    let result = codec::decode_with_report(&text);

    let (report, error) = match &result {
        Ok((_, report)) => (Some(report), None),
        Err(err) => (None, Some(err)),
    };

    if json {
        let summary = ValidationSummary {
            valid: error.is_none(),
            error,
            report,
        };
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        if let Some(report) = report {
            for migration in &report.migrations {
                writeln!(out, "migrated {} -> {}", migration.from, migration.to)?;
            }
            for diagnostic in &report.diagnostics {
                writeln!(out, "info: {diagnostic}")?;
            }
        }
        match error {
            Some(err) => writeln!(out, "error: {err}")?,
            None => writeln!(out, "{}: ok", path.display())?,
        }
    }

    Ok(error.is_none())
}

/// Decode `path`, migrating it, and write it back at the current version
///
/// Writes to `output` when given, to `out` otherwise.
///
/// # Errors
/// Returns error if the profile is invalid or a file cannot be accessed
pub fn migrate(path: &Path, output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let (profile, report) = decode(path)?;
    for migration in &report.migrations {
        tracing::info!(from = %migration.from, to = %migration.to, "migrated {}", path.display());
    }

    let text = canonical(&profile)?;
    match output {
        Some(output) => fs::write(output, text)
            .with_context(|| format!("failed to write {}", output.display()))?,
        None => out.write_all(text.as_bytes())?,
    }
    Ok(())
}

/// Rewrite `path` in canonical form
///
/// With `check`, the file is left untouched.
///
/// # Returns
/// Whether the file was already canonical
///
/// # Errors
/// Returns error if the profile is invalid or the file cannot be accessed
pub fn fmt(path: &Path, check: bool) -> Result<bool> {
    let original = read(path)?;
    let (profile, _) = codec::decode_with_report(&original)
        .with_context(|| format!("invalid profile {}", path.display()))?;

    let text = canonical(&profile)?;
    let is_canonical = text == original;
    if !is_canonical && !check {
        fs::write(path, &text).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(is_canonical)
}

/// Write one fragment file per section into `output_dir`
///
/// Files are named `<prefix>_<suffix><extension>`; `prefix` defaults to the
/// profile's file stem.
///
/// # Returns
/// The written files, in section order
///
/// # Errors
/// Returns error if the profile is invalid, cannot be lowered, or a file
/// cannot be written
pub fn generate(
    path: &Path,
    prefix: Option<&str>,
    output_dir: &Path,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>> {
    let (profile, _) = decode(path)?;

    let prefix = match prefix {
        Some(prefix) => prefix.to_string(),
        None => match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => bail!("cannot derive a prefix from {}", path.display()),
        },
    };

    let fragments = script::generate(&profile)
        .with_context(|| format!("cannot generate scripts for {}", path.display()))?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let file = output_dir.join(config.file_name(&prefix, fragment.tag));
        fs::write(&file, &fragment.text)
            .with_context(|| format!("failed to write {}", file.display()))?;
        tracing::debug!(file = %file.display(), "wrote fragment");
        written.push(file);
    }
    Ok(written)
}
