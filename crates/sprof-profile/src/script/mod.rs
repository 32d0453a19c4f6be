//! Script generation
//!
//! Lowers a [`Profile`] into the initialization script fragments a scripting
//! host loads at start-up. Generation is a pure function of the profile: the
//! same profile always yields the same fragments, in [`SectionTag::ALL`]
//! order.
//!
//! # Layout
//!
//! Meta, assets and modules are top-level statements. Every other section is
//! wrapped in an `asset.onInitialize` callback so that it runs after all
//! required assets are loaded:
//!
//! ```text
//! asset.onInitialize(function()
//!   openspace.time.setTime("2020-02-29T01:23:45.00")
//! end)
//! ```

use crate::error::GenerateError;
use crate::profile::Profile;
use crate::types::{Camera, CameraGoToGeo, CameraNavState, SetType, TimeType, Vec3};

const ON_INITIALIZE_BEGIN: &str = "asset.onInitialize(function()\n";
const ON_INITIALIZE_END: &str = "end)\n";

/// Section a fragment was generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionTag {
    Meta,
    Assets,
    Modules,
    Actions,
    Keybindings,
    Time,
    DeltaTimes,
    MarkNodes,
    Properties,
    Camera,
    AdditionalScripts,
}

impl SectionTag {
    /// Every tag in generation order
    pub const ALL: [Self; 11] = [
        Self::Meta,
        Self::Assets,
        Self::Modules,
        Self::Actions,
        Self::Keybindings,
        Self::Time,
        Self::DeltaTimes,
        Self::MarkNodes,
        Self::Properties,
        Self::Camera,
        Self::AdditionalScripts,
    ];

    /// Section name used in separated fragment file names
    #[must_use]
    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::Meta => "_meta",
            Self::Assets => "_addedAssets",
            Self::Modules => "_modules",
            Self::Actions => "_actions",
            Self::Keybindings => "_keybinds",
            Self::Time => "_time",
            Self::DeltaTimes => "_deltaTimes",
            Self::MarkNodes => "_markNodes",
            Self::Properties => "_properties",
            Self::Camera => "_camera",
            Self::AdditionalScripts => "_addedScripts",
        }
    }

    /// Whether the fragment runs inside `asset.onInitialize`
    #[must_use]
    pub fn is_deferred(self) -> bool {
        !matches!(self, Self::Meta | Self::Assets | Self::Modules)
    }
}

/// One generated script fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub tag: SectionTag,
    pub text: String,
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Extension appended to separated fragment files, including the dot
    pub asset_extension: String,
}

impl GeneratorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With asset file extension
    #[inline]
    #[must_use]
    pub fn with_asset_extension(mut self, extension: impl Into<String>) -> Self {
        self.asset_extension = extension.into();
        self
    }

    /// File name for the fragment `tag` of a profile called `prefix`
    #[must_use]
    pub fn file_name(&self, prefix: &str, tag: SectionTag) -> String {
        separated_file_name(prefix, tag, &self.asset_extension)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            asset_extension: ".asset".to_string(),
        }
    }
}

/// `<prefix>_<suffix><extension>`
///
/// Suffixes carry their own leading underscore, so `("default", Meta,
/// ".asset")` gives `default__meta.asset`; existing separated outputs use
/// this layout.
#[must_use]
pub fn separated_file_name(prefix: &str, tag: SectionTag, extension: &str) -> String {
    format!("{prefix}_{}{extension}", tag.file_suffix())
}

/// Generate every fragment of `profile`, in [`SectionTag::ALL`] order
///
/// # Errors
/// [`GenerateError::MissingModuleInstruction`] if a module lacks either
/// instruction
pub fn generate(profile: &Profile) -> Result<Vec<Fragment>, GenerateError> {
    SectionTag::ALL
        .into_iter()
        .map(|tag| generate_section(profile, tag).map(|text| Fragment { tag, text }))
        .collect()
}

/// Generate the fragment of one section
///
/// # Errors
/// See [`generate`]
pub fn generate_section(profile: &Profile, tag: SectionTag) -> Result<String, GenerateError> {
    tracing::debug!(section = ?tag, "generating fragment");

    let body = match tag {
        SectionTag::Meta => meta(profile),
        SectionTag::Assets => assets(profile),
        SectionTag::Modules => modules(profile)?,
        SectionTag::Actions => actions(profile),
        SectionTag::Keybindings => keybindings(profile),
        SectionTag::Time => time(profile),
        SectionTag::DeltaTimes => delta_times(profile),
        SectionTag::MarkNodes => mark_nodes(profile),
        SectionTag::Properties => properties(profile),
        SectionTag::Camera => camera(profile),
        SectionTag::AdditionalScripts => additional_scripts(profile),
    };

    if tag.is_deferred() {
        Ok(format!("{ON_INITIALIZE_BEGIN}{body}{ON_INITIALIZE_END}"))
    } else {
        Ok(body)
    }
}

fn meta(profile: &Profile) -> String {
    let Some(meta) = &profile.meta else {
        return String::new();
    };

    let fields = [
        ("Name", &meta.name),
        ("Version", &meta.version),
        ("Description", &meta.description),
        ("Author", &meta.author),
        ("URL", &meta.url),
        ("License", &meta.license),
    ];

    let mut out = String::from("asset.meta = {\n");
    for (label, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!("  {label} = [[{value}]],\n"));
        }
    }
    out.push_str("}\n\n");
    out
}

fn assets(profile: &Profile) -> String {
    profile
        .assets
        .iter()
        .map(|asset| format!("asset.require(\"{asset}\");\n"))
        .collect()
}

fn modules(profile: &Profile) -> Result<String, GenerateError> {
    let mut out = String::new();
    for module in &profile.modules {
        let loaded = module.loaded_instruction.as_deref().ok_or_else(|| {
            GenerateError::missing_instruction(&module.name, "loadedInstruction")
        })?;
        let not_loaded = module.not_loaded_instruction.as_deref().ok_or_else(|| {
            GenerateError::missing_instruction(&module.name, "notLoadedInstruction")
        })?;
        out.push_str(&format!(
            "if openspace.modules.isLoaded(\"{}\") then {loaded} else {not_loaded} end\n",
            module.name
        ));
    }
    Ok(out)
}

fn actions(profile: &Profile) -> String {
    let mut out = String::new();
    for action in &profile.actions {
        let name = if action.name.is_empty() {
            &action.identifier
        } else {
            &action.name
        };
        out.push_str(&format!(
            "  openspace.action.registerAction({{Identifier=[[{}]], Command=[[{}]], Name=[[{}]], \
             Documentation=[[{}]], GuiPath=[[{}]], IsLocal={}}})\n",
            action.identifier,
            action.script,
            name,
            action.documentation,
            action.gui_path,
            action.is_local
        ));
    }
    out
}

fn keybindings(profile: &Profile) -> String {
    profile
        .keybindings
        .iter()
        .map(|k| format!("  openspace.bindKey([[{}]], [[{}]])\n", k.key, k.action))
        .collect()
}

fn time(profile: &Profile) -> String {
    let Some(time) = &profile.time else {
        return String::new();
    };

    match time.time_type {
        TimeType::Absolute => format!("  openspace.time.setTime(\"{}\")\n", time.value),
        TimeType::Relative => format!(
            "  local now = openspace.time.currentWallTime();\n  \
             local prev = openspace.time.advancedTime(now, \"{}\");\n  \
             openspace.time.setTime(prev);\n",
            time.value
        ),
    }
}

/// Always a single call, with an empty table when there are no steps
fn delta_times(profile: &Profile) -> String {
    let steps: String = profile
        .delta_times
        .iter()
        .map(|step| format!("{step}, "))
        .collect();
    format!("  openspace.time.setDeltaTimeSteps({{ {steps} }});\n")
}

fn mark_nodes(profile: &Profile) -> String {
    let nodes: String = profile
        .mark_nodes
        .iter()
        .map(|node| format!("[[{node}]],"))
        .collect();
    format!("  openspace.markInterestingNodes({{ {nodes} }});\n")
}

fn properties(profile: &Profile) -> String {
    let mut out = String::new();
    for property in &profile.properties {
        let function = match property.set_type {
            SetType::SetValue => "setPropertyValue",
            SetType::SetValueSingle => "setPropertyValueSingle",
        };
        out.push_str(&format!(
            "  openspace.{function}(\"{}\", {});\n",
            property.name, property.value
        ));
    }
    out
}

fn vec3(v: Vec3) -> String {
    format!("{{ {}, {}, {} }}", v.x, v.y, v.z)
}

fn camera(profile: &Profile) -> String {
    match &profile.camera {
        None => String::new(),
        Some(Camera::NavState(c)) => nav_state(c),
        Some(Camera::GoToGeo(c)) => go_to_geo(c),
    }
}

fn nav_state(c: &CameraNavState) -> String {
    let mut out = String::from("  openspace.navigation.setNavigationState({");
    out.push_str(&format!("Anchor = [[{}]], ", c.anchor));
    if let Some(aim) = &c.aim {
        out.push_str(&format!("Aim = [[{aim}]], "));
    }
    if !c.reference_frame.is_empty() {
        out.push_str(&format!("ReferenceFrame = [[{}]], ", c.reference_frame));
    }
    out.push_str(&format!("Position = {}, ", vec3(c.position)));
    if let Some(up) = c.up {
        out.push_str(&format!("Up = {}, ", vec3(up)));
    }
    if let Some(yaw) = c.yaw {
        out.push_str(&format!("Yaw = {yaw}, "));
    }
    if let Some(pitch) = c.pitch {
        out.push_str(&format!("Pitch = {pitch} "));
    }
    out.push_str("})\n");
    out
}

fn go_to_geo(c: &CameraGoToGeo) -> String {
    match c.altitude {
        Some(altitude) => format!(
            "  openspace.globebrowsing.goToGeo([[{}]], {}, {}, {altitude});\n",
            c.anchor, c.latitude, c.longitude
        ),
        None => format!(
            "  openspace.globebrowsing.goToGeo([[{}]], {}, {});\n",
            c.anchor, c.latitude, c.longitude
        ),
    }
}

fn additional_scripts(profile: &Profile) -> String {
    profile
        .additional_scripts
        .iter()
        .map(|script| format!("  {script}\n"))
        .collect()
}
