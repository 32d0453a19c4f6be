//! Session profiles
//!
//! A profile is a versioned, human-editable JSON document describing the
//! complete configuration of a visualization session: modules, assets,
//! property overrides, actions, key bindings, time, camera and free-form
//! start-up scripts.
//!
//! # Core Concepts
//!
//! - [`Profile`]: The in-memory document and its mutation operations
//! - [`codec`]: Validating decoder and canonical encoder
//! - [`MigrationRegistry`]: Forward-only upgrades of older documents
//! - [`script`]: Lowering a profile into initialization script fragments
//! - [`live`]: Traits through which a running session is captured
//!
//! # Example
//!
//! ```rust,ignore
//! use sprof_profile::{script, Profile};
//!
//! let (profile, report) = Profile::decode_with_report(&text)?;
//! for diagnostic in &report.diagnostics {
//!     println!("{diagnostic}");
//! }
//!
//! for fragment in script::generate(&profile)? {
//!     print!("{}", fragment.text);
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod codec;
pub mod error;
pub mod key;
pub mod live;
pub mod migration;
pub mod path;
pub mod profile;
pub mod script;
pub mod types;
pub mod version;

// Re-exports
pub use codec::{decode, decode_with_report, encode, DecodeReport};
pub use error::{GenerateError, ParsingError, ProfileError, SerializeError, Severity};
pub use key::{Key, KeyModifiers, KeyParseError, KeyWithModifier, NamedKey};
pub use live::{LiveProperty, PropertyOwner};
pub use migration::{AppliedMigration, MigrationRegistry, MigrationStep};
pub use path::FieldPath;
pub use profile::{CaptureContext, NavigationState, Profile};
pub use script::{generate, Fragment, GeneratorConfig, SectionTag};
pub use types::{
    Action, Camera, CameraGoToGeo, CameraNavState, Keybinding, Meta, Module, Property, SetType,
    Time, TimeType, Vec3,
};
pub use version::{Version, CURRENT_VERSION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
