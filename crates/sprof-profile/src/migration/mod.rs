//! Schema migration
//!
//! Provides [`MigrationRegistry`], the ordered set of version→version steps
//! that bring an older document tree up to [`CURRENT_VERSION`] before it is
//! decoded.
//!
//! # Contract
//! - Steps run in ascending version order, one per version hop
//! - After each step the engine stamps the step's target into `version`
//! - A document already at the current version runs zero steps
//! - A step that fails aborts the whole decode; nothing is retried

use serde::Serialize;
use serde_json::Value;

use crate::codec;
use crate::error::ParsingError;
use crate::version::{Version, CURRENT_VERSION};

pub mod v1_0;

/// Transformation applied to the document tree by one step
///
/// Receives the whole document; informational diagnostics go to the vector.
pub type MigrationFn = fn(&mut Value, &mut Vec<ParsingError>) -> Result<(), ParsingError>;

/// One registered version hop
#[derive(Debug, Clone, Copy)]
pub struct MigrationStep {
    /// Version the step reads
    pub from: Version,
    /// Version the step produces
    pub to: Version,
    /// What the step changes
    pub description: &'static str,
    apply: MigrationFn,
}

impl MigrationStep {
    /// Create a step
    #[inline]
    #[must_use]
    pub const fn new(
        from: Version,
        to: Version,
        description: &'static str,
        apply: MigrationFn,
    ) -> Self {
        Self {
            from,
            to,
            description,
            apply,
        }
    }
}

/// Record of a step that ran during a decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedMigration {
    pub from: Version,
    pub to: Version,
}

/// Registry of migration steps
#[derive(Debug, Clone)]
pub struct MigrationRegistry {
    /// Sorted by `from`, one step per `from`
    steps: Vec<MigrationStep>,
    current: Version,
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl MigrationRegistry {
    /// Create an empty registry targeting `current`
    #[inline]
    #[must_use]
    pub fn new(current: Version) -> Self {
        Self {
            steps: Vec::new(),
            current,
        }
    }

    /// Create a registry with every built-in step, targeting [`CURRENT_VERSION`]
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new(CURRENT_VERSION);
        registry.register(v1_0::STEP);
        registry
    }

    /// Register a step
    ///
    /// # Panics
    /// If the step does not move forward, targets a version past the
    /// registry's current version, or duplicates the `from` of another step.
    /// These are programming errors in the step table.
    pub fn register(&mut self, step: MigrationStep) {
        assert!(
            step.from < step.to,
            "migration step {} -> {} does not move forward",
            step.from,
            step.to
        );
        assert!(
            step.to <= self.current,
            "migration step {} -> {} overshoots current version {}",
            step.from,
            step.to,
            self.current
        );
        assert!(
            self.step_from(step.from).is_none(),
            "duplicate migration step from {}",
            step.from
        );
        self.steps.push(step);
        self.steps.sort_by_key(|s| s.from);
    }

    /// Version documents are migrated to
    #[inline]
    #[must_use]
    pub fn current_version(&self) -> Version {
        self.current
    }

    /// Registered steps in ascending order
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[MigrationStep] {
        &self.steps
    }

    /// Step that starts at `from`
    #[must_use]
    pub fn step_from(&self, from: Version) -> Option<&MigrationStep> {
        self.steps.iter().find(|s| s.from == from)
    }

    /// Bring `tree` up to the current version
    ///
    /// # Returns
    /// The steps that ran, in order; empty when the document was current
    ///
    /// # Errors
    /// - Missing or malformed `version`
    /// - A newer major version than this registry reads
    /// - No step registered for an intermediate version
    /// - Any error a step raises for its own section
    pub fn migrate(
        &self,
        tree: &mut Value,
        diagnostics: &mut Vec<ParsingError>,
    ) -> Result<Vec<AppliedMigration>, ParsingError> {
        let mut version = codec::read_version(tree)?;
        if !version.is_readable_by(self.current) {
            return Err(ParsingError::error(format!(
                "Unsupported profile version {version}"
            )));
        }

        let mut applied = Vec::new();
        while version < self.current {
            let step = self.step_from(version).ok_or_else(|| {
                ParsingError::error(format!("No migration path from profile version {version}"))
            })?;

            tracing::debug!(
                from = %step.from,
                to = %step.to,
                "migrating profile: {}",
                step.description
            );
            (step.apply)(tree, diagnostics)?;
            codec::write_version(tree, step.to);

            applied.push(AppliedMigration {
                from: step.from,
                to: step.to,
            });
            version = step.to;
        }

        if version > self.current {
            tracing::debug!(
                "profile version {} is newer than {}; reading known fields only",
                version,
                self.current
            );
        }

        Ok(applied)
    }
}
