//! # Core Type Definitions
//!
//! This module contains all core types for the Sortline engine:
//! - Sensor readings and identifiers (`Signature`, `ItemId`)
//! - Material names (`Material`)
//! - Sorting stages (`Stage`)
//! - Error types (`SortlineError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Use saturating arithmetic for counters to prevent overflow

use crate::primitives::{UNKNOWN_MATERIAL, UNKNOWN_SIGNATURE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// SENSOR READINGS
// =============================================================================

/// Integer value reported by an infrared sensor row for one item.
///
/// Each material has a hand-assigned, distinct signature. The sentinel
/// [`Signature::UNKNOWN`] means "not classified".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Signature(pub u32);

impl Signature {
    /// Signature reported for items no sensor recognises.
    pub const UNKNOWN: Signature = Signature(UNKNOWN_SIGNATURE);

    /// Create a new signature with the given value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw signature value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check whether this is the "not classified" sentinel.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.0 == UNKNOWN_SIGNATURE
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display counter for items on the belt. Starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl ItemId {
    /// The first item placed on the belt.
    pub const FIRST: ItemId = ItemId(1);

    /// The item that follows this one (saturating).
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// Name of a material class, e.g. `"plastic"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Material(pub String);

impl Material {
    /// Create a new material from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The "not classified" material.
    #[must_use]
    pub fn unknown() -> Self {
        Self(UNKNOWN_MATERIAL.to_string())
    }

    /// Get the material as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the "not classified" material.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_MATERIAL
    }

    /// Upper-case label used for bin names in belt output.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.to_uppercase()
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Material {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// STAGE
// =============================================================================

/// What happens to an item once it leaves the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Goes on to a recycling process.
    Recycled,
    /// Disposed of; never recycled.
    Dumped,
}

impl Category {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Recycled => "recycled",
            Category::Dumped => "dumped",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sensor row on the line: items of `material` are blown off the belt
/// towards `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stage {
    /// Material this row's air gun fires on.
    pub material: Material,
    /// Where a matched item is sent.
    pub destination: String,
    pub category: Category,
}

impl Stage {
    /// Create a new stage.
    #[must_use]
    pub fn new(
        material: impl Into<Material>,
        destination: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            material: material.into(),
            destination: destination.into(),
            category,
        }
    }

    /// A stage whose items go on to be recycled.
    #[must_use]
    pub fn recycled(material: impl Into<Material>, destination: impl Into<String>) -> Self {
        Self::new(material, destination, Category::Recycled)
    }

    /// A stage whose items are disposed of.
    #[must_use]
    pub fn dumped(material: impl Into<Material>, destination: impl Into<String>) -> Self {
        Self::new(material, destination, Category::Dumped)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while assembling a plant.
///
/// The sorting loop itself has no failure modes: lookups fall back to
/// `"unknown"`, draws always succeed and traversal is bounded by the stage
/// list. Only configuration can be wrong.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortlineError {
    /// A material name appears twice in the signature table.
    #[error("Duplicate material in signature table: {0}")]
    DuplicateMaterial(Material),

    /// Two materials share a signature, so reverse lookup would be ambiguous.
    #[error("Signature {0} is assigned to both {1} and {2}")]
    DuplicateSignature(Signature, Material, Material),

    /// The table has no "unknown" entry.
    #[error("Signature table has no \"unknown\" entry")]
    MissingUnknown,

    /// The "unknown" entry is not mapped to signature 0.
    #[error("\"unknown\" must map to signature 0, found {0}")]
    UnknownSignatureNotZero(Signature),

    /// A known material was assigned the "not classified" signature.
    #[error("Known material {0} cannot use signature 0")]
    ZeroSignature(Material),

    /// The table only contains the "unknown" entry.
    #[error("Signature table has no known materials")]
    NoKnownMaterials,

    /// A stage targets a material the table does not know.
    #[error("Stage {0} targets {1}, which is not in the signature table")]
    StageMaterialNotInTable(usize, Material),

    /// A stage targets "unknown"; unknown items must never match.
    #[error("Stage {0} targets \"unknown\"")]
    StageTargetsUnknown(usize),

    /// A configuration document could not be parsed or is inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
