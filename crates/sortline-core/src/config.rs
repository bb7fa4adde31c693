//! # Plant Configuration
//!
//! Serde model of a sorting plant: belt timing plus optional replacement
//! tables. The document format is left to the caller (the binary reads TOML).
//!
//! ```toml
//! [belt]
//! travel_millis = 2000
//! seed = 42
//!
//! [[signatures]]
//! material = "glass"
//! signature = 1200
//!
//! [[signatures]]
//! material = "unknown"
//! signature = 0
//!
//! [[stages]]
//! material = "glass"
//! destination = "cullet bunker"
//! category = "recycled"
//! ```
//!
//! A missing `signatures` or `stages` key means "use the standard table".
//! An explicit empty `stages = []` builds a line with no stages.

use crate::primitives::BELT_TRAVEL_MILLIS;
use crate::signature::SignatureEntry;
use crate::{SignatureTable, SortingLine, SortlineError, Stage};
use serde::{Deserialize, Serialize};

/// Belt timing and run limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeltConfig {
    /// Pause between two items, in milliseconds.
    pub travel_millis: u64,
    /// RNG seed; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Stop after this many items instead of running until interrupted.
    pub max_items: Option<u64>,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            travel_millis: BELT_TRAVEL_MILLIS,
            seed: None,
            max_items: None,
        }
    }
}

/// Unvalidated plant description as read from a config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantConfig {
    pub belt: BeltConfig,
    pub signatures: Option<Vec<SignatureEntry>>,
    pub stages: Option<Vec<Stage>>,
}

/// Validated, immutable plant. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub table: SignatureTable,
    pub line: SortingLine,
    pub belt: BeltConfig,
}

impl Default for Plant {
    fn default() -> Self {
        Self::standard()
    }
}

impl Plant {
    /// Standard tables with default belt timing.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            table: SignatureTable::standard(),
            line: SortingLine::standard(),
            belt: BeltConfig::default(),
        }
    }
}

impl PlantConfig {
    /// Validate the tables and assemble the plant.
    pub fn build(self) -> Result<Plant, SortlineError> {
        let table = match self.signatures {
            Some(entries) => SignatureTable::from_entries(entries)?,
            None => SignatureTable::standard(),
        };

        // Standard stages are rechecked: a custom table may not carry them.
        let stages = self
            .stages
            .unwrap_or_else(|| SortingLine::standard().stages().to_vec());
        let line = SortingLine::new(stages, &table)?;

        Ok(Plant {
            table,
            line,
            belt: self.belt,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
