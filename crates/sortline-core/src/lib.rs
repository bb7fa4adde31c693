//! # sortline-core
//!
//! The deterministic sorting engine for Sortline - THE LOGIC.
//!
//! Simulates a conveyor-belt waste sorter: each item gets an infrared
//! reading, the reading resolves to a material through the signature table,
//! and the item travels down an ordered list of sensor stages until one of
//! them diverts it or it reaches the end of the line.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Never prints, sleeps or reads files; the binary does all I/O
//! - Has NO async and NO logging dependencies (pure Rust)
//! - Keeps its tables immutable once built; they are passed by reference
//! - Draws randomness only through a seedable RNG

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod conveyor;
pub mod line;
pub mod primitives;
pub mod sensor;
pub mod signature;
pub mod tally;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Category, ItemId, Material, Signature, SortlineError, Stage};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use config::{BeltConfig, Plant, PlantConfig};
pub use conveyor::{Conveyor, ItemReport, LineEvent, LineState, RunSummary};
pub use line::{Outcome, Routing, SortingLine, StageCheck};
pub use sensor::{ScriptedSensor, Sensor, SimulatedSensor};
pub use signature::{SignatureEntry, SignatureTable};
pub use tally::{CategoryTotals, MaterialShare, OutcomeShare, ReadingTally};
