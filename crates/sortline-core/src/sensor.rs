//! # Sensor Readings
//!
//! The [`Sensor`] trait is the seam between the conveyor and whatever
//! produces readings. Two implementations ship with the core:
//!
//! - [`SimulatedSensor`]: the random reading generator. A two-step weighted
//!   sampler: a Bernoulli draw (9 in 10) picks "known vs unknown", then a
//!   uniform draw picks among the known materials. Both steps go through a
//!   seedable RNG so a run can be replayed exactly.
//! - [`ScriptedSensor`]: replays a fixed sequence of signatures.
//!
//! With the standard table every known material is drawn with probability
//! 9/10 × 1/4 = 0.225 and "unknown" with probability 0.1.

use crate::primitives::{KNOWN_READING_DENOMINATOR, KNOWN_READING_NUMERATOR};
use crate::{Signature, SignatureTable};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of one signature per item scanned.
pub trait Sensor {
    /// Take a reading of the next item on the belt.
    fn read(&mut self) -> Signature;
}

// =============================================================================
// SIMULATED SENSOR
// =============================================================================

/// Random reading generator over the known materials of a table.
#[derive(Debug, Clone)]
pub struct SimulatedSensor<R = ChaCha8Rng> {
    known: Vec<Signature>,
    rng: R,
}

impl SimulatedSensor<ChaCha8Rng> {
    /// Deterministic generator: the same seed yields the same readings.
    #[must_use]
    pub fn from_seed(table: &SignatureTable, seed: u64) -> Self {
        Self::with_rng(table, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulatedSensor<R> {
    /// Build a generator drawing from `rng`.
    #[must_use]
    pub fn with_rng(table: &SignatureTable, rng: R) -> Self {
        Self {
            known: table.known_signatures(),
            rng,
        }
    }

    /// Draw one reading: a known material 9 times in 10, else "unknown".
    pub fn draw_reading(&mut self) -> Signature {
        if !self
            .rng
            .gen_ratio(KNOWN_READING_NUMERATOR, KNOWN_READING_DENOMINATOR)
        {
            return Signature::UNKNOWN;
        }

        self.known
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Signature::UNKNOWN)
    }
}

impl<R: Rng> Sensor for SimulatedSensor<R> {
    fn read(&mut self) -> Signature {
        self.draw_reading()
    }
}

// =============================================================================
// SCRIPTED SENSOR
// =============================================================================

/// Replays `readings` in order, wrapping around at the end.
///
/// An empty script reads every item as "unknown".
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    readings: Vec<Signature>,
    cursor: usize,
}

impl ScriptedSensor {
    #[must_use]
    pub fn new(readings: Vec<Signature>) -> Self {
        Self {
            readings,
            cursor: 0,
        }
    }

    /// Script the readings of `materials` as resolved through `table`.
    ///
    /// Materials missing from the table are scripted as "unknown".
    #[must_use]
    pub fn from_materials(table: &SignatureTable, materials: &[&str]) -> Self {
        Self::new(
            materials
                .iter()
                .map(|m| table.signature_for(m).unwrap_or(Signature::UNKNOWN))
                .collect(),
        )
    }
}

impl Sensor for ScriptedSensor {
    fn read(&mut self) -> Signature {
        let Some(reading) = self.readings.get(self.cursor).copied() else {
            return Signature::UNKNOWN;
        };
        self.cursor = (self.cursor + 1) % self.readings.len();
        reading
    }
}

// =============================================================================
// TESTS
// =============================================================================
