//! # Reading Tally
//!
//! Draws many readings in a row and counts where they end up: by identified
//! material, by outcome and by recycled/dumped category. Shares are integer
//! per-mille.

use crate::line::Outcome;
use crate::primitives::PER_MILLE;
use crate::sensor::Sensor;
use crate::{Category, Material, SignatureTable, SortingLine};
use serde::Serialize;

/// How often one material was identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialShare {
    pub material: Material,
    /// Where items of this material end up on this line.
    pub category: Category,
    pub count: u64,
    pub per_mille: u64,
}

/// How often items left the line at one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeShare {
    /// 0-based stage index; `None` for the end of the line.
    pub stage: Option<usize>,
    pub destination: String,
    pub category: Category,
    pub count: u64,
    pub per_mille: u64,
}

/// Recycled versus dumped items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub recycled: u64,
    pub dumped: u64,
    pub total: u64,
}

impl CategoryTotals {
    fn record(&mut self, category: Category) {
        self.total = self.total.saturating_add(1);
        match category {
            Category::Recycled => self.recycled = self.recycled.saturating_add(1),
            Category::Dumped => self.dumped = self.dumped.saturating_add(1),
        }
    }
}

/// Counts over `draws` readings, in table and belt order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingTally {
    pub draws: u64,
    pub materials: Vec<MaterialShare>,
    pub outcomes: Vec<OutcomeShare>,
    pub categories: CategoryTotals,
}

impl ReadingTally {
    /// Take `draws` readings from `sensor` and route each one.
    pub fn collect<S: Sensor + ?Sized>(
        table: &SignatureTable,
        line: &SortingLine,
        sensor: &mut S,
        draws: u64,
    ) -> Self {
        let mut materials: Vec<(&Material, u64)> =
            table.iter().map(|e| (&e.material, 0)).collect();
        // One slot per stage plus the end of the line.
        let mut outcomes = vec![0u64; line.len() + 1];
        let mut categories = CategoryTotals::default();

        for _ in 0..draws {
            let material = table.material_for(sensor.read());
            if let Some(slot) = materials.iter_mut().find(|(m, _)| *m == material) {
                slot.1 = slot.1.saturating_add(1);
            }

            let outcome = line.route(material).outcome;
            categories.record(line.category_of(outcome));
            let slot = match outcome {
                Outcome::Sorted { stage_index } => stage_index,
                Outcome::EndOfLine => line.len(),
            };
            if let Some(count) = outcomes.get_mut(slot) {
                *count = count.saturating_add(1);
            }
        }

        let materials = materials
            .into_iter()
            .map(|(material, count)| MaterialShare {
                material: material.clone(),
                category: line.category_of(line.route(material).outcome),
                count,
                per_mille: per_mille(count, draws),
            })
            .collect();

        let outcomes = outcomes
            .into_iter()
            .enumerate()
            .map(|(index, count)| {
                let outcome = match line.get(index) {
                    Some(_) => Outcome::Sorted { stage_index: index },
                    None => Outcome::EndOfLine,
                };
                OutcomeShare {
                    stage: outcome.is_sorted().then_some(index),
                    destination: line.destination_of(outcome).to_string(),
                    category: line.category_of(outcome),
                    count,
                    per_mille: per_mille(count, draws),
                }
            })
            .collect();

        Self {
            draws,
            materials,
            outcomes,
            categories,
        }
    }

    /// Share of one material, if the table has it.
    #[must_use]
    pub fn share_of(&self, material: &str) -> Option<&MaterialShare> {
        self.materials.iter().find(|s| s.material.as_str() == material)
    }
}

fn per_mille(count: u64, total: u64) -> u64 {
    count
        .saturating_mul(PER_MILLE)
        .checked_div(total)
        .unwrap_or(0)
}

// =============================================================================
// TESTS
// =============================================================================
