//! # Sorting Line
//!
//! The ordered list of sensor rows an item passes. Traversal is a linear scan:
//! the first stage whose target material equals the identified material
//! diverts the item, and later stages are never evaluated. An item no stage
//! claims reaches the end of the line.

use crate::primitives::{END_OF_LINE_CATEGORY, END_OF_LINE_DESTINATION, STANDARD_STAGES};
use crate::{Category, Material, SignatureTable, SortlineError, Stage};
use serde::Serialize;

/// Where an item left the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Diverted by the stage at `stage_index` (0-based).
    Sorted { stage_index: usize },
    /// Passed every stage without a match.
    EndOfLine,
}

impl Outcome {
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        matches!(self, Outcome::Sorted { .. })
    }
}

/// Result of comparing one item against one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCheck<'a> {
    /// 0-based position of the stage on the line.
    pub index: usize,
    pub stage: &'a Stage,
    pub matched: bool,
}

/// Full traversal record of one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routing {
    /// Indices of the stages that were evaluated, in order.
    pub visited: Vec<usize>,
    pub outcome: Outcome,
}

/// Immutable, validated stage sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortingLine {
    stages: Vec<Stage>,
}

impl Default for SortingLine {
    fn default() -> Self {
        Self::standard()
    }
}

impl SortingLine {
    /// The built-in line: organic, plastic, paper, metal.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            stages: STANDARD_STAGES
                .iter()
                .map(|&(material, destination, category)| {
                    Stage::new(material, destination, category)
                })
                .collect(),
        }
    }

    /// Build a line, checking every target against `table`.
    ///
    /// Errors carry the 1-based stage number, as printed on the belt.
    pub fn new(stages: Vec<Stage>, table: &SignatureTable) -> Result<Self, SortlineError> {
        for (index, stage) in stages.iter().enumerate() {
            let number = index + 1;
            if stage.material.is_unknown() {
                return Err(SortlineError::StageTargetsUnknown(number));
            }
            if !table.contains(&stage.material) {
                return Err(SortlineError::StageMaterialNotInTable(
                    number,
                    stage.material.clone(),
                ));
            }
        }
        Ok(Self { stages })
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Compare `material` against the stage at `index`.
    ///
    /// Returns `None` past the last stage.
    #[must_use]
    pub fn check(&self, index: usize, material: &Material) -> Option<StageCheck<'_>> {
        self.stages.get(index).map(|stage| StageCheck {
            index,
            stage,
            matched: &stage.material == material,
        })
    }

    /// Walk `material` down the line until a stage claims it.
    #[must_use]
    pub fn route(&self, material: &Material) -> Routing {
        let mut visited = Vec::new();
        let mut index = 0;

        while let Some(check) = self.check(index, material) {
            visited.push(index);
            if check.matched {
                return Routing {
                    visited,
                    outcome: Outcome::Sorted { stage_index: index },
                };
            }
            index += 1;
        }

        Routing {
            visited,
            outcome: Outcome::EndOfLine,
        }
    }

    /// Stage that diverted an item with this outcome, if any.
    #[must_use]
    pub fn sorted_by(&self, outcome: Outcome) -> Option<&Stage> {
        match outcome {
            Outcome::Sorted { stage_index } => self.stages.get(stage_index),
            Outcome::EndOfLine => None,
        }
    }

    /// Where an item with this outcome ends up.
    #[must_use]
    pub fn destination_of(&self, outcome: Outcome) -> &str {
        self.sorted_by(outcome)
            .map(|stage| stage.destination.as_str())
            .unwrap_or(END_OF_LINE_DESTINATION)
    }

    /// Whether an item with this outcome is recycled or dumped.
    ///
    /// Items that pass every stage count as dumped.
    #[must_use]
    pub fn category_of(&self, outcome: Outcome) -> Category {
        self.sorted_by(outcome)
            .map(|stage| stage.category)
            .unwrap_or(END_OF_LINE_CATEGORY)
    }
}

// =============================================================================
// TESTS
// =============================================================================
