//! # Conveyor State Machine
//!
//! Drives items along a [`SortingLine`], one transition per [`Conveyor::step`]:
//!
//! ```text
//! AwaitingItem ─▶ Scanning ─▶ StageCheck(0) ─▶ StageCheck(1) ─▶ … ─┬─▶ Sorted(i) ─┐
//!      ▲                                                            └─▶ EndOfLine ─┤
//!      └────── advance ◀── Advancing ◀──────── BeltAdvance ◀─────────────────────┘
//! ```
//!
//! Every transition emits exactly one [`LineEvent`]. The conveyor never prints
//! or sleeps; the caller renders events and performs the pause when it sees
//! [`LineEvent::BeltAdvance`], then calls [`Conveyor::advance`]. An item is
//! counted only once its pause has completed, so stopping during the pause
//! leaves it out of the total. `terminate` moves any state to `Terminated`.
//!
//! Events and states borrow from the plant's immutable tables.

use crate::line::Outcome;
use crate::sensor::Sensor;
use crate::{Category, ItemId, Material, Signature, SignatureTable, SortingLine, Stage};
use serde::Serialize;

// =============================================================================
// STATES & EVENTS
// =============================================================================

/// Position of the conveyor in its per-item cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState<'a> {
    /// Waiting for the next item to be placed on the belt.
    AwaitingItem,
    /// Item placed, not yet read by the sensor.
    Scanning { item: ItemId },
    /// About to compare the item against stage `index`.
    StageCheck {
        item: ItemId,
        material: &'a Material,
        index: usize,
    },
    /// Diverted by stage `stage_index`.
    Sorted { item: ItemId, stage_index: usize },
    /// Passed every stage.
    EndOfLine { item: ItemId },
    /// Off the line; the belt is travelling towards the next item.
    Advancing { item: ItemId, outcome: Outcome },
    /// Stopped; no further transitions.
    Terminated,
}

/// Observable effect of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent<'a> {
    ItemArrived {
        item: ItemId,
    },
    Identified {
        item: ItemId,
        signature: Signature,
        material: &'a Material,
    },
    StageMismatch {
        item: ItemId,
        index: usize,
        stage: &'a Stage,
    },
    StageMatched {
        item: ItemId,
        index: usize,
        stage: &'a Stage,
    },
    EndOfLine {
        item: ItemId,
    },
    /// The item is off the belt; the caller pauses before the next one.
    BeltAdvance {
        item: ItemId,
    },
}

/// Totals reported when the conveyor stops.
///
/// `recycled + dumped == items_simulated` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Items whose belt pause completed.
    pub items_simulated: u64,
    pub recycled: u64,
    pub dumped: u64,
}

impl RunSummary {
    fn record(&mut self, category: Category) {
        self.items_simulated = self.items_simulated.saturating_add(1);
        match category {
            Category::Recycled => self.recycled = self.recycled.saturating_add(1),
            Category::Dumped => self.dumped = self.dumped.saturating_add(1),
        }
    }
}

// =============================================================================
// CONVEYOR
// =============================================================================

/// Per-item sorting loop over borrowed, immutable tables.
#[derive(Debug, Clone)]
pub struct Conveyor<'a> {
    table: &'a SignatureTable,
    line: &'a SortingLine,
    state: LineState<'a>,
    next_item: ItemId,
    totals: RunSummary,
}

impl<'a> Conveyor<'a> {
    #[must_use]
    pub fn new(table: &'a SignatureTable, line: &'a SortingLine) -> Self {
        Self {
            table,
            line,
            state: LineState::AwaitingItem,
            next_item: ItemId::FIRST,
            totals: RunSummary::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> LineState<'a> {
        self.state
    }

    /// Items counted so far.
    #[must_use]
    pub fn items_simulated(&self) -> u64 {
        self.totals.items_simulated
    }

    /// Perform one transition. Returns `None` once terminated.
    ///
    /// Stepping out of `Advancing` treats the pause as done: the item is
    /// counted and the next one arrives in the same step.
    pub fn step<S: Sensor + ?Sized>(&mut self, sensor: &mut S) -> Option<LineEvent<'a>> {
        if matches!(self.state, LineState::Advancing { .. }) {
            self.advance();
        }
        match self.state {
            LineState::AwaitingItem => {
                let item = self.next_item;
                self.next_item = item.next();
                self.state = LineState::Scanning { item };
                Some(LineEvent::ItemArrived { item })
            }
            LineState::Scanning { item } => {
                let table: &'a SignatureTable = self.table;
                let signature = sensor.read();
                let material = table.material_for(signature);
                self.state = LineState::StageCheck {
                    item,
                    material,
                    index: 0,
                };
                Some(LineEvent::Identified {
                    item,
                    signature,
                    material,
                })
            }
            LineState::StageCheck {
                item,
                material,
                index,
            } => Some(self.check_stage(item, material, index)),
            LineState::Sorted { item, stage_index } => {
                let outcome = Outcome::Sorted { stage_index };
                self.state = LineState::Advancing { item, outcome };
                Some(LineEvent::BeltAdvance { item })
            }
            LineState::EndOfLine { item } => {
                let outcome = Outcome::EndOfLine;
                self.state = LineState::Advancing { item, outcome };
                Some(LineEvent::BeltAdvance { item })
            }
            LineState::Advancing { .. } | LineState::Terminated => None,
        }
    }

    fn check_stage(
        &mut self,
        item: ItemId,
        material: &'a Material,
        index: usize,
    ) -> LineEvent<'a> {
        let line: &'a SortingLine = self.line;
        match line.check(index, material) {
            None => {
                self.state = LineState::EndOfLine { item };
                LineEvent::EndOfLine { item }
            }
            Some(check) if check.matched => {
                self.state = LineState::Sorted {
                    item,
                    stage_index: index,
                };
                LineEvent::StageMatched {
                    item,
                    index,
                    stage: check.stage,
                }
            }
            Some(check) => {
                self.state = LineState::StageCheck {
                    item,
                    material,
                    index: index + 1,
                };
                LineEvent::StageMismatch {
                    item,
                    index,
                    stage: check.stage,
                }
            }
        }
    }

    /// Run transitions up to and including the next `BeltAdvance`.
    ///
    /// Returns `None` if the conveyor is terminated.
    pub fn process_item<S: Sensor + ?Sized>(
        &mut self,
        sensor: &mut S,
    ) -> Option<ItemReport<'a>> {
        let mut events = Vec::new();
        while let Some(event) = self.step(sensor) {
            let done = matches!(event, LineEvent::BeltAdvance { .. });
            events.push(event);
            if done {
                return Some(ItemReport { events });
            }
        }
        None
    }

    /// The belt pause after an item has completed: count the item and wait
    /// for the next one.
    ///
    /// Returns `false`, changing nothing, unless the conveyor is `Advancing`.
    pub fn advance(&mut self) -> bool {
        let LineState::Advancing { outcome, .. } = self.state else {
            return false;
        };
        self.totals.record(self.line.category_of(outcome));
        self.state = LineState::AwaitingItem;
        true
    }

    /// Stop the conveyor. An item that has not finished its pause is not
    /// counted.
    pub fn terminate(&mut self) -> RunSummary {
        self.state = LineState::Terminated;
        self.summary()
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        self.totals
    }
}

// =============================================================================
// ITEM REPORT
// =============================================================================

/// Every event one item produced, from `ItemArrived` to `BeltAdvance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport<'a> {
    pub events: Vec<LineEvent<'a>>,
}

impl<'a> ItemReport<'a> {
    #[must_use]
    pub fn item(&self) -> Option<ItemId> {
        self.events.iter().find_map(|e| match e {
            LineEvent::ItemArrived { item } => Some(*item),
            _ => None,
        })
    }

    #[must_use]
    pub fn material(&self) -> Option<&'a Material> {
        self.events.iter().find_map(|e| match e {
            LineEvent::Identified { material, .. } => Some(*material),
            _ => None,
        })
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.events.iter().find_map(|e| match e {
            LineEvent::StageMatched { index, .. } => Some(Outcome::Sorted {
                stage_index: *index,
            }),
            LineEvent::EndOfLine { .. } => Some(Outcome::EndOfLine),
            _ => None,
        })
    }

    /// Stages the item passed without a match, in belt order.
    #[must_use]
    pub fn mismatches(&self) -> Vec<&'a Stage> {
        self.events
            .iter()
            .filter_map(|e| match e {
                LineEvent::StageMismatch { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::ScriptedSensor;

    #[test]
    fn first_step_announces_item_one() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::default();

        assert_eq!(
            conveyor.step(&mut sensor),
            Some(LineEvent::ItemArrived { item: ItemId(1) })
        );
        assert_eq!(conveyor.state(), LineState::Scanning { item: ItemId(1) });
    }

    #[test]
    fn plastic_is_sorted_at_second_stage() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::from_materials(&table, &["plastic"]);

        let report = conveyor.process_item(&mut sensor).expect("item");
        assert_eq!(report.outcome(), Some(Outcome::Sorted { stage_index: 1 }));
        let names: Vec<_> = report
            .mismatches()
            .into_iter()
            .map(|s| s.material.as_str())
            .collect();
        assert_eq!(names, vec!["organic"]);
        assert!(report.events.iter().any(|e| matches!(
            e,
            LineEvent::StageMatched { stage, .. } if stage.destination == "crushers"
        )));
        assert!(!report.events.iter().any(|e| matches!(
            e,
            LineEvent::StageMismatch { index: 2 | 3, .. }
                | LineEvent::StageMatched { index: 2 | 3, .. }
        )));
    }

    #[test]
    fn unknown_visits_every_stage() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::new(vec![Signature::UNKNOWN]);

        let report = conveyor.process_item(&mut sensor).expect("item");
        assert_eq!(report.mismatches().len(), 4);
        assert_eq!(report.outcome(), Some(Outcome::EndOfLine));
        assert!(report.material().is_some_and(Material::is_unknown));
    }

    #[test]
    fn event_order_for_one_item() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::from_materials(&table, &["organic"]);

        let report = conveyor.process_item(&mut sensor).expect("item");
        let stage = line.get(0).expect("stage");
        assert_eq!(
            report.events,
            vec![
                LineEvent::ItemArrived { item: ItemId(1) },
                LineEvent::Identified {
                    item: ItemId(1),
                    signature: Signature(680),
                    material: table.material_for(Signature(680)),
                },
                LineEvent::StageMatched {
                    item: ItemId(1),
                    index: 0,
                    stage,
                },
                LineEvent::BeltAdvance { item: ItemId(1) },
            ]
        );
        assert_eq!(
            conveyor.state(),
            LineState::Advancing {
                item: ItemId(1),
                outcome: Outcome::Sorted { stage_index: 0 },
            }
        );
        assert!(conveyor.advance());
        assert_eq!(conveyor.state(), LineState::AwaitingItem);
        assert!(!conveyor.advance());
    }

    #[test]
    fn item_ids_increase() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::from_materials(&table, &["metal", "paper"]);

        let ids: Vec<_> = (0..3)
            .filter_map(|_| conveyor.process_item(&mut sensor))
            .filter_map(|r| r.item())
            .collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(2), ItemId(3)]);
        // The third item is still waiting out its pause.
        assert_eq!(conveyor.items_simulated(), 2);
        conveyor.advance();
        assert_eq!(conveyor.items_simulated(), 3);
    }

    #[test]
    fn terminate_excludes_partial_item() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::from_materials(&table, &["metal"]);

        conveyor.process_item(&mut sensor).expect("first");
        conveyor.process_item(&mut sensor).expect("second");
        conveyor.advance();
        // Third item is placed and scanned, then the line stops.
        conveyor.step(&mut sensor);
        conveyor.step(&mut sensor);

        let summary = conveyor.terminate();
        assert_eq!(summary.items_simulated, 2);
        assert_eq!(conveyor.state(), LineState::Terminated);
        assert_eq!(conveyor.step(&mut sensor), None);
        assert!(conveyor.process_item(&mut sensor).is_none());
    }

    #[test]
    fn terminate_during_pause_leaves_item_uncounted() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::new(vec![Signature::UNKNOWN]);

        // The item is off the belt but its pause never completes.
        conveyor.process_item(&mut sensor).expect("item");
        assert_eq!(conveyor.terminate().items_simulated, 0);
        assert!(!conveyor.advance());
    }

    #[test]
    fn summary_splits_recycled_and_dumped() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor =
            ScriptedSensor::from_materials(&table, &["organic", "plastic", "unknown", "metal"]);

        for _ in 0..4 {
            conveyor.process_item(&mut sensor).expect("item");
            conveyor.advance();
        }
        assert_eq!(
            conveyor.summary(),
            RunSummary {
                items_simulated: 4,
                recycled: 2,
                dumped: 2,
            }
        );
    }
}
