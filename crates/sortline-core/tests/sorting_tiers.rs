//! # Sorting Tier Tests (T0-T3)
//!
//! If ANY tier fails, the line is INVALID.
//!
//! ## Tiers
//! - T0: Signature Integrity
//! - T1: Reading Distribution
//! - T2: Stage Order
//! - T3: Run Accounting

use sortline_core::{
    Conveyor, LineEvent, Material, Outcome, PlantConfig, ReadingTally, ScriptedSensor, Signature,
    SignatureTable, SimulatedSensor, SortingLine,
};

// =============================================================================
// TIER T0: SIGNATURE INTEGRITY
// =============================================================================

mod t0_signature_integrity {
    use super::*;

    /// T0.1: Every known material resolves back to itself.
    #[test]
    fn known_materials_round_trip() {
        let table = SignatureTable::standard();
        for material in ["organic", "plastic", "paper", "metal"] {
            let signature = table.signature_for(material).expect("known");
            assert_eq!(table.material_for(signature).as_str(), material);
        }
    }

    /// T0.2: Zero is the "unknown" signature and nothing else uses it.
    #[test]
    fn zero_is_reserved_for_unknown() {
        let table = SignatureTable::standard();
        assert!(table.material_for(Signature::new(0)).is_unknown());
        assert_eq!(
            table.iter().filter(|e| e.signature.is_unknown()).count(),
            1
        );
    }

    /// T0.3: No stage of the standard line targets "unknown".
    #[test]
    fn no_stage_targets_unknown() {
        let line = SortingLine::standard();
        assert!(line.stages().iter().all(|s| !s.material.is_unknown()));
    }
}

// =============================================================================
// TIER T1: READING DISTRIBUTION
// =============================================================================

mod t1_reading_distribution {
    use super::*;

    /// T1.1: About 10% unknown and 22.5% of each known material.
    #[test]
    fn ninety_ten_split() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut sensor = SimulatedSensor::from_seed(&table, 0x5eed);

        let tally = ReadingTally::collect(&table, &line, &mut sensor, 200_000);

        let unknown = tally.share_of("unknown").expect("row").per_mille;
        assert!((92..=108).contains(&unknown), "unknown {unknown}‰");
        for material in ["organic", "plastic", "paper", "metal"] {
            let share = tally.share_of(material).expect("row").per_mille;
            assert!((215..=235).contains(&share), "{material} {share}‰");
        }
    }
}

// =============================================================================
// TIER T2: STAGE ORDER
// =============================================================================

mod t2_stage_order {
    use super::*;

    /// T2.1: Plastic is diverted to the crushers by stage 2, never reaching paper or metal.
    #[test]
    fn plastic_goes_to_crushers() {
        let line = SortingLine::standard();
        let routing = line.route(&Material::new("plastic"));
        assert_eq!(routing.visited, vec![0, 1]);
        assert_eq!(
            line.sorted_by(routing.outcome).map(|s| s.destination.as_str()),
            Some("crushers")
        );
    }

    /// T2.2: Metal is rejected by organic, plastic and paper, in that order.
    #[test]
    fn metal_mismatch_order() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::from_materials(&table, &["metal"]);

        let report = conveyor.process_item(&mut sensor).expect("item");
        let rejected: Vec<_> = report
            .mismatches()
            .into_iter()
            .map(|s| s.material.as_str())
            .collect();
        assert_eq!(rejected, vec!["organic", "plastic", "paper"]);

        let last_mismatch = report
            .events
            .iter()
            .rposition(|e| matches!(e, LineEvent::StageMismatch { .. }));
        let matched = report
            .events
            .iter()
            .position(|e| matches!(e, LineEvent::StageMatched { .. }));
        assert!(last_mismatch < matched);
    }

    /// T2.3: Unknown items pass all four stages to the end of the line.
    #[test]
    fn unknown_reaches_end_of_line() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::new(vec![Signature::UNKNOWN]);

        let report = conveyor.process_item(&mut sensor).expect("item");
        assert_eq!(report.mismatches().len(), 4);
        assert_eq!(report.outcome(), Some(Outcome::EndOfLine));
    }

    /// T2.4: A configured line is walked in configured order.
    #[test]
    fn configured_order_is_respected() {
        let config = PlantConfig {
            stages: Some(vec![
                sortline_core::Stage::recycled("metal", "melting process"),
                sortline_core::Stage::dumped("organic", "dumping pits"),
            ]),
            ..PlantConfig::default()
        };
        let plant = config.build().expect("valid");
        let routing = plant.line.route(&Material::new("organic"));
        assert_eq!(routing.outcome, Outcome::Sorted { stage_index: 1 });
        // Plastic has no stage on this line.
        let routing = plant.line.route(&Material::new("plastic"));
        assert_eq!(routing.outcome, Outcome::EndOfLine);
    }
}

// =============================================================================
// TIER T3: RUN ACCOUNTING
// =============================================================================

mod t3_run_accounting {
    use super::*;

    /// T3.1: The summary counts finished items only.
    #[test]
    fn summary_counts_finished_items() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = SimulatedSensor::from_seed(&table, 3);

        for _ in 0..7 {
            conveyor.process_item(&mut sensor).expect("item");
        }
        // Item #8 is placed on the belt but never scanned.
        assert_eq!(
            conveyor.step(&mut sensor),
            Some(LineEvent::ItemArrived {
                item: sortline_core::ItemId(8)
            })
        );
        assert_eq!(conveyor.terminate().items_simulated, 7);
    }

    /// T3.2: An item whose belt pause never completes is not counted.
    #[test]
    fn stop_during_pause_excludes_item() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::from_materials(&table, &["paper"]);

        conveyor.process_item(&mut sensor).expect("item");
        assert_eq!(conveyor.terminate().items_simulated, 0);
    }

    /// T3.3: Organic and unmatched items are dumped, the rest recycled.
    #[test]
    fn recycled_and_dumped_totals() {
        let table = SignatureTable::standard();
        let line = SortingLine::standard();
        let mut conveyor = Conveyor::new(&table, &line);
        let mut sensor = ScriptedSensor::from_materials(
            &table,
            &["organic", "unknown", "paper", "paper", "metal"],
        );

        for _ in 0..5 {
            conveyor.process_item(&mut sensor).expect("item");
            conveyor.advance();
        }
        let summary = conveyor.terminate();
        assert_eq!(summary.recycled, 3);
        assert_eq!(summary.dumped, 2);
        assert_eq!(summary.items_simulated, 5);
    }
}
