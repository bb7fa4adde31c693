//! # Belt Transcript Rendering
//!
//! Turns conveyor events into the line-oriented text printed on stdout.
//! Every function here writes to a generic [`Write`] so tests can capture
//! the exact transcript.

use sortline_core::{LineEvent, RunSummary};
use std::io::{self, Write};

/// Lines printed once before the first item.
pub const INTRO: [&str; 3] = [
    "Starting the Multi-Stage Waste Sorting System Simulation...",
    "Simulating items on a conveyor belt going through sequential sensor stages.",
    "",
];

/// Printed when an item leaves the line, followed by a blank line.
pub const SEPARATOR: &str = "-------------------------------------------";

const NO_MATCH: &str = "    -> Item does not match. Continues on the main conveyor belt.";

const END_OF_LINE: &str = "  > Item passed all sorting stages. It proceeds to the end of the line for manual inspection or as residual waste.";

/// Why the belt stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Ctrl-C (or another shutdown signal) arrived.
    Interrupted,
    /// The configured item limit was reached.
    ItemLimit,
}

/// Text lines for one conveyor event.
pub fn event_lines(event: &LineEvent<'_>) -> Vec<String> {
    match event {
        LineEvent::ItemArrived { item } => {
            vec![format!("--- Item #{} on conveyor belt ---", item)]
        }
        LineEvent::Identified { material, .. } => vec![format!(
            "Initial sensor scan identifies material as: {}",
            material.label()
        )],
        LineEvent::StageMismatch { index, stage, .. } => vec![
            passing_line(*index, stage.material.as_str()),
            NO_MATCH.to_string(),
        ],
        LineEvent::StageMatched { index, stage, .. } => vec![
            passing_line(*index, stage.material.as_str()),
            format!(
                "    -> SUCCESS! Firing air gun for {} bin. Item sent to {}.",
                stage.material.label(),
                stage.destination
            ),
        ],
        LineEvent::EndOfLine { .. } => vec![END_OF_LINE.to_string()],
        LineEvent::BeltAdvance { .. } => vec![SEPARATOR.to_string(), String::new()],
    }
}

fn passing_line(index: usize, material: &str) -> String {
    format!(
        "  > Passing through Stage {}: {} sensor row...",
        index + 1,
        material
    )
}

/// Write the intro block.
pub fn write_intro<W: Write>(out: &mut W) -> io::Result<()> {
    for line in INTRO {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Write the lines of one event.
pub fn write_event<W: Write>(out: &mut W, event: &LineEvent<'_>) -> io::Result<()> {
    for line in event_lines(event) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Write the closing summary.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &RunSummary,
    reason: StopReason,
) -> io::Result<()> {
    match reason {
        StopReason::Interrupted => {
            writeln!(out)?;
            writeln!(out, "Simulation stopped by user.")?;
        }
        StopReason::ItemLimit => writeln!(out, "Simulation finished.")?,
    }
    writeln!(out, "Total items simulated: {}", summary.items_simulated)
}

// =============================================================================
// TESTS
// =============================================================================
