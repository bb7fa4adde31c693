//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::belt;
use crate::render::{self, StopReason};
use serde::Serialize;
use sortline_core::{Plant, PlantConfig, ReadingTally, SimulatedSensor, SortlineError};
use std::path::{Path, PathBuf};

// =============================================================================
// CONFIGURATION LOADING
// =============================================================================

/// Maximum size of a plant configuration file (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Validate a config file path: it must exist and be a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, SortlineError> {
    let canonical = path.canonicalize().map_err(|e| {
        SortlineError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(SortlineError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| SortlineError::IoError(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(SortlineError::ConfigError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        )));
    }

    Ok(canonical)
}

/// Parse and validate a TOML plant description.
pub fn parse_plant(text: &str) -> Result<Plant, SortlineError> {
    let config: PlantConfig =
        toml::from_str(text).map_err(|e| SortlineError::ConfigError(e.to_string()))?;
    config.build()
}

/// Load the plant from `path`, or the standard plant when no file is given.
pub fn load_plant(path: Option<&Path>) -> Result<Plant, SortlineError> {
    let Some(path) = path else {
        return PlantConfig::default().build();
    };

    let validated = validate_file_path(path)?;
    tracing::info!("Loading plant configuration from {:?}", validated);

    let text = std::fs::read_to_string(&validated)
        .map_err(|e| SortlineError::IoError(format!("Read config: {}", e)))?;
    parse_plant(&text)
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Run the sorting line until Ctrl-C or the item limit.
pub async fn cmd_run(
    mut plant: Plant,
    seed: Option<u64>,
    travel_ms: Option<u64>,
    max_items: Option<u64>,
) -> Result<(), SortlineError> {
    if let Some(travel) = travel_ms {
        plant.belt.travel_millis = travel;
    }
    if max_items.is_some() {
        plant.belt.max_items = max_items;
    }
    let seed = seed.or(plant.belt.seed).unwrap_or_else(rand::random);

    tracing::info!(
        seed,
        travel_millis = plant.belt.travel_millis,
        stages = plant.line.len(),
        "Starting sorting line"
    );

    let mut sensor = SimulatedSensor::from_seed(&plant.table, seed);
    let mut out = std::io::stdout();

    let run = belt::run_belt(&plant, &mut sensor, &mut out, ctrl_c()).await?;

    render::write_summary(&mut out, &run.summary, run.reason)
        .map_err(|e| SortlineError::IoError(format!("Write belt output: {}", e)))?;

    if run.reason == StopReason::Interrupted {
        tracing::info!(items = run.summary.items_simulated, "Stopped by user");
    }
    tracing::info!(
        recycled = run.summary.recycled,
        dumped = run.summary.dumped,
        "Belt totals"
    );
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

// =============================================================================
// SAMPLE COMMAND
// =============================================================================

#[derive(Serialize)]
struct SampleReport<'a> {
    seed: u64,
    #[serde(flatten)]
    tally: &'a ReadingTally,
}

/// Tally `count` readings without running the belt.
pub fn cmd_sample(
    plant: &Plant,
    json_mode: bool,
    count: u64,
    seed: Option<u64>,
) -> Result<(), SortlineError> {
    let seed = seed.or(plant.belt.seed).unwrap_or_else(rand::random);
    tracing::debug!(seed, count, "Sampling readings");

    let mut sensor = SimulatedSensor::from_seed(&plant.table, seed);
    let tally = ReadingTally::collect(&plant.table, &plant.line, &mut sensor, count);

    if json_mode {
        let report = SampleReport {
            seed,
            tally: &tally,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Sortline Reading Sample");
    println!("=======================");
    println!("Draws: {}", tally.draws);
    println!("Seed:  {}", seed);
    println!();
    println!("Identified material:");
    for share in &tally.materials {
        println!(
            "  {:<12} {:<9} {:>10}  {:>4}‰",
            share.material.as_str(),
            share.category.as_str(),
            share.count,
            share.per_mille
        );
    }
    println!();
    println!("Outcome:");
    for share in &tally.outcomes {
        let place = match share.stage {
            Some(index) => format!("Stage {}: {}", index + 1, share.destination),
            None => format!("End of line: {}", share.destination),
        };
        println!(
            "  {:<48} {:<9} {:>10}  {:>4}‰",
            place,
            share.category.as_str(),
            share.count,
            share.per_mille
        );
    }
    println!();
    println!("Recycled: {}", tally.categories.recycled);
    println!("Dumped:   {}", tally.categories.dumped);
    println!("Total:    {}", tally.categories.total);

    Ok(())
}

// =============================================================================
// TABLE COMMAND
// =============================================================================

/// Show the signature table in lookup order.
pub fn cmd_table(plant: &Plant, json_mode: bool) -> Result<(), SortlineError> {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&plant.table).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Sortline Signature Table");
    println!("========================");
    for entry in plant.table.iter() {
        println!(
            "  {:<12} {:>6}",
            entry.material.as_str(),
            entry.signature.value()
        );
    }

    Ok(())
}

// =============================================================================
// STAGES COMMAND
// =============================================================================

/// Show the stage list in belt order.
pub fn cmd_stages(plant: &Plant, json_mode: bool) -> Result<(), SortlineError> {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&plant.line).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Sortline Sorting Stages");
    println!("=======================");
    if plant.line.is_empty() {
        println!("(no stages: every item reaches the end of the line)");
    }
    for (index, stage) in plant.line.stages().iter().enumerate() {
        println!(
            "  Stage {}: {:<12} -> {} ({})",
            index + 1,
            stage.material.as_str(),
            stage.destination,
            stage.category
        );
    }

    Ok(())
}
