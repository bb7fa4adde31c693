//! # Belt Runner
//!
//! Drives a [`Conveyor`] in real time: renders each event as it happens and
//! pauses for the belt travel time after every item.
//!
//! The per-item logic is synchronous, so shutdown is only observed at the
//! pause. An interrupt that lands mid-item lets that item finish printing;
//! it is not counted because its pause never completes.

use crate::render::{self, StopReason};
use sortline_core::{Conveyor, LineEvent, Plant, RunSummary, Sensor, SortlineError};
use std::future::{Future, poll_fn};
use std::io::Write;
use std::task::Poll;
use std::time::Duration;

/// How a belt run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeltRun {
    pub summary: RunSummary,
    pub reason: StopReason,
}

/// Write the intro, then run the belt until `shutdown` resolves or the item
/// limit is reached.
///
/// `shutdown` is polled once before anything is written, then raced against
/// each pause. Listeners such as `tokio::signal::ctrl_c()` only register
/// when first polled.
pub async fn run_belt<S, W, F>(
    plant: &Plant,
    sensor: &mut S,
    out: &mut W,
    shutdown: F,
) -> Result<BeltRun, SortlineError>
where
    S: Sensor + ?Sized,
    W: Write,
    F: Future<Output = ()>,
{
    let mut conveyor = Conveyor::new(&plant.table, &plant.line);
    let travel = Duration::from_millis(plant.belt.travel_millis);
    let limit = plant.belt.max_items;
    tokio::pin!(shutdown);

    let stopped = poll_fn(|cx| Poll::Ready(shutdown.as_mut().poll(cx).is_ready())).await;
    render::write_intro(out).map_err(io_error)?;
    if stopped {
        tracing::info!("Shutdown requested before the first item");
        return Ok(finish(&mut conveyor, StopReason::Interrupted));
    }
    if limit == Some(0) {
        return Ok(finish(&mut conveyor, StopReason::ItemLimit));
    }

    while let Some(event) = conveyor.step(sensor) {
        render::write_event(out, &event).map_err(io_error)?;

        let LineEvent::BeltAdvance { item } = event else {
            continue;
        };
        out.flush().map_err(io_error)?;
        tracing::debug!(item = item.0, "Item off the belt");

        if limit.is_some_and(|max| item.0 >= max) {
            // No pause follows the last item.
            conveyor.advance();
            tracing::info!("Item limit reached");
            return Ok(finish(&mut conveyor, StopReason::ItemLimit));
        }

        tokio::select! {
            biased;
            () = &mut shutdown => {
                tracing::info!("Shutdown requested");
                return Ok(finish(&mut conveyor, StopReason::Interrupted));
            }
            () = tokio::time::sleep(travel) => {
                conveyor.advance();
            }
        }
    }

    // `step` only yields `None` once terminated, which this loop never does.
    Ok(finish(&mut conveyor, StopReason::Interrupted))
}

fn finish(conveyor: &mut Conveyor<'_>, reason: StopReason) -> BeltRun {
    BeltRun {
        summary: conveyor.terminate(),
        reason,
    }
}

fn io_error(e: std::io::Error) -> SortlineError {
    SortlineError::IoError(format!("Write belt output: {}", e))
}

// =============================================================================
// TESTS
// =============================================================================
