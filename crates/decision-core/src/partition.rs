//! Frame Partitioner: splits one upload batch into its two action phases.

use chrono::{DateTime, Utc};

use fridgewatch_common::error::{FridgeError, FridgeResult};
use fridgewatch_event_model::frame::{Direction, Frame};

/// One upload batch split by capture direction.
///
/// Both groups hold exactly `frames_per_action` frames in upload order.
#[derive(Debug, Clone)]
pub struct PartitionedBatch {
    /// Event-level capture time shared by the whole batch.
    pub timestamp: DateTime<Utc>,

    /// Frames from the hand-moving-into-fridge phase.
    pub into_fridge: Vec<Frame>,

    /// Frames from the hand-moving-out-of-fridge phase.
    pub out_of_fridge: Vec<Frame>,
}

/// Partition an ordered batch of frames into the two action phases.
///
/// Fails fast before any classification is attempted:
/// - total count must equal exactly `2 * frames_per_action`
/// - each phase must end up with exactly `frames_per_action` frames
pub fn partition_frames(
    frames: Vec<Frame>,
    frames_per_action: usize,
) -> FridgeResult<PartitionedBatch> {
    let expected = frames_per_action * 2;
    if frames.len() != expected {
        tracing::error!(
            expected,
            actual = frames.len(),
            "Invalid number of frames for access event"
        );
        return Err(FridgeError::InputSize {
            expected,
            actual: frames.len(),
        });
    }

    let timestamp = frames[0].meta.timestamp;

    let mut into_fridge = Vec::with_capacity(frames_per_action);
    let mut out_of_fridge = Vec::with_capacity(frames_per_action);
    for frame in frames {
        tracing::debug!(
            sequence = frame.meta.sequence_index,
            direction = frame.meta.direction.tag(),
            "Collecting frame"
        );
        match frame.meta.direction {
            Direction::IntoFridge => into_fridge.push(frame),
            Direction::OutOfFridge => out_of_fridge.push(frame),
        }
    }

    if into_fridge.len() != frames_per_action {
        return Err(FridgeError::PhaseImbalance {
            into_fridge: into_fridge.len(),
            out_of_fridge: out_of_fridge.len(),
        });
    }

    Ok(PartitionedBatch {
        timestamp,
        into_fridge,
        out_of_fridge,
    })
}
