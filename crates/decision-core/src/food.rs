//! Food Identification: reduce per-frame food predictions to one decision.

use fridgewatch_event_model::prediction::{ClassPrediction, FoodDecision};

/// Select the single most confident food identification across a phase.
///
/// Only each frame's top label counts. The fold starts at `("", 0.0)` so any
/// non-empty classification overrides it, and the strict `>` comparison keeps
/// the first entry that attains the global maximum (stable, left-to-right).
/// Empty or zero-confidence input reduces to `("", 0.0)` without error.
pub fn reduce_food(predictions: &[ClassPrediction]) -> FoodDecision {
    predictions
        .iter()
        .filter_map(ClassPrediction::top)
        .fold(FoodDecision::none(), |best, top| {
            if top.probability > best.probability {
                FoodDecision {
                    label: top.label.clone(),
                    probability: top.probability,
                }
            } else {
                best
            }
        })
}
