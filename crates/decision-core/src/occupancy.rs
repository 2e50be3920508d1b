//! Occupancy Decision: was a hand-held item present during one phase?
//!
//! For each label the maximum probability across the phase's frames is used,
//! not the average. A single clearly-confident frame is sufficient evidence,
//! which keeps the decision robust to a few blurry frames per phase.

use fridgewatch_event_model::prediction::{ClassPrediction, EMPTY_LABEL, NON_EMPTY_LABEL};

/// The per-phase occupancy result, with the per-label maxima that produced it.
///
/// The maxima are diagnostics, not part of the business result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupancyDecision {
    /// True iff a hand-held item was present during this phase.
    pub occupied: bool,

    /// Maximum `Empty` probability observed across the phase's frames.
    pub max_empty: f64,

    /// Maximum `Non-empty` probability observed across the phase's frames.
    pub max_non_empty: f64,
}

/// Decide occupancy for one phase from its per-frame predictions.
///
/// Occupied iff `max(Non-empty) > max(Empty)`, strictly: a tie counts as
/// "not occupied". The decision is order-independent within the phase.
pub fn decide_occupancy(predictions: &[ClassPrediction]) -> OccupancyDecision {
    let max_for = |label: &str| {
        predictions
            .iter()
            .filter_map(|prediction| prediction.probability_for(label))
            .fold(0.0_f64, f64::max)
    };

    let max_empty = max_for(EMPTY_LABEL);
    let max_non_empty = max_for(NON_EMPTY_LABEL);
    tracing::debug!(max_empty, max_non_empty, "Per-label maxima for phase");

    OccupancyDecision {
        occupied: max_non_empty > max_empty,
        max_empty,
        max_non_empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fridgewatch_event_model::prediction::LabelScore;

    fn binary_prediction(empty: f64, non_empty: f64) -> ClassPrediction {
        ClassPrediction::new(vec![
            LabelScore::new(EMPTY_LABEL, empty),
            LabelScore::new(NON_EMPTY_LABEL, non_empty),
        ])
    }

    #[test]
    fn test_single_confident_frame_is_sufficient() {
        let predictions = vec![
            binary_prediction(0.6, 0.4),
            binary_prediction(0.55, 0.45),
            binary_prediction(0.2, 0.9),
        ];
        let decision = decide_occupancy(&predictions);
        assert!(decision.occupied);
        assert!((decision.max_non_empty - 0.9).abs() < 1e-9);
        assert!((decision.max_empty - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_empty_hand_wins() {
        let predictions = vec![binary_prediction(0.7, 0.2), binary_prediction(0.6, 0.3)];
        assert!(!decide_occupancy(&predictions).occupied);
    }

    #[test]
    fn test_tie_is_not_occupied() {
        let predictions = vec![binary_prediction(0.5, 0.5)];
        assert!(!decide_occupancy(&predictions).occupied);
    }

    #[test]
    fn test_no_predictions_is_not_occupied() {
        assert!(!decide_occupancy(&[]).occupied);
    }

    proptest::proptest! {
        #[test]
        fn prop_decision_is_order_independent(
            scores in proptest::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 1..12),
            rotation in 0usize..12,
        ) {
            let predictions: Vec<ClassPrediction> = scores
                .iter()
                .map(|(empty, non_empty)| binary_prediction(*empty, *non_empty))
                .collect();

            let baseline = decide_occupancy(&predictions);

            let mut reversed = predictions.clone();
            reversed.reverse();
            proptest::prop_assert_eq!(decide_occupancy(&reversed), baseline);

            let mut rotated = predictions.clone();
            rotated.rotate_left(rotation % predictions.len());
            proptest::prop_assert_eq!(decide_occupancy(&rotated), baseline);
        }
    }
}
