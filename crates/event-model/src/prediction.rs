//! Classifier output types.

use serde::{Deserialize, Serialize};

/// Label emitted by the occupancy classifier for an empty hand.
pub const EMPTY_LABEL: &str = "Empty";

/// Label emitted by the occupancy classifier for a hand holding an item.
pub const NON_EMPTY_LABEL: &str = "Non-empty";

/// A single (label, probability) pair from a classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,

    /// Confidence in `[0.0, 1.0]`.
    pub probability: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Output of invoking an external classifier on one frame.
///
/// Immutable once received; one entry per label known to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPrediction {
    pub predictions: Vec<LabelScore>,
}

impl ClassPrediction {
    pub fn new(predictions: Vec<LabelScore>) -> Self {
        Self { predictions }
    }

    /// Probability reported for the given label, if present.
    pub fn probability_for(&self, label: &str) -> Option<f64> {
        self.predictions
            .iter()
            .find(|score| score.label == label)
            .map(|score| score.probability)
    }

    /// The single most confident label.
    ///
    /// Ties keep the first entry in received order, so the result is stable
    /// regardless of whether the service pre-sorts its response.
    pub fn top(&self) -> Option<&LabelScore> {
        let mut best: Option<&LabelScore> = None;
        for score in &self.predictions {
            match best {
                Some(current) if score.probability <= current.probability => {}
                _ => best = Some(score),
            }
        }
        best
    }
}

/// The most confident food identification across the occupied phase's frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDecision {
    pub label: String,
    pub probability: f64,
}

impl FoodDecision {
    /// The neutral starting point for the food reduction: any non-empty
    /// classification overrides it.
    pub fn none() -> Self {
        Self {
            label: String::new(),
            probability: 0.0,
        }
    }
}
