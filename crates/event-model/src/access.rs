//! The final structured outcome of one fridge-access request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frame::Direction;
use crate::prediction::FoodDecision;

/// Which way the item moved, derived from whichever phase was occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDirection {
    /// Item placed into the fridge.
    In,
    /// Item taken out of the fridge.
    Out,
}

impl From<Direction> for EventDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::IntoFridge => Self::In,
            Direction::OutOfFridge => Self::Out,
        }
    }
}

impl EventDirection {
    /// Human-readable phrasing used in logs and responses.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::In => "placed in",
            Self::Out => "taken out of",
        }
    }
}

/// One completed access event. Constructed once per request; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Event-level capture time shared by the whole frame batch.
    pub timestamp: DateTime<Utc>,

    pub direction: EventDirection,

    pub food_label: String,

    /// Confidence of the food identification.
    pub probability: f64,
}

impl AccessEvent {
    pub fn new(timestamp: DateTime<Utc>, direction: EventDirection, food: FoodDecision) -> Self {
        Self {
            timestamp,
            direction,
            food_label: food.label,
            probability: food.probability,
        }
    }
}

impl std::fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} fridge with probability {}",
            self.food_label,
            self.direction.phrase(),
            self.probability
        )
    }
}
