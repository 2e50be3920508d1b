//! FridgeWatch Decision Core
//!
//! Turns raw per-frame classification scores into a single semantic event
//! ("item X placed in" / "item X taken out of" the fridge):
//! - **Partition:** Split one upload batch into its two action phases
//! - **Occupancy:** Per-phase item-in-hand decision from per-label maxima
//! - **Food:** Reduce the occupied phase's food predictions to one decision
//! - **Pipeline:** The two-stage composition, including the consistency
//!   check between phases
//!
//! Classifier calls go through the injected [`ImageClassifier`] boundary;
//! everything else here is pure computation over data.
//!
//! [`ImageClassifier`]: fridgewatch_classifier_client::ImageClassifier

pub mod food;
pub mod occupancy;
pub mod partition;
pub mod pipeline;
pub mod store;

pub use occupancy::decide_occupancy;
pub use pipeline::{EventPipeline, PipelineConfig};
pub use store::{EventStore, InMemoryEventStore, NullEventStore};
