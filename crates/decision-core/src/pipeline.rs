//! The two-stage access-event pipeline.
//!
//! Stage 1 classifies every frame of both phases against the binary
//! occupancy classifier and cross-checks the two phase decisions. Stage 2
//! runs only after stage 1 succeeds, because which frames it sends depends on
//! stage 1's outcome: the occupied phase's frames are re-classified against
//! the food classifier and reduced to a single decision.
//!
//! Within each stage, per-frame calls are issued concurrently and the stage
//! waits for all of them. One failed call fails the whole event; there is no
//! partial or degraded result.

use std::sync::Arc;

use fridgewatch_classifier_client::ImageClassifier;
use fridgewatch_common::config::{AppConfig, ClassifierTarget};
use fridgewatch_common::error::{FridgeError, FridgeResult};
use fridgewatch_event_model::access::AccessEvent;
use fridgewatch_event_model::frame::{Direction, Frame};
use fridgewatch_event_model::prediction::ClassPrediction;

use crate::food::reduce_food;
use crate::occupancy::decide_occupancy;
use crate::partition::partition_frames;
use crate::store::EventStore;

/// Pipeline settings: batch size and the two classifier targets.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Frames captured per action phase.
    pub frames_per_action: usize,

    /// Binary item-in-hand classifier.
    pub occupancy: ClassifierTarget,

    /// Food identity classifier.
    pub food: ClassifierTarget,
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            frames_per_action: config.frames_per_action,
            occupancy: config.classifiers.occupancy.clone(),
            food: config.classifiers.food.clone(),
        }
    }
}

/// Turns one uploaded frame batch into one access event.
///
/// Holds no per-request state: events from different requests are fully
/// independent and may run in unlimited parallelism.
pub struct EventPipeline<C> {
    classifier: Arc<C>,
    store: Arc<dyn EventStore>,
    config: PipelineConfig,
}

impl<C: ImageClassifier> EventPipeline<C> {
    pub fn new(classifier: Arc<C>, store: Arc<dyn EventStore>, config: PipelineConfig) -> Self {
        Self {
            classifier,
            store,
            config,
        }
    }

    /// Classify one access event from its raw frame batch.
    ///
    /// Any error is terminal for this event: no `AccessEvent` is produced and
    /// nothing is appended to the store.
    pub async fn classify_access_event(&self, frames: Vec<Frame>) -> FridgeResult<AccessEvent> {
        let batch = partition_frames(frames, self.config.frames_per_action)?;
        let timestamp = batch.timestamp;

        // Stage 1: occupancy, both phases concurrently.
        let (into_preds, out_preds) = futures::future::try_join(
            self.classify_phase(&batch.into_fridge, &self.config.occupancy),
            self.classify_phase(&batch.out_of_fridge, &self.config.occupancy),
        )
        .await?;

        let into_decision = decide_occupancy(&into_preds);
        let out_decision = decide_occupancy(&out_preds);
        tracing::debug!(
            into_occupied = into_decision.occupied,
            out_occupied = out_decision.occupied,
            "Occupancy decisions"
        );

        if into_decision.occupied == out_decision.occupied {
            tracing::error!(
                decision = into_decision.occupied,
                "Occupancy classification is the same for both phases"
            );
            return Err(FridgeError::Inconsistent {
                decision: into_decision.occupied,
            });
        }

        // Stage 2: food identity, only on the occupied phase.
        let (occupied_frames, phase) = if into_decision.occupied {
            (&batch.into_fridge, Direction::IntoFridge)
        } else {
            (&batch.out_of_fridge, Direction::OutOfFridge)
        };
        let food_preds = self.classify_phase(occupied_frames, &self.config.food).await?;
        let food = reduce_food(&food_preds);

        let event = AccessEvent::new(timestamp, phase.into(), food);
        tracing::info!("{} at {}", event, event.timestamp.to_rfc3339());

        self.store.append(&event)?;
        Ok(event)
    }

    /// Classify every frame of one phase concurrently against one target.
    async fn classify_phase(
        &self,
        frames: &[Frame],
        target: &ClassifierTarget,
    ) -> FridgeResult<Vec<ClassPrediction>> {
        futures::future::try_join_all(
            frames
                .iter()
                .map(|frame| self.classifier.classify(target, &frame.image)),
        )
        .await
    }
}
