//! FridgeWatch Classifier Client
//!
//! The boundary to the external image-classification service. The decision
//! core only sees the [`ImageClassifier`] trait; production wiring uses
//! [`CustomVisionClient`], tests use [`FakeClassifier`].
//!
//! Per-frame classifications are independent, read-only requests. The client
//! performs no retries and no caching: a single failed call propagates as the
//! whole event's failure.

use async_trait::async_trait;

use fridgewatch_common::config::ClassifierTarget;
use fridgewatch_common::error::FridgeResult;
use fridgewatch_event_model::prediction::ClassPrediction;

pub mod custom_vision;
pub mod fake;

pub use custom_vision::CustomVisionClient;
pub use fake::FakeClassifier;

/// An external classifier that scores one image against a trained iteration.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Classify a single image.
    ///
    /// Returns one (label, probability) pair per label the target classifier
    /// knows. Any transport, timeout, or decode failure surfaces as
    /// `FridgeError::Classification`.
    async fn classify(
        &self,
        target: &ClassifierTarget,
        image: &[u8],
    ) -> FridgeResult<ClassPrediction>;
}
