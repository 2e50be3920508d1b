//! Scriptable in-memory classifier for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use fridgewatch_common::config::ClassifierTarget;
use fridgewatch_common::error::{FridgeError, FridgeResult};
use fridgewatch_event_model::prediction::ClassPrediction;

use crate::ImageClassifier;

type StubKey = (String, Vec<u8>);

enum Scripted {
    Respond(ClassPrediction),
    Fail(String),
}

/// A classifier whose responses are scripted per (project, image) pair.
///
/// Unscripted lookups fail, so a test that accidentally classifies frames it
/// did not expect to (e.g. the wrong phase in the food pass) fails loudly.
#[derive(Default)]
pub struct FakeClassifier {
    stubs: Mutex<HashMap<StubKey, Scripted>>,
    calls: Mutex<Vec<StubKey>>,
}

impl FakeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful classification for one (project, image) pair.
    pub fn stub(&self, target: &ClassifierTarget, image: &[u8], prediction: ClassPrediction) {
        self.stubs.lock().unwrap().insert(
            (target.project_id.clone(), image.to_vec()),
            Scripted::Respond(prediction),
        );
    }

    /// Script a service failure for one (project, image) pair.
    pub fn stub_failure(&self, target: &ClassifierTarget, image: &[u8], message: &str) {
        self.stubs.lock().unwrap().insert(
            (target.project_id.clone(), image.to_vec()),
            Scripted::Fail(message.to_string()),
        );
    }

    /// Every (project, image) pair classified so far, in call order.
    pub fn calls(&self) -> Vec<(String, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls issued against the given project.
    pub fn call_count_for(&self, target: &ClassifierTarget) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(project, _)| *project == target.project_id)
            .count()
    }
}

#[async_trait]
impl ImageClassifier for FakeClassifier {
    async fn classify(
        &self,
        target: &ClassifierTarget,
        image: &[u8],
    ) -> FridgeResult<ClassPrediction> {
        let key = (target.project_id.clone(), image.to_vec());
        self.calls.lock().unwrap().push(key.clone());

        match self.stubs.lock().unwrap().get(&key) {
            Some(Scripted::Respond(prediction)) => Ok(prediction.clone()),
            Some(Scripted::Fail(message)) => Err(FridgeError::classification(message.clone())),
            None => Err(FridgeError::classification(format!(
                "no scripted response for project {} / image {:?}",
                target.project_id,
                String::from_utf8_lossy(image)
            ))),
        }
    }
}
