//! HTTP client for a Custom-Vision-style prediction endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use fridgewatch_common::config::ClassifierTarget;
use fridgewatch_common::error::{FridgeError, FridgeResult};
use fridgewatch_event_model::prediction::{ClassPrediction, LabelScore};

use crate::ImageClassifier;

/// Header carrying the prediction API key.
const PREDICTION_KEY_HEADER: &str = "Prediction-Key";

/// Client for the hosted prediction service.
///
/// One instance serves both classifiers; the [`ClassifierTarget`] passed per
/// call selects the project and iteration to query.
pub struct CustomVisionClient {
    http: reqwest::Client,
    endpoint: String,
    prediction_key: String,
}

/// Wire shape of one prediction entry.
#[derive(Debug, Deserialize)]
struct WireScore {
    #[serde(rename = "tagName")]
    tag_name: String,
    probability: f64,
}

/// Wire shape of the prediction response body.
#[derive(Debug, Deserialize)]
struct WireResponse {
    predictions: Vec<WireScore>,
}

impl CustomVisionClient {
    pub fn new(endpoint: impl Into<String>, prediction_key: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            endpoint,
            prediction_key: prediction_key.into(),
        }
    }

    fn prediction_url(&self, target: &ClassifierTarget) -> String {
        format!(
            "{}/customvision/v3.0/Prediction/{}/classify/iterations/{}/image",
            self.endpoint, target.project_id, target.iteration_name
        )
    }
}

#[async_trait]
impl ImageClassifier for CustomVisionClient {
    async fn classify(
        &self,
        target: &ClassifierTarget,
        image: &[u8],
    ) -> FridgeResult<ClassPrediction> {
        let url = self.prediction_url(target);
        tracing::debug!(%url, bytes = image.len(), "Sending frame to prediction service");

        let response = self
            .http
            .post(&url)
            .header(PREDICTION_KEY_HEADER, &self.prediction_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| FridgeError::classification(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FridgeError::classification(format!(
                "prediction service returned {status} for {url}"
            )));
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| FridgeError::classification(format!("malformed response body: {e}")))?;

        Ok(ClassPrediction::new(
            wire.predictions
                .into_iter()
                .map(|score| LabelScore::new(score.tag_name, score.probability))
                .collect(),
        ))
    }
}
