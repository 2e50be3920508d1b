//! Request routing and the upload handler.

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use http_body_util::{BodyStream, Full};
use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};

use fridgewatch_classifier_client::CustomVisionClient;
use fridgewatch_common::error::{FridgeError, FridgeResult};
use fridgewatch_decision_core::EventPipeline;
use fridgewatch_event_model::access::AccessEvent;
use fridgewatch_event_model::frame::Frame;

type HttpBody = Full<Bytes>;

/// Shared handler state: one pipeline serves every request.
pub struct AppState {
    pub pipeline: EventPipeline<CustomVisionClient>,
}

/// Dispatch one request.
pub async fn handle_request(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> Result<Response<HttpBody>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = if method == Method::GET && (path == "/" || path == "/health") {
        json_response(StatusCode::OK, serde_json::json!({ "status": "ok" }))
    } else if method == Method::POST && path == "/upload-images" {
        match classify_upload(&state, req).await {
            Ok(event) => json_response(
                StatusCode::OK,
                serde_json::json!({
                    "message": event.to_string(),
                    "event": event,
                }),
            ),
            Err(err) => {
                let status = status_for(&err);
                tracing::warn!(%err, %status, "Upload request failed");
                json_response(status, serde_json::json!({ "error": err.to_string() }))
            }
        }
    } else {
        json_response(
            StatusCode::NOT_FOUND,
            serde_json::json!({ "error": "not found" }),
        )
    };

    Ok(response)
}

/// Parse the multipart upload into frames and run the event pipeline.
async fn classify_upload(
    state: &AppState,
    req: Request<Incoming>,
) -> FridgeResult<AccessEvent> {
    let boundary = req
        .headers()
        .get(hyper::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| multer::parse_boundary(value).ok())
        .ok_or_else(|| {
            FridgeError::malformed_frame("<body>", "missing multipart boundary")
        })?;

    let body_stream = BodyStream::new(req.into_body())
        .try_filter_map(|frame| async move { Ok(frame.into_data().ok()) });
    let mut multipart = multer::Multipart::new(body_stream, boundary);

    let mut frames = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FridgeError::malformed_frame("<body>", format!("multipart error: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let image = field.bytes().await.map_err(|e| {
            FridgeError::malformed_frame(&name, format!("failed to read part body: {e}"))
        })?;
        frames.push(Frame::from_named_part(&name, image.to_vec())?);
    }

    state.pipeline.classify_access_event(frames).await
}

/// Map the error taxonomy onto HTTP statuses.
///
/// An inconsistent event is a distinct, user-visible failure rather than a
/// generic 500; classifier failures surface as a bad gateway.
fn status_for(err: &FridgeError) -> StatusCode {
    match err {
        FridgeError::InputSize { .. }
        | FridgeError::UnknownDirection { .. }
        | FridgeError::MalformedFrame { .. }
        | FridgeError::PhaseImbalance { .. } => StatusCode::BAD_REQUEST,
        FridgeError::Inconsistent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        FridgeError::Classification { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn json_response(status: StatusCode, body: serde_json::Value) -> Response<HttpBody> {
    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(Full::from(Bytes::from(
            serde_json::to_vec(&body).unwrap_or_default(),
        )))
        .unwrap()
}
