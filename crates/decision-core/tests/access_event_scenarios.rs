//! End-to-end pipeline scenarios driven through the fake classifier.

use std::sync::Arc;

use fridgewatch_classifier_client::FakeClassifier;
use fridgewatch_common::config::ClassifierTarget;
use fridgewatch_common::error::FridgeError;
use fridgewatch_decision_core::{EventPipeline, InMemoryEventStore, PipelineConfig};
use fridgewatch_event_model::access::EventDirection;
use fridgewatch_event_model::frame::{Frame, FrameMeta};
use fridgewatch_event_model::prediction::{
    ClassPrediction, LabelScore, EMPTY_LABEL, NON_EMPTY_LABEL,
};

const FRAMES_PER_ACTION: usize = 5;
const BATCH_TIMESTAMP: i64 = 1_717_171_717;

fn occupancy_target() -> ClassifierTarget {
    ClassifierTarget {
        project_id: "occupancy-project".to_string(),
        iteration_name: "Iteration1".to_string(),
    }
}

fn food_target() -> ClassifierTarget {
    ClassifierTarget {
        project_id: "food-project".to_string(),
        iteration_name: "Iteration3".to_string(),
    }
}

fn pipeline_config() -> PipelineConfig {
    PipelineConfig {
        frames_per_action: FRAMES_PER_ACTION,
        occupancy: occupancy_target(),
        food: food_target(),
    }
}

fn frame(sequence: usize, tag: &str) -> Frame {
    let meta = FrameMeta::parse(&format!("img_{BATCH_TIMESTAMP}_{sequence}_{tag}")).unwrap();
    Frame::new(meta, format!("{tag}-{sequence}").into_bytes())
}

fn full_batch() -> Vec<Frame> {
    let mut frames = vec![];
    for i in 0..FRAMES_PER_ACTION {
        frames.push(frame(i, "IN"));
    }
    for i in 0..FRAMES_PER_ACTION {
        frames.push(frame(i, "OUT"));
    }
    frames
}

fn binary_prediction(empty: f64, non_empty: f64) -> ClassPrediction {
    ClassPrediction::new(vec![
        LabelScore::new(EMPTY_LABEL, empty),
        LabelScore::new(NON_EMPTY_LABEL, non_empty),
    ])
}

/// Script the occupancy pass so one phase looks occupied and the other empty.
fn stub_occupancy(fake: &FakeClassifier, occupied_tag: &str, empty_tag: &str) {
    for i in 0..FRAMES_PER_ACTION {
        // One confident frame per phase, the rest uninformative.
        let (empty, non_empty) = if i == 2 { (0.3, 0.8) } else { (0.2, 0.1) };
        fake.stub(
            &occupancy_target(),
            frame(i, occupied_tag).image.as_slice(),
            binary_prediction(empty, non_empty),
        );

        let (empty, non_empty) = if i == 2 { (0.7, 0.2) } else { (0.4, 0.1) };
        fake.stub(
            &occupancy_target(),
            frame(i, empty_tag).image.as_slice(),
            binary_prediction(empty, non_empty),
        );
    }
}

fn stub_food(fake: &FakeClassifier, tag: &str, winners: &[(&str, f64)]) {
    assert_eq!(winners.len(), FRAMES_PER_ACTION);
    for (i, (label, probability)) in winners.iter().enumerate() {
        fake.stub(
            &food_target(),
            frame(i, tag).image.as_slice(),
            ClassPrediction::new(vec![LabelScore::new(*label, *probability)]),
        );
    }
}

fn build_pipeline(
    fake: Arc<FakeClassifier>,
    store: Arc<InMemoryEventStore>,
) -> EventPipeline<FakeClassifier> {
    EventPipeline::new(fake, store, pipeline_config())
}

#[tokio::test]
async fn item_placed_into_fridge_yields_in_event() {
    let fake = Arc::new(FakeClassifier::new());
    stub_occupancy(&fake, "IN", "OUT");
    stub_food(
        &fake,
        "IN",
        &[
            ("milk", 0.88),
            ("milk", 0.5),
            ("apple", 0.3),
            ("milk", 0.7),
            ("cheese", 0.2),
        ],
    );

    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = build_pipeline(fake.clone(), store.clone());

    let event = pipeline.classify_access_event(full_batch()).await.unwrap();

    assert_eq!(event.direction, EventDirection::In);
    assert_eq!(event.food_label, "milk");
    assert!((event.probability - 0.88).abs() < 1e-9);
    assert_eq!(event.timestamp.timestamp(), BATCH_TIMESTAMP);

    // One append per successful event.
    assert_eq!(store.events(), vec![event]);
}

#[tokio::test]
async fn item_taken_out_of_fridge_yields_out_event() {
    let fake = Arc::new(FakeClassifier::new());
    stub_occupancy(&fake, "OUT", "IN");
    stub_food(
        &fake,
        "OUT",
        &[
            ("juice", 0.6),
            ("juice", 0.91),
            ("apple", 0.4),
            ("juice", 0.2),
            ("butter", 0.5),
        ],
    );

    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = build_pipeline(fake.clone(), store.clone());

    let event = pipeline.classify_access_event(full_batch()).await.unwrap();

    assert_eq!(event.direction, EventDirection::Out);
    assert_eq!(event.food_label, "juice");
    assert!((event.probability - 0.91).abs() < 1e-9);
}

#[tokio::test]
async fn food_pass_only_sees_the_occupied_phase() {
    let fake = Arc::new(FakeClassifier::new());
    stub_occupancy(&fake, "IN", "OUT");
    stub_food(
        &fake,
        "IN",
        &[
            ("milk", 0.9),
            ("milk", 0.9),
            ("milk", 0.9),
            ("milk", 0.9),
            ("milk", 0.9),
        ],
    );

    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = build_pipeline(fake.clone(), store.clone());
    pipeline.classify_access_event(full_batch()).await.unwrap();

    // Occupancy saw every frame; food saw only the occupied phase's frames.
    assert_eq!(
        fake.call_count_for(&occupancy_target()),
        FRAMES_PER_ACTION * 2
    );
    assert_eq!(fake.call_count_for(&food_target()), FRAMES_PER_ACTION);

    let food_images: Vec<_> = fake
        .calls()
        .into_iter()
        .filter(|(project, _)| *project == food_target().project_id)
        .map(|(_, image)| image)
        .collect();
    assert!(food_images
        .iter()
        .all(|image| image.starts_with(b"IN-")));
}

#[tokio::test]
async fn both_phases_occupied_is_inconsistent() {
    let fake = Arc::new(FakeClassifier::new());
    for tag in ["IN", "OUT"] {
        for i in 0..FRAMES_PER_ACTION {
            fake.stub(
                &occupancy_target(),
                frame(i, tag).image.as_slice(),
                binary_prediction(0.2, 0.9),
            );
        }
    }

    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = build_pipeline(fake.clone(), store.clone());

    let err = pipeline
        .classify_access_event(full_batch())
        .await
        .unwrap_err();

    assert!(matches!(err, FridgeError::Inconsistent { decision: true }));
    // The food pass never starts and nothing is recorded.
    assert_eq!(fake.call_count_for(&food_target()), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn neither_phase_occupied_is_inconsistent() {
    let fake = Arc::new(FakeClassifier::new());
    for tag in ["IN", "OUT"] {
        for i in 0..FRAMES_PER_ACTION {
            fake.stub(
                &occupancy_target(),
                frame(i, tag).image.as_slice(),
                binary_prediction(0.9, 0.1),
            );
        }
    }

    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = build_pipeline(fake.clone(), store.clone());

    let err = pipeline
        .classify_access_event(full_batch())
        .await
        .unwrap_err();

    assert!(matches!(err, FridgeError::Inconsistent { decision: false }));
}

#[tokio::test]
async fn short_batch_is_rejected_before_any_classification() {
    let fake = Arc::new(FakeClassifier::new());
    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = build_pipeline(fake.clone(), store.clone());

    let mut frames = full_batch();
    frames.pop();
    let err = pipeline.classify_access_event(frames).await.unwrap_err();

    assert!(matches!(
        err,
        FridgeError::InputSize {
            expected: 10,
            actual: 9
        }
    ));
    assert!(fake.calls().is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn single_failed_classification_fails_the_event() {
    let fake = Arc::new(FakeClassifier::new());
    stub_occupancy(&fake, "IN", "OUT");
    // One frame of the occupancy pass fails.
    fake.stub_failure(
        &occupancy_target(),
        frame(3, "OUT").image.as_slice(),
        "connection timed out",
    );

    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = build_pipeline(fake.clone(), store.clone());

    let err = pipeline
        .classify_access_event(full_batch())
        .await
        .unwrap_err();

    assert!(matches!(err, FridgeError::Classification { .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn failed_food_classification_fails_the_event() {
    let fake = Arc::new(FakeClassifier::new());
    stub_occupancy(&fake, "IN", "OUT");
    stub_food(
        &fake,
        "IN",
        &[
            ("milk", 0.9),
            ("milk", 0.9),
            ("milk", 0.9),
            ("milk", 0.9),
            ("milk", 0.9),
        ],
    );
    fake.stub_failure(
        &food_target(),
        frame(1, "IN").image.as_slice(),
        "bad gateway",
    );

    let store = Arc::new(InMemoryEventStore::new());
    let pipeline = build_pipeline(fake.clone(), store.clone());

    let err = pipeline
        .classify_access_event(full_batch())
        .await
        .unwrap_err();

    assert!(matches!(err, FridgeError::Classification { .. }));
    assert!(store.is_empty());
}
