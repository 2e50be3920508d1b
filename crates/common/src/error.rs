//! Error types shared across FridgeWatch crates.

/// Top-level error type for FridgeWatch operations.
///
/// Every error is terminal for the single access event that produced it.
/// Errors never corrupt or block processing of other concurrent events.
#[derive(Debug, thiserror::Error)]
pub enum FridgeError {
    /// The upload did not carry exactly `2 * frames_per_action` frames.
    #[error("expected {expected} frames per access event, got {actual}")]
    InputSize { expected: usize, actual: usize },

    /// A frame carried a capture-direction tag outside the known vocabulary.
    #[error("unrecognized capture direction tag: {tag:?}")]
    UnknownDirection { tag: String },

    /// A frame header could not be decoded into a typed record.
    #[error("malformed frame header {name:?}: {message}")]
    MalformedFrame { name: String, message: String },

    /// The two phases did not split evenly by direction tag.
    #[error(
        "unbalanced phases: {into_fridge} into-fridge / {out_of_fridge} out-of-fridge frames"
    )]
    PhaseImbalance {
        into_fridge: usize,
        out_of_fridge: usize,
    },

    /// Both phases agreed on occupancy, so no single direction can be assigned.
    ///
    /// Carries the shared decision value for diagnostics. Retrying the same
    /// frame set deterministically reproduces the same inconsistency.
    #[error("both phases classified with item-in-hand = {decision}")]
    Inconsistent { decision: bool },

    /// A per-frame call to an external classifier failed.
    #[error("classification service error: {message}")]
    Classification { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FridgeError.
pub type FridgeResult<T> = Result<T, FridgeError>;

impl FridgeError {
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn malformed_frame(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedFrame {
            name: name.into(),
            message: msg.into(),
        }
    }
}
