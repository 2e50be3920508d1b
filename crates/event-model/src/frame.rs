//! Captured frames and their typed headers.
//!
//! Upload field names encode a per-frame header as four underscore-separated
//! parts: `<prefix>_<timestamp>_<sequence>_<direction>`, e.g.
//! `img_1717171717_2_IN`. The header is decoded into a typed record at the
//! ingestion boundary so nothing downstream ever re-parses strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fridgewatch_common::error::{FridgeError, FridgeResult};

/// Capture direction of one frame: which half of the access event it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Hand moving into the fridge.
    IntoFridge,
    /// Hand moving out of the fridge.
    OutOfFridge,
}

impl Direction {
    /// Wire tag for the into-fridge phase.
    pub const TAG_IN: &'static str = "IN";
    /// Wire tag for the out-of-fridge phase.
    pub const TAG_OUT: &'static str = "OUT";

    /// Decode a wire tag. Tags outside the fixed vocabulary are rejected.
    pub fn from_tag(tag: &str) -> FridgeResult<Self> {
        match tag {
            Self::TAG_IN => Ok(Self::IntoFridge),
            Self::TAG_OUT => Ok(Self::OutOfFridge),
            other => Err(FridgeError::UnknownDirection {
                tag: other.to_string(),
            }),
        }
    }

    /// The wire tag for this direction.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::IntoFridge => Self::TAG_IN,
            Self::OutOfFridge => Self::TAG_OUT,
        }
    }
}

/// Typed per-frame header decoded from an upload field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMeta {
    /// Event-level capture time, shared by every frame of one access event.
    pub timestamp: DateTime<Utc>,

    /// Sequence position of this frame within its phase.
    pub sequence_index: u32,

    /// Which phase this frame was captured in.
    pub direction: Direction,
}

impl FrameMeta {
    /// Decode a header from an upload field name.
    pub fn parse(name: &str) -> FridgeResult<Self> {
        let parts: Vec<&str> = name.split('_').collect();
        if parts.len() != 4 {
            return Err(FridgeError::malformed_frame(
                name,
                format!("expected 4 underscore-separated parts, got {}", parts.len()),
            ));
        }

        let epoch_secs: i64 = parts[1]
            .parse()
            .map_err(|e| FridgeError::malformed_frame(name, format!("bad timestamp: {e}")))?;
        let timestamp = DateTime::from_timestamp(epoch_secs, 0)
            .ok_or_else(|| FridgeError::malformed_frame(name, "timestamp out of range"))?;

        let sequence_index: u32 = parts[2]
            .parse()
            .map_err(|e| FridgeError::malformed_frame(name, format!("bad sequence index: {e}")))?;

        let direction = Direction::from_tag(parts[3])?;

        Ok(Self {
            timestamp,
            sequence_index,
            direction,
        })
    }
}

/// One captured image plus its header.
///
/// Owned exclusively by the request that produced it; discarded once the
/// access event has been computed.
#[derive(Debug, Clone)]
pub struct Frame {
    pub meta: FrameMeta,
    pub image: Vec<u8>,
}

impl Frame {
    pub fn new(meta: FrameMeta, image: Vec<u8>) -> Self {
        Self { meta, image }
    }

    /// Decode the header from an upload field name and attach the image bytes.
    pub fn from_named_part(name: &str, image: Vec<u8>) -> FridgeResult<Self> {
        Ok(Self {
            meta: FrameMeta::parse(name)?,
            image,
        })
    }
}
