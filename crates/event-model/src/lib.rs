//! FridgeWatch Event Model
//!
//! Defines the core data contracts for FridgeWatch:
//! - **Frames:** Captured images with typed headers (timestamp, sequence,
//!   capture direction)
//! - **Predictions:** Per-frame classifier output ((label, probability) pairs)
//! - **Access events:** The final structured outcome of one fridge-access
//!   request
//!
//! All probabilities are in `[0.0, 1.0]`. Frame headers are validated at the
//! ingestion boundary; downstream code never parses strings.

pub mod access;
pub mod frame;
pub mod prediction;

pub use access::*;
pub use frame::*;
pub use prediction::*;
