//! SpamWatch Core
//!
//! Types shared by every SpamWatch component.
//!
//! This crate provides:
//! - The error type and result alias used by the classification core
//! - Prediction labels and the `PredictionResult` returned to callers
//! - Service mode and health reporting types

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{HealthStatus, Label, PredictionResult, PredictionSource, ServiceMode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{HealthStatus, Label, PredictionResult, PredictionSource, ServiceMode};
}
