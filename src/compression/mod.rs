//! Problem compression.
//!
//! - [`ProblemCompressor`] — builds the reduced instance from a [`VrpProblem`](crate::models::VrpProblem)
//! - [`AggregatedService`] — one chain of customers served as a single stop
//! - [`CompressionConfig`] — service cost model and verification switch

mod compressor;
mod config;
mod error;
mod service;

pub use compressor::{compress, CompressedProblem, ProblemCompressor};
pub use config::{CompressionConfig, ServiceCost};
pub use error::{CompressionError, FailureCategory};
pub use service::AggregatedService;
