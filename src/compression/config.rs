//! Compression configuration.

use serde::{Deserialize, Serialize};

/// What an aggregated service charges for absorbing its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCost {
    /// Sum of the chain's customer demands.
    #[default]
    Demand,
    /// Distance travelled along the chain from input to output vertex.
    Traversal,
}

/// Configuration of [`ProblemCompressor`](super::ProblemCompressor).
///
/// Missing fields take their default when deserialized.
///
/// # Examples
///
/// ```
/// use u_compress::compression::{CompressionConfig, ServiceCost};
///
/// let config = CompressionConfig::default()
///     .with_service_cost(ServiceCost::Traversal)
///     .with_verification(false);
/// assert_eq!(config.service_cost, ServiceCost::Traversal);
/// assert!(!config.verify);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Internal cost model of aggregated services.
    pub service_cost: ServiceCost,
    /// Re-check the arborescence postcondition before extracting branches.
    pub verify: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            service_cost: ServiceCost::Demand,
            verify: true,
        }
    }
}

impl CompressionConfig {
    /// Sets the internal cost model.
    pub fn with_service_cost(mut self, service_cost: ServiceCost) -> Self {
        self.service_cost = service_cost;
        self
    }

    /// Enables or disables the arborescence check.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}
