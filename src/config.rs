use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EstimatorError;
use crate::models::AreaUnit;
use crate::pipeline::RunOptions;

/// On-disk run configuration (TOML). Every field has a default; CLI flags
/// take precedence when both are given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Ellipsoid model handed to the area-measurement collaborator.
    pub ellipsoid: String,
    /// Units the area service reports in.
    pub area_units: AreaUnit,
    /// Default description attribute for zone layers.
    pub description_attribute: Option<String>,
    /// Discard samples below this height before computing statistics.
    pub height_filter: Option<f64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            ellipsoid: "WGS84".to_string(),
            area_units: AreaUnit::SquareMeters,
            description_attribute: None,
            height_filter: None,
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EstimatorError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| EstimatorError::Configuration(e.to_string()))
    }

    /// Build validated run options, with explicit arguments overriding
    /// the file values.
    pub fn merged_options(
        &self,
        description_attribute: Option<String>,
        height_filter: Option<f64>,
    ) -> Result<RunOptions, EstimatorError> {
        RunOptions::new(
            description_attribute.or_else(|| self.description_attribute.clone()),
            height_filter.or(self.height_filter),
            self.ellipsoid.clone(),
        )
    }
}
