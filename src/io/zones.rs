use std::path::Path;

use crate::error::EstimatorError;
use crate::models::PolygonLayer;

/// Read a polygon layer from a JSON file.
pub fn read_zone_layer(path: impl AsRef<Path>) -> Result<PolygonLayer, EstimatorError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EstimatorError::MissingInput(format!(
            "polygon layer not found at {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    let layer: PolygonLayer = serde_json::from_str(&content)?;
    Ok(layer)
}

/// Write a polygon layer to a JSON file.
pub fn write_zone_layer(layer: &PolygonLayer, path: impl AsRef<Path>) -> Result<(), EstimatorError> {
    let content = serde_json::to_string_pretty(layer)?;
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}
