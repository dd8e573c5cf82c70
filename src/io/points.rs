use std::path::Path;

use crate::error::EstimatorError;
use crate::models::{Point, PointDataset, SpatialReference};

/// CSV row structure for elevation samples.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct PointRecord {
    x: f64,
    y: f64,
    z: f64,
}

/// Read an elevation dataset from a CSV file with `x,y,z` columns.
///
/// The dataset is the one required input of a run, so a missing file is a
/// `MissingInput` error rather than a plain IO error.
pub fn read_points_csv(
    path: impl AsRef<Path>,
    crs: SpatialReference,
) -> Result<PointDataset, EstimatorError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EstimatorError::MissingInput(format!(
            "points dataset not found at {}",
            path.display()
        )));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut points = Vec::new();
    for result in rdr.deserialize() {
        let record: PointRecord = result?;
        points.push(Point::new(record.x, record.y, record.z));
    }

    Ok(PointDataset::new(crs, points))
}

/// Write an elevation dataset to a CSV file.
pub fn write_points_csv(
    dataset: &PointDataset,
    path: impl AsRef<Path>,
) -> Result<(), EstimatorError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for point in &dataset.points {
        wtr.serialize(PointRecord {
            x: point.x,
            y: point.y,
            z: point.z,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
