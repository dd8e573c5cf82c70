use crate::error::EstimatorError;
use crate::models::{AreaUnit, PointDataset, PointSubset, Polygon, SpatialReference};

use super::{AreaMeasurer, ElevationSource, PointClipper, Reprojector};

/// Built-in collaborator backend for projected data in a single CRS.
///
/// Area is the planar shoelace area in coordinate units squared,
/// point-in-polygon uses even-odd ray casting, and "reprojection" only
/// accepts matching references — transforming between different systems
/// needs a real projection engine behind the same traits.
#[derive(Debug, Clone)]
pub struct PlanarBackend {
    units: AreaUnit,
}

impl PlanarBackend {
    pub fn new(units: AreaUnit) -> Self {
        Self { units }
    }
}

impl Default for PlanarBackend {
    fn default() -> Self {
        Self::new(AreaUnit::SquareMeters)
    }
}

impl PointClipper for PlanarBackend {
    fn clip(&self, dataset: &PointDataset, mask: &Polygon) -> Result<PointSubset, EstimatorError> {
        let points = dataset
            .points
            .iter()
            .filter(|p| polygon_contains(mask, p.x, p.y))
            .copied()
            .collect();
        Ok(PointSubset::new(points))
    }
}

impl Reprojector for PlanarBackend {
    fn reproject(
        &self,
        polygon: &Polygon,
        source: &SpatialReference,
        target: &SpatialReference,
    ) -> Result<Polygon, EstimatorError> {
        if source == target {
            Ok(polygon.clone())
        } else {
            Err(EstimatorError::collaborator(
                "reproject",
                format!("planar backend cannot transform {source} to {target}"),
            ))
        }
    }
}

impl ElevationSource for PlanarBackend {
    fn extract(&self, subset: &PointSubset) -> Result<Vec<f64>, EstimatorError> {
        Ok(subset.points.iter().map(|p| p.z).collect())
    }
}

impl AreaMeasurer for PlanarBackend {
    fn measure_area(
        &self,
        polygon: &Polygon,
        _source: &SpatialReference,
        _ellipsoid: &str,
    ) -> Result<f64, EstimatorError> {
        let holes: f64 = polygon.holes.iter().map(|h| ring_area(h).abs()).sum();
        Ok((ring_area(&polygon.exterior).abs() - holes).max(0.0))
    }

    fn area_units(&self) -> AreaUnit {
        self.units
    }
}

/// Signed shoelace area of an open ring.
fn ring_area(ring: &[[f64; 2]]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        sum += ring[j][0] * ring[i][1] - ring[i][0] * ring[j][1];
        j = i;
    }
    sum / 2.0
}

/// Even-odd ray-casting test, holes subtracted.
fn polygon_contains(polygon: &Polygon, x: f64, y: f64) -> bool {
    if !ring_contains(&polygon.exterior, x, y) {
        return false;
    }
    !polygon.holes.iter().any(|hole| ring_contains(hole, x, y))
}

fn ring_contains(ring: &[[f64; 2]], x: f64, y: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
