mod planar;

pub use planar::PlanarBackend;

use crate::error::EstimatorError;
use crate::models::{AreaUnit, PointDataset, PointSubset, Polygon, SpatialReference};

/// Spatial clip of the elevation dataset against one zone geometry.
pub trait PointClipper {
    fn clip(&self, dataset: &PointDataset, mask: &Polygon) -> Result<PointSubset, EstimatorError>;
}

/// Transformation of a polygon between spatial references.
pub trait Reprojector {
    fn reproject(
        &self,
        polygon: &Polygon,
        source: &SpatialReference,
        target: &SpatialReference,
    ) -> Result<Polygon, EstimatorError>;
}

/// Extraction of ground-relative elevations from a clipped subset.
pub trait ElevationSource {
    fn extract(&self, subset: &PointSubset) -> Result<Vec<f64>, EstimatorError>;
}

/// Polygon area measurement in the service's native units.
pub trait AreaMeasurer {
    fn measure_area(
        &self,
        polygon: &Polygon,
        source: &SpatialReference,
        ellipsoid: &str,
    ) -> Result<f64, EstimatorError>;

    /// The units `measure_area` reports in.
    fn area_units(&self) -> AreaUnit;
}
