mod estimate;
mod geometry;
mod summary;
mod table;
mod zone;

pub use estimate::{CarbonDensity, CarbonEstimate};
pub use geometry::{
    AreaUnit, Point, PointDataset, PointSubset, Polygon, PolygonFeature, PolygonLayer,
    SpatialReference,
};
pub use summary::{HeightDistribution, StatSummary};
pub use table::{Cell, ResultRow, ResultTable};
pub use zone::{Zone, ZoneArea};
