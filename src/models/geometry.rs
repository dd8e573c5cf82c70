use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single elevation sample: planar position plus ground-relative height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Height above ground/datum (the z-value fed to the statistics).
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A simple polygon: one exterior ring plus zero or more interior holes.
/// Rings are open (the first vertex is not repeated at the end).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Vec<[f64; 2]>,
    #[serde(default)]
    pub holes: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Polygon with the given exterior ring and no holes.
    pub fn new(exterior: Vec<[f64; 2]>) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }
}

/// Identifier of a coordinate reference system, e.g. "EPSG:32722".
///
/// The crate never interprets the identifier; it is matched by the
/// reprojection collaborator and carried through for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialReference {
    pub auth_id: String,
}

impl SpatialReference {
    pub fn new(auth_id: impl Into<String>) -> Self {
        Self {
            auth_id: auth_id.into(),
        }
    }
}

impl std::fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.auth_id)
    }
}

/// Areal units understood by the unit-conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    SquareMeters,
    Hectares,
    SquareKilometers,
    SquareFeet,
}

impl AreaUnit {
    fn square_meters_per_unit(self) -> f64 {
        match self {
            AreaUnit::SquareMeters => 1.0,
            AreaUnit::Hectares => 10_000.0,
            AreaUnit::SquareKilometers => 1_000_000.0,
            AreaUnit::SquareFeet => 0.092_903_04,
        }
    }

    /// Multiplicative factor converting a value in `self` to `target` units.
    pub fn conversion_factor(self, target: AreaUnit) -> f64 {
        self.square_meters_per_unit() / target.square_meters_per_unit()
    }
}

/// The elevation dataset: a point cloud, or a canopy-height raster
/// flattened to one sample per valid pixel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointDataset {
    pub crs: SpatialReference,
    pub points: Vec<Point>,
}

impl PointDataset {
    pub fn new(crs: SpatialReference, points: Vec<Point>) -> Self {
        Self { crs, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A clipped subset of the dataset belonging to one zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSubset {
    pub points: Vec<Point>,
}

impl PointSubset {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A polygon collection with per-feature attributes, as read from the
/// zone layer file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonLayer {
    pub crs: SpatialReference,
    pub features: Vec<PolygonFeature>,
}

/// One polygon feature: id, attribute table, geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonFeature {
    pub id: i64,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    pub polygon: Polygon,
}

impl PolygonFeature {
    /// Look up an attribute by name; `None` if the feature lacks it.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
