use serde::{Deserialize, Serialize};

use super::geometry::Polygon;

/// One polygon feature's isolated spatial partition plus attributes.
///
/// Created once by the zone partitioner and flows immutably through the
/// rest of the pipeline. In whole-dataset mode a single synthetic zone
/// (id 0, no geometry, zero area) stands in for the entire dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub description: Option<String>,
    pub area_m2: f64,
    pub area_ha: f64,
    /// Geometry reprojected into the dataset reference; `None` only for
    /// the synthetic whole-dataset zone.
    pub geometry: Option<Polygon>,
}

/// A zone's area in both reporting units. Only available for
/// polygon-backed zones; whole-dataset zones have undefined area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneArea {
    pub m2: f64,
    pub ha: f64,
}

impl Zone {
    /// The synthetic zone used when no polygon layer is supplied.
    pub fn whole_dataset() -> Self {
        Self {
            id: 0,
            description: None,
            area_m2: 0.0,
            area_ha: 0.0,
            geometry: None,
        }
    }

    /// `Some` iff the zone came from a polygon feature, i.e. its area is
    /// known. Gates total-mass computation downstream.
    pub fn area(&self) -> Option<ZoneArea> {
        self.geometry.as_ref().map(|_| ZoneArea {
            m2: self.area_m2,
            ha: self.area_ha,
        })
    }

    pub fn is_whole_dataset(&self) -> bool {
        self.geometry.is_none()
    }
}
