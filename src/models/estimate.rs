use serde::{Deserialize, Serialize};

/// Carbon density figures for a zone with at least one height sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonDensity {
    /// Aboveground carbon density in kg/m².
    pub density_kg_m2: f64,
    /// The same density expressed in ton/ha (kg/m² × 10).
    pub density_ton_ha: f64,
    /// Total mass in kg; `Some` iff the zone's area is known.
    pub mass_kg: Option<f64>,
    /// Total mass in tons; `Some` iff the zone's area is known.
    pub mass_ton: Option<f64>,
    /// One-sigma error margin of the density estimate.
    pub error_margin: f64,
}

/// Result of the allometric equation for one zone.
///
/// Same no-data convention as `StatSummary`: `density` is `None` exactly
/// when `count == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonEstimate {
    pub count: usize,
    pub density: Option<CarbonDensity>,
}

impl CarbonEstimate {
    /// Estimate for a zone that yielded no height samples.
    pub fn no_data() -> Self {
        Self {
            count: 0,
            density: None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.density.is_none()
    }
}
