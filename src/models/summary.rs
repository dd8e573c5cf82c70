use serde::{Deserialize, Serialize};

/// Distribution metrics of a non-empty height sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightDistribution {
    pub mean: f64,
    pub p5: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p100: f64,
    /// p75 − p25.
    pub iqr: f64,
    /// Population excess kurtosis, signed. The allometric equation uses
    /// the absolute value.
    pub kurtosis: f64,
}

/// Summary of a zone's height samples.
///
/// `distribution` is `None` exactly when `count == 0` — the no-data
/// sentinel is the type itself, never NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub count: usize,
    pub distribution: Option<HeightDistribution>,
}

impl StatSummary {
    /// Summary of an empty sample.
    pub fn no_data() -> Self {
        Self {
            count: 0,
            distribution: None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.distribution.is_none()
    }
}
