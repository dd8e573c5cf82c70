use crate::error::EstimatorError;
use crate::models::{CarbonDensity, CarbonEstimate, StatSummary, ZoneArea};

/// Allometric equation for aboveground carbon density (kg/m²):
///
/// `ACD = 0.2 · hm^2.02 · |kh|^0.66 · h5^0.11 · h10^-0.32 · hiq^0.5 · h100^-0.82`
///
/// with a one-sigma error margin of `0.66 · ACD^0.71`. The coefficients
/// are calibrated domain constants and are not configurable.
const ACD_SCALE: f64 = 0.2;
const EXP_MEAN: f64 = 2.02;
const EXP_KURTOSIS: f64 = 0.66;
const EXP_P5: f64 = 0.11;
const EXP_P10: f64 = -0.32;
const EXP_IQR: f64 = 0.5;
const EXP_P100: f64 = -0.82;
const SIGMA_SCALE: f64 = 0.66;
const SIGMA_EXP: f64 = 0.71;

/// Apply the allometric equation to a height-distribution summary.
///
/// A no-data summary passes through as a no-data estimate. Every exponent
/// in the equation is non-integer, so any non-positive base is a math
/// domain error naming the offending metric — never a silent NaN. Total
/// masses are filled in only when the zone's area is known.
pub fn estimate_carbon(
    summary: &StatSummary,
    area: Option<ZoneArea>,
) -> Result<CarbonEstimate, EstimatorError> {
    let Some(d) = &summary.distribution else {
        return Ok(CarbonEstimate::no_data());
    };

    let terms = [
        ("hm", d.mean, EXP_MEAN),
        ("kh", d.kurtosis.abs(), EXP_KURTOSIS),
        ("h5", d.p5, EXP_P5),
        ("h10", d.p10, EXP_P10),
        ("hiq", d.iqr, EXP_IQR),
        ("h100", d.p100, EXP_P100),
    ];
    for (name, base, exponent) in &terms {
        if *base <= 0.0 {
            return Err(EstimatorError::DomainMath(format!(
                "{name} = {base}: non-integer exponent {exponent} of a non-positive base"
            )));
        }
    }

    let acd = ACD_SCALE
        * terms
            .iter()
            .map(|(_, base, exponent)| base.powf(*exponent))
            .product::<f64>();
    let sigma = SIGMA_SCALE * acd.powf(SIGMA_EXP);
    let density_ton_ha = acd * 10.0;

    Ok(CarbonEstimate {
        count: summary.count,
        density: Some(CarbonDensity {
            density_kg_m2: acd,
            density_ton_ha,
            mass_kg: area.map(|a| acd * a.m2),
            mass_ton: area.map(|a| density_ton_ha * a.ha),
            error_margin: sigma,
        }),
    })
}
