use tracing::{debug, info};

use crate::models::{PointDataset, PointSubset, Zone};
use crate::services::PointClipper;

use super::ZoneFailure;

/// A zone with its clipped point subset attached.
#[derive(Debug, Clone)]
pub struct ZonedPoints {
    pub zone: Zone,
    pub points: PointSubset,
}

/// Clips the dataset against each zone, or wraps the whole dataset in one
/// synthetic zone when no polygons were supplied.
pub struct PointPartitioner<'a> {
    clipper: &'a dyn PointClipper,
}

impl<'a> PointPartitioner<'a> {
    pub fn new(clipper: &'a dyn PointClipper) -> Self {
        Self { clipper }
    }

    /// Attach a point subset to every zone, preserving input order.
    ///
    /// Zones are independent of each other; a clip failure affects only
    /// its own zone, and an empty subset is a downstream no-data case,
    /// not a failure.
    pub fn attach(
        &self,
        dataset: &PointDataset,
        zones: Option<Vec<Result<Zone, ZoneFailure>>>,
    ) -> Vec<Result<ZonedPoints, ZoneFailure>> {
        let Some(zones) = zones else {
            info!(
                points = dataset.len(),
                "no polygon layer; processing the whole dataset as one zone"
            );
            return vec![Ok(ZonedPoints {
                zone: Zone::whole_dataset(),
                points: PointSubset::new(dataset.points.clone()),
            })];
        };

        let total = zones.len();
        zones
            .into_iter()
            .enumerate()
            .map(|(index, zone)| {
                let zone = zone?;
                info!(zone = zone.id, "clipping zone {}/{}", index + 1, total);
                let points = match &zone.geometry {
                    Some(mask) => self
                        .clipper
                        .clip(dataset, mask)
                        .map_err(|e| ZoneFailure::new(zone.id, e))?,
                    None => PointSubset::new(dataset.points.clone()),
                };
                if points.is_empty() {
                    debug!(zone = zone.id, "zone contains no points");
                }
                Ok(ZonedPoints { zone, points })
            })
            .collect()
    }
}
