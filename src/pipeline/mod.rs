pub mod aggregate;
pub mod partition;
pub mod points;

pub use aggregate::{build_table, Column, ResultSchema, RunFlags};
pub use partition::{AreaCalculator, ZonePartitioner};
pub use points::{PointPartitioner, ZonedPoints};

use tracing::{debug, warn};

use crate::analysis::{estimate_carbon, summarize};
use crate::error::EstimatorError;
use crate::models::{CarbonEstimate, PointDataset, PolygonLayer, ResultTable, StatSummary, Zone};
use crate::services::{AreaMeasurer, ElevationSource, PointClipper, Reprojector};

/// Per-run options. Validated at construction so a misconfigured run can
/// never reach the pipeline.
#[derive(Debug, Clone)]
pub struct RunOptions {
    description_attribute: Option<String>,
    height_filter: Option<f64>,
    ellipsoid: String,
}

impl RunOptions {
    pub fn new(
        description_attribute: Option<String>,
        height_filter: Option<f64>,
        ellipsoid: impl Into<String>,
    ) -> Result<Self, EstimatorError> {
        if let Some(name) = &description_attribute {
            if name.trim().is_empty() {
                return Err(EstimatorError::Configuration(
                    "description attribute name must not be blank".to_string(),
                ));
            }
        }
        if let Some(min) = height_filter {
            if !min.is_finite() {
                return Err(EstimatorError::Configuration(format!(
                    "height filter must be finite, got {min}"
                )));
            }
        }
        let ellipsoid = ellipsoid.into();
        if ellipsoid.trim().is_empty() {
            return Err(EstimatorError::Configuration(
                "ellipsoid model must not be blank".to_string(),
            ));
        }
        Ok(Self {
            description_attribute,
            height_filter,
            ellipsoid,
        })
    }

    pub fn description_attribute(&self) -> Option<&str> {
        self.description_attribute.as_deref()
    }

    pub fn height_filter(&self) -> Option<f64> {
        self.height_filter
    }

    pub fn ellipsoid(&self) -> &str {
        &self.ellipsoid
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            description_attribute: None,
            height_filter: None,
            ellipsoid: "WGS84".to_string(),
        }
    }
}

/// A zone processed to completion, with its summary and estimate attached.
#[derive(Debug, Clone)]
pub struct ZoneEstimate {
    pub zone: Zone,
    pub summary: StatSummary,
    pub estimate: CarbonEstimate,
}

/// A zone that failed partitioning or processing. Keeps the zone's
/// identity so the report can null-mark its row.
#[derive(Debug)]
pub struct ZoneFailure {
    pub zone_id: i64,
    pub error: EstimatorError,
}

impl ZoneFailure {
    pub fn new(zone_id: i64, error: EstimatorError) -> Self {
        Self { zone_id, error }
    }
}

impl std::fmt::Display for ZoneFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zone {}: {}", self.zone_id, self.error)
    }
}

/// The full run: flags plus ordered per-zone outcomes.
#[derive(Debug)]
pub struct RunOutcome {
    pub flags: RunFlags,
    pub outcomes: Vec<Result<ZoneEstimate, ZoneFailure>>,
}

impl RunOutcome {
    /// Assemble the schema-stable result table.
    pub fn to_table(&self) -> ResultTable {
        build_table(&self.outcomes, self.flags)
    }

    /// Assemble the table and hand it to the writer, propagating the
    /// writer's result. The table is written in one call, never row by
    /// row.
    pub fn export(&self, writer: &mut dyn crate::io::TableWriter) -> Result<(), EstimatorError> {
        let table = self.to_table();
        writer.write(&table.columns, &table.rows)
    }

    /// Zones that produced a density estimate.
    pub fn estimated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Ok(z) if !z.estimate.is_no_data()))
            .count()
    }

    /// Zones that yielded no height samples.
    pub fn no_data(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Ok(z) if z.estimate.is_no_data()))
            .count()
    }

    /// Zones skipped because a stage failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }
}

/// The estimation pipeline over the four collaborator seams:
/// partition → clip → summarize → equation → aggregate.
pub struct CarbonPipeline<'a> {
    clipper: &'a dyn PointClipper,
    reprojector: &'a dyn Reprojector,
    elevations: &'a dyn ElevationSource,
    areas: &'a dyn AreaMeasurer,
    options: RunOptions,
}

impl<'a> CarbonPipeline<'a> {
    pub fn new(
        clipper: &'a dyn PointClipper,
        reprojector: &'a dyn Reprojector,
        elevations: &'a dyn ElevationSource,
        areas: &'a dyn AreaMeasurer,
        options: RunOptions,
    ) -> Self {
        Self {
            clipper,
            reprojector,
            elevations,
            areas,
            options,
        }
    }

    /// All four collaborator seams provided by one backend.
    pub fn with_backend<B>(backend: &'a B, options: RunOptions) -> Self
    where
        B: PointClipper + Reprojector + ElevationSource + AreaMeasurer,
    {
        Self::new(backend, backend, backend, backend, options)
    }

    /// Process every zone and return the ordered outcomes.
    ///
    /// Zone-level failures become warnings and null rows; they never
    /// abort the run. Row order follows the input layer, and the
    /// description/mass columns are fixed for the whole run here.
    pub fn run(&self, dataset: &PointDataset, polygons: Option<&PolygonLayer>) -> RunOutcome {
        let flags = RunFlags {
            has_description: polygons.is_some() && self.options.description_attribute.is_some(),
            has_zone_area: polygons.is_some(),
        };

        let partitioner = ZonePartitioner::new(
            self.areas,
            self.reprojector,
            self.options.description_attribute(),
            self.options.ellipsoid(),
        );
        let zones = partitioner.partition(polygons, &dataset.crs);

        let attacher = PointPartitioner::new(self.clipper);
        let zoned = attacher.attach(dataset, zones);

        let outcomes = zoned
            .into_iter()
            .map(|entry| {
                entry
                    .and_then(|zp| self.process_zone(zp))
                    .map_err(|failure| {
                        warn!(
                            zone = failure.zone_id,
                            error = %failure.error,
                            "zone failed; its row will be null-marked"
                        );
                        failure
                    })
            })
            .collect();

        RunOutcome { flags, outcomes }
    }

    fn process_zone(&self, zoned: ZonedPoints) -> Result<ZoneEstimate, ZoneFailure> {
        let zone_id = zoned.zone.id;
        let mut heights = self
            .elevations
            .extract(&zoned.points)
            .map_err(|e| ZoneFailure::new(zone_id, e))?;
        if let Some(min) = self.options.height_filter() {
            heights.retain(|h| *h >= min);
        }

        let summary = summarize(&heights).map_err(|e| ZoneFailure::new(zone_id, e))?;
        match &summary.distribution {
            Some(d) => debug!(
                zone = zone_id,
                count = summary.count,
                hm = d.mean,
                h5 = d.p5,
                h10 = d.p10,
                hiq = d.iqr,
                kh = d.kurtosis,
                h100 = d.p100,
                "height distribution"
            ),
            None => debug!(zone = zone_id, "no height samples; emitting null row"),
        }

        let estimate = estimate_carbon(&summary, zoned.zone.area())
            .map_err(|e| ZoneFailure::new(zone_id, e))?;
        if let Some(density) = &estimate.density {
            debug!(
                zone = zone_id,
                acd = density.density_kg_m2,
                sigma = density.error_margin,
                "carbon estimate"
            );
        }

        Ok(ZoneEstimate {
            zone: zoned.zone,
            summary,
            estimate,
        })
    }
}
