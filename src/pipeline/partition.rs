use tracing::debug;

use crate::error::EstimatorError;
use crate::models::{AreaUnit, Polygon, PolygonLayer, SpatialReference, Zone, ZoneArea};
use crate::services::{AreaMeasurer, Reprojector};

use super::ZoneFailure;

/// Wraps an area-measurement service with a source reference and
/// ellipsoid model, converting native-unit results to reporting units.
pub struct AreaCalculator<'a> {
    measurer: &'a dyn AreaMeasurer,
    source: SpatialReference,
    ellipsoid: String,
}

impl<'a> AreaCalculator<'a> {
    pub fn new(
        measurer: &'a dyn AreaMeasurer,
        source: SpatialReference,
        ellipsoid: impl Into<String>,
    ) -> Self {
        Self {
            measurer,
            source,
            ellipsoid: ellipsoid.into(),
        }
    }

    /// Measure a polygon and convert the native-unit area to m² and ha.
    pub fn measure(&self, polygon: &Polygon) -> Result<ZoneArea, EstimatorError> {
        let native = self
            .measurer
            .measure_area(polygon, &self.source, &self.ellipsoid)?;
        let units = self.measurer.area_units();
        Ok(ZoneArea {
            m2: native * units.conversion_factor(AreaUnit::SquareMeters),
            ha: native * units.conversion_factor(AreaUnit::Hectares),
        })
    }
}

/// Splits an optional polygon layer into isolated zone records.
pub struct ZonePartitioner<'a> {
    measurer: &'a dyn AreaMeasurer,
    reprojector: &'a dyn Reprojector,
    description_attribute: Option<&'a str>,
    ellipsoid: &'a str,
}

impl<'a> ZonePartitioner<'a> {
    pub fn new(
        measurer: &'a dyn AreaMeasurer,
        reprojector: &'a dyn Reprojector,
        description_attribute: Option<&'a str>,
        ellipsoid: &'a str,
    ) -> Self {
        Self {
            measurer,
            reprojector,
            description_attribute,
            ellipsoid,
        }
    }

    /// Split the layer into one zone per feature, reprojected into the
    /// dataset reference.
    ///
    /// Returns `None` when no layer is supplied — whole-dataset mode is a
    /// distinct state callers must branch on, never an empty list. A
    /// collaborator failure affects only its own zone.
    pub fn partition(
        &self,
        layer: Option<&PolygonLayer>,
        target: &SpatialReference,
    ) -> Option<Vec<Result<Zone, ZoneFailure>>> {
        let layer = layer?;
        let areas = AreaCalculator::new(self.measurer, layer.crs.clone(), self.ellipsoid);
        debug!(
            features = layer.features.len(),
            source = %layer.crs,
            target = %target,
            "partitioning polygon layer"
        );
        Some(
            layer
                .features
                .iter()
                .map(|feature| {
                    let description = self
                        .description_attribute
                        .and_then(|name| feature.attribute(name))
                        .map(str::to_string);
                    let area = areas
                        .measure(&feature.polygon)
                        .map_err(|e| ZoneFailure::new(feature.id, e))?;
                    let geometry = self
                        .reprojector
                        .reproject(&feature.polygon, &layer.crs, target)
                        .map_err(|e| ZoneFailure::new(feature.id, e))?;
                    debug!(
                        zone = feature.id,
                        area_m2 = area.m2,
                        area_ha = area.ha,
                        "zone partitioned"
                    );
                    Ok(Zone {
                        id: feature.id,
                        description,
                        area_m2: area.m2,
                        area_ha: area.ha,
                        geometry: Some(geometry),
                    })
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PolygonFeature;
    use crate::services::PlanarBackend;
    use assert_approx_eq::assert_approx_eq;
    use std::collections::HashMap;

    struct FailingAreas;

    impl AreaMeasurer for FailingAreas {
        fn measure_area(
            &self,
            _polygon: &Polygon,
            _source: &SpatialReference,
            _ellipsoid: &str,
        ) -> Result<f64, EstimatorError> {
            Err(EstimatorError::collaborator("area", "geodesy backend down"))
        }

        fn area_units(&self) -> AreaUnit {
            AreaUnit::SquareMeters
        }
    }

    fn crs() -> SpatialReference {
        SpatialReference::new("EPSG:32722")
    }

    fn square_feature(id: i64, origin: f64, size: f64, name: Option<&str>) -> PolygonFeature {
        let mut attributes = HashMap::new();
        if let Some(name) = name {
            attributes.insert("name".to_string(), name.to_string());
        }
        PolygonFeature {
            id,
            attributes,
            polygon: Polygon::new(vec![
                [origin, origin],
                [origin + size, origin],
                [origin + size, origin + size],
                [origin, origin + size],
            ]),
        }
    }

    fn sample_layer() -> PolygonLayer {
        PolygonLayer {
            crs: crs(),
            features: vec![
                square_feature(1, 0.0, 100.0, Some("north stand")),
                square_feature(2, 200.0, 50.0, None),
            ],
        }
    }

    #[test]
    fn test_no_layer_is_whole_dataset_mode() {
        let backend = PlanarBackend::default();
        let partitioner = ZonePartitioner::new(&backend, &backend, None, "WGS84");
        assert!(partitioner.partition(None, &crs()).is_none());
    }

    #[test]
    fn test_partition_preserves_feature_order() {
        let backend = PlanarBackend::default();
        let partitioner = ZonePartitioner::new(&backend, &backend, None, "WGS84");
        let zones = partitioner.partition(Some(&sample_layer()), &crs()).unwrap();
        let ids: Vec<i64> = zones.iter().map(|z| z.as_ref().unwrap().id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_partition_converts_area_units() {
        let backend = PlanarBackend::default();
        let partitioner = ZonePartitioner::new(&backend, &backend, None, "WGS84");
        let zones = partitioner.partition(Some(&sample_layer()), &crs()).unwrap();
        let zone = zones[0].as_ref().unwrap();
        assert_approx_eq!(zone.area_m2, 10_000.0, 1e-6);
        assert_approx_eq!(zone.area_ha, 1.0, 1e-9);
    }

    #[test]
    fn test_description_read_when_configured() {
        let backend = PlanarBackend::default();
        let partitioner = ZonePartitioner::new(&backend, &backend, Some("name"), "WGS84");
        let zones = partitioner.partition(Some(&sample_layer()), &crs()).unwrap();
        assert_eq!(
            zones[0].as_ref().unwrap().description.as_deref(),
            Some("north stand")
        );
        // Second feature lacks the attribute: null, not an error.
        assert!(zones[1].as_ref().unwrap().description.is_none());
    }

    #[test]
    fn test_description_ignored_when_not_configured() {
        let backend = PlanarBackend::default();
        let partitioner = ZonePartitioner::new(&backend, &backend, None, "WGS84");
        let zones = partitioner.partition(Some(&sample_layer()), &crs()).unwrap();
        assert!(zones[0].as_ref().unwrap().description.is_none());
    }

    #[test]
    fn test_area_failure_is_per_zone() {
        let failing = FailingAreas;
        let backend = PlanarBackend::default();
        let partitioner = ZonePartitioner::new(&failing, &backend, None, "WGS84");
        let zones = partitioner.partition(Some(&sample_layer()), &crs()).unwrap();
        assert_eq!(zones.len(), 2);
        for (feature_id, zone) in [1i64, 2].into_iter().zip(&zones) {
            let failure = zone.as_ref().unwrap_err();
            assert_eq!(failure.zone_id, feature_id);
            assert!(matches!(failure.error, EstimatorError::Collaborator { .. }));
        }
    }

    #[test]
    fn test_reprojection_failure_is_per_zone() {
        let backend = PlanarBackend::default();
        let partitioner = ZonePartitioner::new(&backend, &backend, None, "WGS84");
        let target = SpatialReference::new("EPSG:4326");
        let zones = partitioner.partition(Some(&sample_layer()), &target).unwrap();
        assert!(zones.iter().all(|z| z.is_err()));
    }

    #[test]
    fn test_area_calculator_unit_conversion() {
        let backend = PlanarBackend::new(AreaUnit::SquareKilometers);
        let calculator = AreaCalculator::new(&backend, crs(), "WGS84");
        // 2x2 "kilometer" square measured in native km² units.
        let polygon = Polygon::new(vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
        let area = calculator.measure(&polygon).unwrap();
        assert_approx_eq!(area.m2, 4_000_000.0, 1e-3);
        assert_approx_eq!(area.ha, 400.0, 1e-9);
    }
}
