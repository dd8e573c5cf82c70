use crate::models::{Cell, ResultRow, ResultTable};

use super::{ZoneEstimate, ZoneFailure};

/// Run-wide flags that decide which optional columns the report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunFlags {
    pub has_description: bool,
    pub has_zone_area: bool,
}

/// Columns the report can carry, named as they appear in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Description,
    DensityKgM2,
    DensityTonHa,
    MassKg,
    MassTon,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Description => "DESCRIPTION",
            Column::DensityKgM2 => "CARBON_KM2",
            Column::DensityTonHa => "CARBON_TONHA",
            Column::MassKg => "CARBON_K",
            Column::MassTon => "CARBON_TON",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    Always,
    Description,
    ZoneArea,
}

impl Requirement {
    fn satisfied(self, flags: RunFlags) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::Description => flags.has_description,
            Requirement::ZoneArea => flags.has_zone_area,
        }
    }
}

/// Declarative column layout: each entry is (inclusion requirement,
/// column), in report order.
const LAYOUT: [(Requirement, Column); 6] = [
    (Requirement::Always, Column::Id),
    (Requirement::Description, Column::Description),
    (Requirement::Always, Column::DensityKgM2),
    (Requirement::Always, Column::DensityTonHa),
    (Requirement::ZoneArea, Column::MassKg),
    (Requirement::ZoneArea, Column::MassTon),
];

/// The column set of one run, resolved once before any row is projected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSchema {
    columns: Vec<Column>,
}

impl ResultSchema {
    pub fn resolve(flags: RunFlags) -> Self {
        Self {
            columns: LAYOUT
                .iter()
                .filter(|(requirement, _)| requirement.satisfied(flags))
                .map(|(_, column)| *column)
                .collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Project one zone outcome into a row matching this schema. Failed
    /// zones keep their identity and null everything else.
    pub fn project(&self, outcome: &Result<ZoneEstimate, ZoneFailure>) -> ResultRow {
        ResultRow {
            cells: self
                .columns
                .iter()
                .map(|column| project_cell(*column, outcome))
                .collect(),
        }
    }
}

fn project_cell(column: Column, outcome: &Result<ZoneEstimate, ZoneFailure>) -> Cell {
    let estimate = match outcome {
        Ok(estimate) => estimate,
        Err(failure) => {
            return match column {
                Column::Id => Cell::Int(failure.zone_id),
                _ => Cell::Null,
            };
        }
    };
    let density = estimate.estimate.density.as_ref();
    match column {
        Column::Id => Cell::Int(estimate.zone.id),
        Column::Description => estimate
            .zone
            .description
            .clone()
            .map(Cell::Text)
            .unwrap_or(Cell::Null),
        Column::DensityKgM2 => density
            .map(|d| Cell::Float(d.density_kg_m2))
            .unwrap_or(Cell::Null),
        Column::DensityTonHa => density
            .map(|d| Cell::Float(d.density_ton_ha))
            .unwrap_or(Cell::Null),
        Column::MassKg => density
            .and_then(|d| d.mass_kg)
            .map(Cell::Float)
            .unwrap_or(Cell::Null),
        Column::MassTon => density
            .and_then(|d| d.mass_ton)
            .map(Cell::Float)
            .unwrap_or(Cell::Null),
    }
}

/// Assemble the uniform-schema table for a run, rows in input order.
pub fn build_table(outcomes: &[Result<ZoneEstimate, ZoneFailure>], flags: RunFlags) -> ResultTable {
    let schema = ResultSchema::resolve(flags);
    ResultTable {
        columns: schema.column_names(),
        rows: outcomes.iter().map(|o| schema.project(o)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;
    use crate::models::{CarbonDensity, CarbonEstimate, StatSummary, Zone};

    fn make_estimate(id: i64, description: Option<&str>, with_area: bool) -> ZoneEstimate {
        let zone = Zone {
            id,
            description: description.map(str::to_string),
            area_m2: if with_area { 10_000.0 } else { 0.0 },
            area_ha: if with_area { 1.0 } else { 0.0 },
            geometry: with_area
                .then(|| crate::models::Polygon::new(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]])),
        };
        ZoneEstimate {
            zone,
            summary: StatSummary {
                count: 5,
                distribution: None,
            },
            estimate: CarbonEstimate {
                count: 5,
                density: Some(CarbonDensity {
                    density_kg_m2: 2.0,
                    density_ton_ha: 20.0,
                    mass_kg: with_area.then_some(20_000.0),
                    mass_ton: with_area.then_some(20.0),
                    error_margin: 1.0,
                }),
            },
        }
    }

    fn make_no_data(id: i64) -> ZoneEstimate {
        ZoneEstimate {
            zone: Zone {
                id,
                description: None,
                area_m2: 0.0,
                area_ha: 0.0,
                geometry: None,
            },
            summary: StatSummary::no_data(),
            estimate: CarbonEstimate::no_data(),
        }
    }

    #[test]
    fn test_schema_all_columns() {
        let schema = ResultSchema::resolve(RunFlags {
            has_description: true,
            has_zone_area: true,
        });
        assert_eq!(
            schema.column_names(),
            vec![
                "ID",
                "DESCRIPTION",
                "CARBON_KM2",
                "CARBON_TONHA",
                "CARBON_K",
                "CARBON_TON"
            ]
        );
    }

    #[test]
    fn test_schema_without_description() {
        let schema = ResultSchema::resolve(RunFlags {
            has_description: false,
            has_zone_area: true,
        });
        assert_eq!(
            schema.column_names(),
            vec!["ID", "CARBON_KM2", "CARBON_TONHA", "CARBON_K", "CARBON_TON"]
        );
    }

    #[test]
    fn test_schema_whole_dataset_mode() {
        let schema = ResultSchema::resolve(RunFlags {
            has_description: false,
            has_zone_area: false,
        });
        assert_eq!(
            schema.column_names(),
            vec!["ID", "CARBON_KM2", "CARBON_TONHA"]
        );
    }

    #[test]
    fn test_rows_keep_input_order() {
        let outcomes = vec![
            Ok(make_estimate(3, None, true)),
            Ok(make_estimate(1, None, true)),
        ];
        let table = build_table(
            &outcomes,
            RunFlags {
                has_description: false,
                has_zone_area: true,
            },
        );
        assert_eq!(table.cell(0, "ID"), Some(&Cell::Int(3)));
        assert_eq!(table.cell(1, "ID"), Some(&Cell::Int(1)));
    }

    #[test]
    fn test_missing_description_projects_null() {
        let outcomes = vec![
            Ok(make_estimate(1, Some("east block"), true)),
            Ok(make_estimate(2, None, true)),
        ];
        let table = build_table(
            &outcomes,
            RunFlags {
                has_description: true,
                has_zone_area: true,
            },
        );
        assert_eq!(
            table.cell(0, "DESCRIPTION"),
            Some(&Cell::Text("east block".to_string()))
        );
        assert_eq!(table.cell(1, "DESCRIPTION"), Some(&Cell::Null));
    }

    #[test]
    fn test_no_data_zone_projects_nulls() {
        let outcomes = vec![Ok(make_no_data(4))];
        let table = build_table(
            &outcomes,
            RunFlags {
                has_description: false,
                has_zone_area: false,
            },
        );
        assert_eq!(table.cell(0, "ID"), Some(&Cell::Int(4)));
        assert_eq!(table.cell(0, "CARBON_KM2"), Some(&Cell::Null));
        assert_eq!(table.cell(0, "CARBON_TONHA"), Some(&Cell::Null));
    }

    #[test]
    fn test_failed_zone_keeps_identity() {
        let outcomes: Vec<Result<ZoneEstimate, ZoneFailure>> = vec![Err(ZoneFailure::new(
            11,
            EstimatorError::collaborator("clip", "down"),
        ))];
        let table = build_table(
            &outcomes,
            RunFlags {
                has_description: true,
                has_zone_area: true,
            },
        );
        assert_eq!(table.cell(0, "ID"), Some(&Cell::Int(11)));
        for column in ["DESCRIPTION", "CARBON_KM2", "CARBON_K", "CARBON_TON"] {
            assert_eq!(table.cell(0, column), Some(&Cell::Null), "{column}");
        }
    }

    #[test]
    fn test_uniform_row_width() {
        let outcomes = vec![
            Ok(make_estimate(1, Some("a"), true)),
            Ok(make_no_data(2)),
            Err(ZoneFailure::new(
                3,
                EstimatorError::collaborator("clip", "down"),
            )),
        ];
        let flags = RunFlags {
            has_description: true,
            has_zone_area: true,
        };
        let table = build_table(&outcomes, flags);
        assert!(table.rows.iter().all(|r| r.cells.len() == table.columns.len()));
    }
}
