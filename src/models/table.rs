use serde::{Deserialize, Serialize};

/// One value in the result table. `Null` is the explicit no-data sentinel
/// for optional metrics, rendered as an empty CSV field or a blank XLSX
/// cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Cell {
    /// Render the cell as a delimited-table field.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => v.to_string(),
            Cell::Text(v) => v.clone(),
            Cell::Null => String::new(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

/// One row of the result table, cells aligned with the run's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub cells: Vec<Cell>,
}

/// The assembled report: ordered column names plus one uniform-schema row
/// per zone. Built once per run, written once, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Cell at (row, column name), if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.cells.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_field() {
        assert_eq!(Cell::Int(42).to_field(), "42");
        assert_eq!(Cell::Text("north".to_string()).to_field(), "north");
        assert_eq!(Cell::Null.to_field(), "");
        assert_eq!(Cell::Float(2.5).to_field(), "2.5");
    }

    #[test]
    fn test_cell_is_null() {
        assert!(Cell::Null.is_null());
        assert!(!Cell::Int(0).is_null());
    }

    #[test]
    fn test_table_cell_lookup() {
        let table = ResultTable {
            columns: vec!["ID".to_string(), "CARBON_KM2".to_string()],
            rows: vec![ResultRow {
                cells: vec![Cell::Int(1), Cell::Float(1.9)],
            }],
        };
        assert_eq!(table.cell(0, "ID"), Some(&Cell::Int(1)));
        assert_eq!(table.cell(0, "CARBON_KM2"), Some(&Cell::Float(1.9)));
        assert_eq!(table.cell(0, "CARBON_TON"), None);
        assert_eq!(table.cell(1, "ID"), None);
    }
}
