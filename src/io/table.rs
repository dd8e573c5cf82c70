use std::path::PathBuf;

use rust_xlsxwriter::Workbook;

use crate::error::EstimatorError;
use crate::models::{Cell, ResultRow};

use super::TableWriter;

/// Writes the result table as a UTF-8 CSV file. Null cells become empty
/// fields.
pub struct CsvTableWriter {
    path: PathBuf,
}

impl CsvTableWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableWriter for CsvTableWriter {
    fn write(&mut self, columns: &[String], rows: &[ResultRow]) -> Result<(), EstimatorError> {
        let mut wtr = csv::Writer::from_path(&self.path)?;
        wtr.write_record(columns)?;
        for row in rows {
            wtr.write_record(row.cells.iter().map(Cell::to_field))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Writes the result table as an XLSX workbook. Null cells are left blank.
pub struct XlsxTableWriter {
    path: PathBuf,
}

impl XlsxTableWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableWriter for XlsxTableWriter {
    fn write(&mut self, columns: &[String], rows: &[ResultRow]) -> Result<(), EstimatorError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, name) in columns.iter().enumerate() {
            worksheet.write_string(0, col as u16, name)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let row_idx = index as u32 + 1;
            for (col, cell) in row.cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Int(v) => {
                        worksheet.write_number(row_idx, col, *v as f64)?;
                    }
                    Cell::Float(v) => {
                        worksheet.write_number(row_idx, col, *v)?;
                    }
                    Cell::Text(v) => {
                        worksheet.write_string(row_idx, col, v)?;
                    }
                    Cell::Null => {}
                }
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }
}
