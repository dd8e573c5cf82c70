mod points;
mod table;
mod zones;

pub use points::{read_points_csv, write_points_csv};
pub use table::{CsvTableWriter, XlsxTableWriter};
pub use zones::{read_zone_layer, write_zone_layer};

use crate::error::EstimatorError;
use crate::models::ResultRow;

/// Sink for the assembled result table. Called exactly once per run with
/// the complete table; the pipeline never streams partial rows.
pub trait TableWriter {
    fn write(&mut self, columns: &[String], rows: &[ResultRow]) -> Result<(), EstimatorError>;
}
