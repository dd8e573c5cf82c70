pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod visualization;

pub use error::EstimatorError;
pub use models::{CarbonEstimate, PointDataset, PolygonLayer, StatSummary, Zone};
pub use pipeline::{CarbonPipeline, RunOptions};
pub use services::PlanarBackend;
