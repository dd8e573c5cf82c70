use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use canopy_carbon_estimator::{
    analysis::summarize,
    config::EstimatorConfig,
    io::{self, CsvTableWriter, TableWriter, XlsxTableWriter},
    models::SpatialReference,
    pipeline::CarbonPipeline,
    services::PlanarBackend,
    visualization::{print_distribution_table, print_result_table, print_run_summary},
};

#[derive(Parser)]
#[command(
    name = "carbon-estimator",
    about = "Aboveground carbon density estimation from elevation data",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate carbon density per zone and export the report table
    Estimate {
        /// Path to the points CSV (x,y,z columns)
        #[arg(short, long)]
        points: PathBuf,

        /// Optional polygon layer (JSON)
        #[arg(short, long)]
        zones: Option<PathBuf>,

        /// Zone attribute to report as the description column
        #[arg(short, long)]
        description_attribute: Option<String>,

        /// Output table path (.csv or .xlsx); blank skips the export
        #[arg(short, long)]
        output: String,

        /// Spatial reference of the points dataset
        #[arg(long, default_value = "local")]
        crs: String,

        /// Discard samples below this height before computing statistics
        #[arg(long)]
        height_filter: Option<f64>,

        /// Optional TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip printing the table to the terminal
        #[arg(long)]
        quiet: bool,
    },

    /// Print the height-distribution summary of a points file
    Stats {
        /// Path to the points CSV (x,y,z columns)
        #[arg(short, long)]
        points: PathBuf,

        /// Spatial reference of the points dataset
        #[arg(long, default_value = "local")]
        crs: String,

        /// Discard samples below this height before computing statistics
        #[arg(long)]
        height_filter: Option<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            points,
            zones,
            description_attribute,
            output,
            crs,
            height_filter,
            config,
            quiet,
        } => {
            let config = match config {
                Some(path) => EstimatorConfig::load(&path)?,
                None => EstimatorConfig::default(),
            };
            let options = config.merged_options(description_attribute, height_filter)?;

            let dataset = io::read_points_csv(&points, SpatialReference::new(crs))?;
            let layer = zones.map(io::read_zone_layer).transpose()?;

            let backend = PlanarBackend::new(config.area_units);
            let pipeline = CarbonPipeline::with_backend(&backend, options);
            let outcome = pipeline.run(&dataset, layer.as_ref());
            let table = outcome.to_table();

            if output.trim().is_empty() {
                tracing::warn!("output path not provided; table was not exported");
            } else {
                let path = PathBuf::from(&output);
                let ext = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                match ext.as_str() {
                    "csv" => CsvTableWriter::new(&path).write(&table.columns, &table.rows)?,
                    "xlsx" => XlsxTableWriter::new(&path).write(&table.columns, &table.rows)?,
                    _ => anyhow::bail!("Unsupported output format: .{ext}. Use .csv or .xlsx"),
                }
                println!(
                    "{} Exported {} rows to {}",
                    "Success:".green().bold(),
                    table.rows.len(),
                    path.display()
                );
            }

            if !quiet {
                print_result_table(&table);
                println!();
                print_run_summary(&outcome);
            }
        }

        Commands::Stats {
            points,
            crs,
            height_filter,
        } => {
            let dataset = io::read_points_csv(&points, SpatialReference::new(crs))?;
            let mut heights: Vec<f64> = dataset.points.iter().map(|p| p.z).collect();
            if let Some(min) = height_filter {
                heights.retain(|h| *h >= min);
            }
            let summary = summarize(&heights)?;
            print_distribution_table(&summary);
            println!();
        }
    }

    Ok(())
}
