//! Command line access to campus models: inspect a network, list
//! destinations, plan single routes.

use std::error::Error as StdError;
use std::path::PathBuf;

use campusnav_core::loading::load_catalog;
use campusnav_core::prelude::*;
use clap::{Args, Parser, Subcommand, ValueEnum};
use geo::Point;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Multimodal campus navigation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the model and print graph diagnostics
    Inspect {
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Print catalog records as JSON
    Destinations {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Plan one route
    Route {
        #[command(flatten)]
        model: ModelArgs,
        /// Start latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Start longitude
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Destination id
        #[arg(long)]
        to: String,
        /// walking, two-wheeler or four-wheeler
        #[arg(long, default_value = "walking")]
        mode: Mode,
        /// Catalog id of the start point, checked against entry gates
        #[arg(long)]
        from_id: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Args)]
struct ModelArgs {
    /// GeoJSON path network
    #[arg(long)]
    network: PathBuf,
    /// Destination catalog (.json or .csv)
    #[arg(long)]
    catalog: PathBuf,
    #[arg(long, default_value_t = DEFAULT_SNAP_TOLERANCE_M)]
    snap_tolerance: f64,
}

impl ModelArgs {
    fn build(&self) -> Result<CampusModel, Error> {
        let mut config = CampusModelConfig::new(&self.network, &self.catalog);
        config.snap_tolerance_m = self.snap_tolerance;
        create_campus_model(&config)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Geojson,
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Inspect { model } => {
            let model = model.build()?;
            info!("{}", model.summary());
            let diagnostics = model.graph.diagnostics();
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        }
        Command::Destinations { catalog, category } => {
            let catalog = load_catalog(&catalog)?;
            let records: Vec<&Destination> = match category {
                Some(category) => catalog.by_category(category).collect(),
                None => catalog.iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Route {
            model,
            lat,
            lng,
            to,
            mode,
            from_id,
            format,
        } => {
            let model = model.build()?;
            let route = RoutePlanner::new(&model).plan_by_id(
                Point::new(lng, lat),
                &to,
                mode,
                from_id.as_deref(),
            )?;
            if !route.found {
                info!("No route found to {to}");
            }
            let output = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&route)?,
                OutputFormat::Geojson => route.to_geojson_string()?,
            };
            println!("{output}");
        }
    }

    Ok(())
}
