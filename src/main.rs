use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use egsa87::types::{round_degrees, round_meters};
use egsa87::{
    convert_csv, egsa87_to_wgs84, parse_angle, wgs84_to_egsa87, BatchOptions, Direction, Dms,
    ProjectionDefinition,
};

#[derive(Parser)]
#[command(name = "egsa87")]
#[command(about = "WGS84 <-> EGSA87 (Greek Grid) coordinate conversion")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a WGS84 latitude/longitude to EGSA87 x (easting), y (northing)
    ToEgsa87 {
        /// Latitude as decimal degrees or DMS (e.g. 37°59'1.7")
        #[arg(allow_negative_numbers = true)]
        latitude: String,

        /// Longitude as decimal degrees or DMS
        #[arg(allow_negative_numbers = true)]
        longitude: String,

        /// Round to whole metres
        #[arg(long)]
        round: bool,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Convert EGSA87 x (easting), y (northing) to WGS84
    ToWgs84 {
        /// Easting in metres
        #[arg(allow_negative_numbers = true)]
        x: f64,

        /// Northing in metres
        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Convert every row of a CSV file
    Batch {
        /// Input CSV with latitude,longitude or x,y columns
        input: PathBuf,

        /// Conversion direction (to-egsa87, to-wgs84)
        #[arg(long, default_value = "to-egsa87")]
        direction: Direction,

        /// Output file path (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Round results to whole metres / 1e-7 degrees
        #[arg(long)]
        round: bool,
    },

    /// Print the EGSA87 projection definition
    Definition,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egsa87=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ToEgsa87 { latitude, longitude, round, json } => {
            let latitude = parse_angle(&latitude).context("latitude")?;
            let longitude = parse_angle(&longitude).context("longitude")?;

            let (mut x, mut y) = wgs84_to_egsa87(latitude, longitude);
            if round {
                x = round_meters(x);
                y = round_meters(y);
            }

            if json {
                println!("{}", json!({ "latitude": latitude, "longitude": longitude, "x": x, "y": y }));
            } else {
                println!("X (easting):  {}", x);
                println!("Y (northing): {}", y);
            }
        }
        Commands::ToWgs84 { x, y, json } => {
            let (longitude, latitude) = egsa87_to_wgs84(x, y);
            let latitude_dms = Dms::from_decimal(latitude)?;
            let longitude_dms = Dms::from_decimal(longitude)?;

            if json {
                println!(
                    "{}",
                    json!({
                        "x": x,
                        "y": y,
                        "latitude": latitude,
                        "longitude": longitude,
                        "latitude_dms": latitude_dms.to_string(),
                        "longitude_dms": longitude_dms.to_string(),
                    })
                );
            } else {
                println!("Latitude:  {} ({})", round_degrees(latitude), latitude_dms);
                println!("Longitude: {} ({})", round_degrees(longitude), longitude_dms);
            }
        }
        Commands::Batch { input, direction, output, round } => {
            let reader = BufReader::new(
                File::open(&input).with_context(|| format!("Failed to open {}", input.display()))?,
            );
            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
                )),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };

            let summary = convert_csv(reader, writer, &BatchOptions { direction, round })?;
            eprintln!(
                "{} rows: {} converted, {} invalid",
                summary.total, summary.converted, summary.failed
            );
        }
        Commands::Definition => {
            println!("{}", ProjectionDefinition::egsa87());
        }
    }

    Ok(())
}
