use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use ronda_core::prelude::*;

/// Computes a minimum-cost street inspection route and writes the
/// turn-by-turn itinerary.
#[derive(Debug, Parser)]
#[command(name = "ronda", version, about)]
struct Args {
    /// Run configuration JSON file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Where to write the text itinerary
    #[arg(short, long, default_value = "itinerary.txt")]
    output: PathBuf,

    /// Also write the route as a GeoJSON FeatureCollection
    #[arg(long)]
    geojson: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, Error> {
    let config = RouteConfig::from_file(&args.config)?;
    info!("configuration read from '{}'", args.config.display());

    let raw = read_network(&config.network)?;
    let network = StreetNetwork::from_raw(&raw)?;

    match plan_route(&network, &config.params())? {
        RouteOutcome::Solved(route) => {
            write_report(&args.output, &route)?;
            info!("itinerary written to '{}'", args.output.display());

            if let Some(path) = &args.geojson {
                fs::write(path, route.to_geojson_string(&network)?)?;
                info!("route GeoJSON written to '{}'", path.display());
            }

            println!("{}", route.itinerary);
            Ok(ExitCode::SUCCESS)
        }
        RouteOutcome::Unsolved(status) => {
            error!("no route produced: {status}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn write_report(path: &Path, route: &InspectionRoute) -> Result<(), Error> {
    let mut report = String::from("--- OPTIMIZED INSPECTION ROUTE ---\n");
    report.push_str(&format!("Status: {}\n", route.status));
    report.push_str(&format!("Total cost: {:.2}\n", route.total_cost));
    report.push_str(&format!(
        "Total distance: {:.2} km\n\n",
        route.total_distance_km
    ));
    for step in &route.itinerary.steps {
        report.push_str(&format!("{step}\n"));
    }
    report.push_str(&format!(
        "\nTotal steps: {}. Final destination: {}.\n",
        route.itinerary.len(),
        route.itinerary.final_destination
    ));
    fs::write(path, report)?;
    Ok(())
}
