#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the store map analytics pipeline.
//!
//! Runs the same pipeline the API server exposes, printing results as
//! plain text tables for quick inspection of a data directory.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use store_map_analytics::ClassifyOptions;
use store_map_dataset::{DataConfig, Selection};

#[derive(Parser)]
#[command(name = "store_map_cli", about = "Store location analysis tool")]
struct Cli {
    /// Path to the data layout config
    #[arg(long, default_value = "store-map.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registry stores
    Stores {
        /// Only stores in this city (display name, e.g. "Bangalore")
        #[arg(long)]
        city: Option<String>,
    },
    /// Run the full analysis for one store
    Analyze {
        /// City display name
        city: String,
        /// Store code
        store_code: u32,
        /// Z-score threshold for hotspot/coldspot labels
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Compare landmark counts across every area of a city
    Compare {
        /// City display name
        city: String,
    },
    /// List expansion areas, or summarize one
    Expansion {
        /// Area file stem (e.g. `whitefield_expansion_areas`)
        area: Option<String>,
    },
}

fn main() {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DataConfig::load_or_default(&cli.config)?;

    match &cli.command {
        Commands::Stores { city } => list_stores(&config, city.as_deref()),
        Commands::Analyze {
            city,
            store_code,
            threshold,
        } => analyze(&config, city, *store_code, *threshold),
        Commands::Compare { city } => compare(&config, city),
        Commands::Expansion { area } => expansion(&config, area.as_deref()),
    }
}

fn list_stores(config: &DataConfig, city: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let towns = match city {
        Some(name) => {
            let city_config = config
                .city(name)
                .ok_or_else(|| format!("Unknown city `{name}`"))?;
            vec![city_config.registry_town.clone()]
        }
        None => config.registry_towns(),
    };

    let stores = store_map_registry::load_stores(&config.registry_file(), &towns)?;

    println!("{:<8} {:<12} {:>10} {:>11}", "CODE", "TOWN", "LATITUDE", "LONGITUDE");
    for store in &stores {
        println!(
            "{:<8} {:<12} {:>10.4} {:>11.4}",
            store.code, store.town, store.coords.latitude, store.coords.longitude
        );
    }
    println!("{} stores", stores.len());

    Ok(())
}

fn analyze(
    config: &DataConfig,
    city: &str,
    store_code: u32,
    threshold: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let stores = store_map_registry::load_stores(&config.registry_file(), &config.registry_towns())?;
    let store = store_map_registry::find_store(&stores, store_code)
        .ok_or_else(|| format!("Store code {store_code} not found."))?;

    let selection = Selection::Store {
        city: city.to_string(),
        store_code,
    };
    let table = store_map_dataset::load_table(config, &selection)?;
    let with_distances = store_map_analytics::compute_distances(&table, store.coords)?;

    let options = threshold.map_or_else(ClassifyOptions::default, |z_threshold| ClassifyOptions {
        z_threshold,
    });
    let classified = store_map_analytics::classify(&with_distances, &options)?;

    println!(
        "Store {store_code} in {city} ({:.4}, {:.4}), threshold {}",
        store.coords.latitude, store.coords.longitude, options.z_threshold
    );
    println!();
    println!(
        "{:<32} {:<18} {:>8} {:>7}  {}",
        "NAME", "TYPE", "DIST KM", "Z", "LABEL"
    );
    for landmark in &classified {
        let z = landmark
            .z_score
            .map_or_else(|| "-".to_string(), |z| format!("{z:.2}"));
        println!(
            "{:<32} {:<18} {:>8.2} {:>7}  {}",
            landmark.name, landmark.property_type, landmark.distance_km, z, landmark.classification
        );
    }

    let counts = store_map_analytics::aggregate_counts(&with_distances);
    println!();
    println!("{:<18} {:>6}", "TYPE", "COUNT");
    for (property_type, count) in &counts {
        println!("{property_type:<18} {count:>6}");
    }
    println!("{:<18} {:>6}", "total", counts.total());

    Ok(())
}

fn compare(config: &DataConfig, city: &str) -> Result<(), Box<dyn std::error::Error>> {
    let codes = store_map_dataset::list_store_codes(config, city)?;

    let mut areas = Vec::with_capacity(codes.len());
    for store_code in codes {
        let selection = Selection::Store {
            city: city.to_string(),
            store_code,
        };
        let table = store_map_dataset::load_table(config, &selection)?;
        areas.push((store_code.to_string(), table));
    }

    let matrix = store_map_analytics::compare_areas(&areas);

    print!("{:<18}", "TYPE");
    for area in &matrix.areas {
        print!(" {area:>10}");
    }
    println!();

    for (property_type, row) in matrix.property_types.iter().zip(&matrix.counts) {
        print!("{property_type:<18}");
        for count in row {
            print!(" {count:>10}");
        }
        println!();
    }

    Ok(())
}

fn expansion(config: &DataConfig, area: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(area) = area else {
        for area in store_map_dataset::list_expansion_areas(config)? {
            println!("{area}");
        }
        return Ok(());
    };

    let selection = Selection::Expansion {
        area: area.to_string(),
    };
    let table = store_map_dataset::load_table(config, &selection)?;

    match store_map_analytics::table_center(&table) {
        Some(center) => println!(
            "{area}: {} landmarks, centered at ({:.4}, {:.4})",
            table.len(),
            center.latitude,
            center.longitude
        ),
        None => println!("{area}: no landmarks"),
    }

    let counts = store_map_analytics::aggregate_counts(&table);
    println!();
    println!("{:<18} {:>6}", "TYPE", "COUNT");
    for (property_type, count) in &counts {
        println!("{property_type:<18} {count:>6}");
    }

    Ok(())
}
