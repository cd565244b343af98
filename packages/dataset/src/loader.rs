//! Landmark CSV loading.
//!
//! Two header schemas exist in the field data: store files use
//! `Landmark Name` / `Landmark Latitude` / `Landmark Longitude` with an
//! optional pre-computed `Distance` column, while expansion files use bare
//! `name` / `latitude` / `longitude`. Both share `Property Type`. The
//! loader resolves each logical column through its alias list so callers
//! never care which schema a file came from.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use store_map_landmark_models::{Coordinates, Landmark, LandmarkTable, PropertyType};

use crate::DatasetError;
use crate::config::DataConfig;
use crate::selection::Selection;

const NAME_ALIASES: &[&str] = &["Landmark Name", "name"];
const TYPE_ALIASES: &[&str] = &["Property Type"];
const LATITUDE_ALIASES: &[&str] = &["Landmark Latitude", "latitude"];
const LONGITUDE_ALIASES: &[&str] = &["Landmark Longitude", "longitude"];
const DISTANCE_ALIASES: &[&str] = &["Distance"];

/// Loads the landmark table for a selection.
///
/// # Errors
///
/// Returns [`DatasetError`] if the selection cannot be resolved, the file
/// cannot be read, a required column is missing, or a numeric cell fails to
/// parse. No partial table is returned.
pub fn load_table(config: &DataConfig, selection: &Selection) -> Result<LandmarkTable, DatasetError> {
    let path = selection.resolve(config)?;
    let file = File::open(&path)?;
    let table = load_table_from_reader(file)?;
    log::info!(
        "Loaded {} landmarks for {selection} from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Loads a landmark table from any CSV reader.
///
/// An input with headers but no data rows yields an empty table, not an
/// error; the rendering contract requires "no data" to be representable.
///
/// # Errors
///
/// Returns [`DatasetError`] if a required column is missing or a numeric
/// cell fails to parse.
pub fn load_table_from_reader<R: Read>(reader: R) -> Result<LandmarkTable, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let name_idx = find_column(&headers, NAME_ALIASES)?;
    let type_idx = find_column(&headers, TYPE_ALIASES)?;
    let lat_idx = find_column(&headers, LATITUDE_ALIASES)?;
    let lon_idx = find_column(&headers, LONGITUDE_ALIASES)?;
    let distance_idx = headers
        .iter()
        .position(|header| DISTANCE_ALIASES.contains(&header.trim()));

    let mut rows = Vec::new();

    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header is row 1.
        let row = i + 2;

        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        let property_type = PropertyType::new(record.get(type_idx).unwrap_or(""));
        let latitude = parse_cell(&record, lat_idx, LATITUDE_ALIASES[0], row)?;
        let longitude = parse_cell(&record, lon_idx, LONGITUDE_ALIASES[0], row)?;

        let distance_km = match distance_idx {
            Some(idx) if !record.get(idx).unwrap_or("").trim().is_empty() => {
                Some(parse_cell(&record, idx, DISTANCE_ALIASES[0], row)?)
            }
            _ => None,
        };

        rows.push(Landmark {
            name,
            property_type,
            coords: Coordinates::new(latitude, longitude),
            distance_km,
        });
    }

    Ok(LandmarkTable::new(rows))
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|header| aliases.contains(&header.trim()))
        .ok_or_else(|| DatasetError::MissingColumn {
            column: aliases[0].to_string(),
        })
}

fn parse_cell(
    record: &csv::StringRecord,
    idx: usize,
    column: &str,
    row: usize,
) -> Result<f64, DatasetError> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse().map_err(|_| DatasetError::InvalidValue {
        column: column.to_string(),
        value: raw.to_string(),
        row,
    })
}
