//! Aggregate views: per-type counts, cross-area comparison, competitor
//! subsets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use store_map_landmark_models::{CategoryCounts, Coordinates, LandmarkTable, PropertyType};

/// Counts landmarks per property type.
///
/// The sum of the returned counts always equals the number of rows in the
/// table; an empty table yields an empty map.
#[must_use]
pub fn aggregate_counts(table: &LandmarkTable) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for landmark in table {
        counts.increment(landmark.property_type.clone());
    }
    counts
}

/// Landmark counts per property type across several areas, zero-filled
/// into a dense matrix.
///
/// Column order follows the input area order; row order is sorted by
/// property type so repeated runs produce identical output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMatrix {
    /// Area names, one per column.
    pub areas: Vec<String>,
    /// Property types, one per row.
    pub property_types: Vec<PropertyType>,
    /// `counts[row][column]` is the count of `property_types[row]` in
    /// `areas[column]`; zero where an area has no such landmarks.
    pub counts: Vec<Vec<u64>>,
}

impl ComparisonMatrix {
    /// The count row for one property type, if present.
    #[must_use]
    pub fn row(&self, property_type: &PropertyType) -> Option<&[u64]> {
        self.property_types
            .iter()
            .position(|p| p == property_type)
            .and_then(|idx| self.counts.get(idx))
            .map(Vec::as_slice)
    }
}

/// Builds the comparative-analysis matrix for a set of areas.
#[must_use]
pub fn compare_areas(areas: &[(String, LandmarkTable)]) -> ComparisonMatrix {
    let per_area: Vec<CategoryCounts> = areas
        .iter()
        .map(|(_, table)| aggregate_counts(table))
        .collect();

    let property_types: Vec<PropertyType> = per_area
        .iter()
        .flat_map(|counts| counts.iter().map(|(property_type, _)| property_type))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let counts = property_types
        .iter()
        .map(|property_type| {
            per_area
                .iter()
                .map(|area_counts| area_counts.get(property_type))
                .collect()
        })
        .collect();

    ComparisonMatrix {
        areas: areas.iter().map(|(name, _)| name.clone()).collect(),
        property_types,
        counts,
    }
}

/// Subset of the table containing only the named competitor landmarks.
///
/// Name matching is exact, mirroring how the competitor chart selects its
/// rows.
#[must_use]
pub fn filter_competitors(table: &LandmarkTable, competitors: &[String]) -> LandmarkTable {
    LandmarkTable::new(
        table
            .iter()
            .filter(|landmark| competitors.iter().any(|name| *name == landmark.name))
            .cloned()
            .collect(),
    )
}

/// Mean latitude/longitude of the table, used as a map center for areas
/// that have no store point.
///
/// `None` for an empty table so the rendering layer can fall back to its
/// own default center.
#[must_use]
pub fn table_center(table: &LandmarkTable) -> Option<Coordinates> {
    if table.is_empty() {
        return None;
    }

    let n = table.len() as f64;
    let (lat_sum, lon_sum) = table.iter().fold((0.0, 0.0), |(lat, lon), landmark| {
        (lat + landmark.coords.latitude, lon + landmark.coords.longitude)
    });

    Some(Coordinates::new(lat_sum / n, lon_sum / n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_map_landmark_models::Landmark;

    fn landmark(name: &str, property_type: &str, lat: f64, lon: f64) -> Landmark {
        Landmark {
            name: name.to_string(),
            property_type: PropertyType::from(property_type),
            coords: Coordinates::new(lat, lon),
            distance_km: None,
        }
    }

    fn table(rows: &[(&str, &str)]) -> LandmarkTable {
        LandmarkTable::new(
            rows.iter()
                .map(|(name, property_type)| landmark(name, property_type, 12.97, 77.59))
                .collect(),
        )
    }

    #[test]
    fn counts_sum_to_table_length() {
        let input = table(&[
            ("a", "retail"),
            ("b", "food"),
            ("c", "retail"),
            ("d", "transportation"),
        ]);
        let counts = aggregate_counts(&input);
        assert_eq!(counts.total(), input.len() as u64);
        assert_eq!(counts.get(&PropertyType::from("retail")), 2);
    }

    #[test]
    fn empty_table_counts_to_empty_map() {
        let counts = aggregate_counts(&LandmarkTable::default());
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn comparison_matrix_zero_fills_missing_types() {
        let areas = vec![
            (
                "indiranagar".to_string(),
                table(&[("a", "retail"), ("b", "food")]),
            ),
            ("whitefield".to_string(), table(&[("c", "retail")])),
        ];
        let matrix = compare_areas(&areas);

        assert_eq!(matrix.areas, vec!["indiranagar", "whitefield"]);
        assert_eq!(
            matrix.property_types,
            vec![PropertyType::from("food"), PropertyType::from("retail")]
        );
        assert_eq!(matrix.row(&PropertyType::from("food")).unwrap(), &[1, 0]);
        assert_eq!(matrix.row(&PropertyType::from("retail")).unwrap(), &[1, 1]);
    }

    #[test]
    fn comparison_matrix_of_no_areas_is_empty() {
        let matrix = compare_areas(&[]);
        assert!(matrix.areas.is_empty());
        assert!(matrix.property_types.is_empty());
        assert!(matrix.counts.is_empty());
    }

    #[test]
    fn competitor_filter_matches_names_exactly() {
        let input = table(&[
            ("Zudio", "retail"),
            ("Westside", "retail"),
            ("Zudio Outlet", "retail"),
            ("Cafe Coffee Day", "food"),
        ]);
        let competitors = vec!["Zudio".to_string(), "Westside".to_string()];
        let filtered = filter_competitors(&input, &competitors);
        let names: Vec<_> = filtered.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Zudio", "Westside"]);
    }

    #[test]
    fn center_is_mean_of_coordinates() {
        let input = LandmarkTable::new(vec![
            landmark("a", "retail", 10.0, 70.0),
            landmark("b", "retail", 14.0, 78.0),
        ]);
        let center = table_center(&input).unwrap();
        assert!((center.latitude - 12.0).abs() < 1e-9);
        assert!((center.longitude - 74.0).abs() < 1e-9);
    }

    #[test]
    fn center_of_empty_table_is_none() {
        assert!(table_center(&LandmarkTable::default()).is_none());
    }
}
