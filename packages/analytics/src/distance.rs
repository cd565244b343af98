//! Geodesic distance from each landmark to the store.

use geo::{Distance, Geodesic, Point};
use store_map_landmark_models::{Coordinates, LandmarkTable};

use crate::AnalyticsError;

/// Great-circle distance between two coordinate pairs in kilometers.
#[must_use]
pub fn geodesic_km(a: Coordinates, b: Coordinates) -> f64 {
    let from = Point::new(a.longitude, a.latitude);
    let to = Point::new(b.longitude, b.latitude);
    Geodesic.distance(from, to) / 1000.0
}

/// Computes the distance from every landmark to the store location.
///
/// Returns a copy of the table with `distance_km` populated on every row.
/// Rows that already carry a distance are recomputed; the derived value is
/// canonical.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidCoordinate`] if the store location or
/// any landmark has a latitude outside [-90, 90] or a longitude outside
/// [-180, 180]. No partial table is returned.
pub fn compute_distances(
    table: &LandmarkTable,
    store_location: Coordinates,
) -> Result<LandmarkTable, AnalyticsError> {
    store_location
        .validate()
        .map_err(|source| AnalyticsError::InvalidCoordinate {
            subject: "store location".to_string(),
            source,
        })?;

    let mut rows = Vec::with_capacity(table.len());
    for landmark in table {
        landmark
            .coords
            .validate()
            .map_err(|source| AnalyticsError::InvalidCoordinate {
                subject: format!("landmark `{}`", landmark.name),
                source,
            })?;

        let mut row = landmark.clone();
        row.distance_km = Some(geodesic_km(row.coords, store_location));
        rows.push(row);
    }

    log::debug!("Computed distances for {} landmarks", rows.len());

    Ok(LandmarkTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_map_landmark_models::{Landmark, PropertyType};

    const BANGALORE: Coordinates = Coordinates::new(12.9716, 77.5946);
    const MYSORE: Coordinates = Coordinates::new(12.2958, 76.6394);

    fn table(coords: &[Coordinates]) -> LandmarkTable {
        LandmarkTable::new(
            coords
                .iter()
                .enumerate()
                .map(|(i, c)| Landmark {
                    name: format!("landmark-{i}"),
                    property_type: PropertyType::from("retail"),
                    coords: *c,
                    distance_km: None,
                })
                .collect(),
        )
    }

    #[test]
    fn distance_is_nonnegative_and_zero_for_same_point() {
        let result = compute_distances(&table(&[BANGALORE]), BANGALORE).unwrap();
        let distance = result.rows()[0].distance_km.unwrap();
        assert!(distance.abs() < 1e-9);
    }

    #[test]
    fn distance_matches_known_city_pair() {
        // Bangalore to Mysore is roughly 128 km great-circle.
        let result = compute_distances(&table(&[MYSORE]), BANGALORE).unwrap();
        let distance = result.rows()[0].distance_km.unwrap();
        assert!(
            (126.0..131.0).contains(&distance),
            "unexpected distance {distance}"
        );
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = compute_distances(&table(&[MYSORE]), BANGALORE).unwrap();
        let backward = compute_distances(&table(&[BANGALORE]), MYSORE).unwrap();
        let a = forward.rows()[0].distance_km.unwrap();
        let b = backward.rows()[0].distance_km.unwrap();
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn invalid_landmark_coordinate_aborts() {
        let bad = Coordinates::new(91.0, 77.0);
        let err = compute_distances(&table(&[BANGALORE, bad]), BANGALORE).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidCoordinate { .. }));
    }

    #[test]
    fn invalid_store_coordinate_aborts() {
        let bad = Coordinates::new(0.0, 200.0);
        let err = compute_distances(&table(&[BANGALORE]), bad).unwrap_err();
        match err {
            AnalyticsError::InvalidCoordinate { subject, .. } => {
                assert_eq!(subject, "store location");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn existing_distance_is_recomputed() {
        let mut rows = table(&[MYSORE]).rows().to_vec();
        rows[0].distance_km = Some(1.0);
        let result = compute_distances(&LandmarkTable::new(rows), BANGALORE).unwrap();
        assert!(result.rows()[0].distance_km.unwrap() > 100.0);
    }
}
