//! Hotspot/coldspot classification via standardized distances.
//!
//! A landmark's label depends only on its distance relative to same-type
//! landmarks around the same store: z-scores are computed within each
//! property-type group, never across the whole table.

use store_map_landmark_models::{
    Classification, ClassifiedLandmark, Landmark, LandmarkTable, PropertyType,
};

use crate::AnalyticsError;

/// Default z-score threshold.
///
/// Carried over from the original analysis. Unusually loose for hotspot
/// work (significance testing typically uses 1.96 or 2.58), which is why it
/// is a tunable option rather than a hard-coded constant.
pub const DEFAULT_Z_THRESHOLD: f64 = 0.5;

/// Tuning knobs for [`classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifyOptions {
    /// Standardized distance above which a landmark is a hotspot, and below
    /// whose negation it is a coldspot. Ties are neutral.
    pub z_threshold: f64,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            z_threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

/// Classifies every landmark as hotspot, coldspot, or neutral.
///
/// Landmarks are grouped by property type in order of first appearance;
/// the output is one [`ClassifiedLandmark`] per input row, grouped in that
/// order with input order preserved within each group. Groups of size < 2,
/// or with zero distance variance, classify every member as neutral with no
/// z-score. Pure: calling twice on the same table yields identical output.
///
/// # Errors
///
/// Returns [`AnalyticsError::MissingDistance`] if any landmark has no
/// distance. Run [`crate::compute_distances`] first, or load a table whose
/// `Distance` column is populated.
pub fn classify(
    table: &LandmarkTable,
    options: &ClassifyOptions,
) -> Result<Vec<ClassifiedLandmark>, AnalyticsError> {
    let mut groups: Vec<(PropertyType, Vec<&Landmark>)> = Vec::new();
    for landmark in table {
        match groups
            .iter_mut()
            .find(|(property_type, _)| *property_type == landmark.property_type)
        {
            Some((_, members)) => members.push(landmark),
            None => groups.push((landmark.property_type.clone(), vec![landmark])),
        }
    }

    let mut classified = Vec::with_capacity(table.len());

    for (property_type, members) in &groups {
        let mut distances = Vec::with_capacity(members.len());
        for landmark in members {
            let distance =
                landmark
                    .distance_km
                    .ok_or_else(|| AnalyticsError::MissingDistance {
                        name: landmark.name.clone(),
                    })?;
            distances.push(distance);
        }

        let scores = standardize(&distances);

        for ((landmark, distance_km), z_score) in members.iter().zip(distances.iter()).zip(scores) {
            let classification = z_score.map_or(Classification::Neutral, |z| {
                Classification::from_z_score(z, options.z_threshold)
            });
            classified.push(ClassifiedLandmark {
                name: landmark.name.clone(),
                property_type: property_type.clone(),
                coords: landmark.coords,
                distance_km: *distance_km,
                z_score,
                classification,
            });
        }
    }

    Ok(classified)
}

/// Standardizes a group of distances with the sample (n-1) standard
/// deviation.
///
/// Returns `None` per member when the group is degenerate: fewer than two
/// members, or all distances identical. Those members must classify as
/// neutral rather than divide by zero.
fn standardize(distances: &[f64]) -> Vec<Option<f64>> {
    if distances.len() < 2 || distances.windows(2).all(|pair| pair[0] == pair[1]) {
        return vec![None; distances.len()];
    }

    let n = distances.len() as f64;
    let mean = distances.iter().sum::<f64>() / n;
    let variance = distances
        .iter()
        .map(|distance| (distance - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);

    if variance == 0.0 {
        return vec![None; distances.len()];
    }

    let std_dev = variance.sqrt();
    distances
        .iter()
        .map(|distance| Some((distance - mean) / std_dev))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_map_landmark_models::Coordinates;

    fn landmark(name: &str, property_type: &str, distance_km: Option<f64>) -> Landmark {
        Landmark {
            name: name.to_string(),
            property_type: PropertyType::from(property_type),
            coords: Coordinates::new(12.97, 77.59),
            distance_km,
        }
    }

    fn table(rows: &[(&str, &str, f64)]) -> LandmarkTable {
        LandmarkTable::new(
            rows.iter()
                .map(|(name, property_type, distance)| {
                    landmark(name, property_type, Some(*distance))
                })
                .collect(),
        )
    }

    #[test]
    fn worked_scenario_from_the_field_data() {
        // food distances 1, 2, 10: mean 4.33, sample std ~4.93.
        let classified = classify(
            &table(&[("a", "food", 1.0), ("b", "food", 2.0), ("c", "food", 10.0)]),
            &ClassifyOptions::default(),
        )
        .unwrap();

        assert_eq!(classified[0].classification, Classification::Coldspot);
        assert!((classified[0].z_score.unwrap() - (-0.6757)).abs() < 1e-3);
        assert_eq!(classified[1].classification, Classification::Neutral);
        assert_eq!(classified[2].classification, Classification::Hotspot);
        assert!((classified[2].z_score.unwrap() - 1.1488).abs() < 1e-3);
    }

    #[test]
    fn groups_standardize_independently() {
        // Identical distances in different groups must not see each other.
        let classified = classify(
            &table(&[
                ("a", "food", 1.0),
                ("b", "retail", 1.0),
                ("c", "food", 9.0),
                ("d", "retail", 9.0),
                ("e", "food", 2.0),
                ("f", "retail", 2.0),
            ]),
            &ClassifyOptions::default(),
        )
        .unwrap();

        let food: Vec<_> = classified
            .iter()
            .filter(|c| c.property_type == PropertyType::from("food"))
            .collect();
        let retail: Vec<_> = classified
            .iter()
            .filter(|c| c.property_type == PropertyType::from("retail"))
            .collect();

        for (f, r) in food.iter().zip(&retail) {
            assert_eq!(f.classification, r.classification);
            assert!((f.z_score.unwrap() - r.z_score.unwrap()).abs() < 1e-12);
        }
    }

    #[test]
    fn output_grouped_by_first_appearance() {
        let classified = classify(
            &table(&[
                ("a", "retail", 1.0),
                ("b", "food", 2.0),
                ("c", "retail", 3.0),
                ("d", "food", 4.0),
            ]),
            &ClassifyOptions::default(),
        )
        .unwrap();

        let names: Vec<_> = classified.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn singleton_group_is_neutral() {
        let classified = classify(&table(&[("a", "food", 5.0)]), &ClassifyOptions::default())
            .unwrap();
        assert_eq!(classified[0].classification, Classification::Neutral);
        assert!(classified[0].z_score.is_none());
    }

    #[test]
    fn zero_variance_group_is_neutral() {
        let classified = classify(
            &table(&[("a", "food", 3.0), ("b", "food", 3.0), ("c", "food", 3.0)]),
            &ClassifyOptions::default(),
        )
        .unwrap();
        for entry in &classified {
            assert_eq!(entry.classification, Classification::Neutral);
            assert!(entry.z_score.is_none());
        }
    }

    #[test]
    fn ties_at_threshold_are_neutral() {
        // Distances 0, 1, 2 standardize to exactly -1, 0, 1; with the
        // threshold raised to 1.0 both extremes tie and stay neutral.
        let classified = classify(
            &table(&[("a", "food", 0.0), ("b", "food", 1.0), ("c", "food", 2.0)]),
            &ClassifyOptions { z_threshold: 1.0 },
        )
        .unwrap();
        for entry in &classified {
            assert_eq!(entry.classification, Classification::Neutral);
        }
    }

    #[test]
    fn empty_table_classifies_to_empty() {
        let classified =
            classify(&LandmarkTable::default(), &ClassifyOptions::default()).unwrap();
        assert!(classified.is_empty());
    }

    #[test]
    fn classify_is_idempotent() {
        let input = table(&[
            ("a", "food", 1.0),
            ("b", "food", 2.0),
            ("c", "food", 10.0),
            ("d", "retail", 4.0),
        ]);
        let first = classify(&input, &ClassifyOptions::default()).unwrap();
        let second = classify(&input, &ClassifyOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_distance_fails_with_landmark_name() {
        let input = LandmarkTable::new(vec![
            landmark("a", "food", Some(1.0)),
            landmark("b", "food", None),
        ]);
        let err = classify(&input, &ClassifyOptions::default()).unwrap_err();
        match err {
            AnalyticsError::MissingDistance { name } => assert_eq!(name, "b"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
