#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Deterministic marker color assignment.
//!
//! The map layer colors landmark markers by property type. Colors were
//! previously drawn at random on every render, so the same category could
//! change color between page loads; here assignment is a pure function of
//! the property-type set plus explicit config overrides, so repeated
//! renders are visually stable across processes.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use store_map_landmark_models::PropertyType;
use strum_macros::{AsRefStr, Display, EnumString};

/// The marker color vocabulary supported by the map layer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    DarkRed,
    LightRed,
    Beige,
    DarkBlue,
    DarkGreen,
    CadetBlue,
    DarkPurple,
    White,
    Pink,
    LightBlue,
    LightGreen,
    Gray,
    Black,
    LightGray,
}

/// Assignment order for property types without an override.
pub const PALETTE: [MarkerColor; 19] = [
    MarkerColor::Red,
    MarkerColor::Blue,
    MarkerColor::Green,
    MarkerColor::Purple,
    MarkerColor::Orange,
    MarkerColor::DarkRed,
    MarkerColor::LightRed,
    MarkerColor::Beige,
    MarkerColor::DarkBlue,
    MarkerColor::DarkGreen,
    MarkerColor::CadetBlue,
    MarkerColor::DarkPurple,
    MarkerColor::White,
    MarkerColor::Pink,
    MarkerColor::LightBlue,
    MarkerColor::LightGreen,
    MarkerColor::Gray,
    MarkerColor::Black,
    MarkerColor::LightGray,
];

/// Assigns a marker color to every property type.
///
/// Types are sorted by name, then colors are taken from [`PALETTE`] in
/// order (cycling if there are more types than colors). Overrides win over
/// palette assignment and do not consume a palette slot. Same inputs, same
/// mapping, in any process.
pub fn color_map<'a, I>(
    property_types: I,
    overrides: &BTreeMap<String, MarkerColor>,
) -> BTreeMap<PropertyType, MarkerColor>
where
    I: IntoIterator<Item = &'a PropertyType>,
{
    let sorted: BTreeSet<&PropertyType> = property_types.into_iter().collect();

    let mut mapping = BTreeMap::new();
    let mut next = 0_usize;

    for property_type in sorted {
        let color = if let Some(&color) = overrides.get(property_type.as_str()) {
            color
        } else {
            let color = PALETTE[next % PALETTE.len()];
            next += 1;
            color
        };
        mapping.insert(property_type.clone(), color);
    }

    mapping
}

/// Parses config color overrides, dropping entries with unknown color
/// names.
#[must_use]
pub fn parse_overrides(raw: &BTreeMap<String, String>) -> BTreeMap<String, MarkerColor> {
    let mut overrides = BTreeMap::new();
    for (property_type, color_name) in raw {
        match MarkerColor::from_str(color_name) {
            Ok(color) => {
                overrides.insert(property_type.clone(), color);
            }
            Err(_) => {
                log::warn!("Ignoring unknown marker color `{color_name}` for `{property_type}`");
            }
        }
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(names: &[&str]) -> Vec<PropertyType> {
        names.iter().map(|name| PropertyType::from(*name)).collect()
    }

    #[test]
    fn assignment_is_order_independent() {
        let forward = types(&["transportation", "retail", "food"]);
        let backward = types(&["food", "retail", "transportation"]);
        let overrides = BTreeMap::new();
        assert_eq!(
            color_map(&forward, &overrides),
            color_map(&backward, &overrides)
        );
    }

    #[test]
    fn colors_follow_palette_in_sorted_type_order() {
        let mapping = color_map(&types(&["retail", "food"]), &BTreeMap::new());
        // Sorted: food first.
        assert_eq!(mapping[&PropertyType::from("food")], MarkerColor::Red);
        assert_eq!(mapping[&PropertyType::from("retail")], MarkerColor::Blue);
    }

    #[test]
    fn override_wins_without_consuming_a_slot() {
        let mut overrides = BTreeMap::new();
        overrides.insert("food".to_string(), MarkerColor::Black);
        let mapping = color_map(&types(&["retail", "food"]), &overrides);
        assert_eq!(mapping[&PropertyType::from("food")], MarkerColor::Black);
        // retail still gets the first palette slot.
        assert_eq!(mapping[&PropertyType::from("retail")], MarkerColor::Red);
    }

    #[test]
    fn palette_cycles_past_nineteen_types() {
        let names: Vec<String> = (0..25).map(|i| format!("type-{i:02}")).collect();
        let owned: Vec<PropertyType> =
            names.iter().map(|name| PropertyType::from(name.as_str())).collect();
        let mapping = color_map(&owned, &BTreeMap::new());
        assert_eq!(mapping.len(), 25);
        assert_eq!(mapping[&PropertyType::from("type-00")], PALETTE[0]);
        assert_eq!(mapping[&PropertyType::from("type-19")], PALETTE[0]);
    }

    #[test]
    fn unknown_override_colors_are_dropped() {
        let mut raw = BTreeMap::new();
        raw.insert("retail".to_string(), "darkblue".to_string());
        raw.insert("food".to_string(), "chartreuse".to_string());
        let overrides = parse_overrides(&raw);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides["retail"], MarkerColor::DarkBlue);
    }

    #[test]
    fn marker_color_round_trips_lowercase_names() {
        assert_eq!(MarkerColor::CadetBlue.to_string(), "cadetblue");
        assert_eq!(
            MarkerColor::from_str("lightgray").unwrap(),
            MarkerColor::LightGray
        );
    }
}
