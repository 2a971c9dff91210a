//! Conditional feature overrides.

use crate::extract::FeatureSource;
use crate::feature::{Feature, FeatureData, FeatureType, OverrideData};
use crate::hero::Hero;

/// Whether an override's condition holds for the hero.
///
/// Only size conditions are evaluated: the condition value is the size as
/// text followed by the modifier code, such as `["1", "M"]`. Any other
/// condition target never applies.
pub fn should_do_override(hero: &Hero, data: &OverrideData) -> bool {
    match data.condition_target {
        FeatureType::Size => {
            let size = hero.size();
            match data.condition_value.as_slice() {
                [value, code, ..] => *value == size.value.to_string() && code == size.mod_code(),
                _ => false,
            }
        }
        _ => false,
    }
}

/// Replacement features of every override whose condition currently holds.
pub fn active_overrides(hero: &Hero) -> Vec<&Feature> {
    hero.all_features()
        .into_iter()
        .filter_map(|f| match &f.data {
            FeatureData::Override(data) if should_do_override(hero, data) => Some(data.feature.as_ref()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::SpeedData;
    use crate::testing::size_feature;

    fn size_override(id: &str, value: &str, code: &str) -> Feature {
        Feature::new(
            id,
            "Small Stride",
            FeatureData::Override(OverrideData {
                condition_target: FeatureType::Size,
                condition_value: vec![value.to_string(), code.to_string()],
                feature: Box::new(Feature::new(
                    format!("{id}-speed"),
                    "Speed",
                    FeatureData::Speed(SpeedData { speed: 6 }),
                )),
            }),
        )
    }

    #[test]
    fn test_size_condition_matches_resolved_size() {
        let mut hero = Hero::new("Test");
        let condition = |value: &str, code: &str| OverrideData {
            condition_target: FeatureType::Size,
            condition_value: vec![value.to_string(), code.to_string()],
            feature: Box::new(Feature::new("x", "X", FeatureData::Text)),
        };

        assert!(should_do_override(&hero, &condition("1", "M")));
        assert!(!should_do_override(&hero, &condition("1", "S")));

        hero.features.push(size_feature("big", "2"));
        assert!(should_do_override(&hero, &condition("2", "")));
        assert!(!should_do_override(&hero, &condition("1", "M")));
    }

    #[test]
    fn test_other_targets_never_apply() {
        let hero = Hero::new("Test");
        let data = OverrideData {
            condition_target: FeatureType::Speed,
            condition_value: vec!["5".to_string()],
            feature: Box::new(Feature::new("x", "X", FeatureData::Text)),
        };
        assert!(!should_do_override(&hero, &data));
    }

    #[test]
    fn test_malformed_condition_never_applies() {
        let hero = Hero::new("Test");
        let data = OverrideData {
            condition_target: FeatureType::Size,
            condition_value: vec!["1".to_string()],
            feature: Box::new(Feature::new("x", "X", FeatureData::Text)),
        };
        assert!(!should_do_override(&hero, &data));
    }

    #[test]
    fn test_active_overrides() {
        let mut hero = Hero::new("Test");
        hero.features.push(size_override("medium", "1", "M"));
        hero.features.push(size_override("small", "1", "S"));

        let ids: Vec<&str> = active_overrides(&hero).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["medium-speed"]);
        assert_eq!(hero.speed(), 5);
    }
}
