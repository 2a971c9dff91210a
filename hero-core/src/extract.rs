//! Feature extraction: the flat, ordered features each hero component
//! contributes.

use crate::feature::Feature;
use crate::hero::{Ancestry, Career, Complication, Culture, HeroClass, Item, LevelFeatures};

/// Something that contributes features to a hero.
pub trait FeatureSource {
    /// Contributed features in display order, with choice selections
    /// flattened in after the feature that offered them.
    fn all_features(&self) -> Vec<&Feature>;
}

fn flatten_all(features: &[Feature]) -> Vec<&Feature> {
    features.iter().flat_map(|f| f.flatten()).collect()
}

fn up_to_level(levels: &[LevelFeatures], level: u8) -> Vec<&Feature> {
    levels
        .iter()
        .filter(|lf| lf.level <= level)
        .flat_map(|lf| flatten_all(&lf.features))
        .collect()
}

impl FeatureSource for Ancestry {
    fn all_features(&self) -> Vec<&Feature> {
        flatten_all(&self.features)
    }
}

impl FeatureSource for Culture {
    fn all_features(&self) -> Vec<&Feature> {
        flatten_all(&self.features)
    }
}

impl FeatureSource for Career {
    fn all_features(&self) -> Vec<&Feature> {
        flatten_all(&self.features)
    }
}

impl FeatureSource for Complication {
    fn all_features(&self) -> Vec<&Feature> {
        flatten_all(&self.features)
    }
}

impl FeatureSource for Item {
    fn all_features(&self) -> Vec<&Feature> {
        flatten_all(&self.features)
    }
}

impl FeatureSource for HeroClass {
    /// Class features up to the current level, then those of each selected
    /// subclass.
    fn all_features(&self) -> Vec<&Feature> {
        let mut features = up_to_level(&self.feature_levels, self.level);
        for subclass in self.subclasses.iter().filter(|s| s.selected) {
            features.extend(up_to_level(&subclass.feature_levels, self.level));
        }
        features
    }
}
