//! Step-by-step hero creation.
//!
//! Collects the hero's components, then validates them together in
//! [`HeroBuilder::build`].

use crate::characteristic::{
    calculate_characteristic_arrays, characteristic_arrays, min_xp, CharacteristicValue, MAX_LEVEL,
};
use crate::content::{CORE_SOURCEBOOK_ID, ORDEN_SOURCEBOOK_ID};
use crate::feature::Feature;
use crate::hero::{Ancestry, Career, Complication, Culture, Hero, HeroClass, IncitingIncidents};
use std::collections::HashSet;
use thiserror::Error;

/// Error from hero building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("Hero name is required")]
    MissingName,

    #[error("Class level must be between 1 and 10, got {0}")]
    InvalidLevel(u8),

    #[error("Characteristics need a class to check against")]
    MissingClass,

    #[error("Characteristics are not a valid array for this class")]
    InvalidCharacteristics,

    #[error("Duplicate feature id: {0}")]
    DuplicateFeature(String),
}

/// Every characteristic assignment the class allows: each standard array
/// for its number of primary characteristics, permuted over the rest.
pub fn characteristic_options(class: &HeroClass) -> Vec<Vec<CharacteristicValue>> {
    characteristic_arrays(class.primary_characteristics.len())
        .iter()
        .flat_map(|array| calculate_characteristic_arrays(array, &class.primary_characteristics))
        .collect()
}

/// Builder for creating heroes.
#[derive(Debug, Clone, Default)]
pub struct HeroBuilder {
    name: Option<String>,
    ancestry: Option<Ancestry>,
    culture: Option<Culture>,
    career: Option<Career>,
    class: Option<HeroClass>,
    level: Option<u8>,
    characteristics: Option<Vec<CharacteristicValue>>,
    complication: Option<Complication>,
    features: Vec<Feature>,
    setting_ids: Option<Vec<String>>,
}

impl HeroBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ancestry(mut self, ancestry: Ancestry) -> Self {
        self.ancestry = Some(ancestry);
        self
    }

    pub fn culture(mut self, culture: Culture) -> Self {
        self.culture = Some(culture);
        self
    }

    pub fn career(mut self, career: Career) -> Self {
        self.career = Some(career);
        self
    }

    pub fn class(mut self, class: HeroClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Starting level. Defaults to the class's own level.
    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    /// Characteristic scores, checked against [`characteristic_options`].
    pub fn characteristics(mut self, characteristics: Vec<CharacteristicValue>) -> Self {
        self.characteristics = Some(characteristics);
        self
    }

    pub fn complication(mut self, complication: Complication) -> Self {
        self.complication = Some(complication);
        self
    }

    /// Attach a feature directly to the hero.
    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn setting_ids(mut self, ids: Vec<String>) -> Self {
        self.setting_ids = Some(ids);
        self
    }

    /// Validate and build the hero.
    pub fn build(self) -> Result<Hero, BuilderError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(BuilderError::MissingName)?;

        let mut seen = HashSet::new();
        for feature in &self.features {
            if !seen.insert(feature.id.as_str()) {
                return Err(BuilderError::DuplicateFeature(feature.id.clone()));
            }
        }

        let class = match self.class {
            Some(mut class) => {
                let level = self.level.unwrap_or(class.level);
                if !(1..=MAX_LEVEL).contains(&level) {
                    return Err(BuilderError::InvalidLevel(level));
                }
                class.level = level;

                if let Some(characteristics) = self.characteristics {
                    if !characteristic_options(&class).contains(&characteristics) {
                        return Err(BuilderError::InvalidCharacteristics);
                    }
                    class.characteristics = characteristics;
                }
                Some(class)
            }
            None if self.characteristics.is_some() => return Err(BuilderError::MissingClass),
            None => None,
        };

        let career = self.career.map(|mut career| {
            career
                .inciting_incidents
                .get_or_insert_with(IncitingIncidents::default);
            career
        });

        let mut hero = Hero::new(name);
        hero.state.xp = class.as_ref().map_or(0, |c| min_xp(c.level));
        hero.ancestry = self.ancestry;
        hero.culture = self.culture;
        hero.career = career;
        hero.class = class;
        hero.complication = self.complication;
        hero.features = self.features;
        hero.setting_ids = Some(self.setting_ids.unwrap_or_else(|| {
            vec![CORE_SOURCEBOOK_ID.to_string(), ORDEN_SOURCEBOOK_ID.to_string()]
        }));

        tracing::debug!(hero = %hero.id, name = %hero.name, level = ?hero.level(), "built hero");
        Ok(hero)
    }
}
