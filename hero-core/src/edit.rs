//! Editing a hero's features after creation.

use crate::content::DEFAULT_LANGUAGE_ID;
use crate::feature::{Feature, FeatureData, FeatureType};
use crate::hero::Hero;
use crate::sourcebook::Sourcebook;
use thiserror::Error;

/// Errors from feature edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Duplicate feature id: {0}")]
    DuplicateFeature(String),

    #[error("Feature {id} holds {expected} data, got {found}")]
    KindMismatch {
        id: String,
        expected: FeatureType,
        found: FeatureType,
    },
}

/// Depth-first search through a feature list and the selections it holds.
fn find_feature_mut<'a>(features: &'a mut [Feature], id: &str) -> Option<&'a mut Feature> {
    for feature in features {
        if feature.id == id {
            return Some(feature);
        }
        let selected = match &mut feature.data {
            FeatureData::Choice(data) => &mut data.selected,
            FeatureData::AncestryTraits(data) => &mut data.selected,
            _ => continue,
        };
        if let Some(found) = find_feature_mut(selected, id) {
            return Some(found);
        }
    }
    None
}

impl Hero {
    /// Directly attached features the player may edit.
    pub fn customizable_features(&self) -> Vec<&Feature> {
        self.features
            .iter()
            .filter(|f| f.id != DEFAULT_LANGUAGE_ID)
            .collect()
    }

    /// Attach a feature directly to the hero.
    pub fn add_feature(&mut self, feature: Feature) -> Result<(), EditError> {
        if self.features.iter().any(|f| f.id == feature.id) {
            return Err(EditError::DuplicateFeature(feature.id));
        }
        tracing::debug!(hero = %self.id, feature = %feature.id, kind = %feature.kind(), "adding feature");
        self.features.push(feature);
        Ok(())
    }

    /// Remove a directly attached feature, returning it.
    pub fn delete_feature(&mut self, id: &str) -> Result<Feature, EditError> {
        let index = self
            .features
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| EditError::FeatureNotFound(id.to_string()))?;
        tracing::debug!(hero = %self.id, feature = id, "deleting feature");
        Ok(self.features.remove(index))
    }

    /// Any feature the hero owns, wherever it is attached, including
    /// features selected through choices.
    pub fn feature_mut(&mut self, id: &str) -> Option<&mut Feature> {
        let mut lists: Vec<&mut Vec<Feature>> = Vec::new();

        if let Some(ancestry) = self.ancestry.as_mut() {
            lists.push(&mut ancestry.features);
        }
        if let Some(culture) = self.culture.as_mut() {
            lists.push(&mut culture.features);
        }
        if let Some(career) = self.career.as_mut() {
            lists.push(&mut career.features);
        }
        if let Some(class) = self.class.as_mut() {
            for level in class.feature_levels.iter_mut() {
                lists.push(&mut level.features);
            }
            for subclass in class.subclasses.iter_mut() {
                for level in subclass.feature_levels.iter_mut() {
                    lists.push(&mut level.features);
                }
            }
        }
        if let Some(complication) = self.complication.as_mut() {
            lists.push(&mut complication.features);
        }
        lists.push(&mut self.features);
        for item in self.state.inventory.iter_mut() {
            lists.push(&mut item.features);
        }

        lists
            .into_iter()
            .find_map(|features| find_feature_mut(features, id))
    }

    /// Replace a feature's payload. The payload must be of the feature's
    /// kind. Changing an inherited-ancestry selection rebuilds the
    /// ancestry's inherited features.
    pub fn set_feature_data(
        &mut self,
        id: &str,
        data: FeatureData,
        sourcebooks: &[Sourcebook],
    ) -> Result<(), EditError> {
        let feature = self
            .feature_mut(id)
            .ok_or_else(|| EditError::FeatureNotFound(id.to_string()))?;

        if feature.kind() != data.kind() {
            return Err(EditError::KindMismatch {
                id: id.to_string(),
                expected: feature.kind(),
                found: data.kind(),
            });
        }

        let reinherit = data.kind() == FeatureType::InheritedAncestry;
        feature.data = data;
        tracing::debug!(feature = id, "updated feature data");

        if reinherit {
            self.update_inherited_features(sourcebooks);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRegistry, REVENANT_FORMER_LIFE_ID, REVENANT_ID};
    use crate::feature::{ChoiceData, LanguageData, SpeedData};
    use crate::hero::Ancestry;
    use crate::inheritance::INHERITED_SIZE_ID;
    use crate::testing::{inherited_ancestry, size_feature, speed_feature};

    fn language(id: &str, name: &str) -> Feature {
        Feature::new(
            id,
            "Language",
            FeatureData::Language(LanguageData {
                language: name.to_string(),
            }),
        )
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut hero = Hero::new("Test");
        hero.add_feature(speed_feature("perk", 6)).unwrap();
        assert_eq!(
            hero.add_feature(speed_feature("perk", 7)),
            Err(EditError::DuplicateFeature("perk".to_string()))
        );
        assert_eq!(hero.features.len(), 1);
    }

    #[test]
    fn test_delete_feature() {
        let mut hero = Hero::new("Test");
        hero.add_feature(speed_feature("perk", 6)).unwrap();
        assert_eq!(hero.delete_feature("perk").map(|f| f.id), Ok("perk".to_string()));
        assert_eq!(
            hero.delete_feature("perk"),
            Err(EditError::FeatureNotFound("perk".to_string()))
        );
    }

    #[test]
    fn test_customizable_features_hide_default_language() {
        let mut hero = Hero::new("Test");
        hero.features = vec![language(DEFAULT_LANGUAGE_ID, "Caelian"), language("extra", "Khelt")];
        let ids: Vec<&str> = hero.customizable_features().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["extra"]);
    }

    #[test]
    fn test_set_data_inside_choice_selection() {
        let mut hero = Hero::new("Test");
        hero.ancestry = Some(Ancestry::new("elf", "Elf").with_features(vec![Feature::new(
            "elf-choice",
            "Choice",
            FeatureData::Choice(ChoiceData {
                options: vec![],
                count: 1,
                selected: vec![speed_feature("fleet", 6)],
            }),
        )]));

        hero.set_feature_data("fleet", FeatureData::Speed(SpeedData { speed: 7 }), &[])
            .unwrap();
        assert_eq!(hero.speed(), 7);
    }

    #[test]
    fn test_set_data_rejects_kind_mismatch() {
        let mut hero = Hero::new("Test");
        hero.add_feature(speed_feature("perk", 6)).unwrap();
        let result = hero.set_feature_data("perk", FeatureData::Text, &[]);
        assert_eq!(
            result,
            Err(EditError::KindMismatch {
                id: "perk".to_string(),
                expected: FeatureType::Speed,
                found: FeatureType::Text,
            })
        );
    }

    #[test]
    fn test_set_inherited_ancestry_rebuilds_features() {
        let mut book = Sourcebook::new("core", "Core");
        book.ancestries = vec![
            Ancestry::new("hakaan", "Hakaan").with_features(vec![size_feature("hakaan-size", "1L")]),
        ];

        let mut hero = Hero::new("Test");
        hero.ancestry = ContentRegistry::global().ancestry(REVENANT_ID).cloned();

        let selection = inherited_ancestry(
            REVENANT_FORMER_LIFE_ID,
            &[FeatureType::Size, FeatureType::Speed],
            &["hakaan"],
        );
        hero.set_feature_data(REVENANT_FORMER_LIFE_ID, selection.data, &[book])
            .unwrap();

        let features = &hero.ancestry.as_ref().unwrap().features;
        assert_eq!(features[1].id, INHERITED_SIZE_ID);
        assert_eq!(hero.size().to_string(), "1L");
    }
}
