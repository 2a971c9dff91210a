//! Hero types.
//!
//! A hero is assembled from an ancestry, culture, career, class, and
//! complication, each owning an ordered feature list, plus features attached
//! directly to the hero and features granted by carried items.

use crate::ability::Ability;
use crate::characteristic::{Characteristic, CharacteristicValue};
use crate::feature::{Feature, SkillList};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Hero
// ============================================================================

/// The root entity. Every derived statistic is recomputed from this on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ancestry: Option<Ancestry>,
    #[serde(default)]
    pub culture: Option<Culture>,
    #[serde(default)]
    pub career: Option<Career>,
    #[serde(default)]
    pub class: Option<HeroClass>,
    #[serde(default)]
    pub complication: Option<Complication>,
    /// Features attached directly to the hero (perks, extra skills, languages).
    /// [`all_features`](crate::extract::FeatureSource::all_features) gives every
    /// feature from every source.
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub state: HeroState,
    #[serde(default)]
    pub ability_customizations: Vec<AbilityCustomization>,
    /// Enabled sourcebook ids. `None` on records saved before this existed.
    #[serde(default, rename = "settingIDs")]
    pub setting_ids: Option<Vec<String>>,
}

impl Hero {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            ancestry: None,
            culture: None,
            career: None,
            class: None,
            complication: None,
            features: Vec::new(),
            state: HeroState::default(),
            ability_customizations: Vec::new(),
            setting_ids: None,
        }
    }

    /// Class level, if the hero has a class.
    pub fn level(&self) -> Option<u8> {
        self.class.as_ref().map(|c| c.level)
    }
}

/// Mutable play state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroState {
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_wealth")]
    pub wealth: i32,
    #[serde(default)]
    pub surges: u32,
    #[serde(default)]
    pub inventory: Vec<Item>,
}

impl Default for HeroState {
    fn default() -> Self {
        Self {
            xp: 0,
            wealth: default_wealth(),
            surges: 0,
            inventory: Vec::new(),
        }
    }
}

fn default_wealth() -> i32 {
    1
}

/// A player's renaming or notes for one ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityCustomization {
    #[serde(rename = "abilityID")]
    pub ability_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
}

// ============================================================================
// Hero Components
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ancestry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Ancestry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            features: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Culture {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Languages every member of the culture speaks.
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Background element with a description, such as an inciting incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncitingIncidents {
    #[serde(default)]
    pub options: Vec<Element>,
    #[serde(default, rename = "selectedID")]
    pub selected_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// `None` on records saved before inciting incidents existed.
    #[serde(default)]
    pub inciting_incidents: Option<IncitingIncidents>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complication {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

// ============================================================================
// Class
// ============================================================================

/// Features gained at a class level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFeatures {
    pub level: u8,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subclass {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub feature_levels: Vec<LevelFeatures>,
    #[serde(default)]
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroClass {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub heroic_resource: String,
    #[serde(default)]
    pub primary_characteristics: Vec<Characteristic>,
    /// Base characteristic scores.
    #[serde(default)]
    pub characteristics: Vec<CharacteristicValue>,
    #[serde(default)]
    pub feature_levels: Vec<LevelFeatures>,
    /// Catalog that class-ability features select from.
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub subclasses: Vec<Subclass>,
    #[serde(default = "default_level")]
    pub level: u8,
}

impl HeroClass {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            heroic_resource: String::new(),
            primary_characteristics: Vec::new(),
            characteristics: Vec::new(),
            feature_levels: Vec::new(),
            abilities: Vec::new(),
            subclasses: Vec::new(),
            level: default_level(),
        }
    }

    /// Base score for a characteristic, 0 when the class does not list it.
    pub fn characteristic(&self, characteristic: Characteristic) -> i32 {
        self.characteristics
            .iter()
            .find(|c| c.characteristic == characteristic)
            .map(|c| c.value)
            .unwrap_or(0)
    }

    pub fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }
}

fn default_level() -> u8 {
    1
}

// ============================================================================
// Kits and Domains
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KitType {
    #[default]
    Standard,
    Stormwight,
}

/// Per-tier damage bonus granted by a kit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitDamageBonus {
    pub tier1: i32,
    pub tier2: i32,
    pub tier3: i32,
}

impl KitDamageBonus {
    pub fn new(tier1: i32, tier2: i32, tier3: i32) -> Self {
        Self {
            tier1,
            tier2,
            tier3,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.tier1 == 0 && self.tier2 == 0 && self.tier3 == 0
    }
}

/// Equipment package. When several are selected, each stat takes the best
/// value among them rather than the sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kit_type: KitType,
    #[serde(default)]
    pub stamina: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub stability: i32,
    #[serde(default)]
    pub disengage: i32,
    #[serde(default)]
    pub melee_damage: Option<KitDamageBonus>,
    #[serde(default)]
    pub ranged_damage: Option<KitDamageBonus>,
    #[serde(default)]
    pub melee_distance: i32,
    #[serde(default)]
    pub ranged_distance: i32,
}

impl Kit {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kit_type: KitType::Standard,
            stamina: 0,
            speed: 0,
            stability: 0,
            disengage: 0,
            melee_damage: None,
            ranged_damage: None,
            melee_distance: 0,
            ranged_distance: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

// ============================================================================
// Catalog Entries
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub list: SkillList,
}

impl Skill {
    pub fn new(name: impl Into<String>, list: SkillList) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hero_defaults() {
        let hero = Hero::new("Vex");
        assert_eq!(hero.name, "Vex");
        assert!(!hero.id.is_empty());
        assert_eq!(hero.state.wealth, 1);
        assert_eq!(hero.state.xp, 0);
        assert_eq!(hero.level(), None);
        assert!(hero.setting_ids.is_none());
    }

    #[test]
    fn test_class_characteristic_lookup() {
        let mut class = HeroClass::new("fury", "Fury");
        class.characteristics = vec![
            CharacteristicValue::new(Characteristic::Might, 2),
            CharacteristicValue::new(Characteristic::Agility, 2),
        ];
        assert_eq!(class.characteristic(Characteristic::Might), 2);
        assert_eq!(class.characteristic(Characteristic::Presence), 0);
    }

    #[test]
    fn test_legacy_state_defaults() {
        let state: HeroState = serde_json::from_str(r#"{ "xp": 20 }"#).unwrap();
        assert_eq!(state.xp, 20);
        assert_eq!(state.wealth, 1);
        assert_eq!(state.surges, 0);
        assert!(state.inventory.is_empty());
    }
}
