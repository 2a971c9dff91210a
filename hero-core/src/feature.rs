//! Features: tagged contribution records attached to a hero's ancestry,
//! culture, career, class, complication, items, or directly to the hero.
//!
//! Each feature kind carries its own payload; the kind is the variant of
//! [`FeatureData`], so a payload can never disagree with its kind.

use crate::ability::{Ability, AbilityCost};
use crate::characteristic::Characteristic;
use crate::hero::{Domain, Kit, KitType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Feature
// ============================================================================

/// A single feature record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub data: FeatureData,
}

impl Feature {
    pub fn new(id: impl Into<String>, name: impl Into<String>, data: FeatureData) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            data,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(&self) -> FeatureType {
        self.data.kind()
    }

    /// This feature followed by every feature selected through it, depth first.
    pub fn flatten(&self) -> Vec<&Feature> {
        let mut features = vec![self];
        let selected: &[Feature] = match &self.data {
            FeatureData::Choice(data) => &data.selected,
            FeatureData::AncestryTraits(data) => &data.selected,
            _ => &[],
        };
        for feature in selected {
            features.extend(feature.flatten());
        }
        features
    }
}

/// Feature kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    Text,
    Ability,
    AncestryTraits,
    Bonus,
    Choice,
    ClassAbility,
    DamageModifier,
    Domain,
    InheritedAncestry,
    Kit,
    KitType,
    Language,
    LanguageChoice,
    Override,
    Size,
    Skill,
    SkillChoice,
    Speed,
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Kind-specific payload of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FeatureData {
    Text,
    Ability(AbilityData),
    AncestryTraits(AncestryTraitsData),
    Bonus(BonusData),
    Choice(ChoiceData),
    ClassAbility(ClassAbilityData),
    DamageModifier(DamageModifierData),
    Domain(DomainData),
    InheritedAncestry(InheritedAncestryData),
    Kit(KitData),
    KitType(KitTypeData),
    Language(LanguageData),
    LanguageChoice(LanguageChoiceData),
    Override(OverrideData),
    Size(SizeData),
    Skill(SkillData),
    SkillChoice(SkillChoiceData),
    Speed(SpeedData),
}

impl FeatureData {
    pub fn kind(&self) -> FeatureType {
        match self {
            FeatureData::Text => FeatureType::Text,
            FeatureData::Ability(_) => FeatureType::Ability,
            FeatureData::AncestryTraits(_) => FeatureType::AncestryTraits,
            FeatureData::Bonus(_) => FeatureType::Bonus,
            FeatureData::Choice(_) => FeatureType::Choice,
            FeatureData::ClassAbility(_) => FeatureType::ClassAbility,
            FeatureData::DamageModifier(_) => FeatureType::DamageModifier,
            FeatureData::Domain(_) => FeatureType::Domain,
            FeatureData::InheritedAncestry(_) => FeatureType::InheritedAncestry,
            FeatureData::Kit(_) => FeatureType::Kit,
            FeatureData::KitType(_) => FeatureType::KitType,
            FeatureData::Language(_) => FeatureType::Language,
            FeatureData::LanguageChoice(_) => FeatureType::LanguageChoice,
            FeatureData::Override(_) => FeatureType::Override,
            FeatureData::Size(_) => FeatureType::Size,
            FeatureData::Skill(_) => FeatureType::Skill,
            FeatureData::SkillChoice(_) => FeatureType::SkillChoice,
            FeatureData::Speed(_) => FeatureType::Speed,
        }
    }
}

// ============================================================================
// Scaled Values
// ============================================================================

/// A number that grows with the hero: a base value, plus the best of some
/// characteristics, plus an amount per level after the first and per echelon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledValue {
    /// Base value.
    #[serde(default)]
    pub value: i32,
    #[serde(default)]
    pub value_characteristics: Vec<Characteristic>,
    #[serde(default)]
    pub value_per_level: i32,
    #[serde(default)]
    pub value_per_echelon: i32,
}

impl ScaledValue {
    pub fn fixed(value: i32) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn with_characteristics(mut self, characteristics: Vec<Characteristic>) -> Self {
        self.value_characteristics = characteristics;
        self
    }

    pub fn per_level(mut self, value: i32) -> Self {
        self.value_per_level = value;
        self
    }

    pub fn per_echelon(mut self, value: i32) -> Self {
        self.value_per_echelon = value;
        self
    }
}

/// Derived statistic a bonus applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureField {
    Disengage,
    Recoveries,
    RecoveryValue,
    Speed,
    Stability,
    Stamina,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusData {
    pub field: FeatureField,
    #[serde(flatten)]
    pub amount: ScaledValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageModifierType {
    Immunity,
    Weakness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageModifier {
    pub damage_type: String,
    #[serde(rename = "type")]
    pub modifier_type: DamageModifierType,
    #[serde(flatten)]
    pub amount: ScaledValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageModifierData {
    #[serde(default)]
    pub modifiers: Vec<DamageModifier>,
}

// ============================================================================
// Size and Speed
// ============================================================================

/// Size category letter, only meaningful for size 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeMod {
    T,
    S,
    M,
    L,
}

impl SizeMod {
    pub fn code(&self) -> &'static str {
        match self {
            SizeMod::T => "T",
            SizeMod::S => "S",
            SizeMod::M => "M",
            SizeMod::L => "L",
        }
    }
}

/// A creature size, such as 1M or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub value: u8,
    #[serde(rename = "mod", default)]
    pub size_mod: Option<SizeMod>,
}

impl Size {
    pub fn new(value: u8, size_mod: Option<SizeMod>) -> Self {
        Self { value, size_mod }
    }

    /// The 1M default every hero has without a size feature.
    pub fn medium() -> Self {
        Self::new(1, Some(SizeMod::M))
    }

    /// Modifier code, empty when there is none.
    pub fn mod_code(&self) -> &'static str {
        self.size_mod.map(|m| m.code()).unwrap_or("")
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::medium()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.mod_code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeParseError {
    #[error("Invalid size value in '{0}'")]
    InvalidValue(String),
    #[error("Invalid size modifier in '{0}'")]
    InvalidMod(String),
}

impl FromStr for Size {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits_end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (value, code) = s.split_at(digits_end);
        let value: u8 = value
            .parse()
            .map_err(|_| SizeParseError::InvalidValue(s.to_string()))?;
        let size_mod = match code {
            "" => None,
            "T" => Some(SizeMod::T),
            "S" => Some(SizeMod::S),
            "M" => Some(SizeMod::M),
            "L" => Some(SizeMod::L),
            _ => return Err(SizeParseError::InvalidMod(s.to_string())),
        };
        Ok(Size::new(value, size_mod))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeData {
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedData {
    pub speed: i32,
}

// ============================================================================
// Skills and Languages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillList {
    Crafting,
    Exploration,
    Interpersonal,
    Intrigue,
    Lore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillData {
    pub skill: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillChoiceData {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub list_options: Vec<SkillList>,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageData {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageChoiceData {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<String>,
}

// ============================================================================
// Kits, Domains, Abilities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitData {
    #[serde(default)]
    pub types: Vec<KitType>,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<Kit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitTypeData {
    #[serde(default)]
    pub types: Vec<KitType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainData {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<Domain>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityData {
    pub ability: Ability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAbilityData {
    #[serde(default)]
    pub cost: AbilityCost,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default, rename = "selectedIDs")]
    pub selected_ids: Vec<String>,
}

// ============================================================================
// Choices and Ancestry
// ============================================================================

/// An option offered by a choice, with its point cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub feature: Feature,
    #[serde(default = "default_option_value")]
    pub value: u32,
}

impl ChoiceOption {
    pub fn new(feature: Feature, value: u32) -> Self {
        Self { feature, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceData {
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub selected: Vec<Feature>,
}

/// Purchasable ancestry traits. Composite ancestries also offer the traits
/// of the ancestries they inherit from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AncestryTraitsData {
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub inherited_options: Vec<ChoiceOption>,
    #[serde(default)]
    pub selected: Vec<Feature>,
}

/// Marks an ancestry as a merge of other ancestries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InheritedAncestryData {
    /// Which feature kinds to take from the source ancestries.
    #[serde(default)]
    pub inherited_features: Vec<FeatureType>,
    #[serde(default = "default_count")]
    pub count: usize,
    /// Ids of the source ancestries.
    #[serde(default)]
    pub selected: Vec<String>,
}

impl InheritedAncestryData {
    pub fn inherits(&self, kind: FeatureType) -> bool {
        self.inherited_features.contains(&kind)
    }
}

/// A replacement feature that applies while a condition on the hero holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideData {
    pub condition_target: FeatureType,
    #[serde(default)]
    pub condition_value: Vec<String>,
    pub feature: Box<Feature>,
}

fn default_count() -> usize {
    1
}

fn default_option_value() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(id: &str, selected: Vec<Feature>) -> Feature {
        Feature::new(
            id,
            id,
            FeatureData::Choice(ChoiceData {
                options: vec![],
                count: 1,
                selected,
            }),
        )
    }

    #[test]
    fn test_kind_matches_payload() {
        let feature = Feature::new(
            "speed",
            "Speed",
            FeatureData::Speed(SpeedData { speed: 6 }),
        );
        assert_eq!(feature.kind(), FeatureType::Speed);
        assert_eq!(Feature::new("t", "T", FeatureData::Text).kind(), FeatureType::Text);
    }

    #[test]
    fn test_flatten_nested_choices() {
        let leaf = Feature::new("leaf", "Leaf", FeatureData::Text);
        let inner = choice("inner", vec![leaf]);
        let outer = choice("outer", vec![inner]);

        let ids: Vec<&str> = outer.flatten().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["outer", "inner", "leaf"]);
    }

    #[test]
    fn test_size_description() {
        assert_eq!(Size::medium().to_string(), "1M");
        assert_eq!(Size::new(2, None).to_string(), "2");
        assert_eq!("1S".parse::<Size>(), Ok(Size::new(1, Some(SizeMod::S))));
        assert_eq!("3".parse::<Size>(), Ok(Size::new(3, None)));
        assert!(matches!(
            "1X".parse::<Size>(),
            Err(SizeParseError::InvalidMod(_))
        ));
        assert!(matches!(
            "M".parse::<Size>(),
            Err(SizeParseError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_feature_json_shape() {
        let feature = Feature::new(
            "bonus-1",
            "Tough",
            FeatureData::Bonus(BonusData {
                field: FeatureField::Stamina,
                amount: ScaledValue::fixed(3).per_echelon(3),
            }),
        );
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "Bonus");
        assert_eq!(json["data"]["field"], "Stamina");
        assert_eq!(json["data"]["valuePerEchelon"], 3);
    }

    #[test]
    fn test_legacy_bonus_defaults() {
        let json = r#"{
            "id": "bonus-1",
            "name": "Tough",
            "type": "Bonus",
            "data": { "field": "Stamina", "value": 6, "valuePerLevel": 1 }
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        match feature.data {
            FeatureData::Bonus(data) => {
                assert_eq!(data.amount.value, 6);
                assert!(data.amount.value_characteristics.is_empty());
                assert_eq!(data.amount.value_per_echelon, 0);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
