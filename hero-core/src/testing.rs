//! Fixtures for unit and integration tests.
//!
//! Small constructors for the features and components tests keep building,
//! a sample sourcebook, and assertion helpers over feature lists.

use crate::ability::{Ability, AbilityCost, AbilityDistance, AbilityKeyword, AbilityType};
use crate::characteristic::{Characteristic, CharacteristicValue};
use crate::feature::{
    AncestryTraitsData, BonusData, ChoiceOption, ClassAbilityData, Feature, FeatureData,
    FeatureField, FeatureType, InheritedAncestryData, KitData, LanguageData, ScaledValue, Size,
    SizeData, SkillData, SkillList, SpeedData,
};
use crate::hero::{Ancestry, HeroClass, Kit, Language, LevelFeatures, Skill};
use crate::sourcebook::Sourcebook;

/// A class at the given level with Might 2, Agility 1, Reason -1.
pub fn sample_class(level: u8) -> HeroClass {
    let mut class = HeroClass::new("sample-class", "Sample Class");
    class.level = level;
    class.heroic_resource = "Focus".to_string();
    class.primary_characteristics = vec![Characteristic::Might];
    class.characteristics = vec![
        CharacteristicValue::new(Characteristic::Might, 2),
        CharacteristicValue::new(Characteristic::Agility, 1),
        CharacteristicValue::new(Characteristic::Reason, -1),
    ];
    class
}

/// A class whose ability catalog holds a signature strike and heroic
/// abilities costing 3 and 5, with the signature and the 3-cost selected.
pub fn class_with_abilities(level: u8) -> HeroClass {
    let mut class = sample_class(level);
    class.abilities = vec![
        Ability::new("heavy-blow", "Heavy Blow")
            .with_type(AbilityType::action())
            .with_keywords(vec![AbilityKeyword::Melee, AbilityKeyword::Weapon])
            .with_distance(vec![AbilityDistance::melee()])
            .with_cost(AbilityCost::Heroic(3)),
        Ability::new("quick-cut", "Quick Cut")
            .with_type(AbilityType::action())
            .with_keywords(vec![AbilityKeyword::Melee, AbilityKeyword::Strike, AbilityKeyword::Weapon])
            .with_distance(vec![AbilityDistance::melee()])
            .with_cost(AbilityCost::Signature),
        Ability::new("whirlwind", "Whirlwind")
            .with_type(AbilityType::action())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_cost(AbilityCost::Heroic(5)),
    ];
    class.feature_levels = vec![LevelFeatures {
        level: 1,
        features: vec![
            class_ability("signature-pick", AbilityCost::Signature, &["quick-cut"]),
            class_ability("heroic-pick", AbilityCost::Heroic(3), &["heavy-blow"]),
        ],
    }];
    class
}

pub fn class_ability(id: &str, cost: AbilityCost, selected: &[&str]) -> Feature {
    Feature::new(
        id,
        "Ability",
        FeatureData::ClassAbility(ClassAbilityData {
            cost,
            count: selected.len().max(1),
            selected_ids: selected.iter().map(|s| s.to_string()).collect(),
        }),
    )
}

pub fn bonus(id: &str, field: FeatureField, value: i32) -> Feature {
    Feature::new(
        id,
        format!("{field:?} Bonus"),
        FeatureData::Bonus(BonusData {
            field,
            amount: ScaledValue::fixed(value),
        }),
    )
}

/// A kit feature with the given kits selected, as `(id, stamina)` pairs.
pub fn kit_feature(id: &str, kits: &[(&str, i32)]) -> Feature {
    let selected = kits
        .iter()
        .map(|&(kit_id, stamina)| {
            let mut kit = Kit::new(kit_id, kit_id);
            kit.stamina = stamina;
            kit
        })
        .collect();
    Feature::new(
        id,
        "Kit",
        FeatureData::Kit(KitData {
            types: Vec::new(),
            count: kits.len().max(1),
            selected,
        }),
    )
}

/// A size feature from a description such as `1M` or `2`.
///
/// # Panics
///
/// Panics on a malformed description.
pub fn size_feature(id: &str, description: &str) -> Feature {
    let size: Size = match description.parse() {
        Ok(size) => size,
        Err(e) => panic!("bad size fixture: {e}"),
    };
    Feature::new(id, "Size", FeatureData::Size(SizeData { size }))
}

pub fn speed_feature(id: &str, speed: i32) -> Feature {
    Feature::new(id, "Speed", FeatureData::Speed(SpeedData { speed }))
}

pub fn skill_feature(id: &str, skill: &str) -> Feature {
    Feature::new(
        id,
        "Skill",
        FeatureData::Skill(SkillData {
            skill: skill.to_string(),
        }),
    )
}

pub fn language_feature(id: &str, language: &str) -> Feature {
    Feature::new(
        id,
        "Language",
        FeatureData::Language(LanguageData {
            language: language.to_string(),
        }),
    )
}

pub fn inherited_ancestry(id: &str, kinds: &[FeatureType], selected: &[&str]) -> Feature {
    Feature::new(
        id,
        "Former Life",
        FeatureData::InheritedAncestry(InheritedAncestryData {
            inherited_features: kinds.to_vec(),
            count: 1,
            selected: selected.iter().map(|s| s.to_string()).collect(),
        }),
    )
}

/// An ancestry-traits feature offering text traits, each costing one point.
pub fn ancestry_traits(id: &str, name: &str, points: u32, options: &[&str]) -> Feature {
    Feature::new(
        id,
        name,
        FeatureData::AncestryTraits(AncestryTraitsData {
            points,
            options: options
                .iter()
                .map(|o| ChoiceOption::new(Feature::new(*o, *o, FeatureData::Text), 1))
                .collect(),
            inherited_options: Vec::new(),
            selected: Vec::new(),
        }),
    )
}

/// A sourcebook with a few languages, skills, and ancestries of distinct
/// sizes and speeds.
pub fn sample_sourcebook() -> Sourcebook {
    let mut book = Sourcebook::new("core", "Core Rules");
    book.languages = ["Caelian", "Khelt", "Vaslorian", "Zaliac"]
        .into_iter()
        .map(Language::new)
        .collect();
    book.skills = vec![
        Skill::new("Alertness", SkillList::Intrigue),
        Skill::new("Climb", SkillList::Exploration),
        Skill::new("Lie", SkillList::Interpersonal),
        Skill::new("History", SkillList::Lore),
    ];
    book.ancestries = vec![
        Ancestry::new("human", "Human").with_features(vec![
            size_feature("human-size", "1M"),
            speed_feature("human-speed", 5),
            ancestry_traits("human-traits", "Human Traits", 3, &["staying-power", "resist-the-unnatural"]),
        ]),
        Ancestry::new("hakaan", "Hakaan").with_features(vec![
            size_feature("hakaan-size", "1L"),
            speed_feature("hakaan-speed", 5),
        ]),
        Ancestry::new("polder", "Polder").with_features(vec![
            size_feature("polder-size", "1S"),
            speed_feature("polder-speed", 6),
            ancestry_traits("polder-traits", "Polder Traits", 4, &["nimblestep"]),
        ]),
    ];
    book
}

/// Ids of a feature list, in order.
pub fn feature_ids<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Vec<&'a str> {
    features.into_iter().map(|f| f.id.as_str()).collect()
}

/// Assert that a feature list contains a feature with the given id.
#[track_caller]
pub fn assert_has_feature<'a>(features: impl IntoIterator<Item = &'a Feature>, id: &str) {
    let ids = feature_ids(features);
    assert!(
        ids.contains(&id),
        "Expected feature '{id}' among {ids:?}"
    );
}

/// Assert that a feature list does NOT contain a feature with the given id.
#[track_caller]
pub fn assert_no_feature<'a>(features: impl IntoIterator<Item = &'a Feature>, id: &str) {
    let ids = feature_ids(features);
    assert!(
        !ids.contains(&id),
        "Expected no feature '{id}' among {ids:?}"
    );
}
