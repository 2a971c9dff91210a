//! Feature aggregation and derived statistics.
//!
//! Every statistic here is computed fresh from the hero's features on each
//! call. Kind-specific queries filter the aggregated feature list with a
//! `match` on the payload, then fold the shared [`ScaledValue`] formula.

use crate::ability::{Ability, AbilityDistance, AbilityDistanceType};
use crate::characteristic::{self, echelon, min_xp, Characteristic, PotencyStrength};
use crate::collections;
use crate::content::ContentRegistry;
use crate::extract::FeatureSource;
use crate::feature::{
    DamageModifierType, Feature, FeatureData, FeatureField, ScaledValue, Size,
};
use crate::hero::{Domain, Hero, Kit, KitDamageBonus, KitType, Language, Skill};
use crate::sourcebook::{self, Sourcebook};
use serde::{Deserialize, Serialize};

/// Speed of a hero with no speed feature.
pub const BASE_SPEED: i32 = 5;
/// Disengage distance every hero starts with.
pub const BASE_DISENGAGE: i32 = 1;

/// Which ability groups [`Hero::abilities`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityQuery {
    pub include_choices: bool,
    pub include_free_strikes: bool,
    pub include_standard: bool,
}

impl AbilityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every group: chosen, free strikes, and standard abilities.
    pub fn all() -> Self {
        Self {
            include_choices: true,
            include_free_strikes: true,
            include_standard: true,
        }
    }

    pub fn with_choices(mut self, include: bool) -> Self {
        self.include_choices = include;
        self
    }

    pub fn with_free_strikes(mut self, include: bool) -> Self {
        self.include_free_strikes = include;
        self
    }

    pub fn with_standard(mut self, include: bool) -> Self {
        self.include_standard = include;
        self
    }
}

/// One resolved immunity or weakness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageModifierValue {
    pub damage_type: String,
    pub value: i32,
}

impl FeatureSource for Hero {
    /// Every feature relevant to the hero, sorted by name. Ties keep source
    /// order: ancestry, culture, career, class, complication, the hero's own
    /// features, then inventory items.
    fn all_features(&self) -> Vec<&Feature> {
        let mut features: Vec<&Feature> = Vec::new();

        if let Some(ancestry) = &self.ancestry {
            features.extend(ancestry.all_features());
        }
        if let Some(culture) = &self.culture {
            features.extend(culture.all_features());
        }
        if let Some(career) = &self.career {
            features.extend(career.all_features());
        }
        if let Some(class) = &self.class {
            features.extend(class.all_features());
        }
        if let Some(complication) = &self.complication {
            features.extend(complication.all_features());
        }

        features.extend(self.features.iter());

        for item in &self.state.inventory {
            features.extend(item.all_features());
        }

        collections::sort_by_key(features, |f| f.name.clone())
    }
}

impl Hero {
    // ========================================================================
    // Selections
    // ========================================================================

    pub fn kits(&self) -> Vec<&Kit> {
        self.all_features()
            .into_iter()
            .flat_map(|f| match &f.data {
                FeatureData::Kit(data) => data.selected.iter().collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// Kit types the hero may choose from. Standard kits are always allowed.
    pub fn kit_types(&self) -> Vec<KitType> {
        let mut types = vec![KitType::Standard];
        for feature in self.all_features() {
            if let FeatureData::KitType(data) = &feature.data {
                types.extend(data.types.iter().copied());
            }
        }
        types
    }

    pub fn domains(&self) -> Vec<&Domain> {
        self.all_features()
            .into_iter()
            .flat_map(|f| match &f.data {
                FeatureData::Domain(data) => data.selected.iter().collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// The ancestry's inherited-ancestry feature, if it has one.
    pub fn inherited_ancestry(&self) -> Option<&Feature> {
        self.ancestry.as_ref().and_then(|a| {
            a.features
                .iter()
                .find(|f| matches!(f.data, FeatureData::InheritedAncestry(_)))
        })
    }

    /// Languages known, resolved against the sourcebooks by exact name.
    /// Names no sourcebook defines are dropped.
    pub fn languages<'a>(&self, sourcebooks: &'a [Sourcebook]) -> Vec<&'a Language> {
        let mut names: Vec<&str> = Vec::new();

        if let Some(culture) = &self.culture {
            names.extend(culture.languages.iter().map(String::as_str));
        }

        let features = self.all_features();
        for feature in &features {
            if let FeatureData::Language(data) = &feature.data {
                names.push(&data.language);
            }
        }
        for feature in &features {
            if let FeatureData::LanguageChoice(data) = &feature.data {
                names.extend(data.selected.iter().map(String::as_str));
            }
        }

        let languages = names.into_iter().filter_map(|name| {
            let language = sourcebook::find_language(name, sourcebooks);
            if language.is_none() {
                tracing::trace!(name, "dropping unknown language");
            }
            language
        });
        collections::sort_by_key(languages, |l| l.name.clone())
    }

    /// Skills known, resolved against the sourcebooks by exact name.
    pub fn skills<'a>(&self, sourcebooks: &'a [Sourcebook]) -> Vec<&'a Skill> {
        let mut names: Vec<&str> = Vec::new();

        let features = self.all_features();
        for feature in &features {
            if let FeatureData::Skill(data) = &feature.data {
                names.push(&data.skill);
            }
        }
        for feature in &features {
            if let FeatureData::SkillChoice(data) = &feature.data {
                names.extend(data.selected.iter().map(String::as_str));
            }
        }

        let skills = names.into_iter().filter_map(|name| {
            let skill = sourcebook::find_skill(name, sourcebooks);
            if skill.is_none() {
                tracing::trace!(name, "dropping unknown skill");
            }
            skill
        });
        collections::sort_by_key(skills, |s| s.name.clone())
    }

    /// Abilities available to the hero: free strikes, then chosen abilities
    /// grouped by cost (signature first), then standard abilities.
    pub fn abilities(&self, content: &ContentRegistry, query: AbilityQuery) -> Vec<Ability> {
        let mut abilities = Vec::new();

        if query.include_free_strikes {
            abilities.extend(content.free_strikes.iter().cloned());
        }

        if query.include_choices {
            let features = self.all_features();
            let mut choices: Vec<&Ability> = Vec::new();

            for feature in &features {
                if let FeatureData::Ability(data) = &feature.data {
                    choices.push(&data.ability);
                }
            }
            for feature in &features {
                if let FeatureData::ClassAbility(data) = &feature.data {
                    let class = self.class.as_ref();
                    choices.extend(
                        data.selected_ids
                            .iter()
                            .filter_map(|id| class.and_then(|c| c.ability(id))),
                    );
                }
            }

            let mut costs = collections::distinct_by(choices.iter().map(|a| a.cost), |c| *c);
            costs.sort();
            for cost in costs {
                let group = choices.iter().filter(|a| a.cost == cost).copied();
                abilities.extend(
                    collections::sort_by_key(group, |a| a.name.clone())
                        .into_iter()
                        .cloned(),
                );
            }
        }

        if query.include_standard {
            abilities.extend(content.standard_abilities.iter().cloned());
        }

        abilities
    }

    // ========================================================================
    // Characteristics
    // ========================================================================

    /// Class base score for the characteristic, 0 without a class.
    pub fn characteristic(&self, characteristic: Characteristic) -> i32 {
        self.class
            .as_ref()
            .map(|c| c.characteristic(characteristic))
            .unwrap_or(0)
    }

    /// Resolve a scaled value for this hero:
    /// base + best listed characteristic + per level after the first + per echelon.
    /// Level and echelon terms apply only when the hero has a class.
    pub fn scaled_value(&self, amount: &ScaledValue) -> i32 {
        let mut value = amount.value;
        value += collections::max_by_key(amount.value_characteristics.iter(), |&c| {
            self.characteristic(c)
        })
        .unwrap_or(0);

        if let Some(level) = self.level() {
            value += amount.value_per_level * (i32::from(level) - 1);
            value += amount.value_per_echelon * i32::from(echelon(level));
        }
        value
    }

    /// Sum of every bonus feature targeting `field`.
    pub fn bonus(&self, field: FeatureField) -> i32 {
        self.all_features()
            .into_iter()
            .map(|f| match &f.data {
                FeatureData::Bonus(data) if data.field == field => self.scaled_value(&data.amount),
                _ => 0,
            })
            .sum()
    }

    fn best_kit_value(&self, value: impl Fn(&Kit) -> i32) -> i32 {
        collections::max_by_key(self.kits(), |k| value(k)).unwrap_or(0)
    }

    // ========================================================================
    // Derived Statistics
    // ========================================================================

    pub fn stamina(&self) -> i32 {
        let mut value = 0;
        if let Some(level) = self.level() {
            value += self.best_kit_value(|k| k.stamina) * i32::from(echelon(level));
        }
        value + self.bonus(FeatureField::Stamina)
    }

    pub fn recovery_value(&self) -> i32 {
        self.stamina().div_euclid(3) + self.bonus(FeatureField::RecoveryValue)
    }

    pub fn recoveries(&self) -> i32 {
        self.bonus(FeatureField::Recoveries)
    }

    /// Largest size among size features, 1M without any. The modifier is
    /// kept only for size 1, taken from the first contributor at that size.
    pub fn size(&self) -> Size {
        let sizes: Vec<Size> = self
            .all_features()
            .into_iter()
            .filter_map(|f| match &f.data {
                FeatureData::Size(data) => Some(data.size),
                _ => None,
            })
            .collect();

        let Some(value) = collections::max_by_key(sizes.iter(), |s| s.value) else {
            return Size::medium();
        };

        let size_mod = if value == 1 {
            sizes
                .iter()
                .find(|s| s.value == value)
                .and_then(|s| s.size_mod)
        } else {
            None
        };
        Size::new(value, size_mod)
    }

    pub fn speed(&self) -> i32 {
        let speeds = self.all_features().into_iter().filter_map(|f| match &f.data {
            FeatureData::Speed(data) => Some(data.speed),
            _ => None,
        });
        let base = collections::max_by_key(speeds, |s| s).unwrap_or(BASE_SPEED);

        base + self.best_kit_value(|k| k.speed) + self.bonus(FeatureField::Speed)
    }

    pub fn stability(&self) -> i32 {
        self.best_kit_value(|k| k.stability) + self.bonus(FeatureField::Stability)
    }

    pub fn disengage(&self) -> i32 {
        BASE_DISENGAGE + self.best_kit_value(|k| k.disengage) + self.bonus(FeatureField::Disengage)
    }

    /// Immunities or weaknesses, one entry per modifier sorted by damage type.
    /// Entries for the same damage type are not merged.
    pub fn damage_modifiers(&self, modifier_type: DamageModifierType) -> Vec<DamageModifierValue> {
        let values = self.all_features().into_iter().flat_map(|f| match &f.data {
            FeatureData::DamageModifier(data) => data
                .modifiers
                .iter()
                .filter(|dm| dm.modifier_type == modifier_type)
                .map(|dm| DamageModifierValue {
                    damage_type: dm.damage_type.clone(),
                    value: self.scaled_value(&dm.amount),
                })
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        });
        collections::sort_by_key(values, |v| v.damage_type.clone())
    }

    // ========================================================================
    // Kit Bonuses
    // ========================================================================

    fn best_kit_damage(&self, bonus: impl Fn(&Kit) -> Option<KitDamageBonus>) -> Option<KitDamageBonus> {
        let best_tier = |tier: fn(KitDamageBonus) -> i32| {
            self.best_kit_value(|k| tier(bonus(k).unwrap_or_default()))
        };
        let best = KitDamageBonus::new(
            best_tier(|b| b.tier1),
            best_tier(|b| b.tier2),
            best_tier(|b| b.tier3),
        );
        (!best.is_zero()).then_some(best)
    }

    /// Kit melee damage bonus for a melee weapon ability.
    pub fn melee_damage_bonus(&self, ability: &Ability) -> Option<KitDamageBonus> {
        if !ability.is_melee_weapon() {
            return None;
        }
        self.best_kit_damage(|k| k.melee_damage)
    }

    /// Kit ranged damage bonus for a ranged weapon ability.
    pub fn ranged_damage_bonus(&self, ability: &Ability) -> Option<KitDamageBonus> {
        if !ability.is_ranged_weapon() {
            return None;
        }
        self.best_kit_damage(|k| k.ranged_damage)
    }

    /// Extra reach or range a kit adds to one of the ability's distances.
    pub fn distance_bonus(&self, ability: &Ability, distance: &AbilityDistance) -> i32 {
        match distance.distance_type {
            AbilityDistanceType::Melee if ability.is_melee_weapon() => {
                self.best_kit_value(|k| k.melee_distance)
            }
            AbilityDistanceType::Ranged if ability.is_ranged_weapon() => {
                self.best_kit_value(|k| k.ranged_distance)
            }
            _ => 0,
        }
    }

    // ========================================================================
    // Progression
    // ========================================================================

    /// Whether the hero has enough experience for the next level.
    pub fn can_level_up(&self) -> bool {
        match self.level() {
            Some(level) => self.state.xp >= min_xp(level.saturating_add(1)),
            None => false,
        }
    }

    /// Potency from the class's highest characteristic, 0 without a class.
    pub fn potency(&self, strength: PotencyStrength) -> i32 {
        let highest = self
            .class
            .as_ref()
            .and_then(|c| collections::max_by_key(c.characteristics.iter(), |cv| cv.value));
        match highest {
            Some(value) => characteristic::potency(value, strength),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::DamageModifier;
    use crate::testing::{bonus, kit_feature, sample_class, size_feature, speed_feature};

    fn hero_with_class(level: u8) -> Hero {
        let mut hero = Hero::new("Test");
        hero.class = Some(sample_class(level));
        hero
    }

    #[test]
    fn test_scaled_value_formula() {
        let mut hero = hero_with_class(5);
        if let Some(class) = hero.class.as_mut() {
            class.characteristics = vec![crate::characteristic::CharacteristicValue::new(
                Characteristic::Might,
                4,
            )];
        }
        let amount = ScaledValue::fixed(2)
            .with_characteristics(vec![Characteristic::Might])
            .per_level(1)
            .per_echelon(3);
        // 2 + 4 + 1 * (5 - 1) + 3 * 2
        assert_eq!(hero.scaled_value(&amount), 16);
    }

    #[test]
    fn test_scaled_value_without_class() {
        let hero = Hero::new("Classless");
        let amount = ScaledValue::fixed(2)
            .with_characteristics(vec![Characteristic::Might])
            .per_level(1)
            .per_echelon(3);
        assert_eq!(hero.scaled_value(&amount), 2);
    }

    #[test]
    fn test_scaled_value_uses_best_characteristic() {
        let hero = hero_with_class(1);
        // sample class: Might 2, Agility 1, Reason -1
        let amount = ScaledValue::fixed(0)
            .with_characteristics(vec![Characteristic::Reason, Characteristic::Agility]);
        assert_eq!(hero.scaled_value(&amount), 1);
        let negative = ScaledValue::fixed(0).with_characteristics(vec![Characteristic::Reason]);
        assert_eq!(hero.scaled_value(&negative), -1);
    }

    #[test]
    fn test_kit_stamina_takes_best() {
        let mut hero = hero_with_class(4);
        hero.features.push(kit_feature("kits", &[("a", 4), ("b", 7)]));
        assert_eq!(hero.kits().len(), 2);
        assert_eq!(hero.stamina(), 7 * 2);
        assert_eq!(hero.recovery_value(), 4);
    }

    #[test]
    fn test_bonuses_by_field() {
        let mut hero = hero_with_class(1);
        hero.features.push(bonus("b1", FeatureField::Stamina, 10));
        hero.features.push(bonus("b2", FeatureField::Stability, 1));
        hero.features.push(bonus("b3", FeatureField::Recoveries, 8));
        hero.features.push(bonus("b4", FeatureField::Disengage, 1));
        hero.features.push(bonus("b5", FeatureField::Speed, 1));
        hero.features.push(bonus("b6", FeatureField::RecoveryValue, 2));
        assert_eq!(hero.stamina(), 10);
        assert_eq!(hero.stability(), 1);
        assert_eq!(hero.recoveries(), 8);
        assert_eq!(hero.disengage(), 2);
        assert_eq!(hero.speed(), 6);
        assert_eq!(hero.recovery_value(), 3 + 2);
    }

    #[test]
    fn test_speed_feature_replaces_base() {
        let mut hero = hero_with_class(1);
        assert_eq!(hero.speed(), BASE_SPEED);
        hero.features.push(speed_feature("s1", 6));
        hero.features.push(speed_feature("s2", 4));
        assert_eq!(hero.speed(), 6);
    }

    #[test]
    fn test_size_resolution() {
        let mut hero = Hero::new("Test");
        assert_eq!(hero.size(), Size::medium());

        hero.features.push(size_feature("small", "1S"));
        assert_eq!(hero.size().to_string(), "1S");

        hero.features.push(size_feature("large", "2"));
        let size = hero.size();
        assert_eq!(size.value, 2);
        assert_eq!(size.mod_code(), "");
    }

    #[test]
    fn test_damage_modifiers_not_merged() {
        let mut hero = hero_with_class(1);
        let modifier = |damage_type: &str, modifier_type, value| DamageModifier {
            damage_type: damage_type.to_string(),
            modifier_type,
            amount: ScaledValue::fixed(value),
        };
        hero.features.push(Feature::new(
            "dm",
            "Modifiers",
            FeatureData::DamageModifier(crate::feature::DamageModifierData {
                modifiers: vec![
                    modifier("Poison", DamageModifierType::Immunity, 3),
                    modifier("Fire", DamageModifierType::Weakness, 5),
                    modifier("Cold", DamageModifierType::Immunity, 2),
                    modifier("Poison", DamageModifierType::Immunity, 1),
                ],
            }),
        ));

        let immunities = hero.damage_modifiers(DamageModifierType::Immunity);
        let found: Vec<(&str, i32)> = immunities
            .iter()
            .map(|v| (v.damage_type.as_str(), v.value))
            .collect();
        assert_eq!(found, vec![("Cold", 2), ("Poison", 3), ("Poison", 1)]);
        assert_eq!(hero.damage_modifiers(DamageModifierType::Weakness).len(), 1);
    }

    #[test]
    fn test_can_level_up() {
        let mut hero = hero_with_class(3);
        hero.state.xp = 47;
        assert!(!hero.can_level_up());
        hero.state.xp = 48;
        assert!(hero.can_level_up());
        assert!(!Hero::new("Classless").can_level_up());
    }

    #[test]
    fn test_potency() {
        let hero = hero_with_class(1);
        assert_eq!(hero.potency(PotencyStrength::Strong), 2);
        assert_eq!(hero.potency(PotencyStrength::Weak), 0);
        assert_eq!(Hero::new("Classless").potency(PotencyStrength::Average), 0);
    }

    #[test]
    fn test_kit_types_start_with_standard() {
        let hero = Hero::new("Test");
        assert_eq!(hero.kit_types(), vec![KitType::Standard]);
    }

    #[test]
    fn test_all_features_span_every_source() {
        let mut hero = hero_with_class(1);
        hero.ancestry = Some(
            crate::hero::Ancestry::new("a", "A").with_features(vec![speed_feature("a-speed", 6)]),
        );
        hero.features.push(size_feature("own-size", "1S"));

        assert_eq!(hero.features.len(), 1);
        let ids: Vec<&str> = hero.all_features().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["own-size", "a-speed"]);
    }

    #[test]
    fn test_kit_types_keep_duplicates() {
        let mut hero = Hero::new("Test");
        for id in ["kit-type-a", "kit-type-b"] {
            hero.features.push(Feature::new(
                id,
                "Kit Type",
                FeatureData::KitType(crate::feature::KitTypeData {
                    types: vec![KitType::Stormwight],
                }),
            ));
        }
        assert_eq!(
            hero.kit_types(),
            vec![KitType::Standard, KitType::Stormwight, KitType::Stormwight]
        );
    }

    #[test]
    fn test_domains_in_feature_order() {
        let domain = |id: &str| Domain {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            features: Vec::new(),
        };
        let mut hero = Hero::new("Test");
        hero.features.push(Feature::new(
            "domain-b",
            "B Domain",
            FeatureData::Domain(crate::feature::DomainData {
                count: 2,
                selected: vec![domain("war"), domain("life")],
            }),
        ));
        hero.features.push(Feature::new(
            "domain-a",
            "A Domain",
            FeatureData::Domain(crate::feature::DomainData {
                count: 1,
                selected: vec![domain("war")],
            }),
        ));

        let ids: Vec<&str> = hero.domains().iter().map(|d| d.id.as_str()).collect();
        // "A Domain" sorts first
        assert_eq!(ids, vec!["war", "war", "life"]);
        assert!(Hero::new("Empty").domains().is_empty());
    }
}
