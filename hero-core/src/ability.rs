//! Ability types: actions, maneuvers, and moves a hero can use.

use crate::characteristic::Characteristic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of turn resource an ability uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityUsage {
    Action,
    Maneuver,
    Move,
    Trigger,
    NoAction,
}

/// Usage plus the qualifiers that go with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityType {
    pub usage: AbilityUsage,
    #[serde(default)]
    pub free: bool,
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub time: String,
}

impl AbilityType {
    fn new(usage: AbilityUsage) -> Self {
        Self {
            usage,
            free: false,
            trigger: String::new(),
            time: String::new(),
        }
    }

    pub fn action() -> Self {
        Self::new(AbilityUsage::Action)
    }

    pub fn maneuver() -> Self {
        Self::new(AbilityUsage::Maneuver)
    }

    pub fn movement() -> Self {
        Self::new(AbilityUsage::Move)
    }

    /// Mark the usage as free (e.g. a free action).
    pub fn free(mut self) -> Self {
        self.free = true;
        self
    }
}

/// Ability keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKeyword {
    Area,
    Charge,
    Magic,
    Melee,
    Psionic,
    Ranged,
    Strike,
    Weapon,
}

/// Distance shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityDistanceType {
    #[serde(rename = "Self")]
    SelfOnly,
    Melee,
    Ranged,
    Aura,
    Burst,
    Cube,
    Line,
    Wall,
    Special,
}

/// One distance entry of an ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityDistance {
    #[serde(rename = "type")]
    pub distance_type: AbilityDistanceType,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub value2: u32,
    #[serde(default)]
    pub within: u32,
}

impl AbilityDistance {
    fn new(distance_type: AbilityDistanceType, value: u32) -> Self {
        Self {
            distance_type,
            value,
            value2: 0,
            within: 0,
        }
    }

    pub fn self_only() -> Self {
        Self::new(AbilityDistanceType::SelfOnly, 0)
    }

    /// Melee reach, 1 unless stated otherwise.
    pub fn melee() -> Self {
        Self::new(AbilityDistanceType::Melee, 1)
    }

    /// Ranged distance in squares.
    pub fn ranged(value: u32) -> Self {
        Self::new(AbilityDistanceType::Ranged, value)
    }
}

/// A three-tier power roll table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerRoll {
    pub characteristic: Vec<Characteristic>,
    pub tier1: String,
    pub tier2: String,
    pub tier3: String,
}

impl PowerRoll {
    pub fn new(
        characteristic: Vec<Characteristic>,
        tier1: impl Into<String>,
        tier2: impl Into<String>,
        tier3: impl Into<String>,
    ) -> Self {
        Self {
            characteristic,
            tier1: tier1.into(),
            tier2: tier2.into(),
            tier3: tier3.into(),
        }
    }
}

/// Heroic resource cost of an ability.
///
/// Signature abilities cost nothing and always order before any numeric
/// cost; the derived `Ord` relies on variant order for that. Stored as
/// `"signature"` or a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "StoredCost", into = "StoredCost")]
pub enum AbilityCost {
    Signature,
    Heroic(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StoredCost {
    Heroic(u32),
    Signature(SignatureTag),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum SignatureTag {
    Signature,
}

impl From<StoredCost> for AbilityCost {
    fn from(stored: StoredCost) -> Self {
        match stored {
            StoredCost::Heroic(cost) => AbilityCost::Heroic(cost),
            StoredCost::Signature(SignatureTag::Signature) => AbilityCost::Signature,
        }
    }
}

impl From<AbilityCost> for StoredCost {
    fn from(cost: AbilityCost) -> Self {
        match cost {
            AbilityCost::Signature => StoredCost::Signature(SignatureTag::Signature),
            AbilityCost::Heroic(cost) => StoredCost::Heroic(cost),
        }
    }
}

impl Default for AbilityCost {
    fn default() -> Self {
        AbilityCost::Heroic(0)
    }
}

impl fmt::Display for AbilityCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbilityCost::Signature => write!(f, "Signature"),
            AbilityCost::Heroic(cost) => write!(f, "{cost}"),
        }
    }
}

/// An ability a hero can use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub ability_type: AbilityType,
    #[serde(default)]
    pub keywords: Vec<AbilityKeyword>,
    #[serde(default)]
    pub distance: Vec<AbilityDistance>,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub cost: AbilityCost,
    #[serde(default)]
    pub pre_effect: String,
    #[serde(default)]
    pub power_roll: Option<PowerRoll>,
    #[serde(default)]
    pub effect: String,
}

impl Ability {
    /// Create an action with no keywords, distance, or effect.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            ability_type: AbilityType::action(),
            keywords: Vec::new(),
            distance: Vec::new(),
            target: String::new(),
            cost: AbilityCost::default(),
            pre_effect: String::new(),
            power_roll: None,
            effect: String::new(),
        }
    }

    pub fn with_type(mut self, ability_type: AbilityType) -> Self {
        self.ability_type = ability_type;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<AbilityKeyword>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_distance(mut self, distance: Vec<AbilityDistance>) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_cost(mut self, cost: AbilityCost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_pre_effect(mut self, pre_effect: impl Into<String>) -> Self {
        self.pre_effect = pre_effect.into();
        self
    }

    pub fn with_power_roll(mut self, power_roll: PowerRoll) -> Self {
        self.power_roll = Some(power_roll);
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }

    pub fn has_keyword(&self, keyword: AbilityKeyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Melee weapon abilities benefit from a kit's melee bonuses.
    pub fn is_melee_weapon(&self) -> bool {
        self.has_keyword(AbilityKeyword::Melee) && self.has_keyword(AbilityKeyword::Weapon)
    }

    /// Ranged weapon abilities benefit from a kit's ranged bonuses.
    pub fn is_ranged_weapon(&self) -> bool {
        self.has_keyword(AbilityKeyword::Ranged) && self.has_keyword(AbilityKeyword::Weapon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_sorts_first() {
        let mut costs = vec![
            AbilityCost::Heroic(3),
            AbilityCost::Signature,
            AbilityCost::Heroic(1),
        ];
        costs.sort();
        assert_eq!(
            costs,
            vec![
                AbilityCost::Signature,
                AbilityCost::Heroic(1),
                AbilityCost::Heroic(3)
            ]
        );
    }

    #[test]
    fn test_cost_stored_as_sentinel_or_number() {
        assert_eq!(serde_json::to_string(&AbilityCost::Heroic(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&AbilityCost::Signature).unwrap(),
            "\"signature\""
        );

        let ability: Ability = serde_json::from_str(
            r#"{"id":"a","name":"A","type":{"usage":"Action"},"cost":3}"#,
        )
        .unwrap();
        assert_eq!(ability.cost, AbilityCost::Heroic(3));

        let ability: Ability = serde_json::from_str(
            r#"{"id":"b","name":"B","type":{"usage":"Action"},"cost":"signature"}"#,
        )
        .unwrap();
        assert_eq!(ability.cost, AbilityCost::Signature);

        assert!(serde_json::from_str::<AbilityCost>("\"legendary\"").is_err());
    }

    #[test]
    fn test_weapon_keyword_pairs() {
        let melee = Ability::new("a", "A")
            .with_keywords(vec![AbilityKeyword::Melee, AbilityKeyword::Weapon]);
        assert!(melee.is_melee_weapon());
        assert!(!melee.is_ranged_weapon());

        let magic = Ability::new("b", "B")
            .with_keywords(vec![AbilityKeyword::Ranged, AbilityKeyword::Magic]);
        assert!(!magic.is_ranged_weapon());
    }

    #[test]
    fn test_distance_defaults() {
        assert_eq!(AbilityDistance::melee().value, 1);
        assert_eq!(AbilityDistance::ranged(5).value, 5);
        assert_eq!(
            AbilityDistance::self_only().distance_type,
            AbilityDistanceType::SelfOnly
        );
    }
}
