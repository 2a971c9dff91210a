//! Built-in content the rules reference directly.
//!
//! Free strikes and the standard actions, maneuvers, and moves every hero
//! has, plus the built-in ancestries that the load-time repairs need.

use crate::ability::{
    Ability, AbilityDistance, AbilityKeyword, AbilityType, PowerRoll,
};
use crate::characteristic::Characteristic;
use crate::feature::{
    AncestryTraitsData, Feature, FeatureData, FeatureType, InheritedAncestryData,
};
use crate::hero::Ancestry;

/// Sourcebook enabled on every hero by default.
pub const CORE_SOURCEBOOK_ID: &str = "core";
/// Setting sourcebook enabled on every hero by default.
pub const ORDEN_SOURCEBOOK_ID: &str = "orden";

/// Id of the built-in revenant ancestry.
pub const REVENANT_ID: &str = "ancestry-revenant";
/// Id of the revenant's "Former Life" feature.
pub const REVENANT_FORMER_LIFE_ID: &str = "revenant-feature-1";

/// Directly attached language feature hidden from hero customization.
pub const DEFAULT_LANGUAGE_ID: &str = "default-language";

/// Read-only content shared by every hero.
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    pub free_strikes: Vec<Ability>,
    pub standard_abilities: Vec<Ability>,
    pub ancestries: Vec<Ancestry>,
}

lazy_static::lazy_static! {
    static ref CONTENT: ContentRegistry = ContentRegistry::new();
}

impl ContentRegistry {
    /// Build the registry. Prefer [`ContentRegistry::global`].
    pub fn new() -> Self {
        Self {
            free_strikes: free_strikes(),
            standard_abilities: standard_abilities(),
            ancestries: vec![revenant()],
        }
    }

    /// Process-wide instance, built on first use.
    pub fn global() -> &'static ContentRegistry {
        &CONTENT
    }

    pub fn ancestry(&self, id: &str) -> Option<&Ancestry> {
        self.ancestries.iter().find(|a| a.id == id)
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Free Strikes
// ============================================================================

fn free_strikes() -> Vec<Ability> {
    vec![
        Ability::new("free-melee", "Free Strike (melee)")
            .with_type(AbilityType::action().free())
            .with_keywords(vec![
                AbilityKeyword::Charge,
                AbilityKeyword::Melee,
                AbilityKeyword::Strike,
                AbilityKeyword::Weapon,
            ])
            .with_distance(vec![AbilityDistance::melee()])
            .with_target("1 creature or object")
            .with_power_roll(PowerRoll::new(
                vec![Characteristic::Might, Characteristic::Agility],
                "2 + M or A damage",
                "5 + M or A damage",
                "7 + M or A damage",
            )),
        Ability::new("free-ranged", "Free Strike (ranged)")
            .with_type(AbilityType::action().free())
            .with_keywords(vec![
                AbilityKeyword::Ranged,
                AbilityKeyword::Strike,
                AbilityKeyword::Weapon,
            ])
            .with_distance(vec![AbilityDistance::ranged(5)])
            .with_target("1 creature or object")
            .with_power_roll(PowerRoll::new(
                vec![Characteristic::Might, Characteristic::Agility],
                "2 + M or A damage",
                "4 + M or A damage",
                "6 + M or A damage",
            )),
    ]
}

// ============================================================================
// Standard Abilities
// ============================================================================

fn standard_abilities() -> Vec<Ability> {
    vec![
        // Moves
        Ability::new("advance", "Advance")
            .with_type(AbilityType::movement())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("When you take the Advance move action, you can move a number of squares up to your speed. You can break up this movement granted with your maneuver and action however you wish."),
        Ability::new("disengage", "Disengage")
            .with_type(AbilityType::movement())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("When you take the Disengage move action, you can shift 1 square. Some class features, kits, or other rules let you shift more than 1 square when you take this move action, if they do, you can break up the movement granted by this move action with your maneuver and action however you wish."),
        Ability::new("ride", "Ride")
            .with_type(AbilityType::movement())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("You can only take the Ride move action while mounted on another creature. When you take the Ride move action, you cause your mount to move up to their speed, taking you with them. Alternatively, you can use this move action to have your mount use the Disengage move action as a free triggered action. A mount can only be ridden with this move action once per round."),

        // Maneuvers
        Ability::new("aid-attack", "Aid Attack")
            .with_type(AbilityType::maneuver())
            .with_distance(vec![AbilityDistance::melee()])
            .with_target("1 enemy")
            .with_effect("The next attack an ally makes against the target before the start of your next turn has an edge."),
        Ability::new("catch-breath", "Catch Breath")
            .with_type(AbilityType::maneuver())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("\nBy using the Catch Breath maneuver, you spend a Recovery and heal an amount equal to your recovery value. In addition, you also gain the benefit of the Defend action.\nIf you are dying, you can\u{2019}t take the Catch Breath maneuver, but other creatures can help you spend recoveries."),
        Ability::new("drink-potion", "Drink Potion")
            .with_type(AbilityType::maneuver())
            .with_distance(vec![AbilityDistance::self_only(), AbilityDistance::melee()])
            .with_target("Self or 1 creature")
            .with_effect("You can use this maneuver to drink a potion yourself or to administer a potion to an adjacent creature."),
        Ability::new("escape-grab", "Escape Grab")
            .with_type(AbilityType::maneuver())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_pre_effect("While you are grabbed by another creature, you can attempt to escape by making a resistance roll. You take a bane on the roll if the creature\u{2019}s size is larger than yours.")
            .with_power_roll(PowerRoll::new(
                vec![Characteristic::Might, Characteristic::Agility],
                "You fail to escape the grab.",
                "You can escape the grab, but if you do, the creature grabbing you can make a melee free strike against you before you are no longer grabbed.",
                "You are no longer grabbed.",
            )),
        Ability::new("grab", "Grab")
            .with_type(AbilityType::maneuver())
            .with_keywords(vec![AbilityKeyword::Melee])
            .with_distance(vec![AbilityDistance::melee()])
            .with_target("1 creature the same size or smaller than you")
            .with_power_roll(PowerRoll::new(
                vec![Characteristic::Might],
                "No effect",
                "You can grab the target, but if you do, they can make a melee free strike against you right before they become grabbed by you.",
                "The target is grabbed by you.",
            ))
            .with_effect("You gain an edge on the power roll if the creature\u{2019}s size is smaller than yours. You can grab only one creature at a time this way."),
        Ability::new("hide", "Hide")
            .with_type(AbilityType::maneuver())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("You attempt to hide from other creatures who aren\u{2019}t observing you while you have cover or concealment."),
        Ability::new("knockback", "Knockback")
            .with_type(AbilityType::maneuver())
            .with_keywords(vec![AbilityKeyword::Melee])
            .with_distance(vec![AbilityDistance::melee()])
            .with_target("1 creature the same size or smaller than you")
            .with_power_roll(PowerRoll::new(
                vec![Characteristic::Might],
                "Push 1",
                "Push 2",
                "Push 3",
            ))
            .with_effect("You gain an edge on the power roll if the creature\u{2019}s size is smaller than yours."),
        Ability::new("make-assist-test", "Make Or Assist A Test")
            .with_type(AbilityType::maneuver())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("\nMany tests are maneuvers if made in combat. Searching a chest with a Reason test, picking a door\u{2019}s lock with an Agility test, or lifting a portcullis with a Might test would all be maneuvers. Assisting a test is also a maneuver in combat.\nComplex or time-consuming tests might require an action if made in combat\u{2014}or could take so long that they can\u{2019}t be made during combat at all. Other tests that take no time at all, such as a Reason test to recall lore about mummies, are usually free maneuvers in combat. The Director has the final say regarding which tests can be made as maneuvers."),
        Ability::new("search", "Search")
            .with_type(AbilityType::maneuver())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("You can use this maneuver to attempt to search for creatures hidden from you."),
        Ability::new("stand-up", "Stand Up")
            .with_type(AbilityType::maneuver())
            .with_distance(vec![AbilityDistance::self_only(), AbilityDistance::melee()])
            .with_target("Self or 1 creature")
            .with_effect("You can use this maneuver to stand up if you are prone, ending that condition. Alternatively, you can use this maneuver to make an adjacent prone creature stand up."),

        // Actions
        Ability::new("charge", "Charge")
            .with_type(AbilityType::action())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("When you take the Charge action, you move up to your speed in a straight line, then make a melee free strike against a creature when you end your move. You can\u{2019}t shift when you charge."),
        Ability::new("defend", "Defend")
            .with_type(AbilityType::action())
            .with_distance(vec![AbilityDistance::self_only()])
            .with_target("Self")
            .with_effect("When you take the Defend action, all attacks against you have a double bane until the end of your next turn. You gain no benefit from this action while another creature is taunted by you."),
        Ability::new("heal", "Heal")
            .with_type(AbilityType::action())
            .with_distance(vec![AbilityDistance::self_only(), AbilityDistance::melee()])
            .with_target("Self or 1 creature")
            .with_effect("You use your action to employ medicine or inspiring words to make an adjacent creature feel better and stay in the fight. The creature can spend a Recovery to regain Stamina, or can make a resistance roll against a \u{201c}(resistance ends)\u{201d} effect they are suffering."),
    ]
}

// ============================================================================
// Ancestries
// ============================================================================

/// The revenant: an undead hero who keeps the size and speed of the
/// ancestry they had in life.
fn revenant() -> Ancestry {
    Ancestry::new(REVENANT_ID, "Revenant")
        .with_features(vec![
            Feature::new(
                REVENANT_FORMER_LIFE_ID,
                "Former Life",
                FeatureData::InheritedAncestry(InheritedAncestryData {
                    inherited_features: vec![FeatureType::Size, FeatureType::Speed],
                    count: 1,
                    selected: Vec::new(),
                }),
            )
            .with_description("Choose the ancestry you had before you died. You have that ancestry\u{2019}s size and speed."),
            Feature::new(
                "revenant-feature-2",
                "Tough But Withered",
                FeatureData::Text,
            )
            .with_description("You are immune to cold, corruption, lightning, and poison damage equal to your level, and have fire weakness 5."),
            Feature::new(
                "revenant-feature-3",
                "Revenant Traits",
                FeatureData::AncestryTraits(AncestryTraitsData {
                    points: 2,
                    options: Vec::new(),
                    inherited_options: Vec::new(),
                    selected: Vec::new(),
                }),
            ),
        ])
}
