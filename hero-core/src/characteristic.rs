//! Characteristics, level progression, and characteristic arrays.

use crate::collections;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Characteristics
// ============================================================================

/// The five hero characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    Might,
    Agility,
    Reason,
    Intuition,
    Presence,
}

impl Characteristic {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Characteristic::Might => "M",
            Characteristic::Agility => "A",
            Characteristic::Reason => "R",
            Characteristic::Intuition => "I",
            Characteristic::Presence => "P",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Characteristic::Might => "Might",
            Characteristic::Agility => "Agility",
            Characteristic::Reason => "Reason",
            Characteristic::Intuition => "Intuition",
            Characteristic::Presence => "Presence",
        }
    }

    pub fn all() -> [Characteristic; 5] {
        [
            Characteristic::Might,
            Characteristic::Agility,
            Characteristic::Reason,
            Characteristic::Intuition,
            Characteristic::Presence,
        ]
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A characteristic paired with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicValue {
    pub characteristic: Characteristic,
    pub value: i32,
}

impl CharacteristicValue {
    pub fn new(characteristic: Characteristic, value: i32) -> Self {
        Self {
            characteristic,
            value,
        }
    }
}

/// How hard a potency check is for the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PotencyStrength {
    Weak,
    Average,
    Strong,
}

impl PotencyStrength {
    fn penalty(&self) -> i32 {
        match self {
            PotencyStrength::Weak => 2,
            PotencyStrength::Average => 1,
            PotencyStrength::Strong => 0,
        }
    }
}

// ============================================================================
// Level Progression
// ============================================================================

/// Highest level a hero can reach.
pub const MAX_LEVEL: u8 = 10;

/// Echelon for a hero level. Levels outside 1-10 fall back to echelon 1.
pub fn echelon(level: u8) -> u8 {
    match level {
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        10 => 4,
        _ => 1,
    }
}

/// Minimum experience needed to be at the given level.
pub fn min_xp(level: u8) -> u32 {
    match level {
        1..=10 => 16 * (level as u32 - 1),
        _ => 0,
    }
}

// ============================================================================
// Characteristic Arrays
// ============================================================================

/// Candidate score templates for the non-primary characteristics.
///
/// Classes with two primary characteristics distribute a 3-value template
/// over the remaining three; classes with one distribute a 4-value template.
pub fn characteristic_arrays(primary_count: usize) -> Vec<Vec<i32>> {
    match primary_count {
        2 => vec![vec![2, -1, -1], vec![1, 0, 0], vec![1, 1, -1]],
        1 => vec![
            vec![2, 2, -1, -1],
            vec![2, 1, 1, -1],
            vec![2, 1, 0, 0],
            vec![1, 1, 1, 0],
        ],
        _ => vec![],
    }
}

/// Expand a template into every distinct assignment of its values to the
/// non-primary characteristics. Primary characteristics are fixed at 2.
pub fn calculate_characteristic_arrays(
    array: &[i32],
    primary: &[Characteristic],
) -> Vec<Vec<CharacteristicValue>> {
    let all = Characteristic::all();
    let others: Vec<Characteristic> = all
        .iter()
        .copied()
        .filter(|c| !primary.contains(c))
        .collect();

    collections::distinct_by(collections::permutations(array), |p| p.clone())
        .into_iter()
        .map(|arr| {
            all.iter()
                .map(|&ch| {
                    let value = if primary.contains(&ch) {
                        2
                    } else {
                        others
                            .iter()
                            .position(|&o| o == ch)
                            .and_then(|index| arr.get(index).copied())
                            .unwrap_or(0)
                    };
                    CharacteristicValue::new(ch, value)
                })
                .collect()
        })
        .collect()
}

/// Potency from the highest characteristic score.
pub fn potency(highest_characteristic: i32, strength: PotencyStrength) -> i32 {
    highest_characteristic - strength.penalty()
}
