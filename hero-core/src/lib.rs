//! Hero feature engine for Draw Steel characters.
//!
//! This crate provides:
//! - A typed feature model where each feature kind carries its own payload
//! - Derived statistics computed on demand from a hero's features
//! - Inherited-ancestry resolution and conditional overrides
//! - Load-time upgrading of heroes saved by older versions
//!
//! # Quick Start
//!
//! ```ignore
//! use hero_core::{load_hero, AbilityQuery, ContentRegistry, MigrationConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let json = std::fs::read_to_string("hero.json")?;
//!     let hero = load_hero(&json, &MigrationConfig::default())?;
//!
//!     println!("{} has {} stamina", hero.name, hero.stamina());
//!     for ability in hero.abilities(ContentRegistry::global(), AbilityQuery::all()) {
//!         println!("{} ({})", ability.name, ability.cost);
//!     }
//!     Ok(())
//! }
//! ```

pub mod ability;
pub mod aggregate;
pub mod characteristic;
pub mod collections;
pub mod content;
pub mod edit;
pub mod extract;
pub mod feature;
pub mod hero;
pub mod hero_builder;
pub mod inheritance;
pub mod migrate;
pub mod overrides;
pub mod sourcebook;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Primary public API
pub use aggregate::{AbilityQuery, DamageModifierValue};
pub use content::ContentRegistry;
pub use edit::EditError;
pub use extract::FeatureSource;
pub use feature::{Feature, FeatureData, FeatureType, Size};
pub use hero::Hero;
pub use hero_builder::{BuilderError, HeroBuilder};
pub use migrate::{load_hero, MigrateError, MigrationConfig};
pub use overrides::{active_overrides, should_do_override};
pub use sourcebook::Sourcebook;
