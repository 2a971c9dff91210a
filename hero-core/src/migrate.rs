//! Upgrading heroes saved by older versions.
//!
//! Loading runs two passes. [`update_hero`] fills fields that older records
//! lack, where an absent value means something different from an empty
//! one. [`update_breaking_changes`] repairs records whose features were
//! saved under an older schema. Both passes leave an up-to-date hero
//! untouched, so they are safe to run on every load.

use crate::content::{
    ContentRegistry, CORE_SOURCEBOOK_ID, ORDEN_SOURCEBOOK_ID, REVENANT_FORMER_LIFE_ID, REVENANT_ID,
};
use crate::extract::FeatureSource;
use crate::feature::{AncestryTraitsData, Feature, FeatureData, FeatureType};
use crate::hero::{Hero, IncitingIncidents};
use thiserror::Error;

/// Errors from loading a saved hero.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for the load-time upgrade.
#[derive(Debug, Clone)]
pub struct MigrationConfig<'a> {
    /// Sourcebooks enabled on heroes saved before sourcebook selection existed.
    pub setting_ids: Vec<String>,
    /// Current definitions used to repair stale built-in features.
    pub content: &'a ContentRegistry,
}

impl Default for MigrationConfig<'static> {
    fn default() -> Self {
        Self {
            setting_ids: vec![CORE_SOURCEBOOK_ID.to_string(), ORDEN_SOURCEBOOK_ID.to_string()],
            content: ContentRegistry::global(),
        }
    }
}

impl<'a> MigrationConfig<'a> {
    pub fn new(content: &'a ContentRegistry) -> Self {
        Self {
            setting_ids: MigrationConfig::default().setting_ids,
            content,
        }
    }

    pub fn with_setting_ids(mut self, ids: Vec<String>) -> Self {
        self.setting_ids = ids;
        self
    }

    pub fn with_content(mut self, content: &'a ContentRegistry) -> Self {
        self.content = content;
        self
    }
}

/// Deserialize a saved hero and bring it up to date.
pub fn load_hero(json: &str, config: &MigrationConfig<'_>) -> Result<Hero, MigrateError> {
    let mut hero: Hero = serde_json::from_str(json)?;
    update_hero(&mut hero, config);
    update_breaking_changes(&mut hero, config.content);
    Ok(hero)
}

/// Fill optional fields an older record did not have.
///
/// Numeric state, feature lists, and scaled-value fields are defaulted
/// while deserializing; this covers the fields whose absence must be
/// distinguishable from an empty value.
pub fn update_hero(hero: &mut Hero, config: &MigrationConfig<'_>) {
    if hero.setting_ids.is_none() {
        tracing::info!(hero = %hero.id, "enabling default sourcebooks");
        hero.setting_ids = Some(config.setting_ids.clone());
    }

    if let Some(career) = hero.career.as_mut() {
        if career.inciting_incidents.is_none() {
            tracing::info!(hero = %hero.id, career = %career.id, "adding inciting incidents");
            career.inciting_incidents = Some(IncitingIncidents::default());
        }
    }
}

/// Repair features saved under an older schema.
///
/// An ancestry without an ancestry-traits feature has its first feature
/// named like "... Traits" retagged. A revenant whose former-life feature
/// predates inherited ancestries gets the current definition spliced in.
pub fn update_breaking_changes(hero: &mut Hero, content: &ContentRegistry) {
    let has_traits = hero
        .all_features()
        .iter()
        .any(|f| f.kind() == FeatureType::AncestryTraits);

    let Some(ancestry) = hero.ancestry.as_mut() else {
        return;
    };

    if !has_traits {
        if let Some(feature) = ancestry.features.iter_mut().find(|f| f.name.contains("Traits")) {
            tracing::info!(feature = %feature.id, "retagging legacy traits feature");
            retag_traits(feature);
        }
    }

    if ancestry.id == REVENANT_ID {
        let current = content.ancestry(REVENANT_ID).and_then(|a| {
            a.features
                .iter()
                .find(|f| f.kind() == FeatureType::InheritedAncestry)
        });
        let Some(current) = current else {
            return;
        };

        let stale = ancestry
            .features
            .iter_mut()
            .find(|f| f.id == current.id && f.kind() != FeatureType::InheritedAncestry);
        if let Some(stale) = stale {
            tracing::info!(feature = REVENANT_FORMER_LIFE_ID, "replacing stale former life feature");
            *stale = current.clone();
        }
    }
}

/// Turn a legacy traits feature into an ancestry-traits feature, keeping
/// a choice's options and selection.
fn retag_traits(feature: &mut Feature) {
    let data = match &mut feature.data {
        FeatureData::AncestryTraits(_) => return,
        FeatureData::Choice(choice) => AncestryTraitsData {
            points: u32::try_from(choice.count).unwrap_or(u32::MAX),
            options: std::mem::take(&mut choice.options),
            inherited_options: Vec::new(),
            selected: std::mem::take(&mut choice.selected),
        },
        _ => AncestryTraitsData {
            points: 0,
            options: Vec::new(),
            inherited_options: Vec::new(),
            selected: Vec::new(),
        },
    };
    feature.data = FeatureData::AncestryTraits(data);
}
