//! Inherited ancestries.
//!
//! An ancestry with an inherited-ancestry feature takes some of its traits,
//! its size, and its speed from other ancestries the player picks. Whenever
//! that pick changes, the derived features on the ancestry are rebuilt here.
//! Rebuilt features go immediately after the inherited-ancestry feature so
//! the ancestry keeps a stable display order.

use crate::feature::{
    ChoiceData, ChoiceOption, Feature, FeatureData, FeatureType, InheritedAncestryData, Size,
    SizeData,
};
use crate::hero::{Ancestry, Hero};
use crate::sourcebook::{self, Sourcebook};
use uuid::Uuid;

/// Reserved id of the size feature this module synthesizes.
pub const INHERITED_SIZE_ID: &str = "inherited-size";

impl Hero {
    /// Rebuild the ancestry's inherited features from its current selection.
    /// Does nothing when the ancestry has no inherited-ancestry feature.
    pub fn update_inherited_features(&mut self, sourcebooks: &[Sourcebook]) {
        let data = self.inherited_ancestry().and_then(|f| match &f.data {
            FeatureData::InheritedAncestry(data) => Some(data.clone()),
            _ => None,
        });

        if let (Some(data), Some(ancestry)) = (data, self.ancestry.as_mut()) {
            update_inherited_features(&mut ancestry.features, &data, sourcebooks);
        }
    }
}

/// Rebuild the inherited traits, size, and speed of an ancestry's feature
/// list according to `data`.
pub fn update_inherited_features(
    ancestry_features: &mut Vec<Feature>,
    data: &InheritedAncestryData,
    sourcebooks: &[Sourcebook],
) {
    let ancestries = sourcebook::ancestries_by_id(sourcebooks, &data.selected);
    tracing::debug!(
        selected = ?data.selected,
        found = ancestries.len(),
        "updating inherited ancestry features"
    );

    if data.inherits(FeatureType::AncestryTraits) {
        update_inherited_traits(ancestry_features, &ancestries);
    }
    if data.inherits(FeatureType::Size) {
        update_inherited_size(ancestry_features, &ancestries);
    }
    if data.inherits(FeatureType::Speed) {
        update_inherited_speed(ancestry_features, &ancestries);
    }
}

/// Offer the source ancestries' traits alongside the ancestry's own, and
/// drop selected traits that are no longer offered.
pub fn update_inherited_traits(ancestry_features: &mut [Feature], ancestries: &[&Ancestry]) {
    let Some(traits) = ancestry_features.iter_mut().find_map(|f| match &mut f.data {
        FeatureData::AncestryTraits(data) => Some(data),
        _ => None,
    }) else {
        return;
    };

    traits.inherited_options = ancestries
        .iter()
        .filter_map(|a| {
            a.features.iter().find_map(|f| match &f.data {
                FeatureData::AncestryTraits(data) => Some(data),
                _ => None,
            })
        })
        .flat_map(|data| data.options.iter().cloned())
        .collect();

    let offered: Vec<String> = traits
        .options
        .iter()
        .chain(traits.inherited_options.iter())
        .map(|o| o.feature.id.clone())
        .collect();
    let before = traits.selected.len();
    traits.selected.retain(|f| offered.contains(&f.id));

    if traits.selected.len() != before {
        tracing::debug!(
            dropped = before - traits.selected.len(),
            "dropped traits no longer offered"
        );
    }
}

/// Sizes an ancestry allows: its size feature or the sizes its choices
/// offer, 1M when it states none.
fn ancestry_sizes(ancestry: &Ancestry) -> Vec<Size> {
    let mut sizes: Vec<Size> = Vec::new();
    for feature in &ancestry.features {
        match &feature.data {
            FeatureData::Size(data) => sizes.push(data.size),
            FeatureData::Choice(choice) => {
                sizes.extend(choice.options.iter().filter_map(|o| match &o.feature.data {
                    FeatureData::Size(data) => Some(data.size),
                    _ => None,
                }));
            }
            _ => {}
        }
    }

    if sizes.is_empty() {
        sizes.push(Size::medium());
    }
    sizes
}

fn size_feature(id: impl Into<String>, size: Size) -> Feature {
    Feature::new(id, "Size", FeatureData::Size(SizeData { size }))
}

/// Replace the synthesized size feature: a fixed size when the source
/// ancestries agree, a choice between their sizes when they do not.
pub fn update_inherited_size(ancestry_features: &mut Vec<Feature>, ancestries: &[&Ancestry]) {
    if let Some(index) = ancestry_features
        .iter()
        .position(|f| f.id == INHERITED_SIZE_ID)
    {
        ancestry_features.remove(index);
    }

    let mut sizes: Vec<Size> = Vec::new();
    for size in ancestries.iter().flat_map(|a| ancestry_sizes(a)) {
        if !sizes.contains(&size) {
            sizes.push(size);
        }
    }

    let feature = match sizes.as_slice() {
        [] => return,
        [size] => size_feature(INHERITED_SIZE_ID, *size),
        _ => Feature::new(
            INHERITED_SIZE_ID,
            "Size",
            FeatureData::Choice(ChoiceData {
                options: sizes
                    .iter()
                    .map(|&size| ChoiceOption::new(size_feature(Uuid::new_v4().to_string(), size), 1))
                    .collect(),
                count: 1,
                selected: Vec::new(),
            }),
        )
        .with_description("Choose your size."),
    };

    tracing::debug!(sizes = sizes.len(), "synthesized inherited size");
    insert_after_anchor(ancestry_features, feature);
}

/// Replace the ancestry's speed with the fastest source ancestry's speed.
/// The first ancestry wins ties.
pub fn update_inherited_speed(ancestry_features: &mut Vec<Feature>, ancestries: &[&Ancestry]) {
    if let Some(index) = ancestry_features
        .iter()
        .position(|f| f.kind() == FeatureType::Speed)
    {
        ancestry_features.remove(index);
    }

    let mut fastest: Option<(&Feature, i32)> = None;
    for ancestry in ancestries {
        let speed = ancestry.features.iter().find_map(|f| match &f.data {
            FeatureData::Speed(data) => Some((f, data.speed)),
            _ => None,
        });
        if let Some((feature, speed)) = speed {
            if fastest.map_or(true, |(_, best)| speed > best) {
                fastest = Some((feature, speed));
            }
        }
    }

    if let Some((feature, speed)) = fastest {
        tracing::debug!(speed, "inherited speed");
        insert_after_anchor(ancestry_features, feature.clone());
    }
}

/// Insert right after the inherited-ancestry feature, or first if missing.
fn insert_after_anchor(ancestry_features: &mut Vec<Feature>, feature: Feature) {
    let index = ancestry_features
        .iter()
        .position(|f| f.kind() == FeatureType::InheritedAncestry)
        .map_or(0, |i| i + 1);
    ancestry_features.insert(index, feature);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{AncestryTraitsData, SpeedData};
    use crate::testing::{inherited_ancestry, size_feature as sized, speed_feature};

    fn ancestry(id: &str, features: Vec<Feature>) -> Ancestry {
        Ancestry::new(id, id).with_features(features)
    }

    fn anchored() -> Vec<Feature> {
        vec![
            Feature::new("intro", "Intro", FeatureData::Text),
            inherited_ancestry("former-life", &[FeatureType::Size, FeatureType::Speed], &[]),
            Feature::new("outro", "Outro", FeatureData::Text),
        ]
    }

    fn ids(features: &[Feature]) -> Vec<&str> {
        features.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_agreeing_sizes_make_fixed_feature() {
        let human = ancestry("human", vec![sized("h-size", "1M")]);
        let elf = ancestry("elf", vec![]);
        let mut features = anchored();

        update_inherited_size(&mut features, &[&human, &elf]);

        assert_eq!(ids(&features), vec!["intro", "former-life", INHERITED_SIZE_ID, "outro"]);
        match &features[2].data {
            FeatureData::Size(data) => assert_eq!(data.size, Size::medium()),
            other => panic!("expected a size feature, got {other:?}"),
        }
    }

    #[test]
    fn test_differing_sizes_make_choice() {
        let human = ancestry("human", vec![sized("h-size", "1M")]);
        let hakaan = ancestry("hakaan", vec![sized("k-size", "2L")]);
        let mut features = anchored();

        update_inherited_size(&mut features, &[&human, &hakaan]);

        match &features[2].data {
            FeatureData::Choice(choice) => {
                assert_eq!(choice.options.len(), 2);
                assert_eq!(features[2].description, "Choose your size.");
            }
            other => panic!("expected a choice, got {other:?}"),
        }
    }

    #[test]
    fn test_size_choice_options_from_source_choices() {
        let options = vec![
            ChoiceOption::new(sized("s", "1S"), 1),
            ChoiceOption::new(sized("m", "1M"), 1),
        ];
        let polder = ancestry(
            "polder",
            vec![Feature::new(
                "size-choice",
                "Size",
                FeatureData::Choice(ChoiceData {
                    options,
                    count: 1,
                    selected: vec![],
                }),
            )],
        );
        let human = ancestry("human", vec![sized("h-size", "1M")]);
        let mut features = anchored();

        update_inherited_size(&mut features, &[&polder, &human]);

        match &features[2].data {
            FeatureData::Choice(choice) => assert_eq!(choice.options.len(), 2),
            other => panic!("expected a choice, got {other:?}"),
        }
    }

    #[test]
    fn test_size_replaced_not_duplicated() {
        let human = ancestry("human", vec![sized("h-size", "1M")]);
        let mut features = anchored();

        update_inherited_size(&mut features, &[&human]);
        update_inherited_size(&mut features, &[&human]);
        assert_eq!(features.iter().filter(|f| f.id == INHERITED_SIZE_ID).count(), 1);

        update_inherited_size(&mut features, &[]);
        assert_eq!(ids(&features), vec!["intro", "former-life", "outro"]);
    }

    #[test]
    fn test_fastest_speed_first_wins_ties() {
        let dwarf = ancestry("dwarf", vec![speed_feature("dwarf-speed", 5)]);
        let elf = ancestry("elf", vec![speed_feature("elf-speed", 6)]);
        let orc = ancestry("orc", vec![speed_feature("orc-speed", 6)]);
        let mut features = anchored();
        features.push(speed_feature("old-speed", 3));

        update_inherited_speed(&mut features, &[&dwarf, &elf, &orc]);

        assert_eq!(ids(&features), vec!["intro", "former-life", "elf-speed", "outro"]);
        assert_eq!(features[2].data, FeatureData::Speed(SpeedData { speed: 6 }));
    }

    #[test]
    fn test_speed_removed_without_sources() {
        let mut features = anchored();
        features.push(speed_feature("old-speed", 3));
        update_inherited_speed(&mut features, &[]);
        assert_eq!(ids(&features), vec!["intro", "former-life", "outro"]);
    }

    #[test]
    fn test_traits_prune_stale_selection() {
        let own = Feature::new("own-trait", "Own", FeatureData::Text);
        let theirs = Feature::new("their-trait", "Theirs", FeatureData::Text);
        let stale = Feature::new("stale-trait", "Stale", FeatureData::Text);

        let source = ancestry(
            "source",
            vec![Feature::new(
                "source-traits",
                "Source Traits",
                FeatureData::AncestryTraits(AncestryTraitsData {
                    points: 3,
                    options: vec![ChoiceOption::new(theirs.clone(), 1)],
                    inherited_options: vec![],
                    selected: vec![],
                }),
            )],
        );

        let mut features = vec![Feature::new(
            "traits",
            "Traits",
            FeatureData::AncestryTraits(AncestryTraitsData {
                points: 3,
                options: vec![ChoiceOption::new(own.clone(), 1)],
                inherited_options: vec![ChoiceOption::new(stale.clone(), 1)],
                selected: vec![own, theirs, stale],
            }),
        )];

        update_inherited_traits(&mut features, &[&source]);

        match &features[0].data {
            FeatureData::AncestryTraits(data) => {
                assert_eq!(data.inherited_options.len(), 1);
                assert_eq!(ids(&data.selected), vec!["own-trait", "their-trait"]);
            }
            other => panic!("expected traits, got {other:?}"),
        }
    }
}
