//! Sourcebook catalogs and lookups.

use crate::hero::{Ancestry, Language, Skill};
use serde::{Deserialize, Serialize};

/// A content source: ancestries, languages, and skills a hero may reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sourcebook {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ancestries: Vec<Ancestry>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Sourcebook {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// First language with exactly this name across the sourcebooks.
pub fn find_language<'a>(name: &str, sourcebooks: &'a [Sourcebook]) -> Option<&'a Language> {
    sourcebooks
        .iter()
        .flat_map(|sb| sb.languages.iter())
        .find(|l| l.name == name)
}

/// First skill with exactly this name across the sourcebooks.
pub fn find_skill<'a>(name: &str, sourcebooks: &'a [Sourcebook]) -> Option<&'a Skill> {
    sourcebooks
        .iter()
        .flat_map(|sb| sb.skills.iter())
        .find(|s| s.name == name)
}

/// Ancestries whose ids are in `ids`, in sourcebook order.
pub fn ancestries_by_id<'a>(sourcebooks: &'a [Sourcebook], ids: &[String]) -> Vec<&'a Ancestry> {
    sourcebooks
        .iter()
        .flat_map(|sb| sb.ancestries.iter())
        .filter(|a| ids.contains(&a.id))
        .collect()
}
