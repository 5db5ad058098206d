//! Static portfolio content: project records and the owner's profile.
//!
//! Records are built once at startup and never mutated. List order is display
//! order, and every record id must be unique.

use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, NoneAsEmptyString, serde_as};
use std::collections::HashSet;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct ProjectId(u32);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Tag(String);

crate::impl_string_newtype!(Tag);

/// File name of an image, relative to the assets directory.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ImageRef(String);

crate::impl_string_newtype!(ImageRef);

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct Link(String);

crate::impl_string_newtype!(Link);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Collaboration,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
    pub image: ImageRef,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub category: Category,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub repository: Option<Link>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub live: Option<Link>,
}

impl ProjectRecord {
    /// Tag membership ignores case and order.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub tagline: String,
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub email: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    #[serde(default)]
    pub location: Vec<String>,
    pub more_projects_url: Link,
}

/// On-disk shape of a content file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentFile {
    pub profile: Profile,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ContentError {
    #[error("Duplicate project id {0}")]
    DuplicateId(ProjectId),
}

#[derive(Debug, Clone)]
pub struct ContentStore {
    profile: Profile,
    projects: Vec<ProjectRecord>,
}

impl ContentStore {
    pub fn new(profile: Profile, projects: Vec<ProjectRecord>) -> Result<Self, ContentError> {
        let mut seen = HashSet::with_capacity(projects.len());
        if let Some(dup) = projects.iter().find(|p| !seen.insert(p.id)) {
            return Err(ContentError::DuplicateId(dup.id));
        }
        Ok(Self { profile, projects })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn get(&self, index: usize) -> Option<&ProjectRecord> {
        self.projects.get(index)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Every distinct image the carousel will show, in display order.
    pub fn image_refs(&self) -> Vec<ImageRef> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .filter(|p| seen.insert(&p.image))
            .map(|p| p.image.clone())
            .collect()
    }
}

impl TryFrom<ContentFile> for ContentStore {
    type Error = ContentError;

    fn try_from(file: ContentFile) -> Result<Self, Self::Error> {
        Self::new(file.profile, file.projects)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: u32) -> ProjectRecord {
        ProjectRecord {
            id: ProjectId::from(id),
            title: format!("Project {id}"),
            description: "A project".to_string(),
            long_description: None,
            details: Vec::new(),
            image: ImageRef::new(format!("p{id}.png")),
            tags: vec![Tag::new("Rust")],
            category: Category::Personal,
            repository: None,
            live: None,
        }
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = ContentStore::new(Profile::default(), vec![record(1), record(2), record(1)])
            .unwrap_err();
        assert_eq!(err, ContentError::DuplicateId(ProjectId::from(1)));
    }

    #[test]
    fn test_order_is_preserved() {
        let store = ContentStore::new(Profile::default(), vec![record(3), record(1)]).unwrap();
        let ids: Vec<u32> = store.projects().iter().map(|p| p.id.into()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_empty_links_deserialize_as_absent() {
        let json = r#"{
            "id": 7,
            "title": "GemFund",
            "description": "Crowdfunding",
            "image": "gemfund.png",
            "tags": ["Flutter", "Supabase"],
            "category": "Collaboration",
            "repository": "https://github.com/GemFund",
            "live": ""
        }"#;
        let rec: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.category, Category::Collaboration);
        assert_eq!(rec.repository, Some(Link::new("https://github.com/GemFund")));
        assert_eq!(rec.live, None);
        assert!(rec.details.is_empty());
        assert!(rec.has_tag("supabase"));
    }

    #[test]
    fn test_image_refs_are_distinct() {
        let mut shared = record(2);
        shared.image = ImageRef::new("p1.png");
        let store =
            ContentStore::new(Profile::default(), vec![record(1), shared, record(3)]).unwrap();
        let refs: Vec<String> = store.image_refs().into_iter().map(Into::into).collect();
        assert_eq!(refs, vec!["p1.png", "p3.png"]);
    }
}
