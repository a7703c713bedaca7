//! Typed representations of the ResourceSync wire shapes.
//!
//! Two document roots exist on the wire:
//!
//! - `<urlset>` decodes into [`UrlSet`] (resource lists, change lists,
//!   capability lists and dump manifests)
//! - `<sitemapindex>` decodes into [`SitemapIndex`] (resource list and change
//!   list indices)
//!
//! Both carry the `rs:ln` / `rs:md` elements from the
//! `http://www.openarchives.org/rs/terms/` namespace. The deserializer matches
//! element names on their local part, so the `rs:` prefix is not spelled out.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;

use crate::util::parse_w3c_datetime;

/// Default namespace of sitemap-derived documents.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Namespace supplying the `ln` and `md` elements.
pub const RS_NAMESPACE: &str = "http://www.openarchives.org/rs/terms/";

/// Root element of list documents.
pub const URLSET_ELEMENT: &str = "urlset";

/// Root element of index documents.
pub const SITEMAPINDEX_ELEMENT: &str = "sitemapindex";

/// An `rs:ln` element: a typed relation to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Link {
    /// Relation name such as `up`, `index` or `describedBy`.
    #[serde(rename = "@rel", default)]
    pub relation: String,
    /// Target URL of the relation.
    #[serde(rename = "@href", default)]
    pub target: String,
}

impl Link {
    pub fn new(relation: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            target: target.into(),
        }
    }
}

/// An `rs:md` element.
///
/// Every attribute is optional on the wire; an absent attribute decodes to an
/// empty string and is treated exactly like an empty one. Which attributes are
/// meaningful depends on where the element sits:
///
/// - top level: `capability`, `at`, `completed`, `from`, `until`
/// - resource list entries: `hash`, `length`, `type`
/// - change list entries: `change`, `datetime`
/// - dump manifest entries: `path`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(rename = "@capability")]
    pub capability: String,
    #[serde(rename = "@at")]
    pub at: String,
    #[serde(rename = "@completed")]
    pub completed: String,
    #[serde(rename = "@hash")]
    pub hash: String,
    #[serde(rename = "@length")]
    pub length: String,
    #[serde(rename = "@type")]
    pub mime_type: String,
    #[serde(rename = "@from")]
    pub from: String,
    #[serde(rename = "@until")]
    pub until: String,
    #[serde(rename = "@change")]
    pub change: String,
    #[serde(rename = "@datetime")]
    pub datetime: String,
    #[serde(rename = "@path")]
    pub path: String,
}

impl Metadata {
    /// Metadata block carrying only a capability.
    pub fn with_capability(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            ..Self::default()
        }
    }

    /// Parsed form of the `capability` attribute, if it names a known one.
    pub fn capability(&self) -> Option<Capability> {
        self.capability.parse().ok()
    }

    /// True when no attribute carries a value.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }

    /// Attribute labels and values in rendering order.
    pub(crate) fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("Capability", &self.capability),
            ("At", &self.at),
            ("Completed", &self.completed),
            ("Hash", &self.hash),
            ("Length", &self.length),
            ("Type", &self.mime_type),
            ("From", &self.from),
            ("Until", &self.until),
            ("Change", &self.change),
            ("DateTime", &self.datetime),
            ("Path", &self.path),
        ]
    }

    pub fn at_time(&self) -> Option<DateTime<Utc>> {
        parse_w3c_datetime(&self.at)
    }

    pub fn completed_time(&self) -> Option<DateTime<Utc>> {
        parse_w3c_datetime(&self.completed)
    }

    pub fn datetime_time(&self) -> Option<DateTime<Utc>> {
        parse_w3c_datetime(&self.datetime)
    }

    /// The `length` attribute as a byte count.
    pub fn length_bytes(&self) -> Option<u64> {
        self.length.trim().parse().ok()
    }
}

/// One `<url>` row of a list document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Entry {
    /// Mandatory `<loc>`; a row without it fails to decode.
    #[serde(rename = "loc")]
    pub location: String,
    #[serde(rename = "lastmod", default)]
    pub last_modified: Option<String>,
    #[serde(rename = "changefreq", default)]
    pub change_frequency: Option<String>,
    #[serde(rename = "md", default)]
    pub metadata: Metadata,
    /// Last `rs:ln` of the row when it carries several.
    #[serde(rename = "ln", default, deserialize_with = "last_link")]
    pub link: Option<Link>,
}

fn last_link<'de, D>(deserializer: D) -> Result<Option<Link>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let mut links = Vec::<Link>::deserialize(deserializer)?;
    Ok(links.pop())
}

impl Entry {
    pub fn last_modified_time(&self) -> Option<DateTime<Utc>> {
        self.last_modified.as_deref().and_then(parse_w3c_datetime)
    }
}

/// One `<sitemap>` row of an index document, pointing at a child document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IndexEntry {
    #[serde(rename = "loc")]
    pub location: String,
    #[serde(rename = "lastmod", default)]
    pub last_modified: Option<String>,
    #[serde(rename = "md", default)]
    pub metadata: Metadata,
}

impl IndexEntry {
    pub fn last_modified_time(&self) -> Option<DateTime<Utc>> {
        self.last_modified.as_deref().and_then(parse_w3c_datetime)
    }
}

/// A decoded `<urlset>` document. Terminal: its entries are the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UrlSet {
    /// Value of the `xmlns` attribute on the root element.
    ///
    /// This is the declaration as written, not a resolved namespace: a
    /// document that inherits its default namespace from elsewhere, or binds
    /// the root through a prefix, yields an empty string here.
    #[serde(rename = "@xmlns", default)]
    pub namespace: String,
    #[serde(rename = "ln", default)]
    pub links: Vec<Link>,
    #[serde(rename = "md", default)]
    pub metadata: Metadata,
    #[serde(rename = "url", default)]
    pub entries: Vec<Entry>,
}

impl UrlSet {
    pub fn local_name(&self) -> &'static str {
        URLSET_ELEMENT
    }
}

/// A decoded `<sitemapindex>` document. Each entry names a child document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SitemapIndex {
    /// Same caveat as [`UrlSet::namespace`].
    #[serde(rename = "@xmlns", default)]
    pub namespace: String,
    #[serde(rename = "ln", default)]
    pub links: Vec<Link>,
    #[serde(rename = "md", default)]
    pub metadata: Metadata,
    #[serde(rename = "sitemap", default)]
    pub entries: Vec<IndexEntry>,
}

impl SitemapIndex {
    pub fn local_name(&self) -> &'static str {
        SITEMAPINDEX_ELEMENT
    }
}

/// Capability vocabulary of the protocol, plus the manifest extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Description,
    CapabilityList,
    ResourceList,
    ChangeList,
    ResourceDump,
    ChangeDump,
    ResourceDumpManifest,
    ChangeDumpManifest,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Description => "description",
            Capability::CapabilityList => "capabilitylist",
            Capability::ResourceList => "resourcelist",
            Capability::ChangeList => "changelist",
            Capability::ResourceDump => "resourcedump",
            Capability::ChangeDump => "changedump",
            Capability::ResourceDumpManifest => "resourcedump-manifest",
            Capability::ChangeDumpManifest => "changedump-manifest",
        }
    }
}

impl FromStr for Capability {
    type Err = UnknownCapability;

    /// Matches the wire value exactly; capability names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(Capability::Description),
            "capabilitylist" => Ok(Capability::CapabilityList),
            "resourcelist" => Ok(Capability::ResourceList),
            "changelist" => Ok(Capability::ChangeList),
            "resourcedump" => Ok(Capability::ResourceDump),
            "changedump" => Ok(Capability::ChangeDump),
            "resourcedump-manifest" => Ok(Capability::ResourceDumpManifest),
            "changedump-manifest" => Ok(Capability::ChangeDumpManifest),
            other => Err(UnknownCapability(other.to_string())),
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A capability string outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability: {0:?}")]
pub struct UnknownCapability(pub String);
