//! Deterministic multi-line renderings used for diagnostics.
//!
//! Every structure is written field by field in a fixed order. Empty
//! attributes and absent optional elements are left out entirely.

use std::fmt::{self, Display, Formatter};

use super::model::{Entry, IndexEntry, Link, Metadata, SitemapIndex, UrlSet};

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Rel: {} Href: {}", self.relation, self.target)
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, value) in self.fields() {
            if value.is_empty() {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{label}: {value}")?;
            first = false;
        }
        Ok(())
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Loc: {}", self.location.trim())?;
        if let Some(lastmod) = non_empty(&self.last_modified) {
            write!(f, " LastMod: {lastmod}")?;
        }
        if let Some(freq) = non_empty(&self.change_frequency) {
            write!(f, " ChangeFreq: {freq}")?;
        }
        if !self.metadata.is_empty() {
            write!(f, " MD: {}", self.metadata)?;
        }
        if let Some(link) = &self.link {
            write!(f, " LN: {link}")?;
        }
        Ok(())
    }
}

impl Display for IndexEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Loc: {}", self.location.trim())?;
        if let Some(lastmod) = non_empty(&self.last_modified) {
            write!(f, " LastMod: {lastmod}")?;
        }
        if !self.metadata.is_empty() {
            write!(f, " MD: {}", self.metadata)?;
        }
        Ok(())
    }
}

impl Display for UrlSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_document(
            f,
            &self.namespace,
            self.local_name(),
            &self.links,
            &self.metadata,
            &self.entries,
        )
    }
}

impl Display for SitemapIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_document(
            f,
            &self.namespace,
            self.local_name(),
            &self.links,
            &self.metadata,
            &self.entries,
        )
    }
}

/// Shared layout of both document shapes: header, top-level links, top-level
/// metadata, then one line per entry.
fn write_document<E: Display>(
    f: &mut Formatter<'_>,
    namespace: &str,
    local: &str,
    links: &[Link],
    metadata: &Metadata,
    entries: &[E],
) -> fmt::Result {
    write!(f, "Namespace: {namespace}, Local: {local}")?;
    if !links.is_empty() {
        f.write_str("\nTop Level LN")?;
        for link in links {
            write!(f, "\n{link}")?;
        }
    }
    if !metadata.is_empty() {
        write!(f, "\nTop Level MD\n{metadata}")?;
    }
    if !entries.is_empty() {
        f.write_str("\nEntries")?;
        for entry in entries {
            write!(f, "\n{entry}")?;
        }
    }
    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
