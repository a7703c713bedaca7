use serde::Deserialize;
use std::fmt;

use super::{null_as_default, push_field, push_list};

/// Envelope of a CORE API article response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArticleWrapper {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Article,
}

/// Article metadata as returned by the CORE API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_published: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Only present when requested with `fulltext=true`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifiers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: Language,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repositories: Vec<Repository>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository_document: RepositoryDocument,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    /// Only present when requested with `urls=true`.
    #[serde(
        rename = "fulltextUrls",
        default,
        deserialize_with = "null_as_default"
    )]
    pub full_text_urls: Vec<String>,
    #[serde(
        rename = "fulltextIdentifier",
        default,
        deserialize_with = "null_as_default"
    )]
    pub full_text_identifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub oai: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub download_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Language {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Repository a CORE article was harvested from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_doar_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url_homepage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url_oaipmh: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri_journals: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub physical_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub software: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata_format: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub journal: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roar_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pdf_status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nr_updates: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_update_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository_location: String,
}

/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pdf_status: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata_added: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata_updated: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deposited_date: i64,
}

impl fmt::Display for ArticleWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        push_field(&mut out, "Status", &self.status);
        out.push_str(&self.data.to_string());
        f.write_str(out.trim_end())
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        push_field(&mut out, "ID", &self.id);
        push_field(&mut out, "Title", &self.title);
        push_list(&mut out, "Authors", &self.authors);
        push_list(&mut out, "Contributors", &self.contributors);
        push_field(&mut out, "Date Published", &self.date_published);
        if self.year != 0 {
            push_field(&mut out, "Year", &self.year.to_string());
        }
        push_field(&mut out, "Publisher", &self.publisher);
        push_field(&mut out, "Language", &self.language.name);
        push_list(&mut out, "Identifiers", &self.identifiers);
        push_list(&mut out, "Subjects", &self.subjects);
        push_list(&mut out, "Topics", &self.topics);
        push_list(&mut out, "Types", &self.types);
        push_list(&mut out, "Relations", &self.relations);
        let repositories: Vec<String> = self
            .repositories
            .iter()
            .map(|r| r.name.clone())
            .filter(|n| !n.is_empty())
            .collect();
        push_list(&mut out, "Repositories", &repositories);
        push_field(&mut out, "OAI", &self.oai);
        push_field(&mut out, "Full Text Identifier", &self.full_text_identifier);
        push_list(&mut out, "Full Text URLs", &self.full_text_urls);
        push_field(&mut out, "Download URL", &self.download_url);
        push_field(&mut out, "Description", &self.description);
        f.write_str(out.trim_end())
    }
}
