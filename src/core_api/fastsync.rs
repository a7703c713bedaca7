use serde::Deserialize;
use std::fmt;

use super::{null_as_default, push_field, push_list};

/// Article metadata shipped inside a CORE resource dump (FastSync).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FsArticle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub doi: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub core_id: String,
    /// Additional identifiers of unspecified kind.
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifiers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enrichments: FsEnrichment,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_published: String,
    #[serde(rename = "abstract", default, deserialize_with = "null_as_default")]
    pub abstract_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub download_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_text_identifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pdf_hash_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(rename = "rawRecordXML", default, deserialize_with = "null_as_default")]
    pub raw_record_xml: String,
    #[serde(rename = "journals", default, deserialize_with = "null_as_default")]
    pub journal: FsJournal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: FsLanguage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FsEnrichment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub references: Vec<String>,
    #[serde(rename = "documentType", default, deserialize_with = "null_as_default")]
    pub document_type: DocumentType,
}

/// Detected document type and CORE's confidence in it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentType {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FsLanguage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
}

/// Journal title and its identifiers (typically ISSNs).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FsJournal {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifiers: Vec<String>,
}

/// Prints the pertinent subset of the record, not every field.
impl fmt::Display for FsArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = format!("CORE ID: {}\n", self.core_id);
        push_field(&mut out, "DOI", &self.doi);
        push_field(&mut out, "Title", &self.title);
        push_list(&mut out, "Authors", &self.authors);
        push_field(&mut out, "Published By", &self.publisher);
        push_field(&mut out, "Journal", &self.journal.title);
        push_field(&mut out, "Document Type", &self.enrichments.document_type.kind);
        push_field(&mut out, "Download From", &self.download_url);
        f.write_str(out.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::super::extract_fastsync_article;
    use super::*;
    use pretty_assertions::assert_eq;

    const RECORD: &str = r#"{
        "doi": null,
        "coreId": "10.1.1.1",
        "identifiers": ["oai:example.org:42"],
        "title": "Sampling Methods",
        "authors": ["Doe, A."],
        "enrichments": {
            "references": [],
            "documentType": {"type": "research", "confidence": 0.87}
        },
        "contributors": [],
        "datePublished": "2016-01-01",
        "abstract": "We study things.",
        "downloadUrl": "https://core.ac.uk/download/42.pdf",
        "fullTextIdentifier": null,
        "pdfHashValue": "abc123",
        "publisher": "Example Press",
        "rawRecordXML": "<record/>",
        "journals": {"title": "Journal of Things", "identifiers": ["issn:1234-5678"]},
        "language": {"code": "en", "name": "English", "id": 9},
        "relations": [],
        "year": 2016,
        "topics": null,
        "subjects": ["article"],
        "urls": ["https://example.org/42"],
        "fullText": ""
    }"#;

    #[test]
    fn test_record_decodes() {
        let article = extract_fastsync_article(RECORD.as_bytes()).unwrap();
        assert_eq!(article.core_id, "10.1.1.1");
        assert_eq!(article.doi, "");
        assert_eq!(article.abstract_text, "We study things.");
        assert_eq!(article.raw_record_xml, "<record/>");
        assert_eq!(article.journal.identifiers, vec!["issn:1234-5678"]);
        assert_eq!(article.enrichments.document_type.kind, "research");
        assert!((article.enrichments.document_type.confidence - 0.87).abs() < 1e-6);
        assert!(article.topics.is_empty());
    }

    #[test]
    fn test_empty_object_decodes_to_defaults() {
        let article = extract_fastsync_article(b"{}").unwrap();
        assert_eq!(article, FsArticle::default());
    }

    #[test]
    fn test_display() {
        let article = extract_fastsync_article(RECORD.as_bytes()).unwrap();
        assert_eq!(
            article.to_string(),
            "CORE ID: 10.1.1.1
Title: Sampling Methods
Authors: Doe, A.
Published By: Example Press
Journal: Journal of Things
Document Type: research
Download From: https://core.ac.uk/download/42.pdf"
        );
    }
}
