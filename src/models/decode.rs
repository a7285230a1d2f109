//! Boundary decoding of the snippet document.
//!
//! The document is an array of loosely shaped objects. Every entry is checked
//! here once so the rest of the crate only ever sees complete [`Snippet`]s:
//! entries without a usable id are rejected, everything else that is missing
//! or has the wrong type is repaired to an empty value.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Author, Snippet, SnippetCollection};

/// Serialization format of the snippet document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

/// Why a single entry of the document was dropped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("entry has no usable id")]
    MissingId,
    #[error("id `{0}` already used by an earlier entry")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub reason: RejectReason,
}

/// Result of decoding a document: the accepted snippets plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    pub collection: SnippetCollection,
    pub rejected: Vec<Rejection>,
}

/// Parses and validates a whole snippet document.
pub fn decode_document(text: &str, format: DocumentFormat) -> Result<DecodeReport> {
    let value: Value = match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).context("Failed to parse snippet document as JSON")?
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(text).context("Failed to parse snippet document as YAML")?
        }
    };

    let Value::Array(entries) = value else {
        bail!("Snippet document must be an array of snippet objects");
    };

    Ok(decode_entries(entries))
}

/// Validates already parsed entries in document order.
pub fn decode_entries(entries: Vec<Value>) -> DecodeReport {
    let mut seen_ids = HashSet::new();
    let mut snippets = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        match decode_entry(&entry) {
            Ok(snippet) => {
                if !seen_ids.insert(snippet.id.clone()) {
                    tracing::warn!(index, id = %snippet.id, "dropping snippet with duplicate id");
                    rejected.push(Rejection {
                        index,
                        reason: RejectReason::DuplicateId(snippet.id),
                    });
                    continue;
                }
                snippets.push(snippet);
            }
            Err(reason) => {
                tracing::warn!(index, %reason, "dropping malformed snippet entry");
                rejected.push(Rejection { index, reason });
            }
        }
    }

    DecodeReport {
        collection: SnippetCollection::new(snippets),
        rejected,
    }
}

/// Decodes one entry, repairing every field except the id.
pub fn decode_entry(entry: &Value) -> Result<Snippet, RejectReason> {
    let object = entry.as_object().ok_or(RejectReason::NotAnObject)?;
    let id = decode_id(object.get("id")).ok_or(RejectReason::MissingId)?;

    Ok(Snippet {
        id,
        title: text_field(object, "title"),
        description: text_field(object, "description"),
        language: text_field(object, "language"),
        code: text_field(object, "code"),
        tags: decode_tags(object.get("tags")),
        author: decode_author(object),
        added_at: text_field(object, "added_at"),
    })
}

fn decode_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn decode_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|tag| !tag.trim().is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// `author` is either a plain display string or `{ "name", "profile_url" }`.
/// A top-level `author_url` supplies the profile when the object form does not.
fn decode_author(object: &Map<String, Value>) -> Author {
    let (name, profile) = match object.get("author") {
        Some(Value::String(name)) => (name.clone(), None),
        Some(Value::Object(author)) => (
            text_field(author, "name"),
            normalize_profile_url(&text_field(author, "profile_url")),
        ),
        _ => (String::new(), None),
    };

    let profile_url =
        profile.or_else(|| normalize_profile_url(&text_field(object, "author_url")));

    Author { name, profile_url }
}

/// Blank values mean "no profile"; a bare host/path gets an https scheme.
fn normalize_profile_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.contains("://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complete_entry_decodes_verbatim() {
        let snippet = decode_entry(&json!({
            "id": "git-rebase",
            "title": "Git rebase",
            "description": "Interactive rebase",
            "language": "Bash",
            "code": "git rebase -i HEAD~3",
            "tags": ["Git"],
            "author": "harun",
            "added_at": "2024-01-02"
        }))
        .unwrap();

        assert_eq!(snippet.id, "git-rebase");
        assert_eq!(snippet.title, "Git rebase");
        assert_eq!(snippet.tags, vec!["Git"]);
        assert_eq!(snippet.author, Author::new("harun"));
        assert_eq!(snippet.added_at, "2024-01-02");
    }

    #[test]
    fn missing_fields_are_repaired_to_empty() {
        let snippet = decode_entry(&json!({ "id": 7, "title": 42, "tags": "Git" })).unwrap();

        assert_eq!(snippet.id, "7");
        assert_eq!(snippet.title, "");
        assert_eq!(snippet.description, "");
        assert_eq!(snippet.code, "");
        assert!(snippet.tags.is_empty());
        assert_eq!(snippet.author, Author::default());
    }

    #[test]
    fn non_string_and_blank_tags_are_dropped() {
        let snippet =
            decode_entry(&json!({ "id": "x", "tags": ["Git", 3, null, "  ", "Network"] }))
                .unwrap();
        assert_eq!(snippet.tags, vec!["Git", "Network"]);
    }

    #[test]
    fn entries_without_id_or_object_shape_are_rejected() {
        assert_eq!(decode_entry(&json!("nope")), Err(RejectReason::NotAnObject));
        assert_eq!(decode_entry(&json!({ "title": "t" })), Err(RejectReason::MissingId));
        assert_eq!(decode_entry(&json!({ "id": "  " })), Err(RejectReason::MissingId));
        assert_eq!(decode_entry(&json!({ "id": true })), Err(RejectReason::MissingId));
    }

    #[test]
    fn plain_author_strings_are_never_turned_into_links() {
        let snippet =
            decode_entry(&json!({ "id": "1", "author": "github.com/chefharun" })).unwrap();
        assert_eq!(snippet.author.name, "github.com/chefharun");
        assert!(!snippet.author.has_profile());
    }

    #[test]
    fn structured_author_carries_profile_url() {
        let snippet = decode_entry(&json!({
            "id": "1",
            "author": { "name": "chefharun", "profile_url": "github.com/chefharun" }
        }))
        .unwrap();
        assert_eq!(
            snippet.author,
            Author::with_profile("chefharun", "https://github.com/chefharun")
        );

        let snippet = decode_entry(&json!({
            "id": "2",
            "author": "chefharun",
            "author_url": "https://github.com/chefharun"
        }))
        .unwrap();
        assert_eq!(
            snippet.author.profile_url.as_deref(),
            Some("https://github.com/chefharun")
        );
    }

    #[test]
    fn duplicate_ids_keep_the_first_entry() {
        let report = decode_entries(vec![
            json!({ "id": "a", "title": "first" }),
            json!({ "id": "a", "title": "second" }),
            json!(12),
        ]);

        assert_eq!(report.collection.len(), 1);
        assert_eq!(report.collection.get("a").unwrap().title, "first");
        assert_eq!(
            report.rejected,
            vec![
                Rejection {
                    index: 1,
                    reason: RejectReason::DuplicateId("a".to_string())
                },
                Rejection {
                    index: 2,
                    reason: RejectReason::NotAnObject
                },
            ]
        );
    }

    #[test]
    fn document_must_be_an_array() {
        assert!(decode_document(r#"{"id": "a"}"#, DocumentFormat::Json).is_err());
        assert!(decode_document("not json", DocumentFormat::Json).is_err());

        let report = decode_document("[]", DocumentFormat::Json).unwrap();
        assert!(report.collection.is_empty());
    }

    #[test]
    fn yaml_documents_share_the_json_shape() {
        let text = "- id: one\n  title: From yaml\n  tags: [Git]\n";
        let report = decode_document(text, DocumentFormat::Yaml).unwrap();
        assert_eq!(report.collection.get("one").unwrap().tags, vec!["Git"]);
    }
}
