use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use super::{KnowledgeSource, Library, MemoryItem};

pub fn load_library(knowledge_path: Option<&Path>, memories_path: Option<&Path>) -> Result<Library> {
    let knowledge = match knowledge_path {
        Some(path) => read_records::<KnowledgeSource>(path, "knowledge source")?,
        None => Vec::new(),
    };
    let memories = match memories_path {
        Some(path) => read_records::<MemoryItem>(path, "memory")?,
        None => Vec::new(),
    };

    let library = Library {
        knowledge,
        memories,
    };
    if library.is_empty() {
        warn!("no knowledge sources or memories were loaded");
    } else {
        info!(
            knowledge = library.knowledge.len(),
            memories = library.memories.len(),
            "loaded record library"
        );
    }

    Ok(library)
}

fn read_records<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {kind} records from {}", path.display()))?;
    parse_records(&raw, kind)
        .with_context(|| format!("failed to parse {kind} records in {}", path.display()))
}

pub(super) fn parse_records<T: DeserializeOwned>(raw: &str, kind: &str) -> Result<Vec<T>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON")?;
    let entries = parsed
        .as_array()
        .ok_or_else(|| anyhow!("expected a JSON array of {kind} records"))?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<T>(entry.clone()) {
            Ok(record) => records.push(record),
            Err(error) => warn!(index, %error, "skipping malformed {kind} record"),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_malformed_entries() {
        let raw = r#"[
            {"id": "m1", "content": "first", "tags": ["ia"], "importance": 8},
            {"content": "missing id"},
            {"id": "m3", "content": "third", "importance": "high"},
            {"id": "m4", "content": "fourth", "importance": 6}
        ]"#;

        let memories = parse_records::<MemoryItem>(raw, "memory").unwrap();
        let ids = memories.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["m1", "m4"]);
    }

    #[test]
    fn rejects_non_array_documents() {
        let error = parse_records::<KnowledgeSource>(r#"{"id": "k1"}"#, "knowledge source")
            .unwrap_err();
        assert!(error.to_string().contains("JSON array"));

        assert!(parse_records::<KnowledgeSource>("not json", "knowledge source").is_err());
    }

    #[test]
    fn absent_paths_yield_an_empty_library() {
        let library = load_library(None, None).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn loads_demo_records() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

        let library = load_library(
            Some(&demos.join("knowledge.json")),
            Some(&demos.join("memories.json")),
        )
        .unwrap();

        assert_eq!(library.knowledge.len(), 5);
        assert_eq!(library.memories.len(), 6);
        assert!(library.knowledge[4].tag_set().is_empty());
        assert!(library.memories[5].tag_set().is_empty());
    }

    #[test]
    fn unreadable_path_reports_context() {
        let error = load_library(Some(Path::new("/nonexistent/knowledge.json")), None)
            .unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/knowledge.json"));
    }
}
