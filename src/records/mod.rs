mod load;

use std::collections::BTreeSet;

use serde::Deserialize;

pub use load::load_library;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Pdf,
    Url,
    Text,
    File,
    #[default]
    #[serde(other)]
    Other,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF document",
            Self::Url => "Web page",
            Self::Text => "Text note",
            Self::File => "File",
            Self::Other => "Other source",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeSource {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source_kind: SourceKind,
}

impl KnowledgeSource {
    pub fn tag_set(&self) -> BTreeSet<String> {
        tag_set(self.tags.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryItem {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub importance: f32,
}

impl MemoryItem {
    pub fn tag_set(&self) -> BTreeSet<String> {
        tag_set(self.tags.as_deref())
    }
}

fn tag_set(tags: Option<&[String]>) -> BTreeSet<String> {
    tags.unwrap_or_default().iter().cloned().collect()
}

/// The two record collections the graph is built from, exactly as the storage
/// collaborator handed them over.
#[derive(Clone, Debug, Default)]
pub struct Library {
    pub knowledge: Vec<KnowledgeSource>,
    pub memories: Vec<MemoryItem>,
}

impl Library {
    pub fn is_empty(&self) -> bool {
        self.knowledge.is_empty() && self.memories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_null_tags_become_empty_sets() {
        let source: KnowledgeSource =
            serde_json::from_str(r#"{"id": "k1", "title": "Guide", "tags": null}"#).unwrap();
        assert!(source.tag_set().is_empty());

        let memory: MemoryItem =
            serde_json::from_str(r#"{"id": "m1", "content": "hello", "importance": 7}"#).unwrap();
        assert!(memory.tag_set().is_empty());
        assert_eq!(memory.importance, 7.0);
    }

    #[test]
    fn duplicate_tags_collapse() {
        let memory = MemoryItem {
            id: "m1".to_owned(),
            tags: Some(vec!["ia".to_owned(), "ia".to_owned(), "rust".to_owned()]),
            ..MemoryItem::default()
        };
        assert_eq!(memory.tag_set().len(), 2);
    }

    #[test]
    fn unknown_source_kind_falls_back_to_other() {
        let source: KnowledgeSource = serde_json::from_str(
            r#"{"id": "k1", "title": "Talk", "sourceKind": "podcast"}"#,
        )
        .unwrap();
        assert_eq!(source.source_kind, SourceKind::Other);

        let source: KnowledgeSource =
            serde_json::from_str(r#"{"id": "k2", "title": "Paper", "sourceKind": "pdf"}"#)
                .unwrap();
        assert_eq!(source.source_kind, SourceKind::Pdf);
    }
}
