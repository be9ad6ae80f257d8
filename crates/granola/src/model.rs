//! Read-only snapshots of the remote data: documents, their structured notes,
//! AI-enhanced panels and transcript segments.
//!
//! Auxiliary content (structured notes, panel bodies) is deserialized
//! leniently: a value of the wrong shape becomes `None` instead of failing
//! the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Deserialize an optional field, treating a malformed value as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
  pub level: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub href: Option<String>,
}

/// One node of a rich-text tree. `kind` is open-ended; unknown kinds render
/// as nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
  #[serde(rename = "type", default)]
  pub kind: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub attrs: Option<NodeAttrs>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<Vec<ContentNode>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
}

impl ContentNode {
  pub fn new(kind: impl Into<String>) -> Self {
    Self { kind: kind.into(), ..Default::default() }
  }

  pub fn text(text: impl Into<String>) -> Self {
    Self { kind: "text".to_string(), text: Some(text.into()), ..Default::default() }
  }

  pub fn with_children(mut self, children: Vec<ContentNode>) -> Self {
    self.content = Some(children);
    self
  }

  pub fn with_level(mut self, level: u32) -> Self {
    self.attrs.get_or_insert_with(NodeAttrs::default).level = Some(level);
    self
  }

  pub fn children(&self) -> &[ContentNode] {
    self.content.as_deref().unwrap_or(&[])
  }
}

/// A rich-text payload whose `content` is itself a JSON-encoded [`ContentNode`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub kind: String,
  #[serde(default)]
  pub name: String,
}

/// Either a `doc` node tree or a container of attachments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(default)]
  pub content: Vec<ContentNode>,
  #[serde(default)]
  pub attachments: Vec<Attachment>,
}

impl DocumentStructure {
  pub fn doc(content: Vec<ContentNode>) -> Self {
    Self { kind: Some("doc".to_string()), content, attachments: Vec::new() }
  }

  pub fn is_doc(&self) -> bool {
    self.kind.as_deref() == Some("doc")
  }

  pub fn has_content(&self) -> bool {
    !self.content.is_empty() || !self.attachments.is_empty()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub id: String,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub notes: Option<DocumentStructure>,
  #[serde(default, deserialize_with = "lenient")]
  pub notes_markdown: Option<String>,
  /// Plain-text rendering of the user's notes. Never used as note content:
  /// it loses the formatting that `notes_markdown` keeps.
  #[serde(default, deserialize_with = "lenient")]
  pub notes_plain: Option<String>,
}

impl Document {
  /// Title shown to users, `Untitled` when missing or blank
  pub fn display_title(&self) -> &str {
    match self.title.as_deref() {
      Some(title) if !title.trim().is_empty() => title,
      _ => "Untitled",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelContent {
  #[serde(default, deserialize_with = "lenient")]
  pub original_content: Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub content: Option<DocumentStructure>,
}

/// Panels of one document, in the order the remote returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelsByPanelId {
  entries: Vec<(String, PanelContent)>,
}

impl PanelsByPanelId {
  /// Convert a raw JSON map, dropping panels that do not deserialize.
  pub fn from_json_map(map: Map<String, Value>) -> Self {
    map
      .into_iter()
      .filter_map(|(panel_id, raw)| match serde_json::from_value::<PanelContent>(raw) {
        Ok(panel) => Some((panel_id, panel)),
        Err(e) => {
          tracing::warn!(panel_id = %panel_id, error = %e, "dropping malformed panel");
          None
        }
      })
      .collect()
  }

  /// The first panel in remote order. If the remote ever returns several
  /// panels for a document, which one is "first" is up to the remote.
  pub fn first(&self) -> Option<(&str, &PanelContent)> {
    self.entries.first().map(|(id, panel)| (id.as_str(), panel))
  }

  pub fn get(&self, panel_id: &str) -> Option<&PanelContent> {
    self.entries.iter().find(|(id, _)| id == panel_id).map(|(_, panel)| panel)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl FromIterator<(String, PanelContent)> for PanelsByPanelId {
  fn from_iter<I: IntoIterator<Item = (String, PanelContent)>>(iter: I) -> Self {
    Self { entries: iter.into_iter().collect() }
  }
}

impl<'de> Deserialize<'de> for PanelsByPanelId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let map = Map::<String, Value>::deserialize(deserializer)?;
    Ok(Self::from_json_map(map))
  }
}

/// Panels keyed by document id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelsByDocId {
  entries: Vec<(String, PanelsByPanelId)>,
}

impl PanelsByDocId {
  pub fn single(doc_id: impl Into<String>, panels: PanelsByPanelId) -> Self {
    Self { entries: vec![(doc_id.into(), panels)] }
  }

  pub fn get(&self, doc_id: &str) -> Option<&PanelsByPanelId> {
    self.entries.iter().find(|(id, _)| id == doc_id).map(|(_, panels)| panels)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
  #[serde(default)]
  pub document_id: String,
  #[serde(default)]
  pub start_timestamp: String,
  #[serde(default)]
  pub end_timestamp: String,
  #[serde(default)]
  pub text: String,
  #[serde(default)]
  pub source: String,
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub is_final: bool,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_document_with_malformed_notes_still_parses() {
    let doc: Document = serde_json::from_value(json!({
      "id": "doc-1",
      "title": "Standup",
      "notes": "this should have been an object",
      "notes_markdown": null
    }))
    .unwrap();

    assert_eq!(doc.id, "doc-1");
    assert!(doc.notes.is_none());
    assert!(doc.notes_markdown.is_none());
  }

  #[test]
  fn test_display_title_defaults_to_untitled() {
    let mut doc = Document { id: "x".to_string(), ..Default::default() };
    assert_eq!(doc.display_title(), "Untitled");
    doc.title = Some("   ".to_string());
    assert_eq!(doc.display_title(), "Untitled");
    doc.title = Some("Planning".to_string());
    assert_eq!(doc.display_title(), "Planning");
  }

  #[test]
  fn test_panels_preserve_remote_order() {
    let panels: PanelsByPanelId = serde_json::from_value(json!({
      "zeta": {"original_content": "<p>z</p>"},
      "alpha": {"original_content": "<p>a</p>"}
    }))
    .unwrap();

    let (first_id, _) = panels.first().unwrap();
    assert_eq!(first_id, "zeta");
    assert_eq!(panels.len(), 2);
  }

  #[test]
  fn test_malformed_panel_is_dropped() {
    let panels: PanelsByPanelId = serde_json::from_value(json!({
      "broken": 42,
      "ok": {"original_content": "fine"}
    }))
    .unwrap();

    assert_eq!(panels.len(), 1);
    assert!(panels.get("broken").is_none());
    assert_eq!(panels.get("ok").unwrap().original_content.as_deref(), Some("fine"));
  }

  #[test]
  fn test_panel_with_malformed_content_keeps_original() {
    let panel: PanelContent = serde_json::from_value(json!({
      "original_content": "raw",
      "content": [1, 2, 3]
    }))
    .unwrap();

    assert!(panel.content.is_none());
    assert_eq!(panel.original_content.as_deref(), Some("raw"));
  }

  #[test]
  fn test_content_node_tree_parses() {
    let node: ContentNode = serde_json::from_value(json!({
      "type": "heading",
      "attrs": {"id": "h1", "level": 2},
      "content": [{"type": "text", "text": "Hi"}]
    }))
    .unwrap();

    assert_eq!(node.kind, "heading");
    assert_eq!(node.attrs.unwrap().level, Some(2));
    assert_eq!(node.content.unwrap()[0].text.as_deref(), Some("Hi"));
  }
}
