//! Picks the single best textual representation of a document.
//!
//! Each [`ContentType`] maps to an ordered list of [`ContentSource`]s. Sources
//! are tried lazily in order and the first one yielding an accepted
//! (non-blank, not `"undefined"`) string wins. Missing data at any stage just
//! moves on to the next source.

use std::fmt;

use crate::model::{Document, PanelsByDocId};
use crate::render::render_structure;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentType {
  /// AI-enhanced panel content, falling back to structured notes
  Enhanced,
  /// The user's own notes as pre-rendered markdown
  Original,
  #[default]
  Auto,
}

impl ContentType {
  pub fn fallback_order(self) -> &'static [ContentSource] {
    match self {
      ContentType::Original => &[ContentSource::MarkdownNotes],
      ContentType::Enhanced => &[ContentSource::EnhancedPanel, ContentSource::StructuredNotes],
      ContentType::Auto => &[
        ContentSource::EnhancedPanel,
        ContentSource::StructuredNotes,
        ContentSource::MarkdownNotes,
      ],
    }
  }
}

/// Unrecognised names select `Auto`.
impl From<&str> for ContentType {
  fn from(value: &str) -> Self {
    match value {
      "enhanced" => ContentType::Enhanced,
      "original" => ContentType::Original,
      _ => ContentType::Auto,
    }
  }
}

impl fmt::Display for ContentType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ContentType::Enhanced => "enhanced",
      ContentType::Original => "original",
      ContentType::Auto => "auto",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
  EnhancedPanel,
  StructuredNotes,
  MarkdownNotes,
}

impl ContentSource {
  /// Produce this source's accepted candidate, if any.
  pub fn extract(self, document: &Document, panels: Option<&PanelsByDocId>) -> Option<String> {
    match self {
      ContentSource::EnhancedPanel => enhanced_panel_content(document, panels),
      ContentSource::StructuredNotes => structured_notes_content(document),
      ContentSource::MarkdownNotes => {
        document.notes_markdown.as_deref().and_then(sanitize).map(str::to_string)
      }
    }
  }
}

/// Accept a candidate unless it is blank or the literal `undefined`.
/// Accepted values are returned verbatim.
pub fn sanitize(value: &str) -> Option<&str> {
  let trimmed = value.trim();
  if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("undefined") {
    None
  } else {
    Some(value)
  }
}

pub fn resolve(
  document: &Document,
  panels: Option<&PanelsByDocId>,
  content_type: ContentType,
) -> String {
  content_type
    .fallback_order()
    .iter()
    .find_map(|source| {
      let content = source.extract(document, panels);
      if content.is_some() {
        tracing::debug!(document_id = %document.id, ?source, "resolved note content");
      }
      content
    })
    .unwrap_or_default()
}

/// Content of the document's first panel: its rendered structure, else its
/// raw original content.
fn enhanced_panel_content(document: &Document, panels: Option<&PanelsByDocId>) -> Option<String> {
  let (_, panel) = panels?.get(&document.id)?.first()?;

  let rendered = panel
    .content
    .as_ref()
    .filter(|structure| structure.has_content())
    .map(|structure| render_structure(Some(structure)));

  rendered
    .as_deref()
    .and_then(sanitize)
    .or_else(|| panel.original_content.as_deref().and_then(sanitize))
    .map(str::to_string)
}

fn structured_notes_content(document: &Document) -> Option<String> {
  let notes = document.notes.as_ref().filter(|notes| !notes.content.is_empty())?;
  sanitize(&render_structure(Some(notes))).map(str::to_string)
}
