//! Markdown rendering of rich-text node trees.
//!
//! Rendering is total: unknown node kinds, missing children and missing text
//! all render as empty strings. Output is not trimmed here.

use crate::model::{ContentNode, DocumentStructure};

const BLANK_LINE: &str = "\n\n";
const ATTACHMENT_SEPARATOR: &str = " \n\n ";

pub fn render_node(node: Option<&ContentNode>) -> String {
  let Some(node) = node else {
    return String::new();
  };

  match node.kind.as_str() {
    "doc" | "bulletList" => render_children(node, ""),
    "paragraph" => format!("{}{BLANK_LINE}", render_children(node, " ")),
    "heading" => {
      let level = node.attrs.as_ref().and_then(|a| a.level).filter(|l| *l > 0).unwrap_or(1);
      format!("{} {} {BLANK_LINE}", "#".repeat(level as usize), render_children(node, " "))
    }
    "listItem" => format!("- {} {BLANK_LINE}", render_children(node, " ")),
    "text" => node.text.clone().unwrap_or_default(),
    "horizontalRule" => format!("--- {BLANK_LINE}"),
    _ => String::new(),
  }
}

fn render_children(node: &ContentNode, separator: &str) -> String {
  node.children().iter().map(|child| render_node(Some(child))).collect::<Vec<_>>().join(separator)
}

/// Render a document structure: a `doc` tree directly, or each attachment's
/// JSON-encoded node tree joined by a spaced blank line. Attachments that do
/// not parse are skipped.
pub fn render_structure(structure: Option<&DocumentStructure>) -> String {
  let Some(structure) = structure else {
    return String::new();
  };

  if structure.is_doc() {
    let root = ContentNode {
      kind: "doc".to_string(),
      content: Some(structure.content.clone()),
      ..Default::default()
    };
    return render_node(Some(&root));
  }

  structure
    .attachments
    .iter()
    .filter_map(|attachment| match serde_json::from_str::<ContentNode>(&attachment.content) {
      Ok(node) => Some(render_node(Some(&node))),
      Err(e) => {
        tracing::warn!(name = %attachment.name, error = %e, "skipping unparseable attachment");
        None
      }
    })
    .collect::<Vec<_>>()
    .join(ATTACHMENT_SEPARATOR)
}
