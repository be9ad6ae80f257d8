//! The four operations exposed to the tool-dispatch layer.
//!
//! [`NotesService`] wires a [`NotesSource`] and a [`FileSink`] to the pure
//! resolution, filtering and formatting code. Each call is independent.

use serde::{Deserialize, Serialize};

use crate::config::GranolaConfig;
use crate::source::{FileSink, NotesSource};

mod get_note;
mod get_transcript;
mod list_notes;
mod list_transcripts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteListItem {
  pub id: String,
  pub title: String,
  pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptListItem {
  pub note_id: String,
  pub title: String,
  pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNoteInput {
  pub note_id: String,
  /// `enhanced`, `original` or `auto`; anything else means `auto`
  #[serde(default)]
  pub content_type: Option<String>,
  /// Write to this file instead of returning the note inline
  #[serde(default)]
  pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTranscriptInput {
  pub note_id: String,
  #[serde(default)]
  pub path: Option<String>,
}

pub struct NotesService<S, W> {
  source: S,
  sink: W,
  config: GranolaConfig,
}

impl<S: NotesSource, W: FileSink> NotesService<S, W> {
  pub fn new(source: S, sink: W, config: GranolaConfig) -> Self {
    Self { source, sink, config }
  }
}

/// Confirmation returned instead of the body in file output mode
fn written_to(path: &str) -> String {
  format!("Written to {path}")
}

/// A blank path means inline output
fn output_path(path: &Option<String>) -> Option<&str> {
  path.as_deref().map(str::trim).filter(|p| !p.is_empty())
}
