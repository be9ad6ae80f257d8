//! Collaborators the notes service depends on: where documents come from and
//! where file output goes.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::model::{Document, PanelsByDocId, TranscriptSegment};

/// Remote source of notes, panels and transcripts. Every call returns a fresh
/// snapshot; nothing is cached between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesSource: Send + Sync {
  async fn fetch_document_list(&self) -> Result<Vec<Document>>;

  async fn fetch_document_batch(&self, ids: &[String]) -> Result<Vec<Document>>;

  async fn fetch_transcript_segments(&self, doc_id: &str) -> Result<Vec<TranscriptSegment>>;

  /// `None` when the remote has no panels for the document
  async fn fetch_document_panels(&self, doc_id: &str) -> Result<Option<PanelsByDocId>>;
}

/// Destination for file output mode.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileSink: Send + Sync {
  /// Write `content` to `path`, creating parent directories as needed
  async fn write_text_file(&self, path: &Path, content: &str) -> Result<()>;
}
