use crate::dates::ListCriteria;
use crate::error::Result;
use crate::model::Document;
use crate::source::{FileSink, NotesSource};

use super::{NotesService, TranscriptListItem};

impl<S: NotesSource, W: FileSink> NotesService<S, W> {
  /// Meetings that may have transcripts.
  ///
  /// This is the note listing under another shape: checking that a
  /// transcript really exists would cost one fetch per note.
  pub async fn list_transcripts(&self, criteria: &ListCriteria) -> Result<Vec<TranscriptListItem>> {
    let documents = self.matching_documents(criteria).await?;
    Ok(documents.iter().map(TranscriptListItem::from).collect())
  }
}

impl From<&Document> for TranscriptListItem {
  fn from(document: &Document) -> Self {
    Self {
      note_id: document.id.clone(),
      title: document.display_title().to_string(),
      date: document.created_at.clone().unwrap_or_default(),
    }
  }
}
