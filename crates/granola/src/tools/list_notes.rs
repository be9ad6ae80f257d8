use crate::dates::{filter_and_sort, ListCriteria};
use crate::error::Result;
use crate::model::Document;
use crate::source::{FileSink, NotesSource};

use super::{NoteListItem, NotesService};

impl<S: NotesSource, W: FileSink> NotesService<S, W> {
  /// Notes matching the criteria, newest first.
  pub async fn list_notes(&self, criteria: &ListCriteria) -> Result<Vec<NoteListItem>> {
    let documents = self.matching_documents(criteria).await?;
    Ok(documents.iter().map(NoteListItem::from).collect())
  }

  pub(super) async fn matching_documents(&self, criteria: &ListCriteria) -> Result<Vec<Document>> {
    let documents = self.source.fetch_document_list().await?;
    let total = documents.len();

    let matching = filter_and_sort(documents, criteria, self.config.default_limit)?;
    tracing::info!(total, returned = matching.len(), "listed notes");
    Ok(matching)
  }
}

impl From<&Document> for NoteListItem {
  fn from(document: &Document) -> Self {
    Self {
      id: document.id.clone(),
      title: document.display_title().to_string(),
      date: document.created_at.clone().unwrap_or_default(),
    }
  }
}
