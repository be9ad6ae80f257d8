use chrono::Utc;
use std::path::Path;

use crate::error::Result;
use crate::format::{format_note, note_date, Frontmatter, FrontmatterKind};
use crate::model::Document;
use crate::resolve::{resolve, ContentType};
use crate::source::{FileSink, NotesSource};

use super::{output_path, written_to, GetNoteInput, NotesService};

impl<S: NotesSource, W: FileSink> NotesService<S, W> {
  /// A single note as markdown, inline or written to `input.path`.
  pub async fn get_note(&self, input: &GetNoteInput) -> Result<String> {
    let note_id = input.note_id.as_str();
    let content_type = input.content_type.as_deref().map(ContentType::from).unwrap_or_default();

    let Some(document) = self.fetch_document(note_id).await? else {
      tracing::warn!(note_id, "note not found");
      return Ok(format!("Note not found: {note_id}"));
    };

    let panels = match content_type {
      ContentType::Original => None,
      ContentType::Enhanced | ContentType::Auto => {
        self.source.fetch_document_panels(note_id).await?
      }
    };

    let content = resolve(&document, panels.as_ref(), content_type);
    let title = document.display_title();
    let date = note_date(&document, Utc::now());
    let body = format_note(title, &date, &content);
    tracing::info!(note_id, %content_type, chars = content.len(), "resolved note");

    match output_path(&input.path) {
      None => Ok(body),
      Some(path) => {
        let frontmatter =
          Frontmatter { kind: FrontmatterKind::Note, title, date: &date, id: note_id };
        self.sink.write_text_file(Path::new(path), &frontmatter.wrap(&body)).await?;
        Ok(written_to(path))
      }
    }
  }

  /// The document with `note_id`, or the first one returned when the batch
  /// answers under a different id.
  pub(super) async fn fetch_document(&self, note_id: &str) -> Result<Option<Document>> {
    let mut documents = self.source.fetch_document_batch(&[note_id.to_string()]).await?;
    let position = documents.iter().position(|doc| doc.id == note_id).unwrap_or(0);

    if documents.is_empty() {
      Ok(None)
    } else {
      Ok(Some(documents.swap_remove(position)))
    }
  }
}
