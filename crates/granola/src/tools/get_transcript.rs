use chrono::Utc;
use std::path::Path;

use crate::error::Result;
use crate::format::{format_transcript, iso_timestamp, note_date, Frontmatter, FrontmatterKind};
use crate::source::{FileSink, NotesSource};

use super::{output_path, written_to, GetTranscriptInput, NotesService};

impl<S: NotesSource, W: FileSink> NotesService<S, W> {
  pub async fn get_transcript(&self, input: &GetTranscriptInput) -> Result<String> {
    let note_id = input.note_id.as_str();
    let segments = self.source.fetch_transcript_segments(note_id).await?;
    let body = format_transcript(&segments);
    tracing::info!(note_id, segments = segments.len(), "fetched transcript");

    let path = match output_path(&input.path) {
      Some(path) if !segments.is_empty() => path,
      _ => return Ok(body),
    };

    let (title, date) = match self.fetch_document(note_id).await? {
      Some(document) => (document.display_title().to_string(), note_date(&document, Utc::now())),
      None => ("Untitled".to_string(), iso_timestamp(Utc::now())),
    };

    let frontmatter =
      Frontmatter { kind: FrontmatterKind::Transcript, title: &title, date: &date, id: note_id };
    self.sink.write_text_file(Path::new(path), &frontmatter.wrap(&body)).await?;
    Ok(written_to(path))
  }
}
