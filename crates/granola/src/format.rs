//! Final output strings for notes and transcripts.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::dates::parse_instant;
use crate::model::{Document, TranscriptSegment};

pub const TRANSCRIPT_NOT_AVAILABLE: &str = "Transcript not available for this note.";

/// ISO 8601 timestamp with millisecond precision, e.g. `2024-03-01T09:30:00.000Z`
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
  instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The document's creation time normalised to ISO 8601. Missing values use
/// `now`; values that are not instants are passed through untouched.
pub fn note_date(document: &Document, now: DateTime<Utc>) -> String {
  match document.created_at.as_deref().map(str::trim) {
    Some(raw) if !raw.is_empty() => {
      parse_instant(raw).map(iso_timestamp).unwrap_or_else(|| raw.to_string())
    }
    _ => iso_timestamp(now),
  }
}

pub fn format_note(title: &str, date: &str, content: &str) -> String {
  format!("# {title}\n\n**Date:** {date}\n\n{content}").trim().to_string()
}

pub fn format_transcript(segments: &[TranscriptSegment]) -> String {
  if segments.is_empty() {
    return TRANSCRIPT_NOT_AVAILABLE.to_string();
  }

  let mut formatted = String::new();
  for segment in segments {
    match segment.source.as_str() {
      "microphone" => formatted.push_str("**Me:** "),
      "system" => formatted.push_str("**System:** "),
      _ => {}
    }
    formatted.push_str(&segment.text);
    formatted.push_str("\n\n");
  }

  formatted.trim().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterKind {
  Note,
  Transcript,
}

impl FrontmatterKind {
  fn id_key(self) -> &'static str {
    match self {
      FrontmatterKind::Note => "noteId",
      FrontmatterKind::Transcript => "id",
    }
  }

  fn type_name(self) -> &'static str {
    match self {
      FrontmatterKind::Note => "note",
      FrontmatterKind::Transcript => "transcript",
    }
  }
}

/// Metadata block written ahead of the body in file output mode.
#[derive(Debug, Clone)]
pub struct Frontmatter<'a> {
  pub kind: FrontmatterKind,
  pub title: &'a str,
  pub date: &'a str,
  pub id: &'a str,
}

impl Frontmatter<'_> {
  pub fn render(&self) -> String {
    [
      "---".to_string(),
      format!("title: \"{}\"", self.title.replace('"', "\\\"")),
      format!("date: \"{}\"", self.date),
      format!("{}: \"{}\"", self.kind.id_key(), self.id),
      format!("type: {}", self.kind.type_name()),
      "---".to_string(),
    ]
    .join("\n")
  }

  /// Frontmatter, a blank line, then the body; trimmed as a whole.
  pub fn wrap(&self, body: &str) -> String {
    format!("{}\n\n{body}", self.render()).trim().to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn at(raw: &str) -> DateTime<Utc> {
    parse_instant(raw).unwrap()
  }

  fn segment(source: &str, text: &str) -> TranscriptSegment {
    TranscriptSegment { source: source.to_string(), text: text.to_string(), ..Default::default() }
  }

  #[test]
  fn test_note_date_normalises_created_at() {
    let doc = Document {
      id: "d".into(),
      created_at: Some("2024-03-01T10:15:00+01:00".into()),
      ..Default::default()
    };
    assert_eq!(note_date(&doc, at("2030-01-01T00:00:00Z")), "2024-03-01T09:15:00.000Z");
  }

  #[test]
  fn test_note_date_defaults_to_now() {
    let doc = Document { id: "d".into(), ..Default::default() };
    assert_eq!(note_date(&doc, at("2030-01-01T00:00:00Z")), "2030-01-01T00:00:00.000Z");
  }

  #[test]
  fn test_note_date_passes_through_unparseable_values() {
    let doc =
      Document { id: "d".into(), created_at: Some("yesterday-ish".into()), ..Default::default() };
    assert_eq!(note_date(&doc, at("2030-01-01T00:00:00Z")), "yesterday-ish");
  }

  #[test]
  fn test_format_note() {
    let body = format_note("Retro", "2024-03-01T09:00:00.000Z", "Went well\n\n");
    assert_eq!(body, "# Retro\n\n**Date:** 2024-03-01T09:00:00.000Z\n\nWent well");
  }

  #[test]
  fn test_format_note_without_content_is_still_valid() {
    let body = format_note("Empty", "2024-03-01T09:00:00.000Z", "");
    assert_eq!(body, "# Empty\n\n**Date:** 2024-03-01T09:00:00.000Z");
  }

  #[test]
  fn test_transcript_labels_speakers_in_order() {
    let segments = vec![
      segment("microphone", "Hello there"),
      segment("system", "Hi!"),
      segment("speaker-3", "Unlabelled"),
      segment("microphone", "Bye"),
    ];
    assert_eq!(
      format_transcript(&segments),
      "**Me:** Hello there\n\n**System:** Hi!\n\nUnlabelled\n\n**Me:** Bye"
    );
  }

  #[test]
  fn test_empty_transcript_sentinel() {
    assert_eq!(format_transcript(&[]), "Transcript not available for this note.");
  }

  #[test]
  fn test_note_frontmatter() {
    let frontmatter = Frontmatter {
      kind: FrontmatterKind::Note,
      title: "The \"big\" meeting",
      date: "2024-03-01T09:00:00.000Z",
      id: "doc-1",
    };
    assert_eq!(
      frontmatter.wrap("# Body"),
      "---\ntitle: \"The \\\"big\\\" meeting\"\ndate: \"2024-03-01T09:00:00.000Z\"\n\
       noteId: \"doc-1\"\ntype: note\n---\n\n# Body"
    );
  }

  #[test]
  fn test_transcript_frontmatter_uses_id_key() {
    let rendered = Frontmatter {
      kind: FrontmatterKind::Transcript,
      title: "Call",
      date: "2024-03-01T09:00:00.000Z",
      id: "doc-2",
    }
    .render();
    assert!(rendered.contains("\nid: \"doc-2\"\n"));
    assert!(rendered.contains("\ntype: transcript\n"));
    assert!(!rendered.contains("noteId"));
  }
}
