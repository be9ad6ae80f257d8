//! Read-only access to Granola meeting notes and transcripts.
//!
//! Documents are fetched from the Granola API ([`client`]), their best
//! content is picked ([`resolve`]) and rendered to markdown ([`render`]),
//! then formatted for output ([`format`]). [`tools::NotesService`] ties these
//! together into the operations the MCP server exposes.

pub mod auth;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod format;
pub mod model;
pub mod output;
pub mod render;
pub mod resolve;
pub mod source;
pub mod tools;

pub use client::GranolaClient;
pub use config::GranolaConfig;
pub use dates::ListCriteria;
pub use error::{GranolaError, Result};
pub use output::FsSink;
pub use resolve::ContentType;
pub use source::{FileSink, NotesSource};
pub use tools::{
  GetNoteInput, GetTranscriptInput, NoteListItem, NotesService, TranscriptListItem,
};
