//! Tool definitions advertised by `tools/list` and the dispatch behind
//! `tools/call`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use granola::{
  ContentType, FileSink, GetNoteInput, GetTranscriptInput, ListCriteria, NotesService, NotesSource,
};

pub const LIST_NOTES: &str = "list-notes";
pub const LIST_TRANSCRIPTS: &str = "list-transcripts";
pub const GET_NOTE: &str = "get-note";
pub const GET_TRANSCRIPT: &str = "get-transcript";

/// Text returned to the client from a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
  pub text: String,
  pub is_error: bool,
}

impl ToolOutcome {
  fn ok(text: String) -> Self {
    Self { text, is_error: false }
  }

  fn error(text: String) -> Self {
    Self { text, is_error: true }
  }

  pub fn into_result(self) -> Value {
    let content = json!([{ "type": "text", "text": self.text }]);
    if self.is_error {
      json!({ "content": content, "isError": true })
    } else {
      json!({ "content": content })
    }
  }
}

fn list_schema(description: &str) -> Value {
  json!({
    "type": "object",
    "properties": {
      "date": {
        "type": "string",
        "description": format!(
          "{description} on a single day: 'today', 'yesterday', 'last week', \
           'last month' or YYYY-MM-DD"
        )
      },
      "startDate": {
        "type": "string",
        "description": "Only include meetings on or after this day (YYYY-MM-DD)"
      },
      "endDate": {
        "type": "string",
        "description": "Only include meetings on or before this day (YYYY-MM-DD)"
      },
      "limit": {
        "type": "number",
        "description": "Maximum number of results (default 25)"
      }
    }
  })
}

pub fn tool_definitions() -> Vec<Value> {
  vec![
    json!({
      "name": LIST_NOTES,
      "description": "List Granola meeting notes, newest first",
      "inputSchema": list_schema("Only include notes"),
    }),
    json!({
      "name": LIST_TRANSCRIPTS,
      "description": "List Granola meetings that may have transcripts, newest first",
      "inputSchema": list_schema("Only include meetings"),
    }),
    json!({
      "name": GET_NOTE,
      "description": "Get a Granola note as markdown, optionally writing it to a file",
      "inputSchema": {
        "type": "object",
        "properties": {
          "noteId": { "type": "string", "description": "Id of the note" },
          "contentType": {
            "type": "string",
            "enum": [
              ContentType::Enhanced.to_string(),
              ContentType::Original.to_string(),
              ContentType::Auto.to_string()
            ],
            "description":
              "enhanced: AI notes, original: your own notes, auto: best available (default)"
          },
          "path": {
            "type": "string",
            "description": "Write the note to this file instead of returning it"
          }
        },
        "required": ["noteId"]
      }
    }),
    json!({
      "name": GET_TRANSCRIPT,
      "description": "Get the transcript of a Granola meeting, optionally writing it to a file",
      "inputSchema": {
        "type": "object",
        "properties": {
          "noteId": { "type": "string", "description": "Id of the note" },
          "path": {
            "type": "string",
            "description": "Write the transcript to this file instead of returning it"
          }
        },
        "required": ["noteId"]
      }
    }),
  ]
}

pub async fn call_tool<S: NotesSource, W: FileSink>(
  service: &NotesService<S, W>,
  name: &str,
  args: Value,
) -> ToolOutcome {
  tracing::info!(tool = name, "tool call");

  match name {
    LIST_NOTES => match decode::<ListCriteria>(name, args) {
      Ok(criteria) => json_outcome(service.list_notes(&criteria).await),
      Err(outcome) => outcome,
    },
    LIST_TRANSCRIPTS => match decode::<ListCriteria>(name, args) {
      Ok(criteria) => json_outcome(service.list_transcripts(&criteria).await),
      Err(outcome) => outcome,
    },
    GET_NOTE => match decode::<GetNoteInput>(name, args) {
      Ok(input) => text_outcome(service.get_note(&input).await),
      Err(outcome) => outcome,
    },
    GET_TRANSCRIPT => match decode::<GetTranscriptInput>(name, args) {
      Ok(input) => text_outcome(service.get_transcript(&input).await),
      Err(outcome) => outcome,
    },
    _ => {
      tracing::warn!(tool = name, "unknown tool");
      ToolOutcome::error(format!("Unknown tool: {name}"))
    }
  }
}

fn decode<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolOutcome> {
  serde_json::from_value(args)
    .map_err(|e| ToolOutcome::error(format!("Error: Invalid arguments for {tool}: {e}")))
}

fn text_outcome(result: granola::Result<String>) -> ToolOutcome {
  match result {
    Ok(text) => ToolOutcome::ok(text),
    Err(e) => failure(e),
  }
}

fn json_outcome<T: Serialize>(result: granola::Result<T>) -> ToolOutcome {
  match result.and_then(|value| Ok(serde_json::to_string_pretty(&value)?)) {
    Ok(text) => ToolOutcome::ok(text),
    Err(e) => failure(e),
  }
}

fn failure(error: granola::GranolaError) -> ToolOutcome {
  tracing::error!(error = %error, "tool call failed");
  ToolOutcome::error(format!("Error: {error}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_definitions_cover_every_tool() {
    let names: Vec<_> = tool_definitions()
      .iter()
      .map(|tool| tool["name"].as_str().unwrap_or_default().to_string())
      .collect();
    assert_eq!(names, vec![LIST_NOTES, LIST_TRANSCRIPTS, GET_NOTE, GET_TRANSCRIPT]);
  }

  #[test]
  fn test_get_note_schema() {
    let definitions = tool_definitions();
    let schema = &definitions[2]["inputSchema"];
    assert_eq!(schema["required"], json!(["noteId"]));
    assert_eq!(
      schema["properties"]["contentType"]["enum"],
      json!(["enhanced", "original", "auto"])
    );
  }

  #[test]
  fn test_error_outcome_sets_flag() {
    let result = ToolOutcome::error("Unknown tool: nope".to_string()).into_result();
    assert_eq!(result["isError"], true);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "Unknown tool: nope");
  }

  #[test]
  fn test_success_outcome_omits_flag() {
    let result = ToolOutcome::ok("hello".to_string()).into_result();
    assert!(result.get("isError").is_none());
  }
}
