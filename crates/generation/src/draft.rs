//! Parsing of generation replies into draft slides.
//!
//! Models are asked for JSON but are loose about the envelope. Accepted
//! shapes, optionally wrapped in a markdown code fence:
//!
//! - `[{"title": ..., "content": ..., "slide_type": ..., "layout": ...}, ...]`
//! - `{"slides": [ ... ]}`
//! - a single slide object, or `{"slide": { ... }}` (single-slide replies)
//!
//! `content` may be a string or an array of bullet strings. `type` is
//! accepted as an alias of `slide_type`. Unknown slide types fall back to
//! CONTENT and unknown layouts to none.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slidecraft_core::slide::{SlideLayout, SlideType};

use crate::error::GenerationError;

/// One generated slide, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSlide {
    pub title: String,
    pub content: String,
    pub slide_type: SlideType,
    pub layout: Option<SlideLayout>,
}

impl DraftSlide {
    /// The draft's layout, or the slide type's default when none was given.
    pub fn resolved_layout(&self) -> SlideLayout {
        self.layout
            .unwrap_or_else(|| self.slide_type.default_layout())
    }
}

#[derive(Debug, Deserialize)]
struct RawSlide {
    title: Option<String>,
    content: Option<Value>,
    #[serde(alias = "type")]
    slide_type: Option<String>,
    layout: Option<String>,
}

/// Parse a deck reply into at least one draft slide.
pub fn parse_deck(reply: &str) -> Result<Vec<DraftSlide>, GenerationError> {
    drafts_from_value(parse_json(reply)?)
}

/// Parse a single-slide reply. A deck-shaped reply yields its first slide.
pub fn parse_slide(reply: &str) -> Result<DraftSlide, GenerationError> {
    let value = match parse_json(reply)? {
        Value::Object(mut map) if map.contains_key("slide") => {
            map.remove("slide").unwrap_or(Value::Null)
        }
        other => other,
    };

    let single = matches!(&value, Value::Object(map) if !map.contains_key("slides"));
    if single {
        return into_draft(value);
    }
    drafts_from_value(value)?
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::Malformed("no slide generated".to_string()))
}

fn drafts_from_value(value: Value) -> Result<Vec<DraftSlide>, GenerationError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("slides") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(GenerationError::Malformed(
                    "`slides` is not an array".to_string(),
                ))
            }
            None => vec![Value::Object(map)],
        },
        _ => {
            return Err(GenerationError::Malformed(
                "expected a JSON array or object".to_string(),
            ))
        }
    };

    if items.is_empty() {
        return Err(GenerationError::Malformed("no slides generated".to_string()));
    }
    items.into_iter().map(into_draft).collect()
}

fn parse_json(reply: &str) -> Result<Value, GenerationError> {
    serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| GenerationError::Malformed(format!("reply is not valid JSON: {e}")))
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string (e.g. `json`) up to the first newline.
    let body = rest.find('\n').map_or("", |i| &rest[i + 1..]);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn into_draft(value: Value) -> Result<DraftSlide, GenerationError> {
    let raw: RawSlide = serde_json::from_value(value)
        .map_err(|e| GenerationError::Malformed(format!("invalid slide object: {e}")))?;

    let title = raw.title.unwrap_or_default().trim().to_string();
    if title.is_empty() {
        return Err(GenerationError::Malformed("slide without a title".to_string()));
    }

    let slide_type = match raw.slide_type.as_deref() {
        Some(s) => s.parse().unwrap_or_else(|_| {
            tracing::warn!(slide_type = s, "Unknown generated slide type, using CONTENT");
            SlideType::Content
        }),
        None => SlideType::Content,
    };

    let layout = raw.layout.as_deref().and_then(|s| match s.parse() {
        Ok(layout) => Some(layout),
        Err(_) => {
            tracing::warn!(layout = s, "Unknown generated layout, using type default");
            None
        }
    });

    Ok(DraftSlide {
        title,
        content: content_text(raw.content),
        slide_type,
        layout,
    })
}

/// Flatten `content` to text; arrays become `- ` bullet lines.
fn content_text(content: Option<Value>) -> String {
    match content {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => format!("- {}", s.trim()),
                other => format!("- {other}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => other.to_string(),
    }
}
