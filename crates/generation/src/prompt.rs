//! Chat messages sent to the generation service.

use slidecraft_core::slide::{SlideLayout, SlideType};

use crate::client::ChatMessage;
use crate::generator::{DeckRequest, RegenerateRequest, SlideRequest};

const ROLE: &str = "You are an assistant that writes concise, well-structured presentation slides.";

/// Shared reply contract: one JSON object per slide with these keys.
fn schema_instructions() -> String {
    let types = SlideType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let layouts = SlideLayout::ALL
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{ROLE}\n\
         Reply with JSON only, no prose. Every slide is an object with the keys:\n\
         - \"title\": short slide heading\n\
         - \"content\": markdown text, bullet points as lines starting with \"- \"\n\
         - \"slide_type\": one of {types}\n\
         - \"layout\": one of {layouts}"
    )
}

/// Messages for a whole deck. The reply is `{"slides": [...]}`.
pub fn deck_messages(request: &DeckRequest) -> Vec<ChatMessage> {
    let system = format!(
        "{}\nReturn an object {{\"slides\": [...]}} with exactly {} slides. \
         The first slide has slide_type TITLE and the last one CONCLUSION or NEXT_STEPS.",
        schema_instructions(),
        request.slide_count
    );

    let mut user = format!(
        "Presentation title: {}\nTopic: {}",
        request.title, request.prompt
    );
    if let Some(description) = request.description.as_deref().filter(|d| !d.trim().is_empty()) {
        user.push_str(&format!("\nAudience and notes: {description}"));
    }

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Messages for one new slide placed between two neighbours.
pub fn slide_messages(request: &SlideRequest) -> Vec<ChatMessage> {
    let system = format!(
        "{}\nReturn a single slide object {{\"slide\": {{...}}}}.",
        schema_instructions()
    );

    let mut user = format!(
        "Presentation: {}\nWrite one {} slide about: {}",
        request.presentation_title,
        request.slide_type.as_str(),
        request.prompt
    );
    if let Some(previous) = &request.previous_title {
        user.push_str(&format!("\nIt follows the slide \"{previous}\"."));
    }
    if let Some(next) = &request.next_title {
        user.push_str(&format!("\nIt comes before the slide \"{next}\"."));
    }

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Messages asking for a rewrite of an existing slide.
pub fn regenerate_messages(request: &RegenerateRequest) -> Vec<ChatMessage> {
    let system = format!(
        "{}\nReturn a single slide object {{\"slide\": {{...}}}}. \
         Keep the slide_type unless asked otherwise.",
        schema_instructions()
    );

    let original = &request.original;
    let mut user = format!(
        "Presentation: {}\nRewrite this {} slide.\nTitle: {}\nContent:\n{}",
        request.presentation_title,
        original.slide_type.as_str(),
        original.title,
        original.content
    );
    if let Some(context) = request.context.as_deref().filter(|c| !c.trim().is_empty()) {
        user.push_str(&format!("\nInstructions: {context}"));
    }

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
