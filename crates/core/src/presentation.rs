//! Validation rules for creating presentations.

use crate::error::CoreError;

/// Maximum length of a presentation title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Validate a presentation title: required, non-blank, bounded length.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title is required".to_string()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate the free-text prompt the deck is generated from.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(CoreError::Validation("prompt is required".to_string()));
    }
    Ok(())
}

/// Validate a requested number of generated slides against `max`.
pub fn validate_slide_count(count: u32, max: u32) -> Result<(), CoreError> {
    if count == 0 || count > max {
        return Err(CoreError::Validation(format!(
            "slide_count must be between 1 and {max}, got {count}"
        )));
    }
    Ok(())
}
