//! Presentation theming defaults and validation.
//!
//! Colors are CSS hex colors (`#RGB` or `#RRGGBB`). The same rule applies to
//! the per-slide color overrides.

use crate::error::CoreError;

pub const DEFAULT_PRIMARY_COLOR: &str = "#1E3A8A";
pub const DEFAULT_SECONDARY_COLOR: &str = "#F59E0B";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Maximum length of a font family name.
pub const MAX_FONT_FAMILY_LEN: usize = 100;

/// Validate a CSS hex color. `field` names the offending input in the error.
pub fn validate_hex_color(field: &str, value: &str) -> Result<(), CoreError> {
    let digits = value.strip_prefix('#').ok_or_else(|| {
        CoreError::Validation(format!("{field} must start with '#', got '{value}'"))
    })?;
    if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "{field} must be a #RGB or #RRGGBB hex color, got '{value}'"
        )));
    }
    Ok(())
}

pub fn validate_font_family(value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation("font_family must not be empty".to_string()));
    }
    if value.chars().count() > MAX_FONT_FAMILY_LEN {
        return Err(CoreError::Validation(format!(
            "font_family must be at most {MAX_FONT_FAMILY_LEN} characters"
        )));
    }
    Ok(())
}
