//! Slide vocabulary: slide types, layouts and text alignment.
//!
//! All three are stored as `TEXT` in the database and travel over the wire
//! in SCREAMING_SNAKE_CASE (`"NEXT_STEPS"`, `"IMAGE_LEFT"`). Parsing is
//! case-insensitive and accepts `-` or space in place of `_`, because the
//! generation service is not always exact about it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of a slide title, in characters.
pub const MAX_SLIDE_TITLE_LEN: usize = 200;

/// Normalise a vocabulary token: trim, uppercase, `-`/space to `_`.
fn normalise(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Slide type
// ---------------------------------------------------------------------------

/// The narrative role of a slide within a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideType {
    Title,
    Intro,
    Content,
    Conclusion,
    NextSteps,
}

impl SlideType {
    pub const ALL: [SlideType; 5] = [
        SlideType::Title,
        SlideType::Intro,
        SlideType::Content,
        SlideType::Conclusion,
        SlideType::NextSteps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlideType::Title => "TITLE",
            SlideType::Intro => "INTRO",
            SlideType::Content => "CONTENT",
            SlideType::Conclusion => "CONCLUSION",
            SlideType::NextSteps => "NEXT_STEPS",
        }
    }

    /// Layout used when a slide of this type is created without one.
    pub fn default_layout(self) -> SlideLayout {
        match self {
            SlideType::Title => SlideLayout::TitleCentered,
            SlideType::Intro => SlideLayout::TitleLeft,
            SlideType::Content => SlideLayout::BulletList,
            SlideType::Conclusion => SlideLayout::SectionHeader,
            SlideType::NextSteps => SlideLayout::BulletList,
        }
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlideType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalise(s);
        SlideType::ALL
            .into_iter()
            .find(|t| t.as_str() == token)
            .ok_or_else(|| CoreError::Validation(format!("unknown slide type '{s}'")))
    }
}

impl TryFrom<String> for SlideType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Visual arrangement of a slide's title, body and image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideLayout {
    Default,
    TitleCentered,
    TitleLeft,
    SectionHeader,
    BulletList,
    TwoColumn,
    ImageLeft,
    ImageRight,
    ImageFull,
    Quote,
    Statistics,
    Timeline,
    Comparison,
    Grid,
    Closing,
}

impl SlideLayout {
    pub const ALL: [SlideLayout; 15] = [
        SlideLayout::Default,
        SlideLayout::TitleCentered,
        SlideLayout::TitleLeft,
        SlideLayout::SectionHeader,
        SlideLayout::BulletList,
        SlideLayout::TwoColumn,
        SlideLayout::ImageLeft,
        SlideLayout::ImageRight,
        SlideLayout::ImageFull,
        SlideLayout::Quote,
        SlideLayout::Statistics,
        SlideLayout::Timeline,
        SlideLayout::Comparison,
        SlideLayout::Grid,
        SlideLayout::Closing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlideLayout::Default => "DEFAULT",
            SlideLayout::TitleCentered => "TITLE_CENTERED",
            SlideLayout::TitleLeft => "TITLE_LEFT",
            SlideLayout::SectionHeader => "SECTION_HEADER",
            SlideLayout::BulletList => "BULLET_LIST",
            SlideLayout::TwoColumn => "TWO_COLUMN",
            SlideLayout::ImageLeft => "IMAGE_LEFT",
            SlideLayout::ImageRight => "IMAGE_RIGHT",
            SlideLayout::ImageFull => "IMAGE_FULL",
            SlideLayout::Quote => "QUOTE",
            SlideLayout::Statistics => "STATISTICS",
            SlideLayout::Timeline => "TIMELINE",
            SlideLayout::Comparison => "COMPARISON",
            SlideLayout::Grid => "GRID",
            SlideLayout::Closing => "CLOSING",
        }
    }
}

impl fmt::Display for SlideLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlideLayout {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalise(s);
        SlideLayout::ALL
            .into_iter()
            .find(|l| l.as_str() == token)
            .ok_or_else(|| CoreError::Validation(format!("unknown slide layout '{s}'")))
    }
}

impl TryFrom<String> for SlideLayout {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Text alignment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub const ALL: [TextAlign; 4] = [
        TextAlign::Left,
        TextAlign::Center,
        TextAlign::Right,
        TextAlign::Justify,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "LEFT",
            TextAlign::Center => "CENTER",
            TextAlign::Right => "RIGHT",
            TextAlign::Justify => "JUSTIFY",
        }
    }
}

impl FromStr for TextAlign {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalise(s);
        TextAlign::ALL
            .into_iter()
            .find(|a| a.as_str() == token)
            .ok_or_else(|| CoreError::Validation(format!("unknown text alignment '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a slide title: non-blank and at most [`MAX_SLIDE_TITLE_LEN`] characters.
pub fn validate_slide_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("slide title must not be empty".to_string()));
    }
    let len = title.chars().count();
    if len > MAX_SLIDE_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "slide title must be at most {MAX_SLIDE_TITLE_LEN} characters, got {len}"
        )));
    }
    Ok(())
}
