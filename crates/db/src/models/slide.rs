//! Slide entity model and DTOs.
//!
//! The ordering column is `sort_order` in the database and `order` in Rust
//! and on the wire.

use serde::{Deserialize, Deserializer, Serialize};
use slidecraft_core::slide::{SlideLayout, SlideType, TextAlign};
use slidecraft_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `slides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Slide {
    pub id: DbId,
    pub presentation_id: DbId,
    pub title: String,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub slide_type: SlideType,
    #[sqlx(try_from = "String")]
    pub layout: SlideLayout,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub image_url: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub heading_color: Option<String>,
    pub text_align: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Where a deleted slide used to sit.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct SlidePosition {
    pub id: DbId,
    pub presentation_id: DbId,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
}

/// Slide content without a position; the repository assigns the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlide {
    pub title: String,
    pub content: String,
    pub slide_type: SlideType,
    pub layout: SlideLayout,
}

/// DTO for creating a slide at a caller-chosen order. Nothing is shifted.
#[derive(Debug, Clone)]
pub struct CreateSlide {
    pub presentation_id: DbId,
    pub slide: NewSlide,
    pub order: i32,
}

/// DTO for updating a slide's content and styling. There is no `order`
/// field: orders change only through insert, delete and shift. `None` keeps
/// the stored value. `title` and `content` are written as given, even when
/// empty. For the nullable styling overrides an empty string clears the
/// column to `NULL`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSlide {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slide_type: Option<SlideType>,
    pub layout: Option<SlideLayout>,
    pub image_url: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub heading_color: Option<String>,
    /// `Some(None)` clears the alignment; it arrives on the wire as `""`.
    #[serde(default, deserialize_with = "clearable_text_align")]
    pub text_align: Option<Option<TextAlign>>,
}

/// `null` or absent keeps, `""` clears, anything else must name an alignment.
fn clearable_text_align<'de, D>(deserializer: D) -> Result<Option<Option<TextAlign>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None => Ok(None),
        Some("") => Ok(Some(None)),
        Some(value) => value
            .parse()
            .map(|align| Some(Some(align)))
            .map_err(serde::de::Error::custom),
    }
}

impl From<NewSlide> for UpdateSlide {
    /// Overwrite the generated fields, leaving styling overrides alone.
    fn from(slide: NewSlide) -> Self {
        Self {
            title: Some(slide.title),
            content: Some(slide.content),
            slide_type: Some(slide.slide_type),
            layout: Some(slide.layout),
            ..Self::default()
        }
    }
}
