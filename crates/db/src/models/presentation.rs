//! Presentation entity model and DTOs.

use serde::{Deserialize, Serialize};
use slidecraft_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::slide::Slide;

/// A row from the `presentations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Presentation {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub prompt: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A presentation together with its slides in presentation order.
#[derive(Debug, Clone, Serialize)]
pub struct PresentationWithSlides {
    #[serde(flatten)]
    pub presentation: Presentation,
    pub slides: Vec<Slide>,
}

/// DTO for creating a new presentation. Theme fields fall back to the
/// defaults in `slidecraft_core::theme` when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePresentation {
    pub title: String,
    pub description: Option<String>,
    pub prompt: String,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
}

/// DTO for updating a presentation. `None` keeps the stored value; any
/// `Some`, including an empty string, is written as given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePresentation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
}
