//! Handlers for the `/presentations` resource.
//!
//! Creating a presentation drafts its slides with the configured
//! [`ContentGenerator`](slidecraft_generation::ContentGenerator) first and
//! only writes to the database once usable slides came back.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use slidecraft_core::error::CoreError;
use slidecraft_core::types::DbId;
use slidecraft_core::{presentation, theme};
use slidecraft_db::models::presentation::{CreatePresentation, UpdatePresentation};
use slidecraft_db::models::slide::NewSlide;
use slidecraft_db::repositories::PresentationRepo;
use slidecraft_generation::DeckRequest;

use crate::error::{AppError, AppResult};
use crate::handlers::slide::new_slide_from_draft;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /presentations`.
#[derive(Debug, Deserialize)]
pub struct CreatePresentationRequest {
    pub title: String,
    pub prompt: String,
    pub description: Option<String>,
    /// Number of slides to generate; the server default applies when absent.
    pub slide_count: Option<u32>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Presentation",
        id,
    })
}

fn validate_theme(
    primary_color: Option<&str>,
    secondary_color: Option<&str>,
    font_family: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(color) = primary_color {
        theme::validate_hex_color("primary_color", color)?;
    }
    if let Some(color) = secondary_color {
        theme::validate_hex_color("secondary_color", color)?;
    }
    if let Some(font) = font_family {
        theme::validate_font_family(font)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/presentations
///
/// Generates the deck, then stores the presentation and its slides
/// (orders `1..=K`) in one transaction. A generation failure stores nothing.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreatePresentationRequest>,
) -> AppResult<impl IntoResponse> {
    presentation::validate_title(&body.title)?;
    presentation::validate_prompt(&body.prompt)?;
    let slide_count = body.slide_count.unwrap_or(state.config.default_slide_count);
    presentation::validate_slide_count(slide_count, state.config.max_slide_count)?;
    validate_theme(
        body.primary_color.as_deref(),
        body.secondary_color.as_deref(),
        body.font_family.as_deref(),
    )?;

    let drafts = state
        .generator
        .generate_deck(&DeckRequest {
            title: body.title.clone(),
            prompt: body.prompt.clone(),
            description: body.description.clone(),
            slide_count,
        })
        .await?;
    let slides: Vec<NewSlide> = drafts.into_iter().map(new_slide_from_draft).collect();

    let input = CreatePresentation {
        title: body.title,
        description: body.description,
        prompt: body.prompt,
        primary_color: body.primary_color,
        secondary_color: body.secondary_color,
        font_family: body.font_family,
    };
    let created = PresentationRepo::create_with_slides(&state.pool, &input, &slides).await?;

    tracing::info!(
        presentation_id = created.presentation.id,
        slide_count = created.slides.len(),
        "Presentation created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/presentations
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let presentations = PresentationRepo::list(&state.pool).await?;
    tracing::debug!(count = presentations.len(), "Listed presentations");
    Ok(Json(DataResponse {
        data: presentations,
    }))
}

/// GET /api/v1/presentations/{id}
///
/// Returns the presentation with its slides in order.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = PresentationRepo::find_with_slides(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: found }))
}

/// PUT /api/v1/presentations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePresentation>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        presentation::validate_title(title)?;
    }
    if let Some(prompt) = &input.prompt {
        presentation::validate_prompt(prompt)?;
    }
    validate_theme(
        input.primary_color.as_deref(),
        input.secondary_color.as_deref(),
        input.font_family.as_deref(),
    )?;

    let updated = PresentationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(presentation_id = id, "Presentation updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/presentations/{id}
///
/// Slides are removed by the `ON DELETE CASCADE` foreign key.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PresentationRepo::delete(&state.pool, id).await? {
        tracing::info!(presentation_id = id, "Presentation deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
