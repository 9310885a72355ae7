//! Handlers for slides: listing, explicit create, insert-after, bulk
//! reorder, edit, delete with compaction, and regeneration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use slidecraft_core::error::CoreError;
use slidecraft_core::ordering::{self, FIRST_ORDER};
use slidecraft_core::slide::{self as vocab, SlideLayout, SlideType};
use slidecraft_core::theme;
use slidecraft_core::types::DbId;
use slidecraft_db::models::presentation::Presentation;
use slidecraft_db::models::slide::{CreateSlide, NewSlide, Slide, UpdateSlide};
use slidecraft_db::repositories::{PresentationRepo, SlideRepo};
use slidecraft_generation::{DraftSlide, RegenerateRequest, SlideRequest};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /presentations/{id}/slides`.
///
/// The slide is stored at `order` as given; other slides are not moved.
#[derive(Debug, Deserialize)]
pub struct CreateSlideRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub slide_type: SlideType,
    pub layout: Option<SlideLayout>,
    pub order: i32,
}

/// Request body for `POST /presentations/{id}/slides/insert`.
///
/// With a `prompt` the slide is generated; otherwise `title` (and
/// optionally `content`) are used as given.
#[derive(Debug, Deserialize)]
pub struct InsertSlideRequest {
    pub insert_after_order: i32,
    pub slide_type: Option<SlideType>,
    pub prompt: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub layout: Option<SlideLayout>,
}

/// Request body for `POST /presentations/{id}/slides/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from_order: i32,
    pub increment: i32,
}

/// Request body for `POST /slides/{id}/regenerate`.
#[derive(Debug, Default, Deserialize)]
pub struct RegenerateSlideRequest {
    /// Extra instructions for the rewrite.
    pub context: Option<String>,
}

/// How an accepted regeneration is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcceptMode {
    /// Overwrite the original slide in place.
    Replace,
    /// Keep the original and insert the new slide right after it.
    KeepBoth,
}

/// Request body for `POST /slides/{id}/regenerate/accept`.
///
/// `slide_type` defaults to the original's. `layout` defaults to the
/// original's when the type is unchanged, otherwise to the type's default.
#[derive(Debug, Deserialize)]
pub struct AcceptRegenerationRequest {
    pub mode: AcceptMode,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub slide_type: Option<SlideType>,
    pub layout: Option<SlideLayout>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Payload of `POST /presentations/{id}/slides/reorder`.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub success: bool,
    /// Number of slides whose order changed.
    pub moved: u64,
}

/// Payload of `POST /slides/{id}/regenerate`. Nothing is stored.
#[derive(Debug, Serialize)]
pub struct RegeneratePreview {
    pub original: Slide,
    pub proposed: NewSlide,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn slide_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Slide", id })
}

fn presentation_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Presentation",
        id,
    })
}

/// Convert a generated draft into storable content, filling in the layout.
pub(crate) fn new_slide_from_draft(draft: DraftSlide) -> NewSlide {
    let layout = draft.resolved_layout();
    NewSlide {
        title: draft.title,
        content: draft.content,
        slide_type: draft.slide_type,
        layout,
    }
}

async fn find_presentation(state: &AppState, id: DbId) -> AppResult<Presentation> {
    PresentationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| presentation_not_found(id))
}

async fn find_slide(state: &AppState, id: DbId) -> AppResult<Slide> {
    SlideRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| slide_not_found(id))
}

fn validate_optional_color(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    // An empty string clears the override.
    match value {
        Some(color) if !color.is_empty() => theme::validate_hex_color(field, color),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// GET /presentations/{id}/slides
// ---------------------------------------------------------------------------

/// List a presentation's slides by ascending order.
pub async fn list_by_presentation(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_presentation(&state, presentation_id).await?;
    let slides = SlideRepo::list_by_presentation(&state.pool, presentation_id).await?;

    tracing::debug!(count = slides.len(), presentation_id, "Listed slides");
    Ok(Json(DataResponse { data: slides }))
}

// ---------------------------------------------------------------------------
// POST /presentations/{id}/slides
// ---------------------------------------------------------------------------

/// Create a slide at a caller-chosen order without shifting other slides.
pub async fn create(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
    Json(body): Json<CreateSlideRequest>,
) -> AppResult<impl IntoResponse> {
    vocab::validate_slide_title(&body.title)?;
    if body.order < FIRST_ORDER {
        return Err(AppError::Core(CoreError::Validation(format!(
            "order must be >= {FIRST_ORDER}, got {}",
            body.order
        ))));
    }
    find_presentation(&state, presentation_id).await?;

    let input = CreateSlide {
        presentation_id,
        slide: NewSlide {
            title: body.title,
            content: body.content,
            slide_type: body.slide_type,
            layout: body
                .layout
                .unwrap_or_else(|| body.slide_type.default_layout()),
        },
        order: body.order,
    };
    let slide = SlideRepo::create(&state.pool, &input).await?;

    tracing::info!(
        slide_id = slide.id,
        presentation_id,
        order = slide.order,
        "Slide created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

// ---------------------------------------------------------------------------
// POST /presentations/{id}/slides/insert
// ---------------------------------------------------------------------------

/// Insert a slide directly after `insert_after_order`, shifting the tail.
///
/// `insert_after_order = 0` inserts at the front.
pub async fn insert(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
    Json(body): Json<InsertSlideRequest>,
) -> AppResult<impl IntoResponse> {
    let plan = ordering::insert_plan(body.insert_after_order)?;
    let slide_type = body.slide_type.unwrap_or(SlideType::Content);
    let prompt = body.prompt.filter(|p| !p.trim().is_empty());

    let mut new_slide = match prompt {
        Some(prompt) => {
            let presentation = find_presentation(&state, presentation_id).await?;
            let slides = SlideRepo::list_by_presentation(&state.pool, presentation_id).await?;
            let title_at = |order: i32| {
                slides
                    .iter()
                    .find(|s| s.order == order)
                    .map(|s| s.title.clone())
            };

            let draft = state
                .generator
                .generate_slide(&SlideRequest {
                    presentation_title: presentation.title,
                    prompt,
                    slide_type,
                    previous_title: title_at(body.insert_after_order),
                    next_title: title_at(plan.new_order),
                })
                .await?;
            new_slide_from_draft(draft)
        }
        None => {
            let title = body.title.ok_or_else(|| {
                AppError::BadRequest("either prompt or title is required".to_string())
            })?;
            vocab::validate_slide_title(&title)?;
            NewSlide {
                title,
                content: body.content.unwrap_or_default(),
                slide_type,
                layout: slide_type.default_layout(),
            }
        }
    };
    if let Some(layout) = body.layout {
        new_slide.layout = layout;
    }

    let slide = SlideRepo::insert(&state.pool, presentation_id, &plan, &new_slide)
        .await?
        .ok_or_else(|| presentation_not_found(presentation_id))?;

    tracing::info!(
        slide_id = slide.id,
        presentation_id,
        order = slide.order,
        "Slide inserted"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

// ---------------------------------------------------------------------------
// POST /presentations/{id}/slides/reorder
// ---------------------------------------------------------------------------

/// Add `increment` to the order of every slide with `order >= from_order`.
pub async fn reorder(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
    Json(body): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let shift = ordering::tail_shift(body.from_order, body.increment);
    let moved = SlideRepo::shift_orders(&state.pool, presentation_id, shift)
        .await?
        .ok_or_else(|| presentation_not_found(presentation_id))?;

    tracing::info!(
        presentation_id,
        from_order = body.from_order,
        increment = body.increment,
        moved,
        "Slides reordered"
    );
    Ok(Json(DataResponse {
        data: ReorderResponse {
            success: true,
            moved,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /slides/{id}
// ---------------------------------------------------------------------------

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let slide = find_slide(&state, id).await?;
    Ok(Json(DataResponse { data: slide }))
}

// ---------------------------------------------------------------------------
// PUT /slides/{id}
// ---------------------------------------------------------------------------

/// Sparse update of content and styling. The order is never changed here.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSlide>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        vocab::validate_slide_title(title)?;
    }
    validate_optional_color("background_color", input.background_color.as_deref())?;
    validate_optional_color("text_color", input.text_color.as_deref())?;
    validate_optional_color("heading_color", input.heading_color.as_deref())?;

    let slide = SlideRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| slide_not_found(id))?;

    tracing::info!(slide_id = id, presentation_id = slide.presentation_id, "Slide updated");
    Ok(Json(DataResponse { data: slide }))
}

// ---------------------------------------------------------------------------
// DELETE /slides/{id}
// ---------------------------------------------------------------------------

/// Delete a slide and close the gap it leaves in one transaction.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = SlideRepo::delete_and_compact(&state.pool, id)
        .await?
        .ok_or_else(|| slide_not_found(id))?;

    tracing::info!(
        slide_id = id,
        presentation_id = removed.presentation_id,
        order = removed.order,
        "Slide deleted"
    );
    Ok(Json(DataResponse {
        data: SuccessResponse { success: true },
    }))
}

// ---------------------------------------------------------------------------
// POST /slides/{id}/regenerate
// ---------------------------------------------------------------------------

/// Draft a replacement for a slide without storing it. The body is optional.
pub async fn regenerate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Option<Json<RegenerateSlideRequest>>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.unwrap_or_default();
    let original = find_slide(&state, id).await?;
    let presentation = find_presentation(&state, original.presentation_id).await?;

    let draft = state
        .generator
        .regenerate_slide(&RegenerateRequest {
            presentation_title: presentation.title,
            original: DraftSlide {
                title: original.title.clone(),
                content: original.content.clone(),
                slide_type: original.slide_type,
                layout: Some(original.layout),
            },
            context: body.context,
        })
        .await?;

    tracing::info!(slide_id = id, "Slide regeneration proposed");
    Ok(Json(DataResponse {
        data: RegeneratePreview {
            original,
            proposed: new_slide_from_draft(draft),
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /slides/{id}/regenerate/accept
// ---------------------------------------------------------------------------

/// Store an accepted regeneration.
///
/// `REPLACE` overwrites the original's title, content, type and layout and
/// returns 200. `KEEP_BOTH` inserts the new slide at `original.order + 1`,
/// shifting the tail, and returns 201.
pub async fn accept_regenerated(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<AcceptRegenerationRequest>,
) -> AppResult<impl IntoResponse> {
    vocab::validate_slide_title(&body.title)?;
    let original = find_slide(&state, id).await?;

    let slide_type = body.slide_type.unwrap_or(original.slide_type);
    let layout = body.layout.unwrap_or(if slide_type == original.slide_type {
        original.layout
    } else {
        slide_type.default_layout()
    });
    let accepted = NewSlide {
        title: body.title,
        content: body.content,
        slide_type,
        layout,
    };

    match body.mode {
        AcceptMode::Replace => {
            let slide = SlideRepo::update(&state.pool, id, &UpdateSlide::from(accepted))
                .await?
                .ok_or_else(|| slide_not_found(id))?;

            tracing::info!(slide_id = id, "Regenerated slide replaced original");
            Ok((StatusCode::OK, Json(DataResponse { data: slide })))
        }
        AcceptMode::KeepBoth => {
            let plan = ordering::insert_plan(original.order)?;
            let slide = SlideRepo::insert(&state.pool, original.presentation_id, &plan, &accepted)
                .await?
                .ok_or_else(|| presentation_not_found(original.presentation_id))?;

            tracing::info!(
                slide_id = slide.id,
                original_id = id,
                order = slide.order,
                "Regenerated slide kept alongside original"
            );
            Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
        }
    }
}
