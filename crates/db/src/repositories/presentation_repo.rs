//! Repository for the `presentations` table.

use slidecraft_core::ordering;
use slidecraft_core::theme::{DEFAULT_FONT_FAMILY, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};
use slidecraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::presentation::{
    CreatePresentation, Presentation, PresentationWithSlides, UpdatePresentation,
};
use crate::models::slide::NewSlide;
use crate::repositories::SlideRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, prompt, primary_color, secondary_color, \
    font_family, created_at, updated_at";

/// Provides CRUD operations for presentations.
pub struct PresentationRepo;

impl PresentationRepo {
    /// Insert a presentation and its initial slides in one transaction.
    ///
    /// Slides get orders `1..=slides.len()` in slice order.
    pub async fn create_with_slides(
        pool: &PgPool,
        input: &CreatePresentation,
        slides: &[NewSlide],
    ) -> Result<PresentationWithSlides, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO presentations \
                (title, description, prompt, primary_color, secondary_color, font_family) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let presentation = sqlx::query_as::<_, Presentation>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.prompt)
            .bind(input.primary_color.as_deref().unwrap_or(DEFAULT_PRIMARY_COLOR))
            .bind(
                input
                    .secondary_color
                    .as_deref()
                    .unwrap_or(DEFAULT_SECONDARY_COLOR),
            )
            .bind(input.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY))
            .fetch_one(&mut *tx)
            .await?;

        let mut created = Vec::with_capacity(slides.len());
        for (slide, order) in slides.iter().zip(ordering::initial_orders(slides.len())) {
            created.push(SlideRepo::insert_row(&mut *tx, presentation.id, order, slide).await?);
        }

        tx.commit().await?;
        Ok(PresentationWithSlides {
            presentation,
            slides: created,
        })
    }

    /// Find a presentation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Presentation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presentations WHERE id = $1");
        sqlx::query_as::<_, Presentation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a presentation by ID, enriched with its ordered slides.
    pub async fn find_with_slides(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PresentationWithSlides>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(presentation) => {
                let slides = SlideRepo::list_by_presentation(pool, presentation.id).await?;
                Ok(Some(PresentationWithSlides {
                    presentation,
                    slides,
                }))
            }
            None => Ok(None),
        }
    }

    /// List all presentations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Presentation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presentations ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Presentation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a presentation. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePresentation,
    ) -> Result<Option<Presentation>, sqlx::Error> {
        let query = format!(
            "UPDATE presentations SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                prompt = COALESCE($4, prompt), \
                primary_color = COALESCE($5, primary_color), \
                secondary_color = COALESCE($6, secondary_color), \
                font_family = COALESCE($7, font_family) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Presentation>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.prompt)
            .bind(&input.primary_color)
            .bind(&input.secondary_color)
            .bind(&input.font_family)
            .fetch_optional(pool)
            .await
    }

    /// Delete a presentation. Its slides go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM presentations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
