//! Repository for the `slides` table.
//!
//! Executes the plans from `slidecraft_core::ordering`. Inserts, deletes and
//! shifts each run in one transaction that first takes a transaction-scoped
//! advisory lock keyed by the presentation id, so concurrent ordering
//! operations on the same presentation serialize.

use slidecraft_core::ordering::{self, InsertPlan, OrderShift};
use slidecraft_core::slide::TextAlign;
use slidecraft_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::slide::{CreateSlide, NewSlide, Slide, SlidePosition, UpdateSlide};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, presentation_id, title, content, slide_type, layout, \
    sort_order, image_url, background_color, text_color, heading_color, text_align, \
    created_at, updated_at";

/// Provides CRUD and ordering operations for slides.
pub struct SlideRepo;

impl SlideRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a slide at the caller's order. Nothing is shifted.
    pub async fn create(pool: &PgPool, input: &CreateSlide) -> Result<Slide, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert_row(&mut *conn, input.presentation_id, input.order, &input.slide).await
    }

    /// Find a slide by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Slide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slides WHERE id = $1");
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a presentation's slides in presentation order.
    pub async fn list_by_presentation(
        pool: &PgPool,
        presentation_id: DbId,
    ) -> Result<Vec<Slide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slides \
             WHERE presentation_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(presentation_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_presentation(
        pool: &PgPool,
        presentation_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM slides WHERE presentation_id = $1")
                .bind(presentation_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Sparse update of content and styling. Only non-`None` fields are applied.
    /// An empty string clears a styling override back to `NULL`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSlide,
    ) -> Result<Option<Slide>, sqlx::Error> {
        let query = format!(
            "UPDATE slides SET \
                title = COALESCE($2, title), \
                content = COALESCE($3, content), \
                slide_type = COALESCE($4, slide_type), \
                layout = COALESCE($5, layout), \
                image_url = CASE WHEN $6::text IS NULL THEN image_url ELSE NULLIF($6, '') END, \
                background_color = CASE WHEN $7::text IS NULL THEN background_color ELSE NULLIF($7, '') END, \
                text_color = CASE WHEN $8::text IS NULL THEN text_color ELSE NULLIF($8, '') END, \
                heading_color = CASE WHEN $9::text IS NULL THEN heading_color ELSE NULLIF($9, '') END, \
                text_align = CASE WHEN $10::text IS NULL THEN text_align ELSE NULLIF($10, '') END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.slide_type.map(|t| t.as_str()))
            .bind(input.layout.map(|l| l.as_str()))
            .bind(&input.image_url)
            .bind(&input.background_color)
            .bind(&input.text_color)
            .bind(&input.heading_color)
            .bind(input.text_align.map(|a| a.map_or("", TextAlign::as_str)))
            .fetch_optional(pool)
            .await
    }

    // ── Ordering operations ──────────────────────────────────────────

    /// Insert a slide according to `plan`: shift the tail, then create the
    /// slide at `plan.new_order`.
    ///
    /// Returns `None` (and writes nothing) if the presentation does not exist.
    pub async fn insert(
        pool: &PgPool,
        presentation_id: DbId,
        plan: &InsertPlan,
        slide: &NewSlide,
    ) -> Result<Option<Slide>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_presentation(&mut tx, presentation_id).await? {
            return Ok(None);
        }

        let moved = Self::shift_inner(&mut tx, presentation_id, plan.shift).await?;
        let created = Self::insert_row(&mut *tx, presentation_id, plan.new_order, slide).await?;

        tx.commit().await?;

        tracing::debug!(
            presentation_id,
            slide_id = created.id,
            order = created.order,
            moved,
            "Inserted slide with tail shift"
        );
        Ok(Some(created))
    }

    /// Delete a slide and move every later slide of its presentation up by one.
    ///
    /// The delete and the compaction commit together or not at all.
    /// Returns the deleted slide's former position, or `None` if it did not exist.
    pub async fn delete_and_compact(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SlidePosition>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let presentation_id: Option<DbId> =
            sqlx::query_scalar("SELECT presentation_id FROM slides WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(presentation_id) = presentation_id else {
            return Ok(None);
        };

        if !Self::lock_presentation(&mut tx, presentation_id).await? {
            return Ok(None);
        }

        // Re-read the order under the lock; a concurrent operation may have moved it.
        let position = sqlx::query_as::<_, SlidePosition>(
            "DELETE FROM slides WHERE id = $1 RETURNING id, presentation_id, sort_order",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(position) = position else {
            return Ok(None);
        };

        let moved = Self::shift_inner(
            &mut tx,
            position.presentation_id,
            ordering::compaction_after_delete(position.order),
        )
        .await?;

        tx.commit().await?;

        tracing::debug!(
            slide_id = id,
            presentation_id = position.presentation_id,
            order = position.order,
            moved,
            "Deleted slide and compacted tail"
        );
        Ok(Some(position))
    }

    /// Apply a bulk shift to a presentation's slides, returning how many moved.
    ///
    /// Returns `None` if the presentation does not exist.
    pub async fn shift_orders(
        pool: &PgPool,
        presentation_id: DbId,
        shift: OrderShift,
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if !Self::lock_presentation(&mut tx, presentation_id).await? {
            return Ok(None);
        }
        let moved = Self::shift_inner(&mut tx, presentation_id, shift).await?;
        tx.commit().await?;
        Ok(Some(moved))
    }

    // ── Internal helpers ─────────────────────────────────────────────

    /// Take the presentation's advisory lock for the rest of the transaction.
    ///
    /// Returns whether the presentation exists.
    async fn lock_presentation(
        tx: &mut Transaction<'_, Postgres>,
        presentation_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(presentation_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM presentations WHERE id = $1)")
            .bind(presentation_id)
            .fetch_one(&mut **tx)
            .await
    }

    async fn shift_inner(
        tx: &mut Transaction<'_, Postgres>,
        presentation_id: DbId,
        shift: OrderShift,
    ) -> Result<u64, sqlx::Error> {
        if shift.is_noop() {
            return Ok(0);
        }
        let result = sqlx::query(
            "UPDATE slides SET sort_order = sort_order + $3 \
             WHERE presentation_id = $1 AND sort_order >= $2",
        )
        .bind(presentation_id)
        .bind(shift.from_order)
        .bind(shift.increment)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    /// Insert one slide row at `order` on an existing connection or transaction.
    pub(crate) async fn insert_row(
        conn: &mut sqlx::PgConnection,
        presentation_id: DbId,
        order: i32,
        slide: &NewSlide,
    ) -> Result<Slide, sqlx::Error> {
        let query = format!(
            "INSERT INTO slides (presentation_id, title, content, slide_type, layout, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(presentation_id)
            .bind(&slide.title)
            .bind(&slide.content)
            .bind(slide.slide_type.as_str())
            .bind(slide.layout.as_str())
            .bind(order)
            .fetch_one(conn)
            .await
    }
}
