//! Integration tests for slide ordering against a real database.
//!
//! Covers creation, insert-after with tail shift, delete with compaction,
//! bulk reorder, explicit-order create and sparse updates, plus rollback on
//! a failing shift and concurrent operations on one presentation. A model-based
//! test replays a mixed operation sequence against both the database and
//! the in-memory `SlideSequence`.

use slidecraft_core::ordering::{self, SlideSequence};
use slidecraft_core::slide::{SlideLayout, SlideType, TextAlign};
use slidecraft_core::types::DbId;
use slidecraft_db::models::presentation::{CreatePresentation, PresentationWithSlides};
use slidecraft_db::models::slide::{CreateSlide, NewSlide, UpdateSlide};
use slidecraft_db::repositories::{PresentationRepo, SlideRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_presentation(title: &str) -> CreatePresentation {
    CreatePresentation {
        title: title.to_string(),
        description: None,
        prompt: "A talk about testing".to_string(),
        primary_color: None,
        secondary_color: None,
        font_family: None,
    }
}

fn new_slide(title: &str) -> NewSlide {
    NewSlide {
        title: title.to_string(),
        content: format!("Body of {title}"),
        slide_type: SlideType::Content,
        layout: SlideLayout::BulletList,
    }
}

async fn presentation_with(pool: &PgPool, titles: &[&str]) -> PresentationWithSlides {
    let slides: Vec<NewSlide> = titles.iter().map(|t| new_slide(t)).collect();
    PresentationRepo::create_with_slides(pool, &new_presentation("Deck"), &slides)
        .await
        .unwrap()
}

/// Current order of each of `ids`, in the given sequence.
async fn orders_of(pool: &PgPool, presentation_id: DbId, ids: &[DbId]) -> Vec<i32> {
    let slides = SlideRepo::list_by_presentation(pool, presentation_id)
        .await
        .unwrap();
    ids.iter()
        .map(|id| {
            slides
                .iter()
                .find(|s| s.id == *id)
                .unwrap_or_else(|| panic!("slide {id} missing"))
                .order
        })
        .collect()
}

async fn all_orders(pool: &PgPool, presentation_id: DbId) -> Vec<i32> {
    SlideRepo::list_by_presentation(pool, presentation_id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.order)
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_assigns_orders_in_generation_order(pool: PgPool) {
    let created = presentation_with(&pool, &["Intro", "Body", "Outro"]).await;

    let titles: Vec<_> = created.slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Intro", "Body", "Outro"]);
    assert_eq!(all_orders(&pool, created.presentation.id).await, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_no_slides(pool: PgPool) {
    let created = presentation_with(&pool, &[]).await;
    assert!(created.slides.is_empty());
    assert_eq!(
        SlideRepo::count_for_presentation(&pool, created.presentation.id)
            .await
            .unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_after_first_shifts_tail(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B", "C"]).await;
    let pid = created.presentation.id;
    let ids: Vec<DbId> = created.slides.iter().map(|s| s.id).collect();

    let plan = ordering::insert_plan(1).unwrap();
    let inserted = SlideRepo::insert(&pool, pid, &plan, &new_slide("New"))
        .await
        .unwrap()
        .expect("presentation exists");

    assert_eq!(inserted.order, 2);
    assert_eq!(
        orders_of(&pool, pid, &[ids[0], inserted.id, ids[1], ids[2]]).await,
        vec![1, 2, 3, 4]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_at_front(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B"]).await;
    let pid = created.presentation.id;
    let ids: Vec<DbId> = created.slides.iter().map(|s| s.id).collect();

    let plan = ordering::insert_plan(0).unwrap();
    let inserted = SlideRepo::insert(&pool, pid, &plan, &new_slide("Cover"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(inserted.order, 1);
    assert_eq!(orders_of(&pool, pid, &[ids[0], ids[1]]).await, vec![2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_at_end_moves_nothing(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B"]).await;
    let pid = created.presentation.id;

    let plan = ordering::insert_plan(2).unwrap();
    let inserted = SlideRepo::insert(&pool, pid, &plan, &new_slide("Last"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(inserted.order, 3);
    assert_eq!(all_orders(&pool, pid).await, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn insert_into_missing_presentation_writes_nothing(pool: PgPool) {
    let plan = ordering::insert_plan(0).unwrap();
    let result = SlideRepo::insert(&pool, 999_999, &plan, &new_slide("Orphan"))
        .await
        .unwrap();
    assert!(result.is_none());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM slides")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_second_of_four_compacts(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B", "C", "D"]).await;
    let pid = created.presentation.id;
    let ids: Vec<DbId> = created.slides.iter().map(|s| s.id).collect();

    let position = SlideRepo::delete_and_compact(&pool, ids[1])
        .await
        .unwrap()
        .expect("slide exists");
    assert_eq!(position.order, 2);
    assert_eq!(position.presentation_id, pid);

    assert!(SlideRepo::find_by_id(&pool, ids[1]).await.unwrap().is_none());
    assert_eq!(
        orders_of(&pool, pid, &[ids[0], ids[2], ids[3]]).await,
        vec![1, 2, 3]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_missing_slide_returns_none(pool: PgPool) {
    assert!(SlideRepo::delete_and_compact(&pool, 424_242)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_only_touches_its_own_presentation(pool: PgPool) {
    let first = presentation_with(&pool, &["A", "B", "C"]).await;
    let second = presentation_with(&pool, &["X", "Y", "Z"]).await;

    SlideRepo::delete_and_compact(&pool, first.slides[0].id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(all_orders(&pool, first.presentation.id).await, vec![1, 2]);
    assert_eq!(all_orders(&pool, second.presentation.id).await, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_reorder_opens_a_gap(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B", "C"]).await;
    let pid = created.presentation.id;
    let ids: Vec<DbId> = created.slides.iter().map(|s| s.id).collect();

    let moved = SlideRepo::shift_orders(&pool, pid, ordering::tail_shift(2, 1))
        .await
        .unwrap();

    assert_eq!(moved, Some(2));
    assert_eq!(orders_of(&pool, pid, &ids).await, vec![1, 3, 4]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_increment_moves_nothing(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B"]).await;
    let moved = SlideRepo::shift_orders(&pool, created.presentation.id, ordering::tail_shift(1, 0))
        .await
        .unwrap();
    assert_eq!(moved, Some(0));
    assert_eq!(all_orders(&pool, created.presentation.id).await, vec![1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn shift_on_missing_presentation_returns_none(pool: PgPool) {
    for increment in [1, 0] {
        let moved = SlideRepo::shift_orders(&pool, 999_999, ordering::tail_shift(1, increment))
            .await
            .unwrap();
        assert!(moved.is_none(), "increment {increment}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn keep_both_splice_with_shift_and_explicit_create(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B", "C"]).await;
    let pid = created.presentation.id;

    SlideRepo::shift_orders(&pool, pid, ordering::tail_shift(3, 1))
        .await
        .unwrap()
        .expect("presentation exists");
    let alternative = SlideRepo::create(
        &pool,
        &CreateSlide {
            presentation_id: pid,
            slide: new_slide("B (alternative)"),
            order: 3,
        },
    )
    .await
    .unwrap();

    let titles: Vec<String> = SlideRepo::list_by_presentation(&pool, pid)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["A", "B", "B (alternative)", "C"]);
    assert_eq!(alternative.order, 3);
    assert!(ordering::is_dense(&all_orders(&pool, pid).await));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_create_trusts_the_caller(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B"]).await;
    let pid = created.presentation.id;

    SlideRepo::create(
        &pool,
        &CreateSlide {
            presentation_id: pid,
            slide: new_slide("Dup"),
            order: 1,
        },
    )
    .await
    .unwrap();

    assert_eq!(all_orders(&pool, pid).await, vec![1, 1, 2]);
}

// ---------------------------------------------------------------------------
// Sparse update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn content_update_leaves_other_fields_alone(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B"]).await;
    let before = created.slides[1].clone();

    let updated = SlideRepo::update(
        &pool,
        before.id,
        &UpdateSlide {
            content: Some("Rewritten".to_string()),
            ..UpdateSlide::default()
        },
    )
    .await
    .unwrap()
    .expect("slide exists");

    assert_eq!(updated.content, "Rewritten");
    assert_eq!(updated.order, before.order);
    assert_eq!(updated.layout, before.layout);
    assert_eq!(updated.title, before.title);
    assert_eq!(updated.slide_type, before.slide_type);
    assert_eq!(updated.image_url, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_string_is_persisted_not_ignored(pool: PgPool) {
    let created = presentation_with(&pool, &["A"]).await;
    let id = created.slides[0].id;

    let updated = SlideRepo::update(
        &pool,
        id,
        &UpdateSlide {
            content: Some(String::new()),
            image_url: Some("https://example.com/cat.png".to_string()),
            text_align: Some(Some(TextAlign::Center)),
            ..UpdateSlide::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.content, "");
    assert_eq!(updated.image_url.as_deref(), Some("https://example.com/cat.png"));
    assert_eq!(updated.text_align.as_deref(), Some("CENTER"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_string_clears_styling_overrides(pool: PgPool) {
    let created = presentation_with(&pool, &["A"]).await;
    let id = created.slides[0].id;

    SlideRepo::update(
        &pool,
        id,
        &UpdateSlide {
            image_url: Some("https://example.com/cat.png".to_string()),
            background_color: Some("#112233".to_string()),
            text_color: Some("#445566".to_string()),
            heading_color: Some("#778899".to_string()),
            text_align: Some(Some(TextAlign::Right)),
            ..UpdateSlide::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let partly_cleared = SlideRepo::update(
        &pool,
        id,
        &UpdateSlide {
            background_color: Some(String::new()),
            text_align: Some(None),
            ..UpdateSlide::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(partly_cleared.background_color, None);
    assert_eq!(partly_cleared.text_align, None);
    assert_eq!(partly_cleared.text_color.as_deref(), Some("#445566"));
    assert_eq!(partly_cleared.heading_color.as_deref(), Some("#778899"));
    assert_eq!(
        partly_cleared.image_url.as_deref(),
        Some("https://example.com/cat.png")
    );

    let cleared = SlideRepo::update(
        &pool,
        id,
        &UpdateSlide {
            image_url: Some(String::new()),
            text_color: Some(String::new()),
            heading_color: Some(String::new()),
            ..UpdateSlide::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.image_url, None);
    assert_eq!(cleared.text_color, None);
    assert_eq!(cleared.heading_color, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_slide_returns_none(pool: PgPool) {
    let result = SlideRepo::update(&pool, 31_337, &UpdateSlide::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Order bounds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_slide_at_max_order_leaves_others_alone(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B", "C"]).await;
    let pid = created.presentation.id;

    let last = SlideRepo::create(
        &pool,
        &CreateSlide {
            presentation_id: pid,
            slide: new_slide("Far away"),
            order: i32::MAX,
        },
    )
    .await
    .unwrap();

    let position = SlideRepo::delete_and_compact(&pool, last.id)
        .await
        .unwrap()
        .expect("slide exists");
    assert_eq!(position.order, i32::MAX);
    assert_eq!(all_orders(&pool, pid).await, vec![1, 2, 3]);
}

// ---------------------------------------------------------------------------
// Atomicity and concurrency
// ---------------------------------------------------------------------------

/// Make every `UPDATE` on `slides` fail, so the tail shift of an ordering
/// operation errors after its first statement already ran.
async fn fail_slide_updates(pool: &PgPool) {
    sqlx::raw_sql(
        "CREATE FUNCTION reject_slide_update() RETURNS trigger AS $$ \
         BEGIN RAISE EXCEPTION 'slide updates rejected'; END; \
         $$ LANGUAGE plpgsql; \
         CREATE TRIGGER trg_reject_slide_update BEFORE UPDATE ON slides \
         FOR EACH ROW EXECUTE FUNCTION reject_slide_update();",
    )
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_compaction_rolls_back_the_delete(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B", "C"]).await;
    let pid = created.presentation.id;
    fail_slide_updates(&pool).await;

    let result = SlideRepo::delete_and_compact(&pool, created.slides[0].id).await;

    assert!(result.is_err());
    assert!(SlideRepo::find_by_id(&pool, created.slides[0].id)
        .await
        .unwrap()
        .is_some());
    assert_eq!(all_orders(&pool, pid).await, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_shift_rolls_back_the_insert(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B", "C"]).await;
    let pid = created.presentation.id;
    fail_slide_updates(&pool).await;

    let plan = ordering::insert_plan(1).unwrap();
    let result = SlideRepo::insert(&pool, pid, &plan, &new_slide("New")).await;

    assert!(result.is_err());
    assert_eq!(all_orders(&pool, pid).await, vec![1, 2, 3]);
    assert_eq!(SlideRepo::count_for_presentation(&pool, pid).await.unwrap(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_inserts_stay_dense(pool: PgPool) {
    let created = presentation_with(&pool, &["A", "B", "C"]).await;
    let pid = created.presentation.id;

    let handles: Vec<_> = (0..20)
        .map(|n| {
            let pool = pool.clone();
            tokio::spawn(async move {
                let plan = ordering::insert_plan(1).unwrap();
                SlideRepo::insert(&pool, pid, &plan, &new_slide(&format!("Concurrent {n}")))
                    .await
                    .unwrap()
                    .expect("presentation exists")
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let orders = all_orders(&pool, pid).await;
    assert_eq!(orders.len(), 23);
    assert!(ordering::is_dense(&orders), "orders not dense: {orders:?}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_deletes_stay_dense(pool: PgPool) {
    let titles: Vec<String> = (0..12).map(|n| format!("S{n}")).collect();
    let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let created = presentation_with(&pool, &title_refs).await;
    let pid = created.presentation.id;

    let handles: Vec<_> = created
        .slides
        .iter()
        .step_by(2)
        .map(|slide| {
            let pool = pool.clone();
            let id = slide.id;
            tokio::spawn(async move { SlideRepo::delete_and_compact(&pool, id).await.unwrap() })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().is_some());
    }

    let orders = all_orders(&pool, pid).await;
    assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
}

// ---------------------------------------------------------------------------
// Model-based sequence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mixed_operations_match_in_memory_model(pool: PgPool) {
    let created = presentation_with(&pool, &["1", "2", "3"]).await;
    let pid = created.presentation.id;
    let mut model = SlideSequence::from_keys(created.slides.iter().map(|s| s.id));

    // (insert_after, delete_index) steps; None skips the half of the step.
    let steps: [(Option<i32>, Option<usize>); 8] = [
        (Some(0), None),
        (Some(4), None),
        (None, Some(2)),
        (Some(2), Some(0)),
        (None, Some(3)),
        (Some(1), None),
        (None, Some(0)),
        (Some(3), Some(1)),
    ];

    for (step, (insert_after, delete_index)) in steps.into_iter().enumerate() {
        if let Some(after) = insert_after {
            let plan = ordering::insert_plan(after).unwrap();
            let slide = SlideRepo::insert(&pool, pid, &plan, &new_slide(&format!("s{step}")))
                .await
                .unwrap()
                .unwrap();
            let expected = model.insert_after(after, slide.id).unwrap();
            assert_eq!(slide.order, expected);
        }
        if let Some(index) = delete_index {
            let victim = model.keys_in_order()[index];
            let position = SlideRepo::delete_and_compact(&pool, victim)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(Some(position.order), model.remove(&victim));
        }

        let db_ids: Vec<DbId> = SlideRepo::list_by_presentation(&pool, pid)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(db_ids, model.keys_in_order(), "step {step}");
        assert!(ordering::is_dense(&all_orders(&pool, pid).await), "step {step}");
    }
}
