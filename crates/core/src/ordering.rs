//! Slide ordering model.
//!
//! The slides of a presentation carry a 1-based integer `order`. After every
//! create, insert, delete and bulk reorder the set of orders is exactly
//! `{1, ..., N}`. Each mutation is expressed as at most one [`OrderShift`]
//! (a bulk conditional update over the tail of the sequence) plus at most
//! one row insert or delete. The store executes these plans as SQL; this
//! module owns the arithmetic so it can be tested without a database.
//!
//! Positions supplied by callers are trusted: inserting after a position
//! larger than the slide count, or creating a slide at an explicit order,
//! is not range-checked and can leave a gap or a duplicate.

use crate::error::CoreError;

/// Order of the first slide in a presentation.
pub const FIRST_ORDER: i32 = 1;

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Bulk conditional update: every slide with `order >= from_order` gets
/// `order += increment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderShift {
    pub from_order: i32,
    pub increment: i32,
}

impl OrderShift {
    pub fn applies_to(&self, order: i32) -> bool {
        order >= self.from_order
    }

    /// New order for a slide currently at `order`. Saturates at the `i32` bounds.
    pub fn apply(&self, order: i32) -> i32 {
        if self.applies_to(order) {
            order.saturating_add(self.increment)
        } else {
            order
        }
    }

    pub fn is_noop(&self) -> bool {
        self.increment == 0
    }
}

/// How to insert one slide after a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPlan {
    /// Opens a slot by moving every slide after the position down by one.
    pub shift: OrderShift,
    /// Order the new slide is created with.
    pub new_order: i32,
}

/// Orders for `count` slides written when a presentation is created.
pub fn initial_orders(count: usize) -> Vec<i32> {
    (FIRST_ORDER..).take(count).collect()
}

/// Plan an insert after `insert_after_order` (`0` inserts at the front).
///
/// Slides whose order is strictly greater than `insert_after_order` move
/// down by one, and the new slide takes `insert_after_order + 1`.
pub fn insert_plan(insert_after_order: i32) -> Result<InsertPlan, CoreError> {
    if insert_after_order < 0 {
        return Err(CoreError::Validation(format!(
            "insert_after_order must be >= 0, got {insert_after_order}"
        )));
    }
    let new_order = insert_after_order.checked_add(1).ok_or_else(|| {
        CoreError::Validation(format!(
            "insert_after_order must be < {}, got {insert_after_order}",
            i32::MAX
        ))
    })?;
    Ok(InsertPlan {
        shift: OrderShift {
            from_order: new_order,
            increment: 1,
        },
        new_order,
    })
}

/// Shift that closes the gap left by deleting the slide at `deleted_order`.
///
/// Nothing can sit after `i32::MAX`, so deleting there yields a no-op.
pub fn compaction_after_delete(deleted_order: i32) -> OrderShift {
    match deleted_order.checked_add(1) {
        Some(from_order) => OrderShift {
            from_order,
            increment: -1,
        },
        None => OrderShift {
            from_order: i32::MAX,
            increment: 0,
        },
    }
}

/// The raw bulk reorder primitive. Zero increments are allowed and move nothing.
pub fn tail_shift(from_order: i32, increment: i32) -> OrderShift {
    OrderShift {
        from_order,
        increment,
    }
}

// ---------------------------------------------------------------------------
// Invariant checks
// ---------------------------------------------------------------------------

/// Whether `orders` (in any sequence) is exactly `{1, ..., len}`.
pub fn is_dense(orders: &[i32]) -> bool {
    let mut sorted = orders.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .zip(FIRST_ORDER..)
        .all(|(&order, expected)| order == expected)
}

/// Like [`is_dense`], returning the offending orders in the error.
pub fn check_dense(orders: &[i32]) -> Result<(), CoreError> {
    if is_dense(orders) {
        return Ok(());
    }
    let mut sorted = orders.to_vec();
    sorted.sort_unstable();
    Err(CoreError::Internal(format!(
        "slide orders are not contiguous from {FIRST_ORDER}: {sorted:?}"
    )))
}

// ---------------------------------------------------------------------------
// In-memory sequence
// ---------------------------------------------------------------------------

/// One slide's position in a [`SlideSequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceEntry<K> {
    pub key: K,
    pub order: i32,
}

/// In-memory model of one presentation's slide orders.
///
/// Applies the same plans the store executes, so a sequence of operations
/// against the database can be checked against it step by step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideSequence<K> {
    entries: Vec<SequenceEntry<K>>,
}

impl<K: PartialEq + Clone> SlideSequence<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A freshly created presentation: keys get orders `1..=K` in iteration order.
    pub fn from_keys(keys: impl IntoIterator<Item = K>) -> Self {
        let entries = keys
            .into_iter()
            .zip(FIRST_ORDER..)
            .map(|(key, order)| SequenceEntry { key, order })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn order_of(&self, key: &K) -> Option<i32> {
        self.entries.iter().find(|e| &e.key == key).map(|e| e.order)
    }

    /// Orders of all entries, in insertion order of the entries.
    pub fn orders(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.order).collect()
    }

    /// Keys sorted by order. Ties keep insertion order.
    pub fn keys_in_order(&self) -> Vec<K> {
        let mut sorted: Vec<&SequenceEntry<K>> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.order);
        sorted.into_iter().map(|e| e.key.clone()).collect()
    }

    pub fn is_dense(&self) -> bool {
        is_dense(&self.orders())
    }

    /// Apply a bulk shift, returning how many entries moved.
    pub fn shift(&mut self, shift: OrderShift) -> usize {
        if shift.is_noop() {
            return 0;
        }
        let mut moved = 0;
        for entry in &mut self.entries {
            if shift.applies_to(entry.order) {
                entry.order = shift.apply(entry.order);
                moved += 1;
            }
        }
        moved
    }

    /// Insert `key` after `insert_after_order`, returning its order.
    pub fn insert_after(&mut self, insert_after_order: i32, key: K) -> Result<i32, CoreError> {
        let plan = insert_plan(insert_after_order)?;
        self.shift(plan.shift);
        self.entries.push(SequenceEntry {
            key,
            order: plan.new_order,
        });
        Ok(plan.new_order)
    }

    /// Add `key` at an explicit order without moving anything else.
    pub fn push_at(&mut self, order: i32, key: K) {
        self.entries.push(SequenceEntry { key, order });
    }

    /// Remove `key` and compact the tail, returning the removed order.
    pub fn remove(&mut self, key: &K) -> Option<i32> {
        let index = self.entries.iter().position(|e| &e.key == key)?;
        let removed = self.entries.remove(index);
        self.shift(compaction_after_delete(removed.order));
        Some(removed.order)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
