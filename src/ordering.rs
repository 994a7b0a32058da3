//! Order assignment and adjacent-swap reordering.
//!
//! The catalog is manually sequenced through an integer `sort_order` column.
//! New records append at `max(sort_order) + 1`; a reorder swaps the values
//! of two neighbors in the canonical ordering. Deletes leave gaps.
//!
//! Both multi-step sequences (read max then insert, read listing then write
//! two rows) run inside a transaction so concurrent requests cannot
//! interleave and duplicate a sort_order value.

use sqlx::{Row, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::types::Direction;

/// Canonical ordering of the catalog: sort_order ascending, creation time
/// descending as tiebreak.
pub const CANONICAL_ORDER: &str = "sort_order ASC, created_at DESC";

/// Computes the sort_order for a newly created record: `max + 1`, or 0 for
/// an empty catalog. Pure read; run it on the same transaction as the
/// insert that uses the result.
pub async fn next_sort_order<'e, E>(executor: E) -> sqlx::Result<i64>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar("SELECT COALESCE(MAX(sort_order) + 1, 0) FROM files")
        .fetch_one(executor)
        .await
}

/// Index of the neighbor a record at `index` swaps with, or `None` when the
/// move would cross the boundary of the listing.
pub fn neighbor_index(len: usize, index: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up if index > 0 => Some(index - 1),
        Direction::Down if index + 1 < len => Some(index + 1),
        _ => None,
    }
}

/// Swaps `sort_order` between the record `id` and its immediate neighbor in
/// the canonical ordering.
///
/// Returns `Ok(true)` when a swap was persisted, `Ok(false)` for the silent
/// boundary no-op, `Err(NotFound)` when `id` does not exist. The swap reads
/// both current values before writing either, so the multiset of
/// sort_order values is preserved exactly.
pub async fn reorder(db: &SqlitePool, id: Uuid, direction: Direction) -> AppResult<bool> {
    let mut tx = db.begin().await?;

    let rows = sqlx::query(&format!("SELECT id, sort_order FROM files ORDER BY {}", CANONICAL_ORDER))
        .fetch_all(&mut *tx)
        .await?;

    let listing: Vec<(String, i64)> = rows
        .iter()
        .map(|r| (r.get::<String, _>("id"), r.get::<i64, _>("sort_order")))
        .collect();

    let id_str = id.to_string();
    let index = listing
        .iter()
        .position(|(rid, _)| *rid == id_str)
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let Some(other) = neighbor_index(listing.len(), index, direction) else {
        // Already at the boundary in the requested direction.
        return Ok(false);
    };

    let (_, target_order) = &listing[index];
    let (other_id, other_order) = &listing[other];

    sqlx::query("UPDATE files SET sort_order = ?1 WHERE id = ?2")
        .bind(other_order)
        .bind(&id_str)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE files SET sort_order = ?1 WHERE id = ?2")
        .bind(target_order)
        .bind(other_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}
