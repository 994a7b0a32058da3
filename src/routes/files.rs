use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::{
    error::{validation, AppError, AppResult, OptionExt},
    ordering,
    state::AppState,
    types::{FilePayload, FileRecord, ListQuery, MessageResponse, ReorderRequest},
};

fn record_from_row(r: &SqliteRow) -> AppResult<FileRecord> {
    let id = Uuid::parse_str(r.get::<String, _>("id").as_str())
        .map_err(|e| AppError::Database(format!("Corrupt record id: {}", e)))?;
    Ok(FileRecord {
        id,
        name: r.get::<String, _>("name"),
        video_link: r.get::<Option<String>, _>("video_link"),
        mp3_link: r.get::<Option<String>, _>("mp3_link"),
        text_link: r.get::<Option<String>, _>("text_link"),
        created_at: r.get::<String, _>("created_at"),
        sort_order: r.get::<i64, _>("sort_order"),
    })
}

fn validate_payload(payload: &FilePayload) -> AppResult<()> {
    validation::validate_name(&payload.name)?;
    validation::validate_link("videoLink", payload.video_link.as_deref())?;
    validation::validate_link("mp3Link", payload.mp3_link.as_deref())?;
    validation::validate_link("textLink", payload.text_link.as_deref())?;
    Ok(())
}

// Empty link strings from the frontend are stored as NULL.
fn normalize_link(link: &Option<String>) -> Option<&str> {
    link.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// GET /api/files?sort=<order|name|createdAt>&order=<asc|desc>
///
/// Public. Returns the fully materialized catalog. The default is the
/// canonical ordering; for any other primary sort field `createdAt`
/// descending is applied as tiebreak to keep the output stable.
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let column = match query.sort.as_deref() {
        None | Some("order") => "sort_order",
        Some("name") => "name",
        Some("createdAt") => "created_at",
        Some(other) => {
            return Err(AppError::BadRequest(format!("Unknown sort field: {}", other)));
        }
    };
    let dir = match query.order.as_deref() {
        None | Some("asc") => "ASC",
        Some("desc") => "DESC",
        Some(other) => {
            return Err(AppError::BadRequest(format!("Unknown sort direction: {}", other)));
        }
    };

    // Column and direction come from the whitelists above, never from raw input.
    let order_by = if column == "created_at" {
        format!("created_at {}", dir)
    } else {
        format!("{} {}, created_at DESC", column, dir)
    };
    let sql = format!(
        "SELECT id, name, video_link, mp3_link, text_link, created_at, sort_order FROM files ORDER BY {}",
        order_by
    );

    let rows = sqlx::query(&sql).fetch_all(&state.db).await?;
    let items = rows.iter().map(record_from_row).collect::<AppResult<Vec<FileRecord>>>()?;
    Ok(Json(items))
}

/// POST /api/files (auth required)
///
/// Validates the payload, assigns the next sort_order and inserts, all in
/// one transaction so concurrent creates cannot read the same maximum.
pub async fn create_file(
    State(state): State<AppState>,
    Json(payload): Json<FilePayload>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let id = Uuid::new_v4();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut tx = state.db.begin().await?;
    let sort_order = ordering::next_sort_order(&mut *tx).await?;
    sqlx::query(
        r#"INSERT INTO files (id, name, video_link, mp3_link, text_link, sort_order, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
    )
    .bind(id.to_string())
    .bind(payload.name.trim())
    .bind(normalize_link(&payload.video_link))
    .bind(normalize_link(&payload.mp3_link))
    .bind(normalize_link(&payload.text_link))
    .bind(sort_order)
    .bind(&created_at)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    state.metrics.inc_records_created();
    tracing::info!(%id, sort_order, "created file record");

    let record = FileRecord {
        id,
        name: payload.name.trim().to_string(),
        video_link: normalize_link(&payload.video_link).map(str::to_string),
        mp3_link: normalize_link(&payload.mp3_link).map(str::to_string),
        text_link: normalize_link(&payload.text_link).map(str::to_string),
        created_at,
        sort_order,
    };
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/files/{id} (auth required)
///
/// Updates name and link fields only; sort_order is exclusively the
/// reorder endpoint's business.
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FilePayload>,
) -> AppResult<impl IntoResponse> {
    validate_payload(&payload)?;

    // One transaction, so a concurrent delete cannot slip between the
    // update and the reload of the record.
    let mut tx = state.db.begin().await?;

    let result = sqlx::query(
        r#"UPDATE files SET name = ?1, video_link = ?2, mp3_link = ?3, text_link = ?4
           WHERE id = ?5"#,
    )
    .bind(payload.name.trim())
    .bind(normalize_link(&payload.video_link))
    .bind(normalize_link(&payload.mp3_link))
    .bind(normalize_link(&payload.text_link))
    .bind(id.to_string())
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("File not found".to_string()));
    }

    let row = sqlx::query(
        "SELECT id, name, video_link, mp3_link, text_link, created_at, sort_order FROM files WHERE id = ?1",
    )
    .bind(id.to_string())
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_not_found("File")?;

    tx.commit().await?;

    state.metrics.inc_records_updated();
    Ok(Json(record_from_row(&row)?))
}

/// DELETE /api/files/{id} (auth required)
///
/// Remaining records keep their sort_order values; gaps are permitted.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let result = sqlx::query("DELETE FROM files WHERE id = ?1")
        .bind(id.to_string())
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("File not found".to_string()));
    }

    state.metrics.inc_records_deleted();
    tracing::info!(%id, "deleted file record");
    Ok(Json(MessageResponse::new("File deleted")))
}

/// POST /api/files/reorder (auth required)
///
/// Body: `{ "id": ..., "direction": "up" | "down" }`. Moving past the
/// boundary of the listing succeeds silently without changing anything.
pub async fn reorder_file(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let swapped = ordering::reorder(&state.db, req.id, req.direction).await?;
    if swapped {
        state.metrics.inc_reorders();
        tracing::info!(id = %req.id, direction = ?req.direction, "reordered file record");
    }
    Ok(Json(MessageResponse::new("Order updated")))
}
