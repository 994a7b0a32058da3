use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry: a display name plus up to three media links.
///
/// Wire field names (`videoLink`, `mp3Link`, `textLink`, `createdAt`,
/// `order`) are fixed at this serializer boundary; internally the order
/// column is called `sort_order` because `order` is an SQL keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: Uuid,
    pub name: String,
    pub video_link: Option<String>,
    pub mp3_link: Option<String>,
    pub text_link: Option<String>,
    pub created_at: String,
    #[serde(rename = "order")]
    pub sort_order: i64,
}

/// Body for POST /api/files and PUT /api/files/{id}.
///
/// The generic update never touches `order`; only the reorder endpoint does.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    pub name: String,
    pub video_link: Option<String>,
    pub mp3_link: Option<String>,
    pub text_link: Option<String>,
}

/// Direction for the adjacent-swap reorder operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub id: Uuid,
    pub direction: Direction,
}

/// Query parameters for GET /api/files: `?sort=<field>&order=<asc|desc>`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Generic confirmation body for delete/reorder/register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
