//! # MediaShelf Backend Library
//!
//! This is the core library for MediaShelf, a small backend that manages a
//! manually sortable catalog of media file records (a name plus video, mp3
//! and text links) behind a JSON REST API with JWT-based authentication.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: Modern web framework for HTTP server and routing
//! - **SQLx**: Asynchronous database operations with SQLite
//! - **Tokio**: Async runtime for concurrent operations
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`config`]: Application configuration management
//! - [`db`]: Database schema initialization and migrations
//! - [`error`]: Centralized error handling and HTTP error responses
//! - [`auth`]: Password hashing and JWT token issue/verification
//! - [`metrics`]: Application usage counters
//! - [`middleware`]: Bearer-token guard for mutating endpoints
//! - [`ordering`]: Order assignment and adjacent-swap reordering of records
//! - [`routes`]: HTTP API endpoint handlers
//! - [`state`]: Shared application state and resource management
//! - [`types`]: Data transfer objects and shared type definitions

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod ordering;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
