//! Middleware components for HTTP request processing.
//!
//! Currently a single concern: the bearer-token guard that protects all
//! mutating endpoints. Listing and the auth endpoints themselves stay
//! public, so the guard is applied per route group rather than globally.

pub mod auth;
