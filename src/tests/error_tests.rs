use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::{validation, AppError, OptionExt};

#[test]
fn test_status_code_mapping() {
    let cases = [
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        (AppError::Conflict("x".into()), StatusCode::CONFLICT),
        (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
        (AppError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::ValidationError { field: "name".into(), message: "bad".into() },
            StatusCode::BAD_REQUEST,
        ),
    ];
    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}

#[test]
fn test_sqlx_error_conversion() {
    let err: AppError = sqlx::Error::RowNotFound.into();
    assert!(matches!(err, AppError::NotFound(_)));

    let err: AppError = sqlx::Error::PoolTimedOut.into();
    assert!(matches!(err, AppError::ServiceUnavailable(_)));
}

#[test]
fn test_option_ext() {
    let some: Option<i32> = Some(1);
    assert_eq!(some.ok_or_not_found("File").unwrap(), 1);

    let none: Option<i32> = None;
    let err = none.ok_or_not_found("File").unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg == "File not found"));
}

#[test]
fn test_validate_name() {
    assert!(validation::validate_name("clip").is_ok());
    assert!(validation::validate_name("  padded  ").is_ok());
    assert!(validation::validate_name("").is_err());
    assert!(validation::validate_name("   ").is_err());
    assert!(validation::validate_name(&"x".repeat(100)).is_ok());
    assert!(validation::validate_name(&"x".repeat(101)).is_err());
}

#[test]
fn test_validate_link() {
    assert!(validation::validate_link("videoLink", None).is_ok());
    assert!(validation::validate_link("videoLink", Some("")).is_ok());
    assert!(validation::validate_link("videoLink", Some("https://example.com/v.mp4")).is_ok());
    assert!(validation::validate_link("videoLink", Some("http://example.com")).is_ok());
    assert!(validation::validate_link("videoLink", Some("not a url")).is_err());
    assert!(validation::validate_link("videoLink", Some("ftp://example.com/x")).is_err());

    let long = format!("https://example.com/{}", "a".repeat(validation::MAX_LINK_LEN));
    assert!(validation::validate_link("videoLink", Some(&long)).is_err());

    // The bound counts characters, not bytes: a link of exactly 2000 chars
    // passes even when multibyte characters push it past 2000 bytes.
    let prefix = "https://example.com/";
    let multibyte = format!("{}{}", prefix, "ä".repeat(validation::MAX_LINK_LEN - prefix.chars().count()));
    assert!(multibyte.len() > validation::MAX_LINK_LEN);
    assert_eq!(multibyte.chars().count(), validation::MAX_LINK_LEN);
    assert!(validation::validate_link("videoLink", Some(&multibyte)).is_ok());
}

#[test]
fn test_validate_username_and_password() {
    assert!(validation::validate_username("alice").is_ok());
    assert!(validation::validate_username("user_name-42").is_ok());
    assert!(validation::validate_username("ab").is_err());
    assert!(validation::validate_username(&"x".repeat(51)).is_err());
    assert!(validation::validate_username("no spaces").is_err());

    assert!(validation::validate_password("longenough", 8).is_ok());
    assert!(validation::validate_password("short", 8).is_err());
}
