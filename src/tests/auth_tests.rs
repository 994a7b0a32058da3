use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use super::mk_state;
use crate::auth::{self, AuthError, Claims, TokenSigner};

fn signer() -> TokenSigner {
    TokenSigner::new("test_secret_key_for_testing_only", 60)
}

#[test]
fn test_password_hash_and_verify() {
    let hash = auth::hash_password("secure_password_123").unwrap();
    assert_ne!(hash, "secure_password_123");
    assert!(auth::verify_password("secure_password_123", &hash).unwrap());
    assert!(!auth::verify_password("wrong_password", &hash).unwrap());
}

#[test]
fn test_password_hash_is_salted() {
    let hash1 = auth::hash_password("same_password").unwrap();
    let hash2 = auth::hash_password("same_password").unwrap();
    assert_ne!(hash1, hash2);
    assert!(auth::verify_password("same_password", &hash1).unwrap());
    assert!(auth::verify_password("same_password", &hash2).unwrap());
}

#[test]
fn test_token_roundtrip() {
    let signer = signer();
    let id = Uuid::new_v4();
    let token = signer.issue(id, "alice").unwrap();
    // header.payload.signature
    assert_eq!(token.split('.').count(), 3);

    let user = signer.verify(&token).unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.username, "alice");
}

#[test]
fn test_token_wrong_secret_rejected() {
    let token = signer().issue(Uuid::new_v4(), "alice").unwrap();
    let other = TokenSigner::new("a_completely_different_secret", 60);
    assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
}

#[test]
fn test_garbage_token_rejected() {
    assert!(matches!(signer().verify("invalid.token.here"), Err(AuthError::InvalidToken)));
}

#[test]
fn test_expired_token_rejected() {
    // Encode an already-expired claim set with the same secret.
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        username: "alice".to_string(),
        iat: (now - chrono::Duration::hours(2)).timestamp(),
        exp: (now - chrono::Duration::hours(1)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("test_secret_key_for_testing_only".as_bytes()),
    )
    .unwrap();

    assert!(matches!(signer().verify(&token), Err(AuthError::TokenExpired)));
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let state = mk_state().await;
    let app = crate::routes::router(state);

    let body = json!({ "username": "sam", "password": "longenough" });
    let request = |body: serde_json::Value| {
        Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let resp = app.clone().oneshot(request(body.clone())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.oneshot(request(body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validation() {
    let state = mk_state().await;
    let app = crate::routes::router(state);

    let cases = [
        // Username too short
        json!({ "username": "ab", "password": "longenough" }),
        // Username with invalid characters
        json!({ "username": "bad user!", "password": "longenough" }),
        // Password below the configured minimum of 8
        json!({ "username": "goodname", "password": "short" }),
    ];
    for body in cases {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let state = mk_state().await;
    let app = crate::routes::router(state);

    let register = json!({ "username": "sam", "password": "longenough" });
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(register.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let login = |body: serde_json::Value| {
        Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    // Wrong password and unknown user yield the same status and message.
    let wrong_pw = app
        .clone()
        .oneshot(login(json!({ "username": "sam", "password": "wrongwrong" })))
        .await
        .unwrap();
    let unknown = app
        .clone()
        .oneshot(login(json!({ "username": "nobody", "password": "wrongwrong" })))
        .await
        .unwrap();
    assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let b1 = wrong_pw.into_body().collect().await.unwrap().to_bytes();
    let b2 = unknown.into_body().collect().await.unwrap().to_bytes();
    let v1: serde_json::Value = serde_json::from_slice(&b1).unwrap();
    let v2: serde_json::Value = serde_json::from_slice(&b2).unwrap();
    assert_eq!(v1["error"]["message"], v2["error"]["message"]);

    // Correct credentials produce a token the guard accepts.
    let resp = app
        .clone()
        .oneshot(login(json!({ "username": "sam", "password": "longenough" })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let token: crate::types::TokenResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(token.expires_in, 60 * 60);

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/files")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token.token))
                .body(Body::from(json!({ "name": "clip" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}
