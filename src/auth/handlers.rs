use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, RegisterRequest, RegisterResponse, TokenPair},
        repo::User,
        services::{hash_password, is_valid_email, normalize_email, verify_password, JwtKeys},
    },
    error::{ApiJson, AppError, AppResult},
    state::AppState,
};

const BAD_CREDENTIALS: &str = "Bad email or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let email = normalize_email(&payload.email);

    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    if payload.password.is_empty() {
        warn!("empty password");
        return Err(AppError::BadRequest("Password must not be empty".into()));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::Conflict("User already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &email, &hash).await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            msg: "User created",
            user: PublicUser { email: user.email },
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let email = normalize_email(&payload.email);

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(%email, "login unknown email");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%email, user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    }

    let tokens = JwtKeys::from_ref(&state).issue_tokens(user.id)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{send, test_app};
    use serde_json::json;

    #[tokio::test]
    async fn register_returns_created_with_email() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"email": "a@x.com", "password": "p1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"msg": "User created", "user": {"email": "a@x.com"}}));
    }

    #[tokio::test]
    async fn register_twice_conflicts_and_keeps_one_row() {
        let (app, state) = test_app().await;
        let creds = json!({"email": "a@x.com", "password": "p1"});
        let (first, _) = send(&app, "POST", "/register", None, Some(creds)).await;
        assert_eq!(first, StatusCode::CREATED);

        // same address, different case
        let again = json!({"email": "A@X.com", "password": "other"});
        let (second, body) = send(&app, "POST", "/register", None, Some(again)).await;
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["msg"], "User already exists");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&state.db)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let (app, state) = test_app().await;
        send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"email": "a@x.com", "password": "plain-secret"})),
        )
        .await;
        let user = User::find_by_email(&state.db, "a@x.com").await.unwrap().unwrap();
        assert_ne!(user.password_hash, "plain-secret");
        assert!(verify_password("plain-secret", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn register_rejects_missing_field_with_json_400() {
        let (app, _) = test_app().await;
        let (status, body) =
            send(&app, "POST", "/register", None, Some(json!({"email": "a@x.com"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["msg"].is_string());
    }

    #[tokio::test]
    async fn register_rejects_invalid_email() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"email": "not-an-email", "password": "p1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid email");
    }

    #[tokio::test]
    async fn login_returns_tokens_for_registered_user() {
        let (app, state) = test_app().await;
        let creds = json!({"email": "a@x.com", "password": "p1"});
        send(&app, "POST", "/register", None, Some(creds.clone())).await;

        let (status, body) = send(&app, "POST", "/login", None, Some(creds)).await;
        assert_eq!(status, StatusCode::OK);

        let user = User::find_by_email(&state.db, "a@x.com").await.unwrap().unwrap();
        let keys = JwtKeys::from_ref(&state);
        let access = keys.verify(body["access_token"].as_str().unwrap()).unwrap();
        assert_eq!(access.user_id().unwrap(), user.id);
        assert!(body["refresh_token"].is_string());
    }

    #[tokio::test]
    async fn login_wrong_password_is_unauthorized() {
        let (app, _) = test_app().await;
        send(
            &app,
            "POST",
            "/register",
            None,
            Some(json!({"email": "a@x.com", "password": "p1"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"email": "a@x.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], BAD_CREDENTIALS);
    }

    #[tokio::test]
    async fn login_unknown_email_is_unauthorized() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/login",
            None,
            Some(json!({"email": "nobody@x.com", "password": "p1"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], BAD_CREDENTIALS);
    }
}
