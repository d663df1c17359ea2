use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use serde_json::json;
use tower_cookies::{Cookie, Cookies, Key};
use validator::Validate;

use super::middleware::SESSION_COOKIE;
use crate::entities::user;
use crate::error::{AppError, AppResult};

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Please enter a valid email address."))]
    email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    password: String,
    #[validate(length(min = 2, max = 30, message = "First name must be between 2 and 30 characters long."))]
    first_name: String,
    #[validate(length(min = 2, max = 30, message = "Last name must be between 2 and 30 characters long."))]
    last_name: String,
}

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal("Failed to hash password".into()))
}

fn is_duplicate_key(err: &DbErr) -> bool {
    err.to_string()
        .contains("duplicate key value violates unique constraint")
}

pub async fn register(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let email = payload.email.trim().to_lowercase();
    let taken = user::Entity::find()
        .filter(user::Column::Email.eq(email.clone()))
        .one(db.as_ref())
        .await?;
    if taken.is_some() {
        tracing::Span::current()
            .record("table", "users")
            .record("action", "register_user_failed")
            .record("error", "duplicate_email");
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let now = chrono::Utc::now();
    let new_user = user::ActiveModel {
        email: Set(email),
        password_hash: Set(hash_password(&payload.password)?),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let user = match new_user.insert(db.as_ref()).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration.
        Err(e) if is_duplicate_key(&e) => {
            return Err(AppError::Conflict("Email already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::Span::current()
        .record("table", "users")
        .record("action", "register_user")
        .record("user_id", user.id)
        .record("user_email", &user.email)
        .record("business_event", "User registered successfully");

    metrics::counter!("gardenhub_users_registered_total").increment(1);
    crate::metrics::increment_users();

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Registration successful.", "user": user})),
    )
        .into_response())
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

fn invalid_credentials() -> Response {
    tracing::Span::current()
        .record("table", "users")
        .record("action", "login_user_failed")
        .record("error", "invalid_credentials");
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid email or password"})),
    )
        .into_response()
}

pub async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(key): Extension<Key>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let Some(user) = user::Entity::find()
        .filter(user::Column::Email.eq(payload.email.trim().to_lowercase()))
        .one(db.as_ref())
        .await?
    else {
        return Ok(invalid_credentials());
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal("Invalid password hash in DB".into()))?;

    if Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Ok(invalid_credentials());
    }

    let mut cookie = Cookie::new(SESSION_COOKIE, user.id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.signed(&key).add(cookie);

    tracing::Span::current()
        .record("table", "users")
        .record("action", "login_user")
        .record("user_id", user.id)
        .record("user_email", &user.email)
        .record("business_event", "User logged in successfully");

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Login successful", "user": user})),
    )
        .into_response())
}

pub async fn logout(cookies: Cookies) -> Response {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);

    tracing::Span::current()
        .record("table", "users")
        .record("action", "logout_user");

    (StatusCode::OK, Json(json!({"message": "Logged out"}))).into_response()
}
