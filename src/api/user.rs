use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use serde::Deserialize;
use serde_json::json;
use tower_cookies::{Cookie, Cookies};
use validator::Validate;

use super::{auth::hash_password, middleware::SESSION_COOKIE, record_action};
use crate::entities::user;
use crate::error::{AppError, AppResult};

#[derive(Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 30, message = "First name must be between 2 and 30 characters long."))]
    first_name: Option<String>,
    #[validate(length(min = 2, max = 30, message = "Last name must be between 2 and 30 characters long."))]
    last_name: Option<String>,
    #[validate(email(message = "Please enter a valid email address."))]
    email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    password: Option<String>,
}

async fn current_user(db: &DatabaseConnection, user_id: i32) -> AppResult<user::Model> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("User"))
}

pub async fn get_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
) -> Result<Response, AppError> {
    let user = current_user(&db, user_id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "id": user.id,
            "email": user.email,
            "first_name": user.first_name,
            "last_name": user.last_name,
            "full_name": user.full_name(),
            "created_at": user.created_at,
        })),
    )
        .into_response())
}

pub async fn update_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let user = current_user(&db, user_id).await?;

    let mut active_user = user.into_active_model();
    if let Some(first_name) = payload.first_name {
        active_user.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active_user.last_name = Set(last_name);
    }
    if let Some(email) = payload.email {
        let email = email.trim().to_lowercase();
        let taken = user::Entity::find()
            .filter(user::Column::Email.eq(email.clone()))
            .filter(user::Column::Id.ne(user_id))
            .one(db.as_ref())
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict("Email already exists".into()));
        }
        active_user.email = Set(email);
    }
    if let Some(password) = payload.password {
        active_user.password_hash = Set(hash_password(&password)?);
    }
    active_user.updated_at = Set(chrono::Utc::now());

    let user = active_user.update(db.as_ref()).await?;
    record_action("users", "update_user", user_id);

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Profile updated.", "user": user})),
    )
        .into_response())
}

/// Removes the account and everything it owns; the session ends with it.
pub async fn delete_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
    cookies: Cookies,
) -> Result<Response, AppError> {
    let result = user::Entity::delete_by_id(user_id).exec(db.as_ref()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("User"));
    }

    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);

    record_action("users", "delete_user", user_id);
    metrics::gauge!("gardenhub_users_total").decrement(1.0);

    Ok((StatusCode::OK, Json(json!({"message": "User deleted"}))).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(first_name: Option<&str>, last_name: Option<&str>) -> UpdateUserRequest {
        UpdateUserRequest {
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            email: None,
            password: None,
        }
    }

    #[test]
    fn names_are_checked_only_when_changed() {
        assert!(update(None, None).validate().is_ok());
        assert!(update(Some("Ada"), Some("Lovelace")).validate().is_ok());

        let errors = update(Some("A"), Some(&"x".repeat(31))).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
        assert!(errors.field_errors().contains_key("last_name"));
    }
}
