use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;
use validator::Validate;

use super::{record_action, with_images};
use crate::config::Config;
use crate::error::AppError;
use crate::notifications::{contact, ContactMessage, EmailSender, NotificationTemplates};
use crate::services::dashboard::{self, HomeData};
use crate::services::{daily_records, equipment, gardens, journal_entries, plants};

pub const CONTACT_SUCCESS: &str =
    "Thank you for contacting us! We've received your message and will respond soon.";
pub const CONTACT_FAILURE: &str =
    "There was an error sending your message. Please try again later or contact us directly.";

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn dashboard(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(user_id): Extension<i32>,
) -> Result<Response, AppError> {
    let data = HomeData {
        gardens: gardens::list_for_user(&db, user_id).await?,
        plants: plants::list_for_user(&db, user_id).await?,
        equipment: equipment::list_for_user(&db, user_id).await?,
        daily_records: daily_records::list_for_user(&db, user_id).await?,
        journal_entries: journal_entries::list_for_user(&db, user_id).await?,
    };
    let home = dashboard::home_dashboard(data, Utc::now());

    record_action("dashboard", "home_dashboard", user_id);
    Ok((
        StatusCode::OK,
        Json(json!({
            "total_gardens": home.total_gardens,
            "total_plants": home.total_plants,
            "total_equipment": home.total_equipment,
            "total_daily_records": home.total_daily_records,
            "total_journal_entries": home.total_journal_entries,
            "recent_gardens": with_images(home.recent_gardens),
            "recent_plants": with_images(home.recent_plants),
            "recent_daily_records": home.recent_daily_records,
            "recent_journal_entries": with_images(home.recent_journal_entries),
            "recent_equipment": with_images(home.recent_equipment),
            "all_gardens": with_images(home.all_gardens),
            "plants_by_type": home.plants_by_type,
            "equipment_by_type": home.equipment_by_type,
            "gardens_by_type": home.gardens_by_type,
            "avg_inside_temperature": home.avg_inside_temperature,
            "avg_outside_temperature": home.avg_outside_temperature,
            "avg_inside_humidity": home.avg_inside_humidity,
            "avg_outside_humidity": home.avg_outside_humidity,
            "equipment_under_maintenance": with_images(home.equipment_under_maintenance),
            "equipment_maintenance_requested": with_images(home.equipment_maintenance_requested),
            "operational_equipment_count": home.operational_equipment_count,
        })),
    )
        .into_response())
}

/// Public contact form. Delivery failures answer with a generic error flash.
pub async fn contact(
    Extension(email): Extension<EmailSender>,
    Extension(templates): Extension<Arc<NotificationTemplates>>,
    Extension(config): Extension<Config>,
    Json(payload): Json<ContactMessage>,
) -> Result<Response, AppError> {
    payload.validate()?;

    tracing::Span::current()
        .record("table", "contact")
        .record("action", "contact_form")
        .record("user_email", payload.email.as_str());

    match contact::deliver(&email, &templates, &config.contact_email_to, &payload, Utc::now()).await {
        Ok(()) => {
            tracing::Span::current().record("business_event", "Contact message delivered");
            Ok((StatusCode::OK, Json(json!({"message": CONTACT_SUCCESS}))).into_response())
        }
        Err(e) => {
            tracing::error!("Failed to deliver contact message: {}", e);
            tracing::Span::current().record("error", tracing::field::display(&e));
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": CONTACT_FAILURE})),
            )
                .into_response())
        }
    }
}
