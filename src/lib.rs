pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod migrator;
pub mod notifications;
pub mod services;
pub mod telemetry;

pub use sea_orm;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::notifications::{EmailSender, NotificationTemplates};

/// Room for a 5 MiB image plus the multipart framing around it.
const BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Builds the application router. The Prometheus layer and `/metrics` are
/// attached by the binary since the recorder is process-global.
pub fn app(
    db: DatabaseConnection,
    email: EmailSender,
    templates: Arc<NotificationTemplates>,
    config: &Config,
) -> Router {
    let public_routes = Router::new()
        .route("/health", get(api::home::health_check))
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/logout", post(api::auth::logout))
        .route("/contact", post(api::home::contact));

    let protected_routes = Router::new()
        .route("/dashboard", get(api::home::dashboard))
        .route(
            "/users",
            get(api::user::get_user)
                .patch(api::user::update_user)
                .delete(api::user::delete_user),
        )
        // Gardens
        .route(
            "/gardens",
            get(api::gardens::list_gardens).post(api::gardens::create_garden),
        )
        .route(
            "/gardens/:id",
            get(api::gardens::get_garden)
                .patch(api::gardens::update_garden)
                .delete(api::gardens::delete_garden),
        )
        .route("/gardens/:id/details", get(api::gardens::garden_details))
        .route("/gardens/:id/dashboard", get(api::gardens::garden_dashboard))
        .route("/gardens/:id/image", post(api::gardens::upload_garden_image))
        .route("/gardens/:id/plants", get(api::plants::list_garden_plants))
        .route(
            "/gardens/:id/equipment",
            get(api::equipment::list_garden_equipment),
        )
        .route(
            "/gardens/:id/daily-records",
            get(api::daily_records::list_garden_daily_records),
        )
        .route(
            "/gardens/:id/journal-entries",
            get(api::journal_entries::list_garden_journal_entries),
        )
        .route("/gardens/:id/care", get(api::garden_care::garden_care_summary))
        .route(
            "/gardens/:id/care/dashboard",
            get(api::garden_care::garden_care_dashboard),
        )
        .route(
            "/gardens/:id/reminders",
            get(api::reminders::list_garden_reminders),
        )
        // Plants
        .route(
            "/plants",
            get(api::plants::list_plants).post(api::plants::create_plant),
        )
        .route(
            "/plants/:id",
            get(api::plants::get_plant)
                .patch(api::plants::update_plant)
                .delete(api::plants::delete_plant),
        )
        .route("/plants/:id/image", post(api::plants::upload_plant_image))
        .route("/plants/:id/care", get(api::plant_care::plant_care_summary))
        .route(
            "/plants/:id/care/dashboard",
            get(api::plant_care::plant_care_dashboard),
        )
        // Equipment
        .route(
            "/equipment",
            get(api::equipment::list_equipment).post(api::equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(api::equipment::get_equipment)
                .patch(api::equipment::update_equipment)
                .delete(api::equipment::delete_equipment),
        )
        .route(
            "/equipment/:id/image",
            post(api::equipment::upload_equipment_image),
        )
        .route(
            "/equipment/:id/maintenance",
            get(api::equipment::maintenance_history),
        )
        .route(
            "/equipment/:id/maintenance/active",
            get(api::equipment::active_maintenance),
        )
        .route(
            "/equipment/:id/maintenance/request",
            post(api::equipment::request_maintenance),
        )
        .route(
            "/equipment/:id/maintenance/start",
            post(api::equipment::start_maintenance),
        )
        .route(
            "/equipment/:id/maintenance/complete",
            post(api::equipment::complete_maintenance),
        )
        // Daily records
        .route(
            "/daily-records",
            get(api::daily_records::list_daily_records)
                .post(api::daily_records::create_daily_record),
        )
        .route(
            "/daily-records/:id",
            get(api::daily_records::get_daily_record)
                .patch(api::daily_records::update_daily_record)
                .delete(api::daily_records::delete_daily_record),
        )
        // Journal
        .route(
            "/journal-entries",
            get(api::journal_entries::list_journal_entries)
                .post(api::journal_entries::create_journal_entry),
        )
        .route(
            "/journal-entries/dashboard",
            get(api::journal_entries::journal_dashboard),
        )
        .route(
            "/journal-entries/:id",
            get(api::journal_entries::get_journal_entry)
                .patch(api::journal_entries::update_journal_entry)
                .delete(api::journal_entries::delete_journal_entry),
        )
        .route(
            "/journal-entries/:id/image",
            post(api::journal_entries::upload_journal_image),
        )
        // Care activities
        .route(
            "/garden-care",
            get(api::garden_care::list_garden_care).post(api::garden_care::create_garden_care),
        )
        .route(
            "/garden-care/:id",
            get(api::garden_care::get_garden_care)
                .patch(api::garden_care::update_garden_care)
                .delete(api::garden_care::delete_garden_care),
        )
        .route(
            "/garden-care/:id/image",
            post(api::garden_care::upload_garden_care_image),
        )
        .route(
            "/plant-care",
            get(api::plant_care::list_plant_care).post(api::plant_care::create_plant_care),
        )
        .route(
            "/plant-care/:id",
            get(api::plant_care::get_plant_care)
                .patch(api::plant_care::update_plant_care)
                .delete(api::plant_care::delete_plant_care),
        )
        .route(
            "/plant-care/:id/image",
            post(api::plant_care::upload_plant_care_image),
        )
        // Reminders
        .route(
            "/reminders",
            get(api::reminders::list_reminders).post(api::reminders::create_reminder),
        )
        .route("/reminders/quick", post(api::reminders::quick_reminder))
        .route("/reminders/range", get(api::reminders::reminders_in_range))
        .route(
            "/reminders/by-type/:type",
            get(api::reminders::reminders_by_type),
        )
        .route(
            "/reminders/by-priority/:priority",
            get(api::reminders::reminders_by_priority),
        )
        .route(
            "/reminders/:id",
            get(api::reminders::get_reminder)
                .patch(api::reminders::update_reminder)
                .delete(api::reminders::delete_reminder),
        )
        .route(
            "/reminders/:id/complete",
            post(api::reminders::complete_reminder),
        )
        .route(
            "/reminders/:id/incomplete",
            post(api::reminders::incomplete_reminder),
        )
        .route("/reminders/:id/snooze", post(api::reminders::snooze_reminder))
        .route_layer(axum::middleware::from_fn(api::middleware::auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(Arc::new(db)))
        .layer(Extension(email))
        .layer(Extension(templates))
        .layer(Extension(config.clone()))
        .layer(Extension(api::middleware::session_key(
            config.session_secret.as_deref(),
        )))
        .layer(tower_cookies::CookieManagerLayer::new())
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str());

                    // "METHOD /route/:template" keeps span names low-cardinality
                    let span_name = if let Some(path) = matched_path {
                        format!("{} {}", request.method(), path)
                    } else {
                        format!("{} {}", request.method(), request.uri().path())
                    };

                    let user_ip = request
                        .headers()
                        .get("x-forwarded-for")
                        .and_then(|v| v.to_str().ok())
                        .or_else(|| {
                            request
                                .headers()
                                .get("x-real-ip")
                                .and_then(|v| v.to_str().ok())
                        })
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        user_ip = user_ip,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        // Filled in by handlers
                        table = tracing::field::Empty,
                        action = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        user_email = tracing::field::Empty,
                        garden_id = tracing::field::Empty,
                        plant_id = tracing::field::Empty,
                        business_event = tracing::field::Empty,
                        error = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(|_request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(cors_layer(&config.cors_origin))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

fn cors_layer(origin: &str) -> tower_http::cors::CorsLayer {
    let origin = origin.parse::<HeaderValue>().unwrap_or_else(|_| {
        tracing::warn!("Invalid CORS_ORIGIN `{}`, falling back to localhost", origin);
        HeaderValue::from_static("http://localhost:3000")
    });

    tower_http::cors::CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    use crate::entities::{enums::MaintenanceStatus, user};
    use crate::services::equipment::{self, tests as equipment_fixtures};

    const PASSWORD: &str = "correct horse battery";

    fn test_app(db: DatabaseConnection) -> Router {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/gardenhub".to_string()),
            "SESSION_SECRET" => Some("x".repeat(64)),
            _ => None,
        })
        .unwrap();
        let templates = Arc::new(NotificationTemplates::new().unwrap());
        app(db, EmailSender::mock(&config.email_from), templates, &config)
    }

    fn empty_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    fn gardener() -> user::Model {
        user::Model {
            id: 5,
            email: "ada@garden.test".into(),
            password_hash: api::auth::hash_password(PASSWORD).unwrap(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Logs in through the router and returns the `name=value` session cookie.
    async fn login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"email": "ada@garden.test", "password": PASSWORD})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()["set-cookie"].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = test_app(empty_db())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn garden_routes_need_a_session() {
        let response = test_app(empty_db())
            .oneshot(Request::builder().uri("/gardens").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn a_hand_written_session_cookie_is_refused() {
        let response = test_app(empty_db())
            .oneshot(
                Request::builder()
                    .uri("/gardens")
                    .header("cookie", "gardenhub_user=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_issues_a_signed_session() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[gardener()]])
            .into_connection();
        let cookie = login(&test_app(db)).await;
        assert!(cookie.starts_with("gardenhub_user="));
        assert_ne!(cookie, "gardenhub_user=5");
    }

    #[tokio::test]
    async fn an_invalid_garden_is_rejected_before_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[gardener()]])
            .into_connection();
        let app = test_app(db);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/gardens")
                    .header("content-type", "application/json")
                    .header("cookie", cookie)
                    .body(Body::from(
                        serde_json::json!({
                            "name": "",
                            "description": "Raised beds by the fence",
                            "location": "Outdoor",
                            "garden_type": "Vegetable",
                            "grow_method": "Soil",
                            "start_date": "2024-03-01",
                            "end_date": "2024-10-31"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn starting_work_already_underway_is_a_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[gardener()]])
            .append_query_results([[equipment_fixtures::sample(
                1,
                MaintenanceStatus::UnderMaintenance,
            )]])
            .append_query_results([[equipment_fixtures::record(
                MaintenanceStatus::UnderMaintenance,
                None,
            )]])
            .into_connection();
        let app = test_app(db);
        let cookie = login(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/equipment/1/maintenance/start")
                    .header("cookie", cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["warning"], equipment::NOT_REQUESTED);
        assert_eq!(
            body["warning"],
            "Equipment must be in 'Maintenance Requested' status to start maintenance."
        );
    }

    #[tokio::test]
    async fn an_invalid_contact_form_is_rejected() {
        let response = test_app(empty_db())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/contact")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "name": "A",
                            "email": "not-an-email",
                            "subject": "Hi",
                            "category": "GeneralInquiry",
                            "message": "short"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
