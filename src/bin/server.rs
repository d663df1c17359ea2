use std::sync::Arc;

use axum::routing::get;
use gardenhub_server::{
    app,
    config::Config,
    metrics::init_metrics,
    migrator::Migrator,
    notifications::{EmailSender, NotificationTemplates},
    telemetry::init_telemetry,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    dotenvy::dotenv().ok();

    init_telemetry("gardenhub-server");

    let config = Config::from_env()?;
    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    init_metrics(&db).await;

    let email = EmailSender::new(&config);
    if email.is_mock() {
        tracing::warn!("SENDGRID_API_KEY not set, emails will only be logged");
    }
    let templates = Arc::new(NotificationTemplates::new()?);

    let app = app(db, email, templates, &config)
        .layer(prometheus_layer)
        .route("/metrics", get(|| async move { metric_handle.render() }));

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
