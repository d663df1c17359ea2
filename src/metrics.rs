use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::enums::MaintenanceStatus;
use crate::entities::{equipment, garden, plant, reminder, user};

pub async fn init_metrics(db: &DatabaseConnection) {
    let user_count = user::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("gardenhub_users_total").set(user_count as f64);

    let garden_count = garden::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("gardenhub_gardens_total").set(garden_count as f64);

    let plant_count = plant::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("gardenhub_plants_total").set(plant_count as f64);

    let equipment_count = equipment::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("gardenhub_equipment_total").set(equipment_count as f64);

    for (label, status) in [
        ("requested", MaintenanceStatus::MaintenanceRequested),
        ("under_maintenance", MaintenanceStatus::UnderMaintenance),
    ] {
        let count = equipment::Entity::find()
            .filter(equipment::Column::MaintenanceStatus.eq(status))
            .count(db)
            .await
            .unwrap_or(0);
        metrics::gauge!("gardenhub_equipment_maintenance", "status" => label).set(count as f64);
    }

    let open_reminders = reminder::Entity::find()
        .filter(reminder::Column::IsCompleted.eq(false))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("gardenhub_open_reminders").set(open_reminders as f64);

    tracing::info!(
        "Initialized metrics: Users={}, Gardens={}, Plants={}, Equipment={}",
        user_count,
        garden_count,
        plant_count,
        equipment_count
    );
}

pub fn increment_users() {
    metrics::gauge!("gardenhub_users_total").increment(1.0);
}

/// Tracks the per-table totals seeded by `init_metrics`.
pub fn adjust_total(table: &'static str, delta: f64) {
    let name = match table {
        "gardens" => "gardenhub_gardens_total",
        "plants" => "gardenhub_plants_total",
        "equipment" => "gardenhub_equipment_total",
        _ => return,
    };
    metrics::gauge!(name).increment(delta);
}

pub fn increment_records_created(table: &'static str) {
    metrics::counter!("gardenhub_records_created_total", "table" => table).increment(1);
}

pub fn increment_maintenance_transition(stage: &'static str) {
    metrics::counter!("gardenhub_maintenance_transitions_total", "stage" => stage).increment(1);
}

pub fn increment_reminders_completed(recurring: bool) {
    let recurring = if recurring { "true" } else { "false" };
    metrics::counter!("gardenhub_reminders_completed_total", "recurring" => recurring).increment(1);
}

pub fn increment_notifications_sent(channel: &str) {
    metrics::counter!("gardenhub_notifications_sent_total", "channel" => channel.to_string()).increment(1);
}

pub fn increment_notifications_failed(channel: &str) {
    metrics::counter!("gardenhub_notifications_failed_total", "channel" => channel.to_string()).increment(1);
}
