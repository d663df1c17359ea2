use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use validator::Validate;

use super::{datetime::utc, gardens, images::UploadedImage, owned};
use crate::entities::enums::{EquipmentType, MaintenanceStatus};
use crate::entities::prelude::*;
use crate::entities::{equipment, maintenance_record};
use crate::error::{AppError, AppResult};

pub const ALREADY_REQUESTED: &str =
    "There is already an active maintenance request for this equipment.";
pub const NO_ACTIVE_REQUEST: &str = "No active maintenance request found for this equipment.";
pub const NOT_REQUESTED: &str =
    "Equipment must be in 'Maintenance Requested' status to start maintenance.";
pub const NO_ACTIVE_RECORD: &str = "No active maintenance record found for this equipment.";
pub const NOT_UNDER_MAINTENANCE: &str =
    "Equipment must be 'Under Maintenance' to complete maintenance.";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EquipmentInput {
    pub garden_id: i32,
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters."))]
    pub name: String,
    #[validate(length(min = 2, max = 500, message = "Description must be between 2 and 500 characters."))]
    pub description: String,
    pub equipment_type: EquipmentType,
    #[serde(with = "utc")]
    pub purchase_date: DateTime<Utc>,
    #[validate(range(min = 0.0, message = "Purchase price cannot be negative."))]
    pub purchase_price: f64,
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    input: EquipmentInput,
) -> AppResult<equipment::Model> {
    gardens::require_owned(db, input.garden_id, user_id).await?;

    let active_model = equipment::ActiveModel {
        garden_id: Set(input.garden_id),
        user_id: Set(user_id),
        name: Set(input.name),
        description: Set(input.description),
        equipment_type: Set(input.equipment_type),
        purchase_date: Set(input.purchase_date),
        purchase_price: Set(input.purchase_price),
        last_maintenance_date: Set(None),
        maintenance_status: Set(MaintenanceStatus::Operational),
        image_data: Set(None),
        image_type: Set(None),
        ..Default::default()
    };
    Ok(active_model.insert(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<Option<equipment::Model>> {
    Ok(Equipment::find_by_id(id).one(db).await?)
}

pub async fn require_owned(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
) -> AppResult<equipment::Model> {
    owned(get(db, id).await?, user_id, |e| e.user_id, "Equipment")
}

pub async fn list_for_user(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<equipment::Model>> {
    Ok(Equipment::find()
        .filter(equipment::Column::UserId.eq(user_id))
        .order_by_asc(equipment::Column::Name)
        .all(db)
        .await?)
}

pub async fn list_by_garden(
    db: &DatabaseConnection,
    garden_id: i32,
    user_id: i32,
) -> AppResult<Vec<equipment::Model>> {
    gardens::require_owned(db, garden_id, user_id).await?;
    Ok(Equipment::find()
        .filter(equipment::Column::GardenId.eq(garden_id))
        .order_by_asc(equipment::Column::Name)
        .all(db)
        .await?)
}

pub async fn list_by_status(
    db: &DatabaseConnection,
    user_id: i32,
    status: MaintenanceStatus,
) -> AppResult<Vec<equipment::Model>> {
    Ok(Equipment::find()
        .filter(equipment::Column::UserId.eq(user_id))
        .filter(equipment::Column::MaintenanceStatus.eq(status))
        .order_by_asc(equipment::Column::Name)
        .all(db)
        .await?)
}

pub async fn list_by_garden_and_status(
    db: &DatabaseConnection,
    garden_id: i32,
    user_id: i32,
    status: MaintenanceStatus,
) -> AppResult<Vec<equipment::Model>> {
    gardens::require_owned(db, garden_id, user_id).await?;
    Ok(Equipment::find()
        .filter(equipment::Column::GardenId.eq(garden_id))
        .filter(equipment::Column::MaintenanceStatus.eq(status))
        .order_by_asc(equipment::Column::Name)
        .all(db)
        .await?)
}

/// Edits descriptive fields only. Image and maintenance state are untouched.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    input: EquipmentInput,
) -> AppResult<Option<equipment::Model>> {
    let Some(existing) = get(db, id).await? else {
        return Ok(None);
    };
    let existing = owned(Some(existing), user_id, |e| e.user_id, "Equipment")?;
    if existing.garden_id != input.garden_id {
        gardens::require_owned(db, input.garden_id, user_id).await?;
    }

    let mut active_model = existing.into_active_model();
    active_model.garden_id = Set(input.garden_id);
    active_model.name = Set(input.name);
    active_model.description = Set(input.description);
    active_model.equipment_type = Set(input.equipment_type);
    active_model.purchase_date = Set(input.purchase_date);
    active_model.purchase_price = Set(input.purchase_price);

    Ok(Some(active_model.update(db).await?))
}

pub async fn set_image(
    db: &DatabaseConnection,
    id: i32,
    user_id: i32,
    image: UploadedImage,
) -> AppResult<equipment::Model> {
    let existing = require_owned(db, id, user_id).await?;
    let mut active_model = existing.into_active_model();
    active_model.image_data = Set(Some(image.data));
    active_model.image_type = Set(Some(image.content_type));
    Ok(active_model.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32, user_id: i32) -> AppResult<bool> {
    let Some(existing) = get(db, id).await? else {
        return Ok(false);
    };
    owned(Some(existing), user_id, |e| e.user_id, "Equipment")?;
    let result = Equipment::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn exists(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
    let count = Equipment::find()
        .filter(equipment::Column::Id.eq(id))
        .count(db)
        .await?;
    Ok(count > 0)
}

async fn find_active<C: ConnectionTrait>(
    conn: &C,
    equipment_id: i32,
) -> AppResult<Option<maintenance_record::Model>> {
    Ok(MaintenanceRecord::find()
        .filter(maintenance_record::Column::EquipmentId.eq(equipment_id))
        .filter(maintenance_record::Column::Status.is_in([
            MaintenanceStatus::MaintenanceRequested,
            MaintenanceStatus::UnderMaintenance,
        ]))
        .order_by_desc(maintenance_record::Column::RequestDate)
        .one(conn)
        .await?)
}

async fn find_owned_equipment<C: ConnectionTrait>(
    conn: &C,
    equipment_id: i32,
    user_id: i32,
) -> AppResult<equipment::Model> {
    let found = Equipment::find_by_id(equipment_id).one(conn).await?;
    owned(found, user_id, |e| e.user_id, "Equipment")
}

pub async fn active_maintenance_record(
    db: &DatabaseConnection,
    equipment_id: i32,
    user_id: i32,
) -> AppResult<Option<maintenance_record::Model>> {
    require_owned(db, equipment_id, user_id).await?;
    find_active(db, equipment_id).await
}

pub async fn maintenance_history(
    db: &DatabaseConnection,
    equipment_id: i32,
    user_id: i32,
) -> AppResult<Vec<maintenance_record::Model>> {
    require_owned(db, equipment_id, user_id).await?;
    Ok(MaintenanceRecord::find()
        .filter(maintenance_record::Column::EquipmentId.eq(equipment_id))
        .order_by_desc(maintenance_record::Column::RequestDate)
        .all(db)
        .await?)
}

fn check_can_request(active: Option<&maintenance_record::Model>) -> AppResult<()> {
    match active {
        Some(_) => Err(AppError::InvalidTransition(ALREADY_REQUESTED.into())),
        None => Ok(()),
    }
}

fn check_can_start(active: Option<maintenance_record::Model>) -> AppResult<maintenance_record::Model> {
    let record = active.ok_or_else(|| AppError::InvalidTransition(NO_ACTIVE_REQUEST.into()))?;
    if record.status != MaintenanceStatus::MaintenanceRequested {
        return Err(AppError::InvalidTransition(NOT_REQUESTED.into()));
    }
    Ok(record)
}

fn check_can_complete(
    active: Option<maintenance_record::Model>,
) -> AppResult<maintenance_record::Model> {
    let record = active.ok_or_else(|| AppError::InvalidTransition(NO_ACTIVE_RECORD.into()))?;
    if record.status != MaintenanceStatus::UnderMaintenance {
        return Err(AppError::InvalidTransition(NOT_UNDER_MAINTENANCE.into()));
    }
    Ok(record)
}

/// Completion notes are appended below whatever was written at request time.
pub fn merge_completion_notes(existing: Option<String>, notes: Option<&str>) -> Option<String> {
    let notes = match notes.map(str::trim) {
        Some(n) if !n.is_empty() => n,
        _ => return existing,
    };
    match existing {
        Some(old) if !old.trim().is_empty() => Some(format!("{old}\n\nCompletion Notes: {notes}")),
        _ => Some(notes.to_string()),
    }
}

fn record_started(
    record: maintenance_record::Model,
    now: DateTime<Utc>,
) -> maintenance_record::ActiveModel {
    let mut record = record.into_active_model();
    record.status = Set(MaintenanceStatus::UnderMaintenance);
    record.maintenance_start_date = Set(Some(now));
    record
}

fn record_completed(
    record: maintenance_record::Model,
    notes: Option<&str>,
    now: DateTime<Utc>,
) -> maintenance_record::ActiveModel {
    let merged = merge_completion_notes(record.notes.clone(), notes);
    let mut record = record.into_active_model();
    record.status = Set(MaintenanceStatus::Completed);
    record.maintenance_end_date = Set(Some(now));
    record.notes = Set(merged);
    record
}

/// Equipment moved to `status`. Going back to operational stamps the service date.
fn equipment_in(
    equipment: equipment::Model,
    status: MaintenanceStatus,
    now: DateTime<Utc>,
) -> equipment::ActiveModel {
    let mut equipment = equipment.into_active_model();
    equipment.maintenance_status = Set(status);
    if status == MaintenanceStatus::Operational {
        equipment.last_maintenance_date = Set(Some(now));
    }
    equipment
}

pub async fn request_maintenance(
    db: &DatabaseConnection,
    equipment_id: i32,
    user_id: i32,
    notes: Option<String>,
) -> AppResult<maintenance_record::Model> {
    let txn = db.begin().await?;

    let equipment = find_owned_equipment(&txn, equipment_id, user_id).await?;
    check_can_request(find_active(&txn, equipment_id).await?.as_ref())?;

    let record = maintenance_record::ActiveModel {
        equipment_id: Set(equipment_id),
        status: Set(MaintenanceStatus::MaintenanceRequested),
        request_date: Set(Utc::now()),
        maintenance_start_date: Set(None),
        maintenance_end_date: Set(None),
        notes: Set(notes.filter(|n| !n.trim().is_empty())),
        requested_by_user_id: Set(user_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    equipment_in(equipment, MaintenanceStatus::MaintenanceRequested, Utc::now())
        .update(&txn)
        .await?;

    txn.commit().await?;
    Ok(record)
}

pub async fn start_maintenance(
    db: &DatabaseConnection,
    equipment_id: i32,
    user_id: i32,
) -> AppResult<maintenance_record::Model> {
    let txn = db.begin().await?;

    let equipment = find_owned_equipment(&txn, equipment_id, user_id).await?;
    let record = check_can_start(find_active(&txn, equipment_id).await?)?;

    let now = Utc::now();
    let record = record_started(record, now).update(&txn).await?;
    equipment_in(equipment, MaintenanceStatus::UnderMaintenance, now)
        .update(&txn)
        .await?;

    txn.commit().await?;
    Ok(record)
}

pub async fn complete_maintenance(
    db: &DatabaseConnection,
    equipment_id: i32,
    user_id: i32,
    notes: Option<String>,
) -> AppResult<maintenance_record::Model> {
    let txn = db.begin().await?;

    let equipment = find_owned_equipment(&txn, equipment_id, user_id).await?;
    let record = check_can_complete(find_active(&txn, equipment_id).await?)?;
    let now = Utc::now();

    let record = record_completed(record, notes.as_deref(), now)
        .update(&txn)
        .await?;
    equipment_in(equipment, MaintenanceStatus::Operational, now)
        .update(&txn)
        .await?;

    txn.commit().await?;
    Ok(record)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use sea_orm::{ActiveValue, DatabaseBackend, MockDatabase};

    pub(crate) fn sample(id: i32, status: MaintenanceStatus) -> equipment::Model {
        equipment::Model {
            id,
            garden_id: 1,
            user_id: 5,
            name: "LED panel".into(),
            description: "600W full spectrum".into(),
            equipment_type: EquipmentType::Lighting,
            purchase_date: Utc.with_ymd_and_hms(2023, 11, 2, 0, 0, 0).unwrap(),
            purchase_price: 249.99,
            last_maintenance_date: None,
            maintenance_status: status,
            image_data: None,
            image_type: None,
        }
    }

    pub(crate) fn record(status: MaintenanceStatus, notes: Option<&str>) -> maintenance_record::Model {
        maintenance_record::Model {
            id: 10,
            equipment_id: 1,
            status,
            request_date: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            maintenance_start_date: None,
            maintenance_end_date: None,
            notes: notes.map(str::to_string),
            requested_by_user_id: 5,
        }
    }

    fn warning(err: AppError) -> String {
        match err {
            AppError::InvalidTransition(message) => message,
            other => panic!("expected a transition warning, got {other:?}"),
        }
    }

    #[test]
    fn only_one_open_request_at_a_time() {
        let open = record(MaintenanceStatus::UnderMaintenance, None);
        assert_eq!(warning(check_can_request(Some(&open)).unwrap_err()), ALREADY_REQUESTED);
        assert!(check_can_request(None).is_ok());
    }

    #[test]
    fn start_requires_a_pending_request() {
        assert_eq!(warning(check_can_start(None).unwrap_err()), NO_ACTIVE_REQUEST);
        let started = record(MaintenanceStatus::UnderMaintenance, None);
        assert_eq!(warning(check_can_start(Some(started)).unwrap_err()), NOT_REQUESTED);
        let pending = record(MaintenanceStatus::MaintenanceRequested, None);
        assert_eq!(check_can_start(Some(pending)).unwrap().id, 10);
    }

    #[test]
    fn complete_requires_work_in_progress() {
        assert_eq!(warning(check_can_complete(None).unwrap_err()), NO_ACTIVE_RECORD);
        let pending = record(MaintenanceStatus::MaintenanceRequested, None);
        assert_eq!(
            warning(check_can_complete(Some(pending)).unwrap_err()),
            NOT_UNDER_MAINTENANCE
        );
    }

    #[test]
    fn completion_notes_are_appended() {
        assert_eq!(
            merge_completion_notes(Some("Fan rattles".into()), Some("Replaced bearing")),
            Some("Fan rattles\n\nCompletion Notes: Replaced bearing".into())
        );
        assert_eq!(
            merge_completion_notes(None, Some("Cleaned filter")),
            Some("Cleaned filter".into())
        );
        assert_eq!(
            merge_completion_notes(Some("Fan rattles".into()), Some("  ")),
            Some("Fan rattles".into())
        );
    }

    #[tokio::test]
    async fn second_request_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(1, MaintenanceStatus::MaintenanceRequested)]])
            .append_query_results([vec![record(MaintenanceStatus::MaintenanceRequested, None)]])
            .into_connection();

        let err = request_maintenance(&db, 1, 5, Some("again".into()))
            .await
            .unwrap_err();
        assert_eq!(warning(err), ALREADY_REQUESTED);
    }

    #[tokio::test]
    async fn request_opens_a_record() {
        let opened = record(MaintenanceStatus::MaintenanceRequested, Some("Flickering"));
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(1, MaintenanceStatus::Operational)]])
            .append_query_results([Vec::<maintenance_record::Model>::new()])
            .append_query_results([vec![opened.clone()]])
            .append_query_results([vec![sample(1, MaintenanceStatus::MaintenanceRequested)]])
            .into_connection();

        let created = request_maintenance(&db, 1, 5, Some("Flickering".into()))
            .await
            .unwrap();
        assert_eq!(created.status, MaintenanceStatus::MaintenanceRequested);
        assert_eq!(created.notes.as_deref(), Some("Flickering"));
    }

    #[test]
    fn starting_stamps_the_record() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let started = record_started(record(MaintenanceStatus::MaintenanceRequested, None), now);
        assert_eq!(started.status, ActiveValue::Set(MaintenanceStatus::UnderMaintenance));
        assert_eq!(started.maintenance_start_date, ActiveValue::Set(Some(now)));
    }

    #[test]
    fn completing_closes_the_record_and_restores_the_equipment() {
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 17, 0, 0).unwrap();
        let closed = record_completed(
            record(MaintenanceStatus::UnderMaintenance, Some("Fan rattles")),
            Some("Replaced bearing"),
            now,
        );
        assert_eq!(closed.status, ActiveValue::Set(MaintenanceStatus::Completed));
        assert_eq!(closed.maintenance_end_date, ActiveValue::Set(Some(now)));
        assert_eq!(
            closed.notes,
            ActiveValue::Set(Some("Fan rattles\n\nCompletion Notes: Replaced bearing".into()))
        );

        let back = equipment_in(
            sample(1, MaintenanceStatus::UnderMaintenance),
            MaintenanceStatus::Operational,
            now,
        );
        assert_eq!(back.maintenance_status, ActiveValue::Set(MaintenanceStatus::Operational));
        assert_eq!(back.last_maintenance_date, ActiveValue::Set(Some(now)));
    }

    #[test]
    fn entering_maintenance_keeps_the_service_date() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let busy = equipment_in(
            sample(1, MaintenanceStatus::MaintenanceRequested),
            MaintenanceStatus::UnderMaintenance,
            now,
        );
        assert_eq!(busy.maintenance_status, ActiveValue::Set(MaintenanceStatus::UnderMaintenance));
        assert!(!busy.last_maintenance_date.is_set());
    }

    #[tokio::test]
    async fn start_moves_request_into_work() {
        let mut started = record(MaintenanceStatus::UnderMaintenance, None);
        started.maintenance_start_date = Some(Utc::now());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(1, MaintenanceStatus::MaintenanceRequested)]])
            .append_query_results([vec![record(MaintenanceStatus::MaintenanceRequested, None)]])
            .append_query_results([vec![started]])
            .append_query_results([vec![sample(1, MaintenanceStatus::UnderMaintenance)]])
            .into_connection();

        let record = start_maintenance(&db, 1, 5).await.unwrap();
        assert_eq!(record.status, MaintenanceStatus::UnderMaintenance);
        assert!(record.maintenance_start_date.is_some());
    }

    #[tokio::test]
    async fn complete_writes_notes_and_returns_equipment_to_service() {
        let mut working = record(MaintenanceStatus::UnderMaintenance, Some("Fan rattles"));
        working.maintenance_start_date = Some(Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap());
        let mut closed = working.clone();
        closed.status = MaintenanceStatus::Completed;
        closed.maintenance_end_date = Some(Utc::now());
        closed.notes = Some("Fan rattles\n\nCompletion Notes: Replaced bearing".into());
        let mut restored = sample(1, MaintenanceStatus::Operational);
        restored.last_maintenance_date = closed.maintenance_end_date;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample(1, MaintenanceStatus::UnderMaintenance)]])
            .append_query_results([vec![working]])
            .append_query_results([vec![closed]])
            .append_query_results([vec![restored]])
            .into_connection();

        let record = complete_maintenance(&db, 1, 5, Some("Replaced bearing".into()))
            .await
            .unwrap();
        assert_eq!(record.status, MaintenanceStatus::Completed);
        assert!(record.maintenance_end_date.is_some());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("Completion Notes: Replaced bearing"));
    }

    #[tokio::test]
    async fn missing_equipment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<equipment::Model>::new()])
            .into_connection();

        let err = start_maintenance(&db, 77, 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Equipment")));
    }
}
