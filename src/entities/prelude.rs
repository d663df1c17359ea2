pub use super::daily_record::Entity as DailyRecord;
pub use super::equipment::Entity as Equipment;
pub use super::garden::Entity as Garden;
pub use super::garden_care_activity::Entity as GardenCareActivity;
pub use super::journal_entry::Entity as JournalEntry;
pub use super::maintenance_record::Entity as MaintenanceRecord;
pub use super::plant::Entity as Plant;
pub use super::plant_care_activity::Entity as PlantCareActivity;
pub use super::reminder::Entity as Reminder;
pub use super::user::Entity as User;
