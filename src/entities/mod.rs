pub mod daily_record;
pub mod enums;
pub mod equipment;
pub mod garden;
pub mod garden_care_activity;
pub mod journal_entry;
pub mod maintenance_record;
pub mod plant;
pub mod plant_care_activity;
pub mod reminder;
pub mod user;

pub mod prelude;
