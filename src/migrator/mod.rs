use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_gardens;
mod m20240101_000003_create_plants;
mod m20240101_000004_create_equipment;
mod m20240101_000005_create_garden_logs;
mod m20240115_000001_create_care_activities;
mod m20240201_000001_create_reminders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_gardens::Migration),
            Box::new(m20240101_000003_create_plants::Migration),
            Box::new(m20240101_000004_create_equipment::Migration),
            Box::new(m20240101_000005_create_garden_logs::Migration),
            Box::new(m20240115_000001_create_care_activities::Migration),
            Box::new(m20240201_000001_create_reminders::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_uniquely_named_and_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 7);
    }
}
