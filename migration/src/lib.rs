pub use sea_orm_migration::prelude::*;

mod m20240601_000001_employees;
mod m20240601_000002_overtime_and_schedules;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_employees::Migration),
            Box::new(m20240601_000002_overtime_and_schedules::Migration),
        ]
    }
}
