//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_parking_tables;
mod m20240101_000003_seed_parking_slots;

pub use m20240101_000003_seed_parking_slots::SEEDED_SLOTS;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_parking_tables::Migration),
            Box::new(m20240101_000003_seed_parking_slots::Migration),
        ]
    }
}
