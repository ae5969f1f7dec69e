//! Migration: Seed the lot's fixed set of slots.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_parking_tables::ParkingSlots;

/// Two rows of five spaces.
pub const SEEDED_SLOTS: &[&str] = &["A1", "A2", "A3", "A4", "A5", "B1", "B2", "B3", "B4", "B5"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(ParkingSlots::Table)
            .columns([ParkingSlots::SlotNumber, ParkingSlots::Status]);

        for slot in SEEDED_SLOTS {
            insert
                .values([(*slot).into(), "Available".into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(ParkingSlots::Table)
            .and_where(Expr::col(ParkingSlots::SlotNumber).is_in(SEEDED_SLOTS.iter().copied()))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
