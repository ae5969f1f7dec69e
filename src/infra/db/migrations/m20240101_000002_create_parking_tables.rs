//! Migration: Create slot, session and payment tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingSlots::SlotNumber)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cars::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cars::PlateNumber).string().not_null())
                    .col(ColumnDef::new(Cars::DriverName).string().not_null())
                    .col(ColumnDef::new(Cars::PhoneNumber).string().not_null())
                    .col(
                        ColumnDef::new(Cars::EntryTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Cars::ExitTime).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Cars::SlotNumber).string().not_null())
                    .col(ColumnDef::new(Cars::Duration).big_integer().null())
                    .col(ColumnDef::new(Cars::Amount).big_integer().null())
                    .col(
                        ColumnDef::new(Cars::PaymentStatus)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cars_slot_number")
                            .from(Cars::Table, Cars::SlotNumber)
                            .to(ParkingSlots::Table, ParkingSlots::SlotNumber)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cars_plate_number")
                    .table(Cars::Table)
                    .col(Cars::PlateNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cars_entry_time")
                    .table(Cars::Table)
                    .col(Cars::EntryTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentRecords::PlateNumber).string().not_null())
                    .col(ColumnDef::new(PaymentRecords::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(PaymentRecords::PaymentDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_records_plate_number")
                    .table(PaymentRecords::Table)
                    .col(PaymentRecords::PlateNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ParkingSlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum ParkingSlots {
    Table,
    SlotNumber,
    Status,
}

#[derive(Iden)]
enum Cars {
    Table,
    Id,
    PlateNumber,
    DriverName,
    PhoneNumber,
    EntryTime,
    ExitTime,
    SlotNumber,
    Duration,
    Amount,
    PaymentStatus,
}

#[derive(Iden)]
enum PaymentRecords {
    Table,
    Id,
    PlateNumber,
    Amount,
    PaymentDate,
}
