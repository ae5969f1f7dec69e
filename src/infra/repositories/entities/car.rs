//! Vehicle session table.

use sea_orm::entity::prelude::*;

use crate::domain::{ParkingRecord, PaymentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plate_number: String,
    pub driver_name: String,
    pub phone_number: String,
    pub entry_time: DateTimeUtc,
    pub exit_time: Option<DateTimeUtc>,
    pub slot_number: String,
    /// Minutes parked (NULL until exit)
    pub duration: Option<i64>,
    /// Billed amount (NULL until exit)
    pub amount: Option<i64>,
    pub payment_status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_slot::Entity",
        from = "Column::SlotNumber",
        to = "super::parking_slot::Column::SlotNumber"
    )]
    ParkingSlot,
}

impl Related<super::parking_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSlot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ParkingRecord {
    fn from(model: Model) -> Self {
        ParkingRecord {
            id: model.id,
            plate_number: model.plate_number,
            driver_name: model.driver_name,
            phone_number: model.phone_number,
            entry_time: model.entry_time,
            exit_time: model.exit_time,
            slot_number: model.slot_number,
            duration: model.duration,
            amount: model.amount,
            payment_status: PaymentStatus::from(model.payment_status.as_str()),
        }
    }
}
