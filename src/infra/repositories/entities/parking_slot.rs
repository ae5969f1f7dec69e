//! Parking slot table. The slot code is the primary key.

use sea_orm::entity::prelude::*;

use crate::domain::{ParkingSlot, SlotStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "parking_slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub slot_number: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::car::Entity")]
    Car,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ParkingSlot {
    fn from(model: Model) -> Self {
        ParkingSlot {
            slot_number: model.slot_number,
            status: SlotStatus::from(model.status.as_str()),
        }
    }
}
