//! Append-only payment ledger table.

use sea_orm::entity::prelude::*;

use crate::domain::PaymentRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plate_number: String,
    pub amount: i64,
    pub payment_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PaymentRecord {
    fn from(model: Model) -> Self {
        PaymentRecord {
            id: model.id,
            plate_number: model.plate_number,
            amount: model.amount,
            payment_date: model.payment_date,
        }
    }
}
