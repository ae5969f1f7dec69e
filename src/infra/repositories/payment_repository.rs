//! Payment ledger repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::payment_record::{self, ActiveModel, Entity as PaymentEntity};
use crate::domain::PaymentRecord;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Payments for any of the given plates, oldest first
    async fn find_by_plates(&self, plates: Vec<String>) -> AppResult<Vec<PaymentRecord>>;
}

pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn find_by_plates(&self, plates: Vec<String>) -> AppResult<Vec<PaymentRecord>> {
        if plates.is_empty() {
            return Ok(Vec::new());
        }

        let models = PaymentEntity::find()
            .filter(payment_record::Column::PlateNumber.is_in(plates))
            .order_by_asc(payment_record::Column::PaymentDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(PaymentRecord::from).collect())
    }
}

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    plate_number: String,
    amount: i64,
    payment_date: DateTime<Utc>,
) -> AppResult<PaymentRecord> {
    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        plate_number: Set(plate_number),
        amount: Set(amount),
        payment_date: Set(payment_date),
    };

    let model = active_model.insert(conn).await.map_err(AppError::from)?;
    Ok(PaymentRecord::from(model))
}

/// Remove every payment recorded for a plate, returning the count.
pub(crate) async fn delete_by_plate<C: ConnectionTrait>(
    conn: &C,
    plate_number: &str,
) -> AppResult<u64> {
    let result = PaymentEntity::delete_many()
        .filter(payment_record::Column::PlateNumber.eq(plate_number))
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.rows_affected)
}
