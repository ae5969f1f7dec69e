//! Parking slot repository.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::entities::parking_slot::{self, Entity as SlotEntity};
use crate::domain::{ParkingSlot, SlotStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// All slots ordered by slot number
    async fn list(&self) -> AppResult<Vec<ParkingSlot>>;

    async fn find(&self, slot_number: &str) -> AppResult<Option<ParkingSlot>>;
}

pub struct SlotStore {
    db: DatabaseConnection,
}

impl SlotStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SlotRepository for SlotStore {
    async fn list(&self) -> AppResult<Vec<ParkingSlot>> {
        list(&self.db).await
    }

    async fn find(&self, slot_number: &str) -> AppResult<Option<ParkingSlot>> {
        find(&self.db, slot_number).await
    }
}

pub(crate) async fn list<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<ParkingSlot>> {
    let models = SlotEntity::find()
        .order_by_asc(parking_slot::Column::SlotNumber)
        .all(conn)
        .await
        .map_err(AppError::from)?;

    Ok(models.into_iter().map(ParkingSlot::from).collect())
}

pub(crate) async fn find<C: ConnectionTrait>(
    conn: &C,
    slot_number: &str,
) -> AppResult<Option<ParkingSlot>> {
    let result = SlotEntity::find_by_id(slot_number.to_string())
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(ParkingSlot::from))
}

/// Claim an Available slot.
///
/// The status check and the write are one conditional UPDATE, so two
/// concurrent entries cannot both claim the same slot.
pub(crate) async fn occupy<C: ConnectionTrait>(conn: &C, slot_number: &str) -> AppResult<()> {
    let result = SlotEntity::update_many()
        .col_expr(
            parking_slot::Column::Status,
            Expr::value(SlotStatus::Occupied.as_str()),
        )
        .filter(parking_slot::Column::SlotNumber.eq(slot_number))
        .filter(parking_slot::Column::Status.eq(SlotStatus::Available.as_str()))
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected == 0 {
        return Err(AppError::SlotUnavailable);
    }
    Ok(())
}

/// Mark a slot Available. Releasing an unknown slot is a no-op.
pub(crate) async fn release<C: ConnectionTrait>(conn: &C, slot_number: &str) -> AppResult<()> {
    SlotEntity::update_many()
        .col_expr(
            parking_slot::Column::Status,
            Expr::value(SlotStatus::Available.as_str()),
        )
        .filter(parking_slot::Column::SlotNumber.eq(slot_number))
        .exec(conn)
        .await
        .map_err(AppError::from)?;
    Ok(())
}
