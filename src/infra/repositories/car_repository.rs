//! Vehicle session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::entities::car::{self, ActiveModel, Entity as CarEntity};
use super::entities::parking_slot::{self, Entity as SlotEntity};
use crate::domain::{
    Fee, NewEntry, ParkingRecord, ParkingRecordRow, PaymentStatus, RecordUpdate, ReportFilter,
    SlotStatus,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read side of the session table. Writes go through a transaction.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Every session with its slot status, newest entry first
    async fn list_with_slots(&self) -> AppResult<Vec<ParkingRecordRow>>;

    /// Sessions matching a report filter, newest entry first
    async fn list_filtered(&self, filter: &ReportFilter) -> AppResult<Vec<ParkingRecordRow>>;

    /// The `limit` most recent sessions
    async fn recent(&self, limit: u64) -> AppResult<Vec<ParkingRecordRow>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ParkingRecord>>;
}

pub struct CarStore {
    db: DatabaseConnection,
}

impl CarStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CarRepository for CarStore {
    async fn list_with_slots(&self) -> AppResult<Vec<ParkingRecordRow>> {
        let rows = with_slots(CarEntity::find()).all(&self.db).await?;
        Ok(rows.into_iter().map(into_row).collect())
    }

    async fn list_filtered(&self, filter: &ReportFilter) -> AppResult<Vec<ParkingRecordRow>> {
        let (from, until) = filter.entry_window()?;
        let mut query = CarEntity::find();

        if let Some(from) = from {
            query = query.filter(car::Column::EntryTime.gte(from));
        }
        if let Some(until) = until {
            query = query.filter(car::Column::EntryTime.lt(until));
        }
        if let Some(status) = filter.filter.status() {
            query = query.filter(car::Column::PaymentStatus.eq(status.as_str()));
        }

        let rows = with_slots(query).all(&self.db).await?;
        Ok(rows.into_iter().map(into_row).collect())
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<ParkingRecordRow>> {
        let rows = with_slots(CarEntity::find())
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(into_row).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ParkingRecord>> {
        find_by_id(&self.db, id).await
    }
}

fn with_slots(
    query: Select<CarEntity>,
) -> sea_orm::SelectTwo<CarEntity, SlotEntity> {
    query
        .find_also_related(SlotEntity)
        .order_by_desc(car::Column::EntryTime)
}

fn into_row((car, slot): (car::Model, Option<parking_slot::Model>)) -> ParkingRecordRow {
    ParkingRecordRow {
        record: ParkingRecord::from(car),
        slot_status: slot.map(|s| SlotStatus::from(s.status.as_str())),
    }
}

pub(crate) async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<ParkingRecord>> {
    let result = CarEntity::find_by_id(id)
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(ParkingRecord::from))
}

/// The session an exit for this plate bills: the newest one still parked,
/// otherwise the newest one overall.
pub(crate) async fn find_latest_by_plate<C: ConnectionTrait>(
    conn: &C,
    plate_number: &str,
) -> AppResult<Option<ParkingRecord>> {
    let result = CarEntity::find()
        .filter(car::Column::PlateNumber.eq(plate_number))
        .order_by_desc(Expr::col(car::Column::ExitTime).is_null())
        .order_by_desc(car::Column::EntryTime)
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(ParkingRecord::from))
}

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    entry: NewEntry,
) -> AppResult<ParkingRecord> {
    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        plate_number: Set(entry.plate_number),
        driver_name: Set(entry.driver_name),
        phone_number: Set(entry.phone_number),
        entry_time: Set(entry.entry_time),
        exit_time: Set(None),
        slot_number: Set(entry.slot_number),
        duration: Set(None),
        amount: Set(None),
        payment_status: Set(PaymentStatus::Pending.as_str().to_string()),
    };

    let model = active_model.insert(conn).await.map_err(AppError::from)?;
    Ok(ParkingRecord::from(model))
}

/// Write exit time and bill. The session goes back to Pending.
pub(crate) async fn record_exit<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    exit_time: DateTime<Utc>,
    fee: &Fee,
) -> AppResult<()> {
    let result = CarEntity::update_many()
        .col_expr(car::Column::ExitTime, Expr::value(Some(exit_time)))
        .col_expr(car::Column::Duration, Expr::value(Some(fee.duration_minutes)))
        .col_expr(car::Column::Amount, Expr::value(Some(fee.amount)))
        .col_expr(
            car::Column::PaymentStatus,
            Expr::value(PaymentStatus::Pending.as_str()),
        )
        .filter(car::Column::Id.eq(id))
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Mark every Pending session of a plate as Paid, returning how many changed.
pub(crate) async fn mark_paid<C: ConnectionTrait>(conn: &C, plate_number: &str) -> AppResult<u64> {
    let result = CarEntity::update_many()
        .col_expr(
            car::Column::PaymentStatus,
            Expr::value(PaymentStatus::Paid.as_str()),
        )
        .filter(car::Column::PlateNumber.eq(plate_number))
        .filter(car::Column::PaymentStatus.eq(PaymentStatus::Pending.as_str()))
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.rows_affected)
}

pub(crate) async fn update_details<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    update: RecordUpdate,
) -> AppResult<ParkingRecord> {
    let car = CarEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = car.into();
    active.plate_number = Set(update.plate_number);
    active.driver_name = Set(update.driver_name);
    active.phone_number = Set(update.phone_number);
    active.slot_number = Set(update.slot_number);

    let model = active.update(conn).await.map_err(AppError::from)?;
    Ok(ParkingRecord::from(model))
}

pub(crate) async fn delete<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<()> {
    let result = CarEntity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
