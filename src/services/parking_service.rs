//! Parking service - vehicle entry, exit, payment and record maintenance.
//!
//! Each mutation pairs a session write with a slot or payment write and runs
//! in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    ExitReceipt, FeeCalculator, NewEntry, ParkingRecord, ParkingRecordRow, ParkingSlot,
    PaymentRecord, RecordUpdate,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ParkingService: Send + Sync {
    async fn list_slots(&self) -> AppResult<Vec<ParkingSlot>>;

    /// Open a session and occupy its slot
    async fn record_entry(&self, entry: NewEntry) -> AppResult<ParkingRecord>;

    /// Bill the plate's newest parked session, or its newest one if none is
    /// parked, and free the slot
    async fn record_exit(&self, plate_number: String, exit_time: DateTime<Utc>)
        -> AppResult<ExitReceipt>;

    /// Log a payment and settle every pending session of the plate
    async fn record_payment(
        &self,
        plate_number: String,
        amount: i64,
        payment_date: DateTime<Utc>,
    ) -> AppResult<PaymentRecord>;

    /// All sessions, newest entry first
    async fn list_records(&self) -> AppResult<Vec<ParkingRecordRow>>;

    async fn update_record(&self, id: Uuid, update: RecordUpdate) -> AppResult<ParkingRecord>;

    /// Delete a session together with every payment of its plate
    async fn delete_record(&self, id: Uuid) -> AppResult<()>;
}

pub struct ParkingManager<U: UnitOfWork> {
    uow: Arc<U>,
    fees: FeeCalculator,
}

impl<U: UnitOfWork> ParkingManager<U> {
    pub fn new(uow: Arc<U>, fees: FeeCalculator) -> Self {
        Self { uow, fees }
    }
}

#[async_trait]
impl<U: UnitOfWork> ParkingService for ParkingManager<U> {
    async fn list_slots(&self) -> AppResult<Vec<ParkingSlot>> {
        self.uow.slots().list().await
    }

    async fn record_entry(&self, entry: NewEntry) -> AppResult<ParkingRecord> {
        let record = with_transaction!(self.uow, |ctx| {
            ctx.slots().occupy(&entry.slot_number).await?;
            ctx.cars().insert(entry).await
        })?;

        tracing::info!(
            plate = %record.plate_number,
            slot = %record.slot_number,
            "Car entry recorded"
        );
        Ok(record)
    }

    async fn record_exit(
        &self,
        plate_number: String,
        exit_time: DateTime<Utc>,
    ) -> AppResult<ExitReceipt> {
        let fees = self.fees;

        let (record, fee) = with_transaction!(self.uow, |ctx| {
            let record = ctx
                .cars()
                .find_latest_by_plate(&plate_number)
                .await?
                .ok_or_not_found()?;

            let fee = fees.calculate(record.entry_time, exit_time)?;
            ctx.cars().record_exit(record.id, exit_time, &fee).await?;
            ctx.slots().release(&record.slot_number).await?;
            Ok::<_, AppError>((record, fee))
        })?;

        tracing::info!(
            plate = %record.plate_number,
            slot = %record.slot_number,
            minutes = fee.duration_minutes,
            amount = fee.amount,
            "Car exit recorded"
        );

        Ok(ExitReceipt::new(
            fee,
            self.fees.hourly_rate(),
            self.fees.describe(&fee),
        ))
    }

    async fn record_payment(
        &self,
        plate_number: String,
        amount: i64,
        payment_date: DateTime<Utc>,
    ) -> AppResult<PaymentRecord> {
        if amount < 0 {
            return Err(AppError::validation("Amount must not be negative"));
        }

        let (payment, settled) = with_transaction!(self.uow, |ctx| {
            let payment = ctx
                .payments()
                .insert(plate_number, amount, payment_date)
                .await?;
            let settled = ctx.cars().mark_paid(&payment.plate_number).await?;
            Ok::<_, AppError>((payment, settled))
        })?;

        tracing::info!(
            plate = %payment.plate_number,
            amount = payment.amount,
            sessions = settled,
            "Payment recorded"
        );
        Ok(payment)
    }

    async fn list_records(&self) -> AppResult<Vec<ParkingRecordRow>> {
        self.uow.cars().list_with_slots().await
    }

    async fn update_record(&self, id: Uuid, update: RecordUpdate) -> AppResult<ParkingRecord> {
        let record = with_transaction!(self.uow, |ctx| {
            let current = ctx.cars().find_by_id(id).await?.ok_or_not_found()?;

            if current.slot_number != update.slot_number {
                ctx.slots().occupy(&update.slot_number).await?;
                ctx.slots().release(&current.slot_number).await?;
            }

            ctx.cars().update_details(id, update).await
        })?;

        tracing::info!(
            id = %record.id,
            plate = %record.plate_number,
            slot = %record.slot_number,
            "Record updated"
        );
        Ok(record)
    }

    async fn delete_record(&self, id: Uuid) -> AppResult<()> {
        let (record, payments) = with_transaction!(self.uow, |ctx| {
            let record = ctx.cars().find_by_id(id).await?.ok_or_not_found()?;

            ctx.slots().release(&record.slot_number).await?;
            ctx.cars().delete(id).await?;
            let payments = ctx.payments().delete_by_plate(&record.plate_number).await?;
            Ok::<_, AppError>((record, payments))
        })?;

        tracing::info!(
            id = %record.id,
            plate = %record.plate_number,
            payments_removed = payments,
            "Record deleted"
        );
        Ok(())
    }
}
