//! Report service - filtered session reports, statistics and the dashboard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::RECENT_RECORDS_LIMIT;
use crate::domain::report::{join_payments, summarize};
use crate::domain::{Dashboard, FeeCalculator, ReportFilter, ReportRow, ReportSummary};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Sessions joined with their slot and payments
    async fn report(&self, filter: ReportFilter) -> AppResult<Vec<ReportRow>>;

    /// Aggregate statistics for the sessions a filter selects
    async fn summary(&self, filter: ReportFilter, now: DateTime<Utc>) -> AppResult<ReportSummary>;

    /// Slot counts plus today's activity
    async fn dashboard(&self, now: DateTime<Utc>) -> AppResult<Dashboard>;
}

pub struct ReportManager<U: UnitOfWork> {
    uow: Arc<U>,
    fees: FeeCalculator,
}

impl<U: UnitOfWork> ReportManager<U> {
    pub fn new(uow: Arc<U>, fees: FeeCalculator) -> Self {
        Self { uow, fees }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportManager<U> {
    async fn report(&self, filter: ReportFilter) -> AppResult<Vec<ReportRow>> {
        let rows = self.uow.cars().list_filtered(&filter).await?;

        let plates: BTreeSet<String> = rows
            .iter()
            .map(|row| row.record.plate_number.clone())
            .collect();
        let payments = self
            .uow
            .payments()
            .find_by_plates(plates.into_iter().collect())
            .await?;

        Ok(join_payments(rows, &payments))
    }

    async fn summary(&self, filter: ReportFilter, now: DateTime<Utc>) -> AppResult<ReportSummary> {
        let cars = self.uow.cars();
        let slots = self.uow.slots();

        let (rows, all_slots) = futures::try_join!(cars.list_filtered(&filter), slots.list())?;
        let records: Vec<_> = rows.into_iter().map(|row| row.record).collect();

        Ok(summarize(&records, &all_slots, &self.fees, now))
    }

    async fn dashboard(&self, now: DateTime<Utc>) -> AppResult<Dashboard> {
        let cars = self.uow.cars();
        let slots = self.uow.slots();
        let today = ReportFilter::for_day(now.date_naive());

        let (all_slots, todays_rows, recent) = futures::try_join!(
            slots.list(),
            cars.list_filtered(&today),
            cars.recent(RECENT_RECORDS_LIMIT),
        )?;
        let todays: Vec<_> = todays_rows.into_iter().map(|row| row.record).collect();

        Ok(Dashboard::build(&all_slots, &todays, recent))
    }
}
