//! Report filtering and aggregation.
//!
//! Summary statistics are derived here rather than by the client, using the
//! shared [`FeeCalculator`] for sessions that have not been billed yet.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::fee::FeeCalculator;
use super::payment::PaymentRecord;
use super::session::{ParkingRecord, ParkingRecordRow, PaymentStatus};
use super::slot::{ParkingSlot, SlotStatus};
use crate::errors::{AppError, AppResult};

/// Payment-status filter accepted by the report endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    Pending,
}

impl StatusFilter {
    /// Status a session must have to pass, `None` meaning any.
    pub fn status(&self) -> Option<PaymentStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Paid => Some(PaymentStatus::Paid),
            StatusFilter::Pending => Some(PaymentStatus::Pending),
        }
    }
}

/// Report query: optional inclusive entry-date range plus a status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportFilter {
    /// all | paid | pending
    #[serde(default)]
    #[param(value_type = Option<String>, example = "all")]
    pub filter: StatusFilter,
    /// First entry day included (YYYY-MM-DD)
    #[param(value_type = Option<String>, example = "2024-01-01")]
    pub start_date: Option<NaiveDate>,
    /// Last entry day included (YYYY-MM-DD)
    #[param(value_type = Option<String>, example = "2024-01-31")]
    pub end_date: Option<NaiveDate>,
}

impl ReportFilter {
    /// Sessions entered on a single calendar day.
    pub fn for_day(day: NaiveDate) -> Self {
        Self {
            filter: StatusFilter::All,
            start_date: Some(day),
            end_date: Some(day),
        }
    }

    /// Half-open `[from, until)` entry-time window covering the date range.
    pub fn entry_window(&self) -> AppResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(AppError::validation("startDate must not be after endDate"));
            }
        }

        let from = self.start_date.map(start_of_day);
        let until = match self.end_date {
            Some(end) => Some(
                end.checked_add_days(Days::new(1))
                    .map(start_of_day)
                    .ok_or_else(|| AppError::validation("endDate is out of range"))?,
            ),
            None => None,
        };

        Ok((from, until))
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// A session joined with its slot and one of the payments made for its plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRow {
    #[serde(flatten)]
    pub record: ParkingRecord,
    pub slot_status: Option<SlotStatus>,
    pub payment_date: Option<DateTime<Utc>>,
}

/// Left-join sessions with payments on plate number.
///
/// A session with several payments for its plate appears once per payment;
/// one without any appears once with no payment date.
pub fn join_payments(rows: Vec<ParkingRecordRow>, payments: &[PaymentRecord]) -> Vec<ReportRow> {
    let mut by_plate: HashMap<&str, Vec<&PaymentRecord>> = HashMap::new();
    for payment in payments {
        by_plate
            .entry(payment.plate_number.as_str())
            .or_default()
            .push(payment);
    }

    let mut joined = Vec::with_capacity(rows.len());
    for row in rows {
        match by_plate.get(row.record.plate_number.as_str()) {
            Some(matches) => {
                for payment in matches {
                    joined.push(ReportRow {
                        record: row.record.clone(),
                        slot_status: row.slot_status,
                        payment_date: Some(payment.payment_date),
                    });
                }
            }
            None => joined.push(ReportRow {
                record: row.record,
                slot_status: row.slot_status,
                payment_date: None,
            }),
        }
    }
    joined
}

/// Aggregate statistics over a set of sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_records: u64,
    pub total_revenue: i64,
    pub paid_revenue: i64,
    /// Billed or live cost of sessions not yet paid
    pub pending_revenue: i64,
    /// Mean stay in minutes
    pub average_duration: i64,
    /// Share of occupied slots, in percent
    pub occupancy_rate: u32,
    pub pending_payments: u64,
}

/// Compute report statistics as of `now`.
pub fn summarize(
    records: &[ParkingRecord],
    slots: &[ParkingSlot],
    fees: &FeeCalculator,
    now: DateTime<Utc>,
) -> ReportSummary {
    let mut summary = ReportSummary {
        total_records: records.len() as u64,
        occupancy_rate: occupancy_rate(slots),
        ..Default::default()
    };

    let mut total_duration = 0i64;
    for record in records {
        let duration = record
            .duration
            .unwrap_or_else(|| fees.current(record.entry_time, now).duration_minutes);
        total_duration += duration;

        match record.payment_status {
            PaymentStatus::Paid => summary.paid_revenue += record.amount.unwrap_or(0),
            PaymentStatus::Pending => {
                summary.pending_payments += 1;
                summary.pending_revenue += match record.duration {
                    Some(billed) => fees.for_duration(billed).amount,
                    None => fees.current(record.entry_time, now).amount,
                };
            }
        }
    }

    summary.total_revenue = summary.paid_revenue + summary.pending_revenue;
    if !records.is_empty() {
        summary.average_duration = rounded_div(total_duration, records.len() as i64);
    }
    summary
}

/// Percentage of occupied slots, rounded; zero for an empty lot.
pub fn occupancy_rate(slots: &[ParkingSlot]) -> u32 {
    if slots.is_empty() {
        return 0;
    }
    let occupied = slots.iter().filter(|s| !s.is_available()).count() as i64;
    rounded_div(occupied * 100, slots.len() as i64) as u32
}

fn rounded_div(numerator: i64, denominator: i64) -> i64 {
    (numerator * 2 + denominator).div_euclid(denominator * 2)
}

/// Front-desk overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub available: u64,
    pub occupied: u64,
    pub total: u64,
    /// Paid revenue from sessions entered today
    pub total_revenue: i64,
    pub today_entries: u64,
    pub recent_records: Vec<ParkingRecordRow>,
}

impl Dashboard {
    pub fn build(
        slots: &[ParkingSlot],
        today: &[ParkingRecord],
        recent_records: Vec<ParkingRecordRow>,
    ) -> Self {
        let available = slots.iter().filter(|s| s.is_available()).count() as u64;
        let total = slots.len() as u64;

        Self {
            available,
            occupied: total - available,
            total,
            total_revenue: today
                .iter()
                .filter(|r| r.is_paid())
                .map(|r| r.amount.unwrap_or(0))
                .sum(),
            today_entries: today.len() as u64,
            recent_records,
        }
    }
}
