//! Parking session (one vehicle's stay) and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::fee::Fee;
use super::slot::SlotStatus;

const PAYMENT_PENDING: &str = "Pending";
const PAYMENT_PAID: &str = "Paid";

/// Payment state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => PAYMENT_PENDING,
            PaymentStatus::Paid => PAYMENT_PAID,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            PAYMENT_PAID => PaymentStatus::Paid,
            _ => PaymentStatus::Pending,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle session ("Car" row).
///
/// `exit_time`, `duration` and `amount` are written together when the
/// vehicle leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ParkingRecord {
    pub id: Uuid,
    #[schema(example = "RAB123A")]
    pub plate_number: String,
    #[schema(example = "Jean Mugisha")]
    pub driver_name: String,
    #[schema(example = "+250788123456")]
    pub phone_number: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    #[schema(example = "A1")]
    pub slot_number: String,
    /// Minutes parked, set at exit
    pub duration: Option<i64>,
    /// Billed amount, set at exit
    pub amount: Option<i64>,
    pub payment_status: PaymentStatus,
}

impl ParkingRecord {
    /// Still parked: no exit has been recorded.
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// A session joined with the current status of its slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ParkingRecordRow {
    #[serde(flatten)]
    pub record: ParkingRecord,
    /// `None` when the slot no longer exists
    pub slot_status: Option<SlotStatus>,
}

/// Data captured when a vehicle enters.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub plate_number: String,
    pub driver_name: String,
    pub phone_number: String,
    pub slot_number: String,
    pub entry_time: DateTime<Utc>,
}

/// Editable fields of an existing session.
#[derive(Debug, Clone)]
pub struct RecordUpdate {
    pub plate_number: String,
    pub driver_name: String,
    pub phone_number: String,
    pub slot_number: String,
}

/// Billing details returned when a vehicle exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExitReceipt {
    /// Minutes parked
    #[schema(example = 61)]
    pub duration: i64,
    /// Billable hours
    #[schema(example = 2)]
    pub hours: i64,
    #[schema(example = 1000)]
    pub amount: i64,
    #[schema(example = 500)]
    pub hourly_rate: i64,
    #[schema(example = "Parking fee calculated at 500 RWF per hour for 2 hour(s)")]
    pub message: String,
}

impl ExitReceipt {
    pub fn new(fee: Fee, hourly_rate: i64, message: String) -> Self {
        Self {
            duration: fee.duration_minutes,
            hours: fee.billable_hours,
            amount: fee.amount,
            hourly_rate,
            message,
        }
    }
}
