//! Domain layer - Core business entities and logic
//!
//! Parking slots, vehicle sessions, payments, staff accounts, and the two
//! pieces of real business logic: the fee calculator and the report
//! aggregator. Nothing here touches the database or HTTP.

pub mod fee;
pub mod password;
pub mod payment;
pub mod report;
pub mod session;
pub mod slot;
pub mod user;

pub use fee::{Fee, FeeCalculator};
pub use password::Password;
pub use payment::PaymentRecord;
pub use report::{Dashboard, ReportFilter, ReportRow, ReportSummary, StatusFilter};
pub use session::{
    ExitReceipt, NewEntry, ParkingRecord, ParkingRecordRow, PaymentStatus, RecordUpdate,
};
pub use slot::{ParkingSlot, SlotStatus};
pub use user::{NewUser, User, UserResponse, UserRole};
