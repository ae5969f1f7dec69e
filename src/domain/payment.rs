//! Payment ledger entry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// An immutable record of money received for a plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    #[schema(example = "RAB123A")]
    pub plate_number: String,
    #[schema(example = 1000)]
    pub amount: i64,
    pub payment_date: DateTime<Utc>,
}
