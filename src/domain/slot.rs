//! Parking slot entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const STATUS_AVAILABLE: &str = "Available";
const STATUS_OCCUPIED: &str = "Occupied";

/// Occupancy of a slot. Exactly one of the two at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SlotStatus {
    Available,
    Occupied,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => STATUS_AVAILABLE,
            SlotStatus::Occupied => STATUS_OCCUPIED,
        }
    }
}

impl From<&str> for SlotStatus {
    /// Anything but an explicit "Available" counts as occupied, so a
    /// corrupted row never hands out a slot twice.
    fn from(s: &str) -> Self {
        match s {
            STATUS_AVAILABLE => SlotStatus::Available,
            _ => SlotStatus::Occupied,
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical parking space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ParkingSlot {
    #[schema(example = "A1")]
    pub slot_number: String,
    pub status: SlotStatus,
}

impl ParkingSlot {
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        assert_eq!(SlotStatus::from("Available"), SlotStatus::Available);
        assert_eq!(SlotStatus::from("Occupied"), SlotStatus::Occupied);
        assert_eq!(SlotStatus::Available.to_string(), "Available");
    }

    #[test]
    fn test_unknown_status_is_occupied() {
        assert_eq!(SlotStatus::from("available"), SlotStatus::Occupied);
        assert_eq!(SlotStatus::from(""), SlotStatus::Occupied);
    }

    #[test]
    fn test_slot_serializes_pascal_case() {
        let slot = ParkingSlot {
            slot_number: "A1".to_string(),
            status: SlotStatus::Available,
        };
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["SlotNumber"], "A1");
        assert_eq!(json["Status"], "Available");
    }
}
