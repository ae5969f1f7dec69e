//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod car;
pub mod parking_slot;
pub mod payment_record;
pub mod user;
