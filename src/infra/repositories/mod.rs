//! Repository layer - Data access abstraction
//!
//! Each repository exposes a mockable read trait backed by a pooled `*Store`.
//! The query bodies are generic over the connection so the transactional
//! repositories in [`super::unit_of_work`] reuse them unchanged.

pub(crate) mod car_repository;
pub(crate) mod entities;
pub(crate) mod payment_repository;
pub(crate) mod slot_repository;
pub(crate) mod user_repository;

pub use car_repository::{CarRepository, CarStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use slot_repository::{SlotRepository, SlotStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use car_repository::MockCarRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use slot_repository::MockSlotRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
