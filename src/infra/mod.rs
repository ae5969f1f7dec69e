//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Redis-backed rate limiting
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, RateLimiter};
pub use db::{Database, Migrator};
pub use repositories::{
    CarRepository, CarStore, PaymentRepository, PaymentStore, SlotRepository, SlotStore,
    UserRepository, UserStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxCarRepository, TxFuture, TxPaymentRepository,
    TxSlotRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockRateLimiter;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCarRepository, MockPaymentRepository, MockSlotRepository, MockUserRepository,
};
