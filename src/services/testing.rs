//! Unit of Work stub over mocked repositories for service unit tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{
    CarRepository, MockCarRepository, MockPaymentRepository, MockSlotRepository,
    MockUserRepository, PaymentRepository, SlotRepository, TransactionContext, TxFuture,
    UnitOfWork, UserRepository,
};

/// Read-only: `transaction` always fails, so only services that read
/// through the pooled repositories can be tested with it.
#[derive(Default)]
pub(crate) struct StubUow {
    pub users: Arc<MockUserRepository>,
    pub slots: Arc<MockSlotRepository>,
    pub cars: Arc<MockCarRepository>,
    pub payments: Arc<MockPaymentRepository>,
}

impl StubUow {
    pub fn with_users(users: MockUserRepository) -> Self {
        Self {
            users: Arc::new(users),
            ..Default::default()
        }
    }
}

#[async_trait]
impl UnitOfWork for StubUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn slots(&self) -> Arc<dyn SlotRepository> {
        self.slots.clone()
    }

    fn cars(&self) -> Arc<dyn CarRepository> {
        self.cars.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("transactions are not available in unit tests"))
    }
}
