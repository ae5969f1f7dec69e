//! Unit of Work pattern implementation.
//!
//! Every operation that writes a session together with its slot or its
//! payments runs inside one transaction, so a failure between the two writes
//! rolls both back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    car_repository, payment_repository, slot_repository, user_repository, CarRepository,
    CarStore, PaymentRepository, PaymentStore, SlotRepository, SlotStore, UserRepository,
    UserStore,
};
use crate::domain::{
    Fee, NewEntry, NewUser, ParkingRecord, ParkingSlot, PaymentRecord, RecordUpdate, User,
};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Provides read access to all repositories plus transaction management.
/// Not mockable directly because of the generic `transaction` method; services
/// built on it are covered by the SQLite integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn slots(&self) -> Arc<dyn SlotRepository>;

    fn cars(&self) -> Arc<dyn CarRepository>;

    fn payments(&self) -> Arc<dyn PaymentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back otherwise.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access scoped to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn slots(&self) -> TxSlotRepository<'_> {
        TxSlotRepository { txn: self.txn }
    }

    pub fn cars(&self) -> TxCarRepository<'_> {
        TxCarRepository { txn: self.txn }
    }

    pub fn payments(&self) -> TxPaymentRepository<'_> {
        TxPaymentRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    slot_repo: Arc<SlotStore>,
    car_repo: Arc<CarStore>,
    payment_repo: Arc<PaymentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            slot_repo: Arc::new(SlotStore::new(db.clone())),
            car_repo: Arc::new(CarStore::new(db.clone())),
            payment_repo: Arc::new(PaymentStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn slots(&self) -> Arc<dyn SlotRepository> {
        self.slot_repo.clone()
    }

    fn cars(&self) -> Arc<dyn CarRepository> {
        self.car_repo.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // Default isolation: SQLite rejects explicit isolation levels and the
        // slot claim is already a conditional update.
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxUserRepository<'_> {
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        user_repository::find_by_username(self.txn, username).await
    }

    pub async fn create(&self, user: NewUser) -> AppResult<User> {
        user_repository::create(self.txn, user).await
    }

    pub async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        user_repository::update_password(self.txn, id, password_hash).await
    }
}

/// Transaction-aware slot repository.
pub struct TxSlotRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxSlotRepository<'_> {
    pub async fn find(&self, slot_number: &str) -> AppResult<Option<ParkingSlot>> {
        slot_repository::find(self.txn, slot_number).await
    }

    /// Flip an Available slot to Occupied; `SlotUnavailable` otherwise.
    pub async fn occupy(&self, slot_number: &str) -> AppResult<()> {
        slot_repository::occupy(self.txn, slot_number).await
    }

    pub async fn release(&self, slot_number: &str) -> AppResult<()> {
        slot_repository::release(self.txn, slot_number).await
    }
}

/// Transaction-aware session repository.
pub struct TxCarRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxCarRepository<'_> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ParkingRecord>> {
        car_repository::find_by_id(self.txn, id).await
    }

    pub async fn find_latest_by_plate(&self, plate_number: &str) -> AppResult<Option<ParkingRecord>> {
        car_repository::find_latest_by_plate(self.txn, plate_number).await
    }

    pub async fn insert(&self, entry: NewEntry) -> AppResult<ParkingRecord> {
        car_repository::insert(self.txn, entry).await
    }

    pub async fn record_exit(&self, id: Uuid, exit_time: DateTime<Utc>, fee: &Fee) -> AppResult<()> {
        car_repository::record_exit(self.txn, id, exit_time, fee).await
    }

    pub async fn mark_paid(&self, plate_number: &str) -> AppResult<u64> {
        car_repository::mark_paid(self.txn, plate_number).await
    }

    pub async fn update_details(&self, id: Uuid, update: RecordUpdate) -> AppResult<ParkingRecord> {
        car_repository::update_details(self.txn, id, update).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        car_repository::delete(self.txn, id).await
    }
}

/// Transaction-aware payment repository.
pub struct TxPaymentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxPaymentRepository<'_> {
    pub async fn insert(
        &self,
        plate_number: String,
        amount: i64,
        payment_date: DateTime<Utc>,
    ) -> AppResult<PaymentRecord> {
        payment_repository::insert(self.txn, plate_number, amount, payment_date).await
    }

    pub async fn delete_by_plate(&self, plate_number: &str) -> AppResult<u64> {
        payment_repository::delete_by_plate(self.txn, plate_number).await
    }
}

/// Run a block inside a transaction with less boilerplate.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
