//! Staff account repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Replace the stored hash of an existing account
    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        find_by_username(&self.db, username).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        create(&self.db, user).await
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        update_password(&self.db, id, password_hash).await
    }
}

// Query bodies shared by the pooled store and the transactional repository.

pub(crate) async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<User>> {
    let result = UserEntity::find_by_id(id)
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

pub(crate) async fn find_by_username<C: ConnectionTrait>(
    conn: &C,
    username: &str,
) -> AppResult<Option<User>> {
    let result = UserEntity::find()
        .filter(user::Column::Username.eq(username))
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

pub(crate) async fn create<C: ConnectionTrait>(conn: &C, user: NewUser) -> AppResult<User> {
    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(user.username),
        password_hash: Set(user.password_hash),
        full_name: Set(user.full_name),
        role: Set(user.role.as_str().to_string()),
        created_at: Set(Utc::now()),
    };

    let model = active_model.insert(conn).await.map_err(insert_error)?;
    Ok(User::from(model))
}

/// A concurrent create can slip past the existence check; the unique index
/// still catches it.
fn insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Username"),
        _ => AppError::from(err),
    }
}

pub(crate) async fn update_password<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    password_hash: String,
) -> AppResult<()> {
    let user = UserEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = user.into();
    active.password_hash = Set(password_hash);
    active.update(conn).await.map_err(AppError::from)?;
    Ok(())
}
