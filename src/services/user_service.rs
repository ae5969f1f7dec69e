//! User service - staff account management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{is_valid_role, DEFAULT_ADMIN_FULL_NAME, DEFAULT_ADMIN_USERNAME};
use crate::domain::{NewUser, Password, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields supplied when an admin creates an account
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account. Fails on a taken username or an unknown role.
    async fn create_user(&self, request: CreateUser) -> AppResult<User>;

    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Create the admin account, or reset its password if it already exists
    async fn ensure_admin(&self, password: String) -> AppResult<User>;
}

pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create_user(&self, request: CreateUser) -> AppResult<User> {
        if !is_valid_role(&request.role) {
            return Err(AppError::validation("Role must be one of: staff, admin"));
        }

        if self
            .uow
            .users()
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = Password::new(&request.password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                username: request.username,
                password_hash,
                full_name: request.full_name,
                role: UserRole::from(request.role.as_str()),
            })
            .await?;

        tracing::info!(username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn ensure_admin(&self, password: String) -> AppResult<User> {
        let password_hash = Password::new(&password)?.into_string();

        let user = with_transaction!(self.uow, |ctx| {
            let users = ctx.users();
            match users.find_by_username(DEFAULT_ADMIN_USERNAME).await? {
                Some(mut admin) => {
                    users.update_password(admin.id, password_hash.clone()).await?;
                    admin.password_hash = password_hash;
                    Ok::<_, AppError>(admin)
                }
                None => {
                    users
                        .create(NewUser {
                            username: DEFAULT_ADMIN_USERNAME.to_string(),
                            password_hash,
                            full_name: DEFAULT_ADMIN_FULL_NAME.to_string(),
                            role: UserRole::Admin,
                        })
                        .await
                }
            }
        })?;

        tracing::info!(username = %user.username, "Admin account ready");
        Ok(user)
    }
}
