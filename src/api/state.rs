//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::FeeCalculator;
use crate::infra::{Database, Persistence, RateLimiter};
use crate::services::{
    AuthService, Authenticator, ParkingManager, ParkingService, ReportManager, ReportService,
    UserManager, UserService,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub parking_service: Arc<dyn ParkingService>,
    pub report_service: Arc<dyn ReportService>,
    /// Request counters for rate limiting
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire every service onto one Unit of Work over the given database.
    pub fn from_config(
        database: Arc<Database>,
        rate_limiter: Arc<dyn RateLimiter>,
        config: Config,
    ) -> Self {
        let uow = Arc::new(Persistence::new(database.get_connection()));
        let fees = FeeCalculator::new(config.hourly_rate);

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            parking_service: Arc::new(ParkingManager::new(uow.clone(), fees)),
            report_service: Arc::new(ReportManager::new(uow, fees)),
            rate_limiter,
            database,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        parking_service: Arc<dyn ParkingService>,
        report_service: Arc<dyn ReportService>,
        rate_limiter: Arc<dyn RateLimiter>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            parking_service,
            report_service,
            rate_limiter,
            database,
        }
    }
}
