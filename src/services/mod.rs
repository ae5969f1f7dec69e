//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. Handlers depend on
//! the traits; the `*Manager` implementations are generic over the Unit of
//! Work that provides repositories and transactions.

mod auth_service;
mod parking_service;
mod report_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use parking_service::{ParkingManager, ParkingService};
pub use report_service::{ReportManager, ReportService};
pub use user_service::{CreateUser, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use parking_service::MockParkingService;
#[cfg(any(test, feature = "test-utils"))]
pub use report_service::MockReportService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;

#[cfg(test)]
pub(crate) mod testing;
