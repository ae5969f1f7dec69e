//! Parking Manager - REST backend for a staffed parking lot.
//!
//! Tracks slot occupancy, vehicle sessions, hourly billing and payments, and
//! serves reports and a dashboard to the front-desk client.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: Command-line interface and its implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, the fee calculator and report aggregation
//! - **services**: Use cases (auth, users, parking, reports)
//! - **infra**: Database, migrations, repositories, Redis, Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{FeeCalculator, Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::{Cache, Database};
