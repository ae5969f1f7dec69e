//! HTTP request handlers.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod auth_handler;
pub mod parking_handler;
pub mod record_handler;
pub mod report_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use parking_handler::parking_routes;
pub use record_handler::record_routes;
pub use report_handler::report_routes;
pub use user_handler::user_routes;

/// 7 to 20 digits, optionally led by `+` and grouped by single spaces or dashes
pub(crate) static PHONE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?(?:[0-9][\- ]?){6,19}[0-9]$").expect("phone number pattern compiles")
});
