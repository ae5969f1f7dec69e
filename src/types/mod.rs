//! Shared response types.

mod response;

pub use response::{Created, MessageResponse, StatusMessage};
