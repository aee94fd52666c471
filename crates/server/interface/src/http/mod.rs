//! HTTP record endpoints.
//!
//! These are deliberately thin: account registration and login (which
//! issues credentials), the profile lookup, and order creation (which
//! triggers the notification broadcast).

pub mod accounts;
pub mod orders;

use serde::Serialize;

pub use accounts::{get_profile, login, register_user};
pub use orders::create_order;

/// JSON error body shared by every endpoint:
/// `{"status":"error","message":...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}
