/// API route handlers, organized by resource:
///
/// - `health`: liveness endpoint
/// - `auth`: registration and login
/// - `users`: profile read and reauthenticated profile update

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod health;
pub mod users;

/// Boolean status envelope used by liveness and mutation responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn new(status: bool, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
