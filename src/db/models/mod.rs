//! Wire models for the simulated API, split by resource.

pub mod franchise;
pub mod order;
pub mod user;

pub use franchise::*;
pub use order::*;
pub use user::*;

use serde::Serialize;

/// Plain `{"message": "..."}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
