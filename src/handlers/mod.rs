//! HTTP handler modules.
//! Used by: server.

pub mod health;
pub mod metrics;
pub mod save;

use serde::{Deserialize, Serialize};

/// The `{"message": ...}` body every `/save` response carries.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}
