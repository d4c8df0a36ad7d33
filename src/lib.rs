//! loginstore: accepts email/password pairs over HTTP and appends them to a
//! document store.

pub mod config;
pub mod console;
pub mod error;
pub mod handlers;
pub mod password;
pub mod server;
pub mod state;
pub mod store;
pub mod telemetry;
