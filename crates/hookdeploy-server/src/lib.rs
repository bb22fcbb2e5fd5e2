//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod errors;
mod event_type;
mod health;
mod metrics;
pub mod server;
pub mod transfer;
pub mod vcs;
mod webhook;

pub use errors::{Result, ServerError};
