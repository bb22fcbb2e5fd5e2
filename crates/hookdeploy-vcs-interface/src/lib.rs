//! VCS interface

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod interface;

pub use errors::VcsError;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockVcsService;
pub use interface::{CloneStatus, VcsService};
