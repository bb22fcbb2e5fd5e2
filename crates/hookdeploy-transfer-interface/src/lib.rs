//! Transfer interface

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod interface;
#[cfg(any(test, feature = "testkit"))]
mod memory;

pub use errors::TransferError;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockTransferSession;
pub use interface::TransferSession;
#[cfg(any(test, feature = "testkit"))]
pub use memory::{MemoryTransferSession, RecordedWrite, WriteLog};
