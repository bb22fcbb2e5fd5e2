//! SFTP implementation of the transfer interface.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod handler;
mod session;

pub use errors::SftpError;
pub use session::{connect_all, load_private_key, SftpTransferSession};
