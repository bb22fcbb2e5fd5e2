//! Domain models.

mod errors;
mod push_notification;
pub mod types;
mod working_copy;

pub use errors::ModelError;
pub use push_notification::{HeadCommit, PushNotification};
pub use working_copy::WorkingCopy;
