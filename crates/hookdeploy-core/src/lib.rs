//! Deployment logic.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
mod locks;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DeployError, Result};
pub use locks::WorkingCopyLocks;
use shaku::module;
use use_cases::deploy::{
    fan_out_copy::FanOutCopy, process_push_delivery::ProcessPushDelivery,
    synchronize_working_copy::SynchronizeWorkingCopy,
};

module! {
    pub CoreModule {
        components = [SynchronizeWorkingCopy, FanOutCopy, ProcessPushDelivery],
        providers = []
    }
}
