pub(crate) mod authenticate_delivery;
pub(crate) mod extract_changed_files;
pub(crate) mod fan_out_copy;
pub(crate) mod process_push_delivery;
pub(crate) mod synchronize_working_copy;

pub use authenticate_delivery::authenticate_delivery;
pub use extract_changed_files::extract_changed_files;
pub use fan_out_copy::FanOutCopyInterface;
pub use process_push_delivery::{DeploymentReport, ProcessPushDeliveryInterface, PushDelivery};
pub use synchronize_working_copy::SynchronizeWorkingCopyInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    fan_out_copy::MockFanOutCopyInterface,
    process_push_delivery::MockProcessPushDeliveryInterface,
    synchronize_working_copy::MockSynchronizeWorkingCopyInterface,
};
