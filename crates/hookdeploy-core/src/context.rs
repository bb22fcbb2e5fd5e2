use hookdeploy_config::Config;
use hookdeploy_transfer_interface::TransferSession;
use hookdeploy_vcs_interface::VcsService;

use crate::{CoreModule, WorkingCopyLocks};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub vcs_service: &'a (dyn VcsService + 'a),
    pub transfer_sessions: &'a [Box<dyn TransferSession>],
    pub working_copy_locks: &'a WorkingCopyLocks,
}
