use nix::unistd::Uid;

use super::PrivilegeChecker;

/// Privilege check against the effective uid of this process.
pub struct EuidPrivilege;

impl PrivilegeChecker for EuidPrivilege {
    fn is_privileged(&self) -> bool {
        Uid::effective().is_root()
    }
}
