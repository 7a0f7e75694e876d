//! Collaborator interfaces between the engine and the target machine.
//!
//! Rules never touch the filesystem or spawn processes directly: every
//! read goes through [`SystemInspector`] and every write through
//! [`SystemMutator`]. The host implementations live in [`host`]; tests
//! substitute the in-memory [`mock`] system.

pub mod host;
pub mod privilege;

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher::LinePattern;
use crate::rules::report::Finding;

/// Runtime mode of the mandatory-access-control subsystem (SELinux).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacMode {
    Enforcing,
    Permissive,
    Disabled,
}

impl std::fmt::Display for MacMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enforcing => write!(f, "enforcing"),
            Self::Permissive => write!(f, "permissive"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Read-only queries against current system state. Implementations must
/// not mutate anything; the engine relies on inspection being repeatable.
pub trait SystemInspector {
    /// All non-comment lines of `path` matching `pattern`. A missing
    /// file is an empty result, not an error.
    fn find_in_file(&self, path: &Path, pattern: &LinePattern) -> Result<Vec<Finding>>;

    /// Like [`find_in_file`](Self::find_in_file), across every file in
    /// `dir` whose name matches `file_glob` (e.g. `*.rules`).
    fn find_in_dir(&self, dir: &Path, file_glob: &str, pattern: &LinePattern)
        -> Result<Vec<Finding>>;

    /// Permission bits of `path`, or `None` if it does not exist.
    fn file_mode(&self, path: &Path) -> Result<Option<u32>>;

    fn package_installed(&self, name: &str) -> Result<bool>;

    fn mac_mode(&self) -> Result<MacMode>;
}

/// State mutations used by remediation substeps. Each operation is
/// individually safe to leave applied if a later substep fails.
pub trait SystemMutator {
    /// Append `line` to `path`, creating the file and its parent
    /// directory if absent. Appending a line already present is a no-op.
    fn append_line(&self, path: &Path, line: &str) -> Result<()>;

    fn set_mode(&self, path: &Path, mode: u32) -> Result<()>;

    fn install_package(&self, name: &str) -> Result<()>;

    /// Replace the first line matching `key` with `line`, dropping any
    /// further matches; append `line` if no line matches.
    fn set_config_key(&self, path: &Path, key: &Regex, line: &str) -> Result<()>;

    fn reload_service(&self, name: &str) -> Result<()>;

    fn set_mac_runtime_mode(&self, mode: MacMode) -> Result<()>;
}

/// Whether the current execution context may perform remediation.
pub trait PrivilegeChecker {
    fn is_privileged(&self) -> bool;
}
