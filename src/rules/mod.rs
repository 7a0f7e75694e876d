pub mod builtin;
pub mod report;

use std::path::PathBuf;

use regex::Regex;

pub use report::{CheckResult, Finding, RuleMetadata, StatusReport};

use crate::error::Result;
use crate::matcher::LinePattern;
use crate::system::{MacMode, SystemInspector, SystemMutator};

/// One declarative compliance condition, evaluated read-only against a
/// [`SystemInspector`].
#[derive(Debug, Clone)]
pub enum Check {
    /// `path` contains a non-comment line matching `pattern`.
    FileContains { path: PathBuf, pattern: LinePattern },
    /// Some file in `dir` matching `file_glob` contains `pattern`.
    DirContains {
        dir: PathBuf,
        file_glob: String,
        pattern: LinePattern,
    },
    /// `path` carries no permission bits beyond `mode`. An absent file
    /// passes; there is nothing to protect.
    FileModeAtMost { path: PathBuf, mode: u32 },
    PackageInstalled { name: String },
    MacModeIs { expected: MacMode },
    /// Passes when any inner check passes (a setting may live in one of
    /// several files, e.g. rsyslog.conf vs. rsyslog.d drop-ins).
    AnyOf(Vec<Check>),
}

impl Check {
    pub fn describe(&self) -> String {
        match self {
            Self::FileContains { path, pattern } => {
                format!("{} contains {}", path.display(), pattern.describe())
            }
            Self::DirContains {
                dir,
                file_glob,
                pattern,
            } => format!(
                "{}/{} contains {}",
                dir.display(),
                file_glob,
                pattern.describe()
            ),
            Self::FileModeAtMost { path, mode } => {
                format!("{} mode is at most {mode:04o}", path.display())
            }
            Self::PackageInstalled { name } => format!("package {name} is installed"),
            Self::MacModeIs { expected } => format!("MAC subsystem is {expected}"),
            Self::AnyOf(checks) => {
                let parts: Vec<String> = checks.iter().map(Check::describe).collect();
                parts.join(", or ")
            }
        }
    }

    pub fn evaluate(&self, sys: &dyn SystemInspector) -> Result<CheckResult> {
        let (pass, findings) = match self {
            Self::FileContains { path, pattern } => {
                let findings = sys.find_in_file(path, pattern)?;
                (!findings.is_empty(), findings)
            }
            Self::DirContains {
                dir,
                file_glob,
                pattern,
            } => {
                let findings = sys.find_in_dir(dir, file_glob, pattern)?;
                (!findings.is_empty(), findings)
            }
            Self::FileModeAtMost { path, mode } => match sys.file_mode(path)? {
                None => (true, vec![]),
                Some(actual) => {
                    let finding = Finding {
                        location: path.clone(),
                        line_number: None,
                        matched_text: format!("mode {actual:04o}"),
                    };
                    ((actual & !mode) == 0, vec![finding])
                }
            },
            Self::PackageInstalled { name } => (sys.package_installed(name)?, vec![]),
            Self::MacModeIs { expected } => {
                let actual = sys.mac_mode()?;
                let finding = Finding {
                    location: PathBuf::from("/sys/fs/selinux/enforce"),
                    line_number: None,
                    matched_text: actual.to_string(),
                };
                (actual == *expected, vec![finding])
            }
            Self::AnyOf(checks) => {
                let mut pass = false;
                let mut findings = Vec::new();
                for check in checks {
                    let result = check.evaluate(sys)?;
                    pass |= result.pass;
                    findings.extend(result.findings);
                }
                (pass, findings)
            }
        };

        Ok(CheckResult {
            description: self.describe(),
            pass,
            findings,
        })
    }
}

/// One remediation substep, applied through a [`SystemMutator`].
///
/// Substeps must stay individually safe to leave partially applied:
/// appends are idempotent, file/key edits converge, installs and
/// reloads can be repeated.
#[derive(Debug, Clone)]
pub enum Fix {
    AppendLine { path: PathBuf, line: String },
    SetMode { path: PathBuf, mode: u32 },
    InstallPackage { name: String },
    /// Replace-else-append the line for a config key.
    SetConfigKey {
        path: PathBuf,
        key: Regex,
        line: String,
    },
    ReloadService { name: String },
    /// Best-effort when `optional`: failure is reported but does not
    /// fail the remediation attempt (runtime MAC toggling may be
    /// unsupported; persistent state is what compliance checks).
    SetMacRuntimeMode { mode: MacMode, optional: bool },
}

impl Fix {
    pub fn describe(&self) -> String {
        match self {
            Self::AppendLine { path, line } => {
                format!("append `{line}` to {}", path.display())
            }
            Self::SetMode { path, mode } => {
                format!("set {} mode to {mode:04o}", path.display())
            }
            Self::InstallPackage { name } => format!("install package {name}"),
            Self::SetConfigKey { path, line, .. } => {
                format!("set `{line}` in {}", path.display())
            }
            Self::ReloadService { name } => format!("restart service {name}"),
            Self::SetMacRuntimeMode { mode, .. } => {
                format!("set MAC runtime mode to {mode}")
            }
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::SetMacRuntimeMode { optional: true, .. })
    }

    pub fn apply(&self, sys: &dyn SystemMutator) -> Result<()> {
        match self {
            Self::AppendLine { path, line } => sys.append_line(path, line),
            Self::SetMode { path, mode } => sys.set_mode(path, *mode),
            Self::InstallPackage { name } => sys.install_package(name),
            Self::SetConfigKey { path, key, line } => sys.set_config_key(path, key, line),
            Self::ReloadService { name } => sys.reload_service(name),
            Self::SetMacRuntimeMode { mode, .. } => sys.set_mac_runtime_mode(*mode),
        }
    }
}

/// One baseline benchmark item: metadata, compliance checks, and the
/// remediation substeps that should make the checks pass.
///
/// Rules are stateless and reusable. All true state lives in the
/// external system; a rule only describes how to observe and mutate it.
#[derive(Debug, Clone)]
pub struct BaselineRule {
    meta: RuleMetadata,
    checks: Vec<Check>,
    fixes: Vec<Fix>,
}

impl BaselineRule {
    pub fn new(meta: RuleMetadata, checks: Vec<Check>, fixes: Vec<Fix>) -> Self {
        Self {
            meta,
            checks,
            fixes,
        }
    }

    pub fn metadata(&self) -> &RuleMetadata {
        &self.meta
    }

    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    /// Observe current state. Read-only; safe to call repeatedly.
    pub fn inspect(&self, sys: &dyn SystemInspector) -> Result<StatusReport> {
        let results = self
            .checks
            .iter()
            .map(|check| check.evaluate(sys))
            .collect::<Result<Vec<_>>>()?;
        Ok(StatusReport::new(results))
    }

    /// The compliance predicate: every check passes.
    pub fn is_compliant(&self, sys: &dyn SystemInspector) -> Result<bool> {
        Ok(self.inspect(sys)?.compliant)
    }
}
