//! Real-host collaborators: filesystem edits plus the handful of
//! external tools (rpm, dnf, systemctl, setenforce) the baseline needs.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;
use tracing::debug;

use super::{MacMode, SystemInspector, SystemMutator};
use crate::error::{HardenError, Result};
use crate::matcher::{self, LinePattern};
use crate::rules::report::Finding;

/// Inspector/mutator over a real filesystem tree.
///
/// All rule paths are absolute; they are resolved against `root`, which
/// defaults to `/`. A different root lets the tool audit an offline
/// mounted image and lets tests run inside a temp directory.
pub struct HostSystem {
    root: PathBuf,
}

impl HostSystem {
    pub fn new() -> Self {
        Self::with_root("/")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match path.strip_prefix("/") {
            Ok(rel) => self.root.join(rel),
            Err(_) => self.root.join(path),
        }
    }

    fn read_optional(&self, resolved: &Path) -> Result<Option<String>> {
        match fs::read_to_string(resolved) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn scan_file(&self, resolved: &Path, pattern: &LinePattern) -> Result<Vec<Finding>> {
        let Some(text) = self.read_optional(resolved)? else {
            return Ok(vec![]);
        };
        Ok(matcher::scan(&text, pattern)
            .into_iter()
            .map(|m| Finding {
                location: resolved.to_path_buf(),
                line_number: Some(m.number),
                matched_text: m.text,
            })
            .collect())
    }
}

impl Default for HostSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemInspector for HostSystem {
    fn find_in_file(&self, path: &Path, pattern: &LinePattern) -> Result<Vec<Finding>> {
        self.scan_file(&self.resolve(path), pattern)
    }

    fn find_in_dir(
        &self,
        dir: &Path,
        file_glob: &str,
        pattern: &LinePattern,
    ) -> Result<Vec<Finding>> {
        let expr = self.resolve(dir).join(file_glob);
        let paths = glob::glob(&expr.to_string_lossy())
            .map_err(|e| HardenError::Config(format!("bad file glob `{file_glob}`: {e}")))?;

        let mut findings = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| e.into_error())?;
            if path.is_file() {
                findings.extend(self.scan_file(&path, pattern)?);
            }
        }
        Ok(findings)
    }

    fn file_mode(&self, path: &Path) -> Result<Option<u32>> {
        match fs::metadata(self.resolve(path)) {
            Ok(meta) => Ok(Some(meta.permissions().mode() & 0o7777)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn package_installed(&self, name: &str) -> Result<bool> {
        let status = Command::new("rpm")
            .args(["-q", name])
            .output()
            .map_err(|e| HardenError::CommandFailed {
                command: "rpm".to_string(),
                message: e.to_string(),
            })?;
        debug!(package = name, installed = status.status.success(), "rpm -q");
        Ok(status.status.success())
    }

    fn mac_mode(&self) -> Result<MacMode> {
        // setenforce writes here; absent means SELinux is off or not built in.
        match self.read_optional(&self.resolve(Path::new("/sys/fs/selinux/enforce")))? {
            Some(value) if value.trim() == "1" => Ok(MacMode::Enforcing),
            Some(_) => Ok(MacMode::Permissive),
            None => Ok(MacMode::Disabled),
        }
    }
}

impl SystemMutator for HostSystem {
    fn append_line(&self, path: &Path, line: &str) -> Result<()> {
        let resolved = self.resolve(path);
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)?;
        }

        let existing = self.read_optional(&resolved)?.unwrap_or_default();
        if existing.lines().any(|l| l.trim() == line) {
            debug!(path = %resolved.display(), "line already present, append skipped");
            return Ok(());
        }

        let mut text = existing;
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(line);
        text.push('\n');
        fs::write(&resolved, text)?;
        debug!(path = %resolved.display(), line, "appended");
        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        let resolved = self.resolve(path);
        fs::set_permissions(&resolved, fs::Permissions::from_mode(mode))?;
        debug!(path = %resolved.display(), mode, "chmod");
        Ok(())
    }

    fn install_package(&self, name: &str) -> Result<()> {
        run_tool("dnf", &["install", "-y", name])
    }

    fn set_config_key(&self, path: &Path, key: &Regex, line: &str) -> Result<()> {
        let resolved = self.resolve(path);
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)?;
        }

        let existing = self.read_optional(&resolved)?.unwrap_or_default();
        let mut out = String::new();
        let mut replaced = false;
        for current in existing.lines() {
            if key.is_match(current.trim()) {
                // First match becomes the desired line; duplicates drop.
                if !replaced {
                    out.push_str(line);
                    out.push('\n');
                    replaced = true;
                }
            } else {
                out.push_str(current);
                out.push('\n');
            }
        }
        if !replaced {
            out.push_str(line);
            out.push('\n');
        }
        fs::write(&resolved, out)?;
        debug!(path = %resolved.display(), line, replaced, "config key set");
        Ok(())
    }

    fn reload_service(&self, name: &str) -> Result<()> {
        run_tool("systemctl", &["restart", name])
    }

    fn set_mac_runtime_mode(&self, mode: MacMode) -> Result<()> {
        let flag = match mode {
            MacMode::Enforcing => "1",
            MacMode::Permissive => "0",
            MacMode::Disabled => {
                return Err(HardenError::CommandFailed {
                    command: "setenforce".to_string(),
                    message: "disabled mode cannot be set at runtime".to_string(),
                })
            }
        };
        run_tool("setenforce", &[flag])
    }
}

fn run_tool(command: &str, args: &[&str]) -> Result<()> {
    debug!(command, ?args, "running external tool");
    let output = Command::new(command)
        .args(args)
        .output()
        .map_err(|e| HardenError::CommandFailed {
            command: command.to_string(),
            message: e.to_string(),
        })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(HardenError::CommandFailed {
            command: command.to_string(),
            message: format!("exit {:?}: {}", output.status.code(), stderr.trim()),
        })
    }
}
