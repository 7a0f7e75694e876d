//! hardenctl — check-and-remediate tool for Linux hardening baselines.
//!
//! One invocation drives one baseline rule through a fixed lifecycle:
//! inspect current state, report findings, ask the operator, remediate,
//! re-verify, exit with a code automation can key on (0 compliant,
//! 1 skipped, 2 canceled, 3 failed).
//!
//! # Quick Start
//!
//! ```no_run
//! use hardenctl::{run_rule, RunOptions};
//!
//! let outcome = run_rule("0173", &RunOptions::default()).unwrap();
//! std::process::exit(outcome.exit_code());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod output;
pub mod prompt;
pub mod rules;
pub mod system;

use std::path::{Path, PathBuf};

use config::Config;
use engine::{Engine, ExitOutcome, RunMode};
use error::{HardenError, Result};
use output::console::ConsoleSink;
use system::host::HostSystem;
use system::privilege::EuidPrivilege;

/// Options for a rule run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Config file path (defaults to [`Config::DEFAULT_PATH`]).
    pub config_path: Option<PathBuf>,
    /// Filesystem root the rule paths resolve against; `/` by default.
    /// Pointing this at a mounted image audits it offline.
    pub root: Option<PathBuf>,
    /// CLI override for the decision mode; `None` falls back to config
    /// (`assume_yes`) and then to interactive.
    pub mode: Option<RunMode>,
    /// CLI override for colored output.
    pub color: Option<bool>,
}

/// Run one baseline rule against the host, wiring up the real
/// collaborators (filesystem, rpm/systemctl, stdin prompt, console).
pub fn run_rule(rule_id: &str, options: &RunOptions) -> Result<ExitOutcome> {
    let rule = rules::builtin::find(rule_id)
        .ok_or_else(|| HardenError::UnknownRule(rule_id.to_string()))?;

    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(Config::DEFAULT_PATH));
    let config = Config::load(&config_path)?;

    let mode = options.mode.unwrap_or(if config.prompt.assume_yes {
        RunMode::AssumeYes
    } else {
        RunMode::Interactive
    });

    let system = match &options.root {
        Some(root) => HostSystem::with_root(root),
        None => HostSystem::new(),
    };
    let privilege = EuidPrivilege;
    let mut prompt = prompt::stdin_prompt();
    let mut sink = ConsoleSink::new(options.color.unwrap_or(config.output.color));

    let mut engine = Engine {
        inspector: &system,
        mutator: &system,
        privilege: &privilege,
        prompt: &mut prompt,
        sink: &mut sink,
    };
    engine.run(&rule, mode)
}

/// Make sure a path exists before treating it as an offline root.
pub fn validate_root(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(HardenError::Config(format!(
            "root `{}` is not a directory",
            root.display()
        )))
    }
}
