use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One located piece of evidence supporting a status report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// File (or other locus) the evidence was found in.
    pub location: PathBuf,
    /// 1-based line number, when the evidence is a matched line.
    pub line_number: Option<usize>,
    /// The matched text.
    pub matched_text: String,
}

/// Outcome of evaluating one compliance check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// What was checked, human readable.
    pub description: String,
    pub pass: bool,
    /// Evidence located while checking (may be empty on a failed check).
    pub findings: Vec<Finding>,
}

/// Fresh snapshot of a rule's observed state. Produced on every
/// inspection; never cached between lifecycle steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub results: Vec<CheckResult>,
    pub compliant: bool,
}

impl StatusReport {
    pub fn new(results: Vec<CheckResult>) -> Self {
        let compliant = results.iter().all(|r| r.pass);
        Self { results, compliant }
    }
}

/// Static metadata about a baseline rule, used for `list-rules` output
/// and for the engine's privilege/reboot/reload gating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Benchmark item code (e.g., "0173").
    pub id: String,
    /// Short title shown in the banner.
    pub title: String,
    /// What the benchmark item requires and why.
    pub description: String,
    /// Remediation needs effective uid 0.
    pub requires_privilege: bool,
    /// Full effect only after a reboot.
    pub requires_reboot: bool,
    /// Service restarted as part of remediation, if any.
    pub reload_service: Option<String>,
}
