pub mod console;

use crate::engine::ExitOutcome;
use crate::rules::report::{RuleMetadata, StatusReport};

/// Rendering seam for everything the engine tells the operator.
pub trait OutputSink {
    /// Rule id + title header, printed once per run.
    fn banner(&mut self, meta: &RuleMetadata);

    /// Section header ("Current status", "Re-verified status").
    fn section(&mut self, title: &str);

    /// Per-check results with located findings.
    fn report(&mut self, report: &StatusReport);

    /// Compliant / non-compliant verdict line.
    fn verdict(&mut self, compliant: bool);

    /// One remediation substep and whether it succeeded.
    fn remediation_step(&mut self, description: &str, ok: bool);

    /// Advisory line (reboot needed, skip reasons, optional-step notes).
    fn note(&mut self, message: &str);

    fn error(&mut self, message: &str);

    /// Final success/failure banner for the whole run.
    fn outcome(&mut self, outcome: ExitOutcome);
}
