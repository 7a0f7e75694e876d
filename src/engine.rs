//! Lifecycle driver: Inspect → Report → Decide → Remediate → Re-verify → Exit.

use tracing::debug;

use crate::error::Result;
use crate::output::OutputSink;
use crate::prompt::{Answer, ConfirmationPrompt};
use crate::rules::BaselineRule;
use crate::system::{PrivilegeChecker, SystemInspector, SystemMutator};

/// Final outcome of one rule run, mapped 1:1 to the process exit code
/// operator tooling keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Compliant, either already or after verified remediation.
    Success,
    /// Operator declined, or non-interactive report-only run.
    Skipped,
    /// Operator canceled at the prompt.
    Canceled,
    /// Remediation refused, failed, or did not verify.
    Failed,
}

impl ExitOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Skipped => 1,
            Self::Canceled => 2,
            Self::Failed => 3,
        }
    }
}

/// How the decision step resolves when the rule is non-compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Ask the operator (the reference behavior).
    Interactive,
    /// Never remediate; report and exit `Skipped`.
    ReportOnly,
    /// Remediate without asking, for automated sweeps.
    AssumeYes,
}

/// Drives exactly one rule through its lifecycle. The engine owns no
/// state of its own; everything it knows comes from the collaborators.
pub struct Engine<'a> {
    pub inspector: &'a dyn SystemInspector,
    pub mutator: &'a dyn SystemMutator,
    pub privilege: &'a dyn PrivilegeChecker,
    pub prompt: &'a mut dyn ConfirmationPrompt,
    pub sink: &'a mut dyn OutputSink,
}

impl Engine<'_> {
    pub fn run(&mut self, rule: &BaselineRule, mode: RunMode) -> Result<ExitOutcome> {
        let meta = rule.metadata();
        self.sink.banner(meta);

        self.sink.section("Current status");
        let before = rule.inspect(self.inspector)?;
        self.sink.report(&before);
        self.sink.verdict(before.compliant);

        if before.compliant {
            // Terminal: no prompt, no remediation.
            self.sink.outcome(ExitOutcome::Success);
            return Ok(ExitOutcome::Success);
        }

        match mode {
            RunMode::ReportOnly => {
                self.sink.note("Report-only mode; remediation not attempted.");
                self.sink.outcome(ExitOutcome::Skipped);
                return Ok(ExitOutcome::Skipped);
            }
            RunMode::AssumeYes => debug!(rule = %meta.id, "remediation pre-approved"),
            RunMode::Interactive => match self.prompt.confirm("Apply remediation?") {
                Answer::Yes => {}
                Answer::No => {
                    self.sink.outcome(ExitOutcome::Skipped);
                    return Ok(ExitOutcome::Skipped);
                }
                Answer::Cancel => {
                    self.sink.outcome(ExitOutcome::Canceled);
                    return Ok(ExitOutcome::Canceled);
                }
            },
        }

        if meta.requires_privilege && !self.privilege.is_privileged() {
            self.sink
                .error("remediation requires elevated privileges; re-run as root");
            self.sink.outcome(ExitOutcome::Failed);
            return Ok(ExitOutcome::Failed);
        }

        // Best-effort: one failed substep fails the attempt but the
        // remaining substeps still run, so re-verification observes
        // whatever state actually resulted.
        let mut substep_failed = false;
        for fix in rule.fixes() {
            match fix.apply(self.mutator) {
                Ok(()) => self.sink.remediation_step(&fix.describe(), true),
                Err(e) => {
                    self.sink.remediation_step(&fix.describe(), false);
                    if fix.is_optional() {
                        self.sink.note(&format!("optional step failed: {e}"));
                    } else {
                        self.sink.error(&e.to_string());
                        substep_failed = true;
                    }
                }
            }
        }

        self.sink.section("Re-verified status");
        let after = rule.inspect(self.inspector)?;
        self.sink.report(&after);
        self.sink.verdict(after.compliant);

        if meta.requires_reboot {
            self.sink
                .note("A reboot is required for the change to take full effect.");
        }

        let outcome = if after.compliant && !substep_failed {
            ExitOutcome::Success
        } else {
            ExitOutcome::Failed
        };
        self.sink.outcome(outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::LinePattern;
    use crate::output::buffer::BufferSink;
    use crate::prompt::scripted::{RefusingPrompt, ScriptedPrompt};
    use crate::rules::report::RuleMetadata;
    use crate::rules::{Check, Fix};
    use crate::system::mock::{MockSystem, StaticPrivilege};
    use crate::system::MacMode;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const FAILLOCK_LINE: &str = "-w /var/log/faillock -p wa -k logins";
    const RULES_FILE: &str = "/etc/audit/rules.d/audit.rules";

    fn faillock_rule() -> BaselineRule {
        BaselineRule::new(
            RuleMetadata {
                id: "0173".into(),
                title: "Audit watch on faillock".into(),
                description: "test".into(),
                requires_privilege: true,
                requires_reboot: false,
                reload_service: None,
            },
            vec![Check::FileContains {
                path: PathBuf::from(RULES_FILE),
                pattern: LinePattern::exact(FAILLOCK_LINE),
            }],
            vec![Fix::AppendLine {
                path: PathBuf::from(RULES_FILE),
                line: FAILLOCK_LINE.into(),
            }],
        )
    }

    fn run_with(
        sys: &MockSystem,
        prompt: &mut dyn ConfirmationPrompt,
        privileged: bool,
        rule: &BaselineRule,
        mode: RunMode,
    ) -> (ExitOutcome, BufferSink) {
        let mut sink = BufferSink::new();
        let privilege = StaticPrivilege(privileged);
        let mut engine = Engine {
            inspector: sys,
            mutator: sys,
            privilege: &privilege,
            prompt,
            sink: &mut sink,
        };
        let outcome = engine.run(rule, mode).unwrap();
        (outcome, sink)
    }

    #[test]
    fn exit_codes_match_outcome_table() {
        assert_eq!(ExitOutcome::Success.exit_code(), 0);
        assert_eq!(ExitOutcome::Skipped.exit_code(), 1);
        assert_eq!(ExitOutcome::Canceled.exit_code(), 2);
        assert_eq!(ExitOutcome::Failed.exit_code(), 3);
    }

    #[test]
    fn compliant_state_exits_success_without_prompting() {
        let sys = MockSystem::new().with_file(RULES_FILE, &format!("{FAILLOCK_LINE}\n"));
        let (outcome, sink) = run_with(
            &sys,
            &mut RefusingPrompt,
            false,
            &faillock_rule(),
            RunMode::Interactive,
        );
        assert_eq!(outcome, ExitOutcome::Success);
        assert_eq!(sys.mutations.get(), 0);
        assert!(sink.contains("verdict compliant"));
    }

    #[test]
    fn no_answer_skips_without_mutation() {
        let sys = MockSystem::new();
        let mut prompt = ScriptedPrompt::new(&[Answer::No]);
        let (outcome, _) = run_with(&sys, &mut prompt, true, &faillock_rule(), RunMode::Interactive);
        assert_eq!(outcome, ExitOutcome::Skipped);
        assert_eq!(sys.mutations.get(), 0);
    }

    #[test]
    fn cancel_answer_cancels_without_mutation() {
        let sys = MockSystem::new();
        let mut prompt = ScriptedPrompt::new(&[Answer::Cancel]);
        let (outcome, _) = run_with(&sys, &mut prompt, true, &faillock_rule(), RunMode::Interactive);
        assert_eq!(outcome, ExitOutcome::Canceled);
        assert_eq!(sys.mutations.get(), 0);
    }

    #[test]
    fn report_only_skips_without_prompting() {
        let sys = MockSystem::new();
        let (outcome, _) = run_with(
            &sys,
            &mut RefusingPrompt,
            true,
            &faillock_rule(),
            RunMode::ReportOnly,
        );
        assert_eq!(outcome, ExitOutcome::Skipped);
        assert_eq!(sys.mutations.get(), 0);
    }

    #[test]
    fn unprivileged_run_fails_before_mutation() {
        let sys = MockSystem::new();
        let mut prompt = ScriptedPrompt::new(&[Answer::Yes]);
        let (outcome, sink) =
            run_with(&sys, &mut prompt, false, &faillock_rule(), RunMode::Interactive);
        assert_eq!(outcome, ExitOutcome::Failed);
        assert_eq!(sys.mutations.get(), 0);
        assert!(sink.contains("elevated privileges"));
    }

    #[test]
    fn yes_creates_target_file_and_verifies() {
        let sys = MockSystem::new();
        let mut prompt = ScriptedPrompt::new(&[Answer::Yes]);
        let (outcome, _) = run_with(&sys, &mut prompt, true, &faillock_rule(), RunMode::Interactive);
        assert_eq!(outcome, ExitOutcome::Success);
        assert_eq!(sys.file(RULES_FILE).unwrap(), format!("{FAILLOCK_LINE}\n"));
    }

    #[test]
    fn rerun_does_not_duplicate_the_line() {
        let sys = MockSystem::new();
        let mut prompt = ScriptedPrompt::new(&[Answer::Yes]);
        run_with(&sys, &mut prompt, true, &faillock_rule(), RunMode::Interactive);

        // Second run short-circuits on compliance; force a third append
        // anyway to prove idempotence of the fix itself.
        let (outcome, _) = run_with(
            &sys,
            &mut RefusingPrompt,
            true,
            &faillock_rule(),
            RunMode::AssumeYes,
        );
        assert_eq!(outcome, ExitOutcome::Success);
        for fix in faillock_rule().fixes() {
            fix.apply(&sys).unwrap();
        }
        assert_eq!(
            sys.file(RULES_FILE).unwrap().matches(FAILLOCK_LINE).count(),
            1
        );
    }

    #[test]
    fn assume_yes_remediates_without_prompting() {
        let sys = MockSystem::new();
        let (outcome, _) = run_with(
            &sys,
            &mut RefusingPrompt,
            true,
            &faillock_rule(),
            RunMode::AssumeYes,
        );
        assert_eq!(outcome, ExitOutcome::Success);
    }

    #[test]
    fn failed_substep_fails_run_but_later_steps_still_apply() {
        let rule = BaselineRule::new(
            RuleMetadata {
                id: "0177".into(),
                title: "rsyslog routing".into(),
                description: "test".into(),
                requires_privilege: true,
                requires_reboot: false,
                reload_service: Some("rsyslog".into()),
            },
            vec![Check::FileContains {
                path: PathBuf::from("/etc/rsyslog.conf"),
                pattern: LinePattern::exact("authpriv.* /var/log/secure"),
            }],
            vec![
                Fix::ReloadService { name: "rsyslog".into() },
                Fix::AppendLine {
                    path: PathBuf::from("/etc/rsyslog.conf"),
                    line: "authpriv.* /var/log/secure".into(),
                },
            ],
        );

        let sys = MockSystem::new().fail_on("reload_service");
        let (outcome, _) = run_with(&sys, &mut RefusingPrompt, true, &rule, RunMode::AssumeYes);

        // Best-effort: the append ran even though the reload failed,
        // so the re-check sees the line; the run still fails overall.
        assert_eq!(outcome, ExitOutcome::Failed);
        assert!(sys.file("/etc/rsyslog.conf").unwrap().contains("authpriv"));
    }

    #[test]
    fn optional_substep_failure_is_tolerated() {
        let rule = BaselineRule::new(
            RuleMetadata {
                id: "0181".into(),
                title: "SELinux enforcing".into(),
                description: "test".into(),
                requires_privilege: true,
                requires_reboot: true,
                reload_service: None,
            },
            vec![Check::FileContains {
                path: PathBuf::from("/etc/selinux/config"),
                pattern: LinePattern::anchored(r"SELINUX\s*=\s*enforcing\s*$").unwrap(),
            }],
            vec![
                Fix::SetConfigKey {
                    path: PathBuf::from("/etc/selinux/config"),
                    key: regex::Regex::new(r"^SELINUX\s*=").unwrap(),
                    line: "SELINUX=enforcing".into(),
                },
                Fix::SetMacRuntimeMode {
                    mode: MacMode::Enforcing,
                    optional: true,
                },
            ],
        );

        let sys = MockSystem::new().fail_on("set_mac_runtime_mode");
        let (outcome, sink) = run_with(&sys, &mut RefusingPrompt, true, &rule, RunMode::AssumeYes);
        assert_eq!(outcome, ExitOutcome::Success);
        assert!(sink.contains("optional step failed"));
        assert!(sink.contains("A reboot is required"));
    }
}
