use std::path::PathBuf;

use crate::matcher::LinePattern;
use crate::rules::report::RuleMetadata;
use crate::rules::{BaselineRule, Check, Fix};

const WATCH_LINE: &str = "-w /var/log/faillock -p wa -k logins";

/// 0173: Audit failed-login records
///
/// auditd must watch /var/log/faillock for writes and attribute changes
/// so tampering with lockout records is recorded. The watch may live in
/// any rules.d drop-in; remediation appends it to the main one. Loaded
/// rules only change at boot.
pub fn rule() -> BaselineRule {
    BaselineRule::new(
        RuleMetadata {
            id: "0173".into(),
            title: "Audit watch on failed-login records".into(),
            description: "auditd records writes and attribute changes to /var/log/faillock"
                .into(),
            requires_privilege: true,
            requires_reboot: true,
            reload_service: None,
        },
        vec![Check::DirContains {
            dir: PathBuf::from("/etc/audit/rules.d"),
            file_glob: "*.rules".into(),
            pattern: LinePattern::exact(WATCH_LINE),
        }],
        vec![Fix::AppendLine {
            path: PathBuf::from("/etc/audit/rules.d/audit.rules"),
            line: WATCH_LINE.into(),
        }],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::mock::MockSystem;

    #[test]
    fn non_compliant_when_rules_d_is_empty() {
        let sys = MockSystem::new();
        assert!(!rule().is_compliant(&sys).unwrap());
    }

    #[test]
    fn any_rules_file_satisfies_the_watch() {
        let sys = MockSystem::new().with_file(
            "/etc/audit/rules.d/50-logins.rules",
            &format!("{WATCH_LINE}\n"),
        );
        assert!(rule().is_compliant(&sys).unwrap());
    }

    #[test]
    fn commented_watch_does_not_count() {
        let sys = MockSystem::new().with_file(
            "/etc/audit/rules.d/audit.rules",
            &format!("# {WATCH_LINE}\n"),
        );
        assert!(!rule().is_compliant(&sys).unwrap());
    }

    #[test]
    fn fix_creates_the_watch_once() {
        let sys = MockSystem::new();
        let rule = rule();
        for fix in rule.fixes() {
            fix.apply(&sys).unwrap();
            fix.apply(&sys).unwrap();
        }
        assert!(rule.is_compliant(&sys).unwrap());
        let written = sys.file("/etc/audit/rules.d/audit.rules").unwrap();
        assert_eq!(written.matches(WATCH_LINE).count(), 1);
    }
}
