use std::path::PathBuf;

use crate::matcher::LinePattern;
use crate::rules::report::RuleMetadata;
use crate::rules::{BaselineRule, Check, Fix};

/// 0171: Immutable audit configuration
///
/// `-e 2` locks the audit rule set until reboot so a compromised root
/// session cannot quietly disable auditing. auditctl orders rules.d
/// files lexically, so the setting goes into a 99- drop-in to stay last.
pub fn rule() -> BaselineRule {
    BaselineRule::new(
        RuleMetadata {
            id: "0171".into(),
            title: "Immutable audit configuration".into(),
            description: "audit rules are locked against runtime modification (-e 2)".into(),
            requires_privilege: true,
            requires_reboot: true,
            reload_service: None,
        },
        vec![Check::DirContains {
            dir: PathBuf::from("/etc/audit/rules.d"),
            file_glob: "*.rules".into(),
            pattern: LinePattern::anchored(r"-e\s+2\s*$").expect("static pattern"),
        }],
        vec![Fix::AppendLine {
            path: PathBuf::from("/etc/audit/rules.d/99-finalize.rules"),
            line: "-e 2".into(),
        }],
    )
}
