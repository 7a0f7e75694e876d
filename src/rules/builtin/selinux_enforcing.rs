use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::matcher::LinePattern;
use crate::rules::report::RuleMetadata;
use crate::rules::{BaselineRule, Check, Fix};
use crate::system::MacMode;

static SELINUX_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^SELINUX\s*=").unwrap());

/// 0181: SELinux enforcing
///
/// Compliance is judged on the persistent config; the runtime
/// `setenforce 1` is attempted as a courtesy but the kernel may not
/// support flipping it (and never supports leaving `disabled`), so that
/// substep is optional. The persistent setting needs a reboot.
pub fn rule() -> BaselineRule {
    BaselineRule::new(
        RuleMetadata {
            id: "0181".into(),
            title: "SELinux enforcing mode".into(),
            description: "/etc/selinux/config sets SELINUX=enforcing".into(),
            requires_privilege: true,
            requires_reboot: true,
            reload_service: None,
        },
        vec![Check::FileContains {
            path: PathBuf::from("/etc/selinux/config"),
            pattern: LinePattern::anchored(r"SELINUX\s*=\s*enforcing\s*$")
                .expect("static pattern"),
        }],
        vec![
            Fix::SetConfigKey {
                path: PathBuf::from("/etc/selinux/config"),
                key: SELINUX_KEY.clone(),
                line: "SELINUX=enforcing".into(),
            },
            Fix::SetMacRuntimeMode {
                mode: MacMode::Enforcing,
                optional: true,
            },
        ],
    )
}
