use std::path::PathBuf;

use crate::rules::report::RuleMetadata;
use crate::rules::{BaselineRule, Check, Fix};

/// 0179: crontab file permissions
///
/// /etc/crontab must not be readable or writable beyond root (at most
/// 0600). An absent crontab is compliant; there is nothing to expose.
pub fn rule() -> BaselineRule {
    BaselineRule::new(
        RuleMetadata {
            id: "0179".into(),
            title: "System crontab permissions".into(),
            description: "/etc/crontab carries no permission bits beyond 0600".into(),
            requires_privilege: true,
            requires_reboot: false,
            reload_service: None,
        },
        vec![Check::FileModeAtMost {
            path: PathBuf::from("/etc/crontab"),
            mode: 0o600,
        }],
        vec![Fix::SetMode {
            path: PathBuf::from("/etc/crontab"),
            mode: 0o600,
        }],
    )
}
