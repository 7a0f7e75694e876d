use crate::rules::report::RuleMetadata;
use crate::rules::{BaselineRule, Check, Fix};

/// 0175: rsyslog installed
///
/// The log-routing rules downstream assume the rsyslog daemon exists;
/// this item only asserts package presence.
pub fn rule() -> BaselineRule {
    BaselineRule::new(
        RuleMetadata {
            id: "0175".into(),
            title: "rsyslog package installed".into(),
            description: "the rsyslog package is present on the system".into(),
            requires_privilege: true,
            requires_reboot: false,
            reload_service: None,
        },
        vec![Check::PackageInstalled {
            name: "rsyslog".into(),
        }],
        vec![Fix::InstallPackage {
            name: "rsyslog".into(),
        }],
    )
}
