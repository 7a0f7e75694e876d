use std::path::PathBuf;

use crate::matcher::LinePattern;
use crate::rules::report::RuleMetadata;
use crate::rules::{BaselineRule, Check, Fix};

const ROUTE_LINE: &str = "authpriv.* /var/log/secure";

fn route_pattern() -> LinePattern {
    // Whitespace between selector and target is free-form in rsyslog.
    LinePattern::anchored(r"authpriv\.\*\s+/var/log/secure\s*$").expect("static pattern")
}

/// 0177: Authentication log routing
///
/// rsyslog must route authpriv messages to /var/log/secure. The routing
/// may live in the main conf or any rsyslog.d drop-in; remediation
/// appends to the main conf and restarts the daemon so the new routing
/// takes effect immediately.
pub fn rule() -> BaselineRule {
    BaselineRule::new(
        RuleMetadata {
            id: "0177".into(),
            title: "Authentication log routing".into(),
            description: "rsyslog routes authpriv.* messages to /var/log/secure".into(),
            requires_privilege: true,
            requires_reboot: false,
            reload_service: Some("rsyslog".into()),
        },
        vec![Check::AnyOf(vec![
            Check::FileContains {
                path: PathBuf::from("/etc/rsyslog.conf"),
                pattern: route_pattern(),
            },
            Check::DirContains {
                dir: PathBuf::from("/etc/rsyslog.d"),
                file_glob: "*.conf".into(),
                pattern: route_pattern(),
            },
        ])],
        vec![
            Fix::AppendLine {
                path: PathBuf::from("/etc/rsyslog.conf"),
                line: ROUTE_LINE.into(),
            },
            Fix::ReloadService {
                name: "rsyslog".into(),
            },
        ],
    )
}
