mod audit_faillock;
mod audit_immutable;
mod crontab_perms;
mod rsyslog_package;
mod rsyslog_routing;
mod selinux_enforcing;

use super::BaselineRule;

/// Returns all built-in baseline rules, in benchmark order.
pub fn all_rules() -> Vec<BaselineRule> {
    vec![
        audit_immutable::rule(),
        audit_faillock::rule(),
        rsyslog_package::rule(),
        rsyslog_routing::rule(),
        crontab_perms::rule(),
        selinux_enforcing::rule(),
    ]
}

/// Look up one rule by benchmark item id.
pub fn find(id: &str) -> Option<BaselineRule> {
    all_rules().into_iter().find(|r| r.metadata().id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_ids_are_unique() {
        let rules = all_rules();
        let ids: HashSet<_> = rules.iter().map(|r| r.metadata().id.clone()).collect();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn find_resolves_known_ids() {
        assert!(find("0173").is_some());
        assert!(find("9999").is_none());
    }

    #[test]
    fn every_rule_has_fixes() {
        for rule in all_rules() {
            assert!(!rule.fixes().is_empty(), "{} has no fixes", rule.metadata().id);
        }
    }
}
