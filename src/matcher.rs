//! Line-oriented pattern matching over configuration file text.
//!
//! Replaces shelling out to grep: patterns are matched natively against
//! each logical line, with blank lines and `#` comments skipped, so the
//! same matcher works on audit rules, rsyslog conf, and key=value files.

use regex::Regex;

use crate::error::Result;

/// A pattern matched against one configuration line.
#[derive(Debug, Clone)]
pub enum LinePattern {
    /// Trimmed line must equal this string exactly.
    Exact(String),
    /// Regex anchored at the start of the trimmed line.
    Anchored(Regex),
}

impl LinePattern {
    pub fn exact(line: impl Into<String>) -> Self {
        Self::Exact(line.into())
    }

    /// Build an anchored pattern. The `^` anchor is added if absent.
    pub fn anchored(pattern: &str) -> Result<Self> {
        let source = if pattern.starts_with('^') {
            pattern.to_string()
        } else {
            format!("^{pattern}")
        };
        Ok(Self::Anchored(Regex::new(&source)?))
    }

    /// Match a single already-trimmed line. Comment and blank handling
    /// happens in [`scan`], not here.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Exact(expected) => line == expected,
            Self::Anchored(re) => re.is_match(line),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Exact(line) => format!("line `{line}`"),
            Self::Anchored(re) => format!("line matching `{}`", re.as_str()),
        }
    }
}

/// One matched line, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub number: usize,
    pub text: String,
}

/// Scan text for a pattern, skipping blank lines and `#` comments.
pub fn scan(text: &str, pattern: &LinePattern) -> Vec<LineMatch> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            pattern.matches(line).then(|| LineMatch {
                number: idx + 1,
                text: line.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_matches_trimmed_line() {
        let pattern = LinePattern::exact("-w /var/log/faillock -p wa -k logins");
        let text = "  -w /var/log/faillock -p wa -k logins  \n-w /etc/passwd -p wa\n";
        let matches = scan(text, &pattern);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].number, 1);
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        let pattern = LinePattern::exact("-e 2");
        let text = "# -e 2\n\n   # also a comment\n-e 2\n";
        let matches = scan(text, &pattern);
        assert_eq!(matches, vec![LineMatch { number: 4, text: "-e 2".into() }]);
    }

    #[test]
    fn anchored_gets_caret_prepended() {
        let pattern = LinePattern::anchored(r"authpriv\.\*\s+/var/log/secure").unwrap();
        assert!(pattern.matches("authpriv.* /var/log/secure"));
        assert!(!pattern.matches("xauthpriv.* /var/log/secure"));
    }

    #[test]
    fn anchored_respects_existing_caret() {
        let pattern = LinePattern::anchored(r"^SELINUX\s*=\s*enforcing").unwrap();
        assert!(pattern.matches("SELINUX=enforcing"));
        assert!(pattern.matches("SELINUX = enforcing"));
        assert!(!pattern.matches("XSELINUX=enforcing"));
    }

    #[test]
    fn no_match_in_empty_text() {
        let pattern = LinePattern::exact("-e 2");
        assert!(scan("", &pattern).is_empty());
    }
}
