//! Colored terminal rendering of engine output.

use super::OutputSink;
use crate::engine::ExitOutcome;
use crate::rules::report::{RuleMetadata, StatusReport};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[1;33m";
const CYAN: &str = "\x1b[1;36m";

pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl OutputSink for ConsoleSink {
    fn banner(&mut self, meta: &RuleMetadata) {
        println!();
        println!(
            "{} {}",
            self.paint(BOLD, &format!("[{}]", meta.id)),
            self.paint(BOLD, &meta.title)
        );
        println!("  {}", meta.description);
    }

    fn section(&mut self, title: &str) {
        println!();
        println!("{}", self.paint(CYAN, &format!("-- {title}")));
    }

    fn report(&mut self, report: &StatusReport) {
        for result in &report.results {
            let tag = if result.pass {
                self.paint(GREEN, "[ OK ]")
            } else {
                self.paint(RED, "[FAIL]")
            };
            println!("  {tag} {}", result.description);
            for finding in &result.findings {
                let location = match finding.line_number {
                    Some(n) => format!("{}:{n}", finding.location.display()),
                    None => finding.location.display().to_string(),
                };
                println!("         found at {location}: {}", finding.matched_text);
            }
        }
    }

    fn verdict(&mut self, compliant: bool) {
        let line = if compliant {
            self.paint(GREEN, "COMPLIANT")
        } else {
            self.paint(RED, "NON-COMPLIANT")
        };
        println!("  => {line}");
    }

    fn remediation_step(&mut self, description: &str, ok: bool) {
        let tag = if ok {
            self.paint(GREEN, "[done]")
        } else {
            self.paint(RED, "[fail]")
        };
        println!("  {tag} {description}");
    }

    fn note(&mut self, message: &str) {
        println!("  {}", self.paint(YELLOW, message));
    }

    fn error(&mut self, message: &str) {
        eprintln!("  {} {message}", self.paint(RED, "error:"));
    }

    fn outcome(&mut self, outcome: ExitOutcome) {
        let line = match outcome {
            ExitOutcome::Success => self.paint(GREEN, "Remediation applied and verified."),
            ExitOutcome::Skipped => self.paint(YELLOW, "No changes made."),
            ExitOutcome::Canceled => self.paint(YELLOW, "Canceled; no changes made."),
            ExitOutcome::Failed => self.paint(RED, "Remediation failed; system re-checked."),
        };
        println!();
        println!("{line}");
    }
}
