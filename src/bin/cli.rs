use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hardenctl::engine::RunMode;
use hardenctl::rules::builtin;
use hardenctl::RunOptions;

#[derive(Parser)]
#[command(
    name = "hardenctl",
    about = "Check-and-remediate tool for Linux hardening baseline rules",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one baseline rule and optionally remediate it
    Check {
        /// Benchmark item id (see list-rules)
        rule_id: String,

        /// Remediate without asking (automated sweeps)
        #[arg(long, conflicts_with = "report_only")]
        yes: bool,

        /// Report compliance only; never prompt or remediate
        #[arg(long)]
        report_only: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Filesystem root to audit (e.g. a mounted image)
        #[arg(long, short = 'r')]
        root: Option<PathBuf>,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// List all baseline rules
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("HARDENCTL_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            rule_id,
            yes,
            report_only,
            no_color,
            root,
            config,
        } => cmd_check(rule_id, yes, report_only, no_color, root, config),
        Commands::ListRules { format } => cmd_list_rules(format),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_check(
    rule_id: String,
    yes: bool,
    report_only: bool,
    no_color: bool,
    root: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<i32, hardenctl::error::HardenError> {
    if let Some(root) = &root {
        hardenctl::validate_root(root)?;
    }

    let mode = if yes {
        Some(RunMode::AssumeYes)
    } else if report_only {
        Some(RunMode::ReportOnly)
    } else {
        None
    };

    let options = RunOptions {
        config_path: config,
        root,
        mode,
        color: no_color.then_some(false),
    };

    let outcome = hardenctl::run_rule(&rule_id, &options)?;
    Ok(outcome.exit_code())
}

fn cmd_list_rules(format_str: String) -> Result<i32, hardenctl::error::HardenError> {
    let rules = builtin::all_rules();

    match format_str.as_str() {
        "json" => {
            let metadata: Vec<_> = rules.iter().map(|r| r.metadata().clone()).collect();
            let json = serde_json::to_string_pretty(&metadata)?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{:<8} {:<36} {:<6} {:<8} RELOADS",
                "ID", "TITLE", "ROOT", "REBOOT"
            );
            println!("{}", "-".repeat(72));
            for rule in &rules {
                let meta = rule.metadata();
                println!(
                    "{:<8} {:<36} {:<6} {:<8} {}",
                    meta.id,
                    meta.title,
                    if meta.requires_privilege { "yes" } else { "no" },
                    if meta.requires_reboot { "yes" } else { "no" },
                    meta.reload_service.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    Ok(0)
}
