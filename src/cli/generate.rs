//! `generate`: write, preview or check the generated modules.

use clap::Args;
use std::path::PathBuf;

use crate::api_generator::{GenerateReport, Mode, apply_plan, plan_types};
use crate::cli::run_command;
use crate::config::GeneratorConfig;

/// Arguments for `oas-typegen generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// OpenAPI document to read (.json, .yaml or .yml)
    #[arg(long, value_name = "FILE")]
    pub spec: PathBuf,
    /// Output directory (default: [output] dir from the config)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
    /// Configuration file (default: ./typegen.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Fail if the generated files are not up to date; write nothing
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,
    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else if self.dry_run {
            Mode::DryRun
        } else {
            Mode::Write
        }
    }
}

/// Plan the output for `--spec` and apply it in the selected mode.
pub fn run(args: GenerateArgs) -> i32 {
    run_command(|| {
        let config = GeneratorConfig::load(args.config.as_deref())?;
        let out_dir = args.out.clone().unwrap_or_else(|| config.output.dir.clone());
        let mode = args.mode();

        let changes = plan_types(&args.spec, &out_dir, &config)?;
        if mode == Mode::Check {
            for diff in changes.iter().filter_map(|c| c.generate_diff()) {
                eprintln!("{diff}");
            }
        }

        let report = apply_plan(changes, &out_dir, mode)?;
        print_report(&report);
        Ok(())
    })
}

fn print_report(report: &GenerateReport) {
    match report.mode {
        Mode::Write => {
            if report.written.is_empty() {
                println!("Up to date ({})", report.out_dir.display());
            } else {
                for change in report.pending() {
                    println!("{:>9}  {}", change.status(), change.rel_path);
                }
                println!(
                    "Wrote {} file(s) to {}",
                    report.written.len(),
                    report.out_dir.display()
                );
            }
        }
        Mode::DryRun => {
            for change in &report.changes {
                println!("{:>9}  {}", change.status(), change.rel_path);
            }
            println!(
                "Dry run: {} file(s) would be written",
                report.pending().count()
            );
        }
        Mode::Check => println!("Generated files are up to date"),
    }
}
