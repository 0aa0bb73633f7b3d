//! 场景仿真
//!
//! 加载 scenario.json，运行到 max_time，打印摘要并可选导出执行日志。

use clap::Parser;
use desim_rs::scenario::{ScenarioSpec, run_scenario};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "run_scenario", about = "Run a scenario.json on the event scheduler")]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Override the scenario's max_time
    #[arg(long)]
    max_time: Option<u64>,

    /// Write logged events as a JSON array
    #[arg(long)]
    log_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let spec = match ScenarioSpec::load(&args.scenario) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = match run_scenario(&spec, args.max_time) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "done @ t={}, executed={}, logged={}, pending={}",
        report.final_time,
        report.executed,
        report.logged.len(),
        report.pending
    );

    if let Some(path) = args.log_json {
        let json = match serde_json::to_string_pretty(&report.logged) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("error: serialize log: {e}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(e) = fs::write(&path, json) {
            eprintln!("error: write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("wrote {} logged events to {}", report.logged.len(), path.display());
    }

    ExitCode::SUCCESS
}
