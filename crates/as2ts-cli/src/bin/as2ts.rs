#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use as2ts_cli::args::{CliArgs, Command};
use as2ts_cli::config::{As2TsConfig, ResolvedConfig, load_config};
use as2ts_cli::driver::{BatchReport, Driver};
use as2ts_cli::fs::read_file;
use as2ts_cli::parser::CommandParser;
use as2ts_cli::reporter::Reporter;
use as2ts_normalizer::SyntaxNormalizer;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;

/// Looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "as2ts.json";

fn main() -> Result<()> {
    as2ts_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let color = !args.no_color && std::io::stdout().is_terminal();

    let report = match &args.command {
        Command::Normalize { file } => {
            let source = read_file(file)?;
            print!("{}", SyntaxNormalizer::new().normalize(&source));
            return Ok(());
        }
        Command::Translate(phase) => {
            build_driver(&args, true)?.translate(&phase.input, &phase.output)?
        }
        Command::Analyse(phase) => build_driver(&args, true)?.analyse(&phase.input, &phase.output)?.1,
        Command::Make(phase) => build_driver(&args, false)?.make(&phase.input, &phase.output)?,
    };

    std::process::exit(print_report(&report, color));
}

fn build_driver(args: &CliArgs, parses: bool) -> Result<Driver> {
    let config = resolve_config(args)?;
    let parser = if parses {
        Some(CommandParser::new(&config.parser_command)?)
    } else {
        None
    };
    let mut driver = Driver::new(config).with_parallel(args.parallel);
    if let Some(parser) = parser {
        driver = driver.with_parser(Box::new(parser));
    }
    Ok(driver)
}

fn resolve_config(args: &CliArgs) -> Result<ResolvedConfig> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None if std::path::Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            load_config(std::path::Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => As2TsConfig::default(),
    };
    config.resolve().context("invalid configuration")
}

fn print_report(report: &BatchReport, color: bool) -> i32 {
    let reporter = Reporter::new(color);
    if !report.diagnostics.is_empty() {
        println!("{}", reporter.render(&report.diagnostics));
        println!();
        println!("{}", reporter.summary(&report.diagnostics));
    }
    for (file, reason) in &report.failures {
        eprintln!("failed: {file}: {reason}");
    }
    if report.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_SUCCESS
    }
}
