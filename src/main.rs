// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `algotrace`: run the built-in fixtures or a JSON problem instance.

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use algo_trace::harness::{fixtures, Instance};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{error, LevelFilter};

/// Step-trace algorithm engine
#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Log every decision (overrides RUST_LOG)
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the literal fixtures and report mismatches
    Check {
        /// Only run fixtures whose name or family contains this text
        #[clap(long, short)]
        filter: Option<String>,
    },
    /// Run one JSON instance and print the result with its trace
    Run {
        /// Path to the instance file
        file: String,

        /// Pretty-print the JSON output
        #[clap(long, short)]
        pretty: bool,
    },
    /// List the fixtures
    List,
}

fn init_logger(verbose: bool) {
    let mut builder = Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Trace);
    }
    builder
        .format(|buf, record| writeln!(buf, "{} {}: {}", record.level(), record.target(), record.args()))
        .init();
}

fn check(filter: Option<&str>) -> ExitCode {
    let report = fixtures::suite().run(filter);
    println!("Passed {} from {} fixtures", report.passed.len(), report.total());
    if report.success() {
        return ExitCode::SUCCESS;
    }
    println!("Failed fixtures:");
    for (name, reason) in &report.failed {
        println!("- {}: {}", name, reason);
    }
    ExitCode::FAILURE
}

fn run(file: &str, pretty: bool) -> ExitCode {
    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            error!("cannot read {}: {}", file, e);
            return ExitCode::FAILURE;
        }
    };
    let output = Instance::from_json(&text).and_then(|instance| instance.run());
    let value = match output {
        Ok(value) => value,
        Err(e) => {
            error!("{}: {}", file, e);
            return ExitCode::FAILURE;
        }
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    match rendered {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("cannot render result: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match args.command {
        Command::Check { filter } => check(filter.as_deref()),
        Command::Run { file, pretty } => run(&file, pretty),
        Command::List => {
            for fixture in fixtures::suite().checks() {
                println!("{:<14} {}", fixture.family, fixture.name);
            }
            ExitCode::SUCCESS
        }
    }
}
