//! Command line front end for the trace simulator.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use trace_simulator::generator::{TraceConfig, TraceGenerator};
use trace_simulator::input::{Trace, TraceReader};
use trace_simulator::logging::{self, LogLevel};
use trace_simulator::models::{Policy, SimulationConfig};
use trace_simulator::runner;
use trace_simulator::stats::SimulationStats;
use trace_simulator::SimulationError;

/// Replay request traces through the 2Q and optimal caches
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Log verbosity; RUST_LOG takes precedence
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

/// Where to read the trace from
#[derive(ClapArgs, Debug)]
struct TraceSource {
    /// Trace file; reads stdin when omitted
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Reprompt on malformed stdin input instead of exiting
    #[arg(long, conflicts_with = "input")]
    interactive: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace through the 2Q cache and print the hit count
    TwoQ {
        #[command(flatten)]
        source: TraceSource,
    },

    /// Replay a trace through the optimal cache and print the hit count
    Optimal {
        #[command(flatten)]
        source: TraceSource,
    },

    /// Replay a trace through both caches and print a comparison
    Compare {
        #[command(flatten)]
        source: TraceSource,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Run the built-in reference scenarios
    Scenarios,

    /// Generate a synthetic trace file
    Generate {
        /// Output file
        #[arg(short, long, default_value = "trace.txt")]
        output: PathBuf,

        /// Cache capacity written into the trace header
        #[arg(short, long, default_value = "100")]
        capacity: usize,

        /// Number of requests
        #[arg(long, default_value = "10000")]
        length: usize,

        /// Number of distinct regular keys
        #[arg(long, default_value = "1000")]
        unique_keys: u32,

        /// Percentage of keys that are hot (default: 20%)
        #[arg(long, default_value = "20")]
        hot_keys: u8,

        /// Percentage of traffic that goes to hot keys (default: 80%)
        #[arg(long, default_value = "80")]
        hot_traffic: u8,

        /// Insert a one-off scan after this many regular requests (0 = never)
        #[arg(long, default_value = "0")]
        scan_every: usize,

        /// RNG seed for a reproducible trace
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log_level);

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, SimulationError> {
    match command {
        Commands::TwoQ { source } => {
            let trace = load_trace(&source)?;
            let report = runner::run_two_q(&trace)?;
            println!("{}", report.hits);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Optimal { source } => {
            let trace = load_trace(&source)?;
            let report = runner::run_optimal(&trace)?;
            println!("{}", report.hits);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Compare { source, output_csv } => {
            let config = SimulationConfig {
                input: source.input,
                interactive: source.interactive,
                policies: Policy::all(),
                output_csv,
            };
            run_comparison(&config)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Scenarios => run_scenarios(),

        Commands::Generate {
            output,
            capacity,
            length,
            unique_keys,
            hot_keys,
            hot_traffic,
            scan_every,
            seed,
        } => {
            let config = TraceConfig {
                capacity,
                length,
                unique_keys,
                hot_keys_percent: hot_keys,
                hot_traffic_percent: hot_traffic,
                scan_every,
                seed,
            };
            let trace = TraceGenerator::new(config).write(&output)?;
            eprintln!(
                "Wrote {} requests ({} unique keys) to {}",
                trace.len(),
                trace.unique_keys(),
                output.display()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_trace(source: &TraceSource) -> Result<Trace, SimulationError> {
    let trace = match &source.input {
        Some(path) => TraceReader::read_file(path)?,
        None if source.interactive => {
            TraceReader::read_interactive(io::stdin().lock(), io::stdout())?
        }
        None => TraceReader::read(io::stdin().lock())?,
    };
    tracing::info!(
        capacity = trace.capacity,
        requests = trace.len(),
        "loaded trace"
    );
    Ok(trace)
}

fn run_comparison(config: &SimulationConfig) -> Result<(), SimulationError> {
    let source = TraceSource {
        input: config.input.clone(),
        interactive: config.interactive,
    };
    let trace = load_trace(&source)?;
    let result = runner::compare(&trace, &config.policies)?;

    let stats = SimulationStats::new(&result);
    stats.print_summary();

    if let Some(csv_path) = &config.output_csv {
        stats.export_csv(csv_path)?;
        println!("\nResults exported to: {}", csv_path.display());
    }
    Ok(())
}

fn run_scenarios() -> Result<ExitCode, SimulationError> {
    let outcomes = runner::run_scenarios()?;
    let mut failed = 0;

    for outcome in &outcomes {
        if outcome.passed() {
            println!(
                "Scenario {} [{}] passed: got {} hits",
                outcome.number, outcome.policy, outcome.actual
            );
        } else {
            failed += 1;
            println!(
                "Scenario {} [{}] FAILED: expected {} hits, got {}",
                outcome.number, outcome.policy, outcome.expected, outcome.actual
            );
        }
    }

    println!("\n{} of {} checks passed", outcomes.len() - failed, outcomes.len());
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
