use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_cpusched::executor::{replay, SimulatedClock, TraceExecutor, TraceLog, TraceRecord};
use u_cpusched::input::{parse_input, ScheduleInput};
use u_cpusched::policy::{self, Policy};
use u_cpusched::report::ScheduleReport;
use u_cpusched::workload::{self, WorkloadConfig};
use u_cpusched::SimConfig;

/// Single-core CPU scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "u-cpusched", version)]
#[command(about = "Computes job start/finish times under FIFO, RR, SJF or PSJF", long_about = None)]
struct Cli {
    /// Log filter directive, e.g. "debug" (RUST_LOG takes precedence)
    #[arg(long = "log-level", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Schedule a job batch and print start/finish times
    Simulate(SimulateArgs),
    /// Print a random dense job batch in the input format
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Input file (reads stdin when omitted)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file with simulation settings
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Round-Robin quantum (overrides the config file)
    #[arg(short = 'q', long = "quantum")]
    quantum: Option<i64>,

    /// Replay the schedule through a trace executor and print one line per job
    #[arg(long = "trace")]
    trace: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Policy token written at the top of the batch
    #[arg(short = 'p', long = "policy", default_value = "FIFO")]
    policy: Policy,

    /// Number of jobs
    #[arg(short = 'n', long = "jobs", default_value_t = 5)]
    jobs: usize,

    /// RNG seed (random when omitted)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Shortest execution time
    #[arg(long = "min-exec", default_value_t = 1)]
    min_exec: i64,

    /// Longest execution time
    #[arg(long = "max-exec", default_value_t = 10)]
    max_exec: i64,

    /// Largest gap between consecutive arrivals (clamped to --min-exec)
    #[arg(long = "max-gap", default_value_t = 1)]
    max_gap: i64,

    /// Latest ready time of the first job
    #[arg(long = "first-ready-max", default_value_t = 0)]
    first_ready_max: i64,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a ScheduleReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a [TraceRecord]>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Simulate(args) => simulate(&args),
        Command::Generate(args) => generate(&args),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level '{}'", level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn simulate(args: &SimulateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.quantum)?;
    let text = read_input(args.input.as_deref())?;

    let (selected, table) = parse_input(&text)?.into_table()?;
    info!(policy = %selected, jobs = table.len(), "input parsed");

    let schedule = policy::run(selected, &table, &config)?;
    let report = ScheduleReport::new(selected, &schedule);

    let trace = if args.trace {
        let mut executor = TraceExecutor::new(SimulatedClock::default(), TraceLog::default());
        let applied = replay(&table, &schedule, &mut executor)?;
        info!(events = applied, "schedule replayed");
        Some(executor.into_sink().records)
    } else {
        None
    };

    match args.format {
        OutputFormat::Text => {
            print!("{}", report.to_text());
            if let Some(records) = &trace {
                println!("trace:");
                for record in records {
                    println!("{record}");
                }
            }
        }
        OutputFormat::Json => {
            let output = JsonOutput {
                report: &report,
                trace: trace.as_deref(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, jobs = args.jobs, "generating workload");

    let config = WorkloadConfig::new(args.jobs)
        .with_exec_range(args.min_exec, args.max_exec)
        .with_max_gap(args.max_gap)
        .with_first_ready_max(args.first_ready_max);
    let mut rng = SmallRng::seed_from_u64(seed);

    let input = ScheduleInput {
        policy: args.policy,
        jobs: workload::generate(&mut rng, &config),
    };
    print!("{}", input.to_text());
    Ok(())
}

fn load_config(path: Option<&Path>, quantum: Option<i64>) -> Result<SimConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(quantum) = quantum {
        config = config.with_quantum(quantum);
    }
    config.validate()?;
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            Ok(text)
        }
    }
}
