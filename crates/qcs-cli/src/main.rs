//! `qcs-sweep`: run parametric sweeps and query Rigetti QCS.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::sweep::{ExecutorKind, OutputFormat, SweepArgs};
use commands::{isa, processors, sweep};

/// Sample circuits over parameter sweeps on Rigetti QCS and local QVMs
#[derive(Parser)]
#[command(name = "qcs-sweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the exponent of X**t and measure under key "m"
    Sweep {
        /// Quantum computer name (9q-square, <N>q-qvm)
        #[arg(long, default_value = "9q-square", env = "QCS_QUANTUM_COMPUTER")]
        qc: String,

        /// Repetitions per sweep point
        #[arg(short, long, default_value = "10")]
        repetitions: u32,

        /// QVM random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Sweep executor
        #[arg(short, long, value_enum, default_value = "default")]
        executor: ExecutorKind,

        /// First exponent
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        start: f64,

        /// Last exponent
        #[arg(long, default_value = "2.0", allow_negative_numbers = true)]
        stop: f64,

        /// Number of sweep points
        #[arg(long, default_value = "5")]
        points: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List the quantum processors available through QCS
    Processors,

    /// Show the instruction set architecture of a processor
    Isa {
        /// Quantum processor id, e.g. Ankaa-3
        quantum_processor_id: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Sweep {
            qc,
            repetitions,
            seed,
            executor,
            start,
            stop,
            points,
            format,
        } => sweep::execute(&SweepArgs {
            qc,
            repetitions,
            seed,
            executor,
            start,
            stop,
            points,
            format,
        }),

        Commands::Processors => processors::execute().await,

        Commands::Isa {
            quantum_processor_id,
            json,
        } => isa::execute(&quantum_processor_id, json).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
