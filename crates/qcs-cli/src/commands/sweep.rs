//! Sweep command implementation.
//!
//! Samples `X**t` on one qubit, measured under key `m`, for evenly spaced
//! exponents.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use clap::ValueEnum;
use console::style;
use serde::Serialize;
use tracing::info;

use qcs_adapter_qvm::{Qvm, get_qc, qvm_computer};
use qcs_circuit::{Circuit, ParamResolver, Qubit, StudyResult, Sweep, Sweepable};
use qcs_hal::QuantumComputer;
use qcs_sampler::{
    RigettiQcsSampler, Sampler, WithQuilcCompilationAndParameterResolution,
    WithQuilcParametricCompilation, WithoutQuilcCompilation,
};

use super::common::bar;

const SYMBOL: &str = "t";
const KEY: &str = "m";

/// Which sweep executor to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExecutorKind {
    /// Resolve and compile every point
    Default,
    /// Compile once, bind parameters through memory
    Parametric,
    /// Skip native compilation
    NoQuilc,
}

/// How to print results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Options of one sweep run.
#[derive(Debug, Clone)]
pub struct SweepArgs {
    pub qc: String,
    pub repetitions: u32,
    pub seed: Option<u64>,
    pub executor: ExecutorKind,
    pub start: f64,
    pub stop: f64,
    pub points: usize,
    pub format: OutputFormat,
}

/// One sweep point as printed in JSON mode.
#[derive(Debug, Serialize)]
struct PointReport<'a> {
    params: &'a ParamResolver,
    repetitions: usize,
    histogram: BTreeMap<u64, usize>,
}

/// Execute the sweep command.
pub fn execute(args: &SweepArgs) -> Result<()> {
    let qc = quantum_computer(&args.qc, args.seed)?;
    info!(qc = %qc.name(), executor = ?args.executor, "Starting sweep");

    if args.format == OutputFormat::Table {
        println!(
            "{} Sweeping {} from {} to {} ({} points, {} repetitions) on {}",
            style("→").cyan().bold(),
            style(format!("X**{SYMBOL}")).green(),
            args.start,
            args.stop,
            args.points,
            args.repetitions,
            style(qc.name()).yellow()
        );
    }

    let results = run(&qc, args)?;

    match args.format {
        OutputFormat::Json => println!("{}", render_json(&results)?),
        OutputFormat::Table => print!("{}", render_table(&results)),
    }
    Ok(())
}

fn quantum_computer(name: &str, seed: Option<u64>) -> Result<QuantumComputer> {
    let qc = match seed {
        Some(seed) => qvm_computer(name, Arc::new(Qvm::new().with_random_seed(seed)))?,
        None => get_qc(name, true)?,
    };
    Ok(qc)
}

fn run(qc: &QuantumComputer, args: &SweepArgs) -> Result<Vec<StudyResult>> {
    let circuit = Circuit::parametric_flip(Qubit::grid(1, 1), SYMBOL, KEY)?;
    let sweep: Sweepable = Sweep::linspace(SYMBOL, args.start, args.stop, args.points).into();

    let sampler = RigettiQcsSampler::new(qc);
    let sampler = match args.executor {
        ExecutorKind::Default => sampler.with_executor(WithQuilcCompilationAndParameterResolution),
        ExecutorKind::Parametric => sampler.with_executor(WithQuilcParametricCompilation),
        ExecutorKind::NoQuilc => sampler.with_executor(WithoutQuilcCompilation),
    };
    Ok(sampler.run_sweep(&circuit, &sweep, args.repetitions)?)
}

fn render_json(results: &[StudyResult]) -> Result<String> {
    let reports = results
        .iter()
        .map(|result| {
            Ok(PointReport {
                params: result.params(),
                repetitions: result.repetitions(),
                histogram: result.histogram(KEY)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_string_pretty(&reports)?)
}

fn render_table(results: &[StudyResult]) -> String {
    let mut out = format!(
        "\n{} {} points:\n",
        style("✓").green().bold(),
        results.len()
    );
    for result in results {
        let t = result.params().get(SYMBOL).unwrap_or(f64::NAN);
        let total = result.repetitions().max(1) as f64;
        let ones = result
            .histogram(KEY)
            .ok()
            .and_then(|h| h.get(&1).copied())
            .unwrap_or(0);
        let fraction = ones as f64 / total;
        out.push_str(&format!(
            "  {}={:>6.3}: {:>4}/{:<4} {}\n",
            SYMBOL,
            t,
            ones,
            result.repetitions(),
            style(bar(fraction, 20)).green()
        ));
    }
    out
}
