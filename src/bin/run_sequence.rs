//! Headless Sequence Runner
//!
//! Plays a fixed action sequence against a fresh subject, or searches for a
//! high-liking sequence with the genetic optimizer, and prints a report.

use affect_sim::core::config::SimulationConfig;
use affect_sim::core::error::{Result, SimError};
use affect_sim::entity::traits::Traits;
use affect_sim::simulation::engine::Session;
use affect_sim::simulation::optimizer::{OptimizerConfig, SequenceOptimizer};
use affect_sim::simulation::runner::{run_sequence_from, RunReport};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Headless Sequence Runner - score or optimize action sequences
#[derive(Parser, Debug)]
#[command(name = "run_sequence")]
#[command(about = "Run an action sequence against a fresh subject and report accumulated liking")]
struct Args {
    /// Comma-separated action names, e.g. "rest,snack,cuddle"
    #[arg(long)]
    actions: Option<String>,

    /// TOML file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated hours after which the run stops
    #[arg(long, default_value_t = 24.0)]
    max_hours: f32,

    /// Subject testosterone, 0-100 (50 is the mean)
    #[arg(long, default_value_t = 50.0)]
    testosterone: f32,

    /// Subject SSRI dose, 0-100
    #[arg(long, default_value_t = 0.0)]
    ssri: f32,

    /// Subject chronic life stress, 0-100
    #[arg(long, default_value_t = 0.0)]
    life_stress: f32,

    /// Search for a sequence instead of running one
    #[arg(long)]
    optimize: bool,

    /// Random seed for the optimizer
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optimizer generations
    #[arg(long, default_value_t = 80)]
    generations: usize,

    /// Optimizer population size
    #[arg(long, default_value_t = 60)]
    population: usize,

    /// Actions per optimized sequence
    #[arg(long, default_value_t = 24)]
    length: usize,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every transition to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct Output<'a> {
    mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generations_run: Option<usize>,
    sequence: Vec<&'static str>,
    report: &'a RunReport,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "affect_sim=debug"
    } else {
        "affect_sim=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let simulation = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let traits = Traits {
        testosterone: args.testosterone,
        ssri: args.ssri,
        life_stress: args.life_stress,
    };

    let (report, output_meta) = if args.optimize {
        let config = OptimizerConfig {
            population: args.population,
            generations: args.generations,
            sequence_length: args.length,
            max_hours: args.max_hours,
            seed: args.seed,
            ..OptimizerConfig::default()
        };
        let result = SequenceOptimizer::new(config, simulation)?
            .with_traits(traits)?
            .run();
        (result.report, Some(result.generations_run))
    } else {
        let Some(actions) = &args.actions else {
            return Err(SimError::Validation(
                "pass --actions <a,b,c> or --optimize".into(),
            ));
        };
        let names: Vec<&str> = actions
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let session = Session::with_traits(traits, simulation)?;
        (run_sequence_from(session, &names, args.max_hours), None)
    };

    let sequence: Vec<&'static str> = report.steps.iter().map(|s| s.action.name()).collect();

    match args.format.as_str() {
        "text" => print_text(&report, &sequence),
        "json" => {
            let output = Output {
                mode: if args.optimize { "optimize" } else { "run" },
                seed: args.optimize.then_some(args.seed),
                generations_run: output_meta,
                sequence,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        other => {
            return Err(SimError::Validation(format!(
                "unknown format '{}' (expected json or text)",
                other
            )))
        }
    }

    Ok(())
}

fn print_text(report: &RunReport, sequence: &[&str]) {
    println!("=== SEQUENCE RUN ===");
    println!("Sequence: {}", sequence.join(", "));
    println!();
    for step in &report.steps {
        println!(
            "  {:>6.2}h  {:<22} liking {:>5.1}  anxiety {:>5.1}  energy {:>5.1}",
            step.clock_hours,
            step.action.name(),
            step.liking_score,
            step.anxiety,
            step.energy
        );
    }
    for skipped in &report.skipped {
        println!("  skipped #{}: {}", skipped.index, skipped.message);
    }
    println!();
    println!("Hours: {:.2}", report.hours);
    println!("Total liking: {:.1}", report.total_liking);
    println!("Average liking: {:.1}", report.average_liking);
    println!("Wanting: {:.1}", report.final_state.wanting);
    println!("Viable: {}", report.viable);
    if let Some(reason) = report.stopped {
        println!("Stopped early: {:?}", reason);
    }
}
