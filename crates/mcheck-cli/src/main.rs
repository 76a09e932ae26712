//! Command-line driver for the mcheck verification engine.

use clap::Parser;
use mcheck_core::{run_model, ModelName, ModelReport, PolicyDefinition, Summary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Driver-level error: everything that stops a run before exploration.
#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read policy file: {0}")]
    Io(String),

    #[error("invalid policy definition: {0}")]
    PolicyDefinition(String),
}

#[derive(Parser)]
#[command(name = "mcheck", version)]
#[command(about = "Bounded invariant checker for the store, protocol, replay, determinism and policy models", long_about = None)]
struct Cli {
    /// Models to check (repeatable), or "all"
    #[arg(short, long, value_name = "MODEL", default_value = "all")]
    model: Vec<String>,

    /// Exploration bound: BFS/DFS depth or trial count, per model
    #[arg(short, long, default_value = "30")]
    bound: usize,

    /// JSON file with policy definitions for the policy-compiler model
    #[arg(long, value_name = "FILE")]
    policy_file: Option<PathBuf>,

    /// Seed for the sampling models (omit for a non-reproducible run)
    #[arg(long)]
    seed: Option<u64>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let models = match select_models(&cli.model) {
        Ok(models) => models,
        Err(message) => {
            eprintln!("Error: {message}");
            std::process::exit(2);
        }
    };

    // Malformed external definitions fail the run before any exploration;
    // the built-in default is only used when no file was given at all.
    let policy = match load_policy(cli.policy_file.as_deref()) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => {
            info!(seed, "seeded run");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    println!("=== mcheck (bounded invariant checker) ===");

    let mut summary = Summary::default();
    for name in &models {
        // A failing model never aborts the remaining ones.
        match run_model(*name, cli.bound, &mut rng, policy.as_ref()) {
            Ok(report) => {
                print_report(&report, cli.bound, cli.verbose);
                summary.push(report);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        }
    }

    println!();
    for report in &summary.reports {
        let status = if report.passed { "PASS" } else { "FAIL" };
        println!("  [{}]: {}", report.model, status);
    }
    println!();

    if summary.all_passed() {
        println!("=== mcheck PASSED ===");
    } else {
        println!("=== mcheck FAILED ===");
        std::process::exit(1);
    }
}

/// Resolve the requested model names, deduplicating while keeping order.
fn select_models(requested: &[String]) -> Result<Vec<ModelName>, String> {
    if requested.iter().any(|m| m == "all") {
        return Ok(ModelName::ALL.to_vec());
    }

    let mut models = Vec::new();
    for name in requested {
        let model: ModelName = name.parse().map_err(|e| format!("{e}"))?;
        if !models.contains(&model) {
            models.push(model);
        }
    }
    Ok(models)
}

/// Load and shape-check an external policy definition, if one was given.
fn load_policy(path: Option<&std::path::Path>) -> Result<Option<PolicyDefinition>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let source = fs::read_to_string(path).map_err(|e| CliError::Io(e.to_string()))?;
    let definition: PolicyDefinition =
        serde_json::from_str(&source).map_err(|e| CliError::PolicyDefinition(e.to_string()))?;
    definition
        .validate()
        .map_err(|e| CliError::PolicyDefinition(e.to_string()))?;

    info!(path = %path.display(), "loaded policy definitions");
    Ok(Some(definition))
}

fn print_report(report: &ModelReport, bound: usize, verbose: bool) {
    if report.passed {
        if verbose {
            println!(
                "  PASS [{}] {} explored (bound={}), all invariants hold",
                report.model, report.explored, bound
            );
        } else {
            println!("  PASS [{}] {} explored", report.model, report.explored);
        }
    } else {
        for violation in &report.violations {
            println!("  FAIL [{}] {}", report.model, violation);
        }
    }
}
