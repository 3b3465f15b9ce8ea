//! NAVBENCH CLI
//!
//! Benchmarks broadcast-authentication schemes over a recorded
//! navigation-message scenario, optionally perturbing the channel with
//! simulated attacks, and writes one CSV row per processed message.

mod scenario;
mod sink;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use navbench_core::{AttackChain, BenchError, BitFlip, Registry, Replay, RunConfig, Runner};
use std::path::PathBuf;

/// Default per-byte corruption probability for the bitflip attack.
const DEFAULT_FLIP_RATE: f64 = 0.0005;

/// Default substitution probability for the replay attack.
const DEFAULT_REPLAY_PROB: f64 = 0.001;

/// NAVBENCH - broadcast-authentication benchmark harness
#[derive(Parser)]
#[command(name = "navbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Protocol scheme name (ecdsa, ed25519, pqc, ...)
    #[arg(short, long)]
    protocol: String,

    /// Path to the scenario file (one hex-encoded page per line)
    #[arg(short, long)]
    scenario: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "bench.csv")]
    out: PathBuf,

    /// Maximum number of processed records
    #[arg(long, default_value_t = 1000)]
    max: usize,

    /// Channel attack to apply before verification
    #[arg(long, value_enum, default_value = "none")]
    attack: AttackKind,

    /// Per-byte corruption probability for --attack bitflip/both
    #[arg(long, default_value_t = DEFAULT_FLIP_RATE)]
    flip_rate: f64,

    /// Substitution probability for --attack replay/both
    #[arg(long, default_value_t = DEFAULT_REPLAY_PROB)]
    replay_prob: f64,

    /// Fixed RNG seed for reproducible attack sequences
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AttackKind {
    /// Pass the channel through unmodified
    None,
    /// Probabilistic single-bit corruption per byte
    Bitflip,
    /// Probabilistic substitution with a previously seen message
    Replay,
    /// Bitflip followed by replay
    Both,
}

fn build_chain(cli: &Cli) -> AttackChain {
    let mut chain = AttackChain::new();
    if matches!(cli.attack, AttackKind::Bitflip | AttackKind::Both) {
        chain.push(Box::new(match cli.seed {
            Some(seed) => BitFlip::with_seed(cli.flip_rate, seed),
            None => BitFlip::new(cli.flip_rate),
        }));
    }
    if matches!(cli.attack, AttackKind::Replay | AttackKind::Both) {
        chain.push(Box::new(match cli.seed {
            // Offset so both stages never share an RNG stream.
            Some(seed) => Replay::with_seed(cli.replay_prob, seed.wrapping_add(1)),
            None => Replay::new(cli.replay_prob),
        }));
    }
    chain
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let mut registry = Registry::new();
    navbench_crypto::register_builtin(&mut registry);

    let records = scenario::read_scenario(&cli.scenario)
        .with_context(|| format!("cannot read scenario {}", cli.scenario.display()))?;
    tracing::info!(records = records.len(), scenario = %cli.scenario.display(),
        "scenario loaded");

    let mut sink = sink::CsvSink::create(&cli.out)
        .with_context(|| format!("cannot create output {}", cli.out.display()))?;
    let mut chain = build_chain(&cli);

    let config = RunConfig {
        scheme: cli.protocol.clone(),
        max_iter: cli.max,
    };
    let report = match Runner::new(&registry).run(&config, records, &mut chain, &mut sink) {
        Ok(report) => report,
        Err(BenchError::UnknownProtocol(name)) => anyhow::bail!(
            "unknown protocol {:?}; registered schemes: {}",
            name,
            registry.names().join(", ")
        ),
        Err(err) => return Err(err).context("benchmark run failed"),
    };
    sink.finish().context("flushing output CSV")?;

    if report.degraded {
        tracing::warn!(
            reason = report.degraded_reason.as_deref().unwrap_or("unknown"),
            "run degraded: no usable keypair, all verification results are 0"
        );
    }
    println!(
        "Bench completed: scheme={} key_id={} iterations={} verified={} \
         sign_failures={} conversion_fallbacks={} degraded={}",
        report.scheme,
        report.key_id,
        report.iterations,
        report.verified_count,
        report.sign_failures,
        report.conversion_fallbacks,
        report.degraded,
    );
    println!("CSV -> {}", cli.out.display());
    Ok(())
}
