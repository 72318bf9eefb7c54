//! erlang-loss - compare Erlang-B blocking probabilities with simulated loss systems
//!
//! Provides commands for:
//! - Server counts needed for target blocking levels (exact)
//! - Simulation of given server counts against the Erlang-B prediction
//! - Server counts needed by simulation for a chosen service-time distribution
//!
//! Binary: erlang-loss, built with the `cli` feature

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use erlang_loss::erlang::{erlang_b, find_servers};
use erlang_loss::loss::LossConfig;
use erlang_loss::service::{Deterministic, Erlang, Exponential, ServiceTime};
use erlang_loss::trials::{find_servers_by_simulation, run_trials, TrialPlan};

/// Erlang-B calculator and loss-system simulator
#[derive(Parser)]
#[command(name = "erlang-loss", version)]
#[command(about = "Blocking probabilities of loss systems, exact and simulated", long_about = None)]
struct Cli {
    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Servers needed for each target blocking probability
    Servers {
        /// Offered load in Erlangs
        #[arg(long, default_value_t = 10.0)]
        load: f64,

        /// Target blocking probabilities
        #[arg(long, value_delimiter = ',', default_values_t = [0.1, 0.01, 0.001])]
        targets: Vec<f64>,
    },

    /// Simulate fixed server counts and compare with Erlang-B
    Verify {
        #[command(flatten)]
        system: SystemArgs,

        /// Server counts to simulate
        #[arg(long, value_delimiter = ',', default_values_t = [13, 18, 21])]
        servers: Vec<u32>,

        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Servers needed by simulation, starting from the Erlang-B answer
    Compare {
        #[command(flatten)]
        system: SystemArgs,

        /// Target blocking probability
        #[arg(long, default_value_t = 0.01)]
        target: f64,

        #[command(flatten)]
        plan: PlanArgs,
    },
}

#[derive(Args)]
struct SystemArgs {
    /// Arrivals per unit time
    #[arg(long, default_value_t = 10.0)]
    arrival_rate: f64,

    /// Mean service time
    #[arg(long, default_value_t = 1.0)]
    mean_service: f64,

    /// Service-time distribution
    #[arg(long, value_enum, default_value_t = ServiceModel::Exponential)]
    service: ServiceModel,
}

#[derive(Args)]
struct PlanArgs {
    /// Independent runs per server count
    #[arg(long, default_value_t = 5)]
    trials: usize,

    /// Simulated time per run
    #[arg(long, default_value_t = 10_000.0)]
    max_time: f64,

    /// Seed for the trial streams
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl From<PlanArgs> for TrialPlan {
    fn from(args: PlanArgs) -> Self {
        Self {
            trials: args.trials,
            max_time: args.max_time,
            seed: args.seed,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ServiceModel {
    /// Single exponential draw
    Exponential,
    /// Sum of two exponential draws with half the mean each
    Erlang2,
    /// Constant service time
    Deterministic,
}

impl ServiceModel {
    fn build(self, mean: f64) -> erlang_loss::Result<Box<dyn ServiceTime>> {
        let service: Box<dyn ServiceTime> = match self {
            Self::Exponential => Box::new(Exponential::new(mean)?),
            Self::Erlang2 => Box::new(Erlang::two(mean)?),
            Self::Deterministic => Box::new(Deterministic::new(mean)?),
        };
        Ok(service)
    }
}

fn percent(probability: f64) -> String {
    format!("{:.4}%", probability * 100.0)
}

fn servers_table(load: f64, targets: &[f64]) -> anyhow::Result<()> {
    println!("For offered load E = {load}:");
    for &target in targets {
        let servers = find_servers(load, target).with_context(|| format!("searching servers for target {target}"))?;
        println!(
            "  Servers needed for <{:.1}% blocking: {servers} (actual blocking: {})",
            target * 100.0,
            percent(erlang_b(load, servers)),
        );
    }
    Ok(())
}

fn verify(system: &SystemArgs, server_counts: &[u32], plan: &TrialPlan) -> anyhow::Result<()> {
    let service = system.service.build(system.mean_service)?;
    let load = system.arrival_rate * service.mean();

    for &servers in server_counts {
        let config = LossConfig::new(system.arrival_rate, servers)?;
        let summary = run_trials(config, &service, plan).with_context(|| format!("simulating {servers} servers"))?;
        let individual: Vec<String> = summary.results.iter().map(|&p| percent(p)).collect();

        println!("\nWith {servers} servers ({:?} service):", system.service);
        println!("  Simulated blocking: {}", percent(summary.mean()));
        println!("  Individual trial results: [{}]", individual.join(", "));
        println!("  Erlang-B prediction: {}", percent(erlang_b(load, servers)));
    }
    Ok(())
}

fn compare(system: &SystemArgs, target: f64, plan: &TrialPlan) -> anyhow::Result<()> {
    let service = system.service.build(system.mean_service)?;
    let load = system.arrival_rate * service.mean();
    let exact = find_servers(load, target)?;

    info!(load, target, exact, "searching by simulation");
    let (simulated, summary) = find_servers_by_simulation(system.arrival_rate, &service, target, exact, plan)
        .context("searching servers by simulation")?;

    println!(
        "Servers needed for <{:.1}% blocking with {:?} service: {simulated} (simulated blocking {})",
        target * 100.0,
        system.service,
        percent(summary.mean()),
    );
    println!("  (Compared to {exact} servers from Erlang-B)");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Servers { load, targets } => servers_table(load, &targets),
        Commands::Verify { system, servers, plan } => verify(&system, &servers, &plan.into()),
        Commands::Compare { system, target, plan } => compare(&system, target, &plan.into()),
    }
}
