//! A small loss system that traces every arrival and departure to stderr.
//!
//! Arrivals come at a rate of two per minute and service takes a minute and a half on average, so three servers
//! see an offered load of three Erlangs. The simulation runs for half an hour of simulated time, long enough to watch
//! customers being turned away whenever all three servers are busy.
//!
//! Run with `cargo run --features cli --example loss_trace`; set `RUST_LOG` to change the filter.

use erlang_loss::erlang::erlang_b;
use erlang_loss::loss::{LossConfig, LossSimulator};
use erlang_loss::service::Exponential;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing_subscriber::EnvFilter;

fn main() -> erlang_loss::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("erlang_loss=trace")))
        .with_writer(std::io::stderr)
        .init();

    let config = LossConfig::new(2.0, 3)?;
    let service = Exponential::new(1.5)?;
    let mut simulator = LossSimulator::new(config, service, Pcg64::from_rng(&mut rand::rng()))?;

    let blocking = simulator.run(30.0)?;
    let statistics = simulator.statistics();
    println!(
        "{} of {} arrivals blocked ({:.1}%); Erlang-B predicts {:.1}%",
        statistics.blocked_arrivals,
        statistics.total_arrivals,
        blocking * 100.0,
        erlang_b(simulator.offered_load(), config.servers) * 100.0,
    );
    Ok(())
}
