//! Plugging a client-defined service-time distribution into the loss simulator.
//!
//! A two-phase hyperexponential distribution serves each customer either quickly or slowly, chosen at random. Its
//! variance is far higher than the exponential's for the same mean, yet the blocking probability of a loss system
//! depends on the service distribution only through its mean, so the simulated result should still land near the
//! Erlang-B value.

use erlang_loss::erlang::erlang_b;
use erlang_loss::loss::LossConfig;
use erlang_loss::random::RandomSource;
use erlang_loss::service::ServiceTime;
use erlang_loss::trials::{run_trials, TrialPlan};

/// With probability `fast_share` a draw has mean `fast_mean`, otherwise `slow_mean`.
#[derive(Debug)]
struct Hyperexponential {
    fast_share: f64,
    fast_mean: f64,
    slow_mean: f64,
}

impl ServiceTime for Hyperexponential {
    fn mean(&self) -> f64 {
        self.fast_share * self.fast_mean + (1.0 - self.fast_share) * self.slow_mean
    }

    fn draw_service_duration(&self, rng: &mut dyn RandomSource) -> f64 {
        // an exponential draw at rate 1 lies below ln(1 / (1 - p)) with probability p
        let selector = rng.draw_exponential(1.0);
        let threshold = -(1.0 - self.fast_share).ln();
        let mean = if selector < threshold { self.fast_mean } else { self.slow_mean };
        rng.draw_exponential(1.0 / mean)
    }
}

fn main() -> erlang_loss::Result {
    let service = Hyperexponential {
        fast_share: 0.8,
        fast_mean: 0.5,
        slow_mean: 3.0,
    };
    let arrival_rate = 10.0;
    let load = arrival_rate * service.mean();
    let plan = TrialPlan::default();

    for servers in [13, 18, 21] {
        let summary = run_trials(LossConfig::new(arrival_rate, servers)?, &service, &plan)?;
        println!(
            "{servers} servers: simulated {:.4}% (sd {:.4}%), Erlang-B {:.4}%",
            summary.mean() * 100.0,
            summary.std_dev() * 100.0,
            erlang_b(load, servers) * 100.0,
        );
    }
    Ok(())
}
