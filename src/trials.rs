//! Repeated simulation trials and the empirical server-count search built on them.

use crate::error::require_positive;
use crate::loss::{LossConfig, LossSimulator};
use crate::service::ServiceTime;
use crate::{Error, Result};

use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{debug, info};

/// How many servers past its starting point [`find_servers_by_simulation`] may add before giving up.
pub const MAX_SIMULATED_SEARCH_STEPS: u32 = 256;

/// Number, length and seeding of replications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialPlan {
    /// Independent runs per configuration.
    pub trials: usize,
    /// Simulated time horizon of each run.
    pub max_time: f64,
    /// Seed of the master generator every trial's stream is derived from.
    pub seed: u64,
}

impl Default for TrialPlan {
    fn default() -> Self {
        Self {
            trials: 5,
            max_time: 10_000.0,
            seed: 0,
        }
    }
}

impl TrialPlan {
    /// # Errors
    ///
    /// [`Error::Configuration`] if there are no trials or the horizon is not finite and positive.
    pub fn validate(&self) -> Result {
        if self.trials == 0 {
            return Err(Error::configuration("trial count", 0.0, "must be at least one"));
        }
        require_positive("max time", self.max_time)?;
        Ok(())
    }
}

/// Blocking probabilities observed in each trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    /// Blocking probability of each trial, in the order the trials ran.
    pub results: Vec<f64>,
}

impl TrialSummary {
    /// Mean blocking probability across trials, `0.0` if there were none.
    pub fn mean(&self) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            self.results.iter().sum::<f64>() / self.results.len() as f64
        }
    }

    /// Sample standard deviation across trials, `0.0` with fewer than two.
    pub fn std_dev(&self) -> f64 {
        if self.results.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let sum_sq: f64 = self.results.iter().map(|p| (p - mean).powi(2)).sum();
        (sum_sq / (self.results.len() - 1) as f64).sqrt()
    }
}

/// Run `plan.trials` independent simulations of `config` with `service` and collect their blocking probabilities.
///
/// Every trial gets a fresh simulator and its own [`Pcg64`] stream drawn from a master generator seeded with
/// `plan.seed`, so the whole batch is reproducible and no two trials share random numbers.
///
/// # Errors
///
/// Configuration errors from `plan`, `config` or `service`, and any error aborting a run.
pub fn run_trials<S>(config: LossConfig, service: &S, plan: &TrialPlan) -> Result<TrialSummary>
where
    S: ServiceTime + ?Sized,
{
    plan.validate()?;
    let mut master = Pcg64::seed_from_u64(plan.seed);

    let results = (0..plan.trials)
        .map(|trial| -> Result<f64> {
            let mut simulator = LossSimulator::new(config, service, Pcg64::from_rng(&mut master))?;
            let blocking = simulator.run(plan.max_time)?;
            debug!(trial, servers = config.servers, blocking, "trial finished");
            Ok(blocking)
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(TrialSummary { results })
}

/// Smallest server count, starting at `start_servers`, whose mean simulated blocking is strictly below `target`.
///
/// Servers are added one at a time. Starting from the Erlang-B answer for the same mean makes the result directly
/// comparable with it. Every step reuses `plan` unchanged, including its seed.
///
/// # Errors
///
/// * [`Error::Configuration`] for an invalid `arrival_rate`, `start_servers == 0`, or a target outside `(0, 1]`.
/// * [`Error::SearchBoundExceeded`] if [`MAX_SIMULATED_SEARCH_STEPS`] additional servers do not suffice.
pub fn find_servers_by_simulation<S>(
    arrival_rate: f64,
    service: &S,
    target: f64,
    start_servers: u32,
    plan: &TrialPlan,
) -> Result<(u32, TrialSummary)>
where
    S: ServiceTime + ?Sized,
{
    if !(target > 0.0 && target <= 1.0) {
        return Err(Error::configuration("target blocking", target, "must lie in (0, 1]"));
    }
    let mut config = LossConfig::new(arrival_rate, start_servers)?;
    let bound = start_servers.saturating_add(MAX_SIMULATED_SEARCH_STEPS);

    loop {
        let summary = run_trials(config, service, plan)?;
        debug!(servers = config.servers, mean = summary.mean(), target, "simulated server count");
        if summary.mean() < target {
            info!(servers = config.servers, mean = summary.mean(), "target met by simulation");
            return Ok((config.servers, summary));
        }
        if config.servers >= bound {
            return Err(Error::SearchBoundExceeded { bound });
        }
        config = config.with_servers(config.servers + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{Deterministic, Exponential};

    fn short_plan() -> TrialPlan {
        TrialPlan {
            trials: 3,
            max_time: 200.0,
            seed: 11,
        }
    }

    #[test]
    fn summary_statistics() {
        let summary = TrialSummary {
            results: vec![0.1, 0.2, 0.3],
        };
        assert!((summary.mean() - 0.2).abs() < 1e-12);
        assert!((summary.std_dev() - 0.1).abs() < 1e-12);
        assert_eq!(0.0, TrialSummary { results: vec![] }.mean());
    }

    #[test]
    fn trials_are_reproducible_and_distinct() {
        let config = LossConfig::new(5.0, 4).unwrap();
        let service = Exponential::new(1.0).unwrap();
        let first = run_trials(config, &service, &short_plan()).unwrap();
        let second = run_trials(config, &service, &short_plan()).unwrap();

        assert_eq!(first, second);
        assert_eq!(3, first.results.len());
        assert_ne!(first.results[0], first.results[1], "trials should draw from separate streams");
    }

    #[test]
    fn empty_plan_is_rejected() {
        let plan = TrialPlan {
            trials: 0,
            ..TrialPlan::default()
        };
        let service = Exponential::new(1.0).unwrap();
        assert!(matches!(
            run_trials(LossConfig::new(1.0, 1).unwrap(), &service, &plan),
            Err(Error::Configuration { parameter: "trial count", .. })
        ));
    }

    #[test]
    fn search_adds_servers_until_target_met() {
        // Unit load: Erlang-B gives 0.5, 0.2 and 0.0625 for one, two and three servers.
        let service = Deterministic::new(1.0).unwrap();
        let plan = TrialPlan {
            max_time: 2_000.0,
            ..short_plan()
        };
        let (servers, summary) = find_servers_by_simulation(1.0, &service, 0.15, 1, &plan).unwrap();
        assert_eq!(3, servers);
        assert!(summary.mean() < 0.15);
    }

    #[test]
    fn search_stops_immediately_when_start_suffices() {
        let service = Deterministic::new(0.1).unwrap();
        let (servers, _) = find_servers_by_simulation(1.0, &service, 0.5, 4, &short_plan()).unwrap();
        assert_eq!(4, servers);
    }

    #[test]
    fn search_rejects_bad_target() {
        let service = Exponential::new(1.0).unwrap();
        for target in [0.0, 1.5, f64::NAN] {
            assert!(matches!(
                find_servers_by_simulation(1.0, &service, target, 1, &short_plan()),
                Err(Error::Configuration {
                    parameter: "target blocking",
                    ..
                })
            ));
        }
    }
}
