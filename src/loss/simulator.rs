use super::{ArrivalEvent, LossConfig, LossState, RunStatistics};
use crate::engine::Simulation;
use crate::error::require_positive;
use crate::random::RandomSource;
use crate::service::{Exponential, ServiceTime};
use crate::{Clock, Error, Result};

use ordered_float::OrderedFloat;
use rand_pcg::Pcg64;
use tracing::debug;

/// Estimates the blocking probability of a loss system by simulating it.
///
/// A simulator owns its configuration, its service-time strategy and its random source. Each call to
/// [`run()`](LossSimulator::run) starts from an empty system at time zero with fresh statistics; only the random
/// source carries over, so consecutive runs are independent replications.
///
/// ```
/// use erlang_loss::loss::{LossConfig, LossSimulator};
/// use erlang_loss::service::Exponential;
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64;
///
/// let config = LossConfig::new(10.0, 18)?;
/// let service = Exponential::new(1.0)?;
/// let mut simulator = LossSimulator::new(config, service, Pcg64::seed_from_u64(7))?;
/// let blocking = simulator.run(1_000.0)?;
/// assert!((0.0..=1.0).contains(&blocking));
/// # Ok::<(), erlang_loss::Error>(())
/// ```
#[derive(Debug)]
pub struct LossSimulator<S = Exponential, R = Pcg64>
where
    S: ServiceTime,
    R: RandomSource,
{
    simulation: Simulation<LossState<S, R>, Clock>,
}

impl<S, R> LossSimulator<S, R>
where
    S: ServiceTime,
    R: RandomSource,
{
    /// # Errors
    ///
    /// [`Error::Configuration`] if `config` is invalid or the service strategy's mean is not finite and positive.
    pub fn new(config: LossConfig, service: S, rng: R) -> Result<Self> {
        config.validate()?;
        require_positive("mean service time", service.mean())?;
        Ok(Self {
            simulation: Simulation::new(LossState::new(config, service, rng), OrderedFloat(0.0)),
        })
    }

    /// Simulate from time zero until the clock reaches `max_time` and return the fraction of arrivals blocked.
    ///
    /// The event that first moves the clock to or past `max_time` is still processed. A non-positive `max_time`,
    /// negative infinity included, processes no events and reports `0.0`.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if `max_time` is NaN or positive infinity, since neither run would ever end.
    /// [`Error::InvalidServiceDuration`] or [`Error::InvalidInterarrival`] if the random source or the service
    /// strategy yields a negative or non-finite duration, which aborts the run.
    pub fn run(&mut self, max_time: f64) -> Result<f64> {
        if max_time.is_nan() || max_time == f64::INFINITY {
            return Err(Error::configuration("max time", max_time, "must not be NaN or infinite"));
        }

        self.simulation.reset(OrderedFloat(0.0));
        let (state, event_queue) = self.simulation.parts_mut();
        state.begin_run(max_time);
        ArrivalEvent::schedule(state, event_queue)?;

        self.simulation.run()?;

        let statistics = self.statistics();
        debug!(
            max_time,
            servers = self.config().servers,
            total_arrivals = statistics.total_arrivals,
            blocked_arrivals = statistics.blocked_arrivals,
            clock = self.clock(),
            "loss simulation finished"
        );
        Ok(statistics.blocking_probability())
    }

    /// Statistics of the most recent run.
    pub fn statistics(&self) -> RunStatistics {
        *self.simulation.state().statistics()
    }

    /// Customers in service when the most recent run stopped.
    pub fn occupancy(&self) -> u32 {
        self.simulation.state().occupancy()
    }

    /// Simulation clock when the most recent run stopped.
    pub fn clock(&self) -> f64 {
        self.simulation.event_queue().current_time().0
    }

    /// Arrival rate and server count being simulated.
    pub fn config(&self) -> &LossConfig {
        self.simulation.state().config()
    }

    /// The service-time strategy in use.
    pub fn service(&self) -> &S {
        self.simulation.state().service()
    }

    /// Offered load in Erlangs: arrival rate times mean service time.
    pub fn offered_load(&self) -> f64 {
        self.config().offered_load(self.service().mean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Deterministic;
    use rand::SeedableRng;

    /// Every exponential draw returns its mean, turning arrivals into a clock tick.
    #[derive(Debug)]
    struct MeanSource;

    impl RandomSource for MeanSource {
        fn draw_exponential(&mut self, rate: f64) -> f64 {
            1.0 / rate
        }
    }

    #[derive(Debug)]
    struct NegativeService;

    impl ServiceTime for NegativeService {
        fn mean(&self) -> f64 {
            1.0
        }

        fn draw_service_duration(&self, _: &mut dyn RandomSource) -> f64 {
            -1.0
        }
    }

    fn scripted(arrival_rate: f64, servers: u32, duration: f64) -> LossSimulator<Deterministic, MeanSource> {
        LossSimulator::new(
            LossConfig::new(arrival_rate, servers).unwrap(),
            Deterministic::new(duration).unwrap(),
            MeanSource,
        )
        .unwrap()
    }

    #[test]
    fn scripted_run_blocks_expected_arrivals() {
        let mut sim = scripted(1.0, 2, 2.5);
        let blocking = sim.run(10.0).unwrap();

        assert_eq!(
            RunStatistics {
                total_arrivals: 10,
                blocked_arrivals: 3,
            },
            sim.statistics()
        );
        assert_eq!(0.3, blocking);
        assert_eq!(2, sim.occupancy());
        assert_eq!(10.0, sim.clock());
    }

    #[test]
    fn arrival_pops_before_departure_scheduled_for_same_time() {
        // Each arrival schedules its successor before its own departure, so at every tie the arrival goes first
        // and finds the single server still busy.
        let mut sim = scripted(1.0, 1, 1.0);
        assert_eq!(0.5, sim.run(10.0).unwrap());
        assert_eq!(5, sim.statistics().blocked_arrivals);
    }

    #[test]
    fn occupancy_never_exceeds_servers() {
        let mut sim = scripted(2.0, 3, 2.0);
        sim.run(20.0).unwrap();
        assert_eq!(40, sim.statistics().total_arrivals);
        assert_eq!(10, sim.statistics().blocked_arrivals);
        assert!(sim.occupancy() <= 3);
    }

    #[test]
    fn non_positive_horizon_processes_nothing() {
        let mut sim = scripted(1.0, 1, 1.0);
        assert_eq!(0.0, sim.run(0.0).unwrap());
        assert_eq!(0, sim.statistics().total_arrivals);
        assert_eq!(0.0, sim.run(-5.0).unwrap());
        assert_eq!(0.0, sim.clock());
        assert_eq!(0.0, sim.run(f64::NEG_INFINITY).unwrap());
        assert_eq!(0, sim.statistics().total_arrivals);
    }

    #[test]
    fn each_run_starts_fresh() {
        let mut sim = scripted(1.0, 2, 2.5);
        sim.run(10.0).unwrap();
        sim.run(4.0).unwrap();
        assert_eq!(4, sim.statistics().total_arrivals);
        assert_eq!(1, sim.statistics().blocked_arrivals);
        assert_eq!(4.0, sim.clock());
    }

    #[test]
    fn infinite_horizon_is_rejected() {
        let mut sim = scripted(1.0, 1, 1.0);
        assert!(matches!(
            sim.run(f64::INFINITY),
            Err(Error::Configuration { parameter: "max time", .. })
        ));
        assert!(matches!(
            sim.run(f64::NAN),
            Err(Error::Configuration { parameter: "max time", .. })
        ));
    }

    #[test]
    fn bad_service_duration_aborts_run() {
        let config = LossConfig::new(1.0, 1).unwrap();
        let mut sim = LossSimulator::new(config, NegativeService, MeanSource).unwrap();
        assert_eq!(Err(Error::InvalidServiceDuration(-1.0)), sim.run(10.0));
    }

    #[test]
    fn construction_validates_every_parameter() {
        let rng = || Pcg64::seed_from_u64(1);
        let service = Exponential::new(1.0).unwrap();
        let zero_servers = LossConfig {
            arrival_rate: 1.0,
            servers: 0,
        };
        let zero_rate = LossConfig {
            arrival_rate: 0.0,
            servers: 1,
        };

        assert!(LossSimulator::new(zero_servers, service, rng()).is_err());
        assert!(LossSimulator::new(zero_rate, service, rng()).is_err());
        assert!(LossSimulator::new(LossConfig::new(1.0, 1).unwrap(), NegativeService, rng()).is_ok());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let build = || {
            LossSimulator::new(
                LossConfig::new(10.0, 12).unwrap(),
                Exponential::new(1.0).unwrap(),
                Pcg64::seed_from_u64(99),
            )
            .unwrap()
        };
        let (mut a, mut b) = (build(), build());
        assert_eq!(a.run(500.0).unwrap(), b.run(500.0).unwrap());
        assert_eq!(a.statistics(), b.statistics());
        assert_eq!(10.0, a.offered_load());
    }
}
