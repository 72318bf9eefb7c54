use super::LossConfig;
use crate::random::RandomSource;
use crate::service::ServiceTime;
use crate::{Clock, Error, Result, SimState};

use ordered_float::OrderedFloat;

/// Counters accumulated over a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Every arrival processed, admitted or not.
    pub total_arrivals: u64,
    /// Arrivals that found all servers busy and were lost.
    pub blocked_arrivals: u64,
}

impl RunStatistics {
    /// Arrivals that found a free server.
    pub fn admitted_arrivals(&self) -> u64 {
        self.total_arrivals - self.blocked_arrivals
    }

    /// Fraction of arrivals that were blocked, or `0.0` when nothing arrived.
    pub fn blocking_probability(&self) -> f64 {
        if self.total_arrivals == 0 {
            0.0
        } else {
            self.blocked_arrivals as f64 / self.total_arrivals as f64
        }
    }
}

/// State of a loss-system simulation: configuration, the service strategy, the random source, and the per-run
/// occupancy and statistics.
///
/// Occupancy only changes through [`try_admit()`](LossState::try_admit) and [`release()`](LossState::release), and
/// admission refuses once every server is busy, so it never exceeds the configured server count.
#[derive(Debug)]
pub struct LossState<S, R>
where
    S: ServiceTime,
    R: RandomSource,
{
    config: LossConfig,
    service: S,
    rng: R,
    occupancy: u32,
    statistics: RunStatistics,
    end_time: f64,
}

impl<S, R> LossState<S, R>
where
    S: ServiceTime,
    R: RandomSource,
{
    pub(crate) fn new(config: LossConfig, service: S, rng: R) -> Self {
        Self {
            config,
            service,
            rng,
            occupancy: 0,
            statistics: RunStatistics::default(),
            end_time: 0.0,
        }
    }

    /// Forget the previous run and accept events until the clock reaches `end_time`.
    pub(crate) fn begin_run(&mut self, end_time: f64) {
        self.occupancy = 0;
        self.statistics = RunStatistics::default();
        self.end_time = end_time;
    }

    /// Arrival rate and server count this state admits against.
    pub fn config(&self) -> &LossConfig {
        &self.config
    }

    /// Strategy that draws each admitted customer's service duration.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Customers currently in service.
    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }

    /// Counters of the current or most recent run.
    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    pub(crate) fn record_arrival(&mut self) {
        self.statistics.total_arrivals += 1;
    }

    pub(crate) fn record_blocked(&mut self) {
        self.statistics.blocked_arrivals += 1;
    }

    /// Take a server if one is free.
    pub(crate) fn try_admit(&mut self) -> bool {
        if self.occupancy < self.config.servers {
            self.occupancy += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn release(&mut self) {
        debug_assert!(self.occupancy > 0, "departure without a customer in service");
        self.occupancy = self.occupancy.saturating_sub(1);
    }

    /// Time until the next arrival.
    pub(crate) fn draw_interarrival(&mut self) -> Result<f64> {
        let gap = self.rng.draw_exponential(self.config.arrival_rate);
        if gap.is_finite() && gap >= 0.0 {
            Ok(gap)
        } else {
            Err(Error::InvalidInterarrival(gap))
        }
    }

    /// Service duration for a newly admitted customer.
    pub(crate) fn draw_service_duration(&mut self) -> Result<f64> {
        let duration = self.service.draw_service_duration(&mut self.rng);
        if duration.is_finite() && duration >= 0.0 {
            Ok(duration)
        } else {
            Err(Error::InvalidServiceDuration(duration))
        }
    }
}

impl<S, R> SimState<Clock> for LossState<S, R>
where
    S: ServiceTime,
    R: RandomSource,
{
    fn is_complete(&self, current_time: &Clock) -> bool {
        *current_time >= OrderedFloat(self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Deterministic;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn state(servers: u32) -> LossState<Deterministic, Pcg64> {
        LossState::new(
            LossConfig::new(1.0, servers).unwrap(),
            Deterministic::new(1.0).unwrap(),
            Pcg64::seed_from_u64(0),
        )
    }

    #[test]
    fn admission_stops_at_server_count() {
        let mut state = state(2);
        assert!(state.try_admit());
        assert!(state.try_admit());
        assert!(!state.try_admit());
        assert_eq!(2, state.occupancy());

        state.release();
        assert_eq!(1, state.occupancy());
        assert!(state.try_admit());
    }

    #[test]
    fn statistics_derive_blocking() {
        let empty = RunStatistics::default();
        assert_eq!(0.0, empty.blocking_probability());

        let stats = RunStatistics {
            total_arrivals: 8,
            blocked_arrivals: 2,
        };
        assert_eq!(0.25, stats.blocking_probability());
        assert_eq!(6, stats.admitted_arrivals());
    }

    #[test]
    fn begin_run_resets_counters() {
        let mut state = state(1);
        state.record_arrival();
        state.record_blocked();
        state.try_admit();

        state.begin_run(50.0);
        assert_eq!(RunStatistics::default(), *state.statistics());
        assert_eq!(0, state.occupancy());
        assert_eq!(50.0, state.end_time);
    }

    #[test]
    fn complete_once_clock_reaches_end() {
        let mut state = state(1);
        state.begin_run(10.0);
        assert!(!state.is_complete(&OrderedFloat(9.99)));
        assert!(state.is_complete(&OrderedFloat(10.0)));
        assert!(state.is_complete(&OrderedFloat(f64::NAN)), "a NaN clock sorts above every finite time");
    }

    /// Hands back the same draw for every request.
    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn draw_exponential(&mut self, _: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn bad_interarrival_draws_are_rejected() {
        let config = LossConfig::new(1.0, 1).unwrap();
        let service = Deterministic::new(1.0).unwrap();
        for draw in [f64::NAN, f64::INFINITY, -0.5] {
            let mut state = LossState::new(config, service, Fixed(draw));
            match state.draw_interarrival() {
                Err(Error::InvalidInterarrival(gap)) => assert!(gap.is_nan() || gap == draw),
                other => panic!("draw {draw} gave {other:?}"),
            }
        }

        let mut state = LossState::new(config, service, Fixed(0.0));
        assert_eq!(Ok(0.0), state.draw_interarrival());
    }
}
