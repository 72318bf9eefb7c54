use erlang_loss::engine::{Event, EventQueue, Simulation};
use erlang_loss::{Error, SimState};
use ordered_float::NotNan;

type Time = NotNan<f64>;

fn time(value: f64) -> Time {
    NotNan::new(value).expect("test times are never NaN")
}

/// Records when each tick fired and stops once the clock passes `end`.
#[derive(Debug)]
struct Ticks {
    fired_at: Vec<f64>,
    end: f64,
}

impl SimState<Time> for Ticks {
    fn is_complete(&self, current_time: &Time) -> bool {
        current_time.into_inner() >= self.end
    }
}

/// Reschedules itself `period` after each execution.
#[derive(Debug)]
struct Tick {
    period: f64,
}

impl Event<Ticks, Time> for Tick {
    fn execute(&self, state: &mut Ticks, event_queue: &mut EventQueue<Ticks, Time>) -> erlang_loss::Result {
        state.fired_at.push(event_queue.current_time().into_inner());
        event_queue.schedule_with_delay(Tick { period: self.period }, time(self.period))
    }
}

#[derive(Debug)]
struct Rewind;

impl Event<Ticks, Time> for Rewind {
    fn execute(&self, _: &mut Ticks, event_queue: &mut EventQueue<Ticks, Time>) -> erlang_loss::Result {
        event_queue.schedule_with_delay(Rewind, time(-1.0))
    }
}

fn simulation(end: f64) -> Simulation<Ticks, Time> {
    Simulation::new(
        Ticks {
            fired_at: Vec::new(),
            end,
        },
        time(0.0),
    )
}

#[test]
fn self_rescheduling_event_runs_until_complete() {
    let mut sim = simulation(2.0);
    sim.schedule(Tick { period: 0.5 }, time(0.5)).unwrap();
    sim.run().unwrap();

    assert_eq!(vec![0.5, 1.0, 1.5, 2.0], sim.state().fired_at);
    assert_eq!(time(2.0), *sim.event_queue().current_time());
    assert_eq!(Some(&time(2.5)), sim.event_queue().next_time(), "the next tick should still be pending");
}

#[test]
fn interleaved_periods_share_one_clock() {
    let mut sim = simulation(3.0);
    sim.schedule(Tick { period: 1.0 }, time(1.0)).unwrap();
    sim.schedule(Tick { period: 1.5 }, time(1.5)).unwrap();
    sim.run().unwrap();

    assert_eq!(vec![1.0, 1.5, 2.0, 3.0], sim.state().fired_at);
}

#[test]
fn negative_delay_surfaces_back_in_time() {
    let mut sim = simulation(10.0);
    sim.schedule(Rewind, time(1.0)).unwrap();
    assert_eq!(Err(Error::BackInTime), sim.run());
    assert_eq!(time(1.0), *sim.event_queue().current_time());
}

#[test]
fn exhausted_queue_ends_the_run() {
    let mut sim = simulation(f64::MAX);
    sim.run().unwrap();
    assert!(sim.event_queue().is_empty());
    assert_eq!(time(0.0), *sim.event_queue().current_time());
}
