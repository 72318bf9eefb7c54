use ordered_float::{FloatCore, NotNan, OrderedFloat};
use std::fmt::Debug;

/// The generic type used for a simulation's clock.
///
/// Kept generic so the [`engine`] can be exercised with integral clocks in tests as well as the floating-point
/// [`Clock`] the loss system runs on. This trait is a superset of [`Ord`] and [`Debug`] with no additional
/// requirements or functionality.
///
/// Events execute in ascending order of execution time, i.e. if `A.cmp(&B) == std::cmp::Ordering::Less` then event A
/// executes before event B. Ties left unresolved by [`Ord`] are broken by the order in which events were enqueued.
///
/// Floating-point builtins do not implement [`Ord`], so [`OrderedFloat`] and [`NotNan`] from the [`ordered-float`]
/// crate stand in for them.
///
/// [`engine`]: crate::engine
/// [`ordered-float`]: https://docs.rs/ordered-float/4
pub trait SimTime: Ord + Debug {}

impl SimTime for u32 {}
impl SimTime for u64 {}

impl<Float> SimTime for OrderedFloat<Float> where Float: FloatCore + Debug {}

impl<Float> SimTime for NotNan<Float> where Float: FloatCore + Debug {}

/// Simulated time in the loss system, measured in the same unit as the arrival rate's reciprocal.
pub type Clock = OrderedFloat<f64>;

/// The generic type used for a simulation's overall state.
///
/// For the loss system this holds the occupancy counter, run statistics, the random source and the service-time
/// strategy; other implementors can hold whatever their events need.
///
/// This trait has only one method, which provides a way for [`Simulation::run()`] to ask whether it should wrap up
/// event execution. The default implementation always answers "no," and so a simulation running with the default
/// continues until the event queue becomes empty.
///
/// [`Simulation::run()`]: crate::engine::Simulation::run
pub trait SimState<Time>
where
    Time: SimTime,
{
    /// Reports whether the simulation has run to completion. Invoked by [`Simulation::run()`] before popping each
    /// event off the queue: `true` ends the loop, `false` continues with the next scheduled event.
    ///
    /// The `current_time` argument provides shared access to the internally tracked simulation clock.
    ///
    /// [`Simulation::run()`]: crate::engine::Simulation::run
    #[allow(unused_variables)]
    fn is_complete(&self, current_time: &Time) -> bool {
        false
    }
}
