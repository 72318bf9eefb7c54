use super::EventQueue;
use crate::{SimState, SimTime};
use std::fmt::Debug;

/// A state change that occurs at one instant of simulated time.
///
/// This trait is generic over the types used to represent simulation state and clock time so that an event set and
/// its state can be written against each other without the engine knowing either. Requiring [`Debug`] lets a pending
/// queue be printed and traced.
///
/// Events are immutable once scheduled: the engine hands each one exclusive access to the state and the queue exactly
/// once, after which it is dropped.
pub trait Event<State, Time>: Debug
where
    State: SimState<Time>,
    Time: SimTime,
{
    /// Apply this event to the simulation. The engine advances the clock, accessible through `event_queue`, to this
    /// event's execution time before calling this method.
    ///
    /// # Errors
    ///
    /// Any error returned here stops [`Simulation::run()`] and is handed back to its caller unchanged, leaving the
    /// remaining events in the queue.
    ///
    /// [`Simulation::run()`]: crate::engine::Simulation::run
    fn execute(&self, simulation_state: &mut State, event_queue: &mut EventQueue<State, Time>) -> crate::Result;
}
