mod event_holder;
pub(super) mod event_traits;

use crate::{Error, SimState, SimTime};
use event_holder::EventHolder;
use event_traits::Event;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::ops::Add;

/// Priority queue of scheduled events.
///
/// Events execute in ascending order of execution time. Events that share an execution time execute in the order in
/// which they were pushed onto the queue, so a run is fully determined by its random draws.
///
/// An [`EventQueue`] also owns the simulation clock: popping an event advances the clock to that event's execution
/// time, and the clock never moves otherwise. Popping only happens inside [`Simulation::run()`].
///
/// Attempting to schedule an event for a time that is already past results in an [`Error::BackInTime`] without
/// modifying the queue.
///
/// [`Simulation::run()`]: crate::engine::Simulation::run
#[derive(Debug, Default)]
pub struct EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    events: BinaryHeap<Reverse<EventHolder<State, Time>>>,
    last_execution_time: Time,
    events_added: u64,
}

impl<State, Time> EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    /// Construct a new [`EventQueue`] with no scheduled events and a clock initialized to the provided time.
    pub(crate) fn new(start_time: Time) -> Self {
        Self {
            events: BinaryHeap::default(),
            last_execution_time: start_time,
            events_added: 0,
        }
    }

    /// Schedule the provided event at the specified time.
    ///
    /// # Errors
    ///
    /// If `time` is less than the current clock time on `self`, returns an [`Error::BackInTime`] with no
    /// modifications to the queue.
    pub fn schedule<EventType>(&mut self, event: EventType, time: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        if time < self.last_execution_time {
            return Err(Error::BackInTime);
        }

        let insertion_sequence = self.events_added;
        self.events_added += 1;
        self.events.push(Reverse(EventHolder {
            execution_time: time,
            event: Box::new(event),
            insertion_sequence,
        }));
        Ok(())
    }

    /// Pop the earliest event, advancing the clock to its execution time.
    pub(crate) fn next(&mut self) -> Option<Box<dyn Event<State, Time>>> {
        let Reverse(holder) = self.events.pop()?;
        self.last_execution_time = holder.execution_time;
        Some(holder.event)
    }

    /// Get a shared reference to the simulation's current clock time.
    pub fn current_time(&self) -> &Time {
        &self.last_execution_time
    }

    /// Execution time of the earliest pending event, if any.
    pub fn next_time(&self) -> Option<&Time> {
        self.events.peek().map(|Reverse(holder)| &holder.execution_time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<State, Time> EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime + Clone + Add<Output = Time>,
{
    /// Schedule the provided event after the specified delay. The event's execution time will be equal to the result
    /// of `self.current_time().clone() + delay`.
    ///
    /// # Errors
    ///
    /// If the calculated execution time is less than the current clock time on `self` (a negative delay), returns an
    /// [`Error::BackInTime`] with no modifications to the queue.
    pub fn schedule_with_delay<EventType>(&mut self, event: EventType, delay: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        let event_time = self.last_execution_time.clone() + delay;
        self.schedule(event, event_time)
    }
}

impl<State, Time> std::fmt::Display for EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            formatter,
            "EventQueue with {} scheduled events at current time {:?}",
            self.events.len(),
            self.last_execution_time
        )
    }
}
