use super::LossState;
use crate::engine::{Event, EventQueue};
use crate::random::RandomSource;
use crate::service::ServiceTime;
use crate::Clock;

use ordered_float::OrderedFloat;
use tracing::trace;

/// A customer arrives.
///
/// Every arrival schedules the next one, whether or not it is admitted, so the arrival process renews itself for as
/// long as the run lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalEvent;

impl ArrivalEvent {
    /// Draw an exponential interarrival gap from the state's random source and schedule an arrival that far after
    /// the current time. A negative or non-finite gap is refused with [`Error::InvalidInterarrival`].
    ///
    /// [`Error::InvalidInterarrival`]: crate::Error::InvalidInterarrival
    pub fn schedule<S, R>(
        state: &mut LossState<S, R>,
        event_queue: &mut EventQueue<LossState<S, R>, Clock>,
    ) -> crate::Result
    where
        S: ServiceTime,
        R: RandomSource,
    {
        let gap = state.draw_interarrival()?;
        event_queue.schedule_with_delay(Self, OrderedFloat(gap))
    }
}

impl<S, R> Event<LossState<S, R>, Clock> for ArrivalEvent
where
    S: ServiceTime,
    R: RandomSource,
{
    /// Count the arrival, schedule the next one, then admit or block.
    fn execute(
        &self,
        state: &mut LossState<S, R>,
        event_queue: &mut EventQueue<LossState<S, R>, Clock>,
    ) -> crate::Result {
        state.record_arrival();
        Self::schedule(state, event_queue)?;

        if state.try_admit() {
            let duration = state.draw_service_duration()?;
            event_queue.schedule_with_delay(DepartureEvent, OrderedFloat(duration))?;
            trace!(
                time = event_queue.current_time().0,
                occupancy = state.occupancy(),
                duration,
                "arrival admitted"
            );
        } else {
            state.record_blocked();
            trace!(time = event_queue.current_time().0, "arrival blocked");
        }
        Ok(())
    }
}

/// A customer finishes service and frees its server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureEvent;

impl<S, R> Event<LossState<S, R>, Clock> for DepartureEvent
where
    S: ServiceTime,
    R: RandomSource,
{
    fn execute(
        &self,
        state: &mut LossState<S, R>,
        event_queue: &mut EventQueue<LossState<S, R>, Clock>,
    ) -> crate::Result {
        state.release();
        trace!(time = event_queue.current_time().0, occupancy = state.occupancy(), "departure");
        Ok(())
    }
}
