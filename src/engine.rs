//! A small discrete-event engine: a time-ordered queue of boxed events and a runner that pops them one at a time.

mod events;
mod simulation;

pub use events::event_traits::Event;
pub use events::EventQueue;
pub use simulation::Simulation;
