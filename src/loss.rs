//! Discrete-event simulation of a pure-loss system: `servers` parallel servers, no waiting room, Poisson arrivals
//! and a pluggable service-time distribution.

mod config;
mod events;
mod simulator;
mod state;

pub use config::LossConfig;
pub use events::{ArrivalEvent, DepartureEvent};
pub use simulator::LossSimulator;
pub use state::{LossState, RunStatistics};
