//! # Overview
//!
//! erlang-loss estimates the blocking probability of a loss system: `c` parallel servers, Poisson arrivals, and no
//! waiting room, so a customer who finds every server busy is lost. It offers two estimates that should agree:
//!
//! * [`erlang::erlang_b`] computes the exact Erlang-B value with a recurrence that is stable for any server count, and
//!   [`erlang::find_servers`] inverts it to the fewest servers meeting a target blocking probability.
//! * [`loss::LossSimulator`] reproduces the same probability with a discrete-event simulation. The service-time
//!   distribution is a [`service::ServiceTime`] strategy, so exponential, Erlang-k, deterministic or client-written
//!   distributions all run through the same admission logic.
//!
//! The simulator is built on a small generic engine in [`engine`]: a [`Simulation`] owns its state and an
//! [`EventQueue`] of boxed [`Event`]s, executes them in ascending order of execution time (ties in insertion order)
//! and asks the state through [`SimState::is_complete`] whether to stop.
//!
//! Each simulator owns its random source. Any [`rand::Rng`] works; seeding a [`rand_pcg::Pcg64`] makes runs
//! reproducible, and [`trials::run_trials`] derives an independent stream per replication from a single seed.
//!
//! ```
//! use erlang_loss::erlang::{erlang_b, find_servers};
//!
//! let servers = find_servers(10.0, 0.01)?;
//! assert_eq!(18, servers);
//! assert!(erlang_b(10.0, servers) <= 0.01);
//! assert!(erlang_b(10.0, servers - 1) > 0.01);
//! # Ok::<(), erlang_loss::Error>(())
//! ```
//!
//! [`Simulation`]: engine::Simulation
//! [`EventQueue`]: engine::EventQueue
//! [`Event`]: engine::Event

pub mod engine;
pub mod erlang;
mod error;
mod generic_parameters;
pub mod loss;
pub mod random;
pub mod service;
pub mod trials;

pub use error::{Error, Result};
pub use generic_parameters::{Clock, SimState, SimTime};
