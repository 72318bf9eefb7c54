//! Service-time distributions.
//!
//! The loss simulator delegates exactly one decision to a [`ServiceTime`] strategy: how long an admitted customer
//! occupies a server. Admission, counters and scheduling stay in the simulator, so any distribution implementing this
//! trait plugs in without touching them.

use crate::error::require_positive;
use crate::random::RandomSource;
use crate::Error;

use std::fmt::Debug;

/// Strategy for drawing the service duration of an admitted customer.
pub trait ServiceTime: Debug {
    /// Mean service duration. Together with the arrival rate this fixes the offered load.
    fn mean(&self) -> f64;

    /// Draw one service duration. Implementations must return a finite, non-negative number; the simulator aborts
    /// the run with [`Error::InvalidServiceDuration`] otherwise.
    fn draw_service_duration(&self, rng: &mut dyn RandomSource) -> f64;
}

impl<T> ServiceTime for &T
where
    T: ServiceTime + ?Sized,
{
    fn mean(&self) -> f64 {
        (**self).mean()
    }

    fn draw_service_duration(&self, rng: &mut dyn RandomSource) -> f64 {
        (**self).draw_service_duration(rng)
    }
}

impl<T> ServiceTime for Box<T>
where
    T: ServiceTime + ?Sized,
{
    fn mean(&self) -> f64 {
        (**self).mean()
    }

    fn draw_service_duration(&self, rng: &mut dyn RandomSource) -> f64 {
        (**self).draw_service_duration(rng)
    }
}

/// Memoryless service: a single exponential draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    mean: f64,
}

impl Exponential {
    /// Draws are a unit exponential scaled by `mean`, so any finite positive mean is accepted. Means within a few
    /// orders of magnitude of [`f64::MAX`] can still overflow an unlucky draw to infinity, which aborts a run with
    /// [`Error::InvalidServiceDuration`].
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] unless `mean` is finite and positive.
    pub fn new(mean: f64) -> Result<Self, Error> {
        Ok(Self {
            mean: require_positive("mean service time", mean)?,
        })
    }
}

impl ServiceTime for Exponential {
    fn mean(&self) -> f64 {
        self.mean
    }

    fn draw_service_duration(&self, rng: &mut dyn RandomSource) -> f64 {
        self.mean * rng.draw_exponential(1.0)
    }
}

/// Erlang-k service: the sum of `phases` independent exponential draws, each with mean `mean / phases`.
///
/// The overall mean equals `mean` while the variance shrinks to `mean² / phases`. Two phases give the Erlang-2
/// (Gamma shape 2) distribution; one phase degenerates to [`Exponential`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Erlang {
    mean: f64,
    phases: u32,
}

impl Erlang {
    /// # Errors
    ///
    /// [`Error::Configuration`] unless `mean` is finite and positive and `phases` is at least one.
    pub fn new(mean: f64, phases: u32) -> Result<Self, Error> {
        let mean = require_positive("mean service time", mean)?;
        if phases == 0 {
            return Err(Error::configuration("phase count", 0.0, "must be at least one"));
        }
        Ok(Self { mean, phases })
    }

    /// The Erlang-2 distribution with the given mean.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] unless `mean` is finite and positive.
    pub fn two(mean: f64) -> Result<Self, Error> {
        Self::new(mean, 2)
    }

    /// Number of exponential phases summed per draw.
    pub fn phases(&self) -> u32 {
        self.phases
    }
}

impl ServiceTime for Erlang {
    fn mean(&self) -> f64 {
        self.mean
    }

    fn draw_service_duration(&self, rng: &mut dyn RandomSource) -> f64 {
        let phase_mean = self.mean / f64::from(self.phases);
        (0..self.phases).map(|_| phase_mean * rng.draw_exponential(1.0)).sum()
    }
}

/// Every customer is served for exactly the same duration. Consumes no randomness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deterministic {
    duration: f64,
}

impl Deterministic {
    /// # Errors
    ///
    /// [`Error::Configuration`] unless `duration` is finite and positive.
    pub fn new(duration: f64) -> Result<Self, Error> {
        Ok(Self {
            duration: require_positive("service duration", duration)?,
        })
    }
}

impl ServiceTime for Deterministic {
    fn mean(&self) -> f64 {
        self.duration
    }

    fn draw_service_duration(&self, _: &mut dyn RandomSource) -> f64 {
        self.duration
    }
}
