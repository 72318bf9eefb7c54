use rand::Rng;
use rand_distr::{Distribution, Exp1};

/// A source of exponentially distributed variates.
///
/// Every [`rand::Rng`] is a `RandomSource`, so a simulator can own a seeded [`rand_pcg::Pcg64`] for reproducible runs
/// or any other generator. Tests can implement this trait directly to script exact draws.
pub trait RandomSource {
    /// Draw a non-negative variate from the exponential distribution with the given `rate`, i.e. with mean
    /// `1.0 / rate`. Callers guarantee `rate` is finite and positive.
    fn draw_exponential(&mut self, rate: f64) -> f64;
}

impl<R> RandomSource for R
where
    R: Rng + ?Sized,
{
    fn draw_exponential(&mut self, rate: f64) -> f64 {
        let unit: f64 = Exp1.sample(self);
        unit / rate
    }
}
