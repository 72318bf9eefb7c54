use crate::error::require_positive;
use crate::{Error, Result};

/// Arrival process and capacity of a loss system. The service-time parameter lives on the [`ServiceTime`] strategy.
///
/// [`ServiceTime`]: crate::service::ServiceTime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossConfig {
    /// Poisson arrival rate, customers per unit of simulated time.
    pub arrival_rate: f64,
    /// Number of parallel servers.
    pub servers: u32,
}

impl LossConfig {
    /// # Errors
    ///
    /// See [`validate()`](LossConfig::validate).
    pub fn new(arrival_rate: f64, servers: u32) -> Result<Self> {
        let config = Self { arrival_rate, servers };
        config.validate()?;
        Ok(config)
    }

    /// Check the fields, which are public and may have been changed since construction.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the arrival rate is not finite and positive, or if there are no servers.
    pub fn validate(&self) -> Result {
        require_positive("arrival rate", self.arrival_rate)?;
        if self.servers == 0 {
            return Err(Error::configuration("server count", 0.0, "must be at least one"));
        }
        Ok(())
    }

    /// Offered load in Erlangs for a given mean service time.
    pub fn offered_load(&self, mean_service_time: f64) -> f64 {
        self.arrival_rate * mean_service_time
    }

    /// The same arrival process with a different number of servers.
    pub fn with_servers(self, servers: u32) -> Self {
        Self { servers, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config_computes_load() {
        let config = LossConfig::new(10.0, 18).unwrap();
        assert_eq!(10.0, config.offered_load(1.0));
        assert_eq!(5.0, config.offered_load(0.5));
        assert_eq!(13, config.with_servers(13).servers);
    }

    #[test]
    fn rejects_bad_rate_and_zero_servers() {
        assert!(matches!(
            LossConfig::new(0.0, 3),
            Err(Error::Configuration { parameter: "arrival rate", .. })
        ));
        assert!(matches!(
            LossConfig::new(f64::NAN, 3),
            Err(Error::Configuration { parameter: "arrival rate", .. })
        ));
        assert!(matches!(
            LossConfig::new(1.0, 0),
            Err(Error::Configuration { parameter: "server count", .. })
        ));
    }
}
