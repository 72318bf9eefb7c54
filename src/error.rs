use thiserror::Error;

/// Errors that may be encountered while configuring or executing a loss-system calculation.
///
/// The [`Configuration`] variant is returned at construction time, before any simulated time elapses, so a
/// simulator either starts from valid parameters or never exists at all.
///
/// The [`BackInTime`] variant originates from the safe interface of the [`EventQueue`] to indicate that an event's
/// scheduled execution time is prior to the queue's current time. This error likely corresponds to a logical bug on
/// the client side, e.g. forgetting to add an offset to the current time when scheduling a new event.
///
/// [`Configuration`]: Error::Configuration
/// [`BackInTime`]: Error::BackInTime
/// [`EventQueue`]: crate::engine::EventQueue
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A construction parameter was outside of its valid domain.
    #[error("invalid {parameter} {value}: {reason}")]
    Configuration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value, widened to `f64` for reporting.
        value: f64,
        /// What the parameter must satisfy.
        reason: &'static str,
    },

    /// The server-count search was asked a question with no monotone answer, e.g. a negative load or a target
    /// blocking probability that can never be reached.
    #[error("no server count can be searched for load {load} and target blocking {target}")]
    DegenerateSearchInput {
        /// Offered load passed to the search.
        load: f64,
        /// Target blocking probability passed to the search.
        target: f64,
    },

    /// A server-count search ran past its sanity bound without meeting the target.
    #[error("server count search exceeded its bound of {bound} servers")]
    SearchBoundExceeded {
        /// Largest server count the search was allowed to try.
        bound: u32,
    },

    /// The event queue rejected an event that would have been scheduled for a time that has already passed.
    #[error("event execution time is less than current simulation time")]
    BackInTime,

    /// A service-time strategy produced a duration that is negative or not finite.
    #[error("service duration {0} is not a finite non-negative number")]
    InvalidServiceDuration(f64),

    /// A random source produced an interarrival gap that is negative or not finite.
    #[error("interarrival gap {0} is not a finite non-negative number")]
    InvalidInterarrival(f64),
}

/// [`std::result::Result`]`<T, `[`erlang_loss::Error`]`>`, defaulting to `T = ()`.
///
/// A type alias that simplifies the signatures of various functions in this crate. Events use the unit default.
///
/// [`erlang_loss::Error`]: Error
pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand used by the validating constructors throughout the crate.
    pub(crate) fn configuration(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Configuration {
            parameter,
            value,
            reason,
        }
    }
}

/// Ensure `value` is finite and strictly positive, reporting it as `parameter` otherwise.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::configuration(parameter, value, "must be finite and greater than zero"))
    }
}
