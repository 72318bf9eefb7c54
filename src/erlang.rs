//! Exact blocking probabilities for the M/M/c/c loss system.

use crate::{Error, Result};
use tracing::debug;

/// Largest server count for which [`erlang_b_direct`] is attempted: `170!` is the last factorial representable as a
/// finite `f64`.
pub const DIRECT_FORM_MAX_SERVERS: u32 = 170;

/// Sanity bound for the doubling phase of [`find_servers`].
pub const MAX_SEARCH_SERVERS: u32 = 1 << 24;

/// Erlang-B blocking probability for `servers` servers offered `load` Erlangs.
///
/// Evaluated with the recurrence `B(0) = 1`, `B(n) = load·B(n−1) / (n + load·B(n−1))`, which stays within `[0, 1]` at
/// every step and so never overflows. Cost is linear in `servers`; every `u32` server count and every finite,
/// non-negative load is supported.
///
/// With zero servers everything is blocked (`1.0`); with zero load nothing is (`0.0` for `servers >= 1`).
///
/// `load` must be finite and non-negative; this is checked only in debug builds.
pub fn erlang_b(load: f64, servers: u32) -> f64 {
    debug_assert!(load.is_finite() && load >= 0.0, "offered load must be finite and non-negative, got {load}");
    (1..=servers).fold(1.0, |blocking, n| {
        let carried = load * blocking;
        carried / (f64::from(n) + carried)
    })
}

/// Erlang-B from the closed form `(load^c / c!) / Σ_{k=0..c} load^k / k!`, evaluated term by term with explicit
/// factorials.
///
/// Only meant for cross-checking [`erlang_b`] at small server counts. Returns `None` when `servers` exceeds
/// [`DIRECT_FORM_MAX_SERVERS`] or when a power of `load` overflows.
pub fn erlang_b_direct(load: f64, servers: u32) -> Option<f64> {
    if servers > DIRECT_FORM_MAX_SERVERS {
        return None;
    }

    let mut factorial = 1.0_f64;
    let mut denominator = 0.0_f64;
    let mut numerator = 1.0_f64;
    for k in 0..=servers {
        if k > 0 {
            factorial *= f64::from(k);
        }
        numerator = load.powi(k as i32) / factorial;
        denominator += numerator;
    }

    if numerator.is_finite() && denominator.is_finite() && denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Minimum number of servers (at least one) for which the Erlang-B blocking probability at `load` is at most
/// `target`.
///
/// The search checks a single server first, then doubles an upper bound until it meets the target and finally
/// bisects, relying on `erlang_b(load, ·)` being strictly decreasing for positive load. A load of zero needs one
/// server for any target.
///
/// # Errors
///
/// * [`Error::DegenerateSearchInput`] if `load` is negative or not finite, or `target` is NaN or not positive.
/// * [`Error::SearchBoundExceeded`] if the target is not met by [`MAX_SEARCH_SERVERS`] servers.
pub fn find_servers(load: f64, target: f64) -> Result<u32> {
    if !(load.is_finite() && load >= 0.0) || !(target > 0.0) {
        return Err(Error::DegenerateSearchInput { load, target });
    }
    if load == 0.0 || erlang_b(load, 1) <= target {
        return Ok(1);
    }

    // erlang_b(load, low - 1) > target and erlang_b(load, high) <= target hold from here on.
    let mut low = 2;
    let mut high = initial_upper_bound(load);
    while erlang_b(load, high) > target {
        if high >= MAX_SEARCH_SERVERS {
            return Err(Error::SearchBoundExceeded {
                bound: MAX_SEARCH_SERVERS,
            });
        }
        low = high + 1;
        high = high.saturating_mul(2).min(MAX_SEARCH_SERVERS);
    }
    debug!(load, target, low, high, "bracketed server count");

    while low < high {
        let mid = low + (high - low) / 2;
        if erlang_b(load, mid) > target {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    debug!(load, target, servers = low, blocking = erlang_b(load, low), "found server count");
    Ok(low)
}

/// Twice the load, rounded up, and never below two.
fn initial_upper_bound(load: f64) -> u32 {
    let doubled = (2.0 * load).ceil();
    if doubled >= f64::from(MAX_SEARCH_SERVERS) {
        MAX_SEARCH_SERVERS
    } else {
        (doubled as u32).max(2)
    }
}
