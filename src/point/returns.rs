//! Return number and number of returns validation.

use log::{debug, warn};

/// What to do with a point after its returns are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Check {
    /// Write the point with this number of returns.
    Keep(u8),
    /// Drop the point.
    Discard,
}

/// Counts data-quality warnings so that only the first of each kind is loud.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Warnings {
    return_number: u64,
    number_of_returns: u64,
}

impl Warnings {
    fn return_number(&mut self, value: u8, max: u8) {
        self.return_number += 1;
        if self.return_number == 1 {
            warn!("invalid return number {} (valid range is 1 to {})", value, max);
        } else {
            debug!("invalid return number {}", value);
        }
    }

    fn number_of_returns(&mut self, value: u8, max: u8) {
        self.number_of_returns += 1;
        if self.number_of_returns == 1 {
            warn!("invalid number of returns {} (valid range is 1 to {})", value, max);
        } else {
            debug!("invalid number of returns {}", value);
        }
    }

    /// The number of warnings of each kind, return number then number of returns.
    #[cfg(test)]
    pub(crate) fn counts(&self) -> (u64, u64) {
        (self.return_number, self.number_of_returns)
    }

    /// Logs the totals, if any warning repeated.
    pub(crate) fn report(&self) {
        if self.return_number > 1 {
            warn!("{} points had an invalid return number", self.return_number);
        }
        if self.number_of_returns > 1 {
            warn!("{} points had an invalid number of returns", self.number_of_returns);
        }
    }
}

/// Checks one point's returns, in order: the return number, a zero count, then a count that's too
/// high for the format.
///
/// With `discard` set, a count that's too high is clamped to `max`, and the point is dropped if its
/// return number is also too high. Otherwise the point is kept as-is.
pub(crate) fn check(
    return_number: u8,
    number_of_returns: u8,
    max: u8,
    discard: bool,
    warnings: &mut Warnings,
) -> Check {
    if return_number < 1 || return_number > max {
        warnings.return_number(return_number, max);
    }
    if number_of_returns == 0 {
        warnings.number_of_returns(0, max);
    }
    if number_of_returns > max {
        if discard {
            if return_number > max {
                return Check::Discard;
            }
            return Check::Keep(max);
        }
        warnings.number_of_returns(number_of_returns, max);
    }
    Check::Keep(number_of_returns)
}
