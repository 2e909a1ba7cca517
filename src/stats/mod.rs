//! Fixed-shape stat lines holding raw counters only.
//!
//! Every rate is computed on demand from the counters, so a merged line can
//! never carry a stale average. A rate whose denominator is zero is
//! [`Rate::UNDEFINED`], which formats as [`UNDEFINED_PLACEHOLDER`].

mod batting;
mod fielding;
mod pitching;
mod team;

pub use batting::BattingLine;
pub use fielding::{FieldingLine, TeamFielding};
pub use pitching::PitchingLine;
pub use team::TeamRecord;

use std::collections::BTreeSet;
use std::fmt;

/// Text printed in place of a rate with a zero denominator.
pub const UNDEFINED_PLACEHOLDER: &str = "-";

/// A derived statistic that may be undefined.
///
/// Formatting uses the requested precision (3 by default), drops the leading
/// zero of values below one and right-aligns within the requested width.
///
/// # Examples
///
/// ```
/// use scorefold::Rate;
///
/// let avg = Rate::new(3.0, 10.0);
/// assert_eq!(format!("{avg}"), ".300");
/// assert_eq!(format!("{avg:>6}"), "  .300");
/// assert_eq!(format!("{:.2}", Rate::new(27.0, 9.0)), "3.00");
/// assert_eq!(format!("{}", Rate::new(1.0, 0.0)), "-");
/// assert!(Rate::new(1.0, 0.0).value().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rate(Option<f64>);

impl Rate {
    pub const UNDEFINED: Rate = Rate(None);

    /// `num / den`, or undefined when `den` is zero.
    pub fn new(num: f64, den: f64) -> Rate {
        if den == 0.0 {
            Rate::UNDEFINED
        } else {
            Rate(Some(num / den))
        }
    }

    /// The value, or `None` when undefined.
    pub fn value(self) -> Option<f64> {
        self.0
    }

    /// False for a zero denominator.
    pub fn is_defined(self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self.0 {
            None => UNDEFINED_PLACEHOLDER.to_string(),
            Some(value) => {
                let precision = f.precision().unwrap_or(3);
                let text = format!("{value:.precision$}");
                match text.strip_prefix("0.") {
                    Some(rest) => format!(".{rest}"),
                    None => text,
                }
            }
        };
        let width = f.width().unwrap_or(0);
        write!(f, "{text:>width$}")
    }
}

/// Field-wise combination of two lines of the same shape.
///
/// Only raw counters are added. Identity fields (player, team, position)
/// keep the receiver's values and game-identifier sets are unioned.
pub trait Merge {
    fn merge(&mut self, other: &Self);

    /// Consuming form of [`merge`](Merge::merge).
    fn merged(mut self, other: &Self) -> Self
    where
        Self: Sized,
    {
        self.merge(other);
        self
    }
}

pub(crate) fn union_games(into: &mut BTreeSet<String>, from: &BTreeSet<String>) {
    into.extend(from.iter().cloned());
}
