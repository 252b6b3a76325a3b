//! The three-state attribute value.
//!
//! A form-bound timestamp attribute is not a plain optional: between "empty"
//! and "fully determined" sits the state where the user has typed something
//! that does not (yet) resolve to a real instant. That state is modeled
//! explicitly as [`DateTimeValue::Incomplete`] rather than folded into a
//! nullable slot with a magic sentinel.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Value of a bound timestamp attribute.
///
/// `Present` carries the instant together with the working zone's UTC offset
/// at that instant, so wall-clock rendering needs no further zone lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DateTimeValue {
    /// A fully determined instant.
    Present(DateTime<FixedOffset>),

    /// Nothing entered; both part strings are blank or absent.
    Empty,

    /// Partial or malformed input that does not resolve to an instant.
    Incomplete,
}

impl DateTimeValue {
    /// True if the attribute holds a concrete instant.
    pub fn is_present(&self) -> bool {
        matches!(self, DateTimeValue::Present(_))
    }

    /// True if nothing has been entered.
    pub fn is_empty(&self) -> bool {
        matches!(self, DateTimeValue::Empty)
    }

    /// True if the input did not resolve to an instant.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, DateTimeValue::Incomplete)
    }

    /// The instant, if fully determined.
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            DateTimeValue::Present(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl Default for DateTimeValue {
    fn default() -> Self {
        DateTimeValue::Empty
    }
}
