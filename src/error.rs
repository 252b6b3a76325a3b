use thiserror::Error;

/// Errors from the fallible configuration surface.
///
/// User input never produces an `Error`; malformed input resolves to
/// [`DateTimeValue::Incomplete`](crate::DateTimeValue::Incomplete) or a
/// validation message instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A date or time output format chrono cannot render.
    #[error("invalid strftime format string: {0:?}")]
    InvalidFormatString(String),
}

pub type Result<T> = std::result::Result<T, Error>;
