//! Output format configuration.
//!
//! Formats control how a stored instant is rendered back into the two part
//! strings and how the validator's canonical bad-format message is built.
//! They never affect which input shapes are accepted.
//!
//! Configuration is an explicit object handed to each binding at
//! construction, not ambient process state. The usual pattern is to build
//! one `FormatConfig` at application startup and clone it into every
//! binding.
//!
//! | Setting | Default | Rendered example |
//! |---------|---------|------------------|
//! | `date_format` | `%-m/%-d/%Y` | `1/29/2000` |
//! | `time_format` | `%-I:%M %P` | `5:15 pm` |
//! | `date_string_formatter` | none | |

use std::fmt;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};

use crate::error::{Error, Result};

/// Short numeric date, no zero padding.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// 12-hour clock with a lowercase meridiem marker.
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M %P";

/// Hook applied to a raw date string before parsing, for integrators that
/// want to normalize shorthand input (say, expanding two-digit years their
/// own way). It never changes what the part accessors return.
pub type DateStringFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Date/time output formats plus the optional date-string formatter hook.
#[derive(Clone)]
pub struct FormatConfig {
    date_format: String,
    time_format: String,
    date_string_formatter: Option<DateStringFormatter>,
}

impl FormatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the date output format.
    ///
    /// The format string is checked eagerly; a specifier chrono cannot
    /// render is a configuration error here rather than a panic at render
    /// time.
    pub fn with_date_format(mut self, format: &str) -> Result<Self> {
        validate_format(format)?;
        self.date_format = format.to_owned();
        Ok(self)
    }

    /// Replace the time output format. Checked eagerly, like
    /// [`with_date_format`](Self::with_date_format).
    pub fn with_time_format(mut self, format: &str) -> Result<Self> {
        validate_format(format)?;
        self.time_format = format.to_owned();
        Ok(self)
    }

    /// Install a date-string formatter hook.
    ///
    /// A hook that panics is not guarded; that signals integrator
    /// misconfiguration, not bad user input.
    pub fn with_date_string_formatter(
        mut self,
        formatter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.date_string_formatter = Some(Arc::new(formatter));
        self
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Run the formatter hook over a raw date string, if one is installed.
    pub(crate) fn apply_date_formatter(&self, raw: &str) -> String {
        match &self.date_string_formatter {
            Some(formatter) => formatter(raw),
            None => raw.to_owned(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            time_format: DEFAULT_TIME_FORMAT.to_owned(),
            date_string_formatter: None,
        }
    }
}

impl fmt::Debug for FormatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatConfig")
            .field("date_format", &self.date_format)
            .field("time_format", &self.time_format)
            .field(
                "date_string_formatter",
                &self.date_string_formatter.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

fn validate_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidFormatString(format.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 29)
            .and_then(|d| d.and_hms_opt(17, 15, 0))
            .unwrap()
    }

    #[test]
    fn default_formats_render_the_reference_instant() {
        let config = FormatConfig::default();
        let rendered = reference().format(config.date_format()).to_string();
        assert_eq!(rendered, "1/29/2000");
        let rendered = reference().format(config.time_format()).to_string();
        assert_eq!(rendered, "5:15 pm");
    }

    #[test]
    fn custom_formats_are_accepted() {
        let config = FormatConfig::new()
            .with_date_format("%-m-%-e-%y")
            .unwrap()
            .with_time_format("%H%M hours")
            .unwrap();
        assert_eq!(reference().format(config.date_format()).to_string(), "1-29-00");
        assert_eq!(reference().format(config.time_format()).to_string(), "1715 hours");
    }

    #[test]
    fn invalid_format_strings_are_rejected_eagerly() {
        let result = FormatConfig::new().with_date_format("%J");
        assert!(matches!(result, Err(Error::InvalidFormatString(_))));
    }

    #[test]
    fn formatter_hook_rewrites_raw_dates() {
        let config =
            FormatConfig::new().with_date_string_formatter(|_| "12/31/1995".to_owned());
        assert_eq!(config.apply_date_formatter("1/12/15"), "12/31/1995");
    }

    #[test]
    fn without_hook_the_raw_date_passes_through() {
        let config = FormatConfig::default();
        assert_eq!(config.apply_date_formatter("1/12/15"), "1/12/15");
    }
}
