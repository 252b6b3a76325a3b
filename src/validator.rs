//! Format validation for a bound attribute.
//!
//! The validator reads the two part strings through the binding's
//! accessors, never the raw attribute, and reports at most one user-facing
//! message per pass. It is deliberately decoupled from whether the binder
//! managed to combine the parts; the binder decides what is stored, the
//! validator decides what the user is told.
//!
//! Message precedence:
//!
//! 1. Both parts blank: nothing (not required) or the combined
//!    "enter a date and time" message (required).
//! 2. Either present part failing its shape pattern: the canonical
//!    bad-format message, regardless of which part was bad.
//! 3. A blank part next to a shape-valid one: the blank-part message,
//!    overridable through the sink's message lookup.
//! 4. Shape-valid parts naming an impossible date or time: the canonical
//!    bad-format message.

use chrono::{NaiveDate, NaiveDateTime};

use crate::binder::SplitDateTime;
use crate::config::FormatConfig;
use crate::parse;
use crate::patterns;
use crate::store::AttributeStore;

const BLANK_DATE_MESSAGE: &str = "Please enter a date.";
const BLANK_TIME_MESSAGE: &str = "Please enter a time.";

/// Where validation messages go.
///
/// `lookup_message` is the override point for translation tables: it is
/// called with a synthetic field key (`"<attribute>_date_part"` or
/// `"<attribute>_time_part"`) and falls back to the built-in default.
pub trait ErrorSink {
    /// Record a message against an attribute.
    fn add(&mut self, attribute: &str, message: &str);

    /// Resolve a message by key, defaulting when no override exists.
    fn lookup_message(&self, key: &str, default: &str) -> String {
        let _ = key;
        default.to_owned()
    }
}

/// Simple [`ErrorSink`] collecting messages in memory.
#[derive(Debug, Clone, Default)]
pub struct ErrorList {
    entries: Vec<(String, String)>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Messages recorded against one attribute, in insertion order.
    pub fn messages_for(&self, attribute: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(name, _)| name == attribute)
            .map(|(_, message)| message.as_str())
            .collect()
    }
}

impl ErrorSink for ErrorList {
    fn add(&mut self, attribute: &str, message: &str) {
        self.entries.push((attribute.to_owned(), message.to_owned()));
    }
}

/// Validates the part strings of one bound attribute.
#[derive(Debug, Clone)]
pub struct DateTimeFormatValidator {
    record_type: String,
    required: bool,
}

impl DateTimeFormatValidator {
    /// A validator for records described as `record_type` in the combined
    /// blank message ("Please enter a date and time for the event.").
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            required: true,
        }
    }

    /// Whether a fully blank attribute is an error. Defaults to true.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Run one validation pass, adding at most one message to `errors`.
    pub fn validate<S: AttributeStore, E: ErrorSink>(
        &self,
        binding: &SplitDateTime,
        store: &S,
        errors: &mut E,
    ) {
        let attribute = binding.attribute();
        let date = binding.date_part(store);
        let time = binding.time_part(store);
        let date_blank = patterns::is_blank(date.as_deref());
        let time_blank = patterns::is_blank(time.as_deref());

        if date_blank && time_blank {
            if self.required {
                let message =
                    format!("Please enter a date and time for the {}.", self.record_type);
                errors.add(attribute, &message);
            }
            return;
        }

        // Only present parts are classified; a blank part is handled below.
        let date_invalid = !date_blank && !patterns::is_valid_date(date.as_deref().unwrap_or(""));
        let time_invalid = !time_blank && !patterns::is_valid_time(time.as_deref().unwrap_or(""));
        if date_invalid || time_invalid {
            errors.add(attribute, &Self::invalid_format_message(binding.config()));
            return;
        }

        if date_blank {
            let key = format!("{attribute}_date_part");
            let message = errors.lookup_message(&key, BLANK_DATE_MESSAGE);
            errors.add(attribute, &message);
            return;
        }
        if time_blank {
            let key = format!("{attribute}_time_part");
            let message = errors.lookup_message(&key, BLANK_TIME_MESSAGE);
            errors.add(attribute, &message);
            return;
        }

        let date = date.unwrap_or_default();
        let time = time.unwrap_or_default();
        let parses = parse::parse_calendar_date(&date).is_ok()
            && parse::parse_date_time(&date, &time, binding.zone()).is_ok()
            && parse::parse_clock_time(&time).is_ok();
        if !parses {
            errors.add(attribute, &Self::invalid_format_message(binding.config()));
        }
    }

    /// The canonical bad-format message under the given configuration.
    ///
    /// Built by rendering a fixed reference instant (January 29 2000,
    /// 5:15 PM) through the configured output formats, so the message
    /// tracks format configuration live. Public so hosts can show the
    /// expected formats outside a failed validation.
    pub fn invalid_format_message(config: &FormatConfig) -> String {
        let reference = reference_instant();
        format!(
            "Please enter a valid date and time using the following formats: {}, {}",
            reference.format(config.date_format()),
            reference.format(config.time_format()),
        )
    }
}

fn reference_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 29)
        .and_then(|date| date.and_hms_opt(17, 15, 0))
        .unwrap_or_default()
}
