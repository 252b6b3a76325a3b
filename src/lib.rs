//! # multipart-datetime
//!
//! Split-field date/time input handling for form-backed records. An
//! attribute stored as a single timestamp is exposed to user interfaces as
//! two independently editable strings, a date part and a time part, which
//! are parsed, combined, and validated against human-entered formats
//! ("1/29/2000", "5:15pm").
//!
//! ## The two components
//!
//! ```text
//! user input ──▶ SplitDateTime (binder) ──▶ AttributeStore (host record)
//!                     │  part setters run the combination rule:
//!                     │  Present(instant) / Empty / Incomplete
//!                     │
//!                     ▼  part accessors
//!               DateTimeFormatValidator ──▶ ErrorSink (host errors)
//! ```
//!
//! - [`SplitDateTime`] owns the combination state machine. Each part setter
//!   caches the raw string verbatim and recomputes the attribute: a valid
//!   pair becomes a [`DateTimeValue::Present`] instant in the working zone,
//!   a blank pair becomes [`DateTimeValue::Empty`], anything else becomes
//!   [`DateTimeValue::Incomplete`]. No string input ever errors or panics.
//! - [`DateTimeFormatValidator`] independently classifies the same two
//!   strings and reports at most one user-facing message per pass through
//!   the host's [`ErrorSink`].
//!
//! The host record system stays behind two small traits:
//! [`AttributeStore`] for attribute storage (with a bind-time capability
//! check and a shadow fallback for storageless records) and [`ErrorSink`]
//! for error collection with overridable message lookup.
//!
//! ## Example
//!
//! ```
//! use multipart_datetime::{
//!     DateTimeFormatValidator, ErrorList, FormatConfig, ShadowStore, SplitDateTime,
//! };
//!
//! let mut record = ShadowStore::new();
//! let mut due_at = SplitDateTime::bind(
//!     "due_at",
//!     &record,
//!     chrono_tz::US::Eastern,
//!     FormatConfig::default(),
//! );
//!
//! due_at.set_date_part(&mut record, Some("1/29/2000"));
//! due_at.set_time_part(&mut record, Some("5:15pm"));
//! assert!(due_at.value(&record).is_present());
//!
//! let mut errors = ErrorList::new();
//! DateTimeFormatValidator::new("meeting").validate(&due_at, &record, &mut errors);
//! assert!(errors.is_empty());
//! ```
//!
//! ## What this crate is not
//!
//! Not a general calendar or timezone library and not a freeform date
//! parser; the accepted shapes are fixed (see [`patterns`]), and zone
//! arithmetic is delegated to chrono-tz via the working zone handed to
//! [`SplitDateTime::bind`].

pub mod binder;
pub mod config;
pub mod error;
mod parse;
pub mod patterns;
pub mod store;
pub mod validator;
pub mod value;

pub use binder::{DateTimeInput, SplitDateTime};
pub use config::{FormatConfig, DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT};
pub use error::{Error, Result};
pub use store::{AttributeStore, ShadowStore};
pub use validator::{DateTimeFormatValidator, ErrorList, ErrorSink};
pub use value::DateTimeValue;
