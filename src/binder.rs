//! The split-field binding.
//!
//! [`SplitDateTime`] binds one timestamp attribute on a host record and
//! exposes it as two independently editable strings, a date part and a time
//! part. Every part setter re-runs the combination rule, so the attribute
//! value and the part caches are consistent the moment a setter returns:
//!
//! 1. Both parts match their shape patterns: parse `"date time"` in the
//!    working zone. Success writes `Present`, an impossible calendar
//!    combination writes `Incomplete`.
//! 2. Both parts blank or absent: writes `Empty`.
//! 3. Anything else: writes `Incomplete`.
//!
//! Setters never fail and never panic on user text. Arbitrary input from a
//! form always lands in one of the three states.
//!
//! The binding is generic over [`AttributeStore`] in the same way the rest
//! of the crate avoids committing to a host record shape: production
//! records delegate, tests run against [`ShadowStore`](crate::ShadowStore),
//! and a record without backing storage is handled by an instance-local
//! shadow slot chosen at bind time.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::config::FormatConfig;
use crate::parse;
use crate::patterns;
use crate::store::AttributeStore;
use crate::value::DateTimeValue;

/// Whole-value input accepted by [`SplitDateTime::set`].
#[derive(Debug, Clone)]
pub enum DateTimeInput {
    /// A native instant; converted into the working zone.
    DateTime(DateTime<FixedOffset>),

    /// A date-only value; read as local midnight in the working zone.
    Date(NaiveDate),

    /// Raw text, resolved per the whole-value rules (strict round-trippable
    /// parse, then date-only, then the split-and-delegate path).
    Text(String),

    /// Clears the attribute.
    None,
}

impl From<DateTime<FixedOffset>> for DateTimeInput {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        DateTimeInput::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for DateTimeInput {
    fn from(dt: DateTime<Utc>) -> Self {
        DateTimeInput::DateTime(dt.fixed_offset())
    }
}

impl From<DateTime<Tz>> for DateTimeInput {
    fn from(dt: DateTime<Tz>) -> Self {
        DateTimeInput::DateTime(dt.fixed_offset())
    }
}

impl From<NaiveDate> for DateTimeInput {
    fn from(date: NaiveDate) -> Self {
        DateTimeInput::Date(date)
    }
}

impl From<&str> for DateTimeInput {
    fn from(text: &str) -> Self {
        DateTimeInput::Text(text.to_owned())
    }
}

impl From<String> for DateTimeInput {
    fn from(text: String) -> Self {
        DateTimeInput::Text(text)
    }
}

impl<T: Into<DateTimeInput>> From<Option<T>> for DateTimeInput {
    fn from(input: Option<T>) -> Self {
        match input {
            Some(value) => value.into(),
            None => DateTimeInput::None,
        }
    }
}

/// Cache state of one part string.
///
/// `Raw` and `Cleared` mean the caller has set the part explicitly since
/// the attribute was last fully determined; accessors return that verbatim.
/// `Unset` means accessors derive the string from the attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PartCache {
    Unset,
    Cleared,
    Raw(String),
}

impl From<Option<&str>> for PartCache {
    fn from(input: Option<&str>) -> Self {
        match input {
            Some(raw) => PartCache::Raw(raw.to_owned()),
            None => PartCache::Cleared,
        }
    }
}

/// Where the attribute value lives, decided once at bind time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageStrategy {
    /// The host record has backing storage; read and write through it.
    Delegate,

    /// The host has none; keep the value in the binding's shadow slot.
    Shadow,
}

/// A timestamp attribute bound to a date-part/time-part accessor pair.
#[derive(Debug, Clone)]
pub struct SplitDateTime {
    attribute: String,
    zone: Tz,
    config: FormatConfig,
    date_part: PartCache,
    time_part: PartCache,
    strategy: StorageStrategy,
    shadow: DateTimeValue,
}

impl SplitDateTime {
    /// Bind `attribute` on the given host record.
    ///
    /// The store's [`has_attribute`](AttributeStore::has_attribute)
    /// capability is checked here, once; records without backing storage
    /// get an instance-local shadow slot.
    pub fn bind<S: AttributeStore>(
        attribute: impl Into<String>,
        store: &S,
        zone: Tz,
        config: FormatConfig,
    ) -> Self {
        let attribute = attribute.into();
        let strategy = if store.has_attribute(&attribute) {
            StorageStrategy::Delegate
        } else {
            StorageStrategy::Shadow
        };
        Self {
            attribute,
            zone,
            config,
            date_part: PartCache::Unset,
            time_part: PartCache::Unset,
            strategy,
            shadow: DateTimeValue::Empty,
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Current value of the bound attribute.
    pub fn value<S: AttributeStore>(&self, store: &S) -> DateTimeValue {
        match self.strategy {
            StorageStrategy::Delegate => store.read_attribute(&self.attribute),
            StorageStrategy::Shadow => self.shadow.clone(),
        }
    }

    /// Set the whole value at once.
    ///
    /// Native inputs write directly and reset both part caches, so
    /// subsequent part reads re-derive from the attribute. Text goes
    /// through the strict whole-string parse, then the date-only parse,
    /// and otherwise splits on the first run of whitespace into the two
    /// part setters.
    pub fn set<S: AttributeStore>(&mut self, store: &mut S, input: impl Into<DateTimeInput>) {
        match input.into() {
            DateTimeInput::DateTime(dt) => {
                self.reset_parts();
                let localized = dt.with_timezone(&self.zone).fixed_offset();
                self.write(store, DateTimeValue::Present(localized));
            }
            DateTimeInput::Date(date) => {
                self.reset_parts();
                let value = parse::resolve_local(date.and_time(NaiveTime::MIN), self.zone)
                    .map(DateTimeValue::Present)
                    .unwrap_or(DateTimeValue::Incomplete);
                self.write(store, value);
            }
            DateTimeInput::None => {
                self.reset_parts();
                self.write(store, DateTimeValue::Empty);
            }
            DateTimeInput::Text(text) => self.set_text(store, &text),
        }
    }

    /// Cache the raw date string verbatim and re-run the combination rule.
    pub fn set_date_part<S: AttributeStore>(&mut self, store: &mut S, input: Option<&str>) {
        self.date_part = PartCache::from(input);
        let date = input.map(str::to_owned);
        let time = self.time_part(store);
        let value = self.combined_value(date.as_deref(), time.as_deref());
        self.write(store, value);
    }

    /// Cache the raw time string verbatim and re-run the combination rule.
    pub fn set_time_part<S: AttributeStore>(&mut self, store: &mut S, input: Option<&str>) {
        self.time_part = PartCache::from(input);
        let time = input.map(str::to_owned);
        let date = self.date_part(store);
        let value = self.combined_value(date.as_deref(), time.as_deref());
        self.write(store, value);
    }

    /// The date part: the explicitly set raw string if there is one,
    /// otherwise a string derived from the attribute with the configured
    /// date format (none when the attribute is empty or incomplete).
    pub fn date_part<S: AttributeStore>(&self, store: &S) -> Option<String> {
        match &self.date_part {
            PartCache::Raw(raw) => Some(raw.clone()),
            PartCache::Cleared => None,
            PartCache::Unset => self.render(store, self.config.date_format()),
        }
    }

    /// The time part, symmetric with [`date_part`](Self::date_part).
    pub fn time_part<S: AttributeStore>(&self, store: &S) -> Option<String> {
        match &self.time_part {
            PartCache::Raw(raw) => Some(raw.clone()),
            PartCache::Cleared => None,
            PartCache::Unset => self.render(store, self.config.time_format()),
        }
    }

    fn set_text<S: AttributeStore>(&mut self, store: &mut S, input: &str) {
        if let Some(dt) = parse::parse_rfc3339_in_zone(input, self.zone) {
            self.reset_parts();
            self.write(store, DateTimeValue::Present(dt));
            return;
        }

        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.set_date_part(store, None);
            self.set_time_part(store, None);
            return;
        }

        let (date_token, remainder) = match trimmed.split_once(char::is_whitespace) {
            Some((date, rest)) => (date, Some(rest.trim_start())),
            None => (trimmed, None),
        };

        if remainder.is_none() {
            let candidate = self.config.apply_date_formatter(date_token);
            if let Ok(dt) = parse::parse_date_at_midnight(&candidate, self.zone) {
                self.reset_parts();
                self.write(store, DateTimeValue::Present(dt));
                return;
            }
        }

        self.set_date_part(store, Some(date_token));
        self.set_time_part(store, remainder);
    }

    fn combined_value(&self, date: Option<&str>, time: Option<&str>) -> DateTimeValue {
        match (date, time) {
            (Some(date), Some(time))
                if patterns::is_valid_date(date) && patterns::is_valid_time(time) =>
            {
                let candidate = self.config.apply_date_formatter(date);
                match parse::parse_date_time(&candidate, time, self.zone) {
                    Ok(dt) => DateTimeValue::Present(dt),
                    Err(_) => DateTimeValue::Incomplete,
                }
            }
            _ if patterns::is_blank(date) && patterns::is_blank(time) => DateTimeValue::Empty,
            _ => DateTimeValue::Incomplete,
        }
    }

    fn render<S: AttributeStore>(&self, store: &S, format: &str) -> Option<String> {
        match self.value(store) {
            DateTimeValue::Present(dt) => Some(dt.format(format).to_string()),
            _ => None,
        }
    }

    fn reset_parts(&mut self) {
        self.date_part = PartCache::Unset;
        self.time_part = PartCache::Unset;
    }

    fn write<S: AttributeStore>(&mut self, store: &mut S, value: DateTimeValue) {
        match self.strategy {
            StorageStrategy::Delegate => store.write_attribute(&self.attribute, value),
            StorageStrategy::Shadow => self.shadow = value,
        }
    }
}
