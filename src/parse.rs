//! Zone-aware parsing of the accepted date and time shapes.
//!
//! Everything here is internal. A [`ParseError`] never escapes the public
//! setter surface: the binder folds it into
//! [`DateTimeValue::Incomplete`](crate::DateTimeValue::Incomplete) and the
//! validator into the bad-format message.
//!
//! Parsing is split from the shape patterns on purpose. The patterns accept
//! anything that looks like a date or time; this module decides whether the
//! components name a real instant (`2/31/2015` has the right shape but no
//! such day exists).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use regex::Captures;
use thiserror::Error;

use crate::patterns::{MILITARY_TIME, STANDARD_TIME};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("not a recognized calendar date: {0:?}")]
    InvalidDate(String),

    #[error("no such calendar date: {0:?}")]
    ImpossibleDate(String),

    #[error("not a recognized clock time: {0:?}")]
    InvalidTime(String),

    #[error("no such clock time: {0:?}")]
    ImpossibleTime(String),

    #[error("wall-clock time skipped by a zone transition")]
    SkippedLocalTime,
}

/// Parse a calendar date in any accepted shape.
///
/// Two-digit years pivot at 69: `69..=99` land in the 1900s, `00..=68` in
/// the 2000s (the American-date convention).
pub(crate) fn parse_calendar_date(input: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDate(input.to_owned());
    let trimmed = input.trim();
    let separator = if trimmed.contains('/') {
        '/'
    } else if trimmed.contains('.') {
        '.'
    } else if trimmed.contains('-') {
        '-'
    } else {
        return Err(invalid());
    };

    let components: Vec<&str> = trimmed.split(separator).collect();
    if components.len() != 3 {
        return Err(invalid());
    }
    if components
        .iter()
        .any(|c| c.is_empty() || !c.chars().all(|ch| ch.is_ascii_digit()))
    {
        return Err(invalid());
    }

    // ISO order only when dash-separated and led by a 4-digit year.
    let (year_text, month_text, day_text) = if separator == '-' && components[0].len() == 4 {
        (components[0], components[1], components[2])
    } else {
        (components[2], components[0], components[1])
    };
    if month_text.len() > 2 || day_text.len() > 2 || year_text.len() > 4 {
        return Err(invalid());
    }

    let year = normalize_year(year_text);
    let month: u32 = month_text.parse().unwrap_or(0);
    let day: u32 = day_text.parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::ImpossibleDate(input.to_owned()))
}

/// Parse a clock time in either the 12-hour or the military shape.
///
/// A trailing zone abbreviation is accepted and ignored; the working zone
/// always wins.
pub(crate) fn parse_clock_time(input: &str) -> Result<NaiveTime, ParseError> {
    if let Some(caps) = STANDARD_TIME.captures(input) {
        let mut hour = capture_number(&caps, "hour");
        match caps.name("meridiem").map(|m| m.as_str().to_ascii_lowercase()) {
            Some(meridiem) if meridiem == "am" => {
                if hour == 12 {
                    hour = 0;
                }
            }
            Some(_) => {
                // pm
                if hour != 12 {
                    hour += 12;
                }
            }
            None => {}
        }
        return clock_from_captures(&caps, hour, input);
    }
    if let Some(caps) = MILITARY_TIME.captures(input) {
        let hour = capture_number(&caps, "hour");
        return clock_from_captures(&caps, hour, input);
    }
    Err(ParseError::InvalidTime(input.to_owned()))
}

/// Combine a date string and a time string into an instant in `zone`.
pub(crate) fn parse_date_time(
    date: &str,
    time: &str,
    zone: Tz,
) -> Result<DateTime<FixedOffset>, ParseError> {
    let date = parse_calendar_date(date)?;
    let time = parse_clock_time(time)?;
    resolve_local(date.and_time(time), zone)
}

/// A date string alone, read as local midnight in `zone`.
pub(crate) fn parse_date_at_midnight(
    date: &str,
    zone: Tz,
) -> Result<DateTime<FixedOffset>, ParseError> {
    let date = parse_calendar_date(date)?;
    resolve_local(date.and_time(NaiveTime::MIN), zone)
}

/// Strict round-trippable whole-string parse (RFC 3339 with offset),
/// converted into the working zone.
pub(crate) fn parse_rfc3339_in_zone(input: &str, zone: Tz) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(input.trim())
        .ok()
        .map(|dt| dt.with_timezone(&zone).fixed_offset())
}

/// Place a naive wall-clock datetime onto the zone's timeline.
///
/// An ambiguous wall time (fall-back fold) resolves to the earlier instant.
/// A skipped wall time (spring-forward gap) is a parse failure.
pub(crate) fn resolve_local(
    naive: NaiveDateTime,
    zone: Tz,
) -> Result<DateTime<FixedOffset>, ParseError> {
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or(ParseError::SkippedLocalTime)
}

fn normalize_year(text: &str) -> i32 {
    let year: i32 = text.parse().unwrap_or(0);
    if text.len() <= 2 {
        if year >= 69 {
            1900 + year
        } else {
            2000 + year
        }
    } else {
        year
    }
}

fn capture_number(caps: &Captures<'_>, name: &str) -> u32 {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn clock_from_captures(
    caps: &Captures<'_>,
    hour: u32,
    input: &str,
) -> Result<NaiveTime, ParseError> {
    let minute = capture_number(caps, "min");
    let second = capture_number(caps, "sec");
    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| ParseError::ImpossibleTime(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::US::Eastern;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn parses_american_dates() {
        assert_eq!(parse_calendar_date("1/29/2000"), Ok(date(2000, 1, 29)));
        assert_eq!(parse_calendar_date("02-01-1971"), Ok(date(1971, 2, 1)));
        assert_eq!(parse_calendar_date("01.02.2011"), Ok(date(2011, 1, 2)));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_calendar_date("2010-1-1"), Ok(date(2010, 1, 1)));
        assert_eq!(parse_calendar_date("2010-12-31"), Ok(date(2010, 12, 31)));
    }

    #[test]
    fn two_digit_years_pivot_at_69() {
        assert_eq!(parse_calendar_date("4/4/92"), Ok(date(1992, 4, 4)));
        assert_eq!(parse_calendar_date("4/4/69"), Ok(date(1969, 4, 4)));
        assert_eq!(parse_calendar_date("4/4/68"), Ok(date(2068, 4, 4)));
        assert_eq!(parse_calendar_date("4/4/00"), Ok(date(2000, 4, 4)));
    }

    #[test]
    fn impossible_dates_are_distinguished_from_malformed_ones() {
        assert_eq!(
            parse_calendar_date("2/31/2015"),
            Err(ParseError::ImpossibleDate("2/31/2015".to_owned()))
        );
        assert_eq!(
            parse_calendar_date("19/19/1919"),
            Err(ParseError::ImpossibleDate("19/19/1919".to_owned()))
        );
        assert_eq!(
            parse_calendar_date("asdf"),
            Err(ParseError::InvalidDate("asdf".to_owned()))
        );
        assert_eq!(
            parse_calendar_date("2011-12-03T01:00:00Z"),
            Err(ParseError::InvalidDate("2011-12-03T01:00:00Z".to_owned()))
        );
    }

    #[test]
    fn parses_twelve_hour_times() {
        assert_eq!(parse_clock_time("5:15pm"), Ok(time(17, 15, 0)));
        assert_eq!(parse_clock_time("12:31pm"), Ok(time(12, 31, 0)));
        assert_eq!(parse_clock_time("12:00am"), Ok(time(0, 0, 0)));
        assert_eq!(parse_clock_time("9:30 PM"), Ok(time(21, 30, 0)));
        assert_eq!(parse_clock_time("1:30"), Ok(time(1, 30, 0)));
        assert_eq!(parse_clock_time("12:00:30 am"), Ok(time(0, 0, 30)));
    }

    #[test]
    fn parses_military_times() {
        assert_eq!(parse_clock_time("17:15"), Ok(time(17, 15, 0)));
        assert_eq!(parse_clock_time("0:30"), Ok(time(0, 30, 0)));
        assert_eq!(parse_clock_time("23:59:59"), Ok(time(23, 59, 59)));
    }

    #[test]
    fn zone_abbreviations_are_ignored() {
        assert_eq!(parse_clock_time("9:30 pm EST"), Ok(time(21, 30, 0)));
        assert_eq!(parse_clock_time("13:45 CEST"), Ok(time(13, 45, 0)));
    }

    #[test]
    fn impossible_times_are_distinguished_from_malformed_ones() {
        assert_eq!(
            parse_clock_time("09:99pm"),
            Err(ParseError::ImpossibleTime("09:99pm".to_owned()))
        );
        assert_eq!(
            parse_clock_time("asdf"),
            Err(ParseError::InvalidTime("asdf".to_owned()))
        );
    }

    #[test]
    fn combines_date_and_time_in_the_working_zone() {
        let dt = parse_date_time("1/2/2000", "9:30 pm EST", Eastern).unwrap();
        let expected = Eastern
            .with_ymd_and_hms(2000, 1, 2, 21, 30, 0)
            .unwrap()
            .fixed_offset();
        assert_eq!(dt, expected);
    }

    #[test]
    fn date_alone_reads_as_local_midnight() {
        let dt = parse_date_at_midnight("01/01/2000", Eastern).unwrap();
        let expected = Eastern
            .with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
            .unwrap()
            .fixed_offset();
        assert_eq!(dt, expected);
    }

    #[test]
    fn rfc3339_converts_into_the_working_zone() {
        let dt = parse_rfc3339_in_zone("2011-12-03T01:00:00Z", Eastern).unwrap();
        let expected = Eastern
            .with_ymd_and_hms(2011, 12, 2, 20, 0, 0)
            .unwrap()
            .fixed_offset();
        assert_eq!(dt, expected);
        assert!(parse_rfc3339_in_zone("2011-12-03", Eastern).is_none());
        assert!(parse_rfc3339_in_zone("01/01/2000 12:30 pm", Eastern).is_none());
    }

    #[test]
    fn skipped_wall_times_fail_and_folds_take_the_earlier_instant() {
        // 2:30 am on 2015-03-08 does not exist in US/Eastern.
        assert_eq!(
            parse_date_time("3/8/2015", "2:30", Eastern),
            Err(ParseError::SkippedLocalTime)
        );
        // 1:30 am on 2015-11-01 happens twice; the EDT reading wins.
        let folded = parse_date_time("11/1/2015", "1:30", Eastern).unwrap();
        assert_eq!(folded.offset().local_minus_utc(), -4 * 3600);
    }
}
