//! Accepted shapes for user-entered date and time strings.
//!
//! These are the gatekeeper patterns: a part string that matches is allowed
//! into the calendar parser (which may still reject it as impossible), one
//! that does not match is classified as malformed without any parsing.
//!
//! | Shape | Examples |
//! |-------|----------|
//! | American date, `/` `-` or `.` separated | `1/29/2000`, `02-01-1971`, `4.4.92` |
//! | ISO date | `2010-1-1`, `2010-01-01` |
//! | 12-hour time | `5:15pm`, `9:30 PM`, `12:00:30 am EST` |
//! | Military time | `17:15`, `0:30`, `23:59:59 UTC` |
//!
//! All patterns are anchored; partial matches never count. The separator of
//! an American date must be consistent, which is spelled out as one
//! alternation per separator because the regex engine has no backreferences.

use once_cell::sync::Lazy;
use regex::Regex;

/// American `M/D/Y` (2- or 4-digit year, `/` `-` or `.` separated) or ISO
/// `Y-M-D` with a 4-digit year. Month and day take 1 or 2 digits.
static VALID_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\d{1,2}/\d{1,2}/(\d{4}|\d{2})$
        |^\d{1,2}-\d{1,2}-(\d{4}|\d{2})$
        |^\d{1,2}\.\d{1,2}\.(\d{4}|\d{2})$
        |^\d{4}-\d{1,2}-\d{1,2}$
        ",
    )
    .expect("date pattern must compile")
});

/// 12-hour clock: hour 1-12, required minutes, optional seconds, optional
/// meridiem (any case, optionally space-separated), optional trailing zone
/// abbreviation of 3-5 uppercase letters.
pub(crate) static STANDARD_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<hour>1[0-2]|0?[1-9]):(?P<min>\d{2})(?::(?P<sec>\d{2}))?\s*(?P<meridiem>[AaPp][Mm])?\s*(?P<zone>[A-Z]{3,5})?$",
    )
    .expect("standard time pattern must compile")
});

/// Military clock: hour 0-23, required minutes, optional seconds, optional
/// trailing zone abbreviation, no meridiem.
pub(crate) static MILITARY_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<hour>[01]?\d|2[0-3]):(?P<min>\d{2})(?::(?P<sec>\d{2}))?\s*(?P<zone>[A-Z]{3,5})?$",
    )
    .expect("military time pattern must compile")
});

/// Whether a date string has one of the accepted calendar shapes.
pub fn is_valid_date(input: &str) -> bool {
    VALID_DATE.is_match(input)
}

/// Whether a time string has one of the accepted clock shapes.
///
/// A time is invalid only if it matches neither the 12-hour nor the
/// military form.
pub fn is_valid_time(input: &str) -> bool {
    STANDARD_TIME.is_match(input) || MILITARY_TIME.is_match(input)
}

/// Blank means absent, empty, or whitespace-only.
pub(crate) fn is_blank(part: Option<&str>) -> bool {
    part.is_none_or(|s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_american_dates_with_all_separators() {
        for date in ["1/29/2000", "01/02/2001", "02-01-1971", "01.02.2011", "4/4/92"] {
            assert!(is_valid_date(date), "{date} should match");
        }
    }

    #[test]
    fn accepts_iso_dates() {
        assert!(is_valid_date("2010-01-01"));
        assert!(is_valid_date("2010-1-1"));
    }

    #[test]
    fn rejects_malformed_dates() {
        for date in [
            "asdf",
            "1/2",
            "1/2/3/4",
            "1/29/20001",
            "2011-12-03T01:00:00Z",
            "1/29/2000 ",
            " 1/29/2000",
            "",
        ] {
            assert!(!is_valid_date(date), "{date:?} should not match");
        }
    }

    #[test]
    fn syntactically_valid_but_impossible_dates_still_match() {
        // The pattern is a shape check only; the parser rejects these later.
        assert!(is_valid_date("2/31/2015"));
        assert!(is_valid_date("19/19/1919"));
    }

    #[test]
    fn accepts_twelve_hour_times() {
        for time in [
            "5:15pm", "5:15 pm", "12:31pm", "9:30 PM", "12:00am", "1:30",
            "9:30 pm EST", "12:00:30 am", "11:59:59 PM UTC",
        ] {
            assert!(is_valid_time(time), "{time} should match");
        }
    }

    #[test]
    fn accepts_military_times() {
        for time in ["17:15", "0:30", "00:30", "23:59", "23:59:59", "13:45 CEST"] {
            assert!(is_valid_time(time), "{time} should match");
        }
    }

    #[test]
    fn rejects_malformed_times() {
        for time in ["asdf", "99:99pm", "24:00", "5", "5:1", "13:45 pm", " 5:15 pm"] {
            assert!(!is_valid_time(time), "{time:?} should not match");
        }
    }

    #[test]
    fn out_of_range_minutes_pass_the_shape_check() {
        // Two digits of minutes is a shape match; the parser rejects 99.
        assert!(is_valid_time("09:99pm"));
    }

    #[test]
    fn blank_classification() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("x")));
    }
}
