//! Past/upcoming classification of shows and start-time formatting.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::{AppError, Result};

/// Canonical format used when a start time is written to the store.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used on venue and artist detail pages.
pub const DETAIL_FORMAT: &str = "%m/%d/%Y, %H:%M";

const ACCEPTED_FORMATS: [&str; 4] = [
    STORAGE_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Source of the reference instant shows are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceClock {
    PerRequest,
    Fixed(NaiveDateTime),
}

impl ReferenceClock {
    pub fn fixed_at_startup() -> Self {
        Self::Fixed(Local::now().naive_local())
    }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            Self::PerRequest => Local::now().naive_local(),
            Self::Fixed(instant) => *instant,
        }
    }
}

/// Parse a start time in any of the accepted textual forms.
///
/// RFC 3339 values are converted to local wall-clock time so they compare
/// against the same clock as [`ReferenceClock::now`].
pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Like [`parse_start_time`], but a stored value that fails to parse is an
/// internal error rather than a user mistake.
pub fn parse_stored_start_time(raw: &str) -> Result<NaiveDateTime> {
    parse_start_time(raw)
        .ok_or_else(|| AppError::Internal(format!("Unparseable show start time: {raw:?}")))
}

pub fn to_storage(start: NaiveDateTime) -> String {
    start.format(STORAGE_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// `EE MM, dd, y h:mma`, e.g. `Tue 05, 21, 2019 9:30PM`
    Medium,
    /// `EEEE MMMM, d, y 'at' h:mma`, e.g. `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

pub fn format_start_time(start: NaiveDateTime, format: DisplayFormat) -> String {
    let pattern = match format {
        DisplayFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        DisplayFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
    };
    start.format(pattern).to_string()
}

pub fn format_for_detail(start: NaiveDateTime) -> String {
    start.format(DETAIL_FORMAT).to_string()
}

/// Shows split around a reference instant, input order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowSplit<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> ShowSplit<T> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// A show that starts exactly at `now` counts as past.
pub fn is_past(start: NaiveDateTime, now: NaiveDateTime) -> bool {
    start <= now
}

pub fn split_shows<T, F>(shows: Vec<T>, now: NaiveDateTime, start_of: F) -> ShowSplit<T>
where
    F: Fn(&T) -> NaiveDateTime,
{
    let (past, upcoming) = shows
        .into_iter()
        .partition(|show| is_past(start_of(show), now));
    ShowSplit { past, upcoming }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parses_storage_and_form_formats() {
        let expected = at(2019, 5, 21, 21, 30);
        assert_eq!(parse_start_time("2019-05-21 21:30:00"), Some(expected));
        assert_eq!(parse_start_time("2019-05-21T21:30:00"), Some(expected));
        assert_eq!(parse_start_time("2019-05-21 21:30"), Some(expected));
        assert_eq!(parse_start_time("  2019-05-21T21:30 "), Some(expected));
        assert_eq!(parse_start_time("tomorrow night"), None);
        assert_eq!(parse_start_time(""), None);
    }

    #[test]
    fn rfc3339_is_accepted() {
        assert!(parse_start_time("2035-04-01T20:00:00.000Z").is_some());
    }

    #[test]
    fn show_at_reference_instant_is_past() {
        let now = at(2024, 1, 1, 20, 0);
        assert!(is_past(now, now));
        assert!(!is_past(at(2024, 1, 1, 20, 1), now));
    }

    #[test]
    fn split_keeps_relative_order() {
        let now = at(2024, 6, 1, 12, 0);
        let shows = vec![
            ("a", at(2025, 1, 1, 0, 0)),
            ("b", at(2023, 1, 1, 0, 0)),
            ("c", now),
            ("d", at(2024, 7, 1, 0, 0)),
            ("e", at(2020, 1, 1, 0, 0)),
        ];

        let split = split_shows(shows, now, |(_, start)| *start);

        let past: Vec<_> = split.past.iter().map(|(name, _)| *name).collect();
        let upcoming: Vec<_> = split.upcoming.iter().map(|(name, _)| *name).collect();
        assert_eq!(past, vec!["b", "c", "e"]);
        assert_eq!(upcoming, vec!["a", "d"]);
        assert_eq!(split.past_count(), 3);
        assert_eq!(split.upcoming_count(), 2);
    }

    #[test]
    fn formats_for_display() {
        let start = at(2019, 5, 21, 21, 30);
        assert_eq!(format_for_detail(start), "05/21/2019, 21:30");
        assert_eq!(
            format_start_time(start, DisplayFormat::Medium),
            "Tue 05, 21, 2019 9:30PM"
        );
        assert_eq!(
            format_start_time(start, DisplayFormat::Full),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
        assert_eq!(to_storage(start), "2019-05-21 21:30:00");
    }

    #[test]
    fn fixed_clock_does_not_drift() {
        let instant = at(2024, 1, 1, 0, 0);
        let clock = ReferenceClock::Fixed(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }
}
