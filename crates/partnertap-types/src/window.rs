//! Calendar-day extraction windows.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::{Result, TapError};

/// Format of a day marker, e.g. `2022-03-01`.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Format of a window boundary timestamp, e.g. `2022-03-01T00:00:00.000000Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Source of the current UTC calendar day.
pub type Clock = fn() -> NaiveDate;

/// Reads the current UTC calendar day from the system clock.
#[must_use]
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parses a start date.
///
/// Accepts `YYYY-MM-DD` as well as an RFC 3339 timestamp (the form Singer
/// bookmarks are usually written in), in which case the UTC calendar day of
/// the timestamp is used.
///
/// # Errors
///
/// Returns [`TapError::Config`] if the input is empty and
/// [`TapError::DateParse`] if it is malformed.
pub fn parse_start_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TapError::Config(
            "The parameter start_date is required".to_string(),
        ));
    }

    match NaiveDate::parse_from_str(trimmed, DAY_FORMAT) {
        Ok(date) => Ok(date),
        Err(source) => DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.with_timezone(&Utc).date_naive())
            .map_err(|_| TapError::DateParse {
                input: trimmed.to_string(),
                source,
            }),
    }
}

/// A single UTC calendar day bounding one API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtractionWindow {
    date: NaiveDate,
}

impl ExtractionWindow {
    /// Creates the window covering `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Returns the calendar day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the day marker in `YYYY-MM-DD` form.
    #[must_use]
    pub fn day(&self) -> String {
        self.date.format(DAY_FORMAT).to_string()
    }

    /// Returns the first instant of the day (00:00:00.000000 UTC).
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.date.and_time(NaiveTime::MIN))
    }

    /// Returns the last instant of the day (23:59:59.999999 UTC).
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.start() + TimeDelta::days(1) - TimeDelta::microseconds(1)
    }

    /// Returns the start boundary encoded for the query.
    #[must_use]
    pub fn start_timestamp(&self) -> String {
        self.start().format(TIMESTAMP_FORMAT).to_string()
    }

    /// Returns the end boundary encoded for the query.
    #[must_use]
    pub fn end_timestamp(&self) -> String {
        self.end().format(TIMESTAMP_FORMAT).to_string()
    }
}

impl std::fmt::Display for ExtractionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.date.format(DAY_FORMAT))
    }
}

/// Iterator over every day from a start date through an end date, inclusive.
///
/// Yields nothing when the start is after the end.
#[derive(Debug, Clone)]
pub struct DayWindows {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DayWindows {
    /// Creates an iterator over `start..=end`.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: Some(start),
            end,
        }
    }

    /// Creates an iterator from `start` through the current UTC day.
    ///
    /// The current day is read once, here.
    #[must_use]
    pub fn until_now(start: NaiveDate) -> Self {
        Self::until(start, utc_today)
    }

    /// Creates an iterator from `start` through the day reported by `clock`.
    ///
    /// The clock is read once, here.
    #[must_use]
    pub fn until(start: NaiveDate, clock: Clock) -> Self {
        Self::new(start, clock())
    }

    /// Parses `start_date` and iterates from it through the current UTC day.
    ///
    /// # Errors
    ///
    /// Returns an error if the start date is empty or malformed.
    pub fn from_start_date(start_date: &str) -> Result<Self> {
        parse_start_date(start_date).map(Self::until_now)
    }

    /// Returns the last day (inclusive) of the sequence.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the last window still to be yielded, if any.
    #[must_use]
    pub fn final_window(&self) -> Option<ExtractionWindow> {
        self.pending().map(|_| ExtractionWindow::new(self.end))
    }

    fn pending(&self) -> Option<NaiveDate> {
        self.next.filter(|date| *date <= self.end)
    }
}

impl Iterator for DayWindows {
    type Item = ExtractionWindow;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.pending()?;
        self.next = date.succ_opt();
        Some(ExtractionWindow::new(date))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let days = self
            .pending()
            .map_or(0, |date| (self.end - date).num_days() as usize + 1);
        (days, Some(days))
    }
}

impl ExactSizeIterator for DayWindows {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_start_date() {
        assert_eq!(parse_start_date("2022-03-01").unwrap(), date(2022, 3, 1));
        assert_eq!(parse_start_date(" 2022-03-01 ").unwrap(), date(2022, 3, 1));
    }

    #[test]
    fn test_parse_start_date_rfc3339() {
        assert_eq!(
            parse_start_date("2022-03-01T23:30:00Z").unwrap(),
            date(2022, 3, 1)
        );
        // Offsets are folded into UTC before taking the day
        assert_eq!(
            parse_start_date("2022-03-01T23:30:00-02:00").unwrap(),
            date(2022, 3, 2)
        );
    }

    #[test]
    fn test_parse_start_date_empty() {
        assert!(matches!(parse_start_date(""), Err(TapError::Config(_))));
        assert!(matches!(parse_start_date("   "), Err(TapError::Config(_))));
    }

    #[test]
    fn test_parse_start_date_malformed() {
        for input in ["2022-13-01", "2022-02-30", "yesterday", "2022/03/01"] {
            assert!(
                matches!(parse_start_date(input), Err(TapError::DateParse { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_window_boundaries() {
        let window = ExtractionWindow::new(date(2022, 3, 1));
        assert_eq!(window.day(), "2022-03-01");
        assert_eq!(window.start_timestamp(), "2022-03-01T00:00:00.000000Z");
        assert_eq!(window.end_timestamp(), "2022-03-01T23:59:59.999999Z");
        assert_eq!(window.to_string(), "2022-03-01");
    }

    #[test]
    fn test_fixed_range() {
        let days: Vec<String> = DayWindows::new(date(2024, 2, 27), date(2024, 3, 1))
            .map(|w| w.day())
            .collect();
        assert_eq!(
            days,
            ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]
        );
    }

    #[test]
    fn test_until_now_count() {
        let today = Utc::now().date_naive();
        let start = today - TimeDelta::days(40);
        let windows = DayWindows::until_now(start);
        assert_eq!(windows.len(), 41);

        let days: Vec<String> = windows.map(|w| w.day()).collect();
        assert_eq!(days.len(), 41);
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(days.iter().all(|d| d.len() == 10));
        assert_eq!(days.last().unwrap(), &today.format(DAY_FORMAT).to_string());
    }

    #[test]
    fn test_today_only() {
        let today = Utc::now().date_naive();
        assert_eq!(DayWindows::until_now(today).count(), 1);
    }

    #[test]
    fn test_future_start_is_empty() {
        let tomorrow = Utc::now().date_naive() + TimeDelta::days(1);
        let mut windows = DayWindows::until_now(tomorrow);
        assert_eq!(windows.len(), 0);
        assert!(windows.next().is_none());
    }

    #[test]
    fn test_final_window() {
        let mut windows = DayWindows::new(date(2024, 1, 1), date(2024, 1, 2));
        assert_eq!(windows.final_window(), Some(ExtractionWindow::new(date(2024, 1, 2))));
        windows.next();
        windows.next();
        assert_eq!(windows.final_window(), None);

        let empty = DayWindows::new(date(2024, 1, 3), date(2024, 1, 2));
        assert_eq!(empty.final_window(), None);
    }

    #[test]
    fn test_until_reads_clock() {
        fn clock() -> NaiveDate {
            NaiveDate::from_ymd_opt(2022, 3, 3).unwrap()
        }
        let days: Vec<String> = DayWindows::until(date(2022, 3, 1), clock)
            .map(|w| w.day())
            .collect();
        assert_eq!(days, ["2022-03-01", "2022-03-02", "2022-03-03"]);
    }

    #[test]
    fn test_size_hint_shrinks() {
        let mut windows = DayWindows::new(date(2024, 1, 1), date(2024, 1, 3));
        assert_eq!(windows.len(), 3);
        windows.next();
        assert_eq!(windows.len(), 2);
        let _ = windows.by_ref().count();
        assert_eq!(windows.len(), 0);
    }
}
