//! Resolution of report day/time codes into UTC instants

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// An instant which could not be resolved
///
/// Returned when any of the day, hour, minute, month, or year
/// fields is non-numeric, has the wrong width, or names a
/// calendar position that does not exist (like 31 June).
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("unable to parse date value: {reason}")]
pub struct InvalidDateErr {
    reason: String,
}

impl InvalidDateErr {
    pub(crate) fn new<S>(reason: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the date was rejected
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Resolves partial report timestamps to absolute instants
///
/// Reports encode only the day of month and the time of day.
/// The month and year must come from somewhere else, usually
/// from the time at which the report was retrieved. All fields
/// are the zero-padded strings found in the report:
///
/// * `day`, `hour`, `minute`, `month`: two digits
/// * `year`: four digits
pub trait DateResolver {
    /// Resolve fields to a UTC instant
    fn resolve(
        &self,
        day: &str,
        hour: &str,
        minute: &str,
        month: &str,
        year: &str,
    ) -> Result<DateTime<Utc>, InvalidDateErr>;
}

/// Proleptic Gregorian calendar in UTC
///
/// The hour `24` is accepted when the minute is `00`. It
/// resolves to midnight at the start of the following day, so
/// that a forecast period ending at `2024` ends at 00:00 on
/// the 21st.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tafgroup::{DateResolver, UtcCalendar};
///
/// let when = UtcCalendar.resolve("19", "18", "00", "06", "2025").unwrap();
/// assert_eq!(Utc.with_ymd_and_hms(2025, 6, 19, 18, 0, 0).unwrap(), when);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UtcCalendar;

impl DateResolver for UtcCalendar {
    fn resolve(
        &self,
        day: &str,
        hour: &str,
        minute: &str,
        month: &str,
        year: &str,
    ) -> Result<DateTime<Utc>, InvalidDateErr> {
        let day = parse_field(day, "day", 2)?;
        let hour = parse_field(hour, "hour", 2)?;
        let minute = parse_field(minute, "minute", 2)?;
        let month = parse_field(month, "month", 2)?;
        let year = parse_field(year, "year", 4)?;

        let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| {
            InvalidDateErr::new(format!("no such date {:04}-{:02}-{:02}", year, month, day))
        })?;

        let naive = if hour == 24 && minute == 0 {
            date.and_hms_opt(0, 0, 0)
                .map(|midnight| midnight + Duration::days(1))
        } else {
            date.and_hms_opt(hour, minute, 0)
        }
        .ok_or_else(|| InvalidDateErr::new(format!("no such time {:02}:{:02}", hour, minute)))?;

        Ok(Utc.from_utc_datetime(&naive))
    }
}

/// Month and year context for one decode
///
/// Bundles a [`DateResolver`] with the ambient `month` and
/// `year` strings that every partial timestamp in a report
/// is resolved against.
#[derive(Clone, Copy)]
pub struct DateContext<'a> {
    resolver: &'a dyn DateResolver,
    month: &'a str,
    year: &'a str,
}

impl<'a> DateContext<'a> {
    /// New context for the given `month` (`MM`) and `year` (`YYYY`)
    pub fn new(resolver: &'a dyn DateResolver, month: &'a str, year: &'a str) -> Self {
        Self {
            resolver,
            month,
            year,
        }
    }

    /// Ambient month
    pub fn month(&self) -> &str {
        self.month
    }

    /// Ambient year
    pub fn year(&self) -> &str {
        self.year
    }

    /// Resolve a day, hour, and minute in this month and year
    pub fn resolve(
        &self,
        day: &str,
        hour: &str,
        minute: &str,
    ) -> Result<DateTime<Utc>, InvalidDateErr> {
        self.resolver
            .resolve(day, hour, minute, self.month, self.year)
    }

    /// Resolve a four-digit `DDHH` code, with minutes set to zero
    pub fn resolve_dayhour(&self, code: &str) -> Result<DateTime<Utc>, InvalidDateErr> {
        let day = code
            .get(0..2)
            .ok_or_else(|| InvalidDateErr::new(format!("day/hour code \"{}\" too short", code)))?;
        let hour = code
            .get(2..4)
            .ok_or_else(|| InvalidDateErr::new(format!("day/hour code \"{}\" too short", code)))?;
        self.resolve(day, hour, "00")
    }

    /// Resolve a six-digit `DDHHMM` code
    pub fn resolve_daytime(&self, code: &str) -> Result<DateTime<Utc>, InvalidDateErr> {
        match (code.get(0..2), code.get(2..4), code.get(4..6)) {
            (Some(day), Some(hour), Some(minute)) => self.resolve(day, hour, minute),
            _ => Err(InvalidDateErr::new(format!(
                "day/time code \"{}\" too short",
                code
            ))),
        }
    }
}

impl std::fmt::Debug for DateContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateContext")
            .field("month", &self.month)
            .field("year", &self.year)
            .finish()
    }
}

/// Normalize a validity period to a pair of `DDHHMMZ` strings
///
/// Validity periods appear in three encodings. All of them
/// are converted to a `(begin, end)` pair:
///
/// | Input         | Begin     | End       |
/// |---------------|-----------|-----------|
/// | `1918/2018`   | `191800Z` | `201800Z` |
/// | `2900Z-2912Z` | `290000Z` | `291200Z` |
/// | `091818`      | `091800Z` | `101800Z` |
///
/// The older six-digit `DDHHHH` form has only one day field.
/// When the ending hour is not later than the beginning hour,
/// the period ends on the following day.
///
/// This is a standalone helper for whole validity strings, such
/// as the one in a TAF header. The decoder does not call it: a
/// `valtmper` pattern hands its `bvaltime` and `evaltime`
/// captures straight to the [`DateContext`].
///
/// ```
/// use tafgroup::valid_to_from_fields;
///
/// let (begin, end) = valid_to_from_fields("1918/2018").unwrap();
/// assert_eq!("191800Z", begin);
/// assert_eq!("201800Z", end);
/// ```
pub fn valid_to_from_fields(text: &str) -> Result<(String, String), InvalidDateErr> {
    lazy_static! {
        static ref SLASH: Regex =
            Regex::new(r"^(\d{2})(\d{2})/(\d{2})(\d{2})$").expect("bad validity regexp");
        static ref ZULU: Regex =
            Regex::new(r"^(\d{2})(\d{2})Z-(\d{2})(\d{2})Z$").expect("bad validity regexp");
        static ref SIX_DIGIT: Regex =
            Regex::new(r"^(\d{2})(\d{2})(\d{2})$").expect("bad validity regexp");
    }

    if let Some(caps) = SLASH.captures(text).or_else(|| ZULU.captures(text)) {
        return Ok((
            format!("{}{}00Z", &caps[1], &caps[2]),
            format!("{}{}00Z", &caps[3], &caps[4]),
        ));
    }

    if let Some(caps) = SIX_DIGIT.captures(text) {
        let day: u32 = caps[1]
            .parse()
            .map_err(|_| InvalidDateErr::new(format!("bad day in \"{}\"", text)))?;
        let begin_hour: u32 = caps[2]
            .parse()
            .map_err(|_| InvalidDateErr::new(format!("bad hour in \"{}\"", text)))?;
        let end_hour: u32 = caps[3]
            .parse()
            .map_err(|_| InvalidDateErr::new(format!("bad hour in \"{}\"", text)))?;

        let end_day = if end_hour <= begin_hour {
            day % 31 + 1
        } else {
            day
        };

        return Ok((
            format!("{:02}{:02}00Z", day, begin_hour),
            format!("{:02}{:02}00Z", end_day, end_hour),
        ));
    }

    Err(InvalidDateErr::new(format!(
        "unrecognized validity period \"{}\"",
        text
    )))
}

// Parse a zero-padded numeric field of exactly `width` digits
fn parse_field(text: &str, name: &str, width: usize) -> Result<u32, InvalidDateErr> {
    if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidDateErr::new(format!(
            "{} \"{}\" is not a {}-digit number",
            name, text, width
        )));
    }

    text.parse()
        .map_err(|_| InvalidDateErr::new(format!("{} \"{}\" out of range", name, text)))
}
