//! Inclusive date interval with an optional open end

use crate::error::{
    BufferTooSmall, DATE_RANGE_EMPTY, EXPECTED_JSON_STRING, Error, INVALID_DATE_RANGE_FORMAT,
    Result,
};
use crate::guard;
use chrono::{Datelike, NaiveDate};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Earliest date a [`DateRange`] can hold.
pub const MIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(date) => date,
    None => panic!("0001-01-01 is a valid date"),
};

/// Latest date a [`DateRange`] can hold; open-ended ranges run up to it.
pub const MAX_DATE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
    Some(date) => date,
    None => panic!("9999-12-31 is a valid date"),
};

/// Separator between the start and end tokens of the canonical format
pub const SEPARATOR: char = '|';

/// End token of an open-ended range (U+221E)
pub const INFINITY: &str = "\u{221E}";

const DATE_LEN: usize = 10;

/// Days elapsed since [`MIN_DATE`].
pub(crate) fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - 1
}

/// Inverse of [`day_number`]; `None` outside chrono's representable range.
pub(crate) fn from_day_number(day: i64) -> Option<NaiveDate> {
    i32::try_from(day + 1)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// An immutable inclusive range of calendar dates.
///
/// A missing end means the range is open-ended: it is stored and rendered
/// distinctly from a range ending on [`MAX_DATE`], but every calculation
/// treats it as ending there (see [`DateRange::effective_end`]).
///
/// The default value is the universal range `0001-01-01|∞`.
///
/// # Canonical format
///
/// `yyyy-MM-dd|yyyy-MM-dd` for closed ranges and `yyyy-MM-dd|∞` for
/// open-ended ones. The same text is used as the JSON representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range, validating that `end` is not before `start`.
    ///
    /// Dates outside `MIN_DATE..=MAX_DATE` are rejected with
    /// [`Error::OutOfRange`]; an end before the start is an
    /// [`Error::Argument`] naming `start`.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self> {
        guard::minimum("start", start, MIN_DATE)?;
        guard::maximum("start", start, MAX_DATE)?;

        if let Some(end) = end {
            guard::maximum("end", end, MAX_DATE)?;
            if end < start {
                return Err(Error::argument(
                    "start",
                    format!("start date {start} must not be after end date {end}"),
                ));
            }
        }

        Ok(Self { start, end })
    }

    /// Range starting at `start` with no end.
    pub fn open_ended(start: NaiveDate) -> Result<Self> {
        Self::new(start, None)
    }

    /// Range covering exactly one day.
    pub fn single_day(date: NaiveDate) -> Result<Self> {
        Self::new(date, Some(date))
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// The end used for comparisons: the real end, or [`MAX_DATE`] when open-ended.
    #[must_use]
    pub fn effective_end(&self) -> NaiveDate {
        self.end.unwrap_or(MAX_DATE)
    }

    #[must_use]
    pub const fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// Length in bytes of the canonical text form.
    #[must_use]
    pub const fn formatted_len(&self) -> usize {
        match self.end {
            Some(_) => DATE_LEN + 1 + DATE_LEN,
            None => DATE_LEN + 1 + INFINITY.len(),
        }
    }

    /// Write the canonical text form into `dest` as UTF-8.
    ///
    /// Returns the number of bytes written. When `dest` is too short
    /// nothing is written and the error reports how much space is needed.
    pub fn format_into(&self, dest: &mut [u8]) -> std::result::Result<usize, BufferTooSmall> {
        let required = self.formatted_len();
        if dest.len() < required {
            return Err(BufferTooSmall {
                required,
                available: dest.len(),
            });
        }

        dest[..DATE_LEN].copy_from_slice(&date_bytes(self.start));
        dest[DATE_LEN] = b'|';
        let tail = &mut dest[DATE_LEN + 1..required];
        match self.end {
            Some(end) => tail.copy_from_slice(&date_bytes(end)),
            None => tail.copy_from_slice(INFINITY.as_bytes()),
        }

        Ok(required)
    }

    /// Parse the canonical text form, returning `None` on any deviation.
    ///
    /// Surrounding whitespace and whitespace around either token is
    /// tolerated. Exactly one separator is required, the start must be an
    /// exact `yyyy-MM-dd` date and the end either `∞` or an exact date not
    /// before the start.
    #[must_use]
    pub fn try_parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut tokens = trimmed.split(SEPARATOR);
        let (left, right) = (tokens.next()?.trim(), tokens.next()?.trim());
        if tokens.next().is_some() || left.is_empty() || right.is_empty() {
            return None;
        }

        let start = parse_date(left)?;
        if right == INFINITY {
            return Some(Self { start, end: None });
        }

        let end = parse_date(right)?;
        (end >= start).then_some(Self {
            start,
            end: Some(end),
        })
    }

    /// Strict variant of [`DateRange::try_parse`].
    ///
    /// Every failure is an [`Error::Format`] carrying
    /// [`INVALID_DATE_RANGE_FORMAT`].
    pub fn parse(input: &str) -> Result<Self> {
        Self::try_parse(input).ok_or_else(|| {
            debug!("Rejected date range text: {input:?}");
            Error::Format(INVALID_DATE_RANGE_FORMAT.to_string())
        })
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: MIN_DATE,
            end: None,
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered by start, then end; an open end sorts after every closed end.
impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| match (self.end, other.end) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_date(f, self.start)?;
        f.write_str("|")?;
        match self.end {
            Some(end) => write_date(f, end),
            None => f.write_str(INFINITY),
        }
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn write_date(f: &mut fmt::Formatter<'_>, date: NaiveDate) -> fmt::Result {
    write!(
        f,
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

fn date_bytes(date: NaiveDate) -> [u8; DATE_LEN] {
    const DIGITS: &[u8; 10] = b"0123456789";
    let digit = |value: u32, place: u32| DIGITS[(value / place % 10) as usize];

    let year = date.year().unsigned_abs();
    let (month, day) = (date.month(), date.day());
    [
        digit(year, 1000),
        digit(year, 100),
        digit(year, 10),
        digit(year, 1),
        b'-',
        digit(month, 10),
        digit(month, 1),
        b'-',
        digit(day, 10),
        digit(day, 1),
    ]
}

/// Parse an exact `yyyy-MM-dd` token within the supported range.
fn parse_date(token: &str) -> Option<NaiveDate> {
    let bytes = token.as_bytes();
    if bytes.len() != DATE_LEN || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let number = |digits: &[u8]| {
        digits.iter().try_fold(0u32, |acc, b| {
            b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
        })
    };

    let year = i32::try_from(number(&bytes[..4])?).ok()?;
    let month = number(&bytes[5..7])?;
    let day = number(&bytes[8..])?;

    NaiveDate::from_ymd_opt(year, month, day).filter(|date| *date >= MIN_DATE)
}

// Serde support - serialize as the canonical string
impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// Serde support - only strings are accepted, every other token is rejected
impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DateRangeVisitor)
    }
}

struct DateRangeVisitor;

impl DateRangeVisitor {
    fn not_a_string<E: de::Error>() -> std::result::Result<DateRange, E> {
        Err(E::custom(EXPECTED_JSON_STRING))
    }
}

impl<'de> Visitor<'de> for DateRangeVisitor {
    type Value = DateRange;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string in the form yyyy-MM-dd|yyyy-MM-dd or yyyy-MM-dd|\u{221E}")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<DateRange, E> {
        if v.trim().is_empty() {
            return Err(E::custom(DATE_RANGE_EMPTY));
        }
        DateRange::try_parse(v).ok_or_else(|| E::custom(INVALID_DATE_RANGE_FORMAT))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<DateRange, E> {
        Self::not_a_string()
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<DateRange, E> {
        Self::not_a_string()
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<DateRange, E> {
        Self::not_a_string()
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<DateRange, E> {
        Self::not_a_string()
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<DateRange, E> {
        Self::not_a_string()
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _: A) -> std::result::Result<DateRange, A::Error> {
        Self::not_a_string()
    }

    fn visit_map<A: MapAccess<'de>>(self, _: A) -> std::result::Result<DateRange, A::Error> {
        Self::not_a_string()
    }
}
