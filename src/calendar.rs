//! Calendar algorithms over [`DateRange`]
//!
//! Every operation is a pure function of its inputs. Iteration is driven by
//! `i64` day numbers rather than date arithmetic, so walking up to
//! [`MAX_DATE`] never overflows.

use crate::date_range::{DateRange, MAX_DATE, day_number, from_day_number};
use crate::error::{Error, Result};
use crate::guard;
use chrono::NaiveDate;
use std::iter::FusedIterator;

const DAYS_PER_WEEK: i64 = 7;

impl DateRange {
    /// Whether `date` lies within the range, both ends inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.effective_end()
    }

    /// Whether `other` lies entirely within this range.
    #[must_use]
    pub fn contains_range(&self, other: &Self) -> bool {
        other.start() >= self.start() && other.effective_end() <= self.effective_end()
    }

    /// Whether the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start().max(other.start()) <= self.effective_end().min(other.effective_end())
    }

    /// The days shared by both ranges, or `None` when they are disjoint.
    ///
    /// The result is open-ended only when both inputs are.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }

        let start = self.start().max(other.start());
        let end = match (self.end(), other.end()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(end), None) | (None, Some(end)) => Some(end),
            (None, None) => None,
        };

        Self::new(start, end).ok()
    }

    /// Number of days in the range, counting both ends.
    ///
    /// Open-ended ranges have no duration and fail with
    /// [`Error::InvalidOperation`].
    pub fn duration(&self) -> Result<u32> {
        self.try_duration().ok_or_else(|| {
            Error::InvalidOperation("an open-ended date range has no duration".to_string())
        })
    }

    /// Non-failing variant of [`DateRange::duration`].
    #[must_use]
    pub fn try_duration(&self) -> Option<u32> {
        let end = self.end()?;
        u32::try_from(day_number(end) - day_number(self.start()) + 1).ok()
    }

    /// Lazily yield every date from the start to the effective end.
    ///
    /// `max_count` truncates the sequence; a negative count fails with
    /// [`Error::OutOfRange`]. Each call returns a fresh iterator.
    pub fn enumerate_days(&self, max_count: Option<i64>) -> Result<Days> {
        if let Some(max) = max_count {
            guard::non_negative("max_count", max)?;
        }

        let first = day_number(self.start());
        let span = (day_number(self.effective_end()) - first + 1).max(0);

        Ok(Days {
            next: first,
            remaining: max_count.map_or(span, |max| max.min(span)),
        })
    }

    /// Split the range into consecutive chunks of at most seven days.
    ///
    /// Chunks are anchored at the range start, not at calendar weeks, and
    /// the last chunk is cut at the effective end.
    ///
    /// For an open-ended range `max_weeks` is required and must be
    /// positive; a chunk that reaches [`MAX_DATE`] is itself open-ended.
    /// For a closed range `None` means no limit, zero yields nothing and
    /// a negative value is an [`Error::Argument`].
    pub fn weeks(&self, max_weeks: Option<i64>) -> Result<Weeks> {
        let limit = if self.is_open_ended() {
            let max = guard::not_null("max_weeks", max_weeks)?;
            guard::positive("max_weeks", max)?;
            Some(max)
        } else {
            if let Some(max) = max_weeks.filter(|max| *max < 0) {
                return Err(Error::argument(
                    "max_weeks",
                    format!("must not be negative, got {max}"),
                ));
            }
            max_weeks
        };

        Ok(Weeks {
            next: day_number(self.start()),
            last: day_number(self.effective_end()),
            open_ended: self.is_open_ended(),
            remaining: limit,
        })
    }
}

/// Iterator over the days of a [`DateRange`], see [`DateRange::enumerate_days`].
#[derive(Debug, Clone)]
pub struct Days {
    next: i64,
    remaining: i64,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.remaining <= 0 {
            return None;
        }
        let date = from_day_number(self.next)?;
        self.next += 1;
        self.remaining -= 1;
        Some(date)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::try_from(self.remaining).unwrap_or(0);
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Days {
    fn next_back(&mut self) -> Option<NaiveDate> {
        if self.remaining <= 0 {
            return None;
        }
        let date = from_day_number(self.next + self.remaining - 1)?;
        self.remaining -= 1;
        Some(date)
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

/// Iterator over seven-day chunks of a [`DateRange`], see [`DateRange::weeks`].
#[derive(Debug, Clone)]
pub struct Weeks {
    next: i64,
    last: i64,
    open_ended: bool,
    remaining: Option<i64>,
}

impl Iterator for Weeks {
    type Item = DateRange;

    fn next(&mut self) -> Option<DateRange> {
        if self.next > self.last || self.remaining.is_some_and(|n| n <= 0) {
            return None;
        }

        let chunk_end = (self.next + DAYS_PER_WEEK - 1).min(self.last);
        let start = from_day_number(self.next)?;
        let end = if self.open_ended && chunk_end == day_number(MAX_DATE) {
            None
        } else {
            Some(from_day_number(chunk_end)?)
        };

        self.next = chunk_end + 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }

        DateRange::new(start, end).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let chunks = if self.next > self.last {
            0
        } else {
            (self.last - self.next) / DAYS_PER_WEEK + 1
        };
        let chunks = self.remaining.map_or(chunks, |n| n.clamp(0, chunks));
        let len = usize::try_from(chunks).unwrap_or(0);
        (len, Some(len))
    }
}

impl ExactSizeIterator for Weeks {}

impl FusedIterator for Weeks {}
