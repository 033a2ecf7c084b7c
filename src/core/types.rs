//! Core data types shared by the recorder and the aggregator
//!
//! `SessionRecord` is the unit persisted to the log; everything else here is
//! derived from a list of records and recomputed on every query.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use std::collections::HashMap;

use crate::consts::TIME_FORMAT;

/// One completed focus session
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SessionRecord {
    /// Local calendar day of `start_time`
    pub(crate) date: NaiveDate,
    pub(crate) start_time: NaiveDateTime,
    pub(crate) end_time: NaiveDateTime,
    pub(crate) duration_minutes: i64,
    /// Sanitized tag, never empty
    pub(crate) tag: String,
    /// Single-line note, absent when the user left it blank
    pub(crate) description: Option<String>,
}

impl SessionRecord {
    /// Build a record from start/end timestamps, deriving date and duration
    pub(crate) fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        tag: String,
        description: Option<String>,
    ) -> Self {
        let end_time = end_time.max(start_time);
        SessionRecord {
            date: start_time.date(),
            start_time,
            end_time,
            duration_minutes: duration_minutes(start_time, end_time),
            tag,
            description,
        }
    }

    /// Build a record from zone-aware timestamps.
    ///
    /// The duration comes from the real elapsed time, so a session spanning a
    /// DST change is not off by the shift; the stored times stay wall-clock.
    pub(crate) fn from_span<Tz: TimeZone>(
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        tag: String,
        description: Option<String>,
    ) -> Self {
        let wall = Self::new(start.naive_local(), end.naive_local(), tag, description);
        SessionRecord {
            duration_minutes: ceil_minutes(end.signed_duration_since(start).num_seconds()),
            ..wall
        }
    }

    /// Display projection without the date prefix
    pub(crate) fn to_view(&self) -> RecordView {
        RecordView {
            start: self.start_time.format(TIME_FORMAT).to_string(),
            end: self.end_time.format(TIME_FORMAT).to_string(),
            duration_minutes: self.duration_minutes,
            tag: self.tag.clone(),
            description: self.description.clone(),
        }
    }
}

/// Whole minutes between two wall-clock timestamps, rounded up, never less
/// than one.
///
/// A session that was started and stopped within the same second still
/// counts as one minute. Naive times do not see DST shifts; the recorder
/// goes through `SessionRecord::from_span` instead.
pub(crate) fn duration_minutes(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    ceil_minutes(end.signed_duration_since(start).num_seconds())
}

fn ceil_minutes(seconds: i64) -> i64 {
    (seconds.max(0).saturating_add(59) / 60).max(1)
}

/// A record as shown in a day listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordView {
    /// "HH:MM:SS"
    pub(crate) start: String,
    /// "HH:MM:SS"
    pub(crate) end: String,
    pub(crate) duration_minutes: i64,
    pub(crate) tag: String,
    pub(crate) description: Option<String>,
}

/// Minutes for one day, split by tag
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct DaySummary {
    pub(crate) per_tag_minutes: HashMap<String, i64>,
    pub(crate) total_minutes: i64,
}

impl DaySummary {
    pub(crate) fn add(&mut self, tag: &str, minutes: i64) {
        // Durations are only validated as digits, so sums saturate
        let entry = self.per_tag_minutes.entry(tag.to_string()).or_default();
        *entry = entry.saturating_add(minutes);
        self.total_minutes = self.total_minutes.saturating_add(minutes);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.per_tag_minutes.is_empty()
    }

    /// Tags ordered by minutes (largest first), ties broken by name
    pub(crate) fn sorted_tags(&self) -> Vec<(&str, i64)> {
        let mut tags: Vec<(&str, i64)> = self
            .per_tag_minutes
            .iter()
            .map(|(tag, minutes)| (tag.as_str(), *minutes))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags
    }
}

/// Per-day totals across the whole log
pub(crate) type DailyTotals = HashMap<NaiveDate, DaySummary>;

/// One row of the history view
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DayTotal {
    pub(crate) date: NaiveDate,
    pub(crate) total_minutes: i64,
    pub(crate) goal_met: bool,
}

/// Result of reading a log
#[derive(Debug, Default)]
pub(crate) struct LoadResult {
    /// Usable records, in log order
    pub(crate) records: Vec<SessionRecord>,
    /// Rows dropped as malformed
    pub(crate) skipped: i64,
    pub(crate) valid: i64,
}
