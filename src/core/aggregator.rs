//! Aggregation over session records
//!
//! Every function here is a pure pass over records already loaded from the
//! log. Nothing assumes the records are sorted by date.

use chrono::{Days, NaiveDate};

use crate::core::types::{DailyTotals, DaySummary, DayTotal, RecordView, SessionRecord};

/// Per-tag and total minutes for a single day
pub(crate) fn summarize(records: &[SessionRecord], day: NaiveDate) -> DaySummary {
    let mut summary = DaySummary::default();
    for record in records.iter().filter(|r| r.date == day) {
        summary.add(&record.tag, record.duration_minutes);
    }
    summary
}

/// Totals for every day that has at least one record
pub(crate) fn daily_totals(records: &[SessionRecord]) -> DailyTotals {
    let mut totals = DailyTotals::new();
    for record in records {
        totals
            .entry(record.date)
            .or_default()
            .add(&record.tag, record.duration_minutes);
    }
    totals
}

/// Consecutive days, ending at `today`, whose total reaches `goal`.
///
/// Walks backward one calendar day at a time and stops at the first day
/// that is missing or under goal. A `today` under goal yields 0.
pub(crate) fn compute_streak(records: &[SessionRecord], today: NaiveDate, goal: i64) -> u32 {
    let totals = daily_totals(records);
    let mut streak = 0;
    let mut day = today;
    loop {
        let met = totals
            .get(&day)
            .is_some_and(|summary| summary.total_minutes >= goal);
        if !met {
            break;
        }
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// The day's sessions in log order, with times shown without the date
pub(crate) fn list_day(records: &[SessionRecord], day: NaiveDate) -> Vec<RecordView> {
    records
        .iter()
        .filter(|r| r.date == day)
        .map(SessionRecord::to_view)
        .collect()
}

/// The last `days` calendar days ending at `today`, oldest first
pub(crate) fn history(
    records: &[SessionRecord],
    today: NaiveDate,
    days: u32,
    goal: i64,
) -> Vec<DayTotal> {
    let totals = daily_totals(records);
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| {
            let total_minutes = totals.get(&date).map_or(0, |s| s.total_minutes);
            DayTotal {
                date,
                total_minutes,
                goal_met: total_minutes >= goal,
            }
        })
        .collect()
}
