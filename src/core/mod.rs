//! Core module - session records and the aggregation logic over them

mod aggregator;
mod types;

pub(crate) use aggregator::{compute_streak, history, list_day, summarize};
pub(crate) use types::{DaySummary, DayTotal, LoadResult, RecordView, SessionRecord};
