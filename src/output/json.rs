use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::core::{DaySummary, DayTotal, RecordView};
use crate::error::AppError;

fn tags_json(summary: &DaySummary) -> Value {
    let map: serde_json::Map<String, Value> = summary
        .sorted_tags()
        .into_iter()
        .map(|(tag, minutes)| (tag.to_string(), json!(minutes)))
        .collect();
    Value::Object(map)
}

pub(crate) fn output_summary_json(
    day: NaiveDate,
    summary: &DaySummary,
    goal: i64,
    streak: u32,
    skipped: i64,
) -> Result<String, AppError> {
    let value = json!({
        "date": day.to_string(),
        "per_tag_minutes": tags_json(summary),
        "total_minutes": summary.total_minutes,
        "daily_goal": goal,
        "goal_met": summary.total_minutes >= goal,
        "streak": streak,
        "skipped_rows": skipped,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

pub(crate) fn output_day_json(day: NaiveDate, views: &[RecordView]) -> Result<String, AppError> {
    let sessions: Vec<Value> = views
        .iter()
        .map(|v| {
            json!({
                "start_time": v.start,
                "end_time": v.end,
                "duration_minutes": v.duration_minutes,
                "tag": v.tag,
                "description": v.description,
            })
        })
        .collect();
    let value = json!({
        "date": day.to_string(),
        "sessions": sessions,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

pub(crate) fn output_streak_json(today: NaiveDate, goal: i64, streak: u32) -> Result<String, AppError> {
    let value = json!({
        "today": today.to_string(),
        "daily_goal": goal,
        "streak": streak,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

pub(crate) fn output_history_json(rows: &[DayTotal], goal: i64, streak: u32) -> Result<String, AppError> {
    let days: Vec<Value> = rows
        .iter()
        .map(|r| {
            json!({
                "date": r.date.to_string(),
                "total_minutes": r.total_minutes,
                "goal_met": r.goal_met,
            })
        })
        .collect();
    let value = json!({
        "daily_goal": goal,
        "streak": streak,
        "days": days,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
