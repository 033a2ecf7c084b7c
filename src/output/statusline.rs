use chrono::NaiveDate;

use crate::core::DaySummary;
use crate::error::AppError;
use crate::output::format::format_minutes;

/// Single line suitable for statusline/tmux integration
/// Format: "Focus: 1h 35m / 2h 0m | streak 3d"
pub(crate) fn status_line(summary: &DaySummary, goal: i64, streak: u32) -> String {
    let mut parts = vec![format!(
        "Focus: {} / {}",
        format_minutes(summary.total_minutes),
        format_minutes(goal)
    )];
    if let Some((tag, _)) = summary.sorted_tags().first() {
        parts.push(format!("top: {tag}"));
    }
    parts.push(format!("streak {streak}d"));
    parts.join(" | ")
}

/// Statusline as JSON for programmatic consumption
pub(crate) fn status_line_json(
    day: NaiveDate,
    summary: &DaySummary,
    goal: i64,
    streak: u32,
) -> Result<String, AppError> {
    let value = serde_json::json!({
        "date": day.to_string(),
        "total_minutes": summary.total_minutes,
        "daily_goal": goal,
        "goal_met": summary.total_minutes >= goal,
        "top_tag": summary.sorted_tags().first().map(|(tag, _)| *tag),
        "streak": streak,
    });
    Ok(serde_json::to_string(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_empty_day() {
        assert_eq!(
            status_line(&DaySummary::default(), 120, 0),
            "Focus: 0m / 2h 0m | streak 0d"
        );
    }

    #[test]
    fn status_line_with_top_tag() {
        let mut s = DaySummary::default();
        s.add("coding", 20);
        s.add("writing", 75);
        assert_eq!(
            status_line(&s, 120, 3),
            "Focus: 1h 35m / 2h 0m | top: writing | streak 3d"
        );
    }

    #[test]
    fn status_line_json_top_tag_null_when_empty() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let json = status_line_json(day, &DaySummary::default(), 120, 0).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(v["top_tag"].is_null());
        assert_eq!(v["goal_met"], false);
    }
}
