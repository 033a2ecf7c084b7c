use chrono::NaiveDate;
use comfy_table::{Cell, Color, Table};

use crate::core::{DaySummary, DayTotal, RecordView};
use crate::output::format::{
    create_styled_table, format_days, format_minutes, goal_percent, header_cell, right_cell,
    styled_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) goal: i64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryOptions {
    pub(crate) skipped: i64,
    pub(crate) valid: i64,
}

/// Print the "N sessions in log" line, mentioning skipped rows when there are any
pub(crate) fn print_summary_line(summary: SummaryOptions, use_color: bool) {
    println!("\n  {}\n", summary_line_text(summary, use_color));
}

fn summary_line_text(summary: SummaryOptions, use_color: bool) -> String {
    let noun = if summary.valid == 1 { "session" } else { "sessions" };
    let mut text = format!("{} {noun} in log", summary.valid);
    if summary.skipped > 0 {
        let skipped = format!("{} malformed row(s) skipped", summary.skipped);
        if use_color {
            text.push_str(&format!(" | \x1b[33m{skipped}\x1b[0m"));
        } else {
            text.push_str(&format!(" | {skipped}"));
        }
    }
    text
}

fn goal_color(met: bool, use_color: bool) -> Option<Color> {
    match (use_color, met) {
        (false, _) => None,
        (true, true) => Some(Color::Green),
        (true, false) => Some(Color::Yellow),
    }
}

pub(crate) fn render_day_summary(summary: &DaySummary, opts: TableOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Tag", c),
        header_cell("Minutes", c),
        header_cell("Time", c),
    ]);

    for (tag, minutes) in summary.sorted_tags() {
        table.add_row(vec![
            Cell::new(tag),
            right_cell(&minutes.to_string(), None, false),
            right_cell(&format_minutes(minutes), None, false),
        ]);
    }

    let cyan = if c { Some(Color::Cyan) } else { None };
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        right_cell(&summary.total_minutes.to_string(), cyan, true),
        right_cell(&format_minutes(summary.total_minutes), cyan, true),
    ]);
    table
}

/// Goal progress and streak, e.g. "Goal: 1h 35m / 2h 0m (79%) | Streak: 2 days"
pub(crate) fn goal_line(total: i64, streak: u32, opts: TableOptions) -> String {
    let met = total >= opts.goal;
    let progress = format!(
        "{} / {} ({}%)",
        format_minutes(total),
        format_minutes(opts.goal),
        goal_percent(total, opts.goal)
    );
    let progress = match goal_color(met, opts.use_color) {
        Some(Color::Green) => format!("\x1b[32m{progress}\x1b[0m"),
        Some(_) => format!("\x1b[33m{progress}\x1b[0m"),
        None => progress,
    };
    format!("Goal: {progress} | Streak: {}", format_days(streak))
}

pub(crate) fn print_day_summary(
    day: NaiveDate,
    summary: &DaySummary,
    streak: u32,
    load: SummaryOptions,
    opts: TableOptions,
) {
    println!("\n  Focus on {day}\n");
    println!("{}", render_day_summary(summary, opts));
    println!("\n  {}", goal_line(summary.total_minutes, streak, opts));
    print_summary_line(load, opts.use_color);
}

pub(crate) fn render_day_list(views: &[RecordView], use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", use_color),
        header_cell("Start", use_color),
        header_cell("End", use_color),
        header_cell("Minutes", use_color),
        header_cell("Tag", use_color),
        header_cell("Description", use_color),
    ]);

    for (i, view) in views.iter().enumerate() {
        table.add_row(vec![
            right_cell(&(i + 1).to_string(), None, false),
            Cell::new(&view.start),
            Cell::new(&view.end),
            right_cell(&view.duration_minutes.to_string(), None, false),
            Cell::new(&view.tag),
            Cell::new(view.description.as_deref().unwrap_or("")),
        ]);
    }

    let total = views
        .iter()
        .fold(0i64, |acc, v| acc.saturating_add(v.duration_minutes));
    let cyan = if use_color { Some(Color::Cyan) } else { None };
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        Cell::new(""),
        Cell::new(""),
        right_cell(&total.to_string(), cyan, true),
        Cell::new(""),
        Cell::new(""),
    ]);
    table
}

pub(crate) fn print_day_list(day: NaiveDate, views: &[RecordView], use_color: bool) {
    println!("\n  Sessions on {day}\n");
    println!("{}", render_day_list(views, use_color));
    println!();
}

pub(crate) fn render_history(rows: &[DayTotal], opts: TableOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Date", c),
        header_cell("Minutes", c),
        header_cell("Time", c),
        header_cell("Goal", c),
    ]);

    for row in rows {
        let color = goal_color(row.goal_met, c);
        let mark = if row.goal_met { "✓" } else { "" };
        table.add_row(vec![
            Cell::new(row.date.to_string()),
            right_cell(&row.total_minutes.to_string(), None, false),
            right_cell(&format_minutes(row.total_minutes), None, false),
            styled_cell(mark, color, false),
        ]);
    }

    let total = rows
        .iter()
        .fold(0i64, |acc, r| acc.saturating_add(r.total_minutes));
    let met = rows.iter().filter(|r| r.goal_met).count();
    let cyan = if c { Some(Color::Cyan) } else { None };
    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        right_cell(&total.to_string(), cyan, true),
        right_cell(&format_minutes(total), cyan, true),
        styled_cell(&format!("{met}/{}", rows.len()), cyan, true),
    ]);
    table
}

pub(crate) fn print_history(rows: &[DayTotal], streak: u32, opts: TableOptions) {
    println!(
        "\n  Daily focus (goal {})\n",
        format_minutes(opts.goal)
    );
    println!("{}", render_history(rows, opts));
    println!("\n  Current streak: {}\n", format_days(streak));
}
