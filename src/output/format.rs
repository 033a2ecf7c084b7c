use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

/// Minutes as "45m", "2h 0m" or "1h 35m"
pub(crate) fn format_minutes(minutes: i64) -> String {
    let (sign, value) = if minutes < 0 { ("-", -minutes) } else { ("", minutes) };
    let hours = value / 60;
    let mins = value % 60;
    if hours > 0 {
        format!("{sign}{hours}h {mins}m")
    } else {
        format!("{sign}{mins}m")
    }
}

/// Share of the goal reached, in whole percent (capped display is up to the caller).
///
/// Settings never hold a non-positive goal, but this stays total so it
/// cannot divide by zero.
pub(crate) fn goal_percent(total: i64, goal: i64) -> i64 {
    if goal <= 0 {
        return 100;
    }
    total.saturating_mul(100) / goal
}

/// "1 day" / "3 days"
pub(crate) fn format_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

pub(super) fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_minutes_under_an_hour() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
    }

    #[test]
    fn format_minutes_with_hours() {
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(95), "1h 35m");
        assert_eq!(format_minutes(120), "2h 0m");
    }

    #[test]
    fn format_minutes_negative() {
        assert_eq!(format_minutes(-95), "-1h 35m");
    }

    #[test]
    fn goal_percent_rounds_down() {
        assert_eq!(goal_percent(95, 120), 79);
        assert_eq!(goal_percent(120, 120), 100);
        assert_eq!(goal_percent(300, 120), 250);
        assert_eq!(goal_percent(10, 0), 100);
    }

    #[test]
    fn goal_percent_huge_total_does_not_overflow() {
        assert_eq!(goal_percent(i64::MAX, 120), i64::MAX / 120);
    }

    #[test]
    fn format_days_plural() {
        assert_eq!(format_days(0), "0 days");
        assert_eq!(format_days(1), "1 day");
        assert_eq!(format_days(5), "5 days");
    }

    #[test]
    fn styled_table_renders_header() {
        let mut table = create_styled_table();
        table.set_header(vec![header_cell("Tag", false)]);
        table.add_row(vec![right_cell("5", None, false)]);
        let rendered = table.to_string();
        assert!(rendered.contains("Tag"));
        assert!(rendered.contains('├'));
    }
}
