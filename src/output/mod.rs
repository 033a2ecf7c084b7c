mod format;
mod json;
mod statusline;
mod table;

pub(crate) use format::format_minutes;
pub(crate) use json::{output_day_json, output_history_json, output_streak_json, output_summary_json};
pub(crate) use statusline::{status_line, status_line_json};
pub(crate) use table::{
    SummaryOptions, TableOptions, print_day_list, print_day_summary, print_history,
};
