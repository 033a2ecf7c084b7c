use chrono::{Local, NaiveDate};

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::consts::{DEFAULT_HISTORY_DAYS, TIME_FORMAT};
use crate::core::{LoadResult, SessionRecord, compute_streak, history, list_day, summarize};
use crate::error::AppError;
use crate::output::{
    SummaryOptions, TableOptions, format_minutes, output_day_json, output_history_json,
    output_streak_json, output_summary_json, print_day_list, print_day_summary, print_history,
    status_line, status_line_json,
};
use crate::session::{SessionRecorder, forward_interrupts};
use crate::store::{FileLog, LogStore, load_log};
use crate::utils::{parse_date, prompt_stdin};

pub(crate) struct CommandContext<'a> {
    pub(crate) settings: &'a Settings,
    pub(crate) json: bool,
    pub(crate) use_color: bool,
    pub(crate) today: NaiveDate,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            use_color: self.use_color,
            goal: self.settings.daily_goal,
        }
    }
}

/// Read the whole log. An unreadable log is reported and treated as empty.
fn load_or_empty(store: &dyn LogStore) -> LoadResult {
    match load_log(store) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("{e}; treating the log as empty");
            LoadResult::default()
        }
    }
}

fn resolve_day(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    date.map_or(Ok(today), parse_date)
}

/// The day to report on once a session is recorded. A session that ran past
/// midnight moves "today" to the day it ended.
fn day_after_session(record: &SessionRecord, today_at_start: NaiveDate) -> NaiveDate {
    today_at_start.max(record.end_time.date())
}

fn handle_start(
    store: &dyn LogStore,
    tag: Option<String>,
    description: Option<String>,
    no_description: bool,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let tag = match tag {
        Some(tag) if !tag.trim().is_empty() => tag,
        _ => prompt_stdin("Tag: ")?,
    };

    let recorder = SessionRecorder::new(store);
    let mut session = recorder.start(Some(&tag))?;
    forward_interrupts(session.stop_handle())?;

    println!(
        "Focusing on \"{}\" since {}. Press Ctrl-C to stop.",
        session.tag(),
        session.started_at().format(TIME_FORMAT)
    );

    recorder.await_stop(&mut session)?;
    println!();

    let description = match (description, no_description) {
        (Some(d), _) => Some(d),
        (None, true) => None,
        (None, false) => Some(prompt_stdin("Description (optional): ")?),
    };

    let Some(record) = recorder.finish(&mut session, description.as_deref())? else {
        return Ok(());
    };
    log::debug!("Session is now {}", session.state());

    if ctx.json {
        let views = [record.to_view()];
        println!("{}", output_day_json(record.date, &views)?);
        return Ok(());
    }

    println!(
        "Recorded {} of \"{}\" ({} - {}) to {}",
        format_minutes(record.duration_minutes),
        record.tag,
        record.start_time.format(TIME_FORMAT),
        record.end_time.format(TIME_FORMAT),
        store.location()
    );

    let today = day_after_session(&record, ctx.today);
    let loaded = load_or_empty(store);
    let summary = summarize(&loaded.records, today);
    let streak = compute_streak(&loaded.records, today, ctx.settings.daily_goal);
    println!("{}", status_line(&summary, ctx.settings.daily_goal, streak));
    Ok(())
}

fn handle_summary(
    store: &dyn LogStore,
    day: NaiveDate,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let loaded = load_or_empty(store);
    let summary = summarize(&loaded.records, day);
    let streak = compute_streak(&loaded.records, day, ctx.settings.daily_goal);

    if ctx.json {
        println!(
            "{}",
            output_summary_json(day, &summary, ctx.settings.daily_goal, streak, loaded.skipped)?
        );
        return Ok(());
    }

    if summary.is_empty() {
        println!("No focus data found for {day}.");
        return Ok(());
    }

    print_day_summary(
        day,
        &summary,
        streak,
        SummaryOptions {
            skipped: loaded.skipped,
            valid: loaded.valid,
        },
        ctx.table_options(),
    );
    Ok(())
}

fn handle_list(store: &dyn LogStore, day: NaiveDate, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let loaded = load_or_empty(store);
    let views = list_day(&loaded.records, day);

    if ctx.json {
        println!("{}", output_day_json(day, &views)?);
        return Ok(());
    }

    if views.is_empty() {
        println!("No focus data found for {day}.");
        return Ok(());
    }
    print_day_list(day, &views, ctx.use_color);
    Ok(())
}

fn handle_streak(store: &dyn LogStore, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let loaded = load_or_empty(store);
    let goal = ctx.settings.daily_goal;
    let streak = compute_streak(&loaded.records, ctx.today, goal);

    if ctx.json {
        println!("{}", output_streak_json(ctx.today, goal, streak)?);
    } else {
        println!(
            "Streak: {streak} day(s) with at least {} of focus",
            format_minutes(goal)
        );
    }
    Ok(())
}

fn handle_history(
    store: &dyn LogStore,
    days: Option<u32>,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let loaded = load_or_empty(store);
    let goal = ctx.settings.daily_goal;
    let rows = history(
        &loaded.records,
        ctx.today,
        days.unwrap_or(DEFAULT_HISTORY_DAYS),
        goal,
    );
    let streak = compute_streak(&loaded.records, ctx.today, goal);

    if ctx.json {
        println!("{}", output_history_json(&rows, goal, streak)?);
        return Ok(());
    }
    if loaded.records.is_empty() {
        println!("No focus data found.");
        return Ok(());
    }
    print_history(&rows, streak, ctx.table_options());
    Ok(())
}

fn handle_status(store: &dyn LogStore, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let loaded = load_or_empty(store);
    let goal = ctx.settings.daily_goal;
    let summary = summarize(&loaded.records, ctx.today);
    let streak = compute_streak(&loaded.records, ctx.today, goal);

    if ctx.json {
        println!("{}", status_line_json(ctx.today, &summary, goal, streak)?);
    } else {
        println!("{}", status_line(&summary, goal, streak));
    }
    Ok(())
}

/// Dispatch the parsed command against the configured log
pub(crate) fn run(cli: &Cli, settings: &Settings) -> Result<(), AppError> {
    let store = FileLog::new(&settings.log_path);
    log::debug!("Using log {}", store.path().display());

    let ctx = CommandContext {
        settings,
        json: cli.json,
        use_color: cli.use_color(),
        today: Local::now().date_naive(),
    };

    match &cli.command {
        Some(Commands::Start {
            tag,
            description,
            no_description,
        }) => handle_start(
            &store,
            tag.clone(),
            description.clone(),
            *no_description,
            &ctx,
        ),
        Some(Commands::Today) | None => handle_summary(&store, ctx.today, &ctx),
        Some(Commands::Summary { date }) => {
            let day = resolve_day(date.as_deref(), ctx.today)?;
            handle_summary(&store, day, &ctx)
        }
        Some(Commands::List { date }) => {
            let day = resolve_day(date.as_deref(), ctx.today)?;
            handle_list(&store, day, &ctx)
        }
        Some(Commands::Streak) => handle_streak(&store, &ctx),
        Some(Commands::History { days }) => handle_history(&store, *days, &ctx),
        Some(Commands::Status) => handle_status(&store, &ctx),
        Some(Commands::Path) => {
            println!("{}", store.path().display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLog;

    #[test]
    fn resolve_day_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        assert_eq!(resolve_day(None, today).unwrap(), today);
        assert_eq!(
            resolve_day(Some("20250601"), today).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(resolve_day(Some("nope"), today).is_err());
    }

    #[test]
    fn day_after_session_follows_midnight_crossing() {
        let at =
            |s: &str| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        let started = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();

        let late = SessionRecord::new(
            at("2025-06-04 23:40:00"),
            at("2025-06-05 00:20:00"),
            "late".into(),
            None,
        );
        assert_eq!(
            day_after_session(&late, started),
            NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()
        );

        let same_day = SessionRecord::new(
            at("2025-06-04 09:00:00"),
            at("2025-06-04 09:30:00"),
            "x".into(),
            None,
        );
        assert_eq!(day_after_session(&same_day, started), started);
    }

    #[test]
    fn load_or_empty_counts_skips() {
        let log = MemoryLog::with_lines(&[
            "2025-06-04,2025-06-04 09:00:00,2025-06-04 09:30:00,30,coding",
            "2025-06-04,2025-06-04 10:00:00,2025-06-04 10:30:00,abc,coding",
        ]);
        let loaded = load_or_empty(&log);
        assert_eq!(loaded.valid, 1);
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn load_or_empty_tolerates_unreadable_log() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_or_empty(&FileLog::new(dir.path()));
        assert!(loaded.records.is_empty());
    }
}
