//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Start a focus session and record it when you press Ctrl-C
    Start {
        /// What you are focusing on (prompted for when omitted)
        tag: Option<String>,
        /// Note to store with the session (skips the prompt after stopping)
        #[arg(short, long)]
        description: Option<String>,
        /// Do not ask for a note after stopping
        #[arg(long, conflicts_with = "description")]
        no_description: bool,
    },
    /// Show today's focus by tag, goal progress and streak (default)
    Today,
    /// Show focus by tag for any day
    Summary {
        /// Day to summarize (YYYYMMDD or YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List the sessions of a day in the order they were logged
    List {
        /// Day to list (YYYYMMDD or YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the current streak of days meeting the daily goal
    Streak,
    /// Show daily totals for the last few days
    History {
        /// Number of days to show, ending today
        #[arg(long)]
        days: Option<u32>,
    },
    /// Output single line for statusline/tmux integration
    Status,
    /// Print the log file location
    Path,
}
