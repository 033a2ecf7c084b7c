pub(crate) mod date;
pub(crate) mod prompt;

pub(crate) use date::parse_date;
pub(crate) use prompt::prompt_stdin;
