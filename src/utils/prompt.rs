use std::io::{self, BufRead, Write};

use crate::error::AppError;

/// Print `label` and read one line from `input`. EOF reads as an empty line.
pub(crate) fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String, AppError> {
    write!(output, "{label}").map_err(AppError::Prompt)?;
    output.flush().map_err(AppError::Prompt)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(AppError::Prompt)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompt on the process's own stdin/stdout
pub(crate) fn prompt_stdin(label: &str) -> Result<String, AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt_line(&mut input, &mut output, label)
}
