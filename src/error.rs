use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("A tag is required to start a focus session")]
    EmptyTag,

    #[error("Cannot open log {}: {source}", path.display())]
    LogUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid daily goal \"{input}\" (expected a positive number of minutes)")]
    InvalidGoal { input: String },

    #[error("Failed to install interrupt handler: {0}")]
    Interrupt(String),

    /// `recv` only fails once every sender is gone. An `ActiveSession` holds
    /// one of its own, so this cannot happen while the session is alive; it
    /// maps the error instead of panicking on it.
    #[error("Stop channel closed before the session was stopped")]
    StopChannelClosed,

    #[error("Failed to read from terminal: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub(crate) fn log_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::LogUnavailable {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_empty_tag() {
        assert_eq!(
            AppError::EmptyTag.to_string(),
            "A tag is required to start a focus session"
        );
    }

    #[test]
    fn app_error_display_date() {
        let e = AppError::InvalidDate {
            input: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid date "abc" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
    }

    #[test]
    fn app_error_display_goal() {
        let e = AppError::InvalidGoal {
            input: "-5".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid daily goal "-5" (expected a positive number of minutes)"#
        );
    }

    #[test]
    fn app_error_display_log_unavailable() {
        let e = AppError::log_unavailable(
            "/nope/focus.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(e.to_string(), "Cannot open log /nope/focus.csv: denied");
    }

    #[test]
    fn app_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app: AppError = json_err.into();
        assert!(app.to_string().starts_with("Failed to serialize output"));
    }

    #[test]
    fn app_error_display_stop_channel_closed() {
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        drop(tx);
        let e = rx.recv().map_err(|_| AppError::StopChannelClosed).unwrap_err();
        assert_eq!(
            e.to_string(),
            "Stop channel closed before the session was stopped"
        );
    }
}
