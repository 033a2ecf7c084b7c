//! Focus session lifecycle
//!
//! `Idle → Running (start) → Stopping (stop signal) → Idle (after append)`.
//! A session waits on its own cancellation channel; whoever holds a
//! `StopHandle` (the Ctrl-C listener, or a test) ends it.

use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Local, NaiveDateTime, Timelike};

use crate::core::SessionRecord;
use crate::error::AppError;
use crate::store::{LogStore, flatten_description, sanitize_tag};

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StopSignal {
    /// User pressed Ctrl-C
    Interrupt,
    /// Stopped programmatically
    Requested,
}

/// Lifecycle state of an `ActiveSession`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    Running,
    Stopping,
    /// Record appended; the session is done
    Idle,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Stopping => write!(f, "Stopping"),
            Self::Idle => write!(f, "Idle"),
        }
    }
}

/// Sends the stop signal to a running session. Cheap to clone.
#[derive(Debug, Clone)]
pub(crate) struct StopHandle {
    tx: Sender<StopSignal>,
}

impl StopHandle {
    /// Deliver a stop signal. Signals after the first are ignored by the
    /// session, and sending to a session that no longer exists is a no-op.
    pub(crate) fn stop(&self, signal: StopSignal) {
        let _ = self.tx.send(signal);
    }
}

/// A started, not yet recorded, focus session
#[derive(Debug)]
pub(crate) struct ActiveSession {
    tag: String,
    started_at: DateTime<Local>,
    state: SessionState,
    tx: Sender<StopSignal>,
    rx: Receiver<StopSignal>,
}

impl ActiveSession {
    pub(crate) fn tag(&self) -> &str {
        &self.tag
    }

    /// Wall-clock start time
    pub(crate) fn started_at(&self) -> NaiveDateTime {
        self.started_at.naive_local()
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.tx.clone(),
        }
    }
}

/// Starts sessions and appends them to the log when they stop
pub(crate) struct SessionRecorder<'a> {
    store: &'a dyn LogStore,
}

impl<'a> SessionRecorder<'a> {
    pub(crate) fn new(store: &'a dyn LogStore) -> Self {
        Self { store }
    }

    /// Start a session now. Fails with `EmptyTag` if the tag is blank after
    /// sanitization; nothing is written either way.
    pub(crate) fn start(&self, tag: Option<&str>) -> Result<ActiveSession, AppError> {
        self.start_at(tag, now())
    }

    pub(crate) fn start_at(
        &self,
        tag: Option<&str>,
        started_at: DateTime<Local>,
    ) -> Result<ActiveSession, AppError> {
        let tag = sanitize_tag(tag.unwrap_or_default());
        if tag.is_empty() {
            return Err(AppError::EmptyTag);
        }
        let started_at = truncate_to_second(started_at);
        let (tx, rx) = mpsc::channel();
        log::info!("Started session \"{tag}\" at {}", started_at.naive_local());
        Ok(ActiveSession {
            tag,
            started_at,
            state: SessionState::Running,
            tx,
            rx,
        })
    }

    /// Block until the session receives a stop signal.
    ///
    /// Returns immediately if the session has already been stopped.
    pub(crate) fn await_stop(&self, session: &mut ActiveSession) -> Result<StopSignal, AppError> {
        if session.state != SessionState::Running {
            return Ok(StopSignal::Requested);
        }
        // The session keeps its own sender alive, so this only returns on a
        // delivered signal.
        let signal = session.rx.recv().map_err(|_| AppError::StopChannelClosed)?;
        session.state = SessionState::Stopping;
        log::info!("Session \"{}\" stopped ({signal:?})", session.tag);
        Ok(signal)
    }

    /// Stop the clock and append the record.
    ///
    /// Returns `None` without touching the log if this session was already
    /// recorded. If the append fails the session stays in `Stopping`.
    pub(crate) fn finish(
        &self,
        session: &mut ActiveSession,
        description: Option<&str>,
    ) -> Result<Option<SessionRecord>, AppError> {
        self.finish_at(session, description, now())
    }

    pub(crate) fn finish_at(
        &self,
        session: &mut ActiveSession,
        description: Option<&str>,
        ended_at: DateTime<Local>,
    ) -> Result<Option<SessionRecord>, AppError> {
        if session.state == SessionState::Idle {
            log::debug!("Session \"{}\" already recorded; ignoring", session.tag);
            return Ok(None);
        }
        session.state = SessionState::Stopping;

        let record = SessionRecord::from_span(
            session.started_at,
            truncate_to_second(ended_at),
            session.tag.clone(),
            description.and_then(flatten_description),
        );
        self.store.append(&record)?;
        session.state = SessionState::Idle;
        log::info!(
            "Recorded {} minute(s) of \"{}\" to {}",
            record.duration_minutes,
            record.tag,
            self.store.location()
        );
        Ok(Some(record))
    }
}

fn now() -> DateTime<Local> {
    Local::now()
}

fn truncate_to_second(t: DateTime<Local>) -> DateTime<Local> {
    t.with_nanosecond(0).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryLog, load_log};
    use std::thread;

    fn dt(s: &str) -> DateTime<Local> {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        naive.and_local_timezone(Local).earliest().unwrap()
    }

    #[test]
    fn start_requires_tag() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        assert!(matches!(recorder.start(None), Err(AppError::EmptyTag)));
        assert!(matches!(recorder.start(Some("")), Err(AppError::EmptyTag)));
        assert!(matches!(recorder.start(Some("  \n")), Err(AppError::EmptyTag)));
        assert!(log.read_lines().unwrap().is_empty());
    }

    #[test]
    fn start_sanitizes_tag_and_writes_nothing() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let session = recorder.start(Some("design, protein")).unwrap();
        assert_eq!(session.tag(), "design; protein");
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(log.record_lines(), 0);
    }

    #[test]
    fn start_truncates_to_seconds() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let session = recorder.start(Some("x")).unwrap();
        assert_eq!(session.started_at().nanosecond(), 0);
    }

    #[test]
    fn finish_appends_one_record() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let mut session = recorder
            .start_at(Some("writing"), dt("2025-06-04 09:00:00"))
            .unwrap();

        let record = recorder
            .finish_at(&mut session, Some("chapter\none"), dt("2025-06-04 09:24:10"))
            .unwrap()
            .unwrap();

        assert_eq!(record.duration_minutes, 25);
        assert_eq!(record.description.as_deref(), Some("chapter one"));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(log.record_lines(), 1);
    }

    #[test]
    fn finish_twice_appends_once() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let mut session = recorder
            .start_at(Some("writing"), dt("2025-06-04 09:00:00"))
            .unwrap();

        let first = recorder
            .finish_at(&mut session, None, dt("2025-06-04 09:10:00"))
            .unwrap();
        let second = recorder
            .finish_at(&mut session, None, dt("2025-06-04 09:20:00"))
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(log.record_lines(), 1);
    }

    #[test]
    fn instant_session_records_one_minute() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let t = dt("2025-06-04 09:00:00");
        let mut session = recorder.start_at(Some("blink"), t).unwrap();
        let record = recorder.finish_at(&mut session, None, t).unwrap().unwrap();
        assert_eq!(record.duration_minutes, 1);
    }

    #[test]
    fn blank_description_is_absent() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let mut session = recorder
            .start_at(Some("x"), dt("2025-06-04 09:00:00"))
            .unwrap();
        let record = recorder
            .finish_at(&mut session, Some("   "), dt("2025-06-04 09:01:00"))
            .unwrap()
            .unwrap();
        assert_eq!(record.description, None);
    }

    #[test]
    fn recorded_session_reads_back_identically() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let mut session = recorder
            .start_at(Some("say \"hi\", then"), dt("2025-06-04 23:59:30"))
            .unwrap();
        let record = recorder
            .finish_at(
                &mut session,
                Some("quoted \"bits\", commas"),
                dt("2025-06-05 00:01:00"),
            )
            .unwrap()
            .unwrap();

        let loaded = load_log(&log).unwrap();
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.records, vec![record.clone()]);
        assert_eq!(loaded.records[0].tag, "say 'hi'; then");
        assert_eq!(loaded.records[0].date.to_string(), "2025-06-04");
        assert_eq!(loaded.records[0].duration_minutes, 2);
    }

    #[test]
    fn await_stop_blocks_until_signal() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let mut session = recorder.start(Some("deep work")).unwrap();
        let handle = session.stop_handle();

        let sender = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(20));
            handle.stop(StopSignal::Interrupt);
        });

        let signal = recorder.await_stop(&mut session).unwrap();
        sender.join().unwrap();
        assert_eq!(signal, StopSignal::Interrupt);
        assert_eq!(session.state(), SessionState::Stopping);
    }

    #[test]
    fn repeated_signals_record_once() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let mut session = recorder.start(Some("deep work")).unwrap();
        let handle = session.stop_handle();
        handle.stop(StopSignal::Interrupt);
        handle.stop(StopSignal::Interrupt);

        recorder.await_stop(&mut session).unwrap();
        recorder.finish(&mut session, None).unwrap();
        // A late second delivery finds the session already recorded
        recorder.await_stop(&mut session).unwrap();
        assert!(recorder.finish(&mut session, None).unwrap().is_none());
        assert_eq!(log.record_lines(), 1);
    }

    #[test]
    fn stop_after_session_dropped_is_noop() {
        let log = MemoryLog::new();
        let recorder = SessionRecorder::new(&log);
        let session = recorder.start(Some("x")).unwrap();
        let handle = session.stop_handle();
        drop(session);
        handle.stop(StopSignal::Requested);
    }
}
