//! Ctrl-C → stop signal bridge
//!
//! The handler is registered before `forward_interrupts` returns, so an
//! interrupt arriving right after the session starts is never lost and never
//! kills the process. Every Ctrl-C is forwarded; the session ignores repeats.

use std::thread;

use tokio::runtime::Builder;

use crate::error::AppError;
use crate::session::StopSignal;
use crate::session::recorder::StopHandle;

/// Install a Ctrl-C listener that stops the session behind `handle`.
pub(crate) fn forward_interrupts(handle: StopHandle) -> Result<(), AppError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Interrupt(e.to_string()))?;

    let mut listener = {
        let _guard = runtime.enter();
        register()?
    };

    thread::Builder::new()
        .name("focuslog-interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                while listener.recv().await.is_some() {
                    log::debug!("Received Ctrl-C");
                    handle.stop(StopSignal::Interrupt);
                }
            });
        })
        .map_err(|e| AppError::Interrupt(e.to_string()))?;

    Ok(())
}

#[cfg(unix)]
fn register() -> Result<tokio::signal::unix::Signal, AppError> {
    use tokio::signal::unix::{SignalKind, signal};
    signal(SignalKind::interrupt()).map_err(|e| AppError::Interrupt(e.to_string()))
}

#[cfg(windows)]
fn register() -> Result<tokio::signal::windows::CtrlC, AppError> {
    tokio::signal::windows::ctrl_c().map_err(|e| AppError::Interrupt(e.to_string()))
}
