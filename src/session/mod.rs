//! Running focus sessions and the Ctrl-C bridge that stops them

mod interrupt;
mod recorder;

pub(crate) use interrupt::forward_interrupts;
pub(crate) use recorder::{SessionRecorder, StopSignal};
