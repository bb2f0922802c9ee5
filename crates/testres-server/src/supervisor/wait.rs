//! Cancellable, optionally bounded wait on a service process.

use std::io;
use std::process::ExitStatus;
use std::thread;
use std::time::{Duration, Instant};

use crate::cancel::Cancellation;
use crate::launcher::ServerProcess;

/// Interval between exit polls.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub(super) enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut,
    Cancelled,
}

/// Polls `process` until it exits, `deadline` passes, or `cancellation` is
/// requested. Without a deadline the wait is unbounded.
pub(super) fn wait_until(
    process: &mut dyn ServerProcess,
    deadline: Option<Instant>,
    cancellation: &Cancellation,
) -> io::Result<WaitOutcome> {
    loop {
        if let Some(status) = process.try_wait()? {
            return Ok(WaitOutcome::Exited(status));
        }
        if cancellation.is_cancelled() {
            return Ok(WaitOutcome::Cancelled);
        }
        let pause = match deadline {
            Some(limit) => {
                let remaining = limit.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Ok(WaitOutcome::TimedOut);
                }
                remaining.min(POLL_INTERVAL)
            }
            None => POLL_INTERVAL,
        };
        thread::sleep(pause);
    }
}
