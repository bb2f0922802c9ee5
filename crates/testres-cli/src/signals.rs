//! Wiring of termination signals to supervisor cancellation.

use std::io;

use signal_hook::consts::signal::{SIGINT, SIGTERM};
use testres_server::Cancellation;
use tracing::debug;

use crate::CLI_TARGET;

/// Signals that cancel blocking waits.
pub(crate) const CANCEL_SIGNALS: [i32; 2] = [SIGINT, SIGTERM];

/// Registers handlers that set `cancellation` when an interrupt or
/// termination signal arrives.
///
/// The handlers replace the default disposition, so the host keeps running
/// long enough to report the cancelled wait and exit with its own status.
pub(crate) fn register(cancellation: &Cancellation) -> io::Result<()> {
    for signal in CANCEL_SIGNALS {
        signal_hook::flag::register(signal, cancellation.flag())?;
    }
    debug!(target: CLI_TARGET, signals = ?CANCEL_SIGNALS, "cancellation signals registered");
    Ok(())
}
