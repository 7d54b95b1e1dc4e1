//! Shutdown flag for the dashboard server loop.
//!
//! SIGINT/SIGTERM set the flag so the server finishes the request in hand and
//! returns; a second signal while the flag is already set exits with code 1.

use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Register the termination handlers and return the flag they set.
pub fn setup_shutdown_handlers() -> Result<Arc<AtomicBool>, std::io::Error> {
    let term_now = Arc::new(AtomicBool::new(false));

    for sig in TERM_SIGNALS {
        // Armed only once term_now is true: the second signal force-quits.
        flag::register_conditional_shutdown(*sig, 1, Arc::clone(&term_now))?;
        flag::register(*sig, Arc::clone(&term_now))?;
    }

    Ok(term_now)
}
