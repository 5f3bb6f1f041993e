//! Graceful-shutdown signal for [`crate::driver::BlockingDriver`].
//!
//! The async driver uses `tokio::signal::unix::signal` directly, which is
//! already a safe wrapper. The blocking driver has no reactor to register
//! a signal handler with, and the workspace forbids `unsafe_code`, which
//! rules out the conventional `signal(2)`-handler approach (`nix::sys::signal::signal`
//! is an `unsafe fn`). Instead we block `SIGTERM`/`SIGINT` from ever being
//! delivered as a handler and read them off a `signalfd` on every tick,
//! which nix exposes as entirely safe functions.

use nix::sys::signal::{SigSet, Signal};
use nix::sys::signalfd::{SfdFlags, SignalFd};

pub struct ShutdownSignal {
    fd: SignalFd,
}

impl ShutdownSignal {
    /// Block `SIGTERM` and `SIGINT` on the calling thread and arm a
    /// non-blocking `signalfd` to receive them instead. Must be called
    /// before any other thread unblocks these signals for itself.
    pub fn new() -> Result<Self, nix::Error> {
        let mut mask = SigSet::empty();
        mask.add(Signal::SIGTERM);
        mask.add(Signal::SIGINT);
        mask.thread_block()?;

        let fd = SignalFd::with_flags(&mask, SfdFlags::SFD_NONBLOCK)?;
        Ok(Self { fd })
    }

    /// Non-blocking check: `true` once `SIGTERM` or `SIGINT` has arrived.
    pub fn requested(&mut self) -> bool {
        matches!(self.fd.read_signal(), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_a_pending_signal() {
        let mut signal = ShutdownSignal::new().expect("signalfd setup");
        assert!(!signal.requested());
    }
}
