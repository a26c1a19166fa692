use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Create a linked shutdown handle/signal pair
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = mpsc::channel();
    (ShutdownHandle { tx }, ShutdownSignal { rx })
}

/// Requests a cooperative stop of the monitor loop
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

impl ShutdownHandle {
    /// Ask the monitor to stop. Requests queue up: one sent before or
    /// during a cycle is observed at the next sleep point, after the
    /// in-flight cycle completes.
    pub fn request(&self) {
        let _ = self.tx.send(());
    }
}

/// Receive side of the shutdown channel, owned by the monitor loop
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: Receiver<()>,
}

impl ShutdownSignal {
    /// Wait out one polling interval, returning true if a stop was
    /// requested.
    ///
    /// Once every handle is dropped nobody can request a stop anymore;
    /// the wait degrades to a plain sleep and the loop runs until the
    /// process is terminated, like the always-on deployment mode.
    pub(crate) fn sleep(&self, interval: Duration) -> bool {
        match self.rx.recv_timeout(interval) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(interval);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_times_out_without_request() {
        let (_handle, signal) = shutdown_channel();
        assert!(!signal.sleep(Duration::from_millis(5)));
    }

    #[test]
    fn test_queued_request_is_observed() {
        let (handle, signal) = shutdown_channel();
        handle.request();
        // Returns immediately; the interval is never waited out
        assert!(signal.sleep(Duration::from_secs(5)));
    }

    #[test]
    fn test_request_through_clone() {
        let (handle, signal) = shutdown_channel();
        handle.clone().request();
        assert!(signal.sleep(Duration::from_secs(5)));
    }

    #[test]
    fn test_dropped_handles_degrade_to_plain_sleep() {
        let (handle, signal) = shutdown_channel();
        drop(handle);
        assert!(!signal.sleep(Duration::from_millis(5)));
    }
}
