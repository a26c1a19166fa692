pub mod shutdown;

pub use shutdown::{ShutdownHandle, ShutdownSignal, shutdown_channel};

use std::time::Duration;

use crate::api::{FetchError, StatusSource};
use crate::domain::VehicleId;
use crate::notify::{Notifier, Severity};

/// Sequential polling orchestrator.
///
/// Polls the fleet one vehicle at a time, collects the vehicles found
/// outside their geofence, and reports them in a single aggregate warning
/// per cycle. Loop continuity dominates everything else: no fetch,
/// validation, or delivery failure may stop the loop.
pub struct Monitor<S, N> {
    source: S,
    notifier: N,
}

impl<S: StatusSource, N: Notifier> Monitor<S, N> {
    pub fn new(source: S, notifier: N) -> Self {
        Self { source, notifier }
    }

    /// Poll every vehicle once, in order, and return the ids found
    /// outside their geofence.
    ///
    /// Fetch and validation failures are reported at Error severity and
    /// the vehicle is skipped for this cycle; the next cycle retries it
    /// naturally. A skipped vehicle never enters the violation batch.
    pub fn poll_cycle(&self, fleet: &[VehicleId]) -> Vec<VehicleId> {
        let mut out_of_bounds = Vec::new();

        self.notifier.notify(Severity::Info, "polling all vehicles");
        for &id in fleet {
            self.notifier
                .notify(Severity::Info, &format!("polling vehicle {id}"));
            match self.source.vehicle_status(id) {
                Ok(status) => {
                    if !status.is_in_bounds() {
                        out_of_bounds.push(id);
                    }
                }
                Err(FetchError::InvalidFence(e)) => self.notifier.notify(
                    Severity::Error,
                    &format!("vehicle {id} reported an unusable geofence ({e}); skipping this cycle"),
                ),
                Err(e) => self.notifier.notify(
                    Severity::Error,
                    &format!("failed to poll vehicle {id} ({e}); skipping this cycle"),
                ),
            }
        }
        self.notifier
            .notify(Severity::Info, "all vehicles polled this cycle");

        out_of_bounds
    }

    /// Run the polling loop until a shutdown request arrives.
    ///
    /// Each cycle polls the whole fleet, emits one aggregate warning when
    /// any vehicle is out of bounds, then sleeps for `interval`. Shutdown
    /// is observed at the sleep point, so the in-flight cycle always
    /// completes before the loop exits.
    pub fn run(&self, fleet: &[VehicleId], interval: Duration, shutdown: ShutdownSignal) {
        loop {
            let out_of_bounds = self.poll_cycle(fleet);
            if !out_of_bounds.is_empty() {
                self.notifier.notify(
                    Severity::Warning,
                    &format!(
                        "vehicles outside their designated geofence: {}",
                        join_ids(&out_of_bounds)
                    ),
                );
            }
            if shutdown.sleep(interval) {
                self.notifier
                    .notify(Severity::Info, "shutdown requested; monitor stopping");
                return;
            }
        }
    }
}

fn join_ids(ids: &[VehicleId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
