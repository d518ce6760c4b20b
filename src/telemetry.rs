//! Application telemetry events and sinks.
//!
//! Prism runs unattended from schedulers, so alongside tracing logs it emits
//! lightweight structured events capturing operational signals such as the
//! active schema version and per-repository insert counts.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by Prism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the current database schema version after migrations apply.
    SchemaVersionRecorded {
        /// Diesel migration version string (e.g. `20260829000000`).
        schema_version: String,
    },
    /// Records the rows inserted for one repository after a successful commit.
    RepositoryMirrored {
        /// Repository identifier in `owner/name` form.
        repository: String,
        /// Newly inserted pull request rows.
        pull_requests: usize,
        /// Newly inserted comment rows.
        comments: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for log scraping and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    //! Test helpers for asserting on emitted telemetry.

    use std::sync::{Mutex, MutexGuard};

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that captures events for later inspection.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingSink {
        /// Drains and returns the captured events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events_guard().drain(..).collect()
        }

        fn events_guard(&self) -> MutexGuard<'_, Vec<TelemetryEvent>> {
            // A poisoned lock only means an assertion panicked mid-record;
            // the event list itself is still usable.
            self.events
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        }
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, event: TelemetryEvent) {
            self.events_guard().push(event);
        }
    }
}
