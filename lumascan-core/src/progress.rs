//! Read-progress reporting and cooperative cancellation.
//!
//! The report reader performs blocking sequential I/O. These types let a
//! consumer watch the reader's position in the document (for a progress bar
//! against the file size) and request an early stop between element reads.
//! Cancellation is cooperative: the flag is checked at the top of each
//! iteration, never preemptively.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{CoreError, CoreResult};

/// Shared cancellation flag for one scan.
///
/// Clones share the underlying flag, so a consumer can hand one clone to the
/// scan and keep another to trip from a signal handler or UI thread.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a cooperative stop. The reader honors it at the next
    /// element boundary.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Trait for receiving read-progress updates.
///
/// Implement this to drive a progress display. The reader reports its byte
/// position in the document periodically; the consumer knows the document
/// size and can turn that into a percentage.
pub trait ScanObserver: Send + Sync {
    /// Called with the reader's current byte position in the document.
    fn on_read_position(&self, bytes: u64);
}

/// No-op implementation of `ScanObserver` for when progress reporting is
/// not needed, such as in tests or non-interactive use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScanObserver;

impl ScanObserver for NullScanObserver {
    fn on_read_position(&self, _bytes: u64) {}
}

/// Bundles the cancellation flag and progress observer handed to a scan.
pub struct ScanMonitor<'a> {
    cancel: CancelFlag,
    observer: &'a dyn ScanObserver,
}

impl<'a> ScanMonitor<'a> {
    #[must_use]
    pub fn new(cancel: CancelFlag, observer: &'a dyn ScanObserver) -> Self {
        Self { cancel, observer }
    }

    /// Returns `Err(CoreError::Cancelled)` once a stop has been requested.
    pub fn check_cancelled(&self) -> CoreResult<()> {
        if self.cancel.is_stop_requested() {
            log::debug!("stop requested, abandoning scan");
            return Err(CoreError::Cancelled);
        }
        Ok(())
    }

    pub fn report_position(&self, bytes: u64) {
        self.observer.on_read_position(bytes);
    }
}

impl Default for ScanMonitor<'_> {
    fn default() -> Self {
        static NULL_OBSERVER: NullScanObserver = NullScanObserver;
        Self {
            cancel: CancelFlag::default(),
            observer: &NULL_OBSERVER,
        }
    }
}
