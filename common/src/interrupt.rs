use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::MergeError;

/// Shared cancellation flag.
///
/// The signal watcher raises it; the merge and write paths poll it between
/// units of work and bail out with [`MergeError::Interrupted`].
///
/// The writer also announces when it starts staging output next to the
/// destination. From then on the watcher must let it run to completion, since
/// only the worker can discard its temporary file.
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    raised: Arc<AtomicBool>,
    staging: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), MergeError> {
        if self.is_raised() {
            return Err(MergeError::Interrupted);
        }
        Ok(())
    }

    /// Marks the start of output staging, unless the flag is already raised.
    ///
    /// Either this call sees a concurrent [`raise`](Self::raise), or the
    /// raiser sees [`is_staging`](Self::is_staging) return `true`.
    pub fn begin_staging(&self) -> Result<(), MergeError> {
        self.staging.store(true, Ordering::SeqCst);
        self.check()
    }

    pub fn is_staging(&self) -> bool {
        self.staging.load(Ordering::SeqCst)
    }
}
