//! Trailing-edge debouncer for keystroke-driven fetches.
//!
//! Successive [`Debouncer::call`]s within the quiet window discard earlier
//! pending values entirely; only the last value is forwarded once the
//! window elapses. Construct one per component lifetime so pending timers
//! coalesce instead of racing each other.

use std::time::Duration;
use tokio::sync::mpsc;

/// Quiet window between the last keystroke and the fetch it triggers.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task. Trailing values are forwarded to `output`;
    /// dropping the `Debouncer` discards whatever is still pending.
    pub fn new(window: Duration, output: mpsc::UnboundedSender<T>) -> Self {
        let (input, mut pending) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            while let Some(mut latest) = pending.recv().await {
                loop {
                    match tokio::time::timeout(window, pending.recv()).await {
                        // A newer value landed inside the window; the old
                        // one is discarded without firing.
                        Ok(Some(newer)) => latest = newer,
                        Ok(None) => return,
                        Err(_elapsed) => {
                            let _ = output.send(latest);
                            break;
                        }
                    }
                }
            }
        });

        Self { input }
    }

    pub fn call(&self, value: T) {
        let _ = self.input.send(value);
    }
}
