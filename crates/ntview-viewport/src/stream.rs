//! Async driver for hosts that deliver scroll events over a channel.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

/// One scroll event from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSignal;

/// What the settle callback wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Detach,
}

/// Why [`debounce_stream`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The callback asked to stop listening.
    Detached,
    /// Every sender was dropped.
    Closed,
}

/// Call `on_settled` after each burst of scroll signals once `delay` has
/// passed with no further signal.
///
/// Runs until `on_settled` returns [`Flow::Detach`] or the channel closes.
/// A burst still waiting out its quiet period when the channel closes is
/// dropped without a call.
pub async fn debounce_stream<F>(
    mut rx: mpsc::Receiver<ScrollSignal>,
    delay: Duration,
    mut on_settled: F,
) -> StreamEnd
where
    F: FnMut() -> Flow,
{
    loop {
        // Wait for the first signal of a burst
        if rx.recv().await.is_none() {
            return StreamEnd::Closed;
        }

        let quiet = tokio::time::sleep(delay);
        tokio::pin!(quiet);

        loop {
            tokio::select! {
                _ = &mut quiet => break,
                msg = rx.recv() => {
                    if msg.is_none() {
                        return StreamEnd::Closed;
                    }
                    quiet.as_mut().reset(Instant::now() + delay);
                }
            }
        }

        if on_settled() == Flow::Detach {
            debug!("scroll listener detached");
            return StreamEnd::Detached;
        }
    }
}
