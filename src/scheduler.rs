//! Debounced re-evaluation on structural change
//!
//! Change notifications arrive on a channel. A burst of notifications
//! collapses into one evaluation once the channel has been quiet for the
//! debounce window.

use std::time::Duration;
use tokio::sync::mpsc;

/// Cloneable handle used to report that the listing changed
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: mpsc::UnboundedSender<()>,
}

impl ChangeNotifier {
    pub fn notify(&self) {
        // A closed receiver means nobody re-evaluates any more
        let _ = self.tx.send(());
    }
}

#[derive(Debug)]
pub struct Debouncer {
    rx: mpsc::UnboundedReceiver<()>,
    window: Duration,
}

pub fn debounce_channel(window: Duration) -> (ChangeNotifier, Debouncer) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChangeNotifier { tx }, Debouncer { rx, window })
}

impl Debouncer {
    /// Wait for the next burst to settle.
    ///
    /// Every notification restarts the window. Returns `false` once all
    /// notifiers are gone and nothing is pending.
    pub async fn next_settled(&mut self) -> bool {
        if self.rx.recv().await.is_none() {
            return false;
        }
        loop {
            tokio::select! {
                msg = self.rx.recv() => {
                    if msg.is_none() {
                        return true;
                    }
                }
                _ = tokio::time::sleep(self.window) => return true,
            }
        }
    }

    /// Call `on_settled` once per settled burst until the notifiers are dropped
    pub async fn run<F: FnMut()>(mut self, mut on_settled: F) -> usize {
        let mut runs = 0;
        while self.next_settled().await {
            on_settled();
            runs += 1;
        }
        runs
    }
}
