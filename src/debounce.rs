// src/debounce.rs

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delivers the most recent pushed value once `delay` has passed without a
/// newer push. Superseded values are dropped, not merged.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn<F>(delay: Duration, mut on_fire: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let task = tokio::spawn(async move {
            while let Some(mut pending) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => pending = value,
                            // Sender dropped: flush what we have and stop.
                            None => {
                                on_fire(pending);
                                return;
                            }
                        },
                        _ = tokio::time::sleep(delay) => {
                            on_fire(pending);
                            break;
                        }
                    }
                }
            }
        });
        Self { tx, task }
    }

    pub fn push(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::warn!("Debouncer task is gone, dropping value");
        }
    }

    /// Stops accepting values and waits until any pending one was delivered.
    pub async fn flush(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            tracing::error!("Debouncer task failed: {:?}", e);
        }
    }
}
