// src/watcher.rs
//
// Polling fallback for edits made to the data file by another process.
// In-process writes are announced by `Storage` itself.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::debounce::Debouncer;
use crate::storage::{ChangeOrigin, Storage, StoreEvent};

pub fn spawn_change_poller(storage: Storage, interval: Duration, debounce: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let notifier = storage.clone();
        let debouncer = Debouncer::spawn(debounce, move |event: StoreEvent| {
            tracing::info!("Data file changed externally, notifying subscribers");
            notifier.publish(event);
        });

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match storage.reload_external().await {
                Ok(true) => {
                    tracing::debug!("External change picked up by poller");
                    debouncer.push(StoreEvent {
                        key: None,
                        origin: ChangeOrigin::External,
                    });
                }
                Ok(false) => {}
                Err(e) => tracing::error!("Polling the data file failed: {:?}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::store::KeyValueStore;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    /// Reports an external change on each of the next `remaining` polls.
    #[derive(Default)]
    struct FlakyDisk {
        remaining: AtomicUsize,
    }

    #[async_trait]
    impl KeyValueStore for FlakyDisk {
        async fn get_item(&self, _key: &str) -> Result<Option<String>, AppError> {
            Ok(None)
        }

        async fn set_item(&self, _key: &str, _value: String) -> Result<(), AppError> {
            Ok(())
        }

        async fn remove_item(&self, _key: &str) -> Result<(), AppError> {
            Ok(())
        }

        async fn reload_external(&self) -> Result<bool, AppError> {
            Ok(self
                .remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_external_edits_yields_one_event() {
        let disk = Arc::new(FlakyDisk::default());
        let storage = Storage::new(disk.clone());
        let mut events = storage.subscribe();

        let poller = spawn_change_poller(
            storage,
            Duration::from_millis(100),
            Duration::from_millis(300),
        );

        disk.remaining.store(3, Ordering::SeqCst);
        sleep(Duration::from_millis(1_000)).await;

        let event = events.try_recv().unwrap();
        assert_eq!(event.key, None);
        assert_eq!(event.origin, ChangeOrigin::External);
        assert!(events.try_recv().is_err());

        poller.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_disk_publishes_nothing() {
        let storage = Storage::new(Arc::new(FlakyDisk::default()));
        let mut events = storage.subscribe();
        let poller = spawn_change_poller(
            storage,
            Duration::from_millis(100),
            Duration::from_millis(300),
        );

        sleep(Duration::from_millis(1_000)).await;
        assert!(events.try_recv().is_err());
        poller.abort();
    }
}
