//! Cancellable periodic tasks.
//!
//! Every polling cadence in the system runs through a [`Poller`] so
//! teardown is an explicit `stop()` (or drop) rather than a timer
//! someone has to remember to clear. Aborting the task also drops any
//! in-flight fetch at its await point, so a late result can never be
//! applied after teardown.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

pub struct Poller {
    name: String,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn a task that runs `tick` once immediately and then once per
    /// `period` until stopped.
    pub fn spawn<F, Fut>(name: &str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task_name = name.to_string();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // A slow tick delays the next one instead of bursting.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                debug!("Poller[{}]: tick", task_name);
                tick().await;
            }
        });

        Self {
            name: name.to_string(),
            handle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop polling. No further ticks run after this returns; the
    /// current tick, if any, is abandoned mid-await.
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_ticks_accumulate() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let poller = Poller::spawn("test", Duration::from_secs(30), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        // First tick fires immediately, then one per period.
        tokio::time::sleep(Duration::from_secs(95)).await;
        assert_eq!(count.load(Ordering::SeqCst), 4);
        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticking() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let poller = Poller::spawn("test", Duration::from_secs(10), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(25)).await;
        poller.stop();
        let at_stop = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), at_stop);
        assert!(poller.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        {
            let _poller = Poller::spawn("test", Duration::from_secs(10), move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            });
            tokio::time::sleep(Duration::from_secs(15)).await;
        }
        let at_drop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), at_drop);
    }
}
