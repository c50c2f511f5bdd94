//! Delays an action until input has been quiet for a while.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Slot {
    /// Identifies the most recently scheduled timer.
    seq: u64,
    /// Timer still sleeping. Cleared once it fires.
    pending: Option<JoinHandle<()>>,
}

/// Runs at most one action per burst of calls to [`DebounceGate::schedule`].
///
/// Every call restarts the timer; only a timer that elapses without being
/// restarted or cancelled runs its action. Once the action has started it is
/// no longer cancellable. Dropping the gate cancels a sleeping timer.
#[derive(Debug)]
pub struct DebounceGate {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl DebounceGate {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any sleeping timer with a new one that runs `action`.
    ///
    /// Returns `false` when called outside a Tokio runtime; nothing is
    /// scheduled in that case.
    pub fn schedule<F>(&self, action: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            log::warn!("Debounced action dropped: no Tokio runtime");
            return false;
        };

        let mut slot = self.slot.lock();
        if let Some(previous) = slot.pending.take() {
            previous.abort();
        }
        slot.seq = slot.seq.wrapping_add(1);

        let seq = slot.seq;
        let delay = self.delay;
        let weak_slot = Arc::downgrade(&self.slot);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let Some(slot) = weak_slot.upgrade() else {
                    return;
                };
                let mut slot = slot.lock();
                if slot.seq != seq {
                    return;
                }
                slot.pending = None;
            }
            action.await;
        });
        slot.pending = Some(handle);
        true
    }

    /// Stops a sleeping timer. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot.lock();
        slot.seq = slot.seq.wrapping_add(1);
        match slot.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }
}

impl Drop for DebounceGate {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_action(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_runs_the_action_once() {
        let gate = DebounceGate::new(Duration::from_millis(500));
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            assert!(gate.schedule(counting_action(&runs)));
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!gate.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let gate = DebounceGate::new(Duration::from_millis(500));
        let runs = Arc::new(AtomicUsize::new(0));

        gate.schedule(counting_action(&runs));
        assert!(gate.is_pending());
        assert!(gate.cancel());
        assert!(!gate.cancel());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_gate_cancels_the_timer() {
        let runs = Arc::new(AtomicUsize::new(0));
        {
            let gate = DebounceGate::new(Duration::from_millis(100));
            gate.schedule(counting_action(&runs));
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn scheduling_outside_a_runtime_is_refused() {
        let gate = DebounceGate::new(Duration::from_millis(100));
        assert!(!gate.schedule(async {}));
        assert!(!gate.is_pending());
    }
}
