//! Trailing-edge debounce on top of tokio timers.
//!
//! Every call restarts the delay. Only the last call of a burst is
//! forwarded, once, after the delay elapses undisturbed. Earlier calls
//! are dropped, not merged.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Wraps a callback so that rapid successive calls collapse into one.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<A> {
    delay: Duration,
    callback: Arc<dyn Fn(A) + Send + Sync + 'static>,
    pending: Option<JoinHandle<()>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new(delay: Duration, callback: impl Fn(A) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `arg` to be forwarded after the delay, replacing any
    /// call still waiting.
    ///
    /// Forwarding always happens on a spawned task, never on the
    /// caller's stack, even with a zero delay.
    pub fn call(&mut self, arg: A) {
        self.cancel();

        let delay = self.delay;
        let callback = Arc::clone(&self.callback);
        self.pending = Some(tokio::spawn(async move {
            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(delay).await;
            }
            callback(arg);
        }));
    }

    /// Drop the waiting call, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a call is still waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |arg: String| sink.lock().unwrap().push(arg))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_call() {
        let (calls, callback) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), callback);

        for query in ["r", "ru", "rus", "rust"] {
            debouncer.call(query.to_string());
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["rust".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_fire() {
        let (calls, callback) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(50), callback);

        debouncer.call("a".to_string());
        tokio::time::sleep(Duration::from_millis(80)).await;
        debouncer.call("b".to_string());
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_is_deferred() {
        let (calls, callback) = recorder();
        let mut debouncer = Debouncer::new(Duration::ZERO, callback);

        debouncer.call("now".to_string());
        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["now".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_call() {
        let (calls, callback) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), callback);

        debouncer.call("gone".to_string());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (calls, callback) = recorder();
        {
            let mut debouncer = Debouncer::new(Duration::from_millis(100), callback);
            debouncer.call("gone".to_string());
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(calls.lock().unwrap().is_empty());
    }
}
