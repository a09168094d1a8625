// Transient validation notice with a single cancellable auto-hide countdown

use crate::page::NoticeSink;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

// One-shot delayed action that can be cancelled or replaced.
//
// Scheduling a new action cancels the pending one. A generation counter
// guards against an action whose sleep already elapsed racing a later
// `schedule`/`cancel` on a multi-threaded runtime.
#[derive(Debug, Default)]
pub struct CancellableTimer {
    handle: Option<JoinHandle<()>>,
    generation: Arc<AtomicU64>,
}

impl CancellableTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns false when there is no tokio runtime to run the countdown on
    pub fn schedule<F>(&mut self, delay: Duration, action: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!("No tokio runtime available, delayed action dropped");
                return false;
            }
        };

        // Deadline is fixed now, not when the task is first polled
        let deadline = Instant::now() + delay;
        let generation = Arc::clone(&self.generation);
        let scheduled_at = generation.load(Ordering::SeqCst);
        self.handle = Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if generation.load(Ordering::SeqCst) == scheduled_at {
                action();
            }
        }));
        true
    }

    // Returns true if a countdown was still pending
    pub fn cancel(&mut self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        match self.handle.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().map_or(false, |h| !h.is_finished())
    }
}

impl Drop for CancellableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// Per-instance notice; never shared between calculator instances
#[derive(Debug)]
pub struct NoticeTimer {
    sink: NoticeSink,
    message: String,
    delay: Duration,
    timer: CancellableTimer,
}

impl NoticeTimer {
    pub fn new(sink: NoticeSink, message: impl Into<String>, delay: Duration) -> Self {
        Self {
            sink,
            message: message.into(),
            delay,
            timer: CancellableTimer::new(),
        }
    }

    pub fn notify(&mut self, valid: bool) {
        if valid {
            self.dismiss();
            return;
        }

        self.sink.show(&self.message);
        let sink = self.sink.clone();
        // Restarts the countdown; repeated invalid input never stacks timers
        if self.timer.schedule(self.delay, move || sink.hide()) {
            debug!("Notice shown, hiding in {:?}", self.delay);
        }
    }

    pub fn dismiss(&mut self) {
        self.timer.cancel();
        self.sink.hide();
    }

    pub fn is_visible(&self) -> bool {
        self.sink.is_visible()
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    const DELAY: Duration = Duration::from_millis(2200);

    fn notice_timer() -> (NoticeTimer, NoticeSink) {
        let sink = NoticeSink::new();
        let timer = NoticeTimer::new(sink.clone(), "Please choose valid dates and a room type.", DELAY);
        (timer, sink)
    }

    // Lets spawned timer tasks observe the advanced clock
    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_notice_hides_after_delay() {
        let (mut notice, sink) = notice_timer();
        notice.notify(false);
        assert!(sink.is_visible());
        assert_eq!(sink.view().message, "Please choose valid dates and a room type.");

        tokio::time::advance(Duration::from_millis(2199)).await;
        settle().await;
        assert!(sink.is_visible());

        tokio::time::advance(Duration::from_millis(10)).await;
        settle().await;
        assert!(!sink.is_visible());
        assert!(!notice.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_invalid_resets_countdown() {
        let (mut notice, sink) = notice_timer();
        notice.notify(false);

        tokio::time::advance(Duration::from_millis(1500)).await;
        settle().await;
        notice.notify(false);

        // 2200ms after the first notify, but only 700ms after the second
        tokio::time::advance(Duration::from_millis(700)).await;
        settle().await;
        assert!(sink.is_visible());

        tokio::time::advance(Duration::from_millis(1510)).await;
        settle().await;
        assert!(!sink.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_hides_immediately_and_cancels() {
        let (mut notice, sink) = notice_timer();
        notice.notify(false);
        assert!(notice.is_pending());

        notice.notify(true);
        assert!(!sink.is_visible());
        assert!(!notice.is_pending());

        // A later invalid notify must get its own full countdown
        tokio::time::advance(Duration::from_millis(1000)).await;
        notice.notify(false);
        tokio::time::advance(Duration::from_millis(1300)).await;
        settle().await;
        assert!(sink.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_action_never_runs() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = CancellableTimer::new();

        let counter = Arc::clone(&fired);
        assert!(timer.schedule(Duration::from_millis(100), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(timer.cancel());

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!timer.cancel());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_replaces_pending_action() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timer = CancellableTimer::new();

        for _ in 0..5 {
            let counter = Arc::clone(&fired);
            timer.schedule(Duration::from_millis(100), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::advance(Duration::from_millis(150)).await;
        settle().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_without_runtime_notice_stays_until_valid() {
        let (mut notice, sink) = notice_timer();
        notice.notify(false);
        assert!(sink.is_visible());
        assert!(!notice.is_pending());

        notice.notify(true);
        assert!(!sink.is_visible());
    }
}
