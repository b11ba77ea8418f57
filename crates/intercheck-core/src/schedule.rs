// ── Loop scheduling ──
//
// Each polling loop owns one `Schedule` (its single pending timer) and
// one trigger receiver. Other components hold a `LoopHandle` and can ask
// for a run, but only the loop itself touches its timer.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A request sent to a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Cancel the pending run and run immediately.
    Now,
    /// Replace the pending run with one `after` from now.
    After(Duration),
}

/// Sending half of a loop's trigger channel.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    name: &'static str,
    tx: mpsc::UnboundedSender<Trigger>,
}

impl LoopHandle {
    pub fn channel(name: &'static str) -> (Self, mpsc::UnboundedReceiver<Trigger>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { name, tx }, rx)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run_now(&self) {
        self.send(Trigger::Now);
    }

    pub fn run_after(&self, after: Duration) {
        self.send(Trigger::After(after));
    }

    fn send(&self, trigger: Trigger) {
        if self.tx.send(trigger).is_err() {
            debug!(target_loop = self.name, ?trigger, "loop stopped, trigger dropped");
        }
    }
}

/// At most one pending deadline.
#[derive(Debug, Default)]
pub struct Schedule {
    deadline: Option<Instant>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending run and arm a new one. Returns `true` if a
    /// pending run was replaced.
    pub fn arm(&mut self, after: Duration) -> bool {
        self.deadline.replace(Instant::now() + after).is_some()
    }

    /// Returns `true` if a pending run was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolves at the deadline; never resolves while disarmed.
    pub async fn elapsed(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

/// Drive a self-rescheduling loop until cancelled.
///
/// Runs once immediately, then `period` after each run *completes*.
/// Triggers are only read between runs, so runs never overlap; those
/// queued during a run are merged into one pending deadline.
pub async fn drive<F, Fut>(
    name: &'static str,
    period: Duration,
    mut triggers: mpsc::UnboundedReceiver<Trigger>,
    cancel: CancellationToken,
    mut run: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut schedule = Schedule::new();
    schedule.arm(Duration::ZERO);
    debug!(target_loop = name, ?period, "loop started");

    loop {
        let due = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            trigger = triggers.recv() => match trigger {
                Some(Trigger::Now) => true,
                Some(Trigger::After(after)) => {
                    schedule.arm(after);
                    false
                }
                None => break,
            },
            () = schedule.elapsed() => true,
        };

        if !due {
            continue;
        }

        schedule.cancel();
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = run() => {}
        }
        schedule.arm(period);
        absorb_pending(&mut triggers, &mut schedule);
    }

    debug!(target_loop = name, "loop stopped");
}

/// Fold triggers queued during a run into the single pending deadline.
/// Any number of `Now` requests collapse into one immediate run; the
/// last request received wins.
fn absorb_pending(triggers: &mut mpsc::UnboundedReceiver<Trigger>, schedule: &mut Schedule) {
    while let Ok(trigger) = triggers.try_recv() {
        let after = match trigger {
            Trigger::Now => Duration::ZERO,
            Trigger::After(after) => after,
        };
        schedule.arm(after);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn spawn_counter(
        period: Duration,
        run_time: Duration,
    ) -> (LoopHandle, Arc<AtomicUsize>, CancellationToken) {
        let (handle, rx) = LoopHandle::channel("test");
        let count = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let counter = Arc::clone(&count);
        tokio::spawn(drive("test", period, rx, cancel.clone(), move || {
            let counter = Arc::clone(&counter);
            async move {
                tokio::time::sleep(run_time).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));
        (handle, count, cancel)
    }

    async fn settle(d: Duration) {
        tokio::time::sleep(d).await;
    }

    #[tokio::test(start_paused = true)]
    async fn arm_replaces_pending_deadline() {
        let mut schedule = Schedule::new();
        assert!(!schedule.arm(Duration::from_secs(5)));
        assert!(schedule.arm(Duration::from_secs(2)));

        let start = Instant::now();
        schedule.elapsed().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_schedule_never_fires() {
        let mut schedule = Schedule::new();
        schedule.arm(Duration::from_secs(1));
        assert!(schedule.cancel());
        assert!(!schedule.is_armed());

        let fired = tokio::time::timeout(Duration::from_secs(60), schedule.elapsed()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn runs_immediately_then_completion_relative() {
        let (_handle, count, cancel) =
            spawn_counter(Duration::from_secs(5), Duration::from_secs(1));

        // First run starts at t=0 and completes at t=1.
        settle(Duration::from_millis(1500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Next run starts at t=6 (completion + period), completes at t=7.
        settle(Duration::from_secs(5)).await; // t=6.5
        assert_eq!(count.load(Ordering::SeqCst), 1);
        settle(Duration::from_secs(1)).await; // t=7.5
        assert_eq!(count.load(Ordering::SeqCst), 2);

        cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn run_now_preempts_pending_timer() {
        let (handle, count, cancel) =
            spawn_counter(Duration::from_secs(3600), Duration::ZERO);

        settle(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        handle.run_now();
        settle(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        // The hourly timer was re-armed from the out-of-band run.
        settle(Duration::from_secs(3599)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        settle(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn run_after_replaces_normal_cadence() {
        let (handle, count, cancel) = spawn_counter(Duration::from_secs(5), Duration::ZERO);

        settle(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        handle.run_after(Duration::from_secs(2));
        settle(Duration::from_millis(2100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        // Back on the normal five second cadence afterwards.
        settle(Duration::from_secs(4)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        settle(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_during_run_waits_for_completion() {
        let (handle, count, cancel) =
            spawn_counter(Duration::from_secs(60), Duration::from_secs(2));

        settle(Duration::from_secs(1)).await; // first run in flight
        handle.run_now();
        settle(Duration::from_millis(1500)).await; // t=2.5, first run done
        assert_eq!(count.load(Ordering::SeqCst), 1);
        settle(Duration::from_secs(2)).await; // t=4.5, queued run done
        assert_eq!(count.load(Ordering::SeqCst), 2);

        cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn requests_during_run_collapse_into_one() {
        let (handle, count, cancel) =
            spawn_counter(Duration::from_secs(60), Duration::from_secs(2));

        settle(Duration::from_secs(1)).await; // first run in flight
        handle.run_now();
        handle.run_now();
        handle.run_now();

        settle(Duration::from_secs(20)).await; // t=21
        assert_eq!(count.load(Ordering::SeqCst), 2);

        cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn last_request_during_run_wins() {
        let (handle, count, cancel) =
            spawn_counter(Duration::from_secs(60), Duration::from_secs(2));

        settle(Duration::from_secs(1)).await; // first run in flight
        handle.run_now();
        handle.run_after(Duration::from_secs(10));

        // No immediate rerun at t=2; the next run starts at t=12.
        settle(Duration::from_secs(12)).await; // t=13
        assert_eq!(count.load(Ordering::SeqCst), 1);
        settle(Duration::from_secs(2)).await; // t=15
        assert_eq!(count.load(Ordering::SeqCst), 2);

        cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_after_stop_is_harmless() {
        let (handle, count, cancel) = spawn_counter(Duration::from_secs(5), Duration::ZERO);
        settle(Duration::from_millis(10)).await;
        cancel.cancel();
        settle(Duration::from_millis(10)).await;

        handle.run_now();
        settle(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
