//! Live local-time clocks for time-bearing cards.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Text shown in a clock before its first update.
pub const TIME_PLACEHOLDER: &str = "—:—:—";

/// Text shown when a time zone identifier cannot be resolved.
pub const TIME_UNAVAILABLE: &str = "N/A";

/// Source of the current instant.
pub trait WallClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Render `now` as en-US 12-hour wall-clock time in `time_zone`, e.g. `3:04:05 PM`.
///
/// Identifiers match case-insensitively (`asia/tokyo` works); unknown or
/// malformed ones yield [`TIME_UNAVAILABLE`].
#[must_use]
pub fn format_local_time(now: DateTime<Utc>, time_zone: &str) -> String {
    match Tz::from_str_insensitive(time_zone) {
        Ok(tz) => now.with_timezone(&tz).format("%-I:%M:%S %p").to_string(),
        Err(e) => {
            debug!("Unsupported time zone {time_zone:?}: {e}");
            TIME_UNAVAILABLE.to_string()
        }
    }
}

/// The live text of one card's clock.
///
/// Owned by its card. Once detached it ignores every further update, so a
/// tick racing with cancellation can never write to a removed card.
#[derive(Debug)]
pub struct TimeNode {
    time_zone: String,
    state: Mutex<NodeState>,
}

#[derive(Debug)]
struct NodeState {
    text: String,
    updates: u64,
    detached: bool,
}

impl TimeNode {
    pub(crate) fn new(time_zone: impl Into<String>) -> Self {
        Self {
            time_zone: time_zone.into(),
            state: Mutex::new(NodeState {
                text: TIME_PLACEHOLDER.to_string(),
                updates: 0,
                detached: false,
            }),
        }
    }

    #[must_use]
    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Number of times the text has been refreshed.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.lock().updates
    }

    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.lock().detached
    }

    /// Recompute the displayed time. Returns `false` once the node is detached.
    fn refresh(&self, clock: &dyn WallClock) -> bool {
        let text = format_local_time(clock.now(), &self.time_zone);
        let mut state = self.lock();
        if state.detached {
            return false;
        }
        state.text = text;
        state.updates += 1;
        true
    }

    pub(crate) fn detach(&self) {
        self.lock().detached = true;
    }

    fn lock(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to one recurring clock update.
///
/// Cancelling is idempotent and immediate: the node is detached under its
/// lock before the task is aborted. Dropping the handle cancels it.
#[derive(Debug)]
pub struct ClockTask {
    node: Weak<TimeNode>,
    handle: JoinHandle<()>,
}

impl ClockTask {
    fn spawn(node: &Arc<TimeNode>, clock: Arc<dyn WallClock>, period: Duration) -> Self {
        let weak = Arc::downgrade(node);
        let task_node = weak.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(node) = task_node.upgrade() else {
                    break;
                };
                if !node.refresh(clock.as_ref()) {
                    break;
                }
            }
        });

        Self { node: weak, handle }
    }

    pub fn cancel(&self) {
        if let Some(node) = self.node.upgrade() {
            node.detach();
        }
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ClockTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Every clock task started for the current render.
#[derive(Debug, Default)]
pub struct ActiveTimers {
    tasks: Vec<ClockTask>,
}

impl ActiveTimers {
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    fn push(&mut self, task: ClockTask) {
        self.tasks.push(task);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Cancel every task, then empty the collection. Returns how many were stopped.
    pub fn cancel_all(&mut self) -> usize {
        for task in &self.tasks {
            task.cancel();
        }
        let cancelled = self.tasks.len();
        self.tasks.clear();
        cancelled
    }
}

/// Starts and stops the per-card clocks.
///
/// Must be used from within a tokio runtime: each attached node gets its own
/// spawned task.
pub struct ClockRefresher {
    clock: Arc<dyn WallClock>,
    period: Duration,
    timers: ActiveTimers,
}

impl ClockRefresher {
    pub fn new(clock: Arc<dyn WallClock>, period: Duration) -> Self {
        Self {
            clock,
            period,
            timers: ActiveTimers::new(),
        }
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Show the current time on each node right away, then keep it updated
    /// once per period until cancelled.
    pub fn attach<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Arc<TimeNode>>) {
        let mut started = 0usize;
        for node in nodes {
            node.refresh(self.clock.as_ref());
            self.timers
                .push(ClockTask::spawn(node, Arc::clone(&self.clock), self.period));
            started += 1;
        }
        if started > 0 {
            info!("Started {started} clock(s), refreshing every {:?}", self.period);
        }
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            info!("Cancelled {cancelled} clock(s)");
        }
        cancelled
    }
}

impl Default for ClockRefresher {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Duration::from_secs(1))
    }
}

impl std::fmt::Debug for ClockRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockRefresher")
            .field("period", &self.period)
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl WallClock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed() -> Arc<dyn WallClock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 1, 15, 20, 4, 5).unwrap(),
        ))
    }

    #[test]
    fn formats_twelve_hour_local_time() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 20, 4, 5).unwrap();
        assert_eq!(format_local_time(now, "America/New_York"), "3:04:05 PM");
        assert_eq!(format_local_time(now, "Asia/Phnom_Penh"), "3:04:05 AM");
        assert_eq!(format_local_time(now, "UTC"), "8:04:05 PM");
    }

    #[test]
    fn time_zone_lookup_ignores_case() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 20, 4, 5).unwrap();
        assert_eq!(format_local_time(now, "asia/tokyo"), "5:04:05 AM");
        assert_eq!(format_local_time(now, "AMERICA/NEW_YORK"), "3:04:05 PM");
    }

    #[test]
    fn active_timers_start_empty() {
        let timers = ActiveTimers::new();
        assert!(timers.is_empty());
        assert_eq!(timers.len(), 0);
    }

    #[test]
    fn invalid_time_zone_is_unavailable() {
        let now = Utc::now();
        assert_eq!(format_local_time(now, "Mars/Olympus_Mons"), TIME_UNAVAILABLE);
        assert_eq!(format_local_time(now, ""), TIME_UNAVAILABLE);
    }

    #[test]
    fn detached_node_ignores_refresh() {
        let node = TimeNode::new("Asia/Tokyo");
        assert_eq!(node.text(), TIME_PLACEHOLDER);

        assert!(node.refresh(fixed().as_ref()));
        assert_eq!(node.text(), "5:04:05 AM");
        assert_eq!(node.updates(), 1);

        node.detach();
        assert!(!node.refresh(fixed().as_ref()));
        assert_eq!(node.updates(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn attach_updates_immediately_then_every_period() {
        let node = Arc::new(TimeNode::new("Asia/Phnom_Penh"));
        let mut refresher = ClockRefresher::new(fixed(), Duration::from_secs(1));

        refresher.attach([&node]);
        assert_eq!(node.text(), "3:04:05 AM");
        assert_eq!(node.updates(), 1);
        assert_eq!(refresher.active_count(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(node.updates(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_stops_ticks() {
        let node = Arc::new(TimeNode::new("Europe/Paris"));
        let mut refresher = ClockRefresher::new(fixed(), Duration::from_secs(1));
        refresher.attach([&node]);

        assert_eq!(refresher.cancel_all(), 1);
        assert_eq!(refresher.active_count(), 0);
        assert!(node.is_detached());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(node.updates(), 1);
        assert_eq!(refresher.cancel_all(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let node = Arc::new(TimeNode::new("Europe/Paris"));
        let task = ClockTask::spawn(&node, fixed(), Duration::from_secs(1));

        task.cancel();
        task.cancel();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(task.is_finished());
        assert!(node.is_detached());
    }

    #[tokio::test(start_paused = true)]
    async fn task_ends_when_node_is_dropped() {
        let node = Arc::new(TimeNode::new("Europe/Paris"));
        let task = ClockTask::spawn(&node, fixed(), Duration::from_secs(1));
        drop(node);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_zone_keeps_ticking_as_unavailable() {
        let node = Arc::new(TimeNode::new("Not/AZone"));
        let mut refresher = ClockRefresher::new(fixed(), Duration::from_secs(1));
        refresher.attach([&node]);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(node.text(), TIME_UNAVAILABLE);
        assert_eq!(node.updates(), 2);
    }
}
