//! Reminder scheduler: periodic scan of the agenda store for items whose
//! notification window has opened.
//!
//! Per-item reminder lifecycle within one session (conceptual):
//! `Dormant -> Armed -> Fired -> (Dismissed | Completed)`.
//!
//! - Dormant: no due date/time, completed, or already fired this session.
//! - Armed -> Fired: a scan tick lands inside the item's window
//!   ([`window::in_notification_window`]) and the item is neither pending
//!   nor dismissed; it is appended to the pending queue.
//! - Fired -> Dismissed: the id goes into the session `DismissedSet`; no
//!   further firing this session regardless of the remaining window.
//! - Fired -> Completed: completion through the store, then dismissed.
//!
//! The queue and the DismissedSet are process-lifetime only: a restart
//! resets both, so a dismissed item still inside its window fires again
//! in the next session. Preserved on purpose, do not persist the set
//! without signaling the behavior change.

pub mod window;

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;

use crate::domain::{AgendaItem, ItemId, Urgency};
use crate::ports::Clock;
use crate::store::AgendaStore;

/// Default wall-clock cadence of the scan loop.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// A fired reminder awaiting acknowledgment. Transient: lives only in
/// the scheduler's queue, never persisted.
///
/// Queue order is arrival order, and arrival order IS the presentation
/// priority: the presenter always surfaces the head of the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingNotification {
    pub item_id: ItemId,
    pub title: String,
    pub urgency: Urgency,
    pub due_at: NaiveDateTime,
    pub queued_at: DateTime<Utc>,
}

/// Session-scoped scheduler state.
struct SchedulerState {
    pending: VecDeque<PendingNotification>,
    dismissed: HashSet<ItemId>,
}

/// Reminder scheduler service.
///
/// Explicitly owned (no ambient globals): whoever owns the UI session
/// holds this instance, and [`SchedulerHandle::shutdown`] tears the tick
/// loop down with it. A fresh instance == a fresh session (empty queue,
/// empty DismissedSet).
pub struct ReminderScheduler {
    store: Arc<AgendaStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<SchedulerState>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<AgendaStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: Mutex::new(SchedulerState {
                pending: VecDeque::new(),
                dismissed: HashSet::new(),
            }),
        }
    }

    /// One scan pass over the store, in its iteration (insertion) order.
    ///
    /// Idempotent: a second pass on unchanged inputs queues nothing new —
    /// already-pending and dismissed ids are suppressed. All items that
    /// become eligible on the same tick are appended together.
    pub async fn scan_tick(&self) {
        let now = self.clock.now();
        let scan_instant = now.naive_utc();
        let items = self.store.snapshot().await;

        let mut state = self.state.lock().await;
        for item in &items {
            if !self.is_armed(item, &state) {
                continue;
            }
            // is_armed guarantees both halves are present.
            let Some(due_at) = item.due_instant() else {
                continue;
            };
            if window::in_notification_window(due_at, item.notification_offset_min, scan_instant) {
                tracing::debug!(item = %item.id, %due_at, "reminder fired");
                state.pending.push_back(PendingNotification {
                    item_id: item.id,
                    title: item.title.clone(),
                    urgency: item.urgency,
                    due_at,
                    queued_at: now,
                });
            }
        }
    }

    /// Armed = has date+time, not completed, not already fired this
    /// session (pending or dismissed). Everything else is Dormant.
    fn is_armed(&self, item: &AgendaItem, state: &SchedulerState) -> bool {
        !item.completed
            && item.due_date.is_some()
            && item.due_time.is_some()
            && !state.dismissed.contains(&item.id)
            && !state.pending.iter().any(|p| p.item_id == item.id)
    }

    /// Head of the pending queue (what the presenter shows).
    pub async fn front(&self) -> Option<PendingNotification> {
        self.state.lock().await.pending.front().cloned()
    }

    /// Full pending queue, arrival order.
    pub async fn pending(&self) -> Vec<PendingNotification> {
        self.state.lock().await.pending.iter().cloned().collect()
    }

    /// Dismiss a fired reminder: out of the queue, into the session
    /// DismissedSet. No store mutation.
    pub async fn dismiss(&self, id: ItemId) {
        let mut state = self.state.lock().await;
        state.pending.retain(|p| p.item_id != id);
        state.dismissed.insert(id);
    }

    /// Resolve a fired reminder by completing the item: completion goes
    /// through the store (visible to the very next tick), then the id is
    /// dismissed like any other acknowledgment.
    pub async fn complete(&self, id: ItemId) {
        // A pending item is uncompleted by construction, so the toggle
        // always lands on completed=true.
        self.store.toggle_completion(id).await;
        self.dismiss(id).await;
    }

    /// Start the fixed-interval tick loop. The returned handle owns the
    /// timer; dropping the session without calling `shutdown` would leak
    /// the task, so teardown must go through the handle.
    pub fn spawn(self: &Arc<Self>, interval: Duration) -> SchedulerHandle {
        let scheduler = Arc::clone(self);
        let shutdown = Arc::new(Notify::new());
        let signal = Arc::clone(&shutdown);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => scheduler.scan_tick().await,
                    _ = signal.notified() => break,
                }
            }
        });

        SchedulerHandle { shutdown, task }
    }
}

/// Cancellation handle for the tick loop.
pub struct SchedulerHandle {
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the loop and wait for the task to finish.
    pub async fn shutdown(self) {
        self.shutdown.notify_one();
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemDraft;
    use crate::impls::InMemoryItemStore;
    use crate::ports::{FixedClock, UlidGenerator};
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, h, m, s).unwrap()
    }

    async fn session(
        start: DateTime<Utc>,
    ) -> (Arc<AgendaStore>, Arc<ReminderScheduler>, Arc<FixedClock>, Arc<InMemoryItemStore>) {
        let clock = Arc::new(FixedClock::new(start));
        let storage = Arc::new(InMemoryItemStore::default());
        let store = Arc::new(
            AgendaStore::open(
                storage.clone(),
                Arc::new(UlidGenerator::new(FixedClock::new(start))),
                clock.clone(),
            )
            .await,
        );
        let scheduler = Arc::new(ReminderScheduler::new(store.clone(), clock.clone()));
        (store, scheduler, clock, storage)
    }

    fn timed_draft(title: &str, h: u32, m: u32, offset: u32) -> ItemDraft {
        ItemDraft::new(title)
            .with_due(due_date(), Some(NaiveTime::from_hms_opt(h, m, 0).unwrap()))
            .with_notification_offset(offset)
    }

    #[tokio::test]
    async fn tick_inside_window_queues_and_repeat_ticks_are_idempotent() {
        let (store, scheduler, _, _) = session(at(14, 10, 0)).await;
        let item = store.add(timed_draft("carregar caminhão", 14, 30, 30)).await;

        scheduler.scan_tick().await;
        scheduler.scan_tick().await;

        let pending = scheduler.pending().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].item_id, item.id);
        assert_eq!(pending[0].due_at, due_date().and_hms_opt(14, 30, 0).unwrap());
    }

    #[tokio::test]
    async fn offset_zero_item_fires_only_in_the_due_minute() {
        let (store, scheduler, clock, _) = session(at(14, 29, 30)).await;
        store.add(timed_draft("saída da doca", 14, 30, 0)).await;

        scheduler.scan_tick().await;
        assert!(scheduler.pending().await.is_empty());

        clock.set(at(14, 30, 20));
        scheduler.scan_tick().await;
        assert_eq!(scheduler.pending().await.len(), 1);
    }

    #[tokio::test]
    async fn offset_zero_minute_can_be_missed_entirely() {
        // Deliberate behavior: if no tick lands in the due minute the
        // reminder is silently skipped.
        let (store, scheduler, clock, _) = session(at(14, 29, 0)).await;
        store.add(timed_draft("x", 14, 30, 0)).await;

        scheduler.scan_tick().await;
        clock.set(at(14, 31, 0)); // cadence skipped the 14:30 minute
        scheduler.scan_tick().await;

        assert!(scheduler.pending().await.is_empty());
    }

    #[tokio::test]
    async fn dormant_items_never_fire() {
        let (store, scheduler, _, _) = session(at(14, 10, 0)).await;

        // No date/time.
        store.add(ItemDraft::new("sem prazo")).await;
        // Date but no time: offset is inert, nothing to fire at.
        store.add(ItemDraft::new("só data").with_due(due_date(), None)).await;
        // In-window but completed.
        let done = store.add(timed_draft("concluído", 14, 30, 30)).await;
        store.toggle_completion(done.id).await;

        scheduler.scan_tick().await;
        assert!(scheduler.pending().await.is_empty());
    }

    #[tokio::test]
    async fn dismissed_item_stays_quiet_until_a_new_session() {
        let (store, scheduler, clock, storage) = session(at(14, 10, 0)).await;
        let item = store.add(timed_draft("pagar pedágio", 14, 30, 30)).await;

        scheduler.scan_tick().await;
        scheduler.dismiss(item.id).await;

        // Still inside the window, but dismissed this session.
        clock.set(at(14, 20, 0));
        scheduler.scan_tick().await;
        assert!(scheduler.pending().await.is_empty());

        // Simulated restart: fresh store + scheduler over the same blob.
        let store2 = Arc::new(
            AgendaStore::open(
                storage.clone(),
                Arc::new(UlidGenerator::new(FixedClock::new(at(14, 20, 0)))),
                clock.clone(),
            )
            .await,
        );
        let scheduler2 = ReminderScheduler::new(store2, clock.clone());
        scheduler2.scan_tick().await;

        let pending = scheduler2.pending().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].item_id, item.id);
    }

    #[tokio::test]
    async fn complete_mutates_the_store_and_suppresses_refiring() {
        let (store, scheduler, _, _) = session(at(14, 10, 0)).await;
        let item = store.add(timed_draft("emitir CTe", 14, 30, 30)).await;

        scheduler.scan_tick().await;
        assert_eq!(scheduler.front().await.unwrap().item_id, item.id);

        scheduler.complete(item.id).await;
        assert!(store.get(item.id).await.unwrap().completed);
        assert!(scheduler.front().await.is_none());

        // Visible to the very next tick: completed, so dormant anyway.
        scheduler.scan_tick().await;
        assert!(scheduler.pending().await.is_empty());
    }

    #[tokio::test]
    async fn same_tick_eligibles_are_appended_in_insertion_order() {
        let (store, scheduler, _, _) = session(at(14, 10, 0)).await;
        let first = store.add(timed_draft("primeiro", 14, 30, 30)).await;
        let second = store.add(timed_draft("segundo", 14, 15, 30)).await;

        scheduler.scan_tick().await;

        let pending = scheduler.pending().await;
        assert_eq!(pending.len(), 2);
        // Arrival order follows the store's insertion order, not due time.
        assert_eq!(pending[0].item_id, first.id);
        assert_eq!(pending[1].item_id, second.id);
        assert_eq!(scheduler.front().await.unwrap().item_id, first.id);
    }

    #[tokio::test]
    async fn spawned_loop_ticks_and_shuts_down() {
        let (store, scheduler, _, _) = session(at(14, 10, 0)).await;
        store.add(timed_draft("x", 14, 30, 30)).await;

        let handle = scheduler.spawn(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(scheduler.pending().await.len(), 1);

        handle.shutdown().await;
    }
}
