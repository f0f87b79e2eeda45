//! Agenda store: the authoritative in-memory collection of agenda items.
//!
//! All reads and writes of agenda state go through [`AgendaStore`]. Every
//! successful mutation persists the FULL collection through the
//! [`ItemStore`] port (not incremental): the blob on disk is always the
//! single source of truth, at the cost of write amplification — acceptable
//! at personal/team task-list scale. A failed save is logged and never
//! rolled back; in-memory state stays authoritative for the session.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, broadcast};

use crate::domain::{AgendaError, AgendaEvent, AgendaItem, ItemDraft, ItemId, ItemPatch};
use crate::ports::{Clock, IdGenerator, ItemStore};

/// Capacity of the change-event channel. Slow subscribers miss events
/// (they re-derive from `snapshot` anyway), they are never blocked on.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Authoritative agenda collection.
///
/// Design:
/// - Items live in a `Vec` so that iteration order == insertion order;
///   the scheduler scan relies on that ordering. Lookup is a linear scan,
///   fine at this scale.
/// - Mutations are serialized by the tokio `Mutex`; the persist happens
///   under the same lock so saves hit the backing store in mutation order
///   (last full-collection save wins).
pub struct AgendaStore {
    items: Mutex<Vec<AgendaItem>>,
    storage: Arc<dyn ItemStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<AgendaEvent>,
}

impl AgendaStore {
    /// Open the store: blocking (synchronous-at-startup) load of the
    /// persisted collection. Load is fail-soft, so this never errors.
    pub async fn open(
        storage: Arc<dyn ItemStore>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let items = storage.load().await;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            items: Mutex::new(items),
            storage,
            ids,
            clock,
            events,
        }
    }

    /// Subscribe to change events. Projections use these purely as a
    /// trigger to re-derive from the latest `snapshot`.
    pub fn subscribe(&self) -> broadcast::Receiver<AgendaEvent> {
        self.events.subscribe()
    }

    /// Current collection, in insertion order.
    pub async fn snapshot(&self) -> Vec<AgendaItem> {
        self.items.lock().await.clone()
    }

    /// Look up a single item.
    pub async fn get(&self, id: ItemId) -> Option<AgendaItem> {
        self.items.lock().await.iter().find(|it| it.id == id).cloned()
    }

    /// Add a new item. The store assigns id and timestamps and starts it
    /// uncompleted; the draft is trusted to be validated at the boundary.
    pub async fn add(&self, draft: ItemDraft) -> AgendaItem {
        let now = self.clock.now();
        let offset = draft.effective_offset();
        let item = AgendaItem {
            id: self.ids.generate_item_id(),
            title: draft.title,
            description: draft.description,
            completed: false,
            urgency: draft.urgency,
            due_date: draft.due_date,
            due_time: draft.due_time,
            notification_offset_min: offset,
            created_at: now,
            updated_at: now,
        };

        let mut items = self.items.lock().await;
        items.push(item.clone());
        self.persist(&items).await;
        drop(items);

        self.publish(AgendaEvent::ItemAdded(item.id));
        item
    }

    /// Merge a partial patch into an existing item, refreshing
    /// `updated_at`. Unknown id => `AgendaError::NotFound`.
    pub async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<AgendaItem, AgendaError> {
        let now = self.clock.now();
        let mut items = self.items.lock().await;
        let Some(item) = items.iter_mut().find(|it| it.id == id) else {
            return Err(AgendaError::NotFound(id));
        };

        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(urgency) = patch.urgency {
            item.urgency = urgency;
        }
        if let Some(due_date) = patch.due_date {
            item.due_date = due_date;
        }
        if let Some(due_time) = patch.due_time {
            item.due_time = due_time;
        }
        if let Some(offset) = patch.notification_offset_min {
            item.notification_offset_min = offset;
        }
        item.updated_at = now;
        let updated = item.clone();

        self.persist(&items).await;
        drop(items);

        self.publish(AgendaEvent::ItemUpdated(id));
        Ok(updated)
    }

    /// Remove an item unconditionally. Returns whether anything was
    /// removed. Deletion is terminal: no tombstone, no cascade.
    pub async fn delete(&self, id: ItemId) -> bool {
        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|it| it.id != id);
        let removed = items.len() != before;
        if removed {
            self.persist(&items).await;
        }
        drop(items);

        if removed {
            self.publish(AgendaEvent::ItemDeleted(id));
        }
        removed
    }

    /// Flip completion and refresh `updated_at`. Silent no-op on an
    /// unknown id.
    pub async fn toggle_completion(&self, id: ItemId) {
        let now = self.clock.now();
        let mut items = self.items.lock().await;
        let Some(item) = items.iter_mut().find(|it| it.id == id) else {
            return;
        };
        item.toggle_completion(now);
        self.persist(&items).await;
        drop(items);

        self.publish(AgendaEvent::CompletionToggled(id));
    }

    /// Postponement flow: rewrite `due_date` only, leaving identity,
    /// time, urgency and completion untouched. Routed through `update`,
    /// so `updated_at` refreshes and the scheduler re-evaluates the item
    /// under the new date.
    pub async fn postpone(
        &self,
        id: ItemId,
        new_due_date: NaiveDate,
    ) -> Result<AgendaItem, AgendaError> {
        self.update(id, ItemPatch::postpone_to(new_due_date)).await
    }

    /// Full-collection persist, fire-and-forget: errors are logged, never
    /// propagated. The next successful mutation's save catches up.
    async fn persist(&self, items: &[AgendaItem]) {
        if let Err(err) = self.storage.save(items).await {
            tracing::warn!(error = %err, "agenda persist failed; in-memory state stays authoritative");
        }
    }

    fn publish(&self, event: AgendaEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
