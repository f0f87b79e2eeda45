//! Agenda item record: the single entity the whole core revolves around.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// Urgency level. Doubles as the sort tie-break everywhere
/// (`rank()`: Urgent(1) < Normal(2) < Light(3)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    Normal,
    Light,
}

impl Urgency {
    /// Total order used for sorting: lower rank sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Urgency::Urgent => 1,
            Urgency::Normal => 2,
            Urgency::Light => 3,
        }
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Normal
    }
}

/// Agenda item: a task or appointment.
///
/// Design:
/// - This is the "single source of truth" record (same pattern as a queue
///   TaskRecord): state transitions happen via methods, not field pokes.
/// - `due_date` carries date-only semantics; time-of-day lives in
///   `due_time` (HH:MM, zero seconds). Invariant: `due_time` set implies
///   `due_date` set. The store trusts its callers on this; the validated
///   entry path is [`super::draft::ItemDraft`].
/// - `notification_offset_min` is only interpreted when both date and
///   time are set; 0 means "fire at the exact due instant".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: ItemId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub urgency: Urgency,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub notification_offset_min: u32,

    /// Timestamps: `created_at` fixed at creation, `updated_at` refreshed
    /// on every mutation (including completion toggle and postponement).
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AgendaItem {
    /// Due instant = due date at due time, zero seconds.
    /// None unless both halves are present.
    pub fn due_instant(&self) -> Option<NaiveDateTime> {
        match (self.due_date, self.due_time) {
            (Some(date), Some(time)) => Some(date.and_time(time)),
            _ => None,
        }
    }

    /// Flip completion and refresh `updated_at`.
    pub fn toggle_completion(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.updated_at = now;
    }
}
