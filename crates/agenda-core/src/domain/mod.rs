//! Domain model (IDs, items, drafts, events, errors).

pub mod draft;
pub mod errors;
pub mod events;
pub mod ids;
pub mod item;

pub use self::draft::{DEFAULT_NOTIFICATION_OFFSET_MIN, ItemDraft, ItemPatch, ValidationError};
pub use self::errors::{AgendaError, StoreError};
pub use self::events::AgendaEvent;
pub use self::ids::ItemId;
pub use self::item::{AgendaItem, Urgency};
