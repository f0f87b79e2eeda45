//! Events - ドメインイベント
//!
//! Store は成功した mutation ごとにイベントを publish します。
//! projection（リスト・カレンダー・スケジューラ）は最新スナップショットを
//! 再導出するトリガーとして購読します（observer パターン）。

use super::ids::ItemId;

/// AgendaEvent は Store で発生した変更の通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaEvent {
    ItemAdded(ItemId),
    ItemUpdated(ItemId),
    ItemDeleted(ItemId),
    CompletionToggled(ItemId),
}

impl AgendaEvent {
    /// 対象アイテムの ID
    pub fn item_id(&self) -> ItemId {
        match self {
            AgendaEvent::ItemAdded(id)
            | AgendaEvent::ItemUpdated(id)
            | AgendaEvent::ItemDeleted(id)
            | AgendaEvent::CompletionToggled(id) => *id,
        }
    }
}
