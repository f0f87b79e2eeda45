//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID
//! - **時刻でソート可能**: timestamp が先頭にあるため、作成順でソートできる
//! - **分散生成可能**: 調整なしで複数プロセスで生成できる
//! - **UUID互換**: 128-bit で UUID と同じサイズ
//!
//! ID の生成は [`crate::ports::IdGenerator`] 経由で行います（テスト容易性のため）。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of an agenda item. Opaque, assigned at creation, immutable.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Ulid);

impl ItemId {
    /// ULID から ItemId を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for ItemId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_item_prefix() {
        let id = ItemId::from_ulid(Ulid::new());
        assert!(id.to_string().starts_with("item-"));
    }

    #[test]
    fn ulid_ids_are_sortable() {
        // ULID は時刻ベースなので、生成順序でソート可能
        let id1 = ItemId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2)); // 時刻が進むのを待つ
        let id2 = ItemId::from_ulid(Ulid::new());

        assert!(id1 < id2);
    }

    #[test]
    fn ulid_ids_can_be_serialized() {
        let id = ItemId::from_ulid(Ulid::new());

        // Serialize/Deserialize のラウンドトリップテスト
        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: ItemId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(id, deserialized);
    }
}
