//! InMemoryItemStore - テスト・デモ用の永続化アダプタ
//!
//! durable storage の in-memory 版。保存された blob を `saved()` で
//! 覗けるので、テストは「何が永続化されたか」を直接検証できます。
//! 同じインスタンスから二つ目の Store を開けば、プロセス再起動の
//! シミュレーションになります（DismissedSet のリセット検証に使用）。

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{AgendaItem, StoreError};
use crate::ports::ItemStore;

/// In-memory [`ItemStore`].
#[derive(Default)]
pub struct InMemoryItemStore {
    saved: Mutex<Vec<AgendaItem>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期 blob 付きで作成
    pub fn with_items(items: Vec<AgendaItem>) -> Self {
        Self {
            saved: Mutex::new(items),
        }
    }

    /// 最後に保存されたコレクション
    pub async fn saved(&self) -> Vec<AgendaItem> {
        self.saved.lock().expect("store lock poisoned").clone()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn load(&self) -> Vec<AgendaItem> {
        self.saved.lock().expect("store lock poisoned").clone()
    }

    async fn save(&self, items: &[AgendaItem]) -> Result<(), StoreError> {
        *self.saved.lock().expect("store lock poisoned") = items.to_vec();
        Ok(())
    }
}
