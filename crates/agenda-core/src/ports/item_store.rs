//! ItemStore port - 永続化アダプタの抽象化
//!
//! AgendaStore はこの trait 経由で全コレクションを読み書きします。
//! 部分書き込みはしません（常に全件 save）。単純ですが意図的な設計で、
//! ディスク上のレコードが常に単一の正本になります。
//!
//! # 設計原則
//! - `load` は呼び出し側に絶対にエラーを返さない（fail-soft）。
//!   レコード不在 ⇒ 空、parse 失敗 ⇒ ログして空。
//! - `save` はエラーを返すが、Store 側はログに残すだけで伝播しない。

use async_trait::async_trait;

use crate::domain::{AgendaItem, StoreError};

/// ItemStore はアイテムコレクションの durable storage
///
/// # 実装
/// - [`crate::impls::JsonFileStore`]: JSON ファイル（本番用）
/// - [`crate::impls::InMemoryItemStore`]: テスト・デモ用
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// 全コレクションを読み込む（fail-soft: 失敗しても空を返す）
    async fn load(&self) -> Vec<AgendaItem>;

    /// 全コレクションを書き込む（アトミックに置き換え）
    async fn save(&self, items: &[AgendaItem]) -> Result<(), StoreError>;
}
