//! Errors - エラー型
//!
//! # 分類
//! - `AgendaError`: Store 操作のドメインエラー（NotFound など）。
//!   致命的ではなく、呼び出し側がユーザー向けメッセージを決める。
//! - `StoreError`: 永続化アダプタの I/O エラー。save 側でのみ発生し、
//!   Store はログに残すだけで伝播しない（fail-soft、spec どおり）。

use super::draft::ValidationError;
use super::ids::ItemId;

/// AgendaError は Store 操作のドメインエラー
#[derive(Debug, thiserror::Error)]
pub enum AgendaError {
    #[error("agenda item not found: {0}")]
    NotFound(ItemId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// StoreError は永続化アダプタのエラー
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
