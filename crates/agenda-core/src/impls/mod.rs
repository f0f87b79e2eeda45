//! Adapters - ports の実装
//!
//! - **JsonFileStore**: JSON ファイル（本番用）
//! - **InMemoryItemStore**: テスト・デモ用

pub mod json_store;
pub mod memory_store;

pub use self::json_store::JsonFileStore;
pub use self::memory_store::InMemoryItemStore;
