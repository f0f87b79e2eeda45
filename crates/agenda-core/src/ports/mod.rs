//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部コラボレータ（時計、ID 生成、durable storage）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - Store がコレクションの正本（source of truth）
//! - 時刻は必ず Clock 経由（決定的テストのため）
//! - storage は全件読み書きのみ（incremental write なし）

pub mod clock;
pub mod id_generator;
pub mod item_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::item_store::ItemStore;
