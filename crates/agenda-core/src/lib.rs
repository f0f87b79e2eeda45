//! agenda-core
//!
//! 貨物物流バックオフィスの Agenda（予定・リマインダー）サブシステム。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, item, draft, events, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, ItemStore）
//! - **store**: AgendaStore（コレクションの正本、mutation ごとに全件永続化）
//! - **scheduler**: ReminderScheduler（固定間隔スキャン、通知ウィンドウ判定、
//!   セッション単位の dedup）
//! - **view**: 表示用 projection（リストのバケツ分け、カレンダー日別集計）
//! - **impls**: アダプタ実装（JsonFileStore, InMemoryItemStore）
//!
//! # 設計原則
//! - 単一オーナーの協調モデル: 1 プロセスが自分のコレクションを load し、
//!   所有し、save する。プロセス間の調整はしない（最後の全件 save が勝つ）。
//! - 時刻は必ず Clock port 経由（決定的テストのため）。
//! - storage の読み込みは fail-soft: 起動を絶対に止めない。

pub mod domain;
pub mod impls;
pub mod ports;
pub mod scheduler;
pub mod store;
pub mod view;

pub use domain::{AgendaError, AgendaEvent, AgendaItem, ItemDraft, ItemId, ItemPatch, Urgency};
pub use ports::{Clock, FixedClock, IdGenerator, ItemStore, SystemClock, UlidGenerator};
pub use scheduler::{DEFAULT_TICK_INTERVAL, PendingNotification, ReminderScheduler, SchedulerHandle};
pub use store::AgendaStore;
