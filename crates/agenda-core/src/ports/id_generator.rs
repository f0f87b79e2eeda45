//! IdGenerator port - ID 生成の抽象化
//!
//! テスト容易性のために trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）。timestamp 部分は Clock 由来
//!   なので、FixedClock と組み合わせると決定的な prefix になる。

use ulid::Ulid;

use crate::domain::ids::ItemId;
use crate::ports::Clock;

/// IdGenerator はアイテム ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（Store から複数タスク経由で使える）
pub trait IdGenerator: Send + Sync {
    /// 新しい Item ID を生成
    fn generate_item_id(&self) -> ItemId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    /// 新しい UlidGenerator を作成
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_item_id(&self) -> ItemId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        ItemId::from(ulid)
    }
}
