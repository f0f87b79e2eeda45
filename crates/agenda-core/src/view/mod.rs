//! View projections - 表示用の読み取り専用データ
//!
//! UI レイヤー（除外スコープ）はここで導出した projection をそのまま
//! 描画します。すべて Store のスナップショットからの純粋な導出で、
//! Store への参照は持ちません。

pub mod calendar;
pub mod list;

pub use self::calendar::{day_has_event, events_by_day, items_for_day};
pub use self::list::{ListProjection, project_list};
