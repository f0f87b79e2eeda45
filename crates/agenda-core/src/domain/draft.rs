//! Draft / patch types - 入力境界のバリデーション
//!
//! Store 本体は入力を再検証しません（呼び出し側を信頼する設計）。
//! 不変条件（time ⇒ date、タイトル非空）はこの境界で落とします。
//! Fail-fast: 不正な入力は Store に届く前に `ValidationError` で返す。

use chrono::{NaiveDate, NaiveTime};

use super::item::Urgency;

/// Default reminder offset (minutes before the due instant) for a draft
/// that carries a due time but no explicit offset.
pub const DEFAULT_NOTIFICATION_OFFSET_MIN: u32 = 30;

/// ValidationError は境界で拒否された入力の理由
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title must not be blank")]
    BlankTitle,

    #[error("due time requires a due date")]
    TimeWithoutDate,
}

/// ItemDraft は add 操作の入力（id / timestamps / completed を除く全フィールド）
///
/// # 使用例
/// ```ignore
/// let draft = ItemDraft::new("pagar pedágio")
///     .with_due(date, Some(time))
///     .validated()?;
/// let item = store.add(draft).await;
/// ```
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub title: String,
    pub description: Option<String>,
    pub urgency: Urgency,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    /// None = use the default (30 when a due time is set, 0 otherwise).
    pub notification_offset_min: Option<u32>,
}

impl ItemDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            urgency: Urgency::default(),
            due_date: None,
            due_time: None,
            notification_offset_min: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_due(mut self, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        self.due_date = Some(date);
        self.due_time = time;
        self
    }

    pub fn with_notification_offset(mut self, minutes: u32) -> Self {
        self.notification_offset_min = Some(minutes);
        self
    }

    /// 境界バリデーション: タイトル非空、time ⇒ date
    pub fn validated(self) -> Result<Self, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        if self.due_time.is_some() && self.due_date.is_none() {
            return Err(ValidationError::TimeWithoutDate);
        }
        Ok(self)
    }

    /// Effective offset: default 30 with a due time, forced to 0 without.
    pub fn effective_offset(&self) -> u32 {
        if self.due_time.is_some() {
            self.notification_offset_min
                .unwrap_or(DEFAULT_NOTIFICATION_OFFSET_MIN)
        } else {
            0
        }
    }
}

/// ItemPatch は update 操作の部分更新
///
/// 外側の `Option` が「変更するか」、内側が「設定 or クリア」を表す
/// （`due_date: Some(None)` = 期日をクリア）。
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub urgency: Option<Urgency>,
    pub due_date: Option<Option<NaiveDate>>,
    pub due_time: Option<Option<NaiveTime>>,
    pub notification_offset_min: Option<u32>,
}

impl ItemPatch {
    /// Patch that only replaces the due date (the postponement flow).
    pub fn postpone_to(new_due_date: NaiveDate) -> Self {
        Self {
            due_date: Some(Some(new_due_date)),
            ..Self::default()
        }
    }

    /// 境界バリデーション: 適用後に time ⇒ date が壊れないか
    ///
    /// `current_*` は対象アイテムの現在値（date をクリアしつつ time を
    /// 残す patch を落とすために必要）。
    pub fn validated(
        self,
        current_due_date: Option<NaiveDate>,
        current_due_time: Option<NaiveTime>,
    ) -> Result<Self, ValidationError> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err(ValidationError::BlankTitle);
        }

        let date_after = self.due_date.unwrap_or(current_due_date);
        let time_after = self.due_time.unwrap_or(current_due_time);
        if time_after.is_some() && date_after.is_none() {
            return Err(ValidationError::TimeWithoutDate);
        }
        Ok(self)
    }
}
