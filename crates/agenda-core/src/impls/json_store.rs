//! JsonFileStore - JSON ファイルによる永続化アダプタ
//!
//! 1 つの名前付きレコード（= 1 ファイル）にアイテム列を保存します。
//!
//! # 実装詳細
//! - DTO は文字列レベル（ISO-8601 日付文字列のまま）で持ち、フィールド
//!   ごとに fail-soft できるようにする:
//!   - `due_date` が不正 ⇒ そのフィールドだけ unset に落とす
//!   - legacy urgency（high/medium/low）⇒ 現行語彙へ無言で一方向移行
//! - ファイル全体の parse 失敗 ⇒ ログして空コレクション（起動は止めない）
//! - save は temp ファイル + rename でアトミックに全件置き換え
//! - I/O は spawn_blocking 経由（async context で同期 fs を使うため）

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AgendaItem, ItemId, StoreError, Urgency};
use crate::ports::ItemStore;

/// Wire form of one agenda item. All date/time fields travel as strings
/// so each can fail soft independently of the rest of the record.
#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    id: ItemId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    completed: bool,
    urgency: String,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    due_time: Option<String>,
    #[serde(default)]
    notification_offset_min: u32,
    created_at: String,
    updated_at: String,
}

impl StoredItem {
    fn from_item(item: &AgendaItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            description: item.description.clone(),
            completed: item.completed,
            urgency: canonical_urgency(item.urgency).to_string(),
            due_date: item.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            due_time: item.due_time.map(|t| t.format("%H:%M").to_string()),
            notification_offset_min: item.notification_offset_min,
            created_at: item.created_at.to_rfc3339(),
            updated_at: item.updated_at.to_rfc3339(),
        }
    }

    fn into_item(self) -> AgendaItem {
        let due_date = self.due_date.as_deref().and_then(|s| {
            let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
            if parsed.is_none() {
                // Invalid calendar date: drop to unset rather than
                // propagating a bogus value.
                tracing::warn!(id = %self.id, raw = s, "unparseable due_date dropped");
            }
            parsed
        });
        let mut due_time = self
            .due_time
            .as_deref()
            .and_then(|s| NaiveTime::parse_from_str(s, "%H:%M").ok());
        if due_date.is_none() {
            // time-without-date must not re-enter the system.
            due_time = None;
        }

        AgendaItem {
            id: self.id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            urgency: parse_urgency(&self.urgency),
            due_date,
            due_time,
            notification_offset_min: if due_time.is_some() {
                self.notification_offset_min
            } else {
                0
            },
            created_at: parse_timestamp(&self.created_at, self.id),
            updated_at: parse_timestamp(&self.updated_at, self.id),
        }
    }
}

fn canonical_urgency(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Urgent => "urgent",
        Urgency::Normal => "normal",
        Urgency::Light => "light",
    }
}

/// 現行語彙 + legacy 語彙（high/medium/low）を受け付ける。
/// 未知の値は Normal に落とす（ログのみ）。
fn parse_urgency(raw: &str) -> Urgency {
    match raw {
        "urgent" | "high" => Urgency::Urgent,
        "normal" | "medium" => Urgency::Normal,
        "light" | "low" => Urgency::Light,
        other => {
            tracing::warn!(raw = other, "unknown urgency value, defaulting to normal");
            Urgency::Normal
        }
    }
}

fn parse_timestamp(raw: &str, id: ItemId) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => {
            tracing::warn!(id = %id, raw, "unparseable timestamp, falling back to epoch");
            DateTime::UNIX_EPOCH
        }
    }
}

/// JSON file backed [`ItemStore`].
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    /// fail-soft load: レコード不在 ⇒ 空、読み込み/parse 失敗 ⇒ ログして空
    async fn load(&self) -> Vec<AgendaItem> {
        let path = self.path.clone();
        let loaded = tokio::task::spawn_blocking(move || -> Vec<AgendaItem> {
            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "agenda record unreadable, starting empty");
                    return Vec::new();
                }
            };
            match serde_json::from_str::<Vec<StoredItem>>(&raw) {
                Ok(stored) => stored.into_iter().map(StoredItem::into_item).collect(),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "agenda record malformed, starting empty");
                    Vec::new()
                }
            }
        })
        .await;

        match loaded {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "agenda load task failed, starting empty");
                Vec::new()
            }
        }
    }

    /// 全件をシリアライズして temp ファイルに書き、rename で置き換える
    async fn save(&self, items: &[AgendaItem]) -> Result<(), StoreError> {
        let stored: Vec<StoredItem> = items.iter().map(StoredItem::from_item).collect();
        let json = serde_json::to_string_pretty(&stored)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let tmp = path.with_extension("json.tmp");
            std::fs::write(&tmp, json)?;
            std::fs::rename(&tmp, &path)?;
            Ok(())
        })
        .await
        .map_err(|err| StoreError::Io(std::io::Error::other(err)))?
    }
}
