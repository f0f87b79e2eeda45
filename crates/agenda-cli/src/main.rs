use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Timelike};
use tokio::time::{Duration, sleep};

use agenda_core::impls::JsonFileStore;
use agenda_core::{
    AgendaStore, Clock, ItemDraft, ReminderScheduler, SystemClock, UlidGenerator, Urgency,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,agenda_core=debug".into()),
        )
        .init();

    // (A) ports を用意して Store を開く（load は起動時に同期）
    let clock = Arc::new(SystemClock);
    let storage = Arc::new(JsonFileStore::new("agenda.json"));
    let ids = Arc::new(UlidGenerator::new(SystemClock));
    let store = Arc::new(AgendaStore::open(storage, ids, clock.clone()).await);

    // (B) アイテム投入（1 件は既に通知ウィンドウ内）
    let now = clock.now();
    let due = now + ChronoDuration::minutes(10);
    let in_window = store
        .add(
            ItemDraft::new("conferir carregamento da carreta 12")
                .with_urgency(Urgency::Urgent)
                .with_due(
                    due.date_naive(),
                    Some(due.time().with_second(0).unwrap().with_nanosecond(0).unwrap()),
                )
                .with_notification_offset(30)
                .validated()
                .expect("valid draft"),
        )
        .await;
    store
        .add(
            ItemDraft::new("renovar contrato do parceiro Transmar")
                .with_due(now.date_naive() + ChronoDuration::days(7), None)
                .validated()
                .expect("valid draft"),
        )
        .await;
    println!("added items, in-window id: {}", in_window.id);

    // (C) scheduler を起動（デモなので短い間隔）
    let scheduler = Arc::new(ReminderScheduler::new(store.clone(), clock));
    let handle = scheduler.spawn(Duration::from_millis(200));

    // (D) キューの先頭が出るまでポーリング（presenter の contract:
    //     常に先頭のみ表示、dismiss か complete で解決）
    loop {
        if let Some(notification) = scheduler.front().await {
            println!(
                "reminder: [{}] {:?} due at {}",
                notification.title, notification.urgency, notification.due_at
            );
            scheduler.complete(notification.item_id).await;
            println!("completed via notification surface");
            break;
        }
        sleep(Duration::from_millis(100)).await;
    }

    // (E) タイマーを解放してから終了（リークさせない）
    handle.shutdown().await;

    let snapshot = store.snapshot().await;
    println!("final agenda ({} items):", snapshot.len());
    for item in snapshot {
        println!(
            "  {} [{}] completed={} due={:?}",
            item.id, item.title, item.completed, item.due_date
        );
    }
}
