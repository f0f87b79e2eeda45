//! Calendar-day aggregation for the month-grid view.
//!
//! A day "has an event" iff at least one non-completed item is due that
//! day (time-of-day ignored). Selecting a day yields ALL items due then,
//! completed or not.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::AgendaItem;

/// Group non-completed, dated items by calendar day.
pub fn events_by_day(items: &[AgendaItem]) -> BTreeMap<NaiveDate, Vec<AgendaItem>> {
    let mut days: BTreeMap<NaiveDate, Vec<AgendaItem>> = BTreeMap::new();
    for item in items {
        if item.completed {
            continue;
        }
        if let Some(due) = item.due_date {
            days.entry(due).or_default().push(item.clone());
        }
    }
    days
}

/// Does the month grid mark this day?
pub fn day_has_event(items: &[AgendaItem], day: NaiveDate) -> bool {
    items
        .iter()
        .any(|it| !it.completed && it.due_date == Some(day))
}

/// All items due on `day` (completed included), sorted: items with a due
/// time first (ascending), then items without one, urgency rank as the
/// tie-break.
pub fn items_for_day(items: &[AgendaItem], day: NaiveDate) -> Vec<AgendaItem> {
    let mut selected: Vec<AgendaItem> = items
        .iter()
        .filter(|it| it.due_date == Some(day))
        .cloned()
        .collect();
    selected.sort_by_key(|it| (it.due_time.is_none(), it.due_time, it.urgency.rank()));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, Urgency};
    use chrono::{NaiveTime, TimeZone, Utc};

    fn item(
        title: &str,
        due: Option<NaiveDate>,
        time: Option<NaiveTime>,
        urgency: Urgency,
        completed: bool,
    ) -> AgendaItem {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        AgendaItem {
            id: ItemId::from_ulid(ulid::Ulid::new()),
            title: title.to_string(),
            description: None,
            completed,
            urgency,
            due_date: due,
            due_time: time,
            notification_offset_min: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn completed_items_do_not_mark_the_grid() {
        let items = vec![item("done", Some(day()), None, Urgency::Normal, true)];

        assert!(!day_has_event(&items, day()));
        assert!(events_by_day(&items).is_empty());
    }

    #[test]
    fn one_active_item_marks_the_day() {
        let other_day = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        let items = vec![
            item("coleta", Some(day()), None, Urgency::Normal, false),
            item("entrega", Some(other_day), None, Urgency::Normal, false),
            item("sem data", None, None, Urgency::Normal, false),
        ];

        assert!(day_has_event(&items, day()));
        let days = events_by_day(&items);
        assert_eq!(days.len(), 2);
        assert_eq!(days[&day()].len(), 1);
    }

    #[test]
    fn selecting_a_day_includes_completed_and_sorts_timed_first() {
        let items = vec![
            item("sem hora", Some(day()), None, Urgency::Light, false),
            item("tarde", Some(day()), Some(at(16, 0)), Urgency::Normal, false),
            item("manhã", Some(day()), Some(at(8, 0)), Urgency::Normal, true),
            item("sem hora urgente", Some(day()), None, Urgency::Urgent, false),
        ];

        let selected = items_for_day(&items, day());
        let titles: Vec<&str> = selected.iter().map(|it| it.title.as_str()).collect();

        // Timed ascending (completed included), then untimed by urgency.
        assert_eq!(titles, vec!["manhã", "tarde", "sem hora urgente", "sem hora"]);
    }
}
