//! List view projection.
//!
//! Pure derivation from a store snapshot; the UI layer renders the
//! resulting groups as-is. "Today" comes from the injected clock at the
//! call site, never from the wall clock here.

use chrono::NaiveDate;

use crate::domain::{AgendaItem, Urgency};

/// Grouped, sorted projection of the agenda for the list screen.
///
/// Group order on screen: overdue, today, future, undated, completed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProjection {
    /// Active items due strictly before today, oldest first.
    pub overdue: Vec<AgendaItem>,
    /// Active items due today.
    pub today: Vec<AgendaItem>,
    /// Active items due strictly after today, soonest first.
    pub future: Vec<AgendaItem>,
    /// Active items without a due date, by urgency rank.
    pub undated: Vec<AgendaItem>,
    /// Completed items, most recently completed first.
    pub completed: Vec<AgendaItem>,
}

/// Derive the list projection.
///
/// - The optional urgency filter applies before any bucketing.
/// - Dated active items sort by due date ascending with urgency rank as
///   the tie-break; bucketing by `today` then splits them, which keeps
///   every overdue item ahead of any same-or-later-dated one.
/// - Completed items form a separate trailing group ordered by
///   `updated_at` descending.
pub fn project_list(
    items: &[AgendaItem],
    today: NaiveDate,
    filter: Option<Urgency>,
) -> ListProjection {
    let mut projection = ListProjection::default();

    let mut dated: Vec<AgendaItem> = Vec::new();
    for item in items {
        if let Some(wanted) = filter
            && item.urgency != wanted
        {
            continue;
        }
        if item.completed {
            projection.completed.push(item.clone());
        } else if item.due_date.is_some() {
            dated.push(item.clone());
        } else {
            projection.undated.push(item.clone());
        }
    }

    dated.sort_by_key(|it| (it.due_date, it.urgency.rank()));
    for item in dated {
        let due = item.due_date.expect("dated bucket only holds dated items");
        if due < today {
            projection.overdue.push(item);
        } else if due == today {
            projection.today.push(item);
        } else {
            projection.future.push(item);
        }
    }

    // Stable sort keeps insertion order among equal ranks.
    projection.undated.sort_by_key(|it| it.urgency.rank());
    projection
        .completed
        .sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use chrono::{Duration, TimeZone, Utc};

    fn item(title: &str, urgency: Urgency, due: Option<NaiveDate>, completed: bool) -> AgendaItem {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        AgendaItem {
            id: ItemId::from_ulid(ulid::Ulid::new()),
            title: title.to_string(),
            description: None,
            completed,
            urgency,
            due_date: due,
            due_time: None,
            notification_offset_min: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn titles(group: &[AgendaItem]) -> Vec<&str> {
        group.iter().map(|it| it.title.as_str()).collect()
    }

    #[test]
    fn buckets_overdue_today_future_undated_completed() {
        let yesterday = today() - Duration::days(1);
        let tomorrow = today() + Duration::days(1);
        let items = vec![
            item("A", Urgency::Normal, Some(yesterday), false),
            item("B", Urgency::Urgent, Some(today()), false),
            item("C", Urgency::Light, Some(tomorrow), false),
            item("D", Urgency::Urgent, None, false),
            item("E", Urgency::Normal, Some(today()), true),
        ];

        let projection = project_list(&items, today(), None);

        assert_eq!(titles(&projection.overdue), vec!["A"]);
        assert_eq!(titles(&projection.today), vec!["B"]);
        assert_eq!(titles(&projection.future), vec!["C"]);
        assert_eq!(titles(&projection.undated), vec!["D"]);
        assert_eq!(titles(&projection.completed), vec!["E"]);
    }

    #[test]
    fn urgency_filter_applies_before_bucketing() {
        let yesterday = today() - Duration::days(1);
        let items = vec![
            item("A", Urgency::Normal, Some(yesterday), false),
            item("B", Urgency::Urgent, Some(today()), false),
            item("D", Urgency::Urgent, None, false),
        ];

        let projection = project_list(&items, today(), Some(Urgency::Urgent));

        assert!(projection.overdue.is_empty());
        assert_eq!(titles(&projection.today), vec!["B"]);
        assert_eq!(titles(&projection.undated), vec!["D"]);
    }

    #[test]
    fn dated_items_order_by_date_then_urgency_rank() {
        let d1 = today() + Duration::days(1);
        let d2 = today() + Duration::days(2);
        let items = vec![
            item("later", Urgency::Urgent, Some(d2), false),
            item("soon-light", Urgency::Light, Some(d1), false),
            item("soon-urgent", Urgency::Urgent, Some(d1), false),
        ];

        let projection = project_list(&items, today(), None);

        assert_eq!(
            titles(&projection.future),
            vec!["soon-urgent", "soon-light", "later"]
        );
    }

    #[test]
    fn undated_items_order_by_urgency_alone() {
        let items = vec![
            item("leve", Urgency::Light, None, false),
            item("urgente", Urgency::Urgent, None, false),
            item("normal", Urgency::Normal, None, false),
        ];

        let projection = project_list(&items, today(), None);

        assert_eq!(titles(&projection.undated), vec!["urgente", "normal", "leve"]);
    }

    #[test]
    fn completed_group_orders_by_most_recent_update() {
        let mut old = item("old", Urgency::Normal, None, true);
        let mut new = item("new", Urgency::Normal, None, true);
        old.updated_at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        new.updated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let projection = project_list(&[old, new], today(), None);

        assert_eq!(titles(&projection.completed), vec!["new", "old"]);
    }
}
