use crate::api::events::Event;
use crate::api::users::User;
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;

/// Headline figures shown by the summary widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: usize,
}

/// One labelled slice of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountBucket {
    pub label: String,
    pub count: usize,
}

pub fn stat_cards(events: &[Event], users: &[User]) -> [StatCard; 4] {
    [
        StatCard {
            title: "Total Events",
            value: events.len(),
        },
        StatCard {
            title: "Total Users",
            value: users.len(),
        },
        StatCard {
            title: "Verified Users",
            value: users.iter().filter(|user| user.is_verified).count(),
        },
        StatCard {
            title: "Online Events",
            value: events.iter().filter(|event| event.is_online).count(),
        },
    ]
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Group by an extracted label and sort by descending count (label as the
/// tiebreak) so the output is stable for equal inputs.
fn bucketize<T>(items: &[T], label_of: impl Fn(&T) -> String) -> Vec<CountBucket> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item in items {
        *counts.entry(label_of(item)).or_insert(0) += 1;
    }
    let mut buckets: Vec<CountBucket> = counts
        .into_iter()
        .map(|(label, count)| CountBucket { label, count })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    buckets
}

pub fn events_by_type(events: &[Event]) -> Vec<CountBucket> {
    bucketize(events, |event| capitalize(&event.kind))
}

pub fn events_by_status(events: &[Event]) -> Vec<CountBucket> {
    bucketize(events, |event| {
        capitalize(event.status.as_deref().unwrap_or("unknown"))
    })
}

pub fn online_vs_offline(events: &[Event]) -> Vec<CountBucket> {
    bucketize(events, |event| {
        if event.is_online { "Online" } else { "Offline" }.to_string()
    })
}

pub fn users_by_role(users: &[User]) -> Vec<CountBucket> {
    bucketize(users, |user| user.role.as_str().to_string())
}

pub fn verification_split(users: &[User]) -> Vec<CountBucket> {
    bucketize(users, |user| {
        if user.is_verified {
            "Verified"
        } else {
            "Unverified"
        }
        .to_string()
    })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Signups per month for the 12 months ending at `now`, oldest first. Months
/// with no signups are present with a zero count so the chart axis is
/// continuous.
pub fn monthly_signups(users: &[User], now: DateTime<Utc>) -> Vec<CountBucket> {
    let mut months: Vec<(i32, u32)> = Vec::with_capacity(12);
    let mut year = now.year();
    let mut month = now.month();
    for _ in 0..12 {
        months.push((year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    months.reverse();

    let mut counts: HashMap<(i32, u32), usize> = HashMap::new();
    for user in users {
        if let Some(created) = user.created_at.as_deref().and_then(parse_timestamp) {
            *counts.entry((created.year(), created.month())).or_insert(0) += 1;
        }
    }

    const MONTH_NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    months
        .into_iter()
        .map(|(year, month)| CountBucket {
            label: format!("{} {year}", MONTH_NAMES[(month - 1) as usize]),
            count: counts.get(&(year, month)).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::users::UserRole;
    use chrono::TimeZone;

    fn event(kind: &str, status: &str, online: bool) -> Event {
        Event {
            kind: kind.into(),
            status: Some(status.into()),
            is_online: online,
            name: "e".into(),
            ..Event::default()
        }
    }

    fn user(role: UserRole, verified: bool, created_at: &str) -> User {
        User {
            id: None,
            full_name: "u".into(),
            email: "u@example.test".into(),
            role,
            is_verified: verified,
            created_at: Some(created_at.into()),
        }
    }

    #[test]
    fn cards_count_the_headline_figures() {
        let events = vec![
            event("meetup", "upcoming", true),
            event("meetup", "completed", false),
        ];
        let users = vec![
            user(UserRole::Admin, true, "2026-01-02T00:00:00Z"),
            user(UserRole::Employee, false, "2026-01-03T00:00:00Z"),
        ];
        let cards = stat_cards(&events, &users);
        assert_eq!(cards[0].value, 2);
        assert_eq!(cards[1].value, 2);
        assert_eq!(cards[2].value, 1);
        assert_eq!(cards[3].value, 1);
    }

    #[test]
    fn buckets_capitalize_and_sort_by_count() {
        let events = vec![
            event("meetup", "upcoming", true),
            event("meetup", "upcoming", false),
            event("conference", "completed", false),
        ];
        let buckets = events_by_type(&events);
        assert_eq!(buckets[0].label, "Meetup");
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].label, "Conference");
    }

    #[test]
    fn equal_counts_sort_by_label() {
        let events = vec![
            event("workshop", "upcoming", true),
            event("conference", "upcoming", false),
        ];
        let buckets = events_by_type(&events);
        assert_eq!(buckets[0].label, "Conference");
        assert_eq!(buckets[1].label, "Workshop");
    }

    #[test]
    fn verification_split_counts_both_sides() {
        let users = vec![
            user(UserRole::Admin, true, "2026-01-02T00:00:00Z"),
            user(UserRole::Manager, true, "2026-01-02T00:00:00Z"),
            user(UserRole::Employee, false, "2026-01-02T00:00:00Z"),
        ];
        let buckets = verification_split(&users);
        assert_eq!(buckets[0], CountBucket { label: "Verified".into(), count: 2 });
        assert_eq!(buckets[1], CountBucket { label: "Unverified".into(), count: 1 });
    }

    #[test]
    fn monthly_signups_cover_a_continuous_year() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let users = vec![
            user(UserRole::Admin, true, "2026-08-01T00:00:00Z"),
            user(UserRole::Employee, false, "2026-08-02T10:30:00+00:00"),
            user(UserRole::Manager, true, "2025-09-15T00:00:00Z"),
            // Older than the window: not counted.
            user(UserRole::Manager, true, "2024-01-01T00:00:00Z"),
            // Unparseable timestamp: skipped.
            user(UserRole::Manager, true, "yesterday"),
        ];
        let buckets = monthly_signups(&users, now);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "Sep 2025");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[11].label, "Aug 2026");
        assert_eq!(buckets[11].count, 2);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 3);
    }
}
