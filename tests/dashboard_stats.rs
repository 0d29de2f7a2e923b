use chrono::{TimeZone, Utc};
use eventdeck::api::events::Event;
use eventdeck::api::users::{User, UserRole};
use eventdeck::dashboard::stats;

fn event(kind: &str, status: &str, online: bool) -> Event {
    Event {
        name: format!("{kind} event"),
        kind: kind.into(),
        status: Some(status.into()),
        is_online: online,
        ..Event::default()
    }
}

fn user(role: UserRole, verified: bool, created: &str) -> User {
    User {
        id: None,
        full_name: "someone".into(),
        email: "someone@example.test".into(),
        role,
        is_verified: verified,
        created_at: Some(created.into()),
    }
}

#[test]
fn widget_inputs_rederive_from_the_raw_lists() {
    let events = vec![
        event("conference", "upcoming", false),
        event("conference", "completed", true),
        event("meetup", "upcoming", true),
    ];
    let users = vec![
        user(UserRole::Admin, true, "2026-07-10T09:00:00Z"),
        user(UserRole::Employee, false, "2026-07-11T09:00:00Z"),
        user(UserRole::Employee, true, "2026-08-01T09:00:00Z"),
    ];

    let by_type = stats::events_by_type(&events);
    assert_eq!(by_type[0].label, "Conference");
    assert_eq!(by_type[0].count, 2);

    let by_status = stats::events_by_status(&events);
    assert_eq!(by_status[0].label, "Upcoming");
    assert_eq!(by_status[0].count, 2);

    let modes = stats::online_vs_offline(&events);
    assert_eq!(modes[0].label, "Online");
    assert_eq!(modes[0].count, 2);

    let roles = stats::users_by_role(&users);
    assert_eq!(roles[0].label, "Employee");
    assert_eq!(roles[0].count, 2);

    let cards = stats::stat_cards(&events, &users);
    assert_eq!(cards[2].title, "Verified Users");
    assert_eq!(cards[2].value, 2);
}

#[test]
fn monthly_series_is_a_full_year_window() {
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
    let users = vec![
        user(UserRole::Admin, true, "2026-08-03T12:00:00Z"),
        user(UserRole::Admin, true, "2026-03-20T12:00:00Z"),
        user(UserRole::Admin, true, "2025-08-30T12:00:00Z"),
    ];
    let series = stats::monthly_signups(&users, now);
    assert_eq!(series.len(), 12);
    assert_eq!(series.first().unwrap().label, "Sep 2025");
    assert_eq!(series.last().unwrap().label, "Aug 2026");
    // 2025-08 falls just outside the window.
    assert_eq!(series.iter().map(|b| b.count).sum::<usize>(), 2);
    assert_eq!(
        series.iter().find(|b| b.label == "Mar 2026").unwrap().count,
        1
    );
}
