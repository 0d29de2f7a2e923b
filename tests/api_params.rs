use eventdeck::api::events::Event;
use eventdeck::api::resources::{ExternalResource, ResourceKind};
use eventdeck::api::users::{User, UserRole};
use eventdeck::api::{events, resources, users, Page};
use eventdeck::query::{ListQuery, SortDirection};

fn names(pairs: &[(String, String)]) -> Vec<&str> {
    pairs.iter().map(|(name, _)| name.as_str()).collect()
}

#[test]
fn users_wire_order_matches_the_platform_api() {
    let query = ListQuery::new("users", "fullName", SortDirection::Asc);
    assert_eq!(
        names(&query.to_pairs(&users::FILTER_NAMES)),
        ["page", "pageSize", "search", "sort", "direction", "role", "isVerified"]
    );
}

#[test]
fn events_wire_order_matches_the_platform_api() {
    let query = ListQuery::new("events", "name", SortDirection::Asc);
    assert_eq!(
        names(&query.to_pairs(&events::FILTER_NAMES)),
        ["page", "pageSize", "search", "sort", "direction", "city", "type", "isOnline", "status"]
    );
}

#[test]
fn resources_wire_order_matches_the_platform_api() {
    let query = ListQuery::new("resources", "createdAt", SortDirection::Desc);
    let pairs = query.to_pairs(&resources::FILTER_NAMES);
    assert_eq!(
        names(&pairs),
        ["page", "pageSize", "search", "sort", "direction", "type"]
    );
    assert_eq!(pairs[4].1, "desc");
}

#[test]
fn list_envelope_decodes_items_and_total() {
    let json = r#"{
        "data": [
            {"_id": "1", "fullName": "Ana", "email": "ana@example.test", "role": "Admin", "isVerified": true}
        ],
        "total": 37
    }"#;
    let page: Page<User> = serde_json::from_str(json).unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].role, UserRole::Admin);
    assert_eq!(page.total, 37);
    assert_eq!(page.page_count(10), 4);
}

#[test]
fn event_payload_round_trips_camel_case_fields() {
    let json = r#"{
        "name": "Hack Night",
        "type": "meetup",
        "isOnline": true,
        "startDateTime": "2026-10-01T18:00",
        "endDateTime": "2026-10-01T21:00",
        "status": "upcoming"
    }"#;
    let event: Event = serde_json::from_str(json).unwrap();
    assert!(event.is_online);
    assert_eq!(event.city, None);
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["endDateTime"], "2026-10-01T21:00");
    assert!(value.get("city").is_none());
}

#[test]
fn resource_kind_values_are_the_wire_enumeration() {
    for (kind, wire) in [
        (ResourceKind::Apps, "apps"),
        (ResourceKind::Articles, "articles"),
        (ResourceKind::Audios, "audios"),
        (ResourceKind::Videos, "videos"),
        (ResourceKind::Books, "books"),
    ] {
        assert_eq!(kind.as_str(), wire);
    }
    let resource = ExternalResource {
        id: None,
        name: "Guide".into(),
        link: "https://example.test/guide".into(),
        kind: ResourceKind::Videos,
        created_by: None,
        created_at: None,
    };
    let value = serde_json::to_value(&resource).unwrap();
    assert_eq!(value["type"], "videos");
}
