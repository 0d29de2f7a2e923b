use eventdeck::cache::QueryCache;
use eventdeck::session::Session;

#[test]
fn login_sets_the_marker_and_reload_keeps_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut session = Session::load(&path);
    assert!(!session.is_authenticated(), "fresh install starts logged out");

    session.login("token-abc".into());
    assert!(session.is_authenticated());

    // A new process start sees the persisted marker and goes straight to
    // the private area.
    let restored = Session::load(&path);
    assert!(restored.is_authenticated());
    assert_eq!(restored.token(), Some("token-abc"));
}

#[test]
fn logout_returns_every_future_load_to_the_login_screen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut session = Session::load(&path);
    session.login("token-abc".into());
    session.logout();

    assert!(!session.is_authenticated());
    assert!(!Session::load(&path).is_authenticated());
}

#[test]
fn role_access_defaults_closed_until_the_server_says_otherwise() {
    let cache: QueryCache<bool> = QueryCache::new();
    // No check has resolved yet: mutating controls stay hidden.
    let has_access = cache
        .entry("role-access")
        .and_then(|entry| entry.data)
        .unwrap_or(false);
    assert!(!has_access);
}

#[test]
fn garbled_marker_file_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json at all").unwrap();
    assert!(!Session::load(&path).is_authenticated());
}
