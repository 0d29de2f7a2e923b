use eventdeck::debounce::Debouncer;
use eventdeck::query::{ListQuery, SortDirection};
use serial_test::serial;
use std::time::Duration;

#[test]
#[serial]
fn a_burst_of_keystrokes_commits_one_search() {
    let mut debounce = Debouncer::new(Duration::from_millis(40));
    let mut query = ListQuery::new("users", "fullName", SortDirection::Asc);
    query.set_page(4);

    let mut commits = 0;
    for keystroke in ["a", "an", "ana", "ana ", "ana r"] {
        debounce.input(keystroke);
        if let Some(term) = debounce.poll() {
            query.set_search(term);
            commits += 1;
        }
    }
    assert_eq!(commits, 0);
    assert_eq!(query.page, 4, "nothing committed yet");

    std::thread::sleep(Duration::from_millis(60));
    if let Some(term) = debounce.poll() {
        query.set_search(term);
        commits += 1;
    }
    assert_eq!(commits, 1);
    assert_eq!(query.search, "ana r");
    assert_eq!(query.page, 1);
}

#[test]
fn clearing_flushes_without_waiting() {
    let mut debounce = Debouncer::new(Duration::from_secs(30));
    debounce.input("partial");
    // The clear button drops the pending term and commits the empty search
    // immediately.
    debounce.flush();
    assert!(!debounce.is_pending());
    assert_eq!(debounce.poll(), None);
}

#[test]
#[serial]
fn committed_term_equals_the_last_input() {
    let mut debounce = Debouncer::new(Duration::from_millis(20));
    debounce.input("first");
    debounce.input("second");
    debounce.input("third");
    std::thread::sleep(Duration::from_millis(35));
    assert_eq!(debounce.poll(), Some("third".into()));
}
