use eventdeck::query::{pagination_numbers, PageToken, MAX_VISIBLE_PAGES};

fn pages(tokens: &[PageToken]) -> Vec<u32> {
    tokens
        .iter()
        .filter_map(|token| match token {
            PageToken::Page(page) => Some(*page),
            PageToken::Ellipsis => None,
        })
        .collect()
}

#[test]
fn middle_pages_get_a_centered_window() {
    let tokens = pagination_numbers(10, 20, MAX_VISIBLE_PAGES);
    assert_eq!(pages(&tokens), vec![1, 9, 10, 11, 20]);
    assert_eq!(
        tokens.iter().filter(|t| **t == PageToken::Ellipsis).count(),
        2
    );
}

#[test]
fn early_pages_run_from_the_start() {
    assert_eq!(pages(&pagination_numbers(2, 20, MAX_VISIBLE_PAGES)), vec![1, 2, 3, 4, 20]);
}

#[test]
fn late_pages_run_to_the_end() {
    assert_eq!(
        pages(&pagination_numbers(19, 20, MAX_VISIBLE_PAGES)),
        vec![1, 17, 18, 19, 20]
    );
}

#[test]
fn small_totals_have_no_ellipsis() {
    let tokens = pagination_numbers(2, 5, MAX_VISIBLE_PAGES);
    assert_eq!(pages(&tokens), vec![1, 2, 3, 4, 5]);
    assert!(tokens.iter().all(|t| *t != PageToken::Ellipsis));
}

#[test]
fn out_of_range_current_is_clamped_not_emitted() {
    for current in [0, 25, 99] {
        for token in pagination_numbers(current, 20, MAX_VISIBLE_PAGES) {
            if let PageToken::Page(page) = token {
                assert!((1..=20).contains(&page));
            }
        }
    }
    assert!(pagination_numbers(3, 0, MAX_VISIBLE_PAGES).is_empty());
}
