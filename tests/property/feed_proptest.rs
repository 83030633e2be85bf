//! Property-based tests for feed ordering

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use socialfeed::shared::feed::{sort_newest_first, Post};

fn post(index: usize, secs: i64) -> Post {
    Post {
        id: index.to_string(),
        author_id: "u".to_string(),
        username: None,
        content: String::new(),
        image_url: None,
        like_count: 0,
        comment_count: 0,
        created_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
    }
}

proptest! {
    #[test]
    fn test_sorted_newest_first(offsets in prop::collection::vec(0i64..1_000, 0..50)) {
        let mut posts: Vec<Post> = offsets.iter().enumerate().map(|(i, s)| post(i, *s)).collect();
        sort_newest_first(&mut posts);

        prop_assert_eq!(posts.len(), offsets.len());
        for pair in posts.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
            // Ties keep backend order.
            if pair[0].created_at == pair[1].created_at {
                let a: usize = pair[0].id.parse().unwrap();
                let b: usize = pair[1].id.parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn test_sort_is_idempotent(offsets in prop::collection::vec(0i64..100, 0..30)) {
        let mut once: Vec<Post> = offsets.iter().enumerate().map(|(i, s)| post(i, *s)).collect();
        sort_newest_first(&mut once);
        let mut twice = once.clone();
        sort_newest_first(&mut twice);
        prop_assert_eq!(once, twice);
    }
}
