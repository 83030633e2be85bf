//! Plain-text views
//!
//! Renderers for the terminal client. They take state and return strings,
//! nothing else.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::client::feed::{FeedState, PostCard};
use crate::shared::feed::{Post, UserProfile};
use crate::shared::routes::{self, NAV_ITEMS};

/// "just now", "5m ago", "3h ago", "2d ago", then a calendar date
pub fn relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now - created_at;
    if age.num_seconds() < 60 {
        "just now".to_string()
    } else if age.num_minutes() < 60 {
        format!("{}m ago", age.num_minutes())
    } else if age.num_hours() < 24 {
        format!("{}h ago", age.num_hours())
    } else if age.num_days() < 7 {
        format!("{}d ago", age.num_days())
    } else {
        created_at.format("%b %-d, %Y").to_string()
    }
}

/// Navigation shell with the active item marked
pub fn navigation(current: &str) -> String {
    let current = routes::normalize(current);
    NAV_ITEMS
        .iter()
        .map(|(label, path)| {
            if *path == current {
                format!("[{}]", label)
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn author(post: &Post) -> &str {
    post.username.as_deref().unwrap_or(&post.author_id)
}

pub fn post_card(card: &PostCard, now: DateTime<Utc>) -> String {
    let post = &card.post;
    let mut out = String::new();
    let _ = writeln!(out, "{} · {}", author(post), relative_age(post.created_at, now));
    if !post.content.is_empty() {
        let _ = writeln!(out, "{}", post.content);
    }
    if post.image_url.is_some() {
        let _ = writeln!(out, "[image]");
    }
    let heart = if card.likes.liked() { "♥" } else { "♡" };
    let _ = write!(
        out,
        "{} {} likes • {} comments  (#{})",
        heart,
        card.likes.count(),
        post.comment_count,
        post.id
    );
    out
}

pub fn feed(state: &FeedState, now: DateTime<Utc>) -> String {
    if state.is_empty() {
        return "No posts yet".to_string();
    }
    state
        .cards()
        .iter()
        .map(|card| post_card(card, now))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Profile header followed by the user's posts
pub fn profile(user: &UserProfile, state: &FeedState, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (@{})", user.display_name(), user.username);
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "{}", bio);
    }
    let _ = writeln!(out, "{} posts", state.len());
    let _ = writeln!(out);
    out.push_str(&feed(state, now));
    out
}

pub fn search_results(query: &str, posts: &[&Post], now: DateTime<Utc>) -> String {
    if posts.is_empty() {
        return format!("No posts found for \"{}\"", query.trim());
    }
    let mut out = format!("{} result(s) for \"{}\"\n", posts.len(), query.trim());
    for post in posts {
        let _ = write!(
            out,
            "\n{} · {}\n{}\n",
            author(post),
            relative_age(post.created_at, now),
            post.content
        );
    }
    out
}
