//! Post API integration tests
//!
//! Listing order, create/delete effects on the local feed, and like
//! round-trips.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use socialfeed::client::{ClientError, FeedState, ImagePayload, PostCard, PostDraft};
use socialfeed::shared::feed::UpdatePostRequest;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{error_response, ok_result, post_json, TestBackend, JANE};
use crate::{assert_contains, assert_err, assert_ok};

async fn mount_posts(backend: &TestBackend) {
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ok_result(json!([
            post_json(1, "7", "oldest", "2024-01-01T08:00:00Z", 0),
            post_json(3, "42", "newest", "2024-03-01T08:00:00.000", 5),
            post_json(2, "7", "middle", "2024-02-01T08:00:00+02:00", 1),
        ])))
        .mount(&backend.server)
        .await;
}

fn ids(feed: &FeedState) -> Vec<&str> {
    feed.posts().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn test_list_all_sorted_newest_first() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    mount_posts(&backend).await;

    let mut feed = FeedState::new();
    assert_eq!(assert_ok!(feed.load_all(&backend.posts()).await), 3);
    assert_eq!(ids(&feed), ["3", "2", "1"]);
}

#[tokio::test]
async fn test_list_by_user() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("GET"))
        .and(path("/posts/user/42"))
        .respond_with(ok_result(json!([
            post_json(5, "42", "a", "2024-01-01T00:00:00Z", 0),
            post_json(6, "42", "b", "2024-01-02T00:00:00Z", 0),
        ])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let posts = assert_ok!(backend.posts().list_by_user("42").await);
    let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["6", "5"]);
}

#[tokio::test]
async fn test_empty_list_body() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ok_result(json!(null)))
        .mount(&backend.server)
        .await;

    assert!(assert_ok!(backend.posts().list_all().await).is_empty());
}

#[tokio::test]
async fn test_requests_without_session_are_not_sent() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    assert_err!(backend.posts().list_all().await, ClientError::MissingSession);
    assert_err!(backend.posts().like_status("1", JANE.id).await, ClientError::MissingSession);
}

#[tokio::test]
async fn test_create_prepends_after_success() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    mount_posts(&backend).await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_partial_json(json!({
            "userId": JANE.id,
            "content": "hello world",
            "imageUrl": "data:image/png;base64,AQID",
        })))
        .respond_with(ok_result(post_json(9, JANE.id, "hello world", "2024-04-01T00:00:00Z", 0)))
        .expect(1)
        .mount(&backend.server)
        .await;

    let posts = backend.posts();
    let mut feed = FeedState::new();
    feed.load_all(&posts).await.unwrap();

    let draft = PostDraft::text(" hello world ").with_image(ImagePayload::new("image/png", vec![1, 2, 3]));
    let card = assert_ok!(feed.create(&posts, draft, JANE.id).await);
    assert_eq!(card.post.id, "9");
    assert_eq!(ids(&feed), ["9", "3", "2", "1"]);
}

#[tokio::test]
async fn test_create_failure_leaves_feed_unchanged() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    mount_posts(&backend).await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(error_response(500, "storage full"))
        .mount(&backend.server)
        .await;

    let posts = backend.posts();
    let mut feed = FeedState::new();
    feed.load_all(&posts).await.unwrap();

    assert_err!(
        feed.create(&posts, PostDraft::text("hi"), JANE.id).await,
        ClientError::Api { status: 500, .. }
    );
    assert_eq!(ids(&feed), ["3", "2", "1"]);
}

#[tokio::test]
async fn test_empty_draft_is_not_sent() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let mut feed = FeedState::new();
    let err = feed.create(&backend.posts(), PostDraft::text("  "), JANE.id).await.unwrap_err();
    assert_contains!(err.user_message(), "content or image");
    assert!(feed.is_empty());
}

#[tokio::test]
async fn test_update_sends_camel_case_body() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("PUT"))
        .and(path("/posts/3"))
        .and(body_json(json!({
            "content": "edited",
            "imageUrl": "data:image/png;base64,AQID",
        })))
        .respond_with(ok_result(post_json(3, JANE.id, "edited", "2024-03-01T08:00:00Z", 5)))
        .expect(1)
        .mount(&backend.server)
        .await;

    let request = UpdatePostRequest {
        content: "edited".into(),
        image_url: Some("data:image/png;base64,AQID".into()),
    };
    let post = assert_ok!(backend.posts().update("3", &request).await);
    assert_eq!(post.id, "3");
    assert_eq!(post.content, "edited");
    assert_eq!(post.like_count, 5);
}

#[tokio::test]
async fn test_empty_update_is_not_sent() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let request = UpdatePostRequest {
        content: "   ".into(),
        image_url: None,
    };
    let err = backend.posts().update("3", &request).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(_));
    assert_contains!(err.user_message(), "content or image");
}

#[tokio::test]
async fn test_delete_removes_only_on_success() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    mount_posts(&backend).await;
    Mock::given(method("DELETE"))
        .and(path("/posts/2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/3"))
        .respond_with(error_response(403, "not your post"))
        .expect(1)
        .mount(&backend.server)
        .await;

    let posts = backend.posts();
    let mut feed = FeedState::new();
    feed.load_all(&posts).await.unwrap();

    assert_ok!(feed.delete(&posts, "2").await);
    assert_eq!(ids(&feed), ["3", "1"]);

    assert_err!(feed.delete(&posts, "3").await, ClientError::Api { status: 403, .. });
    assert_eq!(ids(&feed), ["3", "1"]);
}

#[tokio::test]
async fn test_like_and_unlike_round_trip() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("GET"))
        .and(path("/posts/3/like/status"))
        .and(query_param("userId", JANE.id))
        .respond_with(ok_result(json!(false)))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/posts/3/like"))
        .and(query_param("userId", JANE.id))
        .respond_with(ok_result(json!("Post liked")))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/3/like"))
        .and(query_param("userId", JANE.id))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    let posts = backend.posts();
    let post = serde_json::from_value(post_json(3, "7", "hi", "2024-01-01T00:00:00Z", 5)).unwrap();
    let mut card = PostCard::new(post);

    assert_ok!(card.mount(&posts, JANE.id).await);
    // Mounting twice fetches once.
    assert_ok!(card.mount(&posts, JANE.id).await);
    assert!(!card.likes.liked());

    assert!(assert_ok!(card.toggle_like(&posts, JANE.id).await));
    assert!(card.likes.liked());
    assert_eq!(card.likes.count(), 6);

    assert!(assert_ok!(card.toggle_like(&posts, JANE.id).await));
    assert!(!card.likes.liked());
    assert_eq!(card.likes.count(), 5);
    assert!(card.likes.is_enabled());
}

#[tokio::test]
async fn test_failed_like_reverts() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("PUT"))
        .and(path("/posts/3/like"))
        .respond_with(error_response(500, "boom"))
        .mount(&backend.server)
        .await;

    let post = serde_json::from_value(post_json(3, "7", "hi", "2024-01-01T00:00:00Z", 5)).unwrap();
    let mut card = PostCard::new(post);

    assert_err!(card.toggle_like(&backend.posts(), JANE.id).await);
    assert!(!card.likes.liked());
    assert_eq!(card.likes.count(), 5);
    assert!(card.likes.is_enabled());
}

#[tokio::test]
async fn test_like_status_object_form() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("GET"))
        .and(path("/posts/4/like/status"))
        .respond_with(ok_result(json!({"isLiked": true, "likeCount": 12})))
        .mount(&backend.server)
        .await;

    let status = assert_ok!(backend.posts().like_status("4", JANE.id).await);
    assert!(status.liked);
    assert_eq!(status.like_count, Some(12));
}

#[tokio::test]
async fn test_get_post_not_found() {
    let backend = TestBackend::start().await;
    backend.sign_in(JANE.id);
    Mock::given(method("GET"))
        .and(path("/posts/404"))
        .respond_with(error_response(404, "Post not found"))
        .mount(&backend.server)
        .await;

    let err = backend.posts().get("404").await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 404, .. });
    assert_eq!(err.user_message(), "Not found");
}
