mod support;

use hal_admin::provider::ListParams;
use hal_admin::schema::Sort;
use hal_admin::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use support::*;

#[tokio::test]
async fn pages_are_followed_until_the_page_size_is_filled() {
    let client = MockClient::new();
    client
        .get(
            "http://api.test/posts?limit=25&offset=0&total_count=true",
            with_total("25", page("posts", posts(0..10), Some("/posts?offset=10"))),
        )
        .get(
            "http://api.test/posts?offset=10",
            ok(page("posts", posts(10..20), Some("http://api.test/posts?offset=20"))),
        )
        .get(
            "http://api.test/posts?offset=20",
            ok(page("posts", posts(20..25), None)),
        );

    let result = provider(&client)
        .list("posts", ListParams::new().paginate(1, 25))
        .await
        .unwrap();

    assert_eq!(
        client.urls(),
        [
            "http://api.test/posts?limit=25&offset=0&total_count=true",
            "http://api.test/posts?offset=10",
            "http://api.test/posts?offset=20",
        ]
    );
    assert!(client.requests().iter().all(|r| r.method == Method::Get && r.body.is_none()));

    assert_eq!(result.data.len(), 25);
    assert_eq!(result.data[24].get("id"), Some(&json!(24)));
    assert_eq!(result.total, Some(25));
    assert!(!result.has_next_page);
}

#[tokio::test]
async fn a_full_page_stops_the_loop() {
    let client = MockClient::new();
    client.get(
        "http://api.test/posts?limit=10&offset=10&total_count=true",
        with_total("42", page("posts", posts(10..20), Some("/posts?offset=20"))),
    );

    let result = provider(&client)
        .list("posts", ListParams::new().paginate(2, 10))
        .await
        .unwrap();

    assert_eq!(client.requests().len(), 1);
    assert_eq!(result.data.len(), 10);
    assert_eq!(result.total, Some(42));
    assert!(result.has_next_page);
}

#[tokio::test]
async fn an_empty_page_stops_the_loop() {
    let client = MockClient::new();
    client.get(
        "http://api.test/posts?limit=10&offset=0&total_count=true",
        with_total("0", page("posts", vec![], Some("/posts?offset=0"))),
    );

    let result = provider(&client)
        .list("posts", ListParams::new().paginate(1, 10))
        .await
        .unwrap();

    assert_eq!(client.requests().len(), 1);
    assert!(result.data.is_empty());
    assert!(result.has_next_page);
}

#[tokio::test]
async fn short_pages_do_not_stop_the_loop() {
    let client = MockClient::new();
    client.get(
        "http://api.test/events?limit=10&offset=20",
        ok(page(
            "events",
            vec![json!({"id": 21, "kind": "login"})],
            Some("/events?offset=30"),
        )),
    );

    let result = provider(&client)
        .list("events", ListParams::new().paginate(3, 10))
        .await;

    // The short page still links to a next one, which this server does not
    // know.
    let err = result.unwrap_err();
    assert_eq!(err.http_status(), Some(404));
    assert_eq!(
        client.urls(),
        [
            "http://api.test/events?limit=10&offset=20",
            "http://api.test/events?offset=30",
        ]
    );
}

#[tokio::test]
async fn infinite_pagination_reports_more_pages() {
    let client = MockClient::new();
    client.get(
        "http://api.test/events?limit=2&offset=0",
        ok(page(
            "events",
            vec![json!({"id": 1}), json!({"id": 2})],
            Some("/events?offset=2"),
        )),
    );

    let result = provider(&client)
        .list("events", ListParams::new().paginate(1, 2))
        .await
        .unwrap();

    assert_eq!(result.total, None);
    assert!(result.has_next_page);
    assert_eq!(result.data.len(), 2);
}

#[tokio::test]
async fn infinite_pagination_never_asks_for_a_total() {
    let client = MockClient::new();
    client.get(
        "http://api.test/events?kind=login&limit=5&offset=0",
        ok(page("events", vec![json!({"id": 1})], None)),
    );

    let result = provider(&client)
        .list(
            "events",
            ListParams::new()
                .paginate(1, 5)
                .filter("kind", "login")
                .filter("total_count", true),
        )
        .await
        .unwrap();

    assert_eq!(client.urls(), ["http://api.test/events?kind=login&limit=5&offset=0"]);
    assert_eq!(result.total, None);
    assert!(!result.has_next_page);
}

#[tokio::test]
async fn out_of_range_page_sends_nothing() {
    let client = MockClient::new();

    let err = provider(&client)
        .list("posts", ListParams::new().paginate(u64::MAX, 2))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("out of range"));
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn filter_and_sort_are_sent_as_query_parameters() {
    let client = MockClient::new();
    client.get(
        "http://api.test/posts?limit=100&offset=0&order_by=-title&q=rust&total_count=true",
        with_total("1", page("posts", posts(0..1), None)),
    );

    let result = provider(&client)
        .list(
            "posts",
            ListParams::new().sort(Sort::desc("title")).filter("q", "rust"),
        )
        .await
        .unwrap();

    assert_eq!(result.total, Some(1));
}

#[tokio::test]
async fn sorting_by_a_non_orderable_field_is_ignored() {
    let client = MockClient::new();
    client.get(
        "http://api.test/posts?limit=100&offset=0&total_count=true",
        with_total("0", page("posts", vec![], None)),
    );

    let result = provider(&client)
        .list("posts", ListParams::new().sort(Sort::asc("body")))
        .await
        .unwrap();

    assert_eq!(result.total, Some(0));
    assert!(!result.has_next_page);
}

#[tokio::test]
async fn ranged_total_count() {
    let client = MockClient::new();
    client.get(
        "http://api.test/posts?limit=100&offset=0&total_count=true",
        with_total("0-2/3", page("posts", posts(0..3), None)),
    );

    let result = provider(&client).list("posts", ListParams::new()).await.unwrap();
    assert_eq!(result.total, Some(3));
}

#[tokio::test]
async fn missing_total_count() {
    let client = MockClient::new();
    client.get(
        "http://api.test/posts?limit=100&offset=0&total_count=true",
        ok(page("posts", posts(0..3), None)),
    );

    let err = provider(&client)
        .list("posts", ListParams::new())
        .await
        .unwrap_err();
    assert!(err.is_missing_total_count());
}

#[tokio::test]
async fn unknown_resource_sends_nothing() {
    let client = MockClient::new();

    let err = provider(&client)
        .list("comments", ListParams::new())
        .await
        .unwrap_err();

    assert!(err.is_unknown_resource());
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn server_errors_propagate() {
    let client = MockClient::new();
    client.get(
        "http://api.test/posts?limit=100&offset=0&total_count=true",
        status(500, json!({"message": "database is down"})),
    );

    let err = provider(&client)
        .list("posts", ListParams::new())
        .await
        .unwrap_err();

    assert!(err.is_http());
    assert_eq!(err.http_status(), Some(500));
    assert_eq!(err.to_string(), "HTTP 500: database is down");
}
