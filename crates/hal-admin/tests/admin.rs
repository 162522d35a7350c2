mod support;

use hal_admin::provider::ListParams;
use hal_admin::{Admin, DefaultFileUpload, Headers, Response};
use pretty_assertions::assert_eq;
use support::*;

const DESCRIPTOR_URL: &str = "http://api.test/admin/descriptor";

#[tokio::test]
async fn connect_loads_the_descriptor() {
    let client = MockClient::new();
    client
        .get(DESCRIPTOR_URL, ok(descriptor()))
        .get(
            "http://api.test/posts?limit=100&offset=0&total_count=true",
            with_total("2", page("posts", posts(0..2), None)),
        );

    let admin = Admin::builder()
        .upload(DefaultFileUpload)
        .connect(client.clone(), DESCRIPTOR_URL)
        .await
        .unwrap();

    assert_eq!(admin.schema().title(), "Test Admin");

    let names: Vec<_> = admin.resources().into_iter().map(|r| r.name).collect();
    assert_eq!(names, ["users", "posts", "events"]);

    let result = admin
        .provider()
        .list("posts", ListParams::new())
        .await
        .unwrap();
    assert_eq!(result.total, Some(2));

    assert_eq!(client.urls()[0], DESCRIPTOR_URL);
}

#[tokio::test]
async fn unreachable_descriptor() {
    let client = MockClient::new();

    let err = Admin::builder()
        .connect(client, DESCRIPTOR_URL)
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), Some(404));
    assert!(err
        .to_string()
        .starts_with("failed to fetch the descriptor from `http://api.test/admin/descriptor`"));
}

#[tokio::test]
async fn malformed_descriptor() {
    let client = MockClient::new();
    client.get(
        DESCRIPTOR_URL,
        Response::new(200, Headers::new(), "<html>login required</html>"),
    );

    let err = Admin::builder()
        .connect(client, DESCRIPTOR_URL)
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .starts_with("invalid descriptor at `http://api.test/admin/descriptor`: "));
}

#[tokio::test]
async fn build_from_a_parsed_schema() {
    let admin = Admin::builder().build(MockClient::new(), schema());

    assert!(admin.widgets().get("TextInput").is_some());
    assert_eq!(admin.schema().resource_update_method("users"), "PATCH");
    assert_eq!(admin.schema().resources().count(), 3);
    assert_eq!(admin.resources()[0].label, "Users");
    assert_eq!(
        admin.schema().resource_url("events").unwrap(),
        "http://api.test/events"
    );
}
