use crate::common::{listing_html, mount_listing, mount_redirect};
use folio::config::UserAgentConfig;
use folio::crawler::{build_http_client, walk_catalog};
use folio::url::Endpoints;
use folio::{BookId, FolioError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(list: &[&str]) -> Vec<BookId> {
    list.iter().map(|id| BookId::new(*id)).collect()
}

#[tokio::test]
async fn test_unbounded_walk_stops_at_relocated_page() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 1, &["7", "12"]).await;
    mount_listing(&mock_server, 2, &["30", "4"]).await;
    mount_redirect(&mock_server, "/l55/3/").await;

    // A later page must never be requested
    Mock::given(method("GET"))
        .and(path("/l55/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["99"])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let endpoints = Endpoints::new(&mock_server.uri(), 55).unwrap();

    let walk = walk_catalog(&client, &endpoints, 1, None)
        .await
        .expect("Walk failed");

    assert_eq!(walk.ids, ids(&["7", "12", "30", "4"]));
    assert_eq!(walk.pages_visited, 2);
    assert_eq!(walk.stopped_at, Some(3));
}

#[tokio::test]
async fn test_bounded_walk_is_inclusive() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 2, &["5"]).await;
    mount_listing(&mock_server, 3, &["6", "8"]).await;

    for page in ["/l55/1/", "/l55/4/"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["99"])))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let endpoints = Endpoints::new(&mock_server.uri(), 55).unwrap();

    let walk = walk_catalog(&client, &endpoints, 2, Some(3)).await.unwrap();

    assert_eq!(walk.ids, ids(&["5", "6", "8"]));
    assert_eq!(walk.pages_visited, 2);
    assert_eq!(walk.stopped_at, None);
}

#[tokio::test]
async fn test_walk_keeps_repeated_ids() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 1, &["7", "7"]).await;

    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let endpoints = Endpoints::new(&mock_server.uri(), 55).unwrap();

    let walk = walk_catalog(&client, &endpoints, 1, Some(1)).await.unwrap();
    assert_eq!(walk.ids, ids(&["7", "7"]));
}

#[tokio::test]
async fn test_walk_fails_on_server_error() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 1, &["7"]).await;
    Mock::given(method("GET"))
        .and(path("/l55/2/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let endpoints = Endpoints::new(&mock_server.uri(), 55).unwrap();

    let result = walk_catalog(&client, &endpoints, 1, None).await;
    match result {
        Err(FolioError::Status { status, .. }) => assert_eq!(status.as_u16(), 503),
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_walk_fails_on_unexpected_listing_link() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/l55/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="d_book"><div class="bookimage"><a href="/authors/x/">x</a></div></div>"#,
        ))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default()).unwrap();
    let endpoints = Endpoints::new(&mock_server.uri(), 55).unwrap();

    let result = walk_catalog(&client, &endpoints, 1, Some(1)).await;
    assert!(matches!(result, Err(FolioError::MalformedPage { .. })));
}
