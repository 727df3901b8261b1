use crate::common::{
    cover_bytes, detail_html, mount_bytes, mount_detail, mount_listing, mount_redirect,
    mount_text, mount_text_redirect, test_config,
};
use folio::output::render_dataset;
use folio::storage::{JsonStorage, Storage};
use folio::{harvest, FolioError, Harvester};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Catalog with one listing page holding books 7 and 12; book 12 was removed
async fn mount_two_book_catalog(server: &MockServer) {
    mount_listing(server, 1, &["7", "12"]).await;
    mount_redirect(server, "/l55/2/").await;

    mount_detail(
        server,
        "7",
        detail_html(
            "Foo \u{a0} :: \u{a0} Bar",
            "/shots/7.jpg",
            &["Great book", "Could be shorter"],
            &["Фантастика", "Приключения"],
        ),
    )
    .await;
    mount_text(server, "7", "Once upon a time").await;
    mount_bytes(server, "/shots/7.jpg", cover_bytes()).await;

    mount_redirect(server, "/b12/").await;
}

#[tokio::test]
async fn test_full_harvest_skips_removed_book() {
    let mock_server = MockServer::start().await;
    mount_two_book_catalog(&mock_server).await;

    // A removed book's assets are never requested
    Mock::given(method("GET"))
        .and(path("/txt.php"))
        .and(wiremock::matchers::query_param("id", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_string("never"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&mock_server.uri(), dir.path(), None);

    let mut harvester = Harvester::new(config).expect("Failed to create harvester");
    let collection = harvester.run().await.expect("Harvest failed");

    assert_eq!(collection.len(), 1);
    let book = &collection.records()[0];
    assert_eq!(book.title, "Foo");
    assert_eq!(book.author, "Bar");
    assert_eq!(book.comments, vec!["Great book", "Could be shorter"]);
    assert_eq!(book.genres, vec!["Фантастика", "Приключения"]);

    let text_path = book.text_path.as_ref().expect("text should be saved");
    assert_eq!(text_path, &dir.path().join("books").join("Foo.txt"));
    assert_eq!(std::fs::read_to_string(text_path).unwrap(), "Once upon a time");

    let image_path = book.image_path.as_ref().expect("cover should be saved");
    assert_eq!(image_path, &dir.path().join("images").join("7.jpg"));
    assert_eq!(std::fs::read(image_path).unwrap(), cover_bytes());

    let stats = harvester.stats();
    assert_eq!(stats.pages_visited, 1);
    assert_eq!(stats.stopped_at, Some(2));
    assert_eq!(stats.ids_discovered, 2);
    assert_eq!(stats.records, 1);
    assert_eq!(stats.unavailable, 1);
}

#[tokio::test]
async fn test_harvest_writes_dataset() {
    let mock_server = MockServer::start().await;
    mount_two_book_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&mock_server.uri(), dir.path(), Some(1));
    let dataset = Path::new(&config.output.dataset_path).to_path_buf();

    let stats = harvest(config).await.expect("Harvest failed");
    assert_eq!(stats.records, 1);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&dataset).unwrap()).unwrap();
    let books = json.as_array().expect("dataset should be an array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Foo");
    assert_eq!(books[0]["author"], "Bar");
    assert!(books[0]["img_src"].as_str().unwrap().ends_with("7.jpg"));
    assert!(books[0]["book_path"].as_str().unwrap().ends_with("Foo.txt"));

    let loaded = JsonStorage::new(&dataset).load().unwrap();
    assert_eq!(loaded.records()[0].genres, vec!["Фантастика", "Приключения"]);
}

#[tokio::test]
async fn test_repeated_harvest_is_byte_identical() {
    let mock_server = MockServer::start().await;
    mount_two_book_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("book_list.json");

    harvest(test_config(&mock_server.uri(), dir.path(), None))
        .await
        .unwrap();
    let first = std::fs::read(&dataset).unwrap();

    harvest(test_config(&mock_server.uri(), dir.path(), None))
        .await
        .unwrap();
    let second = std::fs::read(&dataset).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_text_keeps_record() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 1, &["3"]).await;
    mount_detail(
        &mock_server,
        "3",
        detail_html("Baz :: Qux", "/shots/3.jpg", &[], &[]),
    )
    .await;
    mount_text_redirect(&mock_server, "3").await;
    mount_bytes(&mock_server, "/shots/3.jpg", cover_bytes()).await;

    let dir = TempDir::new().unwrap();
    let mut harvester = Harvester::new(test_config(&mock_server.uri(), dir.path(), Some(1))).unwrap();
    let collection = harvester.run().await.unwrap();

    let book = &collection.records()[0];
    assert_eq!(book.text_path, None);
    assert!(book.image_path.is_some());
    assert!(book.comments.is_empty());
    assert!(book.genres.is_empty());
    assert_eq!(harvester.stats().missing_texts, 1);
}

#[tokio::test]
async fn test_repeated_ids_processed_once() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 1, &["3", "3"]).await;
    Mock::given(method("GET"))
        .and(path("/b3/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail_html("Baz :: Qux", "/shots/3.jpg", &[], &[])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_text(&mock_server, "3", "text").await;
    mount_bytes(&mock_server, "/shots/3.jpg", cover_bytes()).await;

    let dir = TempDir::new().unwrap();
    let mut harvester = Harvester::new(test_config(&mock_server.uri(), dir.path(), Some(1))).unwrap();
    let collection = harvester.run().await.unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(harvester.stats().duplicates_dropped, 1);
}

#[tokio::test]
async fn test_malformed_heading_aborts_without_dataset() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 1, &["7"]).await;
    mount_detail(
        &mock_server,
        "7",
        detail_html("Foo by Bar", "/shots/7.jpg", &[], &[]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&mock_server.uri(), dir.path(), Some(1));
    let dataset = Path::new(&config.output.dataset_path).to_path_buf();

    let result = harvest(config).await;

    match result {
        Err(FolioError::MalformedPage { url, message }) => {
            assert!(url.ends_with("/b7/"));
            assert!(message.contains("separator"));
        }
        other => panic!("Expected malformed page error, got {:?}", other),
    }
    assert!(!dataset.exists());
}

#[tokio::test]
async fn test_detail_server_error_aborts() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 1, &["7"]).await;
    Mock::given(method("GET"))
        .and(path("/b7/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = test_config(&mock_server.uri(), dir.path(), Some(1));
    let dataset = Path::new(&config.output.dataset_path).to_path_buf();

    let result = harvest(config).await;
    assert!(matches!(result, Err(FolioError::Status { .. })));
    assert!(!dataset.exists());
}

#[tokio::test]
async fn test_harvest_then_render() {
    let mock_server = MockServer::start().await;
    mount_two_book_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&mock_server.uri(), dir.path(), Some(1));
    config.site.static_folder = dir.path().join("static").display().to_string();
    config.site.template_path = dir.path().join("template.html").display().to_string();
    let dataset = Path::new(&config.output.dataset_path).to_path_buf();
    let site = config.site.clone();

    harvest(config).await.unwrap();
    let pages = render_dataset(&dataset, &site).unwrap();

    assert_eq!(pages.len(), 1);
    let html = std::fs::read_to_string(&pages[0]).unwrap();
    assert!(html.contains("<h2>Foo</h2>"));
    assert!(html.contains("Bar"));
}

#[tokio::test]
async fn test_unwritable_image_folder_aborts_without_dataset() {
    let mock_server = MockServer::start().await;
    mount_two_book_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&mock_server.uri(), dir.path(), Some(1));
    // A regular file where the image folder should be
    let blocker = dir.path().join("images");
    std::fs::write(&blocker, b"not a folder").unwrap();
    config.output.image_folder = blocker.display().to_string();
    let dataset = Path::new(&config.output.dataset_path).to_path_buf();

    let result = harvest(config).await;

    assert!(matches!(result, Err(FolioError::Io(_))), "got {:?}", result);
    assert!(!dataset.exists());
}

#[tokio::test]
async fn test_covers_differing_by_query_are_kept_apart() {
    let mock_server = MockServer::start().await;

    mount_listing(&mock_server, 1, &["1", "2"]).await;
    for id in ["1", "2"] {
        mount_detail(
            &mock_server,
            id,
            detail_html(
                &format!("Book {} :: Author", id),
                &format!("/img.php?id={}", id),
                &[],
                &[],
            ),
        )
        .await;
        mount_text(&mock_server, id, "text").await;
        Mock::given(method("GET"))
            .and(path("/img.php"))
            .and(wiremock::matchers::query_param("id", id))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(id.as_bytes().to_vec()))
            .mount(&mock_server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let mut harvester = Harvester::new(test_config(&mock_server.uri(), dir.path(), Some(1))).unwrap();
    let collection = harvester.run().await.unwrap();

    let images: Vec<_> = collection
        .iter()
        .map(|book| book.image_path.clone().expect("cover should be saved"))
        .collect();
    assert_eq!(images[0], dir.path().join("images").join("img.phpid=1"));
    assert_eq!(images[1], dir.path().join("images").join("img.phpid=2"));
    assert_eq!(std::fs::read(&images[0]).unwrap(), b"1");
    assert_eq!(std::fs::read(&images[1]).unwrap(), b"2");
}
