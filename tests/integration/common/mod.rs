use folio::config::{CatalogConfig, Config, OutputConfig};
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Listing page markup with one entry per identifier
pub fn listing_html(ids: &[&str]) -> String {
    let entries: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<table class="d_book"><tr><td>
                <div class="bookimage"><a href="/b{id}/" title="book {id}"><img src="/images/nopic.gif"></a></div>
                </td></tr></table>"#
            )
        })
        .collect();
    format!("<html><body><div id=\"content\">{}</div></body></html>", entries)
}

/// Detail page markup
pub fn detail_html(heading: &str, cover_src: &str, comments: &[&str], genres: &[&str]) -> String {
    let comments: String = comments
        .iter()
        .map(|c| format!(r#"<div class="texts"><b>reader</b><span class="black">{}</span></div>"#, c))
        .collect();
    let genres: String = genres
        .iter()
        .map(|g| format!(r#"<a href="/l1/">{}</a>"#, g))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"<html><body>
        <h1>{heading}</h1>
        <div class="bookimage"><a href="/b0/"><img src="{cover_src}" alt="cover"></a></div>
        <span class="d_book">Жанр книги: {genres}</span>
        {comments}
        </body></html>"#
    )
}

/// A configuration pointing at the mock server and the given folder
pub fn test_config(base_url: &str, dir: &Path, end_page: Option<u32>) -> Config {
    Config {
        catalog: CatalogConfig {
            base_url: base_url.to_string(),
            category: 55,
            start_page: 1,
            end_page,
        },
        output: OutputConfig {
            dataset_path: dir.join("book_list.json").display().to_string(),
            image_folder: dir.join("images").display().to_string(),
            text_folder: dir.join("books").display().to_string(),
        },
        ..Config::default()
    }
}

pub async fn mount_listing(server: &MockServer, page: u32, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/l55/{}/", page)))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(ids)))
        .mount(server)
        .await;
}

pub async fn mount_redirect(server: &MockServer, url_path: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/"))
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, id: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(format!("/b{}/", id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

pub async fn mount_text(server: &MockServer, id: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/txt.php"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_text_redirect(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path("/txt.php"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/"))
        .mount(server)
        .await;
}

pub async fn mount_bytes(server: &MockServer, url_path: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// A few bytes that are not valid UTF-8
pub fn cover_bytes() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0xFF, 0xD9]
}
