//! Integration tests for the crawl-and-export flow
//!
//! These tests use wiremock to stand in for the movie site and check the
//! whole run end-to-end, down to the CSV files on disk.

use filmow_export::config::{Config, ExportConfig, PolicyKind, SiteConfig};
use filmow_export::crawler::run_export_with;
use filmow_export::output::{CrawlObserver, TracingObserver};
use filmow_export::{run_export, FilmowError};
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const LISTING_PATH: &str = "/usuario/ana/filmes/ja-vi/";
const HEADER: &str = "Title,Directors,Year,Rating\n";

/// Matches requests without a query string (the page-count fetch)
struct NoQuery;

impl Match for NoQuery {
    fn matches(&self, request: &Request) -> bool {
        request.url.query().is_none()
    }
}

fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            user_agent: "TestAgent/1.0".to_string(),
            timeout_secs: 5,
            ..SiteConfig::default()
        },
        export: ExportConfig {
            output_dir: output_dir.to_path_buf(),
            ..ExportConfig::default()
        },
    }
}

fn listing_html(last_page: u32, items: &[(&str, Option<&str>)]) -> String {
    let pagination = if last_page > 1 {
        let links: String = (1..=last_page)
            .map(|page| format!(r#"<a href="?pagina={page}">{page}</a>"#))
            .collect();
        format!(r#"<div class="pagination">{links}</div>"#)
    } else {
        String::new()
    };

    let entries: String = items
        .iter()
        .map(|(href, rating)| {
            let star = rating
                .map(|r| format!(r#"<span class="star-rating" title="{r}"></span>"#))
                .unwrap_or_default();
            format!(r#"<li><a class="tip-movie" href="{href}">poster</a>{star}</li>"#)
        })
        .collect();

    format!(
        r#"<html><head><title>Filmes que ana já viu</title></head><body>
        <h1>Filmes que ana já viu</h1>
        <ul id="movies-list">{entries}</ul>
        {pagination}
        </body></html>"#
    )
}

fn detail_html(title: &str, year: &str, director: &str) -> String {
    format!(
        r#"<html><head><title>{title} ({year}) - Filmow</title></head><body>
        <h1 class="movie__title">{title} <span class="movie__year">{year}</span></h1>
        <div class="movie__info-label"><h3>Dirigido por</h3><a href="/diretor/">{director}</a></div>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, mock: wiremock::MockBuilder, status: u16, body: String) {
    mock.respond_with(
        ResponseTemplate::new(status)
            .set_body_string(body)
            .insert_header("content-type", "text/html; charset=utf-8"),
    )
    .mount(server)
    .await;
}

async fn mount_listing_root(server: &MockServer, body: String) {
    mount_html(
        server,
        Mock::given(method("GET")).and(path(LISTING_PATH)).and(NoQuery),
        200,
        body,
    )
    .await;
}

async fn mount_listing_page(server: &MockServer, page: &str, status: u16, body: String) {
    mount_html(
        server,
        Mock::given(method("GET"))
            .and(path(LISTING_PATH))
            .and(query_param("pagina", page)),
        status,
        body,
    )
    .await;
}

async fn mount_detail(server: &MockServer, detail_path: &str, status: u16, body: String) {
    mount_html(
        server,
        Mock::given(method("GET")).and(path(detail_path)),
        status,
        body,
    )
    .await;
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).expect("Failed to read exported CSV")
}

#[tokio::test]
async fn test_full_export_two_pages() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let page1 = listing_html(2, &[("/arrival-t1/", Some("4,5 estrelas")), ("/roma-t2/", None)]);
    let page2 = listing_html(
        2,
        &[("/parasite-t3/", Some("5 estrelas")), ("", Some("3 estrelas"))],
    );

    mount_html(
        &mock_server,
        Mock::given(method("GET"))
            .and(path(LISTING_PATH))
            .and(NoQuery)
            .and(header("user-agent", "TestAgent/1.0")),
        200,
        page1.clone(),
    )
    .await;
    mount_listing_page(&mock_server, "1", 200, page1).await;
    mount_listing_page(&mock_server, "2", 200, page2).await;

    mount_detail(&mock_server, "/arrival-t1/", 200, detail_html("Arrival", "2016", "Denis Villeneuve")).await;
    mount_detail(&mock_server, "/roma-t2/", 200, detail_html("Roma", "2018", "Alfonso Cuarón")).await;
    mount_detail(&mock_server, "/parasite-t3/", 200, detail_html("Parasite", "2019", "Bong Joon-ho")).await;

    let config = create_test_config(&mock_server.uri(), output.path());
    let summary = run_export(&config, "  Ana ").await.expect("Export failed");

    assert_eq!(summary.user, "ana");
    assert_eq!(summary.files, vec![output.path().join("1ana.csv")]);
    assert_eq!(
        read(output.path(), "1ana.csv"),
        format!(
            "{}Arrival,Denis Villeneuve,2016,4.5\nRoma,Alfonso Cuarón,2018,\nParasite,Bong Joon-ho,2019,5\n",
            HEADER
        )
    );

    let stats = summary.statistics;
    assert_eq!(stats.last_page, 2);
    assert_eq!(stats.pages_walked, 2);
    assert_eq!(stats.items_seen, 3);
    assert_eq!(stats.records_saved, 3);
    assert_eq!(stats.items_skipped, 1);
    assert_eq!(stats.aborted_at, None);
}

#[tokio::test]
async fn test_listing_error_aborts_but_keeps_earlier_records() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let page1 = listing_html(3, &[("/arrival-t1/", Some("4 estrelas"))]);
    mount_listing_root(&mock_server, page1.clone()).await;
    mount_listing_page(&mock_server, "1", 200, page1).await;
    mount_listing_page(&mock_server, "2", 404, "<h1>Erro</h1>".to_string()).await;

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("pagina", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_detail(&mock_server, "/arrival-t1/", 200, detail_html("Arrival", "2016", "Denis Villeneuve")).await;

    let config = create_test_config(&mock_server.uri(), output.path());
    let mut observer = TracingObserver::new();
    let result = run_export_with(&config, "ana", &mut observer).await;

    assert!(matches!(
        result,
        Err(FilmowError::ListingStatus { page: 2, status: 404 })
    ));
    assert_eq!(
        read(output.path(), "1ana.csv"),
        format!("{}Arrival,Denis Villeneuve,2016,4\n", HEADER)
    );
    assert!(!output.path().join("2ana.csv").exists());
}

#[tokio::test]
async fn test_unknown_user_writes_nothing() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let not_found = "<html><body><h1>Página não encontrada</h1></body></html>".to_string();
    mount_html(
        &mock_server,
        Mock::given(method("GET")).and(path(LISTING_PATH)),
        200,
        not_found,
    )
    .await;

    let config = create_test_config(&mock_server.uri(), output.path());
    let result = run_export(&config, "ana").await;

    match result {
        Err(e) => {
            assert!(matches!(e, FilmowError::UserNotFound { page: 1 }));
            assert!(e.is_fatal_crawl());
        }
        Ok(_) => panic!("Expected the crawl to abort"),
    }
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_empty_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let page1 = listing_html(3, &[("/arrival-t1/", None)]);
    let page2 = r#"<html><body><h1>Filmes que ana já viu</h1><p>Nada aqui</p></body></html>"#;
    let page3 = listing_html(3, &[("/roma-t2/", Some("2,5 estrelas"))]);

    mount_listing_root(&mock_server, page1.clone()).await;
    mount_listing_page(&mock_server, "1", 200, page1).await;
    mount_listing_page(&mock_server, "2", 200, page2.to_string()).await;
    mount_listing_page(&mock_server, "3", 200, page3).await;
    mount_detail(&mock_server, "/arrival-t1/", 200, detail_html("Arrival", "2016", "Denis Villeneuve")).await;
    mount_detail(&mock_server, "/roma-t2/", 200, detail_html("Roma", "2018", "Alfonso Cuarón")).await;

    let config = create_test_config(&mock_server.uri(), output.path());
    let summary = run_export(&config, "ana").await.expect("Export failed");

    assert_eq!(summary.statistics.pages_walked, 3);
    assert_eq!(summary.statistics.pages_empty, 1);
    assert_eq!(
        read(output.path(), "1ana.csv"),
        format!(
            "{}Arrival,Denis Villeneuve,2016,\nRoma,Alfonso Cuarón,2018,2.5\n",
            HEADER
        )
    );
}

#[tokio::test]
async fn test_failed_details_are_skipped() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let page1 = listing_html(
        1,
        &[
            ("/broken-t1/", Some("1 estrela")),
            ("/untitled-t2/", None),
            ("/roma-t3/", Some("3,5 estrelas")),
        ],
    );
    mount_listing_root(&mock_server, page1.clone()).await;
    mount_listing_page(&mock_server, "1", 200, page1).await;

    mount_detail(&mock_server, "/broken-t1/", 500, "oops".to_string()).await;
    mount_detail(
        &mock_server,
        "/untitled-t2/",
        200,
        "<html><head><title>Filmow</title></head><body></body></html>".to_string(),
    )
    .await;
    mount_detail(&mock_server, "/roma-t3/", 200, detail_html("Roma", "2018", "Alfonso Cuarón")).await;

    let config = create_test_config(&mock_server.uri(), output.path());
    let summary = run_export(&config, "ana").await.expect("Export failed");

    assert_eq!(summary.statistics.items_seen, 3);
    assert_eq!(summary.statistics.records_saved, 1);
    assert_eq!(summary.statistics.details_failed, 2);
    assert_eq!(
        read(output.path(), "1ana.csv"),
        format!("{}Roma,Alfonso Cuarón,2018,3.5\n", HEADER)
    );
}

#[tokio::test]
async fn test_no_movies_writes_header_only_file() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let page1 = listing_html(1, &[]);
    mount_listing_root(&mock_server, page1.clone()).await;
    mount_listing_page(&mock_server, "1", 200, page1).await;

    let config = create_test_config(&mock_server.uri(), output.path());
    let summary = run_export(&config, "ana").await.expect("Export failed");

    assert_eq!(summary.files.len(), 1);
    assert_eq!(read(output.path(), "1ana.csv"), HEADER);
}

#[tokio::test]
async fn test_row_policy_splits_files() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let page1 = listing_html(
        1,
        &[("/a-t1/", None), ("/b-t2/", None), ("/c-t3/", None)],
    );
    mount_listing_root(&mock_server, page1.clone()).await;
    mount_listing_page(&mock_server, "1", 200, page1).await;
    mount_detail(&mock_server, "/a-t1/", 200, detail_html("A", "2001", "X")).await;
    mount_detail(&mock_server, "/b-t2/", 200, detail_html("B", "2002", "Y")).await;
    mount_detail(&mock_server, "/c-t3/", 200, detail_html("C", "2003", "Z")).await;

    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.export.policy = PolicyKind::Rows;
    config.export.max_rows = 2;

    let mut observer = TracingObserver::new();
    let summary = run_export_with(&config, "ana", &mut observer)
        .await
        .expect("Export failed");

    assert_eq!(summary.files.len(), 2);
    assert_eq!(
        read(output.path(), "1ana.csv"),
        format!("{}A,X,2001,\nB,Y,2002,\n", HEADER)
    );
    assert_eq!(read(output.path(), "2ana.csv"), format!("{}C,Z,2003,\n", HEADER));

    // the observer was flushed into the summary
    assert_eq!(observer.finish().records_saved, 0);
}

#[tokio::test]
async fn test_detail_timeout_skips_only_that_movie() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let page1 = listing_html(1, &[("/slow-t1/", Some("2 estrelas")), ("/roma-t2/", None)]);
    mount_listing_root(&mock_server, page1.clone()).await;
    mount_listing_page(&mock_server, "1", 200, page1).await;

    Mock::given(method("GET"))
        .and(path("/slow-t1/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail_html("Slow", "1999", "Nobody"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "/roma-t2/", 200, detail_html("Roma", "2018", "Alfonso Cuarón")).await;

    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.site.timeout_secs = 1;
    let summary = run_export(&config, "ana").await.expect("Export failed");

    assert_eq!(summary.statistics.details_failed, 1);
    assert_eq!(summary.statistics.records_saved, 1);
    assert_eq!(
        read(output.path(), "1ana.csv"),
        format!("{}Roma,Alfonso Cuarón,2018,\n", HEADER)
    );
}

#[tokio::test]
async fn test_listing_timeout_aborts_but_keeps_earlier_records() {
    let mock_server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    let page1 = listing_html(2, &[("/arrival-t1/", Some("4,5 estrelas"))]);
    mount_listing_root(&mock_server, page1.clone()).await;
    mount_listing_page(&mock_server, "1", 200, page1).await;

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("pagina", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(2, &[]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;
    mount_detail(&mock_server, "/arrival-t1/", 200, detail_html("Arrival", "2016", "Denis Villeneuve")).await;

    let mut config = create_test_config(&mock_server.uri(), output.path());
    config.site.timeout_secs = 1;
    let result = run_export(&config, "ana").await;

    match result {
        Err(e) => {
            assert!(matches!(e, FilmowError::Timeout { .. }), "unexpected {:?}", e);
            assert!(e.is_fatal_crawl());
        }
        Ok(_) => panic!("Expected the crawl to abort"),
    }
    assert_eq!(
        read(output.path(), "1ana.csv"),
        format!("{}Arrival,Denis Villeneuve,2016,4.5\n", HEADER)
    );
}
