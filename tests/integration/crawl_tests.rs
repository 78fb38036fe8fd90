//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! both crawl strategies end-to-end, including persistence.

use calamine::{open_workbook, Reader, Xlsx};
use quote_ripple::config::{Config, CrawlStrategy, SelectorConfig};
use quote_ripple::crawler::{Fetcher, PageParser, ParallelCrawler, Pipeline, SequentialCrawler};
use quote_ripple::output::PersistStatus;
use quote_ripple::state::{CrawlState, Record};
use quote_ripple::FetchError;
use std::time::{Duration, Instant};
use tracing::Span;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a listing page with the given quotes and optional next reference
fn listing(quotes: &[(&str, &str, &[&str])], next: Option<&str>) -> String {
    let mut body = String::new();
    for (text, author, tags) in quotes {
        let tags: String = tags
            .iter()
            .map(|t| format!(r#"<a class="tag" href="/tag/{0}/page/1/">{0}</a>"#, t))
            .collect();
        body.push_str(&format!(
            r#"<div class="quote" itemscope>
                <span class="text" itemprop="text">{}</span>
                <span>by <small class="author" itemprop="author">{}</small></span>
                <div class="tags">Tags: {}</div>
            </div>"#,
            text, author, tags
        ));
    }

    let pager = match next {
        Some(href) => format!(
            r#"<nav><ul class="pager"><li class="next"><a href="{}">Next <span aria-hidden="true">→</span></a></li></ul></nav>"#,
            href
        ),
        None => String::new(),
    };

    format!(
        "<html><head><title>Quotes to Scrape</title></head><body><div class=\"container\">{}{}</div></body></html>",
        body, pager
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, page_path: &str, response: ResponseTemplate, hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(response)
        .expect(hits)
        .mount(server)
        .await;
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, strategy: CrawlStrategy, output_path: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.crawler.strategy = strategy;
    config.crawler.delay_ms = 10;
    config.crawler.timeout_secs = 5;
    config.crawler.user_agent = "TestBot/1.0".to_string();
    config.output.path = output_path.to_string();
    config
}

fn fetcher() -> Fetcher {
    Fetcher::new("TestBot/1.0", Duration::from_secs(5)).expect("Failed to build fetcher")
}

fn parser() -> PageParser {
    PageParser::new(&SelectorConfig::default()).expect("Failed to compile selectors")
}

fn texts(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.text.as_str()).collect()
}

fn read_xlsx(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("Failed to open workbook");
    let range = workbook
        .worksheet_range("Sheet1")
        .expect("Failed to read sheet");
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[tokio::test]
async fn test_sequential_follows_three_page_chain() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(listing(
            &[("p1-a", "Alice", &["x"]), ("p1-b", "Bob", &[])],
            Some("/page/2/"),
        )),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        html(listing(&[("p2-a", "Carol", &["y", "z"])], Some("/page/3/"))),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/3/",
        html(listing(&[("p3-a", "Dave", &[])], None)),
        1,
    )
    .await;

    let config = create_test_config(&server.uri(), CrawlStrategy::Sequential, "unused.xlsx");
    let pipeline = Pipeline::new(config, Span::none()).expect("Failed to create pipeline");
    let outcome = pipeline.crawl().await.expect("Crawl failed");

    assert_eq!(outcome.final_state, CrawlState::Done);
    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(outcome.pages_failed, 0);
    assert_eq!(texts(&outcome.records), vec!["p1-a", "p1-b", "p2-a", "p3-a"]);
    assert_eq!(
        outcome.records[2].tags,
        vec!["y".to_string(), "z".to_string()]
    );
}

#[tokio::test]
async fn test_sequential_abort_persists_partial_results() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(listing(
            &[("first", "Alice", &["a", "b"]), ("second", "Bob", &[])],
            Some("/page/2/"),
        )),
        1,
    )
    .await;
    mount_page(&server, "/page/2/", ResponseTemplate::new(500), 1).await;
    mount_page(
        &server,
        "/page/3/",
        html(listing(&[("never", "Nobody", &[])], None)),
        0,
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("citas.xlsx");
    let config = create_test_config(
        &server.uri(),
        CrawlStrategy::Sequential,
        output.to_str().expect("Non UTF-8 temp path"),
    );

    let pipeline = Pipeline::new(config, Span::none()).expect("Failed to create pipeline");
    let report = pipeline.run().await.expect("Run failed");

    assert_eq!(report.outcome.final_state, CrawlState::Aborted);
    assert_eq!(report.outcome.pages_visited, 1);
    assert_eq!(report.outcome.pages_failed, 1);
    assert_eq!(texts(&report.outcome.records), vec!["first", "second"]);
    assert!(matches!(
        report.persisted,
        Ok(PersistStatus::Written { rows: 2, .. })
    ));
    assert_eq!(report.exit_code(), 0);

    let rows = read_xlsx(&output);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["Cita", "Autor", "Etiquetas"]);
    assert_eq!(rows[1], vec!["first", "Alice", "a, b"]);
    assert_eq!(rows[2], vec!["second", "Bob", ""]);
}

#[tokio::test]
async fn test_sequential_stops_on_pagination_cycle() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(listing(&[("loop", "Alice", &[])], Some("/page/2/"))),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        html(listing(&[("back", "Bob", &[])], Some("/"))),
        1,
    )
    .await;

    let base = Url::parse(&server.uri()).expect("Failed to parse base URL");
    let start = base.join("/").expect("Failed to build start URL");
    let crawler = SequentialCrawler::new(fetcher(), parser(), base, start)
        .with_delay(Duration::ZERO);

    let outcome = crawler.run().await;

    assert_eq!(outcome.final_state, CrawlState::Done);
    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(texts(&outcome.records), vec!["loop", "back"]);
}

#[tokio::test]
async fn test_sequential_respects_max_pages() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(listing(&[("one", "Alice", &[])], Some("/page/2/"))),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        html(listing(&[("two", "Bob", &[])], Some("/page/3/"))),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/3/",
        html(listing(&[("three", "Carol", &[])], None)),
        0,
    )
    .await;

    let base = Url::parse(&server.uri()).expect("Failed to parse base URL");
    let start = base.join("/").expect("Failed to build start URL");
    let crawler = SequentialCrawler::new(fetcher(), parser(), base, start)
        .with_delay(Duration::ZERO)
        .with_max_pages(2);

    let outcome = crawler.run().await;

    assert_eq!(outcome.final_state, CrawlState::Done);
    assert_eq!(texts(&outcome.records), vec!["one", "two"]);
}

#[tokio::test]
async fn test_parallel_preserves_input_order() {
    let server = MockServer::start().await;

    // u1 slowest, u2 fastest
    mount_page(
        &server,
        "/page/1/",
        html(listing(&[("u1-a", "A", &[]), ("u1-b", "A", &[])], Some("/page/2/")))
            .set_delay(Duration::from_millis(600)),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        html(listing(&[("u2-a", "B", &[])], Some("/page/3/"))),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/3/",
        html(listing(&[("u3-a", "C", &[])], None)).set_delay(Duration::from_millis(300)),
        1,
    )
    .await;

    let base = Url::parse(&server.uri()).expect("Failed to parse base URL");
    let urls: Vec<Url> = ["/page/1/", "/page/2/", "/page/3/"]
        .iter()
        .map(|p| base.join(p).expect("Failed to build URL"))
        .collect();

    let crawler = ParallelCrawler::new(fetcher(), parser(), 3);
    let outcome = crawler.crawl(urls).await;

    assert_eq!(outcome.final_state, CrawlState::Done);
    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(texts(&outcome.records), vec!["u1-a", "u1-b", "u2-a", "u3-a"]);
}

#[tokio::test]
async fn test_parallel_isolates_failed_pages() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/page/1/",
        html(listing(&[("one", "A", &[])], Some("/page/2/"))),
        1,
    )
    .await;
    mount_page(&server, "/page/2/", ResponseTemplate::new(404), 1).await;
    mount_page(
        &server,
        "/page/3/",
        html(listing(&[("three", "C", &[])], None)),
        1,
    )
    .await;
    // Pages past the real end exist but carry no quotes
    mount_page(
        &server,
        "/page/4/",
        html(listing(&[], None)),
        1,
    )
    .await;

    let base = Url::parse(&server.uri()).expect("Failed to parse base URL");
    let urls: Vec<Url> = (1..=4)
        .map(|i| base.join(&format!("/page/{}/", i)).expect("Failed to build URL"))
        .collect();

    // Width 1 forces one page in flight at a time
    let outcome = ParallelCrawler::new(fetcher(), parser(), 1).crawl(urls).await;

    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(outcome.pages_failed, 1);
    assert_eq!(texts(&outcome.records), vec!["one", "three"]);
}

#[tokio::test]
async fn test_parallel_caps_pages_in_flight() {
    let server = MockServer::start().await;

    let page_delay = Duration::from_millis(300);
    for i in 1..=4 {
        mount_page(
            &server,
            &format!("/page/{}/", i),
            html(listing(&[(&format!("q{}", i), "A", &[])], None)).set_delay(page_delay),
            1,
        )
        .await;
    }

    let base = Url::parse(&server.uri()).expect("Failed to parse base URL");
    let urls: Vec<Url> = (1..=4)
        .map(|i| base.join(&format!("/page/{}/", i)).expect("Failed to build URL"))
        .collect();

    let started = Instant::now();
    let outcome = ParallelCrawler::new(fetcher(), parser(), 2).crawl(urls).await;
    let elapsed = started.elapsed();

    assert_eq!(texts(&outcome.records), vec!["q1", "q2", "q3", "q4"]);
    // Two waves of two pages: never all four at once, never one by one
    assert!(elapsed >= page_delay * 2, "finished in {:?}", elapsed);
    assert!(elapsed < page_delay * 4, "finished in {:?}", elapsed);
}

#[tokio::test]
async fn test_sequential_waits_between_pages() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(listing(&[("one", "A", &[])], Some("/page/2/"))),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        html(listing(&[("two", "B", &[])], Some("/page/3/"))),
        1,
    )
    .await;
    mount_page(
        &server,
        "/page/3/",
        html(listing(&[("three", "C", &[])], None)),
        1,
    )
    .await;

    let base = Url::parse(&server.uri()).expect("Failed to parse base URL");
    let start = base.join("/").expect("Failed to build URL");
    let delay = Duration::from_millis(250);

    let started = Instant::now();
    let outcome = SequentialCrawler::new(fetcher(), parser(), base, start)
        .with_delay(delay)
        .run()
        .await;
    let elapsed = started.elapsed();

    assert_eq!(outcome.final_state, CrawlState::Done);
    assert_eq!(outcome.pages_visited, 3);
    // Two gaps between three pages, none after the last one
    assert!(elapsed >= delay * 2, "finished in {:?}", elapsed);
}

#[tokio::test]
async fn test_parallel_pipeline_ignores_polite_delay() {
    let server = MockServer::start().await;

    for i in 1..=3 {
        mount_page(
            &server,
            &format!("/page/{}/", i),
            html(listing(&[(&format!("q{}", i), "A", &[])], None)),
            1,
        )
        .await;
    }

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("citas.xlsx");
    let mut config = create_test_config(
        &server.uri(),
        CrawlStrategy::ParallelFixedRange,
        output.to_str().expect("Non UTF-8 temp path"),
    );
    config.site.page_count = 3;
    config.crawler.max_concurrency = 1;
    config.crawler.delay_ms = 2000;

    let pipeline = Pipeline::new(config, Span::none()).expect("Failed to create pipeline");

    let started = Instant::now();
    let outcome = pipeline.crawl().await.expect("Crawl failed");
    let elapsed = started.elapsed();

    assert_eq!(texts(&outcome.records), vec!["q1", "q2", "q3"]);
    assert!(elapsed < Duration::from_millis(2000), "finished in {:?}", elapsed);
}

#[tokio::test]
async fn test_parallel_pipeline_writes_csv() {
    let server = MockServer::start().await;

    for i in 1..=3 {
        mount_page(
            &server,
            &format!("/page/{}/", i),
            html(listing(
                &[(&format!("quote {}", i), "Author", &["x", "y"])],
                None,
            )),
            1,
        )
        .await;
    }

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("citas.csv");
    let mut config = create_test_config(
        &server.uri(),
        CrawlStrategy::ParallelFixedRange,
        output.to_str().expect("Non UTF-8 temp path"),
    );
    config.site.page_count = 3;

    let pipeline = Pipeline::new(config, Span::none()).expect("Failed to create pipeline");
    let report = pipeline.run().await.expect("Run failed");

    assert_eq!(report.exit_code(), 0);

    let mut reader = csv::Reader::from_path(&output).expect("Failed to open CSV");
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .map(|r| r.expect("Bad CSV row"))
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "quote 1");
    assert_eq!(&rows[2][0], "quote 3");
    assert_eq!(&rows[1][2], "x, y");
}

#[tokio::test]
async fn test_empty_crawl_writes_no_file() {
    let server = MockServer::start().await;

    mount_page(&server, "/", html(listing(&[], None)), 1).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("citas.xlsx");
    let config = create_test_config(
        &server.uri(),
        CrawlStrategy::Sequential,
        output.to_str().expect("Non UTF-8 temp path"),
    );

    let pipeline = Pipeline::new(config, Span::none()).expect("Failed to create pipeline");
    let report = pipeline.run().await.expect("Run failed");

    assert_eq!(report.outcome.final_state, CrawlState::Done);
    assert_eq!(report.outcome.pages_visited, 1);
    assert!(matches!(report.persisted, Ok(PersistStatus::Skipped)));
    assert_eq!(report.exit_code(), 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unreachable_start_page_aborts_without_output() {
    let server = MockServer::start().await;
    mount_page(&server, "/", ResponseTemplate::new(503), 1).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("citas.xlsx");
    let config = create_test_config(
        &server.uri(),
        CrawlStrategy::Sequential,
        output.to_str().expect("Non UTF-8 temp path"),
    );

    let report = Pipeline::new(config, Span::none())
        .expect("Failed to create pipeline")
        .run()
        .await
        .expect("Run failed");

    assert_eq!(report.outcome.final_state, CrawlState::Aborted);
    assert_eq!(report.outcome.pages_visited, 0);
    assert_eq!(report.outcome.pages_failed, 1);
    assert!(matches!(report.persisted, Ok(PersistStatus::Skipped)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_fetch_classifies_http_status() {
    let server = MockServer::start().await;
    mount_page(&server, "/missing/", ResponseTemplate::new(404), 1).await;

    let url = Url::parse(&format!("{}/missing/", server.uri())).expect("Failed to parse URL");
    let result = fetcher().fetch(&url).await;

    match result {
        Err(FetchError::HttpStatus { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/missing/"));
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_classifies_timeout() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/slow/",
        html(listing(&[], None)).set_delay(Duration::from_secs(2)),
        1,
    )
    .await;

    let fetcher = Fetcher::new("TestBot/1.0", Duration::from_millis(200))
        .expect("Failed to build fetcher");
    let url = Url::parse(&format!("{}/slow/", server.uri())).expect("Failed to parse URL");

    assert!(matches!(
        fetcher.fetch(&url).await,
        Err(FetchError::Timeout { .. })
    ));
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html(listing(&[("hello", "World", &[])], None)),
        1,
    )
    .await;

    let url = Url::parse(&format!("{}/", server.uri())).expect("Failed to parse URL");
    let page = fetcher().fetch(&url).await.expect("Fetch failed");

    assert_eq!(page.status_code, 200);
    assert!(page.body.contains("hello"));
}
