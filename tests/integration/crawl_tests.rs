//! Integration tests for the crawler
//!
//! These tests use wiremock to serve fake storefront catalogs and test
//! the full crawl cycle end-to-end, down to the CSV files on disk.

use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use vitrine::config::{Config, CrawlerConfig, HeaderConfig, OutputConfig, StoreConfig};
use vitrine::crawler::run_crawl;
use vitrine::output::OutputError;
use vitrine::VitrineError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a store whose catalog lives under `/<identifier>/catalog?pg=`
fn create_test_store(base_url: &str, identifier: &str) -> StoreConfig {
    StoreConfig {
        identifier: identifier.to_string(),
        base_url: format!("{}/{}/catalog?pg=", base_url, identifier),
        products_selector: ".item.flex".to_string(),
        title_selector: "h1".to_string(),
        price_selector: ".preco-avista.precoAvista".to_string(),
        image_selector: ".zoom img".to_string(),
    }
}

/// Creates a test configuration writing into `output_dir`
fn create_test_config(stores: Vec<StoreConfig>, output_dir: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            timeout_secs: 5,
            ..CrawlerConfig::default()
        },
        headers: HeaderConfig::default(),
        output: OutputConfig {
            directory: output_dir.display().to_string(),
        },
        stores,
    }
}

fn catalog_page(links: &[&str]) -> String {
    let items: String = links
        .iter()
        .map(|link| {
            format!(
                r#"<div class="item flex"><div class="foto"><a href="{}"><img src="/thumb.jpg"></a></div></div>"#,
                link
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="vitrine">{}</div></body></html>"#,
        items
    )
}

fn product_page(title: &str, price: Option<&str>, image: &str) -> String {
    let price = price
        .map(|p| format!(r#"<span class="preco-avista precoAvista">{}</span>"#, p))
        .unwrap_or_default();
    format!(
        r#"<html><body><h1>{}</h1>{}<div class="zoom">{}</div></body></html>"#,
        title, price, image
    )
}

async fn mount_catalog(server: &MockServer, identifier: &str, page: &str, links: &[&str], hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/catalog", identifier)))
        .and(query_param("pg", page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(catalog_page(links))
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .mount(server)
        .await;
}

async fn mount_product(server: &MockServer, product_path: &str, body: String, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(product_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html")
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read CSV")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_two_page_catalog_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_catalog(&mock_server, "megasom", "1", &["/produto/1", "/produto/2"], 1).await;
    mount_catalog(&mock_server, "megasom", "2", &[], 1).await;
    // The crawl must stop at the first empty page
    mount_catalog(&mock_server, "megasom", "3", &["/produto/3"], 0).await;

    // The first product answers last; rows must still follow link order
    mount_product(
        &mock_server,
        "/produto/1",
        product_page(
            "Guitarra Gibson Les Paul",
            Some("R$ 12.999,00"),
            r#"<img src="https://cdn.example.com/lespaul.jpg">"#,
        ),
        300,
    )
    .await;
    mount_product(
        &mock_server,
        "/produto/2",
        product_page(
            "Guitarra Squier",
            None,
            r#"<img data-src="https://cdn.example.com/squier.jpg">"#,
        ),
        0,
    )
    .await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        vec![create_test_store(&base_url, "megasom")],
        output_dir.path(),
    );

    let summary = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(summary.stores.len(), 1);
    assert_eq!(summary.stores[0].pages, 1);
    assert_eq!(summary.total_products(), 2);

    let csv_path = output_dir.path().join("megasom_products.csv");
    assert_eq!(summary.stores[0].output_path, csv_path);

    let lines = read_lines(&csv_path);
    assert_eq!(lines.len(), 3, "Expected header plus 2 rows, got {:?}", lines);
    assert_eq!(lines[0], "product_link,product_title,product_price,product_img");
    assert_eq!(
        lines[1],
        format!(
            "{}/produto/1,Guitarra Gibson Les Paul,12999.00,https://cdn.example.com/lespaul.jpg",
            base_url
        )
    );
    assert_eq!(
        lines[2],
        format!(
            "{}/produto/2,Guitarra Squier,,https://cdn.example.com/squier.jpg",
            base_url
        )
    );
}

#[tokio::test]
async fn test_multi_page_catalog_accumulates_in_page_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_catalog(&mock_server, "musicale", "1", &["/p/a", "/p/b"], 1).await;
    mount_catalog(&mock_server, "musicale", "2", &["/p/c"], 1).await;
    mount_catalog(&mock_server, "musicale", "3", &[], 1).await;

    for (product_path, title) in [("/p/a", "A"), ("/p/b", "B"), ("/p/c", "C")] {
        mount_product(
            &mock_server,
            product_path,
            product_page(title, Some("R$ 1.000,00"), r#"<img src="/img.jpg">"#),
            0,
        )
        .await;
    }

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        vec![create_test_store(&base_url, "musicale")],
        output_dir.path(),
    );

    let summary = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(summary.stores[0].pages, 2);

    let lines = read_lines(&output_dir.path().join("musicale_products.csv"));
    let titles: Vec<_> = lines[1..]
        .iter()
        .map(|line| line.split(',').nth(1).unwrap_or_default().to_string())
        .collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
    assert!(lines[1].contains(",1000.00,/img.jpg"));
}

#[tokio::test]
async fn test_two_stores_written_separately_and_summed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_catalog(&mock_server, "musicale", "1", &["/m/1"], 1).await;
    mount_catalog(&mock_server, "musicale", "2", &[], 1).await;
    mount_catalog(&mock_server, "megasom", "1", &["/g/1", "/g/2"], 1).await;
    mount_catalog(&mock_server, "megasom", "2", &[], 1).await;

    for product_path in ["/m/1", "/g/1", "/g/2"] {
        mount_product(
            &mock_server,
            product_path,
            product_page("Guitarra", Some("R$ 500,00"), r#"<img src="/i.jpg">"#),
            0,
        )
        .await;
    }

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        vec![
            create_test_store(&base_url, "musicale"),
            create_test_store(&base_url, "megasom"),
        ],
        output_dir.path(),
    );

    let summary = run_crawl(&config).await.expect("Crawl failed");

    let ids: Vec<_> = summary.stores.iter().map(|s| s.identifier.as_str()).collect();
    assert_eq!(ids, vec!["musicale", "megasom"]);
    assert_eq!(summary.stores[0].products, 1);
    assert_eq!(summary.stores[1].products, 2);
    assert_eq!(summary.total_products(), 3);

    assert_eq!(read_lines(&output_dir.path().join("musicale_products.csv")).len(), 2);
    assert_eq!(read_lines(&output_dir.path().join("megasom_products.csv")).len(), 3);
}

#[tokio::test]
async fn test_container_without_anchor_aborts_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/megasom/catalog"))
        .and(query_param("pg", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><div class="item flex"><span>Esgotado</span></div></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        vec![create_test_store(&base_url, "megasom")],
        output_dir.path(),
    );

    let result = run_crawl(&config).await;
    assert!(matches!(result, Err(VitrineError::MissingAnchor { index: 0, .. })));
    assert!(!output_dir.path().join("megasom_products.csv").exists());
}

#[tokio::test]
async fn test_empty_catalog_fails_on_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_catalog(&mock_server, "megasom", "1", &[], 1).await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        vec![create_test_store(&base_url, "megasom")],
        output_dir.path(),
    );

    let result = run_crawl(&config).await;
    assert!(matches!(
        result,
        Err(VitrineError::Output(OutputError::Empty))
    ));
}

#[tokio::test]
async fn test_product_timeout_aborts_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_catalog(&mock_server, "megasom", "1", &["/slow"], 1).await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(
        vec![create_test_store(&base_url, "megasom")],
        output_dir.path(),
    );
    config.crawler.timeout_secs = 1;

    let result = run_crawl(&config).await;
    assert!(matches!(result, Err(VitrineError::Timeout { .. })));
}
