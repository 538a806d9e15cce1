//! Integration tests for the crawler
//!
//! These tests run full crawls against wiremock servers, with SQLite stores
//! in temporary directories, and check the resumable-merge behavior
//! end-to-end: what gets fetched, what gets persisted, and what a re-run
//! does (and does not) download again.

use radiodex::config::CrawlerConfig;
use radiodex::crawl::{CategoryCrawler, MenuCrawler};
use radiodex::fetch::HttpPageSource;
use radiodex::model::Category;
use radiodex::storage::{CategoryStore, SqliteStore};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_crawler_config() -> CrawlerConfig {
    CrawlerConfig {
        delay_between_downloads_ms: 0,
        request_timeout_secs: 5,
        user_agent: "radiodex-test/0.0".to_string(),
    }
}

fn page_source() -> HttpPageSource {
    HttpPageSource::new(&test_crawler_config()).expect("Failed to build HTTP client")
}

async fn mount_page(server: &MockServer, url_path: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

const STATIONS_INDEX: &str = r#"<html><body><dl>
    <dt class="text-capitalize"><a href="/stations/jazz">Jazz</a></dt>
    <dd>12 stations</dd>
    <dt class="text-capitalize"><a href="/stations/pop">Pop</a></dt>
    <dd>9 stations</dd>
</dl></body></html>"#;

const JAZZ_PAGE: &str = r#"<html><body><ul class="stations">
    <li><a href="/radio/smooth-cafe">Smooth Cafe</a>
        <a class="playlist" href="/playlists/smooth-cafe.pls">pls</a>
        <span class="genres">Jazz</span></li>
</ul></body></html>"#;

const POP_PAGE: &str = r#"<html><body><ul class="stations">
    <li><a href="/radio/hit-one">Hit One</a><span class="genres">Pop</span></li>
    <li><a href="/radio/hit-two">Hit Two</a><span class="genres">Pop</span></li>
</ul></body></html>"#;

#[tokio::test]
async fn test_stations_crawl_persists_and_resumes() {
    let server = MockServer::start().await;
    // Index is fetched once per run; category pages only on the first run
    mount_page(&server, "/stations/", STATIONS_INDEX, 2).await;
    mount_page(&server, "/stations/jazz", JAZZ_PAGE, 1).await;
    mount_page(&server, "/stations/pop", POP_PAGE, 1).await;

    let base_url = Url::parse(&server.uri()).unwrap();
    let dir = TempDir::new().unwrap();

    // First run fetches both categories
    let store = SqliteStore::open(dir.path()).unwrap();
    let mut crawler = CategoryCrawler::new(
        page_source(),
        Some(store),
        base_url.clone(),
        "/stations/".to_string(),
        Duration::ZERO,
    );
    let categories = crawler.all_categories().await.expect("Crawl failed");

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Jazz");
    assert_eq!(categories[0].stations.len(), 1);
    assert_eq!(categories[1].name, "Pop");
    assert_eq!(categories[1].stations.len(), 2);

    // State is durable: a fresh store handle sees both categories
    let reloaded = SqliteStore::open(dir.path()).unwrap().load().unwrap();
    assert_eq!(reloaded.len(), 2);

    // Second run, fresh crawler: nothing to fetch, mock expectations verify
    // the category pages were not hit again
    let store = SqliteStore::open(dir.path()).unwrap();
    let mut crawler = CategoryCrawler::new(
        page_source(),
        Some(store),
        base_url,
        "/stations/".to_string(),
        Duration::ZERO,
    );
    let categories = crawler.all_categories().await.expect("Re-crawl failed");
    assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn test_partially_persisted_run_fetches_only_missing() {
    let server = MockServer::start().await;
    mount_page(&server, "/stations/", STATIONS_INDEX, 1).await;
    // "jazz" (lowercase) is already persisted; the Jazz page must not be hit
    mount_page(&server, "/stations/jazz", JAZZ_PAGE, 0).await;
    mount_page(&server, "/stations/pop", POP_PAGE, 1).await;

    let dir = TempDir::new().unwrap();
    {
        let mut store = SqliteStore::open(dir.path()).unwrap();
        store.save(&[Category::new("jazz")]).unwrap();
    }

    let store = SqliteStore::open(dir.path()).unwrap();
    let mut crawler = CategoryCrawler::new(
        page_source(),
        Some(store),
        Url::parse(&server.uri()).unwrap(),
        "/stations/".to_string(),
        Duration::ZERO,
    );
    let categories = crawler.all_categories().await.expect("Crawl failed");

    // Existing entry kept as-is, only Pop fetched and appended
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "jazz");
    assert_eq!(categories[1].name, "Pop");
}

#[tokio::test]
async fn test_crawl_without_store_refetches_every_run() {
    let server = MockServer::start().await;
    mount_page(&server, "/stations/", STATIONS_INDEX, 2).await;
    mount_page(&server, "/stations/jazz", JAZZ_PAGE, 2).await;
    mount_page(&server, "/stations/pop", POP_PAGE, 2).await;

    let base_url = Url::parse(&server.uri()).unwrap();

    for _ in 0..2 {
        let mut crawler = CategoryCrawler::<_, SqliteStore>::new(
            page_source(),
            None,
            base_url.clone(),
            "/stations/".to_string(),
            Duration::ZERO,
        );
        let categories = crawler.all_categories().await.expect("Crawl failed");
        assert_eq!(categories.len(), 2);
    }
}

const MENU_PAGE: &str = r##"<html><body><ul class="nav navbar-nav">
    <li><a href="/">Home</a></li>
    <li><a href="#">Listen</a>
        <ul>
            <li><a href="/stations/jazz">Jazz</a></li>
            <li><a href="/stations/pop">Pop</a></li>
            <li><a href="/stations/">More Genres...</a></li>
        </ul>
    </li>
</ul></body></html>"##;

#[tokio::test]
async fn test_menu_crawl_resolves_listen_branch() {
    let server = MockServer::start().await;
    mount_page(&server, "/", MENU_PAGE, 1).await;
    mount_page(&server, "/stations/jazz", JAZZ_PAGE, 1).await;
    mount_page(&server, "/stations/pop", POP_PAGE, 1).await;

    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open(dir.path()).unwrap();
    let mut crawler = MenuCrawler::new(
        page_source(),
        Some(store),
        Url::parse(&server.uri()).unwrap(),
        Duration::ZERO,
    );

    let groups = crawler.all_categories().await.expect("Menu crawl failed");

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "Home");
    assert_eq!(groups[1].name, "Listen");
    // "More Genres..." is a navigation aid, not a category
    let names: Vec<&str> = groups[1].categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Jazz", "Pop"]);

    // The Listen result is persisted
    let reloaded = SqliteStore::open(dir.path()).unwrap().load().unwrap();
    assert_eq!(reloaded.len(), 2);
}

#[tokio::test]
async fn test_listen_branch_reappends_already_stored_category() {
    let server = MockServer::start().await;
    mount_page(&server, "/", MENU_PAGE, 1).await;
    // "jazz" is already stored, so only Pop is downloaded
    mount_page(&server, "/stations/jazz", JAZZ_PAGE, 0).await;
    mount_page(&server, "/stations/pop", POP_PAGE, 1).await;

    let dir = TempDir::new().unwrap();
    {
        let mut store = SqliteStore::open(dir.path()).unwrap();
        store.save(&[Category::new("jazz")]).unwrap();
    }

    let store = SqliteStore::open(dir.path()).unwrap();
    let mut crawler = MenuCrawler::new(
        page_source(),
        Some(store),
        Url::parse(&server.uri()).unwrap(),
        Duration::ZERO,
    );

    let group = crawler.listen_group().await.expect("Listen crawl failed");

    // The stored "jazz" entry is reused for the discovered "Jazz" link but
    // appended to the list a second time before saving
    let names: Vec<&str> = group.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["jazz", "jazz", "Pop"]);

    let reloaded = SqliteStore::open(dir.path()).unwrap().load().unwrap();
    let stored_names: Vec<String> = reloaded.into_iter().map(|c| c.name).collect();
    assert_eq!(stored_names, vec!["jazz", "jazz", "Pop"]);
}

#[tokio::test]
async fn test_playlist_enrichment_attaches_downloaded_file() {
    let server = MockServer::start().await;
    mount_page(&server, "/stations/", STATIONS_INDEX, 1).await;
    mount_page(&server, "/stations/jazz", JAZZ_PAGE, 1).await;
    mount_page(&server, "/stations/pop", POP_PAGE, 1).await;

    let dir = TempDir::new().unwrap();
    let playlists = dir.path().join("playlists");
    std::fs::create_dir_all(&playlists).unwrap();
    std::fs::write(playlists.join("smooth-cafe.pls"), "[playlist]").unwrap();

    let store = SqliteStore::open(dir.path()).unwrap();
    let mut crawler = CategoryCrawler::new(
        page_source(),
        Some(store),
        Url::parse(&server.uri()).unwrap(),
        "/stations/".to_string(),
        Duration::ZERO,
    );
    let categories = crawler.all_categories().await.expect("Crawl failed");

    let jazz = &categories[0];
    assert_eq!(
        jazz.stations[0].local_playlist,
        Some(playlists.join("smooth-cafe.pls"))
    );
}
