// src/pipeline/run.rs

//! End-to-end run: scrape → normalize → filter → diff → notify → persist.

use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, JobListing};
use crate::services::{ApiCollector, HtmlCollector, Notifier};
use crate::storage::ListingStore;

use super::diff::calculate_diff;
use super::filter::filter_listings;
use super::normalize::normalize_api;

/// Summary of a single run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Listings collected before filtering
    pub scraped_count: usize,
    /// Listings that passed the keyword/location filter
    pub matched_count: usize,
    /// Matched listings absent from the seen set
    pub new_listings: Vec<JobListing>,
    /// Whether a notification mail went out
    pub notified: bool,
    /// Size of the seen set after the run (unchanged on a dry run)
    pub stored_count: usize,
}

/// Run the pipeline once over every configured target.
///
/// Targets are processed one at a time, HTML targets first, each kind in
/// configuration order. Any error aborts the run. Without a notifier the run
/// is dry: new listings are logged and neither mailed nor stored.
pub async fn run_pipeline(
    config: &Config,
    client: &Client,
    store: &dyn ListingStore,
    notifier: Option<&Notifier>,
) -> Result<RunSummary> {
    let start_time = Utc::now();
    log::info!(
        "Checking {} targets ({} pages, {} APIs)",
        config.target_count(),
        config.soup_targets.len(),
        config.api_targets.len()
    );

    let html = HtmlCollector::new(client.clone(), config.crawler.missing_element);
    let api = ApiCollector::new(client.clone());

    let mut scraped_count = 0;
    let mut matched = Vec::new();

    for (employer, target) in &config.soup_targets {
        let listings = html.collect(employer, target).await?;
        scraped_count += listings.len();
        let listings = filter_listings(listings, &config.keywords, &config.locations);
        log::info!("{}: {} matching listings", employer, listings.len());
        matched.extend(listings);
    }

    for (employer, target) in &config.api_targets {
        let payload = api.fetch(employer, target).await?;
        let listings = normalize_api(employer, payload, target)?;
        scraped_count += listings.len();
        let listings = filter_listings(listings, &config.keywords, &config.locations);
        log::info!("{}: {} matching listings", employer, listings.len());
        matched.extend(listings);
    }

    let mut seen = store.load().await?;
    let diff = calculate_diff(&matched, &seen);
    log::info!(
        "{} new listings ({} already seen)",
        diff.added.len(),
        diff.already_seen
    );

    let notified = match notifier {
        Some(notifier) => {
            let notified = notifier.notify(&diff.added).await?;
            seen.extend(diff.added.iter().cloned());
            store.save(&seen).await?;
            log::info!("Seen set saved to {} ({} listings)", store.location(), seen.len());
            notified
        }
        None => {
            if !diff.has_changes() {
                log::info!("[dry run] No new listings");
            }
            for listing in &diff.added {
                log::info!("[dry run] {} {}", listing, listing.link);
            }
            false
        }
    };

    Ok(RunSummary {
        start_time,
        end_time: Utc::now(),
        scraped_count,
        matched_count: matched.len(),
        new_listings: diff.added,
        notified,
        stored_count: seen.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::CrawlerConfig;
    use crate::services::testing::{FailingMailer, RecordingMailer};
    use crate::storage::LocalStore;
    use crate::utils::http::create_client;
    use tempfile::TempDir;

    const PAGE: &str = r#"
      <ul>
        <li class="job"><a href="/jobs/1"><h4>Software Engineer</h4></a><p>Remote, US</p></li>
        <li class="job"><a href="/jobs/2"><h4>Sales Rep</h4></a><p>Remote</p></li>
      </ul>
    "#;

    const API_BODY: &str = r#"{
      "results": [
        {"name": "ML Engineer", "city": "Remote", "url": "https://globex.example/9"},
        {"name": "Platform Engineer", "city": "Berlin", "url": "https://globex.example/10"}
      ]
    }"#;

    async fn mock_server() -> (mockito::ServerGuard, Vec<mockito::Mock>) {
        let mut server = mockito::Server::new_async().await;
        let page = server
            .mock("GET", "/acme/careers")
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;
        let api = server
            .mock("GET", "/globex/jobs")
            .with_status(200)
            .with_body(API_BODY)
            .create_async()
            .await;
        (server, vec![page, api])
    }

    fn config(base: &str) -> Config {
        toml::from_str(&format!(
            r#"
            keywords = ["engineer"]
            locations = ["remote"]

            [soup_targets.Acme]
            url = "{base}/acme/careers"
            job_selector_tag = "li"
            job_selector_attr = {{ class = "job" }}
            title_selector_tag = "h4"
            location_selector_tag = "p"

            [api_targets.Globex]
            url = "{base}/globex/jobs"
            key = "results"
            title = "name"
            location = "city"
            link = "url"
            "#
        ))
        .unwrap()
    }

    fn client() -> Client {
        create_client(&CrawlerConfig::default()).unwrap()
    }

    fn acme_engineer() -> JobListing {
        JobListing::new("Acme", "Software Engineer", "Remote, US", "/jobs/1")
    }

    fn globex_engineer() -> JobListing {
        JobListing::new("Globex", "ML Engineer", "Remote", "https://globex.example/9")
    }

    #[tokio::test]
    async fn test_first_run_notifies_and_stores() {
        let (server, _mocks) = mock_server().await;
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("jobs.json"));
        let mailer = RecordingMailer::default();
        let notifier = mailer.notifier();

        let summary = run_pipeline(&config(&server.url()), &client(), &store, Some(&notifier))
            .await
            .unwrap();

        assert_eq!(summary.scraped_count, 4);
        assert_eq!(summary.matched_count, 2);
        assert_eq!(summary.new_listings, vec![acme_engineer(), globex_engineer()]);
        assert!(summary.notified);
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(store.load().await.unwrap(), summary.new_listings);
    }

    #[tokio::test]
    async fn test_only_unseen_listing_is_reported() {
        let (server, _mocks) = mock_server().await;
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("jobs.json"));
        store.save(&[acme_engineer()]).await.unwrap();
        let mailer = RecordingMailer::default();
        let notifier = mailer.notifier();

        let summary = run_pipeline(&config(&server.url()), &client(), &store, Some(&notifier))
            .await
            .unwrap();

        assert_eq!(summary.new_listings, vec![globex_engineer()]);
        assert_eq!(summary.stored_count, 2);
        assert_eq!(
            store.load().await.unwrap(),
            vec![acme_engineer(), globex_engineer()]
        );
        assert_eq!(
            mailer.sent()[0].body,
            "Globex - ML Engineer - Remote\nhttps://globex.example/9"
        );
    }

    #[tokio::test]
    async fn test_nothing_new_sends_no_mail() {
        let (server, _mocks) = mock_server().await;
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("jobs.json"));
        store.save(&[acme_engineer(), globex_engineer()]).await.unwrap();
        let mailer = RecordingMailer::default();
        let notifier = mailer.notifier();

        let summary = run_pipeline(&config(&server.url()), &client(), &store, Some(&notifier))
            .await
            .unwrap();

        assert!(summary.new_listings.is_empty());
        assert!(!summary.notified);
        assert!(mailer.sent().is_empty());
        assert_eq!(store.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dry_run_does_not_persist() {
        let (server, _mocks) = mock_server().await;
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("jobs.json"));

        let summary = run_pipeline(&config(&server.url()), &client(), &store, None)
            .await
            .unwrap();

        assert_eq!(summary.new_listings.len(), 2);
        assert!(!summary.notified);
        assert_eq!(summary.stored_count, 0);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_failed_api_contributes_nothing() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/acme/careers")
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;
        let _api = server
            .mock("GET", "/globex/jobs")
            .with_status(502)
            .create_async()
            .await;
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("jobs.json"));
        let mailer = RecordingMailer::default();
        let notifier = mailer.notifier();

        let summary = run_pipeline(&config(&server.url()), &client(), &store, Some(&notifier))
            .await
            .unwrap();

        assert_eq!(summary.new_listings, vec![acme_engineer()]);
    }

    #[tokio::test]
    async fn test_scrape_error_aborts_run() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/acme/careers")
            .with_status(200)
            .with_body(r#"<li class="job"><h4>Engineer</h4></li>"#)
            .create_async()
            .await;
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("jobs.json"));
        let mailer = RecordingMailer::default();
        let notifier = mailer.notifier();

        let result = run_pipeline(&config(&server.url()), &client(), &store, Some(&notifier)).await;

        assert!(result.is_err());
        assert!(mailer.sent().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_delivery_failure_aborts_before_saving() {
        let (server, _mocks) = mock_server().await;
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("jobs.json"));
        let notifier = FailingMailer::notifier();

        let result = run_pipeline(&config(&server.url()), &client(), &store, Some(&notifier)).await;

        assert!(matches!(result, Err(AppError::Io(_))));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_delivery_failure_leaves_seen_set_untouched() {
        let (server, _mocks) = mock_server().await;
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path().join("jobs.json"));
        store.save(&[acme_engineer()]).await.unwrap();
        let notifier = FailingMailer::notifier();

        let result = run_pipeline(&config(&server.url()), &client(), &store, Some(&notifier)).await;

        assert!(result.is_err());
        assert_eq!(store.load().await.unwrap(), vec![acme_engineer()]);
    }
}
