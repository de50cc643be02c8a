// src/services/html.rs

//! Career page collector.
//!
//! Fetches an employer's career page and extracts listings using the tag and
//! attribute selectors of its `HtmlTarget`.

use reqwest::Client;
use reqwest::header::HeaderMap;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{HtmlTarget, JobListing, MissingElementPolicy};
use crate::utils::http::fetch_text;

/// Service for scraping listings from HTML career pages.
pub struct HtmlCollector {
    client: Client,
    policy: MissingElementPolicy,
}

/// Compiled selectors for one target.
struct TargetSelectors {
    container: Selector,
    title: Selector,
    location: Selector,
    anchor: Selector,
}

impl HtmlCollector {
    /// Create a collector sharing the given HTTP client.
    pub fn new(client: Client, policy: MissingElementPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetch a career page and extract its listings.
    ///
    /// A non-success status yields no listings.
    pub async fn collect(&self, employer: &str, target: &HtmlTarget) -> Result<Vec<JobListing>> {
        log::debug!("Fetching career page for {}: {}", employer, target.url);

        match fetch_text(&self.client, &target.url, HeaderMap::new()).await? {
            Some(body) => self.parse_listings(employer, target, &body),
            None => Ok(Vec::new()),
        }
    }

    /// Extract listings from an already fetched page.
    pub fn parse_listings(
        &self,
        employer: &str,
        target: &HtmlTarget,
        body: &str,
    ) -> Result<Vec<JobListing>> {
        let selectors = TargetSelectors::compile(target)?;
        let document = Html::parse_document(body);
        let mut listings = Vec::new();

        let containers = document
            .select(&selectors.container)
            .filter(|el| matches_attributes(el, target));

        for container in containers {
            match Self::parse_container(employer, target, &selectors, &container) {
                Ok(listing) => listings.push(listing),
                Err(error @ AppError::MissingElement { .. })
                    if self.policy == MissingElementPolicy::Skip =>
                {
                    log::warn!("Skipping listing: {}", error);
                }
                Err(error) => return Err(error),
            }
        }

        log::debug!("Parsed {} listings for {}", listings.len(), employer);
        Ok(listings)
    }

    fn parse_container(
        employer: &str,
        target: &HtmlTarget,
        selectors: &TargetSelectors,
        container: &ElementRef,
    ) -> Result<JobListing> {
        let title = find_child(
            container,
            &selectors.title,
            target.title_selector_class.as_deref(),
        )
        .ok_or_else(|| AppError::missing_element(employer, target.title_description()))?;

        let location = find_child(
            container,
            &selectors.location,
            target.location_selector_class.as_deref(),
        )
        .ok_or_else(|| AppError::missing_element(employer, target.location_description()))?;

        let link = container
            .select(&selectors.anchor)
            .find_map(|anchor| anchor.value().attr("href"))
            .or_else(|| container.value().attr("href"))
            .ok_or_else(|| AppError::missing_element(employer, "a[href]"))?;

        Ok(JobListing {
            employer: employer.to_string(),
            title: stripped_text(&title),
            location: stripped_text(&location),
            link: link.to_string(),
        })
    }
}

impl TargetSelectors {
    fn compile(target: &HtmlTarget) -> Result<Self> {
        Ok(Self {
            container: parse_selector(&target.job_selector_tag)?,
            title: parse_selector(&target.title_selector_tag)?,
            location: parse_selector(&target.location_selector_tag)?,
            anchor: parse_selector("a[href]")?,
        })
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Check the container's attributes against the configured filter.
fn matches_attributes(element: &ElementRef, target: &HtmlTarget) -> bool {
    target
        .job_selector_attr
        .iter()
        .all(|(name, expected)| match name.as_str() {
            "class" => has_class(element, expected),
            _ => element.value().attr(name) == Some(expected.as_str()),
        })
}

/// Class match: any single class, or the whole attribute verbatim.
fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class) || element.value().attr("class") == Some(class)
}

/// First descendant matching the tag selector and, if given, the class.
fn find_child<'a>(
    container: &ElementRef<'a>,
    selector: &Selector,
    class: Option<&str>,
) -> Option<ElementRef<'a>> {
    container
        .select(selector)
        .find(|el| class.is_none_or(|class| has_class(el, class)))
}

/// Text of an element with each text node trimmed, then concatenated.
fn stripped_text(element: &ElementRef) -> String {
    element.text().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CrawlerConfig;
    use crate::utils::http::create_client;

    const PAGE: &str = r#"
<html><body>
  <div class="opening featured">
    <h3 class="title">
      Software Engineer
    </h3>
    <span class="location"> Remote, US </span>
    <a href="/jobs/1">Apply</a>
  </div>
  <div class="banner"><h3 class="title">Not a job</h3></div>
  <div class="opening">
    <h3 class="title"><b>Data</b> <i>Scientist</i></h3>
    <span class="team">Research</span>
    <span class="location">New York</span>
    <a>No link here</a>
    <a href="https://careers.example/jobs/2">Apply</a>
  </div>
</body></html>
"#;

    fn target() -> HtmlTarget {
        toml::from_str(
            r#"
            url = "https://careers.example/"
            job_selector_tag = "div"
            job_selector_attr = { class = "opening" }
            title_selector_tag = "h3"
            title_selector_class = "title"
            location_selector_tag = "span"
            location_selector_class = "location"
            "#,
        )
        .unwrap()
    }

    fn collector(policy: MissingElementPolicy) -> HtmlCollector {
        let client = create_client(&CrawlerConfig::default()).unwrap();
        HtmlCollector::new(client, policy)
    }

    #[test]
    fn test_parse_listings() {
        let listings = collector(MissingElementPolicy::Abort)
            .parse_listings("Acme", &target(), PAGE)
            .unwrap();

        assert_eq!(
            listings,
            vec![
                JobListing::new("Acme", "Software Engineer", "Remote, US", "/jobs/1"),
                JobListing::new(
                    "Acme",
                    "DataScientist",
                    "New York",
                    "https://careers.example/jobs/2"
                ),
            ]
        );
    }

    #[test]
    fn test_container_href_fallback() {
        let page = r#"
          <a class="opening" href="/jobs/9">
            <h3 class="title">Engineer</h3>
            <span class="location">Remote</span>
          </a>
        "#;
        let mut target = target();
        target.job_selector_tag = "a".to_string();

        let listings = collector(MissingElementPolicy::Abort)
            .parse_listings("Acme", &target, page)
            .unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].link, "/jobs/9");
    }

    #[test]
    fn test_attribute_filter_exact_match() {
        let page = r#"
          <li data-kind="job"><h3>Engineer</h3><span>Remote</span><a href="/1">x</a></li>
          <li data-kind="event"><h3>Meetup</h3><span>Remote</span><a href="/2">x</a></li>
        "#;
        let target: HtmlTarget = toml::from_str(
            r#"
            url = "https://careers.example/"
            job_selector_tag = "li"
            job_selector_attr = { data-kind = "job" }
            title_selector_tag = "h3"
            location_selector_tag = "span"
            "#,
        )
        .unwrap();

        let listings = collector(MissingElementPolicy::Abort)
            .parse_listings("Acme", &target, page)
            .unwrap();
        assert_eq!(listings, vec![JobListing::new("Acme", "Engineer", "Remote", "/1")]);
    }

    #[test]
    fn test_missing_location_aborts() {
        let page = r#"
          <div class="opening"><h3 class="title">Engineer</h3><a href="/1">x</a></div>
        "#;
        let result = collector(MissingElementPolicy::Abort).parse_listings("Acme", &target(), page);

        match result {
            Err(AppError::MissingElement { employer, element }) => {
                assert_eq!(employer, "Acme");
                assert_eq!(element, "span.location");
            }
            other => panic!("expected MissingElement, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_link_aborts() {
        let page = r#"
          <div class="opening">
            <h3 class="title">Engineer</h3><span class="location">Remote</span>
          </div>
        "#;
        let result = collector(MissingElementPolicy::Abort).parse_listings("Acme", &target(), page);
        assert!(matches!(result, Err(AppError::MissingElement { .. })));
    }

    #[test]
    fn test_skip_policy_drops_only_broken_listing() {
        let page = r#"
          <div class="opening"><span class="location">Remote</span><a href="/0">x</a></div>
          <div class="opening">
            <h3 class="title">Engineer</h3><span class="location">Remote</span><a href="/1">x</a>
          </div>
        "#;
        let listings = collector(MissingElementPolicy::Skip)
            .parse_listings("Acme", &target(), page)
            .unwrap();
        assert_eq!(listings, vec![JobListing::new("Acme", "Engineer", "Remote", "/1")]);
    }

    #[test]
    fn test_invalid_tag_selector() {
        let mut target = target();
        target.job_selector_tag = "[[invalid".to_string();
        let result = collector(MissingElementPolicy::Abort).parse_listings("Acme", &target, PAGE);
        assert!(matches!(result, Err(AppError::Selector { .. })));
    }

    #[tokio::test]
    async fn test_collect_fetches_page() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/careers")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(PAGE)
            .create_async()
            .await;

        let mut target = target();
        target.url = format!("{}/careers", server.url());

        let listings = collector(MissingElementPolicy::Abort)
            .collect("Acme", &target)
            .await
            .unwrap();
        assert_eq!(listings.len(), 2);
    }

    #[tokio::test]
    async fn test_collect_non_success_yields_nothing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/careers")
            .with_status(404)
            .with_body(PAGE)
            .create_async()
            .await;

        let mut target = target();
        target.url = format!("{}/careers", server.url());

        let listings = collector(MissingElementPolicy::Abort)
            .collect("Acme", &target)
            .await
            .unwrap();
        assert!(listings.is_empty());
    }
}
