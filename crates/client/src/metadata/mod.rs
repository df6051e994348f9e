//! Page metadata resolution.
//!
//! Turns a [`RouteMatch`] into fully populated [`PageMetadata`]. Static pages
//! come from the page table; dynamic pages are looked up through the cached
//! content client. Lookups never fail outward: a content error is logged and
//! replaced by the kind's placeholder copy.

use crate::content::{CachedFetcher, ContentError, ContentRecord, Endpoint};
use crate::render;
use seoshell_core::{AppConfig, ConfigError, PageMetadata, RouteKind, RouteMatch, pages};
use url::Url;

/// Site-wide values used to fill in and brand page metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    pub site_name: String,
    /// Description for static pages that have none of their own.
    pub default_description: String,
    /// Share image for pages that have none of their own.
    pub default_image: Option<String>,
    /// Content API base; relative image paths resolve against it.
    pub api_base: Url,
}

impl SiteProfile {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            site_name: config.site_name.clone(),
            default_description: config.default_description.clone(),
            default_image: config.default_image().map(str::to_string),
            api_base: config.content_api_url()?,
        })
    }
}

/// Section class of the body fragment for a content kind.
fn section_class(kind: RouteKind) -> &'static str {
    match kind {
        RouteKind::Destination => "single-destination-section",
        RouteKind::DestinationSearch => "search-destination-section",
        RouteKind::Package => "single-package-section",
        RouteKind::GroupTour => "single-group-tour-section",
        RouteKind::Theme => "single-theme-section",
    }
}

/// Page title for a record found by the content API.
fn found_title(kind: RouteKind, name: &str, site: &str) -> String {
    match kind {
        RouteKind::DestinationSearch => format!("Search {name} - {site}"),
        RouteKind::GroupTour => format!("{name} Group Tour"),
        RouteKind::Destination | RouteKind::Package | RouteKind::Theme => name.to_string(),
    }
}

/// Description for a found record that has none of its own.
fn fallback_description(kind: RouteKind, site: &str) -> String {
    match kind {
        RouteKind::Destination => format!("Explore this destination with {site}."),
        RouteKind::DestinationSearch => format!("Find your perfect destination with {site}."),
        RouteKind::Package => format!("Book this exciting travel package with {site}."),
        RouteKind::GroupTour => format!("Join this group tour with {site}."),
        RouteKind::Theme => format!("Explore this exciting travel theme with {site}."),
    }
}

/// Placeholder copy when nothing usable came back: (title, heading, description).
fn placeholder_copy(kind: RouteKind, id: &str, site: &str) -> (String, String, String) {
    match kind {
        RouteKind::Destination => {
            let title = format!("Destination {id} - {site}");
            (title.clone(), title, format!("Explore {id} with {site}."))
        }
        RouteKind::DestinationSearch => {
            let title = format!("Search {id} - {site}");
            (title.clone(), title, format!("Find your perfect destination with {site}."))
        }
        RouteKind::Package => (
            format!("Package {id} - {site}"),
            format!("Package {id}"),
            format!("Explore travel package {id} with {site}."),
        ),
        RouteKind::GroupTour => {
            let title = format!("Group Tour {id} - {site}");
            (title.clone(), title, format!("Join group tour {id} with {site}."))
        }
        RouteKind::Theme => (
            format!("Theme - {site}"),
            "Travel Theme".to_string(),
            format!("Explore exciting travel themes with {site}."),
        ),
    }
}

/// Resolves routes to page metadata.
#[derive(Clone)]
pub struct MetadataProvider {
    fetcher: CachedFetcher,
    site: SiteProfile,
}

impl MetadataProvider {
    pub fn new(fetcher: CachedFetcher, site: SiteProfile) -> Self {
        Self { fetcher, site }
    }

    /// Produce metadata for `route`. Never fails.
    pub async fn resolve(&self, route: &RouteMatch) -> PageMetadata {
        match route {
            RouteMatch::Static(path) => match pages::lookup(path) {
                Some(page) => self.static_page(page),
                None => self.not_found(),
            },
            RouteMatch::Dynamic { kind, identifier } => self.dynamic(*kind, identifier).await,
            RouteMatch::Unknown => self.not_found(),
        }
    }

    fn static_page(&self, page: &pages::StaticPage) -> PageMetadata {
        let site = &self.site.site_name;
        let title = page.title(site);
        let description = page.description(site).unwrap_or_else(|| self.site.default_description.clone());
        let body = render::section("page-section", &title, &description, None);

        PageMetadata { title, description, image: self.site.default_image.clone(), body }
    }

    fn not_found(&self) -> PageMetadata {
        let title = format!("Not Found - {}", self.site.site_name);
        let description = format!("Page not found on {}.", self.site.site_name);
        let body = render::section(
            "not-found-section",
            "404 - Page Not Found",
            "Sorry, the page you are looking for does not exist.",
            None,
        );

        PageMetadata { title, description, image: self.site.default_image.clone(), body }
    }

    async fn dynamic(&self, kind: RouteKind, id: &str) -> PageMetadata {
        let primary = match kind {
            RouteKind::Destination | RouteKind::DestinationSearch => Endpoint::DestinationsByName(id),
            RouteKind::Package | RouteKind::GroupTour => Endpoint::PackagesById(id),
            RouteKind::Theme => Endpoint::Theme(id),
        };

        let record = match self.record(primary).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => self.secondary(kind, id).await,
            Err(e) => {
                tracing::warn!("{} lookup for {:?} failed: {}", kind.as_str(), id, e);
                None
            }
        };

        match record {
            Some(record) => self.record_page(kind, &record),
            None => self.placeholder(kind, id),
        }
    }

    /// Second lookup for kinds that have one, when the first came back empty.
    async fn secondary(&self, kind: RouteKind, id: &str) -> Option<ContentRecord> {
        let endpoint = match kind {
            RouteKind::Package => Endpoint::Package(id),
            RouteKind::GroupTour => Endpoint::GroupTour(id),
            _ => return None,
        };

        self.record(endpoint).await.unwrap_or_else(|e| {
            tracing::warn!("{} fallback lookup for {:?} failed: {}", kind.as_str(), id, e);
            None
        })
    }

    async fn record(&self, endpoint: Endpoint<'_>) -> Result<Option<ContentRecord>, ContentError> {
        let url = endpoint.url(&self.site.api_base)?;
        let payload = self.fetcher.get(&url).await?;
        Ok(ContentRecord::from_payload(&payload))
    }

    fn record_page(&self, kind: RouteKind, record: &ContentRecord) -> PageMetadata {
        let site = &self.site.site_name;
        let title = found_title(kind, &record.name, site);
        let description = record.description.clone().unwrap_or_else(|| fallback_description(kind, site));
        let image = record.image_url(&self.site.api_base).or_else(|| self.site.default_image.clone());
        let body = render::section(section_class(kind), &title, &description, image.as_deref());

        PageMetadata { title, description, image, body }
    }

    fn placeholder(&self, kind: RouteKind, id: &str) -> PageMetadata {
        let (title, heading, description) = placeholder_copy(kind, id, &self.site.site_name);
        let body = render::section(section_class(kind), &heading, &description, None);

        PageMetadata { title, description, image: self.site.default_image.clone(), body }
    }
}
