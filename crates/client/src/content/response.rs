//! Content API response types and normalization.
//!
//! The API wraps everything in `{ data: ... }` envelopes where `data` may be
//! a single entry, a list, or null, and media relations nest one or two more
//! envelopes deep. Every field is optional here; [`ContentRecord::from_payload`]
//! is the single place that decides what a usable record looks like.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// `data` member that may hold one item or many.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<Option<T>>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::Many(items) => items.iter().flatten().next(),
            OneOrMany::One(item) => Some(item),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            OneOrMany::Many(items) => Box::new(items.iter().flatten()),
            OneOrMany::One(item) => Box::new(std::iter::once(item)),
        }
    }
}

/// Raw response envelope.
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<OneOrMany<Entry>>,
}

/// Raw entry: `{ id, attributes }`.
#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub attributes: Option<Attributes>,
}

/// Raw entry attributes. Only the fields used for page metadata.
#[derive(Debug, Deserialize)]
pub struct Attributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub package_images: Option<MediaRelation>,
    #[serde(default)]
    pub images: Option<MediaRelation>,
    #[serde(default)]
    pub image: Option<MediaRelation>,
}

/// Raw media relation: `{ data: {attributes: {url}} | [ ... ] | null }`.
#[derive(Debug, Deserialize)]
pub struct MediaRelation {
    #[serde(default)]
    pub data: Option<OneOrMany<MediaEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct MediaEntry {
    #[serde(default)]
    pub attributes: Option<MediaAttributes>,
}

#[derive(Debug, Deserialize)]
pub struct MediaAttributes {
    #[serde(default)]
    pub url: Option<String>,
}

impl MediaRelation {
    fn first_url(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .first()?
            .attributes
            .as_ref()?
            .url
            .as_deref()
            .and_then(non_empty)
    }
}

impl Attributes {
    /// First image URL across the relation names the API uses.
    fn image_path(&self) -> Option<&str> {
        [&self.package_images, &self.images, &self.image]
            .into_iter()
            .flatten()
            .find_map(MediaRelation::first_url)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Normalized content record used for metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    /// Non-empty display name.
    pub name: String,
    /// Non-empty description, if the entry had one.
    pub description: Option<String>,
    /// Image URL as stored by the API (often relative to the API host).
    pub image_path: Option<String>,
}

impl ContentRecord {
    /// Extract the first usable record from a raw payload.
    ///
    /// Total: any shape mismatch or missing nested field yields `None` for
    /// that field (or for the whole record when no entry has a name).
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let envelope = Envelope::deserialize(payload).unwrap_or_else(|e| {
            tracing::debug!("unexpected content payload shape: {}", e);
            Envelope::default()
        });

        envelope.data.as_ref()?.iter().find_map(|entry| {
            let attributes = entry.attributes.as_ref()?;
            let name = attributes.name.as_deref().and_then(non_empty)?;

            Some(ContentRecord {
                name: name.to_string(),
                description: attributes.description.as_deref().and_then(non_empty).map(str::to_string),
                image_path: attributes.image_path().map(str::to_string),
            })
        })
    }

    /// Absolute image URL. Relative paths, including root-relative ones, are
    /// appended to `base` so a path prefix on the API base is kept.
    pub fn image_url(&self, base: &Url) -> Option<String> {
        let path = self.image_path.as_deref()?;
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }

        let mut root = base.clone();
        root.set_query(None);
        root.set_fragment(None);
        if !root.path().ends_with('/') {
            let dir = format!("{}/", root.path());
            root.set_path(&dir);
        }

        root.join(path.trim_start_matches('/')).ok().map(|url| url.to_string())
    }
}
