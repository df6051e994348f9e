//! Content API endpoint templates.
//!
//! Each lookup the metadata provider performs maps to one variant. Query
//! values are form-encoded and ids are pushed as single path segments, so an
//! identifier can never escape its position in the URL.

use super::ContentError;
use url::Url;

/// One content API lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// All destinations whose name contains the value, case-insensitively (deep populate).
    DestinationsByName(&'a str),
    /// All packages whose `package_id` equals the value.
    PackagesById(&'a str),
    /// A single package by id.
    Package(&'a str),
    /// A single group tour by id.
    GroupTour(&'a str),
    /// A single theme by id.
    Theme(&'a str),
}

impl Endpoint<'_> {
    /// Build the full request URL against the API base.
    pub fn url(&self, base: &Url) -> Result<Url, ContentError> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ContentError::InvalidEndpoint(format!("{base} cannot be a base URL")))?;
            segments.pop_if_empty().push("api");

            match self {
                Endpoint::DestinationsByName(_) => {
                    segments.push("all-destinations");
                }
                Endpoint::PackagesById(_) => {
                    segments.push("all-packages");
                }
                Endpoint::Package(id) => {
                    segments.push("packages").push(id);
                }
                Endpoint::GroupTour(id) => {
                    segments.push("group-tours").push(id);
                }
                Endpoint::Theme(id) => {
                    segments.push("themes").push(id);
                }
            }
        }

        {
            let mut query = url.query_pairs_mut();
            match self {
                Endpoint::DestinationsByName(name) => {
                    query.append_pair("populate", "deep").append_pair("filters[name][$containsi]", name);
                }
                Endpoint::PackagesById(id) => {
                    query.append_pair("populate", "*").append_pair("filters[package_id][$eq]", id);
                }
                Endpoint::Package(_) | Endpoint::GroupTour(_) | Endpoint::Theme(_) => {
                    query.append_pair("populate", "*");
                }
            }
        }

        Ok(url)
    }
}
