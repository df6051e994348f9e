//! Route resolution: request path to page kind.
//!
//! The static page table is consulted first (exact match), then the dynamic
//! prefixes in declaration order. Matching is case-sensitive and the first
//! match wins.

use crate::pages;
use serde::{Deserialize, Serialize};

/// Kind of content behind a dynamic route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Destination,
    DestinationSearch,
    Package,
    GroupTour,
    Theme,
}

impl RouteKind {
    /// Stable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Destination => "destination",
            RouteKind::DestinationSearch => "destination_search",
            RouteKind::Package => "package",
            RouteKind::GroupTour => "group_tour",
            RouteKind::Theme => "theme",
        }
    }
}

/// Result of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// A page from the static table, keyed by its path.
    Static(&'static str),
    /// A content page identified by the trailing path segment.
    Dynamic { kind: RouteKind, identifier: String },
    /// Nothing we know how to describe.
    Unknown,
}

/// Dynamic route prefixes, in match order.
pub const DYNAMIC_PREFIXES: &[(&str, RouteKind)] = &[
    ("/single-destination/", RouteKind::Destination),
    ("/search-destination/", RouteKind::DestinationSearch),
    ("/single-package/", RouteKind::Package),
    ("/single-group-tour/", RouteKind::GroupTour),
    ("/single-theme/", RouteKind::Theme),
];

/// Resolve a request path (without query string) to a [`RouteMatch`].
pub fn resolve(path: &str) -> RouteMatch {
    if let Some(page) = pages::lookup(path) {
        return RouteMatch::Static(page.path);
    }

    for (prefix, kind) in DYNAMIC_PREFIXES {
        if let Some(rest) = path.strip_prefix(prefix) {
            return match identifier(rest) {
                Some(identifier) => RouteMatch::Dynamic { kind: *kind, identifier },
                None => RouteMatch::Unknown,
            };
        }
    }

    RouteMatch::Unknown
}

/// Extract the identifier from the remainder after a prefix.
///
/// One trailing slash is tolerated. Empty or multi-segment remainders are rejected.
fn identifier(rest: &str) -> Option<String> {
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() || rest.contains('/') {
        return None;
    }

    let decoded = urlencoding::decode(rest).map(|s| s.into_owned()).unwrap_or_else(|_| rest.to_string());
    if decoded.trim().is_empty() { None } else { Some(decoded) }
}
