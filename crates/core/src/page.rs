//! Per-request page metadata.

use serde::{Deserialize, Serialize};

/// Everything the document builder needs for one page.
///
/// Always fully populated: providers substitute site defaults instead of
/// leaving fields empty. `image` is the only optional field, and it is
/// absent only when neither the page nor the site has a share image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Pre-rendered HTML fragment placed inside the root container.
    pub body: String,
}
