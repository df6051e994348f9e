//! Client code for seoshell.
//!
//! This crate provides the content API client and its response cache,
//! page metadata resolution, and the synthesized document renderer used by
//! the server.

pub mod content;
pub mod metadata;
pub mod render;

pub use content::{
    CachedFetcher, ContentError, ContentRecord, ContentSource, Endpoint, HttpContentSource, SourceConfig,
};
pub use metadata::{MetadataProvider, SiteProfile};
pub use render::{RequestUrl, ShellOptions, document, section};
