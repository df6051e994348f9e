//! Core types and shared functionality for seoshell.
//!
//! This crate provides:
//! - Unified error types
//! - Layered configuration
//! - In-memory response cache with TTL eviction
//! - The page and route model, bot classification and route resolution

pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod page;
pub mod pages;
pub mod route;

pub use cache::{CacheEntry, ResponseCache};
pub use classify::{ClassificationContext, Decision, MARKER_VALUE, classify};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use page::PageMetadata;
pub use route::{RouteKind, RouteMatch, resolve};
