//! # Touchline
//!
//! A club news sync service: periodically pulls a football club's news
//! feed, fetches full article detail per listed item concurrently,
//! deduplicates against prior storage, and republishes batches through
//! a message bus so persistence never blocks ingestion.
//!
//! ## Architecture
//!
//! ```text
//! Scheduler → Syncer → bus ⇢ Subscriber → Pipeline → Store
//!                                              ↑
//!                                      HTTP read API
//! ```
//!
//! The two halves are decoupled by the bus: the publish side wraps the
//! parsed listing in an envelope and returns; the subscriber drains the
//! bus and drives the fetch/parse/persist pipeline per batch.

/// Application context and error types.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Seam over HTTP GET; reqwest-backed implementation.
pub mod client;

/// TOML configuration loading.
pub mod config;

/// Core domain models.
///
/// - [`FeedListing`](domain::FeedListing) / [`ItemStub`](domain::ItemStub):
///   one sync cycle's listing
/// - [`ArticleDetail`](domain::ArticleDetail): a fully fetched article
/// - [`Article`](domain::Article): the persisted record
pub mod domain;

/// Fetching and parsing of the feed's XML documents.
pub mod feed;

/// The concurrent fetch → parse → dedup/persist pipeline.
pub mod pipeline;

/// Message envelope, bus contracts and the subscriber loop.
pub mod pubsub;

/// Periodic sync trigger.
pub mod scheduler;

/// Read-only HTTP API over stored articles.
pub mod server;

/// SQLite persistence layer behind the [`Store`](store::Store) trait.
pub mod store;

/// The sync cycle itself: listing publisher and ingest handler.
pub mod syncer;
