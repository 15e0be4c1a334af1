//! # spd-catalog - recording catalog engine
//!
//! Associates recorded audio files in object storage with space records:
//! - Catalog loader: turns a flat storage listing into an in-memory index
//! - Resolver: tiered lookup from a space identifier (plus optional hints)
//!   to its audio and transcript assets
//! - Duration estimation for display
//! - `CatalogService`: owns the current index snapshot and rebuilds it
//!
//! The presentation layer (HTML rendering, refresh timers) is an external
//! collaborator: it triggers rebuilds and queries the resolver per space.

pub mod duration;
pub mod listing;
pub mod loader;
pub mod resolver;
pub mod service;
pub mod types;

pub use listing::{HttpListingProvider, ListingProvider};
pub use loader::{build_index, CatalogIndex};
pub use resolver::{AudioLookup, LookupTier, Resolver, TranscriptLookup};
pub use service::CatalogService;
pub use types::{AudioAsset, CatalogConfig, CatalogStats, RawObject, TranscriptAsset};
