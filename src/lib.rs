//! In-memory indexing structures for a voting registry
//!
//! Three independent containers, none of which performs I/O:
//! - [`KeyedStore`]: fixed-capacity chaining hash table
//! - [`PrefixIndex`]: case-folded character trie with prefix queries
//! - [`RangeSumStructure`]: segment tree with point update and range sum
//!
//! [`registry::ElectionRegistry`] composes them into voter, candidate and
//! vote storage.

pub mod config;
pub mod errors;
pub mod hashing;
pub mod registry;
pub mod segment_tree;
pub mod store;
pub mod trie;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use errors::{Error, Result};
pub use hashing::Blake3BuildHasher;
pub use registry::{ElectionRegistry, RegistrySnapshot, RegistryStats};
pub use segment_tree::RangeSumStructure;
pub use store::{KeyedStore, StoreStats};
pub use trie::{PrefixIndex, PrefixMatch, PrefixStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global tracing subscriber
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ballot_index=info".into()),
        )
        .try_init()
        .map_err(|e| Error::internal(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!("🗳️  Ballot index v{} initialized", VERSION);
    Ok(())
}

#[cfg(test)]
mod proptests;
