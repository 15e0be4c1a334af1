//! Core types for the recording catalog

use serde::{Deserialize, Serialize};
use spd_common::DashboardConfig;

/// One raw record from the storage-listing endpoint.
///
/// `name` is the storage object key (`<host>/<date>/<filename>`); size and
/// modification time are present when the listing backend reports them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawObject {
    /// Storage object key
    pub name: String,
    /// Object size in bytes
    #[serde(default)]
    pub size: Option<u64>,
    /// Last-modified timestamp as reported by the listing
    #[serde(default, alias = "lastModified")]
    pub last_modified: Option<String>,
}

/// One physical audio file in object storage.
///
/// Immutable once constructed; the index never mutates an asset after
/// insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioAsset {
    /// Absolute, retrievable URL (`storage_base_url` + key)
    pub url: String,
    /// Filename component of the key
    pub filename: String,
    /// Full storage object key
    pub storage_path: String,
    /// Object size in bytes, when the listing reported one
    pub size_bytes: Option<u64>,
    /// Last-modified timestamp, when the listing reported one
    pub last_modified: Option<String>,
}

/// One transcript file in object storage, same shape as [`AudioAsset`].
///
/// Unlike audio, at most one transcript is retained per key
/// (last-write-wins on ingestion).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptAsset {
    /// Absolute, retrievable URL (`storage_base_url` + key)
    pub url: String,
    /// Filename component of the key
    pub filename: String,
    /// Full storage object key
    pub storage_path: String,
    /// Object size in bytes, when the listing reported one
    pub size_bytes: Option<u64>,
    /// Last-modified timestamp, when the listing reported one
    pub last_modified: Option<String>,
}

/// Rebuild summary counters, exposed to the presentation layer for
/// observability (never fatal signals)
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    /// Distinct spaces with at least one audio file
    pub spaces_with_audio: usize,
    /// Total audio files indexed
    pub audio_files: usize,
    /// Distinct spaces with a transcript
    pub spaces_with_transcript: usize,
    /// Listing records skipped (malformed key or unrecognized extension)
    pub skipped_objects: usize,
}

/// Configuration slice the loader and resolver share
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// URL prefix concatenated with a key to form a retrievable URL;
    /// must end with `/`
    pub storage_base_url: String,
    /// Recognized audio extensions; order drives expected-path probing
    pub audio_extensions: Vec<String>,
    /// Recognized transcript extensions
    pub transcript_extensions: Vec<String>,
}

impl From<&DashboardConfig> for CatalogConfig {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            storage_base_url: config.storage_base_url.clone(),
            audio_extensions: config.audio_extensions.clone(),
            transcript_extensions: config.transcript_extensions.clone(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_object_accepts_camel_case_listing() {
        // The storage listing endpoint reports camelCase modification times
        let json = r#"{"name": "host/2025-05-28/abc.mp3", "size": 1024, "lastModified": "2025-05-28T10:00:00Z"}"#;
        let object: RawObject = serde_json::from_str(json).unwrap();
        assert_eq!(object.name, "host/2025-05-28/abc.mp3");
        assert_eq!(object.size, Some(1024));
        assert!(object.last_modified.is_some());
    }

    #[test]
    fn test_raw_object_size_optional() {
        let object: RawObject = serde_json::from_str(r#"{"name": "a/b/c.mp3"}"#).unwrap();
        assert!(object.size.is_none());
        assert!(object.last_modified.is_none());
    }

    #[test]
    fn test_catalog_config_from_dashboard_config() {
        let config = CatalogConfig::default();
        assert!(config.storage_base_url.ends_with('/'));
        assert_eq!(config.audio_extensions[0], ".mp3");
    }
}
