//! Catalog loader
//!
//! Transforms a flat sequence of storage-listing records into a
//! [`CatalogIndex`]: classifies each object key by extension, derives the
//! canonical space identifier from the filename, and indexes the resulting
//! asset under both the bare identifier and the composite
//! `<host>/<date>/<identifier>` key.
//!
//! The loader is pure (no I/O) and never fails as a whole: malformed keys
//! and unrecognized extensions are skipped and counted. The entire index is
//! discarded and rebuilt on every refresh; there is no incremental update.
//!
//! # Key shape
//!
//! A storage object key is `<host>/<date>/<filename>` where `<date>` is an
//! ISO calendar date and `<filename>` carries the canonical space identifier
//! optionally followed by `-<suffix>` and a recognized extension. Splitting
//! on `/` must yield at least 3 segments; segments beyond the third are
//! rejoined into the filename.

use crate::types::{AudioAsset, CatalogConfig, CatalogStats, RawObject, TranscriptAsset};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// In-memory index of storage assets, keyed by canonical space identifier
/// and by composite key.
///
/// Audio entries accumulate per key in insertion order, de-duplicated by
/// URL; transcript entries are last-write-wins. Immutable once built: the
/// service layer swaps whole snapshots instead of mutating in place.
pub struct CatalogIndex {
    audio_by_key: HashMap<String, Vec<AudioAsset>>,
    transcript_by_key: HashMap<String, TranscriptAsset>,
}

impl CatalogIndex {
    /// Create an empty index (the state before the first successful rebuild)
    pub fn empty() -> Self {
        Self {
            audio_by_key: HashMap::new(),
            transcript_by_key: HashMap::new(),
        }
    }

    /// Audio assets under a key, if any
    pub fn audio(&self, key: &str) -> Option<&[AudioAsset]> {
        self.audio_by_key
            .get(key)
            .map(Vec::as_slice)
            .filter(|assets| !assets.is_empty())
    }

    /// Transcript asset under a key, if any
    pub fn transcript(&self, key: &str) -> Option<&TranscriptAsset> {
        self.transcript_by_key.get(key)
    }

    /// All indexed audio assets, across every key (expected-path probing)
    pub fn iter_audio(&self) -> impl Iterator<Item = &AudioAsset> {
        self.audio_by_key.values().flatten()
    }

    /// Append unless an entry with an identical URL already exists under
    /// this key. Returns whether the asset was appended.
    pub(crate) fn insert_audio(&mut self, key: &str, asset: &AudioAsset) -> bool {
        let entries = self.audio_by_key.entry(key.to_string()).or_default();
        if entries.iter().any(|existing| existing.url == asset.url) {
            return false;
        }
        entries.push(asset.clone());
        true
    }

    pub(crate) fn insert_transcript(&mut self, key: &str, asset: &TranscriptAsset) {
        self.transcript_by_key
            .insert(key.to_string(), asset.clone());
    }
}

/// Build a fresh index from a raw storage listing.
///
/// Returns the populated index plus summary counters for observability.
pub fn build_index(objects: &[RawObject], config: &CatalogConfig) -> (CatalogIndex, CatalogStats) {
    let mut index = CatalogIndex::empty();
    let mut stats = CatalogStats::default();
    let mut audio_ids: HashSet<String> = HashSet::new();
    let mut transcript_ids: HashSet<String> = HashSet::new();

    for object in objects {
        let Some((host, date, filename)) = split_key(&object.name) else {
            debug!(key = %object.name, "Skipping malformed storage key");
            stats.skipped_objects += 1;
            continue;
        };

        let url = format!("{}{}", config.storage_base_url, object.name);

        if let Some(ext) = match_extension(&filename, &config.audio_extensions) {
            let id = canonical_id(&filename, ext);
            let composite = format!("{}/{}/{}", host, date, id);
            let asset = AudioAsset {
                url,
                filename: filename.clone(),
                storage_path: object.name.clone(),
                size_bytes: object.size,
                last_modified: object.last_modified.clone(),
            };
            let appended = index.insert_audio(&id, &asset);
            index.insert_audio(&composite, &asset);
            if appended {
                stats.audio_files += 1;
            }
            audio_ids.insert(id);
        } else if let Some(ext) = match_extension(&filename, &config.transcript_extensions) {
            let id = canonical_id(&filename, ext);
            let composite = format!("{}/{}/{}", host, date, id);
            let asset = TranscriptAsset {
                url,
                filename: filename.clone(),
                storage_path: object.name.clone(),
                size_bytes: object.size,
                last_modified: object.last_modified.clone(),
            };
            index.insert_transcript(&id, &asset);
            index.insert_transcript(&composite, &asset);
            transcript_ids.insert(id);
        } else {
            debug!(key = %object.name, "Skipping unrecognized extension");
            stats.skipped_objects += 1;
        }
    }

    stats.spaces_with_audio = audio_ids.len();
    stats.spaces_with_transcript = transcript_ids.len();

    info!(
        spaces_with_audio = stats.spaces_with_audio,
        audio_files = stats.audio_files,
        spaces_with_transcript = stats.spaces_with_transcript,
        skipped = stats.skipped_objects,
        "Catalog index rebuilt"
    );

    (index, stats)
}

/// Split a storage key into host, date, and filename segments.
///
/// Keys with fewer than 3 segments are malformed; segments beyond the third
/// are rejoined into the filename.
fn split_key(key: &str) -> Option<(&str, &str, String)> {
    let segments: Vec<&str> = key.split('/').collect();
    if segments.len() < 3 {
        return None;
    }
    Some((segments[0], segments[1], segments[2..].join("/")))
}

/// Case-insensitive suffix match against a configured extension list.
///
/// Returns the first matching configured extension (list order).
fn match_extension<'a>(filename: &str, extensions: &'a [String]) -> Option<&'a str> {
    let lower = filename.to_lowercase();
    extensions
        .iter()
        .map(String::as_str)
        .find(|ext| lower.ends_with(&ext.to_lowercase()))
}

/// Derive the canonical space identifier from a filename.
///
/// Strips the matched extension, then takes the substring before the first
/// `-`. Lossy: an identifier that itself contains a dash is truncated at
/// that dash, matching the historical upload naming scheme.
fn canonical_id(filename: &str, matched_ext: &str) -> String {
    let stem = &filename[..filename.len() - matched_ext.len()];
    match stem.split_once('-') {
        Some((id, _suffix)) => id.to_string(),
        None => stem.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str) -> RawObject {
        RawObject {
            name: name.to_string(),
            size: None,
            last_modified: None,
        }
    }

    fn config() -> CatalogConfig {
        CatalogConfig {
            storage_base_url: "https://bucket.test/".to_string(),
            audio_extensions: vec![
                ".mp3".to_string(),
                ".aac".to_string(),
                ".m4a".to_string(),
                ".mp4".to_string(),
            ],
            transcript_extensions: vec![".json".to_string(), ".csv".to_string()],
        }
    }

    #[test]
    fn indexes_audio_under_bare_and_composite_keys() {
        let (index, stats) = build_index(&[object("host1/2025-05-28/abc123.mp3")], &config());

        let direct = index.audio("abc123").unwrap();
        assert_eq!(direct.len(), 1);
        assert_eq!(direct[0].url, "https://bucket.test/host1/2025-05-28/abc123.mp3");
        assert_eq!(direct[0].filename, "abc123.mp3");
        assert_eq!(direct[0].storage_path, "host1/2025-05-28/abc123.mp3");

        let composite = index.audio("host1/2025-05-28/abc123").unwrap();
        assert_eq!(composite.len(), 1);

        assert_eq!(stats.spaces_with_audio, 1);
        assert_eq!(stats.audio_files, 1);
        assert_eq!(stats.skipped_objects, 0);
    }

    #[test]
    fn suffix_after_dash_is_stripped_from_identifier() {
        let (index, _) = build_index(&[object("host/2025-06-01/id42-title.aac")], &config());
        assert!(index.audio("id42").is_some());
        assert!(index.audio("id42-title").is_none());
    }

    #[test]
    fn canonical_id_truncates_dashed_identifier() {
        // Documented limitation: an identifier that genuinely contains a
        // dash is truncated at the first dash and resolves under the
        // truncated id.
        assert_eq!(canonical_id("real-id-with-dash.mp3", ".mp3"), "real");

        let (index, _) = build_index(&[object("h/2025-01-01/real-id-with-dash.mp3")], &config());
        assert!(index.audio("real-id-with-dash").is_none());
        assert!(index.audio("real").is_some());
    }

    #[test]
    fn malformed_keys_are_skipped_not_fatal() {
        let (index, stats) = build_index(
            &[
                object("too-short.mp3"),
                object("host/only-two.mp3"),
                object("host/2025-05-28/ok.mp3"),
            ],
            &config(),
        );
        assert_eq!(stats.skipped_objects, 2);
        assert_eq!(stats.audio_files, 1);
        assert!(index.audio("ok").is_some());
    }

    #[test]
    fn unrecognized_extensions_are_skipped() {
        let (index, stats) = build_index(
            &[object("host/2025-05-28/clip.wav"), object("host/2025-05-28/notes.txt")],
            &config(),
        );
        assert_eq!(stats.skipped_objects, 2);
        assert_eq!(stats.audio_files, 0);
        assert!(index.audio("clip").is_none());
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let (index, _) = build_index(&[object("host/2025-05-28/loud.MP3")], &config());
        assert_eq!(index.audio("loud").unwrap().len(), 1);
    }

    #[test]
    fn extra_segments_are_rejoined_into_filename() {
        let (index, _) = build_index(&[object("host/2025-05-28/extra/seg.mp3")], &config());
        let assets = index.audio("extra/seg").unwrap();
        assert_eq!(assets[0].filename, "extra/seg.mp3");
    }

    #[test]
    fn multi_segment_recordings_accumulate() {
        let (index, stats) = build_index(
            &[
                object("host/2025-05-28/abc-0.mp3"),
                object("host/2025-05-28/abc-1.mp3"),
            ],
            &config(),
        );
        let assets = index.audio("abc").unwrap();
        assert_eq!(assets.len(), 2);
        // Insertion order is preserved
        assert!(assets[0].filename.contains("abc-0"));
        assert!(assets[1].filename.contains("abc-1"));
        assert_eq!(stats.spaces_with_audio, 1);
        assert_eq!(stats.audio_files, 2);
    }

    #[test]
    fn reingestion_is_idempotent() {
        let listing = vec![
            object("host/2025-05-28/abc.mp3"),
            object("host/2025-05-28/abc.mp3"),
        ];
        let (index, stats) = build_index(&listing, &config());
        assert_eq!(index.audio("abc").unwrap().len(), 1);
        assert_eq!(index.audio("host/2025-05-28/abc").unwrap().len(), 1);
        assert_eq!(stats.audio_files, 1);
    }

    #[test]
    fn transcripts_are_last_write_wins() {
        let (index, stats) = build_index(
            &[
                object("host/2025-05-28/abc.json"),
                object("other/2025-05-29/abc.csv"),
            ],
            &config(),
        );
        // Ingestion order decides, not lexical order
        let transcript = index.transcript("abc").unwrap();
        assert_eq!(transcript.filename, "abc.csv");
        assert_eq!(stats.spaces_with_transcript, 1);
    }

    #[test]
    fn composite_key_uses_verbatim_path_segments() {
        // Host and date segments are not re-normalized at load time
        let (index, _) = build_index(&[object("HostName/2025-06-01/id42-title.aac")], &config());
        assert!(index.audio("HostName/2025-06-01/id42").is_some());
        assert!(index.audio("hostname/2025-06-01/id42").is_none());
    }

    #[test]
    fn size_and_modification_time_are_carried() {
        let listing = vec![RawObject {
            name: "host/2025-05-28/abc.mp3".to_string(),
            size: Some(1_920_000),
            last_modified: Some("2025-05-28T10:00:00Z".to_string()),
        }];
        let (index, _) = build_index(&listing, &config());
        let asset = &index.audio("abc").unwrap()[0];
        assert_eq!(asset.size_bytes, Some(1_920_000));
        assert_eq!(asset.last_modified.as_deref(), Some("2025-05-28T10:00:00Z"));
    }
}
