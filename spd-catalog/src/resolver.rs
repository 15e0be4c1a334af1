//! Tiered asset resolution
//!
//! Answers "what audio (and transcript) exists for this space?" against one
//! fixed [`CatalogIndex`] snapshot. Several historical naming schemes
//! coexist in the storage bucket, so resolution walks an explicit, ordered
//! list of fallback strategies instead of nested conditionals, so a new
//! historical scheme is appended as a tier without touching existing ones.
//!
//! # Tiers
//!
//! 1. **Direct**: bare canonical identifier lookup; needs no hints.
//! 2. **Composite**: `normalized_host/iso_date/identifier` lookup; needs
//!    both the host and creation-time hints.
//! 3. **ExpectedPath**: reconstruct the path the uploader would have
//!    written for each recognized audio extension in order and scan the
//!    index for a URL match; audio only.
//!
//! A miss in every tier is a valid "not found" outcome, never an error.
//!
//! The resolver is pure with respect to the index: it never mutates it,
//! performs no I/O, and is safe to call repeatedly for many spaces against
//! one snapshot.

use crate::loader::CatalogIndex;
use crate::types::{AudioAsset, CatalogConfig, TranscriptAsset};
use spd_common::time::{iso_date, parse_timestamp};
use tracing::debug;

/// One fallback strategy step in the resolution pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTier {
    /// Bare canonical-identifier lookup
    Direct,
    /// Normalized `host/date/identifier` lookup
    Composite,
    /// Expected-path reconstruction and URL scan
    ExpectedPath,
}

impl LookupTier {
    /// Tier name for logs and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupTier::Direct => "direct",
            LookupTier::Composite => "composite",
            LookupTier::ExpectedPath => "expected-path",
        }
    }
}

/// Audio tier order; extension order within the expected-path tier follows
/// the configured extension list
const AUDIO_TIERS: [LookupTier; 3] = [
    LookupTier::Direct,
    LookupTier::Composite,
    LookupTier::ExpectedPath,
];

/// Transcripts have no expected-path equivalent
const TRANSCRIPT_TIERS: [LookupTier; 2] = [LookupTier::Direct, LookupTier::Composite];

/// Successful audio resolution: the assets plus the tier that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct AudioLookup {
    pub assets: Vec<AudioAsset>,
    pub tier: LookupTier,
}

/// Successful transcript resolution
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLookup {
    pub asset: TranscriptAsset,
    pub tier: LookupTier,
}

/// Both hints, validated: the composite and expected-path tiers need the
/// host name and a parseable creation timestamp together
struct Hints {
    host: String,
    iso_date: String,
}

impl Hints {
    fn parse(host: Option<&str>, created_at: Option<&str>) -> Option<Self> {
        let host = host?;
        let raw = created_at?;
        let Some(ts) = parse_timestamp(raw) else {
            // Old-schema records can carry timestamps no parser recognizes;
            // treat as a missing hint, not an error
            debug!(created_at = raw, "Unparseable creation timestamp, hint ignored");
            return None;
        };
        Some(Self {
            host: host.to_string(),
            iso_date: iso_date(&ts),
        })
    }
}

/// Tiered resolver over one index snapshot
pub struct Resolver<'a> {
    index: &'a CatalogIndex,
    config: &'a CatalogConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a CatalogIndex, config: &'a CatalogConfig) -> Self {
        Self { index, config }
    }

    /// Resolve the audio assets for a space.
    ///
    /// `host` and `created_at` are optional hints; without both, only the
    /// direct tier applies. Returns `None` when every tier misses.
    pub fn resolve_audio(
        &self,
        id: &str,
        host: Option<&str>,
        created_at: Option<&str>,
    ) -> Option<AudioLookup> {
        let hints = Hints::parse(host, created_at);

        for tier in AUDIO_TIERS {
            let assets = match tier {
                LookupTier::Direct => self.index.audio(id).map(<[AudioAsset]>::to_vec),
                LookupTier::Composite => hints.as_ref().and_then(|h| {
                    self.composite_keys(id, h)
                        .iter()
                        .find_map(|key| self.index.audio(key))
                        .map(<[AudioAsset]>::to_vec)
                }),
                LookupTier::ExpectedPath => hints
                    .as_ref()
                    .and_then(|h| self.probe_expected_paths(id, h)),
            };

            if let Some(assets) = assets {
                debug!(
                    id,
                    tier = tier.as_str(),
                    asset_count = assets.len(),
                    "Audio resolved"
                );
                return Some(AudioLookup { assets, tier });
            }
        }

        debug!(id, "Audio not found in any tier");
        None
    }

    /// Resolve the transcript for a space. Tiers 1–2 only.
    pub fn resolve_transcript(
        &self,
        id: &str,
        host: Option<&str>,
        created_at: Option<&str>,
    ) -> Option<TranscriptLookup> {
        let hints = Hints::parse(host, created_at);

        for tier in TRANSCRIPT_TIERS {
            let asset = match tier {
                LookupTier::Direct => self.index.transcript(id).cloned(),
                LookupTier::Composite => hints.as_ref().and_then(|h| {
                    self.composite_keys(id, h)
                        .iter()
                        .find_map(|key| self.index.transcript(key))
                        .cloned()
                }),
                // No expected-path tier for transcripts
                LookupTier::ExpectedPath => None,
            };

            if let Some(asset) = asset {
                debug!(id, tier = tier.as_str(), "Transcript resolved");
                return Some(TranscriptLookup { asset, tier });
            }
        }

        None
    }

    /// Predict the storage path the uploader would write for this space.
    ///
    /// Diagnostic only: with both hints this is the expected-path shape the
    /// probe tier checks; without them the `spaces/<id><ext>` fallback is
    /// shown to the operator and never looked up.
    pub fn predict_storage_path(
        &self,
        id: &str,
        host: Option<&str>,
        created_at: Option<&str>,
        extension: &str,
    ) -> String {
        match Hints::parse(host, created_at) {
            Some(hints) => expected_storage_path(&hints.host, &hints.iso_date, id, extension),
            None => format!("spaces/{}{}", id, extension),
        }
    }

    /// Composite lookup keys, in probe order.
    ///
    /// Load-time composite keys keep the path's host segment verbatim while
    /// the hint is normalized, so a second candidate with `@`/`=` stripped
    /// but case preserved keeps old mixed-case layouts reachable.
    fn composite_keys(&self, id: &str, hints: &Hints) -> Vec<String> {
        let normalized = normalize_host(&hints.host);
        let stripped = strip_host_markers(&hints.host);

        let mut keys = vec![format!("{}/{}/{}", normalized, hints.iso_date, id)];
        if stripped != normalized {
            keys.push(format!("{}/{}/{}", stripped, hints.iso_date, id));
        }
        keys
    }

    /// Expected-path probe: reconstruct the upload path per recognized
    /// extension and scan every indexed asset for a URL match. First match
    /// wins; extension iteration order is the configured list order.
    fn probe_expected_paths(&self, id: &str, hints: &Hints) -> Option<Vec<AudioAsset>> {
        for extension in &self.config.audio_extensions {
            let path = expected_storage_path(&hints.host, &hints.iso_date, id, extension);
            let url = format!("{}{}", self.config.storage_base_url, path);
            if let Some(asset) = self.index.iter_audio().find(|asset| asset.url == url) {
                return Some(vec![asset.clone()]);
            }
        }
        None
    }
}

/// Remove the literal `@` and `=` markers host handles carry
fn strip_host_markers(host: &str) -> String {
    host.chars().filter(|c| *c != '@' && *c != '=').collect()
}

/// Composite-tier host normalization: marker stripping plus lower-casing
fn normalize_host(host: &str) -> String {
    strip_host_markers(host).to_lowercase()
}

/// The path the uploader is expected to have written:
/// `<sanitized_host>/<iso_date>/<id><extension>`
fn expected_storage_path(host: &str, iso_date: &str, id: &str, extension: &str) -> String {
    format!(
        "{}/{}/{}{}",
        sanitize_host_segment(host),
        iso_date,
        id,
        extension
    )
}

/// Sanitize a host name into a storage path segment the uploader would
/// produce: strip `@`, substitute every character outside
/// `[A-Za-z0-9\-_./]` with `-`, collapse `-` runs, trim leading/trailing
/// `-`, truncate to 50 characters, `unknown` if nothing is left.
fn sanitize_host_segment(host: &str) -> String {
    let substituted: String = host
        .chars()
        .filter(|c| *c != '@')
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(substituted.len());
    for c in substituted.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    let segment: String = collapsed.trim_matches('-').chars().take(50).collect();
    if segment.is_empty() {
        "unknown".to_string()
    } else {
        segment
    }
}
