//! External API record types
//!
//! `SpaceRecord` is supplied by the spaces REST API and is not owned by this
//! codebase. The API has gone through several schema revisions; old records
//! use different field spellings, which the serde aliases below keep
//! readable. The catalog core only consumes `id`, `host`, and `created_at`;
//! the remaining fields ride along for the presentation layer.

use serde::{Deserialize, Serialize};

/// One live or recorded audio room, as returned by the spaces endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpaceRecord {
    /// Space identifier (opaque string minted by the API)
    #[serde(alias = "space_id")]
    pub id: String,

    /// Host account name; old-schema records spell this `creator` or
    /// `host_handle`, and very old records omit it entirely
    #[serde(default, alias = "creator", alias = "host_handle")]
    pub host: Option<String>,

    /// Creation timestamp as a string; format varies by schema age
    #[serde(default, alias = "started_at")]
    pub created_at: Option<String>,

    /// Display title
    #[serde(default)]
    pub title: Option<String>,

    /// Lifecycle state reported by the API (e.g. "live", "ended")
    #[serde(default)]
    pub state: Option<String>,

    /// Whether the space was private
    #[serde(default)]
    pub is_private: Option<bool>,

    /// Whether the host enabled recording
    #[serde(default)]
    pub is_recorded: Option<bool>,

    /// Listener count at last poll
    #[serde(default)]
    pub participant_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_schema_deserializes() {
        let json = r#"{
            "id": "1vOxwrZYjlkxB",
            "host": "@somehost",
            "created_at": "2025-06-01T08:00:00Z",
            "title": "Morning show",
            "state": "ended",
            "is_recorded": true,
            "participant_count": 42
        }"#;
        let record: SpaceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1vOxwrZYjlkxB");
        assert_eq!(record.host.as_deref(), Some("@somehost"));
        assert_eq!(record.is_recorded, Some(true));
    }

    #[test]
    fn test_old_schema_aliases() {
        // Old records spell host/created_at differently
        let json = r#"{
            "space_id": "abc123",
            "creator": "HostName",
            "started_at": "2024-11-03 14:05:00"
        }"#;
        let record: SpaceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "abc123");
        assert_eq!(record.host.as_deref(), Some("HostName"));
        assert_eq!(record.created_at.as_deref(), Some("2024-11-03 14:05:00"));
        assert!(record.title.is_none());
    }

    #[test]
    fn test_minimal_record() {
        // Only the identifier is guaranteed
        let record: SpaceRecord = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(record.id, "x");
        assert!(record.host.is_none());
        assert!(record.created_at.is_none());
    }
}
