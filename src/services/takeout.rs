//! Watch-history extraction from a Google Takeout export
//!
//! The export is a JSON array of activity entries; the ones we care about
//! carry a `titleUrl` pointing at a video watch page. Malformed entries,
//! non-video URLs, and payloads that are not an array at all are skipped
//! without error.

use serde_json::Value;
use url::Url;

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Extracts the unique video ids out of a Takeout watch-history payload.
///
/// Deduplicating and idempotent: duplicate watch events collapse to one id,
/// and first-seen order is preserved.
pub fn extract_watched_ids(payload: &Value) -> Vec<String> {
    let Some(entries) = payload.as_array() else {
        tracing::warn!("Watch history payload is not an array, treating as empty");
        return vec![];
    };

    let mut ids = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for entry in entries {
        let Some(title_url) = entry.get("titleUrl").and_then(Value::as_str) else {
            continue;
        };
        if !title_url.starts_with(WATCH_URL_PREFIX) {
            continue;
        }
        let Ok(url) = Url::parse(title_url) else {
            tracing::debug!(url = %title_url, "Skipping unparsable watch URL");
            continue;
        };
        let Some(video_id) = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
        else {
            continue;
        };

        if seen.insert(video_id.clone()) {
            ids.push(video_id);
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_ids_from_watch_urls() {
        let payload = json!([
            { "title": "Watched A", "titleUrl": "https://www.youtube.com/watch?v=abc123" },
            { "title": "Watched B", "titleUrl": "https://www.youtube.com/watch?v=def456&t=10s" }
        ]);

        let ids = extract_watched_ids(&payload);
        assert_eq!(ids, vec!["abc123", "def456"]);
    }

    #[test]
    fn test_deduplicates_and_preserves_order() {
        let payload = json!([
            { "titleUrl": "https://www.youtube.com/watch?v=abc123" },
            { "titleUrl": "https://www.youtube.com/watch?v=def456" },
            { "titleUrl": "https://www.youtube.com/watch?v=abc123" }
        ]);

        let ids = extract_watched_ids(&payload);
        assert_eq!(ids, vec!["abc123", "def456"]);
    }

    #[test]
    fn test_idempotent_across_runs() {
        let payload = json!([
            { "titleUrl": "https://www.youtube.com/watch?v=abc123" },
            { "titleUrl": "https://www.youtube.com/watch?v=abc123" }
        ]);

        let first = extract_watched_ids(&payload);
        let second = extract_watched_ids(&payload);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_skips_non_watch_entries() {
        let payload = json!([
            { "title": "Searched for cats" },
            { "titleUrl": "https://www.youtube.com/channel/UC123" },
            { "titleUrl": "https://music.youtube.com/watch?v=nope" },
            { "titleUrl": "https://www.youtube.com/watch?v=keepme" }
        ]);

        let ids = extract_watched_ids(&payload);
        assert_eq!(ids, vec!["keepme"]);
    }

    #[test]
    fn test_malformed_entries_are_skipped_individually() {
        let payload = json!([
            { "titleUrl": 42 },
            null,
            "just a string",
            { "titleUrl": "https://www.youtube.com/watch?v=valid1" }
        ]);

        let ids = extract_watched_ids(&payload);
        assert_eq!(ids, vec!["valid1"]);
    }

    #[test]
    fn test_non_array_payload_yields_empty() {
        assert!(extract_watched_ids(&json!({"not": "an array"})).is_empty());
        assert!(extract_watched_ids(&json!("string")).is_empty());
        assert!(extract_watched_ids(&json!(null)).is_empty());
    }
}
