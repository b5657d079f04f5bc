use serde::{Deserialize, Serialize};

use crate::null_as_empty;

/// A single observed reference to the tracked brand, as served by the backend.
///
/// Text fields the backend leaves `null` deserialize to `""`. `published_at`
/// is kept in the backend's serialized form; it is never used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published_at: String,
    /// Free-form label from the backend classifier. See [`Sentiment::classify`].
    #[serde(default)]
    pub sentiment: Option<String>,
    /// Estimated audience size.
    #[serde(default)]
    pub reach: Option<f64>,
    /// Opaque topic-cluster label assigned by the backend.
    #[serde(default)]
    pub cluster_id: Option<i64>,
}

impl Mention {
    #[must_use]
    pub fn sentiment_class(&self) -> Sentiment {
        Sentiment::classify(self.sentiment.as_deref())
    }
}

/// Coarse sentiment classification of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Classifies a raw backend label.
    ///
    /// `positive` and `negative` match case-insensitively; any other label,
    /// and a missing one, is neutral.
    #[must_use]
    pub fn classify(label: Option<&str>) -> Self {
        match label {
            Some(l) if l.eq_ignore_ascii_case("positive") => Sentiment::Positive,
            Some(l) if l.eq_ignore_ascii_case("negative") => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Request body for `POST {api_base}/mentions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMention {
    pub source: String,
    pub source_id: String,
    pub author: String,
    pub text: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reach: Option<f64>,
}

/// Backend acknowledgement for a created mention.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedMention {
    pub status: String,
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_known_labels_case_insensitively() {
        assert_eq!(Sentiment::classify(Some("positive")), Sentiment::Positive);
        assert_eq!(Sentiment::classify(Some("NEGATIVE")), Sentiment::Negative);
        assert_eq!(Sentiment::classify(Some("Positive")), Sentiment::Positive);
    }

    #[test]
    fn classify_treats_unknown_and_missing_as_neutral() {
        assert_eq!(Sentiment::classify(Some("mixed")), Sentiment::Neutral);
        assert_eq!(Sentiment::classify(Some("")), Sentiment::Neutral);
        assert_eq!(Sentiment::classify(None), Sentiment::Neutral);
    }

    #[test]
    fn mention_deserializes_backend_payload() {
        let mention: Mention = serde_json::from_value(serde_json::json!({
            "id": 7,
            "source": "twitter",
            "source_id": "mock-10",
            "author": "user_1",
            "text": "This is a live test mention",
            "url": "https://twitter.com/mock/1",
            "published_at": "2025-11-14T18:30:00",
            "sentiment": "positive",
            "reach": 500.0,
            "cluster_id": 3
        }))
        .expect("valid mention");

        assert_eq!(mention.id, 7);
        assert_eq!(mention.source, "twitter");
        assert_eq!(mention.reach, Some(500.0));
        assert_eq!(mention.cluster_id, Some(3));
        assert_eq!(mention.sentiment_class(), Sentiment::Positive);
    }

    #[test]
    fn mention_nulls_become_empty_strings() {
        let mention: Mention = serde_json::from_value(serde_json::json!({
            "id": 1,
            "source": "reddit",
            "source_id": "abc",
            "author": null,
            "text": "hello",
            "url": null,
            "published_at": null,
            "sentiment": null,
            "reach": null,
            "cluster_id": null
        }))
        .expect("nullable fields should be accepted");

        assert_eq!(mention.author, "");
        assert_eq!(mention.url, "");
        assert_eq!(mention.published_at, "");
        assert!(mention.sentiment.is_none());
        assert!(mention.reach.is_none());
        assert!(mention.cluster_id.is_none());
    }

    #[test]
    fn mention_requires_id() {
        let result = serde_json::from_value::<Mention>(serde_json::json!({ "text": "no id" }));
        assert!(result.is_err());
    }

    #[test]
    fn new_mention_omits_unset_optionals() {
        let body = serde_json::to_value(NewMention {
            source: "cli".to_string(),
            text: "hi".to_string(),
            ..NewMention::default()
        })
        .unwrap();

        assert!(body.get("sentiment").is_none());
        assert!(body.get("published_at").is_none());
        assert_eq!(body["source"], "cli");
    }
}
