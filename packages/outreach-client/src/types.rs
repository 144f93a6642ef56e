use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque bearer token returned by `/signin` and `/signup`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Body of a successful `/signin` or `/signup`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// Form body for `/signin` (OAuth2 password form, so the email goes in `username`).
#[derive(Debug, Serialize)]
pub(crate) struct SignInForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// JSON body for `/signup`.
#[derive(Debug, Serialize)]
pub(crate) struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// JSON body for `/extract`.
#[derive(Debug, Serialize)]
pub(crate) struct ExtractRequest<'a> {
    pub query: &'a str,
}

/// JSON body for `/feedback/{response_id}`.
#[derive(Debug, Serialize)]
pub(crate) struct FeedbackRequest {
    pub feedback: Feedback,
}

/// A person found on a source page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ContactInfo {
    /// The email address, if present and not blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// Everything the backend found for one source URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerSourceResult {
    #[serde(default)]
    pub socials: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub contacts: Vec<ContactInfo>,
    /// Relevance to the query, nominally 0-100. Not clamped.
    pub fit_score: f64,
    pub response_id: i64,
}

/// Response of `/extract` and `/query/{id}/responses`.
///
/// `contacts_found` keeps the order the backend produced; ranking ties fall
/// back to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub contacts_found: IndexMap<String, PerSourceResult>,
    /// Per-URL failures reported alongside the results.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub errors: IndexMap<String, String>,
}

impl ExtractionResult {
    pub fn len(&self) -> usize {
        self.contacts_found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts_found.is_empty()
    }
}

/// A previously run query, as listed by `/chat_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: i64,
    pub query_text: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Thumbs up / thumbs down on one source result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Positive,
    Negative,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Positive => "positive",
            Feedback::Negative => "negative",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body for `/generate_email`.
///
/// `query_id` is `null` for results that were never saved under an id
/// (the just-submitted flow).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRequest {
    pub query_id: Option<i64>,
    pub summary: String,
}

/// Draft returned by `/generate_email`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Accepts RFC 3339 timestamps and the naive ISO form the backend emits for
/// UTC columns (`2025-03-01T12:30:00.123456`).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_feedback_wire_format() {
        let body = serde_json::to_string(&FeedbackRequest {
            feedback: Feedback::Negative,
        })
        .unwrap();
        assert_eq!(body, r#"{"feedback":"negative"}"#);
    }

    #[test]
    fn test_query_record_accepts_naive_timestamp() {
        let record: QueryRecord = serde_json::from_str(
            r#"{"id": 7, "query_text": "dentists in Leeds", "created_at": "2025-03-01T12:30:00.5"}"#,
        )
        .unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(
            record.created_at.timestamp(),
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_query_record_accepts_rfc3339() {
        let record: QueryRecord = serde_json::from_str(
            r#"{"id": 1, "query_text": "q", "created_at": "2025-03-01T12:30:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2025, 3, 1, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_blank_email_is_ignored() {
        let contact = ContactInfo {
            email: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(contact.email(), None);
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AccessToken::new("secret");
        assert_eq!(format!("{:?}", token), "AccessToken(***)");
    }
}
