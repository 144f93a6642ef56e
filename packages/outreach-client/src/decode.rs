//! Validated decoding of backend response bodies.
//!
//! Every 2xx body passes through here before it reaches a caller. A body that
//! does not match the documented shape becomes [`ClientError::MalformedResponse`]
//! instead of leaking half-filled values into the views.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ClientError, Result};
use crate::types::{AccessToken, EmailDraft, ExtractionResult, QueryRecord, TokenResponse};

fn parse<T: DeserializeOwned>(bytes: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| ClientError::MalformedResponse(format!("{}: {}", what, e)))
}

/// Decode a `/signin` or `/signup` body into its token.
pub fn access_token(bytes: &[u8]) -> Result<AccessToken> {
    let response: TokenResponse = parse(bytes, "token response")?;
    if response.access_token.trim().is_empty() {
        return Err(ClientError::MalformedResponse(
            "token response: empty access_token".into(),
        ));
    }
    Ok(AccessToken::new(response.access_token))
}

/// Decode an extraction body (`/extract`, `/query/{id}/responses`, or the
/// locally cached copy of either).
pub fn extraction_result(bytes: &[u8]) -> Result<ExtractionResult> {
    let result: ExtractionResult = parse(bytes, "extraction result")?;

    for (url, source) in &result.contacts_found {
        if url.trim().is_empty() {
            return Err(ClientError::MalformedResponse(
                "extraction result: empty source url".into(),
            ));
        }
        if !source.fit_score.is_finite() {
            return Err(ClientError::MalformedResponse(format!(
                "extraction result: non-finite fit_score for {}",
                url
            )));
        }
    }

    Ok(result)
}

/// Decode a `/chat_history` body.
pub fn query_records(bytes: &[u8]) -> Result<Vec<QueryRecord>> {
    parse(bytes, "chat history")
}

/// Decode a `/generate_email` body.
pub fn email_draft(bytes: &[u8]) -> Result<EmailDraft> {
    parse(bytes, "email draft")
}

/// Pull the string `detail` out of an error body, if there is one.
pub fn error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}
