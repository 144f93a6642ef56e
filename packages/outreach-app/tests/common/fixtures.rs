//! Backend payloads used across the stage tests.

use chrono::{TimeZone, Utc};
use outreach_client::{ContactInfo, ExtractionResult, PerSourceResult, QueryRecord};

pub fn contact(name: &str, email: Option<&str>) -> ContactInfo {
    ContactInfo {
        name: Some(name.to_string()),
        designation: None,
        email: email.map(str::to_string),
        phone: None,
    }
}

pub fn source(fit_score: f64, response_id: i64, contacts: Vec<ContactInfo>) -> PerSourceResult {
    PerSourceResult {
        socials: vec![],
        summary: format!("Summary for response {}", response_id),
        contacts,
        fit_score,
        response_id,
    }
}

pub fn extraction(entries: Vec<(&str, PerSourceResult)>) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    for (url, source) in entries {
        result.contacts_found.insert(url.to_string(), source);
    }
    result
}

/// Three companies in backend order: acme (42), globex (91), initech (67).
///
/// Initech has no usable email.
pub fn sample_extraction() -> ExtractionResult {
    extraction(vec![
        (
            "https://www.acme.example",
            source(42.0, 101, vec![contact("Wile", Some("wile@acme.example"))]),
        ),
        (
            "https://globex.example/about",
            source(
                91.0,
                102,
                vec![
                    contact("Hank", Some("hank@globex.example")),
                    contact("Frank", None),
                    contact("Mona", Some("mona@globex.example")),
                ],
            ),
        ),
        (
            "https://initech.example",
            source(67.0, 103, vec![contact("Bill", Some("  "))]),
        ),
    ])
}

pub fn query_record(id: i64, text: &str, day: u32) -> QueryRecord {
    QueryRecord {
        id,
        query_text: text.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap(),
    }
}
