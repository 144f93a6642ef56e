//! View-level types derived from backend data.

use outreach_client::{ContactInfo, ExtractionResult, PerSourceResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

// ============================================================================
// Query capture
// ============================================================================

/// A query staged for the extraction stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQuery {
    pub text: String,
    pub attachment_names: Vec<String>,
}

/// A file picked alongside the query. Only its name ever leaves the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub size_bytes: u64,
}

impl Attachment {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Build from a file on disk: its file name and current size.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, metadata.len()))
    }

    /// Size in KB with one decimal, e.g. `12.3 KB`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Colour bucket for a fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitBand {
    High,
    Medium,
    Low,
}

impl FitBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            FitBand::High
        } else if score >= 40.0 {
            FitBand::Medium
        } else {
            FitBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitBand::High => "High fit",
            FitBand::Medium => "Medium fit",
            FitBand::Low => "Low fit",
        }
    }
}

/// One source URL from an extraction, as the results view shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub url: String,
    pub name: String,
    pub summary: String,
    pub socials: Vec<String>,
    pub contacts: Vec<ContactInfo>,
    pub fit_score: f64,
    pub response_id: i64,
}

impl Company {
    pub fn from_source(url: &str, source: &PerSourceResult) -> Self {
        Self {
            url: url.to_string(),
            name: display_name(url),
            summary: source.summary.clone(),
            socials: source.socials.clone(),
            contacts: source.contacts.clone(),
            fit_score: source.fit_score,
            response_id: source.response_id,
        }
    }

    /// Every non-blank contact email, in contact order.
    pub fn emails(&self) -> Vec<String> {
        self.contacts
            .iter()
            .filter_map(ContactInfo::email)
            .map(str::to_string)
            .collect()
    }

    pub fn fit_band(&self) -> FitBand {
        FitBand::from_score(self.fit_score)
    }
}

/// Flatten an extraction into companies, highest fit score first.
///
/// The sort is stable, so equal scores keep the backend's key order.
pub fn rank_companies(result: &ExtractionResult) -> Vec<Company> {
    let mut companies: Vec<Company> = result
        .contacts_found
        .iter()
        .map(|(url, source)| Company::from_source(url, source))
        .collect();

    companies.sort_by(|a, b| {
        b.fit_score
            .partial_cmp(&a.fit_score)
            .unwrap_or(Ordering::Equal)
    });
    companies
}

/// `https://www.acme.com/about` -> `acme.com`; anything unparseable is shown as-is.
fn display_name(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .map(|host| host.trim_start_matches("www.").to_string())
        .unwrap_or_else(|| url.to_string())
}
