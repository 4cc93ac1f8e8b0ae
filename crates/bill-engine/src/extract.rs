//! Page text extraction from the PDF bill
//!
//! Wraps lopdf and exposes each page as an ordered sequence of trimmed,
//! non-empty lines. Also captures the billing-period label from the front
//! page ("Here's your bill for ...").

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::error::BillError;

lazy_static! {
    /// Billing-period phrase on the front page
    static ref BILLING_PERIOD_PATTERN: Regex =
        Regex::new(r"Here's your bill for\s+([^\n]+)").unwrap();
}

/// A loaded PDF bill.
#[derive(Debug)]
pub struct BillDocument {
    doc: lopdf::Document,
    page_count: usize,
}

impl BillDocument {
    /// Loads a bill from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BillError> {
        let path = path.as_ref();
        let doc = lopdf::Document::load(path).map_err(|e| BillError::Extraction {
            page: 0,
            reason: format!("failed to load {}: {}", path.display(), e),
        })?;
        let page_count = doc.get_pages().len();
        info!("Loaded {} ({} pages)", path.display(), page_count);
        Ok(Self { doc, page_count })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Raw text layer of the zero-based page.
    fn page_text(&self, page: usize) -> Result<String, BillError> {
        if page >= self.page_count {
            return Err(BillError::Extraction {
                page,
                reason: format!(
                    "page index out of range (document has {} pages)",
                    self.page_count
                ),
            });
        }
        self.doc
            .extract_text(&[page as u32 + 1])
            .map_err(|e| BillError::Extraction {
                page,
                reason: e.to_string(),
            })
    }

    /// Ordered, trimmed, non-empty lines of the zero-based page.
    ///
    /// An empty text layer (a scanned image with no embedded text) is an
    /// extraction failure, not an empty table.
    pub fn page_lines(&self, page: usize) -> Result<Vec<String>, BillError> {
        let text = self.page_text(page)?;
        let lines = lines_from_text(&text);
        if lines.is_empty() {
            return Err(BillError::Extraction {
                page,
                reason: "page has no text layer".to_string(),
            });
        }
        Ok(lines)
    }

    /// Extracts the billing-period label, e.g. "Apr 2025" out of
    /// "Here's your bill for Apr 2025."
    ///
    /// Absence is non-fatal; reporting falls back to a default label.
    pub fn billing_period(&self, page: usize) -> Option<String> {
        let text = match self.page_text(page) {
            Ok(text) => text,
            Err(err) => {
                warn!("Billing period extraction failed: {err}");
                return None;
            }
        };
        match BILLING_PERIOD_PATTERN.captures(&text) {
            Some(caps) => {
                let label = caps[1].trim().trim_end_matches('.').to_string();
                info!("Billing period extracted: {label}");
                Some(label)
            }
            None => {
                warn!("Billing period phrase not found in the document");
                None
            }
        }
    }
}

/// Splits raw page text into trimmed, non-empty lines.
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
