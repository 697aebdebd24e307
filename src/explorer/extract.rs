//! Structural extraction of decoded call data from explorer pages.
//!
//! # Design Decisions
//! - The heuristic is deliberately brittle: any upstream layout change
//!   degrades to "not found" rather than failing loudly
//! - Extraction is behind a trait so the heuristic can be swapped or
//!   tested against fixture documents without touching fetch logic

use scraper::{ElementRef, Html, Selector};

/// Display text for the distinguished "nothing matched" outcome.
pub const NOT_FOUND_TEXT: &str = "No decoded input data found.";

/// Outcome of a decode lookup. `NotFound` is a normal result, not an
/// error: the page was fetched but no decodable fields matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedInput {
    /// Extracted call-data text blocks, newline-separated.
    Decoded(String),
    /// Page fetched successfully but no decodable fields matched.
    NotFound,
}

impl DecodedInput {
    pub fn is_found(&self) -> bool {
        matches!(self, DecodedInput::Decoded(_))
    }

    /// The user-facing text for this outcome.
    pub fn as_text(&self) -> &str {
        match self {
            DecodedInput::Decoded(text) => text,
            DecodedInput::NotFound => NOT_FOUND_TEXT,
        }
    }
}

impl std::fmt::Display for DecodedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Capability to pull decoded call data out of a rendered page.
pub trait DecodedInputExtractor: Send + Sync {
    /// Extract decoded call-data text from an HTML document.
    ///
    /// Returns `None` when the document structure holds nothing usable.
    fn extract(&self, document: &str) -> Option<String>;
}

/// Extractor for Etherscan-style transaction pages.
///
/// Locates a heading whose text contains "More Details", then scans
/// its following sibling `div` blocks in document order for text
/// containing "Function" or "MethodID". Matching blocks are
/// concatenated in encounter order, separated by line breaks.
#[derive(Debug, Default, Clone)]
pub struct EtherscanExtractor;

impl DecodedInputExtractor for EtherscanExtractor {
    fn extract(&self, document: &str) -> Option<String> {
        let html = Html::parse_document(document);
        let heading_selector = Selector::parse("h2").expect("static selector");

        for heading in html.select(&heading_selector) {
            let heading_text: String = heading.text().collect();
            if !heading_text.contains("More Details") {
                continue;
            }

            let mut blocks = Vec::new();
            for sibling in heading.next_siblings() {
                let Some(element) = ElementRef::wrap(sibling) else {
                    continue;
                };
                if element.value().name() != "div" {
                    continue;
                }
                let text: String = element.text().collect();
                let text = text.trim();
                if text.contains("Function") || text.contains("MethodID") {
                    blocks.push(text.to_string());
                }
            }

            if !blocks.is_empty() {
                return Some(blocks.join("\n"));
            }
        }

        None
    }
}
