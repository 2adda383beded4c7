//! Filename tag extraction
//!
//! A fixed pattern run over the uppercased filename. It cannot tell an
//! equipment tag from any other short alphanumeric token.

use regex::Regex;
use std::sync::LazyLock;

/// One to three letters, optional hyphen, one to four digits, optional
/// trailing letter, between word boundaries. e.g. P-101, V203, LT-101A
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{1,3}-?\d{1,4}[A-Z]?)\b").unwrap());

/// All non-overlapping tag matches in `filename`, in order, duplicates kept.
pub fn extract_tags(filename: &str) -> Vec<String> {
    let upper = filename.to_uppercase();
    TAG_PATTERN
        .find_iter(&upper)
        .map(|m| m.as_str().to_string())
        .collect()
}
