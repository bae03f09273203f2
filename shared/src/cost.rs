//! Cost label parsing
//!
//! Activity costs arrive as user- or AI-authored display strings, not a
//! validated format: `"₱1,500"`, `"Free"`, `"Entrance fee: ₱250 per pax"`,
//! or garbage. Parsing is total — malformed input degrades to 0 instead of
//! erroring, because a bad label must never poison a trip's derived totals.

use regex_lite::Regex;
use std::sync::OnceLock;

/// First maximal run of digits and group separators.
fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9][0-9,]*").unwrap())
}

/// Extract a non-negative integer amount from a free-form cost label.
///
/// Rules:
/// - `None`, empty/whitespace, or case-insensitive `"free"` → 0
/// - otherwise the first digit run (group separators stripped) parsed base-10
/// - no digit run → 0
pub fn parse_cost(label: Option<&str>) -> u32 {
    let label = match label {
        Some(l) => l.trim(),
        None => return 0,
    };
    if label.is_empty() || label.eq_ignore_ascii_case("free") {
        return 0;
    }

    match amount_pattern().find(label) {
        Some(run) => {
            let digits: String = run
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            // Overflow only on absurd labels; clamp rather than error.
            digits.parse::<u32>().unwrap_or(u32::MAX)
        }
        None => 0,
    }
}

/// Convenience wrapper for the common borrowed-string case
pub fn parse_cost_str(label: &str) -> u32 {
    parse_cost(Some(label))
}
