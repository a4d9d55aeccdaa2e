//! Text normalization shared by both matching strategies.
//!
//! The per-shop strategy only lower-cases; the flat-catalog strategy
//! additionally strips punctuation down to `[a-z0-9 ]` and collapses
//! whitespace. Both sides of a comparison must always go through the same
//! helper.

/// Lower-cases and trims surrounding whitespace. The comparison form used by
/// the per-shop scan.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Lower-cases, replaces every character outside `[a-z0-9\s]` with a space,
/// collapses runs of whitespace, and trims. The comparison form used by the
/// flat-catalog scan, where product names carry units and punctuation
/// ("Amul Paneer (200g)").
#[must_use]
pub fn normalize_loose(s: &str) -> String {
    let spaced: String = s
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Minimum character length for a token to count toward overlap. Two-letter
/// fragments ("of", "1l") match far too promiscuously.
pub const MIN_TOKEN_LEN: usize = 3;

/// Counts tokens longer than two characters that appear in both
/// already-normalized strings. Duplicate tokens count once.
#[must_use]
pub fn shared_token_count(a: &str, b: &str) -> usize {
    use std::collections::HashSet;

    let tokens_a: HashSet<&str> = a
        .split_whitespace()
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .collect();
    b.split_whitespace()
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .collect::<HashSet<&str>>()
        .intersection(&tokens_a)
        .count()
}
