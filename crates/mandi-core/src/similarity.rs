//! Edit-distance-based string similarity.
//!
//! Used as a last-resort signal when exact containment matching fails:
//! the per-shop matcher ranks non-exact candidates by this score and keeps
//! the ones above [`crate::matcher::SIMILARITY_THRESHOLD`].

/// Normalized similarity between two strings in `[0, 1]`.
///
/// Inputs are lower-cased here; callers strip punctuation beforehand if
/// their data needs it, keeping this primitive reusable for both product
/// and ingredient shapes. The score is
/// `(max_len - levenshtein(a, b)) / max_len`, so 1.0 means equal (after
/// lower-casing) and 0.0 means nothing in common. Two empty strings score
/// 1.0 rather than dividing by zero.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein(&a, &b);
    #[allow(clippy::cast_precision_loss)]
    {
        (max_len - distance) as f64 / max_len as f64
    }
}

/// Classic dynamic-programming Levenshtein distance; insertion, deletion,
/// and substitution each cost 1. Rolls two rows instead of the full
/// `(len(b)+1) x (len(a)+1)` table.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr: Vec<usize> = vec![0; a.len() + 1];

    for (i, bc) in b.iter().enumerate() {
        curr[0] = i + 1;
        for (j, ac) in a.iter().enumerate() {
            let substitution_cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j] + substitution_cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}
