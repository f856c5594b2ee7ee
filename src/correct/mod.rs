//! Typo correction by fuzzy matching against reference lists.

mod names;

pub use names::{normalize_name, prefix_candidates};

use tracing::debug;

/// A suggestion must score strictly above this.
pub const MIN_SCORE: u8 = 50;

/// Similarity in `0..=100` derived from the normalized Levenshtein distance.
/// Case is ignored.
pub fn similarity(a: &str, b: &str) -> u8 {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    if a == b {
        return 100;
    }
    let distance = textdistance::nstr::levenshtein(&a, &b);
    ((1.0 - distance) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Highest-scoring candidate, earliest one on ties.
fn best_match<'a, I>(needle: &str, candidates: I) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, u8)> = None;
    for candidate in candidates {
        let score = similarity(needle, candidate);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best
}

/// Closest known domain sharing the first character of `bad_domain`.
///
/// The first-character filter (case-insensitive) means a typo on the first
/// letter never gets a correction.
pub fn suggest_domain<'a, I>(bad_domain: &str, known_domains: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let first = bad_domain.chars().next()?;
    let candidates = known_domains.into_iter().filter(|d| {
        d.chars()
            .next()
            .is_some_and(|c| c.to_lowercase().eq(first.to_lowercase()))
    });
    let (domain, score) = best_match(bad_domain, candidates)?;
    debug!(bad_domain, candidate = domain, score, "domain correction candidate");
    (score > MIN_SCORE).then(|| domain.to_string())
}

/// Closest name-derived local part for a mailbox that was not found.
pub fn suggest_prefix(surname: &str, given_name: &str, bad_prefix: &str) -> Option<String> {
    let candidates = prefix_candidates(surname, given_name);
    let (prefix, score) = best_match(bad_prefix, candidates.iter().map(String::as_str))?;
    debug!(bad_prefix, candidate = prefix, score, "prefix correction candidate");
    (score > MIN_SCORE).then(|| prefix.to_string())
}
