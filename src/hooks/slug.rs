//! Slug derivation for catalog documents.
//!
//! `slugify` normalizes any string into a URL-safe slug; `resolve_slug`
//! applies the override-then-fallback policy shared by the sluggable
//! collections.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for matching runs of whitespace
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Valid regex pattern"));

/// Regex for matching characters that may not appear in a slug
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("Valid regex pattern"));

/// Regex for matching runs of consecutive hyphens
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("Valid regex pattern"));

/// Normalize a string into a URL-safe slug.
///
/// Edge whitespace is trimmed first so it never turns into leading or
/// trailing hyphens. Whitespace runs become single hyphens, anything
/// that is not an ASCII word character or hyphen is removed, the result
/// is lower-cased, and hyphen runs are collapsed. Idempotent and total;
/// the worst case is an empty string.
pub fn slugify(input: &str) -> String {
    let trimmed = input.trim();
    let hyphenated = WHITESPACE_RUN.replace_all(trimmed, "-");
    let cleaned = DISALLOWED.replace_all(&hyphenated, "");
    let lowered = cleaned.to_lowercase();
    HYPHEN_RUN.replace_all(&lowered, "-").into_owned()
}

/// Derive the slug field for a document draft.
///
/// An explicit non-empty `value` wins and is normalized. Otherwise the
/// designated fallback field is read from the draft, then from the
/// stored document. With nothing to derive from, the input value passes
/// through unchanged; absence is not an error.
pub fn resolve_slug(
    value: Option<&str>,
    draft_fallback: Option<&str>,
    stored_fallback: Option<&str>,
) -> Option<String> {
    if let Some(explicit) = value {
        if !explicit.is_empty() {
            return Some(slugify(explicit));
        }
    }

    let fallback = draft_fallback
        .filter(|s| !s.is_empty())
        .or_else(|| stored_fallback.filter(|s| !s.is_empty()));

    match fallback {
        Some(field) => Some(slugify(field)),
        None => value.map(str::to_string),
    }
}
