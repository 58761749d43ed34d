//! Identifier derivation from human-readable names.
//!
//! # Invariants
//! - Output only contains `[a-z0-9]` and single `-` separators.
//! - Output never starts or ends with `-`.

use once_cell::sync::Lazy;
use regex::Regex;

static RECIPE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid recipe id regex"));

/// Converts a name into a URL-safe identifier.
///
/// `&` is spelled out as `and`. Non-ASCII letters are transliterated
/// (`è` -> `e`, `日` -> `ri`); every other non-alphanumeric run becomes one `-`.
pub fn slugify(name: &str) -> String {
    ::slug::slugify(name.replace('&', " and "))
}

/// Returns whether `id` has the shape produced by [`slugify`].
pub fn is_valid_id(id: &str) -> bool {
    RECIPE_ID_RE.is_match(id)
}
