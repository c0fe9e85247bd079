//! Text helpers for client names.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Decompose (NFD) and drop every combining mark: `Åsa` → `Asa`.
pub fn fold_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Ordering key: case and accent insensitive.
pub fn sort_key(name: &str) -> String {
    fold_accents(name).to_lowercase()
}
