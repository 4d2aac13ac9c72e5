// src/rules/plural.rs - Suffix-based plural reduction
//
// Runs per token after the first canonical pass, so irregular plurals have
// already been mapped away. Patterns are ordered most-specific first; the
// first matching suffix wins. Tokens whose stem would drop below two
// characters, tokens ending in "ss"/"us"/"is", and the explicit exception
// set are left untouched.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// (suffix, replacement, minimum stem length before the suffix)
const PLURAL_PATTERNS: [(&str, &str, usize); 8] = [
    ("sses", "ss", 2),
    ("shes", "sh", 2),
    ("ches", "ch", 2),
    ("xes", "x", 2),
    ("zzes", "zz", 2),
    ("zes", "ze", 2),
    ("ies", "y", 2),
    ("oes", "o", 2),
];

/// Tokens that look plural but are not, or that strip incorrectly.
static PLURAL_EXCEPTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "gas", "lens", "news", "christmas", "atlas", "canvas", "texas",
        "adidas", "series", "species", "tennis", "pants", "scissors",
    ]
    .into_iter()
    .collect()
});

/// "oes" forms where the singular keeps the "e".
static OES_IRREGULARS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [("shoes", "shoe"), ("toes", "toe"), ("canoes", "canoe"), ("oboes", "oboe")]
        .into_iter()
        .collect()
});

pub fn singularize(token: &str) -> String {
    if PLURAL_EXCEPTIONS.contains(token) {
        return token.to_string();
    }
    if let Some(singular) = OES_IRREGULARS.get(token) {
        return singular.to_string();
    }
    for (suffix, replacement, min_stem) in PLURAL_PATTERNS {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem.len() >= min_stem {
                return format!("{}{}", stem, replacement);
            }
        }
    }
    // plain "-s", guarded against short words and protected endings
    if token.len() >= 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_suffixes() {
        assert_eq!(singularize("batteries"), "battery");
        assert_eq!(singularize("watches"), "watch");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("glasses"), "glass");
        assert_eq!(singularize("brushes"), "brush");
        assert_eq!(singularize("potatoes"), "potato");
        assert_eq!(singularize("sizes"), "size");
    }

    #[test]
    fn test_plain_s() {
        assert_eq!(singularize("lights"), "light");
        assert_eq!(singularize("smartwatches"), "smartwatch");
        assert_eq!(singularize("ties"), "tie");
        assert_eq!(singularize("shoes"), "shoe");
    }

    #[test]
    fn test_protected_endings() {
        assert_eq!(singularize("wireless"), "wireless");
        assert_eq!(singularize("cordless"), "cordless");
        assert_eq!(singularize("glass"), "glass");
        assert_eq!(singularize("cactus"), "cactus");
        assert_eq!(singularize("tennis"), "tennis");
    }

    #[test]
    fn test_exceptions_and_short_words() {
        assert_eq!(singularize("gas"), "gas");
        assert_eq!(singularize("news"), "news");
        assert_eq!(singularize("christmas"), "christmas");
        assert_eq!(singularize("as"), "as");
        assert_eq!(singularize("tv"), "tv");
    }
}
