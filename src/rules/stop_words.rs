// src/rules/stop_words.rs - Words carrying no identity in a topic name

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Articles, conjunctions, prepositions, and generic commerce words.
/// Removed after canonicalization; removal runs twice because a
/// canonicalized token may itself land on this list.
pub const STOP_WORDS: [&str; 49] = [
    // articles and conjunctions
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet",
    // prepositions
    "of", "to", "in", "on", "at", "by", "with", "without", "from", "as",
    "into", "about", "under", "over", "per", "vs", "versus",
    // generic commerce verbs and qualifiers
    "buy", "buying", "shop", "shopping", "purchase", "order", "get", "find",
    "choose", "best", "top", "good", "cheap", "cheapest", "affordable",
    "inexpensive", "quality", "rated", "popular", "recommended", "latest",
    "review", "reviews",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_articles_and_commerce_words_are_stopped() {
        for word in ["the", "best", "buy", "with", "cheap"] {
            assert!(is_stop_word(word), "{} should be a stop word", word);
        }
    }

    #[test]
    fn test_product_words_are_kept() {
        for word in ["laptop", "battery", "led", "light", "golf"] {
            assert!(!is_stop_word(word), "{} must never be stopped", word);
        }
    }
}
