// src/rules/context.rs - Context-dependent tautology reduction
//
// Asymmetric trigger rules: when the trigger token is present in a word
// set, every token on its reduction list is removed ("laptop computer" ->
// "laptop"). This is a final pass over the already-normalized set and is
// deliberately separate from the 1:1 canonical map - the listed tokens are
// only redundant NEXT TO the trigger, not in general. Real qualifiers
// ("led", "light", brand words other than implied ones) are never listed.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static CONTEXT_REDUCTIONS: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        let table: &[(&str, &[&str])] = &[
            ("laptop", &["computer", "pc", "notebook"]),
            ("macbook", &["laptop", "computer", "apple"]),
            ("imac", &["desktop", "computer", "apple"]),
            ("chromebook", &["laptop", "computer"]),
            ("desktop", &["computer", "pc"]),
            ("vacuum", &["cleaner"]),
            ("iphone", &["phone", "apple"]),
            ("ipad", &["tablet", "apple"]),
            ("tv", &["set"]),
            ("car", &["vehicle"]),
            ("truck", &["vehicle"]),
            ("suv", &["car", "vehicle"]),
            ("dog", &["pet"]),
            ("cat", &["pet"]),
            ("puppy", &["dog", "pet"]),
            ("kitten", &["cat", "pet"]),
            ("sneaker", &["shoe"]),
        ];
        table.iter().copied().collect()
    });

/// Tokens made redundant by the presence of `trigger`, if any.
pub fn context_reductions_for(trigger: &str) -> Option<&'static [&'static str]> {
    CONTEXT_REDUCTIONS.get(trigger).copied()
}
