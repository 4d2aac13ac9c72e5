// src/rules/canonical.rs - Canonical word map
//
// One token in, one token out: irregular plurals, British/American spelling
// unification, and strict synonyms. Applied twice by the normalizer - once
// on raw tokens and once after plural reduction, because singularizing can
// expose a mapped form ("smartphones" -> "smartphone" -> "phone").
// Brand words never appear here; "iphone" stays "iphone".

use once_cell::sync::Lazy;
use std::collections::HashMap;

static CANONICAL_WORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let table: &[(&str, &str)] = &[
        // irregular plurals
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("people", "person"),
        ("oxen", "ox"),
        ("cacti", "cactus"),
        ("fungi", "fungus"),
        ("knives", "knife"),
        ("wives", "wife"),
        ("leaves", "leaf"),
        ("loaves", "loaf"),
        ("shelves", "shelf"),
        ("wolves", "wolf"),
        ("scarves", "scarf"),
        ("calves", "calf"),
        ("halves", "half"),
        ("thieves", "thief"),
        // British -> American spelling
        ("colour", "color"),
        ("flavour", "flavor"),
        ("favourite", "favorite"),
        ("grey", "gray"),
        ("tyre", "tire"),
        ("fibre", "fiber"),
        ("litre", "liter"),
        ("metre", "meter"),
        ("centre", "center"),
        ("theatre", "theater"),
        ("jewellery", "jewelry"),
        ("aluminium", "aluminum"),
        ("moustache", "mustache"),
        ("pyjama", "pajama"),
        ("doughnut", "donut"),
        ("cosy", "cozy"),
        ("mould", "mold"),
        ("plough", "plow"),
        ("catalogue", "catalog"),
        ("organiser", "organizer"),
        ("sanitiser", "sanitizer"),
        ("trousers", "pants"),
        ("pushchair", "stroller"),
        ("pram", "stroller"),
        ("nappy", "diaper"),
        ("hoover", "vacuum"),
        // strict synonyms: same entity, different word
        ("smartphone", "phone"),
        ("cellphone", "phone"),
        ("telephone", "phone"),
        ("television", "tv"),
        ("sofa", "couch"),
        ("automobile", "car"),
        ("bicycle", "bike"),
        ("motorbike", "motorcycle"),
        ("fridge", "refrigerator"),
        ("barbecue", "grill"),
        ("barbeque", "grill"),
        ("bbq", "grill"),
        ("kid", "child"),
        ("xmas", "christmas"),
        ("eyeglasses", "glasses"),
    ];
    table.iter().copied().collect()
});

/// Returns the canonical replacement for `token`, or `token` unchanged.
pub fn canonical_form(token: &str) -> &str {
    CANONICAL_WORDS.get(token).copied().unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irregular_plurals() {
        assert_eq!(canonical_form("children"), "child");
        assert_eq!(canonical_form("knives"), "knife");
    }

    #[test]
    fn test_british_spelling() {
        assert_eq!(canonical_form("tyre"), "tire");
        assert_eq!(canonical_form("jewellery"), "jewelry");
    }

    #[test]
    fn test_synonyms() {
        assert_eq!(canonical_form("smartphone"), "phone");
        assert_eq!(canonical_form("bbq"), "grill");
    }

    #[test]
    fn test_brands_pass_through() {
        assert_eq!(canonical_form("iphone"), "iphone");
        assert_eq!(canonical_form("apple"), "apple");
        assert_eq!(canonical_form("led"), "led");
    }
}
