// src/rules/units.rs - Regex unit-normalization rules
//
// These fire on the raw (lowercased) string before tokenization so that
// abbreviated and verbose unit spellings collapse to one token sequence:
// "12v" and "12 volt" both become "12 volt". Patterns anchor on a leading
// number; bare unit words without a number are left alone and handled (or
// not) by the later token passes. Single-letter abbreviations that collide
// with real words ("a", "in", "l") are deliberately absent.

use once_cell::sync::Lazy;
use regex::Regex;

struct UnitRule {
    pattern: Regex,
    replacement: &'static str,
}

/// Ordered list; every rule is applied in sequence over the whole string.
/// Longer alternatives come first inside each alternation so that "volts"
/// is not half-consumed as "volt" + trailing "s".
static UNIT_RULES: Lazy<Vec<UnitRule>> = Lazy::new(|| {
    let table: &[(&str, &str)] = &[
        // age qualifiers: "for 6 year olds", "6-yr-old" -> "6 age"
        (r"\b(\d+)[\s-]*(?:years?|yrs?)[\s-]*olds?\b", "$1 age"),
        (r"\b(\d+)[\s-]*(?:months?|mos?)[\s-]*olds?\b", "$1 month age"),
        // electrical
        (r"\b(\d+)[\s-]*(?:volts|volt|v)\b", "$1 volt"),
        (r"\b(\d+)[\s-]*(?:watts|watt|w)\b", "$1 watt"),
        (r"\b(\d+)[\s-]*(?:amp[\s-]?hours?|ah)\b", "$1 ah"),
        (r"\b(\d+)[\s-]*(?:amperes?|amps?)\b", "$1 amp"),
        // weight
        (r"\b(\d+)[\s-]*(?:pounds|pound|lbs|lb)\b", "$1 lb"),
        (r"\b(\d+)[\s-]*(?:ounces|ounce|oz)\b", "$1 oz"),
        (r"\b(\d+)[\s-]*(?:kilograms|kilogram|kilos|kgs|kg)\b", "$1 kg"),
        (r"\b(\d+)[\s-]*(?:grams|gram)\b", "$1 gram"),
        // length
        (r"\b(\d+)[\s-]*(?:inches|inch)\b", "$1 inch"),
        (r"\b(\d+)[\s-]*(?:feet|foot|ft)\b", "$1 foot"),
        (r"\b(\d+)[\s-]*(?:millimeters|millimetres|mm)\b", "$1 mm"),
        (r"\b(\d+)[\s-]*(?:centimeters|centimetres|cm)\b", "$1 cm"),
        // volume
        (r"\b(\d+)[\s-]*(?:gallons|gallon|gal)\b", "$1 gallon"),
        (r"\b(\d+)[\s-]*(?:liters|litres|liter|litre)\b", "$1 liter"),
        (r"\b(\d+)[\s-]*(?:milliliters|millilitres|ml)\b", "$1 ml"),
        (r"\b(\d+)[\s-]*(?:quarts|quart|qt)\b", "$1 quart"),
        // capacity and frequency
        (r"\b(\d+)[\s-]*(?:terabytes?|tb)\b", "$1 tb"),
        (r"\b(\d+)[\s-]*(?:gigabytes?|gb)\b", "$1 gb"),
        (r"\b(\d+)[\s-]*(?:gigahertz|ghz)\b", "$1 ghz"),
        // quantity
        (r"\b(\d+)[\s-]*(?:packs|pack|pk|count|ct)\b", "$1 pack"),
        (r"\b(\d+)[\s-]*(?:pieces|piece|pcs|pc)\b", "$1 piece"),
        (r"\b(\d+)[\s-]*(?:persons?|people)\b", "$1 person"),
        // size words that add nothing once the number is present
        (r"\b(\d+)[\s-]*midsize\b", "$1"),
    ];
    table
        .iter()
        .map(|&(pattern, replacement)| UnitRule {
            pattern: Regex::new(pattern).expect("unit rule pattern must compile"),
            replacement,
        })
        .collect()
});

/// Rewrite every number+unit occurrence in `raw` to its canonical spelling.
pub fn apply_unit_rules(raw: &str) -> String {
    let mut current = raw.to_string();
    for rule in UNIT_RULES.iter() {
        if rule.pattern.is_match(&current) {
            current = rule
                .pattern
                .replace_all(&current, rule.replacement)
                .into_owned();
        }
    }
    current
}
