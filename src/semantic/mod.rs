// src/semantic/mod.rs - Residual semantic matcher interface
//
// Names the deterministic pass leaves unclustered can be offered to an
// external text-similarity service in a single request per run. The engine
// only knows this narrow capability trait; the shipped HTTP client lives in
// `client` and any stub can stand in for it in tests. Failures anywhere in
// this path degrade to "no additional clusters".

pub mod client;

use anyhow::{anyhow, Result};
use log::debug;
use std::collections::HashSet;

pub use client::{SemanticClient, SemanticClientConfig};

/// Capability interface for the external service. One call per dedup run.
pub trait SemanticMatcher {
    fn classify(
        &self,
        rules: &str,
        names: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<String>>>> + Send;
}

/// The literal-variation rule set sent with every residual request. It
/// mirrors the deterministic normalizer's semantics: only spelling-level
/// variation may be grouped, never topical similarity.
pub const RESIDUAL_MATCH_RULES: &str = "\
Group names ONLY when they denote the exact same product concept and differ \
solely in literal form: word order, singular/plural, hyphenation or spacing, \
unit abbreviations (12v vs 12 volt), or a redundant generic word next to a \
specific one (laptop computer vs laptop). Names must keep the same product \
word, the same brand word, the same age or size qualifier, and the same \
descriptive attributes. Never group names that differ in product type, \
brand, age range, or a real modifier such as led, wireless, or a material. \
When in doubt, do not group.";

/// Build the single classification request body text.
pub fn build_classification_prompt(rules: &str, names: &[String]) -> String {
    let mut prompt = String::with_capacity(rules.len() + names.len() * 24 + 256);
    prompt.push_str("You are classifying topic page names for deduplication.\n");
    prompt.push_str(rules);
    prompt.push_str(
        "\n\nReturn a JSON array of arrays. Each inner array lists the exact \
         input names (verbatim strings) that form one duplicate group of two \
         or more. Names that belong to no group must be omitted. Return [] \
         when nothing qualifies. Output JSON only.\n\nNames:\n",
    );
    for name in names {
        prompt.push_str("- ");
        prompt.push_str(name);
        prompt.push('\n');
    }
    prompt
}

/// Parse the service response defensively: accept a raw JSON body or one
/// embedded in a fenced code block. Non-string members are ignored and
/// groups left with fewer than two strings are discarded.
pub fn parse_group_response(body: &str) -> Result<Vec<Vec<String>>> {
    let payload = extract_json_payload(body);
    let value: serde_json::Value = serde_json::from_str(payload.trim())
        .map_err(|e| anyhow!("semantic matcher returned unparsable JSON: {}", e))?;

    let outer = value
        .as_array()
        .ok_or_else(|| anyhow!("semantic matcher response is not a JSON array"))?;

    let mut groups = Vec::new();
    for entry in outer {
        let Some(inner) = entry.as_array() else {
            debug!("Discarding non-array group entry: {}", entry);
            continue;
        };
        let members: Vec<String> = inner
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        if members.len() >= 2 {
            groups.push(members);
        } else {
            debug!("Discarding group with {} usable member(s)", members.len());
        }
    }
    Ok(groups)
}

/// Keep only members that were actually in the residual name list, then
/// re-check group size. Prevents the service from pulling deterministic
/// cluster members (or inventions) into residual groups.
pub fn filter_known_names(
    groups: Vec<Vec<String>>,
    residual_names: &HashSet<String>,
) -> Vec<Vec<String>> {
    groups
        .into_iter()
        .filter_map(|group| {
            let known: Vec<String> = group
                .into_iter()
                .filter(|name| residual_names.contains(name))
                .collect();
            (known.len() >= 2).then_some(known)
        })
        .collect()
}

/// Strip an optional Markdown code fence around the JSON body.
fn extract_json_payload(body: &str) -> &str {
    let trimmed = body.trim();
    let Some(fence_start) = trimmed.find("```") else {
        return trimmed;
    };
    let after_fence = &trimmed[fence_start + 3..];
    // skip an optional language tag on the fence line
    let content_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let content = &after_fence[content_start..];
    match content.find("```") {
        Some(end) => &content[..end],
        None => content,
    }
}
