// src/models/core.rs - Core data model for the topic deduplication engine

use serde::{Deserialize, Serialize};

/// Snapshot of one topic row as read from the store at the start of a run.
/// The store remains the long-term owner; nothing here is written back until
/// the operator confirms an apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    pub id: String,
    pub name: String,
    pub popularity_score: i64,
    pub is_live: bool,
    pub canonical_path: String,
    #[serde(default)]
    pub exclude_from_dedupe: bool,
}

/// One member of a duplicate group, as surfaced to the admin panel and
/// accepted back (possibly pruned) by the apply interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: String,
    pub name: String,
    pub popularity_score: i64,
    pub is_live: bool,
    pub path: String,
    pub is_main: bool,
}

/// A set of topics believed to denote one real-world entity. Exactly one
/// member carries `is_main == true`; the rest redirect to it on apply.
/// Serializes as a bare member array - the wire shape is
/// `Array<Array<member>>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DuplicateGroup {
    pub members: Vec<GroupMember>,
}

impl DuplicateGroup {
    pub fn main(&self) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.is_main)
    }

    pub fn duplicates(&self) -> impl Iterator<Item = &GroupMember> {
        self.members.iter().filter(|m| !m.is_main)
    }
}

/// A single pending store mutation: point `duplicate_id` at `target_path`
/// and take it offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectInstruction {
    pub duplicate_id: String,
    pub target_path: String,
}

/// Terminal payload of one preview run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupeResult {
    pub total_candidates: usize,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub total_duplicate_count: usize,
}

impl DedupeResult {
    pub fn empty(total_candidates: usize) -> Self {
        Self {
            total_candidates,
            duplicate_groups: Vec::new(),
            total_duplicate_count: 0,
        }
    }
}

/// Result of one apply invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutcome {
    pub redirects_applied: usize,
}
