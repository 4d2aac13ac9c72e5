// src/clustering/survivor.rs - Survivor election for duplicate clusters
//
// For each cluster of names, resolve members against the candidate records
// and elect exactly one main entry: live members beat dead ones, higher
// popularity breaks ties, and lowest id is the last resort so the result
// never depends on input order. Names with no matching record are dropped
// silently; a cluster left with fewer than two members is discarded.

use log::{debug, warn};
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::models::core::{DuplicateGroup, GroupMember, TopicRecord};

pub fn select_survivors(
    clusters: &[Vec<String>],
    records: &HashMap<String, TopicRecord>,
) -> Vec<DuplicateGroup> {
    let mut groups = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        let mut members: Vec<&TopicRecord> = Vec::with_capacity(cluster.len());
        for name in cluster {
            match records.get(name) {
                Some(record) => members.push(record),
                None => debug!("No candidate record for clustered name {:?}, dropping", name),
            }
        }

        if members.len() < 2 {
            if !cluster.is_empty() {
                warn!(
                    "Cluster starting with {:?} resolved to {} record(s), discarding",
                    cluster[0],
                    members.len()
                );
            }
            continue;
        }

        members.sort_by_key(|r| (Reverse(r.is_live), Reverse(r.popularity_score), r.id.clone()));

        let group_members = members
            .iter()
            .enumerate()
            .map(|(rank, record)| GroupMember {
                id: record.id.clone(),
                name: record.name.clone(),
                popularity_score: record.popularity_score,
                is_live: record.is_live,
                path: record.canonical_path.clone(),
                is_main: rank == 0,
            })
            .collect();

        groups.push(DuplicateGroup {
            members: group_members,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, popularity: i64, is_live: bool) -> TopicRecord {
        TopicRecord {
            id: id.to_string(),
            name: name.to_string(),
            popularity_score: popularity,
            is_live,
            canonical_path: format!("/topics/{}", id),
            exclude_from_dedupe: false,
        }
    }

    fn index(records: Vec<TopicRecord>) -> HashMap<String, TopicRecord> {
        records.into_iter().map(|r| (r.name.clone(), r)).collect()
    }

    #[test]
    fn test_live_member_beats_higher_popularity() {
        let records = index(vec![
            record("t1", "smart watch", 10, false),
            record("t2", "smartwatch", 5, true),
        ]);
        let clusters = vec![vec!["smart watch".to_string(), "smartwatch".to_string()]];
        let groups = select_survivors(&clusters, &records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].main().unwrap().id, "t2");
    }

    #[test]
    fn test_popularity_breaks_ties_among_live() {
        let records = index(vec![
            record("t1", "smart watch", 100, true),
            record("t2", "smartwatch", 50, true),
        ]);
        let clusters = vec![vec!["smart watch".to_string(), "smartwatch".to_string()]];
        let groups = select_survivors(&clusters, &records);
        assert_eq!(groups[0].main().unwrap().id, "t1");
    }

    #[test]
    fn test_popularity_tie_break_among_dead_members() {
        let records = index(vec![
            record("t1", "smart watch", 10, false),
            record("t2", "smartwatch", 5, false),
        ]);
        let clusters = vec![vec!["smart watch".to_string(), "smartwatch".to_string()]];
        let groups = select_survivors(&clusters, &records);
        assert_eq!(groups[0].main().unwrap().id, "t1");
    }

    #[test]
    fn test_lowest_id_is_last_resort() {
        let records = index(vec![
            record("t9", "smart watch", 10, true),
            record("t2", "smartwatch", 10, true),
        ]);
        let clusters = vec![vec!["smart watch".to_string(), "smartwatch".to_string()]];
        let groups = select_survivors(&clusters, &records);
        assert_eq!(groups[0].main().unwrap().id, "t2");
    }

    #[test]
    fn test_exactly_one_main_per_group() {
        let records = index(vec![
            record("t1", "a b c", 1, true),
            record("t2", "c b a", 2, true),
            record("t3", "b a c", 3, false),
        ]);
        let clusters = vec![vec![
            "a b c".to_string(),
            "c b a".to_string(),
            "b a c".to_string(),
        ]];
        let groups = select_survivors(&clusters, &records);
        assert_eq!(groups[0].members.len(), 3);
        assert_eq!(groups[0].members.iter().filter(|m| m.is_main).count(), 1);
        assert_eq!(groups[0].main().unwrap().id, "t2");
    }

    #[test]
    fn test_unresolvable_names_shrink_or_discard_cluster() {
        let records = index(vec![
            record("t1", "smart watch", 1, true),
            record("t2", "smartwatch", 2, true),
        ]);
        // one unknown name: cluster survives with 2 members
        let clusters = vec![vec![
            "smart watch".to_string(),
            "smartwatch".to_string(),
            "ghost name".to_string(),
        ]];
        let groups = select_survivors(&clusters, &records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 2);

        // cluster dropping below 2 members is discarded entirely
        let clusters = vec![vec!["smart watch".to_string(), "ghost name".to_string()]];
        assert!(select_survivors(&clusters, &records).is_empty());
    }
}
