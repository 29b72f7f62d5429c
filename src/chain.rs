//! Chain reconstruction for a single pipeline.
//!
//! Records are stored by id in an `IndexMap`; `next_id` values are only ever
//! used as lookup keys, so a circular `next_id` graph is handled by the
//! visited set during traversal and never by the storage itself.

use serde::Serialize;
use std::collections::HashSet;

use crate::grouper::RecordMap;
use crate::record::Record;

/// How the traversal of a pipeline's chain ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainOutcome {
    /// Every record is referenced by some `next_id`, so there is nowhere to start
    NoTail,
    /// The last visited record carried the `-1` sentinel
    Sentinel,
    /// The last visited record pointed at an id with no record
    Dangling { next_id: String },
    /// The last visited record pointed back at an already visited id
    Cycle { next_id: String },
}

impl ChainOutcome {
    /// True for the ordinary end of a well-formed chain
    pub fn is_clean(&self) -> bool {
        matches!(self, ChainOutcome::Sentinel)
    }
}

/// Result of walking one pipeline's chain, already in head-to-tail order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainWalk {
    pub records: Vec<Record>,
    pub outcome: ChainOutcome,
}

/// Find the record whose id no other record references.
///
/// When several records qualify, the first one in map (first-seen) order wins.
pub fn find_tail(records: &RecordMap) -> Option<&Record> {
    let referenced: HashSet<&str> = records.values().map(|r| r.next_id.as_str()).collect();

    records
        .values()
        .find(|record| !referenced.contains(record.id.as_str()))
}

/// Walk the chain from its tail and report how the walk ended
pub fn walk_chain(records: &RecordMap) -> ChainWalk {
    let Some(tail) = find_tail(records) else {
        return ChainWalk {
            records: Vec::new(),
            outcome: ChainOutcome::NoTail,
        };
    };

    let mut visited: HashSet<&str> = HashSet::with_capacity(records.len());
    let mut ordered: Vec<Record> = Vec::new();
    let mut current = tail;

    let outcome = loop {
        visited.insert(current.id.as_str());
        ordered.push(current.clone());

        if current.is_terminal() {
            break ChainOutcome::Sentinel;
        }

        match records.get(current.next_id.as_str()) {
            None => {
                break ChainOutcome::Dangling {
                    next_id: current.next_id.clone(),
                }
            }
            Some(next) if visited.contains(next.id.as_str()) => {
                break ChainOutcome::Cycle {
                    next_id: next.id.clone(),
                }
            }
            Some(next) => current = next,
        }
    };

    ordered.reverse();
    ChainWalk {
        records: ordered,
        outcome,
    }
}

/// Reconstruct a pipeline's records in presentation order.
///
/// Returns an empty sequence when no tail exists.
pub fn reconstruct_chain(records: &RecordMap) -> Vec<Record> {
    walk_chain(records).records
}
