//! Responsible for stitching the disjoint ways of a relation into one chain
use crate::geometry::{CONNECTION_THRESHOLD_M, haversine_distance};
use crate::model::line_model::{Coordinate, Fragment};
use itertools::Itertools;
use tracing::{info, warn};

/// The merged chain plus the ids of fragments that never connected.
#[derive(Debug)]
pub struct MergeOutcome {
    pub coordinates: Vec<Coordinate>,
    pub unconnected: Vec<i64>,
}

/// Which chain endpoint connects to which fragment endpoint.
#[derive(Debug, Clone, Copy)]
enum Connection {
    TailToHead,
    TailToTail,
    HeadToHead,
    HeadToTail,
}

/// Merges unordered, arbitrarily oriented fragments into one ordered chain.
///
/// Greedy and order-sensitive: each scan accepts the *first* fragment in
/// input order whose own best endpoint connection is under 100 m, applies
/// it, and restarts the scan, so a growing chain can unlock fragments that
/// were too far earlier. This is deliberately not a best-fit matching; the
/// stitching order of persisted lines depends on it. Fragments that never
/// get under the threshold are dropped and reported in the outcome.
pub fn merge_fragments(fragments: &[Fragment]) -> MergeOutcome {
    if fragments.is_empty() {
        return MergeOutcome {
            coordinates: vec![],
            unconnected: vec![],
        };
    }

    info!("merging {} fragments", fragments.len());

    let mut used = vec![false; fragments.len()];
    let mut chain = fragments[0].coordinates.clone();
    used[0] = true;
    info!(
        "starting from fragment {} with {} points",
        fragments[0].id,
        chain.len()
    );

    loop {
        let mut found_connection = false;

        for (i, fragment) in fragments.iter().enumerate() {
            if used[i] || fragment.coordinates.is_empty() {
                continue;
            }

            let (connection, distance) = best_connection(&chain, fragment);

            if distance < CONNECTION_THRESHOLD_M {
                apply_connection(&mut chain, fragment, connection);
                used[i] = true;
                found_connection = true;
                info!(
                    "connected fragment {} ({:?}), distance {:.1}m",
                    fragment.id, connection, distance
                );
                break;
            }
        }

        if !found_connection {
            break;
        }
    }

    let unconnected = fragments
        .iter()
        .zip(&used)
        .filter(|(_, used)| !**used)
        .map(|(fragment, _)| fragment.id)
        .collect_vec();

    if !unconnected.is_empty() {
        warn!(
            "{} fragments could not be connected: {:?}",
            unconnected.len(),
            unconnected
        );
    }

    info!("merge produced {} coordinates", chain.len());

    MergeOutcome {
        coordinates: chain,
        unconnected,
    }
}

/// The fragment's own best connection to the current chain endpoints.
/// Ties resolve to the earliest candidate in declaration order.
fn best_connection(chain: &[Coordinate], fragment: &Fragment) -> (Connection, f64) {
    let chain_head = chain[0];
    let chain_tail = chain[chain.len() - 1];
    let fragment_head = fragment.coordinates[0];
    let fragment_tail = fragment.coordinates[fragment.coordinates.len() - 1];

    let candidates = [
        (
            Connection::TailToHead,
            haversine_distance(chain_tail, fragment_head),
        ),
        (
            Connection::TailToTail,
            haversine_distance(chain_tail, fragment_tail),
        ),
        (
            Connection::HeadToHead,
            haversine_distance(chain_head, fragment_head),
        ),
        (
            Connection::HeadToTail,
            haversine_distance(chain_head, fragment_tail),
        ),
    ];

    candidates
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap()
}

/// Splices the fragment onto the chain, dropping the duplicated junction
/// point on the fragment side.
fn apply_connection(chain: &mut Vec<Coordinate>, fragment: &Fragment, connection: Connection) {
    let coords = &fragment.coordinates;

    match connection {
        Connection::TailToHead => chain.extend_from_slice(&coords[1..]),
        Connection::TailToTail => chain.extend(coords[..coords.len() - 1].iter().rev()),
        Connection::HeadToHead => {
            let mut new_chain = coords[1..].iter().rev().copied().collect_vec();
            new_chain.append(chain);
            *chain = new_chain;
        }
        Connection::HeadToTail => {
            let mut new_chain = coords[..coords.len() - 1].to_vec();
            new_chain.append(chain);
            *chain = new_chain;
        }
    }
}
