/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::collections::BinaryHeap;

use crate::traits::{Weight, WeightedGraph};

/// An entry of the Dijkstra queue, ordered by reverse distance so that the
/// standard max-heap behaves as a min-heap.
#[derive(Clone, Copy, Debug)]
struct QueueItem<W> {
    dist: W,
    node: usize,
}

impl<W: Weight> PartialEq for QueueItem<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == core::cmp::Ordering::Equal
    }
}

impl<W: Weight> Eq for QueueItem<W> {}

impl<W: Weight> PartialOrd for QueueItem<W> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for QueueItem<W> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // Distances are never NaN (the sentinel is finite).
        other
            .dist
            .partial_cmp(&self.dist)
            .expect("Distances must be comparable")
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Computes the shortest-path distances from `source` to all nodes with a
/// sequential Dijkstra visit.
///
/// Unreachable nodes have distance [`INF`](crate::traits::Weight::INF). This
/// is the reference implementation used to verify the parallel one; it
/// requires nonnegative weights.
///
/// # Panics
///
/// Panics if `source` is not smaller than the number of nodes.
pub fn dijkstra<W: Weight, G: WeightedGraph<Weight = W>>(graph: &G, source: usize) -> Box<[W]> {
    let mut dist = vec![W::INF; graph.num_nodes()].into_boxed_slice();
    dist[source] = W::ZERO;
    let mut queue = BinaryHeap::new();
    queue.push(QueueItem {
        dist: W::ZERO,
        node: source,
    });

    while let Some(QueueItem { dist: d, node: u }) = queue.pop() {
        // Settle the node only if the entry is not stale.
        if d == dist[u] {
            for (v, w) in graph.successors(u) {
                let new_dist = d.add_saturating(w);
                if new_dist < dist[v] {
                    dist[v] = new_dist;
                    queue.push(QueueItem {
                        dist: new_dist,
                        node: v,
                    });
                }
            }
        }
    }

    dist
}

/// Checks the given distances against a sequential Dijkstra computation from
/// the same source, logging any mismatch.
pub fn verify<W: Weight, G: WeightedGraph<Weight = W>>(graph: &G, source: usize, dist: &[W]) -> bool {
    let oracle = dijkstra(graph, source);
    let mut all_ok = true;
    for node in 0..graph.num_nodes() {
        if dist[node] != oracle[node] {
            log::warn!("{}: {} != {}", node, dist[node], oracle[node]);
            all_ok = false;
        }
    }
    all_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::VecGraph;

    #[test]
    fn test_chain() {
        let g = VecGraph::from_arcs([(0, 1, 2), (1, 2, 3), (2, 3, 1)]);
        assert_eq!(&*dijkstra(&g, 0), &[0, 2, 5, 6]);
        assert_eq!(&*dijkstra(&g, 2), &[i32::INF, i32::INF, 0, 1]);
    }

    #[test]
    fn test_parallel_arcs_and_loops() {
        let mut g = VecGraph::empty(2);
        g.add_arc(0, 0, 3);
        g.add_arc(0, 1, 5);
        g.add_arc(0, 1, 2);
        assert_eq!(&*dijkstra(&g, 0), &[0, 2]);
    }
}
