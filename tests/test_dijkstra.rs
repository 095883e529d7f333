/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use deltastep::prelude::*;

/// Bellman–Ford, as an oracle for the oracle.
fn bellman_ford<W: Weight, G: WeightedGraph<Weight = W>>(graph: &G, source: usize) -> Vec<W> {
    let mut dist = vec![W::INF; graph.num_nodes()];
    dist[source] = W::ZERO;
    for _ in 0..graph.num_nodes() {
        let mut changed = false;
        for u in 0..graph.num_nodes() {
            if dist[u] == W::INF {
                continue;
            }
            for (v, w) in graph.successors(u) {
                let new_dist = dist[u].add_saturating(w);
                if new_dist < dist[v] {
                    dist[v] = new_dist;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

#[test]
fn test_random_graph() -> Result<()> {
    let graph = CsrGraph::from_arcs(300, UniformRandom::<i32>::new(300, 3000, 10, 5).arcs());
    for source in [0, 7, 299] {
        assert_eq!(dijkstra(&graph, source).to_vec(), bellman_ford(&graph, source));
    }
    Ok(())
}

#[test]
fn test_verify_detects_mismatch() -> Result<()> {
    let graph = VecGraph::from_arcs([(0, 1, 2), (1, 2, 3)]);
    let mut dist = dijkstra(&graph, 0);
    assert!(verify(&graph, 0, &dist));
    dist[1] += 1;
    assert!(!verify(&graph, 0, &dist));
    Ok(())
}

#[test]
fn test_unreachable() -> Result<()> {
    let mut graph = VecGraph::from_arcs([(1, 0, 4.0_f32)]);
    graph.add_node(2);
    assert_eq!(&*dijkstra(&graph, 1), &[4.0, 0.0, f32::INF]);
    Ok(())
}
