/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rand::distr::uniform::SampleUniform;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::traits::Weight;

/// Provides a sequential generator of uniform random weighted graphs.
///
/// The generator produces a fixed number of arcs whose endpoints are drawn
/// uniformly at random among the nodes, with weights drawn uniformly in
/// `[1 .. max_weight]`. Self-loops and parallel arcs may occur. The generation
/// is seeded, so the same parameters always produce the same graph.
///
/// The [`arcs`](UniformRandom::arcs) iterator can be fed directly to
/// [`CsrGraph::from_arcs`](crate::graphs::CsrGraph::from_arcs) or
/// [`VecGraph::from_arcs`](crate::graphs::VecGraph::from_arcs).
#[derive(Debug, Clone)]
pub struct UniformRandom<W> {
    num_nodes: usize,
    num_arcs: usize,
    max_weight: W,
    seed: u64,
}

impl<W: Weight + SampleUniform> UniformRandom<W> {
    /// Creates a new uniform random graph generator, given the number of
    /// nodes, the number of arcs, the maximum arc weight, and a seed for the
    /// [pseudorandom number generator](SmallRng).
    pub fn new(num_nodes: usize, num_arcs: usize, max_weight: W, seed: u64) -> Self {
        assert!(num_nodes > 0, "The graph must have at least one node");
        assert!(
            max_weight >= W::ONE,
            "The maximum weight must be at least one, got {max_weight}"
        );
        Self {
            num_nodes,
            num_arcs,
            max_weight,
            seed,
        }
    }

    /// Returns an iterator over the arcs of the graph as `(source, target,
    /// weight)` triples.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        (0..self.num_arcs).map(move |_| {
            (
                rng.random_range(0..self.num_nodes),
                rng.random_range(0..self.num_nodes),
                rng.random_range(W::ONE..=self.max_weight),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let g = UniformRandom::<i32>::new(100, 1000, 10, 0);
        let arcs0 = g.arcs().collect::<Vec<_>>();
        let arcs1 = g.arcs().collect::<Vec<_>>();
        assert_eq!(arcs0, arcs1);
        assert_eq!(arcs0.len(), 1000);
        for &(u, v, w) in &arcs0 {
            assert!(u < 100 && v < 100);
            assert!((1..=10).contains(&w));
        }
    }

    #[test]
    fn test_seed_changes_graph() {
        let arcs0 = UniformRandom::<i32>::new(100, 100, 10, 0)
            .arcs()
            .collect::<Vec<_>>();
        let arcs1 = UniformRandom::<i32>::new(100, 100, 10, 1)
            .arcs()
            .collect::<Vec<_>>();
        assert_ne!(arcs0, arcs1);
    }
}
