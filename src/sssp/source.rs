/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::traits::WeightedGraph;

/// The default seed for random source selection.
pub const DEFAULT_SOURCE_SEED: u64 = 27491095;

/// Picks random sources with nonzero outdegree for shortest-path
/// computations.
///
/// The generator is seeded, so repeated runs pick the same sequence of
/// sources. When a source is supplied by the caller, it is returned verbatim,
/// without the outdegree check.
pub struct SourcePicker<'a, G: WeightedGraph> {
    graph: &'a G,
    given_source: Option<usize>,
    rng: SmallRng,
}

impl<'a, G: WeightedGraph> SourcePicker<'a, G> {
    /// Creates a new source picker with the [default
    /// seed](DEFAULT_SOURCE_SEED).
    ///
    /// If `given_source` is `Some`, [`pick_next`](Self::pick_next) will
    /// always return it.
    pub fn new(graph: &'a G, given_source: Option<usize>) -> Self {
        Self::with_seed(graph, given_source, DEFAULT_SOURCE_SEED)
    }

    /// Creates a new source picker with the given seed.
    pub fn with_seed(graph: &'a G, given_source: Option<usize>, seed: u64) -> Self {
        Self {
            graph,
            given_source,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns the next source: the caller-supplied one if present, and
    /// otherwise a node drawn uniformly at random among those with at least
    /// one outgoing arc.
    ///
    /// # Panics
    ///
    /// Panics if no source was supplied and the graph has no arcs.
    pub fn pick_next(&mut self) -> usize {
        if let Some(source) = self.given_source {
            return source;
        }
        assert!(
            self.graph.num_arcs() > 0,
            "Cannot pick a source: the graph has no arcs"
        );
        loop {
            let source = self.rng.random_range(0..self.graph.num_nodes());
            if self.graph.outdegree(source) > 0 {
                return source;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::VecGraph;
    use crate::traits::WeightedGraph;

    #[test]
    fn test_given_source() {
        let g = VecGraph::from_arcs([(0, 1, 1)]);
        // The given source is returned verbatim, even with zero outdegree.
        let mut picker = SourcePicker::new(&g, Some(1));
        assert_eq!(picker.pick_next(), 1);
        assert_eq!(picker.pick_next(), 1);
    }

    #[test]
    fn test_nonzero_outdegree() {
        let mut g = VecGraph::from_arcs([(0, 1, 1)]);
        g.add_node(9);
        let mut picker = SourcePicker::new(&g, None);
        for _ in 0..100 {
            let source = picker.pick_next();
            assert!(g.outdegree(source) > 0);
        }
    }

    #[test]
    fn test_seeded() {
        let g = VecGraph::from_arcs([(0, 1, 1), (2, 3, 1), (4, 5, 1), (6, 7, 1)]);
        let sources = |seed| {
            let mut picker = SourcePicker::with_seed(&g, None, seed);
            (0..10).map(|_| picker.pick_next()).collect::<Vec<_>>()
        };
        assert_eq!(sources(0), sources(0));
    }
}
