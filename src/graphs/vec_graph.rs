/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{Weight, WeightedGraph};

/// A mutable [`WeightedGraph`] implementation based on a vector of vectors.
///
/// This is the simplest way to build small graphs, in particular in unit
/// tests. For large graphs [`CsrGraph`](crate::graphs::CsrGraph) is
/// significantly more compact.
#[derive(Clone, Debug, PartialEq)]
pub struct VecGraph<W: Weight> {
    /// The number of arcs in the graph.
    number_of_arcs: u64,
    /// For each node, its list of successors with arc weights.
    succ: Vec<Vec<(usize, W)>>,
}

impl<W: Weight> core::default::Default for VecGraph<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Weight> VecGraph<W> {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            number_of_arcs: 0,
            succ: vec![],
        }
    }

    /// Creates a new empty graph with `n` nodes.
    pub fn empty(n: usize) -> Self {
        Self {
            number_of_arcs: 0,
            succ: Vec::from_iter((0..n).map(|_| Vec::new())),
        }
    }

    /// Adds an isolated node to the graph and returns true if it is a new
    /// node.
    pub fn add_node(&mut self, node: usize) -> bool {
        let len = self.succ.len();
        self.succ.extend((len..=node).map(|_| Vec::new()));
        len <= node
    }

    /// Adds an arc to the graph.
    ///
    /// Parallel arcs and self-loops are allowed.
    ///
    /// # Panics
    ///
    /// - If one of the given nodes is greater than or equal to the number of
    ///   nodes in the graph.
    /// - If the weight is negative.
    pub fn add_arc(&mut self, u: usize, v: usize, w: W) {
        let max = u.max(v);
        if max >= self.succ.len() {
            panic!(
                "Node {} does not exist (the graph has {} nodes)",
                max,
                self.succ.len(),
            );
        }
        assert!(
            w >= W::ZERO,
            "Arc ({u}, {v}) has negative weight {w}: weights must be nonnegative"
        );
        self.succ[u].push((v, w));
        self.number_of_arcs += 1;
    }

    /// Adds arcs from an [`IntoIterator`].
    ///
    /// The items must be triples of the form `(usize, usize, W)` specifying
    /// an arc and its weight.
    ///
    /// Note that new nodes will be added as needed.
    pub fn add_arcs(&mut self, arcs: impl IntoIterator<Item = (usize, usize, W)>) {
        for (u, v, w) in arcs {
            self.add_node(u);
            self.add_node(v);
            self.add_arc(u, v, w);
        }
    }

    /// Creates a new graph from an [`IntoIterator`].
    ///
    /// The items must be triples of the form `(usize, usize, W)` specifying
    /// an arc and its weight.
    pub fn from_arcs(arcs: impl IntoIterator<Item = (usize, usize, W)>) -> Self {
        let mut g = Self::new();
        g.add_arcs(arcs);
        g
    }
}

impl<W: Weight> WeightedGraph for VecGraph<W> {
    type Weight = W;
    type Successors<'succ>
        = core::iter::Copied<core::slice::Iter<'succ, (usize, W)>>
    where
        Self: 'succ;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.succ.len()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.number_of_arcs
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Self::Successors<'_> {
        self.succ[node].iter().copied()
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.succ[node].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arcs() {
        let g = VecGraph::from_arcs([(0, 1, 2), (1, 2, 3), (0, 2, 10)]);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_arcs(), 3);
        assert_eq!(g.outdegree(0), 2);
        assert_eq!(g.successors(1).collect::<Vec<_>>(), vec![(2, 3)]);
    }

    #[test]
    #[should_panic(expected = "negative weight")]
    fn test_negative_weight() {
        let mut g = VecGraph::empty(2);
        g.add_arc(0, 1, -1);
    }
}
