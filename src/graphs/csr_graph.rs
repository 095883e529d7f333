/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{Weight, WeightedGraph};

/// An immutable [`WeightedGraph`] in compressed sparse row representation.
///
/// Successors and weights are stored in two flat arrays indexed by a vector
/// of offsets, which makes successor enumeration a contiguous scan. This is
/// the representation of choice for benchmarks and for graphs read from
/// disk.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrGraph<W: Weight> {
    /// For each node, the starting position of its successors; the last
    /// element is the number of arcs.
    offsets: Box<[usize]>,
    /// The successors of all nodes, ordered by source node.
    succ: Box<[usize]>,
    /// The weight of the arc to the successor in the same position.
    weights: Box<[W]>,
}

impl<W: Weight> CsrGraph<W> {
    /// Creates a new graph with `num_nodes` nodes from an [`IntoIterator`] of
    /// triples of the form `(usize, usize, W)` specifying an arc and its
    /// weight.
    ///
    /// Parallel arcs and self-loops are allowed.
    ///
    /// # Panics
    ///
    /// - If an arc endpoint is greater than or equal to `num_nodes`.
    /// - If a weight is negative.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize, W)>,
    ) -> Self {
        let arcs = arcs.into_iter().collect::<Vec<_>>();
        let mut offsets = vec![0; num_nodes + 1];
        for &(u, v, w) in &arcs {
            let max = u.max(v);
            assert!(
                max < num_nodes,
                "Node {max} does not exist (the graph has {num_nodes} nodes)"
            );
            assert!(
                w >= W::ZERO,
                "Arc ({u}, {v}) has negative weight {w}: weights must be nonnegative"
            );
            offsets[u + 1] += 1;
        }
        for i in 0..num_nodes {
            offsets[i + 1] += offsets[i];
        }
        let mut succ = vec![0; arcs.len()];
        let mut weights = vec![W::ZERO; arcs.len()];
        // Per-node cursors into the flat arrays.
        let mut cursor = offsets.clone();
        for (u, v, w) in arcs {
            succ[cursor[u]] = v;
            weights[cursor[u]] = w;
            cursor[u] += 1;
        }
        Self {
            offsets: offsets.into_boxed_slice(),
            succ: succ.into_boxed_slice(),
            weights: weights.into_boxed_slice(),
        }
    }

    /// Creates a new graph with the same nodes and arcs as the given graph.
    pub fn from_graph<G: WeightedGraph<Weight = W>>(graph: &G) -> Self {
        Self::from_arcs(
            graph.num_nodes(),
            (0..graph.num_nodes())
                .flat_map(|u| graph.successors(u).into_iter().map(move |(v, w)| (u, v, w))),
        )
    }
}

impl<W: Weight> WeightedGraph for CsrGraph<W> {
    type Weight = W;
    type Successors<'succ>
        = core::iter::Zip<
        core::iter::Copied<core::slice::Iter<'succ, usize>>,
        core::iter::Copied<core::slice::Iter<'succ, W>>,
    >
    where
        Self: 'succ;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.succ.len() as u64
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Self::Successors<'_> {
        let start = self.offsets[node];
        let end = self.offsets[node + 1];
        self.succ[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::VecGraph;

    #[test]
    fn test_from_arcs() {
        let g = CsrGraph::from_arcs(4, [(0, 1, 2), (2, 3, 1), (0, 2, 10), (1, 2, 3)]);
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_arcs(), 4);
        assert_eq!(g.successors(0).collect::<Vec<_>>(), vec![(1, 2), (2, 10)]);
        assert_eq!(g.successors(3).count(), 0);
        assert_eq!(g.outdegree(2), 1);
    }

    #[test]
    fn test_from_graph() {
        let v = VecGraph::from_arcs([(0, 1, 2.0_f32), (1, 2, 0.5), (2, 0, 1.5)]);
        let c = CsrGraph::from_graph(&v);
        assert_eq!(c.num_nodes(), v.num_nodes());
        assert_eq!(c.num_arcs(), v.num_arcs());
        for u in 0..v.num_nodes() {
            assert_eq!(
                c.successors(u).collect::<Vec<_>>(),
                v.successors(u).collect::<Vec<_>>()
            );
        }
    }
}
