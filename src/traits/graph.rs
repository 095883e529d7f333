/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The basic trait to access weighted graphs.

use crate::traits::Weight;

/// A directed graph with weighted arcs and random access to successors.
///
/// The graph is immutable for the duration of a computation, and successor
/// enumeration must be safe to call concurrently from several threads (all
/// implementations in [`crate::graphs`] are `Sync`). Self-loops and parallel
/// arcs are allowed.
pub trait WeightedGraph {
    /// The type of the arc weights.
    type Weight: Weight;

    /// The type of the iterator over the successors of a node, returning
    /// pairs of successors and arc weights.
    type Successors<'succ>: IntoIterator<Item = (usize, Self::Weight)>
    where
        Self: 'succ;

    /// Returns the number of nodes in the graph.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs in the graph.
    fn num_arcs(&self) -> u64;

    /// Returns the successors of a node together with the associated arc
    /// weights.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not smaller than the number of nodes.
    fn successors(&self, node: usize) -> Self::Successors<'_>;

    /// Returns the number of outgoing arcs of a node.
    fn outdegree(&self, node: usize) -> usize {
        self.successors(node).into_iter().count()
    }
}

impl<'a, G: WeightedGraph> WeightedGraph for &'a G {
    type Weight = G::Weight;
    type Successors<'succ>
        = G::Successors<'succ>
    where
        Self: 'succ;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        (**self).num_arcs()
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Self::Successors<'_> {
        (**self).successors(node)
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        (**self).outdegree(node)
    }
}
