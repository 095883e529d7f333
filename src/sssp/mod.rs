/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Single-source shortest paths.
//!
//! The main entry point is [`DeltaStepping`], a parallel implementation of
//! the Δ-stepping algorithm of Meyer and Sanders with the bucket fusion
//! optimization of Zhang et al.; [`dijkstra`] provides the sequential
//! reference implementation used by [`verify`], and [`SourcePicker`] draws
//! reproducible random sources for benchmarking.

use crate::traits::Weight;

mod buckets;
mod frontier;

mod delta_stepping;
pub use delta_stepping::*;

mod seq;
pub use seq::*;

mod source;
pub use source::*;

/// Errors that can occur when setting up a shortest-path computation.
///
/// All failures are detected before any parallel work starts.
///
/// Implemented by hand rather than via `#[derive(thiserror::Error)]`: a field
/// literally named `source` is unconditionally treated by thiserror's macro
/// as the error-chaining source (requiring it to implement
/// `std::error::Error`), even though here it is just a node index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsspError {
    /// The bucket width Δ must be strictly positive.
    NonPositiveDelta,
    /// The source node does not belong to the graph.
    SourceOutOfRange {
        /// The offending source.
        source: usize,
        /// The number of nodes of the graph.
        num_nodes: usize,
    },
}

impl std::fmt::Display for SsspError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SsspError::NonPositiveDelta => {
                write!(f, "The bucket width delta must be strictly positive")
            }
            SsspError::SourceOutOfRange { source, num_nodes } => write!(
                f,
                "Source node {source} out of range (the graph has {num_nodes} nodes)"
            ),
        }
    }
}

impl std::error::Error for SsspError {}

/// Returns the number of nodes with a finite distance, that is, the number of
/// nodes reachable from the source.
pub fn num_reached<W: Weight>(dist: &[W]) -> usize {
    dist.iter().filter(|&&d| d != W::INF).count()
}
