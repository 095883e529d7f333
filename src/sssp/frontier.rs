/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crossbeam_utils::CachePadded;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use sync_cell_slice::SyncCell;

/// The reserved bucket index meaning “no bucket”: when it survives the vote
/// for the next bucket, the computation terminates.
pub(crate) const NO_BUCKET: usize = usize::MAX / 2;

/// The double-buffered shared frontier.
///
/// Two flat buffers alternate roles at each iteration: buffer `iter & 1`
/// holds the nodes of the bucket being drained, while buffer `(iter + 1) & 1`
/// accumulates the nodes of the next bucket. Each buffer comes with three
/// atomic registers: a tail (the number of valid elements, grown only by
/// [`append`](SharedFrontier::append)), a cursor used to claim chunks while
/// draining, and the index of the bucket the buffer refers to (lowered only
/// by [`vote`](SharedFrontier::vote)).
///
/// The buffers must be able to hold one node per arc of the graph: since
/// every successful relaxation enqueues exactly one node and at most one
/// relaxation per arc can succeed per bucket copy, the number of arcs bounds
/// the frontier size.
///
/// Writes to the buffers happen in disjoint regions reserved by
/// fetch-and-add on the tail, and are separated from the reads of the
/// following iteration by a barrier, so no ordering stronger than relaxed is
/// needed on the registers.
pub(crate) struct SharedFrontier<'a> {
    bufs: [&'a [SyncCell<usize>]; 2],
    tails: [CachePadded<AtomicUsize>; 2],
    cursors: [CachePadded<AtomicUsize>; 2],
    buckets: [CachePadded<AtomicUsize>; 2],
}

impl<'a> SharedFrontier<'a> {
    /// Creates a frontier whose first buffer contains the source in bucket
    /// zero and whose second buffer is empty with no associated bucket.
    pub(crate) fn new(
        buf_0: &'a [SyncCell<usize>],
        buf_1: &'a [SyncCell<usize>],
        source: usize,
    ) -> Self {
        // SAFETY: no other thread can access the buffer yet.
        unsafe { buf_0[0].set(source) };
        Self {
            bufs: [buf_0, buf_1],
            tails: [
                CachePadded::new(AtomicUsize::new(1)),
                CachePadded::new(AtomicUsize::new(0)),
            ],
            cursors: [
                CachePadded::new(AtomicUsize::new(0)),
                CachePadded::new(AtomicUsize::new(0)),
            ],
            buckets: [
                CachePadded::new(AtomicUsize::new(0)),
                CachePadded::new(AtomicUsize::new(NO_BUCKET)),
            ],
        }
    }

    /// Returns the bucket index associated with the given buffer.
    pub(crate) fn bucket(&self, slot: usize) -> usize {
        self.buckets[slot].load(Ordering::Relaxed)
    }

    /// Lowers the bucket index associated with the given buffer to `bucket`,
    /// if smaller than the current value.
    pub(crate) fn vote(&self, slot: usize, bucket: usize) {
        self.buckets[slot].fetch_min(bucket, Ordering::Relaxed);
    }

    /// Returns the number of valid elements in the given buffer.
    pub(crate) fn len(&self, slot: usize) -> usize {
        self.tails[slot].load(Ordering::Relaxed)
    }

    /// Claims the next chunk of at most `chunk_size` elements of the given
    /// buffer, or returns `None` if the buffer has been drained.
    pub(crate) fn claim_chunk(&self, slot: usize, chunk_size: usize) -> Option<Range<usize>> {
        let len = self.len(slot);
        let start = self.cursors[slot].fetch_add(chunk_size, Ordering::Relaxed);
        if start >= len {
            return None;
        }
        Some(start..len.min(start + chunk_size))
    }

    /// Returns the element at the given position of the given buffer.
    ///
    /// The position must be smaller than the tail, and must not be
    /// concurrently written.
    pub(crate) fn get(&self, slot: usize, index: usize) -> usize {
        debug_assert!(index < self.len(slot));
        // SAFETY: positions below the tail are only written by append, whose
        // writes are separated from reads by a barrier.
        unsafe { self.bufs[slot][index].get() }
    }

    /// Copies `nodes` into a freshly reserved region of the given buffer.
    pub(crate) fn append(&self, slot: usize, nodes: &[usize]) {
        let start = self.tails[slot].fetch_add(nodes.len(), Ordering::Relaxed);
        let buf = &self.bufs[slot][start..start + nodes.len()];
        for (cell, &node) in buf.iter().zip(nodes) {
            // SAFETY: the region has been reserved by the fetch-and-add
            // above, so no other thread writes it.
            unsafe { cell.set(node) };
        }
    }

    /// Marks the given buffer as empty with no associated bucket, making it
    /// ready to accumulate a new bucket.
    ///
    /// Must be called by a single worker, between the barrier making votes
    /// visible and the barrier ending the iteration.
    pub(crate) fn reset(&self, slot: usize) {
        self.buckets[slot].store(NO_BUCKET, Ordering::Relaxed);
        self.tails[slot].store(0, Ordering::Relaxed);
        self.cursors[slot].store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_cell_slice::SyncSlice;

    #[test]
    fn test_initial_state() {
        let mut buf_0 = vec![0; 4];
        let mut buf_1 = vec![0; 4];
        let frontier = SharedFrontier::new(buf_0.as_sync_slice(), buf_1.as_sync_slice(), 3);
        assert_eq!(frontier.bucket(0), 0);
        assert_eq!(frontier.bucket(1), NO_BUCKET);
        assert_eq!(frontier.len(0), 1);
        assert_eq!(frontier.len(1), 0);
        assert_eq!(frontier.get(0, 0), 3);
    }

    #[test]
    fn test_claim_append_reset() {
        let mut buf_0 = vec![0; 8];
        let mut buf_1 = vec![0; 8];
        let frontier = SharedFrontier::new(buf_0.as_sync_slice(), buf_1.as_sync_slice(), 0);
        frontier.append(1, &[5, 6, 7]);
        frontier.vote(1, 2);
        frontier.vote(1, 4);
        assert_eq!(frontier.bucket(1), 2);
        assert_eq!(frontier.len(1), 3);
        assert_eq!(frontier.claim_chunk(1, 2), Some(0..2));
        assert_eq!(frontier.claim_chunk(1, 2), Some(2..3));
        assert_eq!(frontier.claim_chunk(1, 2), None);
        assert_eq!((frontier.get(1, 0), frontier.get(1, 1)), (5, 6));
        frontier.reset(1);
        assert_eq!(frontier.bucket(1), NO_BUCKET);
        assert_eq!(frontier.len(1), 0);
    }
}
