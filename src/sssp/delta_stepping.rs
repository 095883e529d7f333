/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rayon::ThreadPool;
use std::sync::atomic::Ordering;
use std::sync::Barrier;
use std::time::Instant;
use sync_cell_slice::SyncSlice;

use crate::sssp::buckets::LocalBuckets;
use crate::sssp::frontier::{SharedFrontier, NO_BUCKET};
use crate::sssp::SsspError;
use crate::traits::{AtomicWeight, Weight, WeightedGraph};

/// The default number of frontier elements claimed by a worker at a time.
pub const DEFAULT_GRANULARITY: usize = 64;

/// The default maximum size of a local bucket drained by fusion.
pub const DEFAULT_FUSION_LIMIT: usize = 1000;

/// Parallel Δ-stepping single-source shortest paths with bucket fusion.
///
/// Nodes are kept in buckets of width Δ according to their tentative
/// distance, and buckets are drained in increasing order; all relaxations
/// within a bucket may proceed in parallel. Buckets are thread-local growable
/// vectors, so they never need synchronization. Each iteration drains one
/// bucket in two phases separated by barriers: in the first phase, the
/// current shared bucket is processed by all workers, which claim chunks of
/// the frontier and relax the outgoing arcs of each node, placing improved
/// successors in their own local buckets; during this phase each worker also
/// votes on the next bucket (its smallest nonempty one). In the second phase,
/// each worker copies its local portion of the elected bucket into the shared
/// frontier.
///
/// Once a node is added to a bucket it is never removed, even if its distance
/// later improves and it now belongs to a lower bucket: stale entries are
/// skipped when the shared bucket is drained, which removes enough redundant
/// work to be faster than eager deletion.
///
/// Bucket fusion lets a worker that is left with a small local bucket of the
/// current priority keep draining it within the same iteration: this extends
/// the current priority level with purely local work, without violating the
/// priority-based execution order, and greatly reduces the number of
/// iterations (and barriers) on large-diameter graphs such as road networks.
///
/// Distances are updated with lock-free compare-and-swap operations, so the
/// result is the exact shortest-path distance for every node regardless of
/// the schedule; unreachable nodes keep the sentinel
/// [`INF`](crate::traits::Weight::INF). The choice of Δ is left to the
/// caller: a good value for uniformly weighted graphs is close to the mean
/// arc weight, while road networks need much smaller values.
///
/// The struct is configured with setters and executed via
/// [`solve`](Self::solve), which can be called multiple times with different
/// sources.
///
/// # Examples
///
/// ```
/// use deltastep::prelude::*;
///
/// let graph = VecGraph::from_arcs([(0, 1, 1), (0, 2, 4), (1, 2, 2), (2, 3, 1)]);
/// let sssp = DeltaStepping::new(&graph, 2).unwrap();
/// let dist = sssp.solve(0, &thread_pool![]).unwrap();
/// assert_eq!(&*dist, &[0, 1, 3, 4]);
/// ```
pub struct DeltaStepping<'a, G: WeightedGraph> {
    graph: &'a G,
    delta: G::Weight,
    granularity: usize,
    fusion_limit: usize,
    logging: bool,
}

/// Per-worker counters, aggregated at the end of a computation.
#[derive(Clone, Copy, Debug, Default)]
struct WorkerCounters {
    #[cfg(feature = "count_relax")]
    arc_visits: u64,
    #[cfg(feature = "count_time")]
    current_bucket: std::time::Duration,
    #[cfg(feature = "count_time")]
    fusion: std::time::Duration,
    #[cfg(feature = "count_time")]
    copy: std::time::Duration,
    #[cfg(feature = "count_time")]
    barriers: std::time::Duration,
}

impl WorkerCounters {
    #[inline(always)]
    fn count_arc_visit(&mut self) {
        #[cfg(feature = "count_relax")]
        {
            self.arc_visits += 1;
        }
    }
}

/// Relaxes the outgoing arcs of `node`, placing each improved successor in
/// the local bucket of its new tentative distance.
///
/// Improvements happen via compare-and-swap, so concurrent relaxations of the
/// same node leave the minimum of the attempted distances. The read of the
/// distance of `node` needs no synchronization: distances are nonincreasing,
/// so a stale value can only weaken the improvement, never break it.
fn relax_arcs<W: Weight, G: WeightedGraph<Weight = W>>(
    graph: &G,
    delta: W,
    dist: &[W::Atomic],
    buckets: &mut LocalBuckets,
    node: usize,
    counters: &mut WorkerCounters,
) {
    for (succ, weight) in graph.successors(node) {
        counters.count_arc_visit();
        let new_dist = dist[node].load(Ordering::Relaxed).add_saturating(weight);
        let mut old_dist = dist[succ].load(Ordering::Acquire);
        while new_dist < old_dist {
            match dist[succ].compare_exchange_weak(
                old_dist,
                new_dist,
                Ordering::Release,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    buckets.push(new_dist.bucket_index(delta), succ);
                    break;
                }
                // The swap failed: recheck against the updated distance.
                Err(actual) => old_dist = actual,
            }
        }
    }
}

impl<'a, W: Weight, G: WeightedGraph<Weight = W> + Sync> DeltaStepping<'a, G> {
    /// Creates a new Δ-stepping computation over the given graph with bucket
    /// width `delta`.
    ///
    /// All arc weights must be nonnegative (the graph builders in
    /// [`crate::graphs`] enforce this).
    pub fn new(graph: &'a G, delta: W) -> Result<Self, SsspError> {
        if !(delta > W::ZERO) {
            return Err(SsspError::NonPositiveDelta);
        }
        Ok(Self {
            graph,
            delta,
            granularity: DEFAULT_GRANULARITY,
            fusion_limit: DEFAULT_FUSION_LIMIT,
            logging: false,
        })
    }

    /// Sets the number of frontier elements a worker claims at a time while
    /// draining the shared bucket.
    ///
    /// # Panics
    ///
    /// Panics if `granularity` is zero.
    pub fn granularity(&mut self, granularity: usize) -> &mut Self {
        assert!(granularity > 0, "The granularity must be positive");
        self.granularity = granularity;
        self
    }

    /// Sets the maximum size of a local bucket that fusion will drain without
    /// a global barrier.
    ///
    /// The threshold bounds the latency skew between workers; zero disables
    /// fusion altogether.
    pub fn fusion_limit(&mut self, fusion_limit: usize) -> &mut Self {
        self.fusion_limit = fusion_limit;
        self
    }

    /// Enables or disables per-iteration logging.
    pub fn logging(&mut self, logging: bool) -> &mut Self {
        self.logging = logging;
        self
    }

    /// Computes the shortest-path distances from `source` to all nodes,
    /// using all the threads of the given pool.
    ///
    /// Returns the distance of each node from `source`; unreachable nodes
    /// have distance [`INF`](crate::traits::Weight::INF).
    ///
    /// Note that the computation takes over the whole pool until it
    /// completes.
    pub fn solve(
        &self,
        source: usize,
        thread_pool: &ThreadPool,
    ) -> Result<Box<[W]>, SsspError> {
        let num_nodes = self.graph.num_nodes();
        if source >= num_nodes {
            return Err(SsspError::SourceOutOfRange { source, num_nodes });
        }

        let dist = (0..num_nodes)
            .map(|_| W::new_atomic(W::INF))
            .collect::<Vec<_>>();
        dist[source].store(W::ZERO, Ordering::Relaxed);

        // Each successful relaxation enqueues one node, and per iteration at
        // most one relaxation per arc succeeds, so the number of arcs bounds
        // the frontier size.
        let capacity = (self.graph.num_arcs() as usize).max(1);
        let mut buf_0 = vec![0_usize; capacity];
        let mut buf_1 = vec![0_usize; capacity];
        let frontier = SharedFrontier::new(buf_0.as_sync_slice(), buf_1.as_sync_slice(), source);

        let barrier = Barrier::new(thread_pool.current_num_threads());
        let start = Instant::now();

        let counters = thread_pool.broadcast(|ctx| {
            let worker = ctx.index();
            let mut counters = WorkerCounters::default();
            let mut buckets = LocalBuckets::new();
            let mut iter = 0;
            let mut step_start = start;
            #[cfg(feature = "count_time")]
            let mut phase_start = Instant::now();

            while frontier.bucket(iter & 1) != NO_BUCKET {
                let cur = iter & 1;
                let nxt = (iter + 1) & 1;
                let cur_bucket = frontier.bucket(cur);
                let cur_bucket_start = W::bucket_start(cur_bucket, self.delta);

                // Drain the current shared bucket, skipping nodes whose
                // distance has dropped below the bucket (stale entries and
                // duplicates).
                while let Some(range) = frontier.claim_chunk(cur, self.granularity) {
                    for i in range {
                        let node = frontier.get(cur, i);
                        if dist[node].load(Ordering::Relaxed) >= cur_bucket_start {
                            relax_arcs(
                                self.graph,
                                self.delta,
                                &dist,
                                &mut buckets,
                                node,
                                &mut counters,
                            );
                        }
                    }
                }
                #[cfg(feature = "count_time")]
                {
                    counters.current_bucket += phase_start.elapsed();
                    phase_start = Instant::now();
                }

                // Bucket fusion: drain the local portion of the current
                // bucket while it stays small, extending the current
                // priority level without a barrier.
                loop {
                    let len = buckets.bucket_len(cur_bucket);
                    if len == 0 || len >= self.fusion_limit {
                        break;
                    }
                    for node in buckets.take(cur_bucket) {
                        relax_arcs(
                            self.graph,
                            self.delta,
                            &dist,
                            &mut buckets,
                            node,
                            &mut counters,
                        );
                    }
                }
                #[cfg(feature = "count_time")]
                {
                    counters.fusion += phase_start.elapsed();
                    phase_start = Instant::now();
                }

                // Vote for the next bucket.
                if let Some(bucket) = buckets.first_nonempty_from(cur_bucket) {
                    frontier.vote(nxt, bucket);
                }
                barrier.wait();
                #[cfg(feature = "count_time")]
                {
                    counters.barriers += phase_start.elapsed();
                    phase_start = Instant::now();
                }

                // One worker retires the drained buffer; the others proceed
                // directly to the copy, which only touches the other buffer.
                if worker == 0 {
                    if self.logging {
                        log::info!(
                            "bucket {}: {:.5} ms, frontier size {}",
                            cur_bucket,
                            step_start.elapsed().as_secs_f64() * 1E3,
                            frontier.len(cur)
                        );
                        step_start = Instant::now();
                    }
                    frontier.reset(cur);
                }

                // Copy the local portion of the elected bucket into the
                // shared frontier.
                let next_bucket = frontier.bucket(nxt);
                if buckets.bucket_len(next_bucket) > 0 {
                    let batch = buckets.take(next_bucket);
                    frontier.append(nxt, &batch);
                }
                iter += 1;
                #[cfg(feature = "count_time")]
                {
                    counters.copy += phase_start.elapsed();
                    phase_start = Instant::now();
                }

                barrier.wait();
                #[cfg(feature = "count_time")]
                {
                    counters.barriers += phase_start.elapsed();
                    phase_start = Instant::now();
                }
            }

            if worker == 0 && self.logging {
                log::info!("took {} iterations", iter);
            }
            counters
        });

        self.log_counters(&counters);

        Ok(dist
            .into_iter()
            .map(AtomicWeight::into_inner)
            .collect::<Box<[_]>>())
    }

    fn log_counters(&self, _counters: &[WorkerCounters]) {
        #[cfg(feature = "count_relax")]
        {
            let total: u64 = _counters.iter().map(|c| c.arc_visits).sum();
            log::info!("Number of relaxations: {}", total);
        }
        #[cfg(feature = "count_time")]
        {
            let num_workers = _counters.len() as f64;
            for (name, total) in [
                (
                    "current_bucket",
                    _counters.iter().map(|c| c.current_bucket).sum::<std::time::Duration>(),
                ),
                (
                    "bucket_fusion",
                    _counters.iter().map(|c| c.fusion).sum::<std::time::Duration>(),
                ),
                (
                    "copy_buckets",
                    _counters.iter().map(|c| c.copy).sum::<std::time::Duration>(),
                ),
                (
                    "barriers",
                    _counters.iter().map(|c| c.barriers).sum::<std::time::Duration>(),
                ),
            ] {
                log::info!(
                    "{} time: {:.6} seconds",
                    name,
                    total.as_secs_f64() / num_workers
                );
            }
        }
    }
}
