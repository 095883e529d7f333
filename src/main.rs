/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use dsi_progress_logger::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use deltastep::prelude::*;

#[cfg(feature = "float_weights")]
type W = f32;
#[cfg(not(feature = "float_weights"))]
type W = i32;

/// Parses the number of threads from a string.
fn num_threads_parser(arg: &str) -> Result<usize> {
    let num_threads = arg.parse::<usize>()?;
    ensure!(num_threads > 0, "Number of threads must be greater than 0");
    Ok(num_threads)
}

#[derive(Parser, Debug)]
#[command(name = "deltastep", version)]
/// Computes single-source shortest paths with parallel Δ-stepping.
///
/// The graph is read from an arc-list file (one whitespace-separated
/// `source target weight` triple per line) or generated uniformly at random.
struct Cli {
    /// An arc-list file; lines starting with `#` are ignored.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Generates a uniform random graph with this number of nodes instead of
    /// reading a file.
    #[arg(long, conflicts_with = "file", requires = "random_arcs")]
    random_nodes: Option<usize>,

    /// The number of arcs of the random graph.
    #[arg(long, requires = "random_nodes")]
    random_arcs: Option<usize>,

    /// The maximum arc weight of the random graph.
    #[arg(long, default_value = "255")]
    max_weight: W,

    /// The seed for the random graph generator.
    #[arg(long, default_value_t = 0)]
    graph_seed: u64,

    /// The bucket width Δ.
    #[arg(short, long)]
    delta: W,

    /// The source node; when absent, sources are drawn at random among nodes
    /// with nonzero outdegree.
    #[arg(short, long)]
    source: Option<usize>,

    /// The number of sources to run.
    #[arg(long, default_value_t = 1)]
    num_sources: usize,

    /// The number of trials per source.
    #[arg(short = 'n', long, default_value_t = 1)]
    trials: usize,

    /// Verifies each result against a sequential Dijkstra computation.
    #[arg(short, long)]
    verify: bool,

    /// Logs the bucket processed at each iteration.
    #[arg(short, long)]
    logging: bool,

    #[arg(short = 'j', long, default_value_t = rayon::current_num_threads().max(1), value_parser = num_threads_parser)]
    /// The number of threads to use.
    num_threads: usize,

    /// The number of frontier elements a worker claims at a time (advanced
    /// option).
    #[arg(long, default_value_t = DEFAULT_GRANULARITY)]
    granularity: usize,

    /// The maximum size of a local bucket drained by fusion (advanced
    /// option).
    #[arg(long, default_value_t = DEFAULT_FUSION_LIMIT)]
    fusion_limit: usize,

    /// The seed for random source selection.
    #[arg(long, default_value_t = DEFAULT_SOURCE_SEED)]
    source_seed: u64,
}

/// Reads a whitespace-separated arc-list file; the number of nodes is one
/// plus the largest node appearing in some arc.
fn read_arc_list(path: &Path) -> Result<CsrGraph<W>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    let mut pl = ProgressLogger::default();
    pl.item_name("arc");
    pl.start("Reading arcs...");
    let mut arcs = Vec::new();
    let mut num_nodes = 0;
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line =
            line.with_context(|| format!("Error reading line {} of {}", i + 1, path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(u), Some(v), Some(w)) = (tokens.next(), tokens.next(), tokens.next()) else {
            bail!("Line {} of {} does not contain an arc", i + 1, path.display());
        };
        let u = u
            .parse::<usize>()
            .with_context(|| format!("Error parsing line {} of {}", i + 1, path.display()))?;
        let v = v
            .parse::<usize>()
            .with_context(|| format!("Error parsing line {} of {}", i + 1, path.display()))?;
        let w = w
            .parse::<W>()
            .with_context(|| format!("Error parsing line {} of {}", i + 1, path.display()))?;
        ensure!(
            w >= W::ZERO,
            "Negative weight {} at line {} of {}",
            w,
            i + 1,
            path.display()
        );
        num_nodes = num_nodes.max(u.max(v) + 1);
        arcs.push((u, v, w));
        pl.light_update();
    }
    pl.done();
    Ok(CsrGraph::from_arcs(num_nodes, arcs))
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    ensure!(
        cli.file.is_some() != cli.random_nodes.is_some(),
        "Exactly one of --file and --random-nodes must be given"
    );
    ensure!(cli.trials > 0, "The number of trials must be positive");

    let graph = match (&cli.file, cli.random_nodes, cli.random_arcs) {
        (Some(path), _, _) => read_arc_list(path)?,
        (None, Some(num_nodes), Some(num_arcs)) => {
            ensure!(
                cli.max_weight >= W::ONE,
                "The maximum weight must be at least one"
            );
            let mut pl = ProgressLogger::default();
            pl.item_name("arc");
            pl.expected_updates(Some(num_arcs));
            pl.start("Generating random graph...");
            let generator = UniformRandom::new(num_nodes, num_arcs, cli.max_weight, cli.graph_seed);
            let graph = CsrGraph::from_arcs(num_nodes, generator.arcs().inspect(|_| pl.light_update()));
            pl.done();
            graph
        }
        _ => unreachable!(),
    };
    log::info!(
        "Graph has {} nodes and {} arcs",
        graph.num_nodes(),
        graph.num_arcs()
    );

    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.num_threads)
        .build()
        .context("Failed to create thread pool")?;
    log::info!("Using {} threads, delta = {}", cli.num_threads, cli.delta);

    let mut sssp = DeltaStepping::new(&graph, cli.delta)?;
    sssp.granularity(cli.granularity)
        .fusion_limit(cli.fusion_limit)
        .logging(cli.logging);

    let mut picker = SourcePicker::with_seed(&graph, cli.source, cli.source_seed);
    let mut all_ok = true;
    for _ in 0..cli.num_sources {
        let source = picker.pick_next();
        log::info!("Source: {}", source);

        let mut total = Duration::ZERO;
        let mut last_dist = None;
        for _ in 0..cli.trials {
            let start = Instant::now();
            let dist = sssp.solve(source, &thread_pool)?;
            let elapsed = start.elapsed();
            log::info!("Trial time: {:.5} s", elapsed.as_secs_f64());
            total += elapsed;
            last_dist = Some(dist);
        }
        log::info!(
            "Average time: {:.5} s",
            (total / cli.trials as u32).as_secs_f64()
        );

        if let Some(dist) = last_dist {
            log::info!(
                "The shortest-path tree reaches {} of {} nodes",
                num_reached(&dist),
                graph.num_nodes()
            );
            if cli.verify {
                let start = Instant::now();
                let ok = verify(&graph, source, &dist);
                log::info!("Verification: {}", if ok { "PASS" } else { "FAIL" });
                log::info!("Verification time: {:.5} s", start.elapsed().as_secs_f64());
                all_ok &= ok;
            }
        }
    }
    ensure!(all_ok, "Verification failed");

    Ok(())
}
