/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use criterion::{criterion_group, criterion_main, Criterion};
use deltastep::prelude::*;

fn bench_delta_stepping(c: &mut Criterion) {
    let num_nodes = 10_000;
    let graph = CsrGraph::from_arcs(
        num_nodes,
        UniformRandom::<i32>::new(num_nodes, 100_000, 100, 0).arcs(),
    );
    let mut picker = SourcePicker::new(&graph, None);
    let source = picker.pick_next();
    let pool = thread_pool![];

    let sssp = DeltaStepping::new(&graph, 50).unwrap();
    c.bench_function("delta_stepping_uniform_10k", |b| {
        b.iter(|| sssp.solve(source, &pool).unwrap())
    });

    c.bench_function("dijkstra_uniform_10k", |b| b.iter(|| dijkstra(&graph, source)));
}

criterion_group!(benches, bench_delta_stepping);
criterion_main!(benches);
