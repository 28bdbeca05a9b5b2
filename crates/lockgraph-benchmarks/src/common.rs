//! Common utilities for benchmarks

use criterion::Criterion;
use lockgraph_core::types::{LockEntry, LockTable, Manifest};
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Synthetic project with `packages` locked packages.
///
/// Package `i` depends on the next `fan_out` packages, wrapping around, so
/// the graph is densely shared and cyclic once `fan_out > 0`. The manifest
/// depends on the first `fan_out.max(1)` packages.
pub fn synthetic_project(packages: usize, fan_out: usize) -> (Manifest, LockTable) {
    let name = |i: usize| format!("pkg-{}", i);
    let mut table = LockTable::new();

    for i in 0..packages {
        let mut entry = LockEntry::new(format!("1.{}.0", i))
            .with_resolved(format!("https://registry.yarnpkg.com/{0}/-/{0}-1.{1}.0.tgz", name(i), i));
        for step in 1..=fan_out {
            let dep = (i + step) % packages;
            if dep != i {
                entry = entry.with_dependency(name(dep), "^1.0.0");
            }
        }
        table.insert(&name(i), "^1.0.0", entry);
    }

    let mut manifest = Manifest::new("bench-app").with_version("0.0.0");
    for i in 0..fan_out.max(1).min(packages) {
        manifest = manifest.with_dependency(name(i), "^1.0.0");
    }

    (manifest, table)
}

/// The lock table of [`synthetic_project`] serialized as JSON
pub fn synthetic_lock_json(packages: usize, fan_out: usize) -> String {
    let (_, table) = synthetic_project(packages, fan_out);
    serde_json::to_string(&table).unwrap_or_default()
}
