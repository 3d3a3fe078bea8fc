use clap::Parser;
use weinberg_iso::bench::{Benchmark, Config};

/// Benchmark for reducing planar triply-connected graphs to isomorphism class representatives
/// with Weinberg's code vectors. Datasets consist of members of a graph family, each followed by
/// relabelled copies with rotated and possibly mirrored embeddings.
/// Set RUST_LOG=debug to log every classification.
#[derive(Clone, Debug, Parser, PartialEq)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    config: Config,
}

fn main() -> weinberg_iso::Result<()> {
    env_logger::init();
    Benchmark::new(Args::parse().config)?.timed_run()
}
