use crate::bench::datasets::{Dataset, Family};
use crate::code::CodeMatrix;
use crate::reduce::{Reducer, Reduction};
use crate::Result;
use clap::Parser;
use itertools::Itertools;
use log::info;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::io::{stdout, Write};
use timeit::timeit_loops;

#[macro_use]
pub mod datasets;

#[derive(Clone, Debug, Parser, PartialEq)]
pub struct Config {
    /// Graph family to build the datasets from.
    #[arg(short, long, value_enum, default_value = "stacked")]
    pub family: Family,

    /// Family member sizes. Each size is reduced as a separate dataset, unless --joint is given.
    #[arg(short, long, value_delimiter = ',', default_values_t = [3, 4, 5, 6])]
    pub sizes: Vec<usize>,

    /// Reduce all sizes as one dataset.
    #[arg(short, long)]
    pub joint: bool,

    /// Number of relabelled copies added after each family member.
    #[arg(short, long, default_value_t = 3)]
    pub copies: usize,

    /// Seed for relabelling and rotating the copies.
    #[arg(long, default_value_t = 0)]
    pub seed: usize,

    /// Cross check every classification against the minimum of the full code matrix.
    #[arg(long)]
    pub check: bool,

    #[arg(short, long)]
    /// Number of threads to use for parallelism. By default, the number of logical CPUs is used.
    pub threads: Option<usize>,
}

impl Config {
    pub fn datasets(&self) -> Result<Vec<Dataset>> {
        if self.joint {
            return Ok(vec![Dataset::new(self.family, &self.sizes, self.copies, self.seed)?]);
        }
        self.sizes.iter().map(|&size| Dataset::new(self.family, &[size], self.copies, self.seed)).collect()
    }
}

pub struct Benchmark {
    pub datasets: Vec<Dataset>,
    pub config: Config,
}

impl Benchmark {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self { datasets: config.datasets()?, config })
    }

    pub fn timed_run(&self) -> Result<()> {
        let mut result = Ok(());
        let time = timeit_loops!(1, { result = self.run(); });
        println!("Finished in {time:.1}s.");
        result
    }

    pub fn run(&self) -> Result<()> {
        if let Some(threads) = self.config.threads {
            ThreadPoolBuilder::new().num_threads(threads).
                build_global().unwrap();
        }
        println!("dataset graphs branches classes vectors sec");
        for dataset in &self.datasets {
            self.run_dataset(dataset)?;
        }
        Ok(())
    }

    fn run_dataset(&self, dataset: &Dataset) -> Result<()> {
        print_flush!("{} {} {} ", dataset.name, dataset.graphs.len(), dataset.num_branches());
        let mut result: Option<Result<Reduction>> = None;
        let sec = timeit_loops!(1, { result = Some(Reducer::new(&dataset.graphs).run()) });
        let reduction = result.unwrap()?;
        println!("{} {} {sec}", reduction.kept.len(), reduction.generated);
        if self.config.check {
            check(dataset, &reduction)?;
            info!("Classes of {} agree with the code matrix minima.", dataset.name);
        }
        Ok(())
    }
}

/// Panics unless graphs share a class exactly when their code matrix minima agree.
fn check(dataset: &Dataset, reduction: &Reduction) -> Result<()> {
    let minima = dataset.graphs.par_iter().map(|g| CodeMatrix::of(g).map(|m| m.min().cloned())).collect::<Result<Vec<_>>>()?;
    assert_eq!(minima.iter().unique().count(), reduction.kept.len(), "Class count mismatch for {}.", dataset.name);
    for (k, &i) in reduction.representative.iter().enumerate() {
        assert_eq!(minima[k], minima[i], "Graph {k} misclassified in {}.", dataset.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::bench::{Benchmark, Config};
    use crate::bench::datasets::Family;
    use clap::Parser;

    #[test]
    fn test() {
        Benchmark::new(Config::parse_from(["", "--sizes", "3,4", "--copies", "2", "--check"])).unwrap().timed_run().unwrap();
    }

    #[test]
    fn joint() {
        let config = Config::parse_from(["", "-f", "prism", "-s", "3,4,5", "-j"]);
        assert_eq!(config.family, Family::Prism);
        let datasets = config.datasets().unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].graphs.len(), 12);
    }
}
