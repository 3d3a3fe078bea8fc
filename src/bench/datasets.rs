use crate::graph::families::{faces, octahedron, prism, stacked, wheel};
use crate::graph::RotationSystem;
use crate::permutable::Permutable;
use crate::Result;
use clap::ValueEnum;
use itertools::Itertools;

macro_rules! print_flush {
    ( $($t:tt)* ) => {
        {
            print!($($t)*);
            stdout().flush().unwrap();
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Family {
    Wheel,
    Prism,
    /// A prism with a node stacked into each of its faces in turn, giving non-isomorphic graphs
    /// with equal valences.
    Stacked,
    Octahedron,
}

impl Family {
    pub fn members(self, size: usize) -> Result<Vec<RotationSystem>> {
        Ok(match self {
            Family::Wheel => vec![wheel(size)],
            Family::Prism => vec![prism(size)],
            Family::Stacked => {
                let base = prism(size);
                faces(&base)?.iter().map(|f| stacked(&base, f)).try_collect::<_, Vec<_>, _>()?
            }
            Family::Octahedron => vec![octahedron()],
        })
    }
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub name: String,
    pub graphs: Vec<RotationSystem>,
}

impl Dataset {
    /// Members of the family for all sizes, each followed by `copies` relabelled copies with rotated
    /// and, for odd seeds, mirrored embeddings.
    pub fn new(family: Family, sizes: &[usize], copies: usize, seed: usize) -> Result<Self> {
        let mut graphs = vec![];
        for &size in sizes {
            for graph in family.members(size)? {
                let copies = (0..copies).map(|i| {
                    let seed = seed + graphs.len() + i;
                    let copy = graph.shuffled(seed).rotated(seed);
                    if seed % 2 == 0 { copy } else { copy.mirrored() }
                }).collect_vec();
                graphs.push(graph);
                graphs.extend(copies);
            }
        }
        let name = format!("{}{}", format!("{family:?}").to_lowercase(), sizes.iter().join(","));
        Ok(Self { name, graphs })
    }

    pub fn num_branches(&self) -> usize {
        self.graphs.iter().map(|g| g.num_branches()).sum()
    }
}
