use crate::error::{Error, Result};
use crate::permutable::{FHashSet, Permutable};
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::fmt;
use std::fmt::{Debug, Formatter};

pub mod families;

/// Ordered graph given as a rotation system: the branches of each node are stored in the cyclic
/// order of a planar embedding. Each undirected edge appears as two branches, one at each end.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct RotationSystem {
    nodes: Vec<Vec<usize>>,
    /// Cumulative branch counts, `offsets[i]` branches precede node `i` in node-major order.
    offsets: Vec<usize>,
}

impl RotationSystem {
    /// Fails unless every branch `u -> v` has exactly one reverse branch `v -> u`.
    pub fn new(nodes: Vec<Vec<usize>>) -> Result<Self> {
        let out = Self::new_unchecked(nodes);
        out.validate()?;
        Ok(out)
    }

    /// Skips validation. Violations surface as errors once the graph is traversed.
    pub fn new_unchecked(nodes: Vec<Vec<usize>>) -> Self {
        let offsets = [0].into_iter().chain(nodes.iter().scan(0, |sum, branches| {
            *sum += branches.len();
            Some(*sum)
        })).collect();
        Self { nodes, offsets }
    }

    pub fn validate(&self) -> Result<()> {
        for (node, branches) in self.nodes.iter().enumerate() {
            for (branch, &target) in branches.iter().enumerate() {
                if target >= self.len() {
                    return Err(Error::DanglingBranch { node, branch, target });
                }
                if target == node || self.nodes[target].iter().filter(|&&t| t == node).count() != 1 {
                    return Err(Error::MalformedGraph { node: target, target: node });
                }
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn branches(&self, node: usize) -> &[usize] { &self.nodes[node] }

    pub fn target(&self, node: usize, branch: usize) -> usize { self.nodes[node][branch] }

    pub fn degree(&self, node: usize) -> usize { self.nodes[node].len() }

    pub fn degrees(&self) -> impl ExactSizeIterator<Item=usize> + '_ {
        self.nodes.iter().map(|branches| branches.len())
    }

    pub fn max_degree(&self) -> Option<usize> { self.degrees().max() }

    /// Number of oriented branches, twice the number of edges.
    pub fn num_branches(&self) -> usize { self.offsets[self.len()] }

    pub fn num_edges(&self) -> usize { self.num_branches() / 2 }

    /// Index of the branch at `node` pointing to `target`.
    pub fn reverse_branch(&self, node: usize, target: usize) -> Result<usize> {
        self.nodes.get(node).and_then(|branches| branches.iter().position(|&t| t == target)).
            ok_or(Error::MalformedGraph { node, target })
    }

    /// Cumulative branch counts, of length `len() + 1`.
    pub(crate) fn offsets(&self) -> &[usize] { &self.offsets }

    /// Undirected edges `(i, j)` with `i < j`.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.nodes.iter().enumerate().flat_map(|(i, branches)|
            branches.iter().filter(move |&&j| i < j).map(move |&j| (i, j))).collect()
    }

    /// The mirror image embedding, every rotation reversed.
    pub fn mirrored(&self) -> Self {
        Self::new_unchecked(self.nodes.iter().map(|branches| branches.iter().rev().cloned().collect()).collect())
    }

    /// The same embedding with each rotation started at a random branch.
    pub fn rotated(&self, seed: usize) -> Self {
        let mut rng = Pcg64Mcg::seed_from_u64(seed as u64);
        Self::new_unchecked(self.nodes.iter().map(|branches| {
            let mut branches = branches.clone();
            if !branches.is_empty() {
                let shift = rng.gen_range(0..branches.len());
                branches.rotate_left(shift);
            }
            branches
        }).collect())
    }

    pub fn into_nodes(self) -> Vec<Vec<usize>> { self.nodes }
}

impl TryFrom<Vec<Vec<usize>>> for RotationSystem {
    type Error = Error;

    fn try_from(nodes: Vec<Vec<usize>>) -> Result<Self> { Self::new(nodes) }
}

impl Permutable for RotationSystem {
    fn len(&self) -> usize { self.nodes.len() }

    /// Relabelling keeps every rotation, only targets are renamed.
    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }

        self.nodes.swap(i, j);
        let mut neighbors = self.nodes[i].iter().chain(self.nodes[j].iter()).cloned().collect::<FHashSet<_>>();
        neighbors.insert(i);
        neighbors.insert(j);
        for n in neighbors {
            for target in &mut self.nodes[n] {
                if *target == i {
                    *target = j;
                } else if *target == j {
                    *target = i;
                }
            }
        }
        *self = Self::new_unchecked(std::mem::take(&mut self.nodes));
    }
}

impl Debug for RotationSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rotations = self.nodes.iter().map(|branches| format!("{:?}", branches)).join(", ");
        write!(f, "N={}, E={}: [{rotations}]", self.len(), self.num_edges())
    }
}
