//! Weinberg's code vectors.
//!
//! A traversal walks every oriented branch of a rotation system exactly once. On reaching a new node
//! it leaves by the next branch after the one it arrived on. On reaching a known node over an edge
//! whose reverse branch is still unvisited, it turns around (U-turn) and walks that reverse branch
//! back. Otherwise it continues with the next unvisited branch after the arrival branch. The visited
//! node sequence, relabelled in order of first appearance, is the code vector. Isomorphic planar
//! triply-connected graphs have the same set of code vectors.

use crate::error::{Error, Result};
use crate::graph::RotationSystem;
use crate::permutable::Permutable;
use crate::select::{next_branch, Orientation};
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::Deref;

/// Where a traversal starts: the first branch walked, and the orientation applied at every node.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Start {
    pub node: usize,
    pub branch: usize,
    pub orientation: Orientation,
}

impl Start {
    pub fn new(node: usize, branch: usize, orientation: Orientation) -> Self {
        Self { node, branch, orientation }
    }

    pub fn code_vector(&self, graph: &RotationSystem) -> Result<CodeVector> {
        code_vector(graph, *self)
    }
}

/// Node sequence of a traversal, relabelled so that nodes are numbered by first appearance.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CodeVector(pub Vec<usize>);

impl CodeVector {
    fn relabelled(path: &[usize], num_nodes: usize) -> Self {
        let mut labels = vec![None; num_nodes];
        let mut next = 0;
        Self(path.iter().map(|&node| *labels[node].get_or_insert_with(|| {
            next += 1;
            next - 1
        })).collect())
    }
}

impl Deref for CodeVector {
    type Target = Vec<usize>;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl From<Vec<usize>> for CodeVector {
    fn from(items: Vec<usize>) -> Self { Self(items) }
}

/// Runs one traversal of `graph` from `start` and returns its code vector.
/// Fails with [`Error::MalformedGraph`] on a missing reverse branch and with
/// [`Error::TraversalStuck`] if the traversal cannot continue although unvisited branches remain
/// reachable; both only happen for inputs that are not planar triply-connected rotation systems.
pub fn code_vector(graph: &RotationSystem, start: Start) -> Result<CodeVector> {
    assert!(start.branch < graph.degree(start.node), "No branch {} at node {}.", start.branch, start.node);
    Traversal::new(graph, start).run(start)
}

struct Traversal<'a> {
    graph: &'a RotationSystem,
    orientation: Orientation,
    visited_nodes: Vec<bool>,
    /// Flags of oriented branches, node-major.
    visited_branches: Vec<bool>,
    path: Vec<usize>,
}

impl<'a> Traversal<'a> {
    fn new(graph: &'a RotationSystem, start: Start) -> Self {
        let mut visited_nodes = vec![false; graph.len()];
        visited_nodes[start.node] = true;
        let mut path = Vec::with_capacity(graph.num_branches() + 1);
        path.push(start.node);
        Self { graph, orientation: start.orientation, visited_nodes, visited_branches: vec![false; graph.num_branches()], path }
    }

    fn flags(&self, node: usize) -> &[bool] {
        let offsets = self.graph.offsets();
        &self.visited_branches[offsets[node]..offsets[node + 1]]
    }

    fn is_visited(&self, node: usize, branch: usize) -> bool {
        self.flags(node)[branch]
    }

    /// Every step marks a fresh branch, which bounds the number of steps by the number of branches.
    fn visit(&mut self, node: usize, branch: usize) -> Result<()> {
        let flag = &mut self.visited_branches[self.graph.offsets()[node] + branch];
        if *flag {
            return Err(Error::TraversalStuck { node });
        }
        *flag = true;
        Ok(())
    }

    fn next_branch(&self, node: usize, reference: usize) -> Option<usize> {
        next_branch(self.flags(node), reference, self.orientation)
    }

    fn run(mut self, start: Start) -> Result<CodeVector> {
        let (mut current, mut branch) = (start.node, start.branch);
        let mut next = self.graph.target(current, branch);
        loop {
            let reverse = self.graph.reverse_branch(next, current)?;
            self.visit(current, branch)?;
            self.path.push(next);

            if !self.visited_nodes[next] {
                self.visited_nodes[next] = true;
                branch = self.next_branch(next, reverse).ok_or(Error::TraversalStuck { node: next })?;
                current = next;
            } else if !self.is_visited(next, reverse) {
                // U-turn: walk the reverse branch back and pivot at the current node.
                self.visit(next, reverse)?;
                self.path.push(current);
                branch = self.next_branch(current, branch).ok_or(Error::TraversalStuck { node: current })?;
            } else {
                match self.next_branch(next, reverse) {
                    Some(b) => {
                        current = next;
                        branch = b;
                    }
                    None => break,
                }
            }
            next = self.graph.target(current, branch);
        }

        Ok(CodeVector::relabelled(&self.path, self.graph.len()))
    }
}

/// All code vectors of a graph, in label order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeMatrix(pub Vec<CodeVector>);

impl CodeMatrix {
    /// Runs the traversals for all starts in parallel.
    pub fn of(graph: &RotationSystem) -> Result<Self> {
        Start::all(graph).collect_vec().into_par_iter().
            map(|start| start.code_vector(graph)).collect::<Result<Vec<_>>>().map(Self)
    }

    /// The smallest code vector, a canonical form: well-formed graphs are isomorphic iff their
    /// minima agree. `None` for graphs without branches.
    pub fn min(&self) -> Option<&CodeVector> { self.0.iter().min() }

    pub fn contains(&self, vector: &CodeVector) -> bool { self.0.contains(vector) }
}

impl Deref for CodeMatrix {
    type Target = Vec<CodeVector>;
    fn deref(&self) -> &Self::Target { &self.0 }
}
