//! Valence (degree) histograms, a cheap invariant: graphs with different histograms are never isomorphic.

use crate::graph::RotationSystem;
use std::ops::Deref;

/// `valences[d]` is the number of nodes with degree `d`, up to the maximum degree.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Valences(pub Vec<usize>);

impl Valences {
    pub fn of(graph: &RotationSystem) -> Self {
        let mut out = vec![0; graph.max_degree().map_or(0, |d| d + 1)];
        for degree in graph.degrees() {
            out[degree] += 1;
        }
        Self(out)
    }
}

impl Deref for Valences {
    type Target = Vec<usize>;
    fn deref(&self) -> &Self::Target { &self.0 }
}
