//! Reducing a list of graphs to one representative per isomorphism class.
//!
//! Valence histograms separate most non-isomorphic graphs for free. Only graphs sharing a histogram
//! with a kept graph are compared by code vectors, and the vectors of kept graphs are generated
//! lazily, in label order, only until a match is found.

use crate::code::{CodeVector, Start};
use crate::error::Result;
use crate::graph::RotationSystem;
use crate::permutable::FHashMap;
use crate::valence::Valences;
use itertools::Itertools;
use log::{debug, trace};

/// Outcome of a reduction, in terms of input indices.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reduction {
    /// Representatives in input order, one per isomorphism class.
    pub kept: Vec<usize>,
    /// For each graph, the representative of its class.
    pub representative: Vec<usize>,
    /// Number of code vectors generated.
    pub generated: usize,
}

impl Reduction {
    /// Members of each class, listed in the order of `kept`.
    pub fn classes(&self) -> Vec<Vec<usize>> {
        let mut members = self.representative.iter().enumerate().map(|(k, &i)| (i, k)).into_group_map();
        self.kept.iter().map(|i| members.remove(i).unwrap_or_default()).collect()
    }
}

pub struct Reducer<'a> {
    graphs: &'a [RotationSystem],
    valences: Vec<Valences>,
    kept: Vec<usize>,
    /// Code vectors generated so far per graph, in label order. Only ever appended to.
    vectors: FHashMap<usize, Vec<CodeVector>>,
    representative: Vec<usize>,
    generated: usize,
}

impl<'a> Reducer<'a> {
    pub fn new(graphs: &'a [RotationSystem]) -> Self {
        Self {
            graphs,
            valences: graphs.iter().map(Valences::of).collect(),
            kept: vec![],
            vectors: FHashMap::default(),
            representative: (0..graphs.len()).collect(),
            generated: 0,
        }
    }

    /// Classifies all graphs. A failing traversal aborts the whole reduction, since the class of the
    /// graph at hand cannot be decided.
    pub fn run(mut self) -> Result<Reduction> {
        for k in 0..self.graphs.len() {
            match self.find_isomorphic_kept(k)? {
                Some(i) => {
                    debug!("Graph {k} is isomorphic to graph {i}.");
                    self.representative[k] = i;
                }
                None => {
                    debug!("Graph {k} starts class {}.", self.kept.len());
                    self.kept.push(k);
                }
            }
        }
        Ok(Reduction { kept: self.kept, representative: self.representative, generated: self.generated })
    }

    fn find_isomorphic_kept(&mut self, k: usize) -> Result<Option<usize>> {
        let candidates = self.kept.iter().cloned().filter(|&i| self.valences[i] == self.valences[k]).collect_vec();
        let Some(&first) = candidates.first() else {
            return Ok(None);
        };
        let graph = &self.graphs[k];
        let Some(start) = Start::from_label(graph, 0) else {
            // Equal histograms of graphs without branches mean equal node counts.
            return Ok(Some(first));
        };
        let vector = start.code_vector(graph)?;
        self.generated += 1;

        if let Some(&i) = candidates.iter().find(|&&i| self.vectors.get(&i).is_some_and(|vs| vs.contains(&vector))) {
            return Ok(Some(i));
        }
        for &i in &candidates {
            if self.extend_until(i, &vector)? {
                return Ok(Some(i));
            }
        }
        self.vectors.insert(k, vec![vector]);
        Ok(None)
    }

    /// Generates further code vectors of graph `i` until one equals `vector` or all starts are used.
    fn extend_until(&mut self, i: usize, vector: &CodeVector) -> Result<bool> {
        let graph = &self.graphs[i];
        let vectors = self.vectors.entry(i).or_default();
        while let Some(start) = Start::from_label(graph, vectors.len()) {
            let next = start.code_vector(graph)?;
            trace!("Generated vector {} of graph {i}.", vectors.len());
            self.generated += 1;
            let found = &next == vector;
            vectors.push(next);
            if found {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// One representative per isomorphism class, in order of first occurrence.
pub fn reduce(graphs: &[RotationSystem]) -> Result<Vec<RotationSystem>> {
    let reduction = Reducer::new(graphs).run()?;
    Ok(reduction.kept.into_iter().map(|i| graphs[i].clone()).collect())
}

/// Isomorphism test for a single pair of planar triply-connected graphs.
pub fn is_isomorphic(a: &RotationSystem, b: &RotationSystem) -> Result<bool> {
    if Valences::of(a) != Valences::of(b) {
        return Ok(false);
    }
    let Some(start) = Start::from_label(a, 0) else {
        return Ok(true);
    };
    let vector = start.code_vector(a)?;
    for start in Start::all(b) {
        if start.code_vector(b)? == vector {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeMatrix;
    use crate::error::Error;
    use crate::graph::families::{complete3, faces, octahedron, prism, stacked, wheel};
    use crate::permutable::Permutable;

    /// Prisms stacked twice, with equal valences but not isomorphic.
    fn twins() -> (RotationSystem, RotationSystem) {
        let a = RotationSystem::new(vec![
            vec![1, 7, 6, 3, 2], vec![2, 4, 6, 7, 0], vec![0, 5, 1], vec![5, 0, 6, 4],
            vec![3, 6, 1, 5], vec![4, 2, 3], vec![0, 7, 1, 4, 3], vec![0, 1, 6]]).unwrap();
        let b = RotationSystem::new(vec![
            vec![1, 6, 7, 3, 2], vec![2, 4, 6, 0], vec![0, 5, 1], vec![5, 0, 7, 6, 4],
            vec![3, 6, 1, 5], vec![4, 2, 3], vec![0, 1, 4, 3, 7], vec![0, 6, 3]]).unwrap();
        (a, b)
    }

    fn copy(g: &RotationSystem, seed: usize) -> RotationSystem {
        let h = g.shuffled(seed).rotated(seed);
        if seed % 2 == 0 { h } else { h.mirrored() }
    }

    #[test]
    fn trivial_inputs() {
        assert!(reduce(&[]).unwrap().is_empty());
        assert_eq!(reduce(&[prism(4)]).unwrap(), vec![prism(4)]);
    }

    #[test]
    fn exact_duplicates_collapse() {
        assert_eq!(reduce(&[complete3(), complete3()]).unwrap(), vec![complete3()]);
        for g in [wheel(3), wheel(6), prism(5), octahedron()] {
            let reduction = Reducer::new(&[g.clone(), g.clone()]).run().unwrap();
            assert_eq!(reduction.kept, vec![0]);
            assert_eq!(reduction.representative, vec![0, 0]);
            assert_eq!(reduction.generated, 2);
        }
    }

    #[test]
    fn relabelled_copies_collapse() {
        for g in [wheel(5), prism(6), octahedron()] {
            let graphs = (0..6).map(|seed| copy(&g, seed)).collect_vec();
            assert_eq!(reduce(&graphs).unwrap(), vec![graphs[0].clone()]);
        }
    }

    #[test]
    fn different_valences_are_never_traversed() {
        let graphs = [complete3(), wheel(3), wheel(4), prism(3), octahedron(), RotationSystem::new(vec![]).unwrap()];
        let reduction = Reducer::new(&graphs).run().unwrap();
        assert_eq!(reduction.kept, (0..graphs.len()).collect_vec());
        assert_eq!(reduction.generated, 0);
    }

    #[test]
    fn equal_valences_are_not_enough() {
        let (a, b) = twins();
        assert_eq!(Valences::of(&a), Valences::of(&b));
        assert!(!is_isomorphic(&a, &b).unwrap());
        assert!(is_isomorphic(&a, &copy(&a, 3)).unwrap());
        let reduction = Reducer::new(&[a.clone(), b.clone()]).run().unwrap();
        assert_eq!(reduction.kept, vec![0, 1]);
        assert_eq!(reduction.generated, 1 + 2 * a.num_branches());
    }

    #[test]
    fn mixed_dataset() {
        let (a, b) = twins();
        let graphs = [a.clone(), b.clone(), copy(&a, 1), copy(&b, 2), prism(3), wheel(3), copy(&prism(3), 5), copy(&b, 7)];
        let reduction = Reducer::new(&graphs).run().unwrap();
        assert_eq!(reduction.kept, vec![0, 1, 4, 5]);
        assert_eq!(reduction.representative, vec![0, 1, 0, 1, 4, 5, 4, 1]);
        assert_eq!(reduction.classes(), vec![vec![0, 2], vec![1, 3, 7], vec![4, 6], vec![5]]);
        assert_eq!(reduce(&graphs).unwrap(), vec![a, b, prism(3), wheel(3)]);
    }

    #[test]
    fn survivors_keep_input_order() {
        let base = prism(3);
        let family = faces(&base).unwrap().iter().flat_map(|f| {
            let g = stacked(&base, f).unwrap();
            faces(&g).unwrap().iter().map(|f| stacked(&g, f).unwrap()).collect_vec()
        }).collect_vec();
        let graphs = (0..24).map(|i| copy(&family[(i * 7) % family.len()], i)).collect_vec();
        let reduction = Reducer::new(&graphs).run().unwrap();
        assert!(reduction.kept.windows(2).all(|w| w[0] < w[1]));

        let minima = graphs.iter().map(|g| CodeMatrix::of(g).unwrap().min().cloned()).collect_vec();
        assert!(reduction.kept.iter().map(|&i| &minima[i]).all_unique());
        for (k, &i) in reduction.representative.iter().enumerate() {
            assert_eq!(minima[k], minima[i]);
            assert!(i <= k);
        }
        assert_eq!(reduce(&graphs).unwrap(), reduction.kept.iter().map(|&i| graphs[i].clone()).collect_vec());
    }

    #[test]
    fn graphs_without_branches() {
        let empty = |n| RotationSystem::new(vec![vec![]; n]).unwrap();
        let reduction = Reducer::new(&[empty(2), empty(2), empty(3)]).run().unwrap();
        assert_eq!(reduction.kept, vec![0, 2]);
    }

    #[test]
    fn traversal_errors_abort() {
        let malformed = RotationSystem::new_unchecked(vec![vec![1, 2], vec![0, 2], vec![0, 0]]);
        let expected = Err(Error::MalformedGraph { node: 2, target: 1 });
        assert_eq!(reduce(&[complete3(), malformed.clone()]), expected);
        assert_eq!(reduce(&[malformed.clone(), complete3()]), expected);
        assert_eq!(is_isomorphic(&malformed, &complete3()), Err(Error::MalformedGraph { node: 2, target: 1 }));
        assert_eq!(reduce(&[malformed, prism(3)]).map(|r| r.len()), Ok(2));
    }
}
