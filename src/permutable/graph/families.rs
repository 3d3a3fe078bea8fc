//! Planar triply-connected graph families with a consistent (clockwise) embedding.
//! Used as inputs for tests and the benchmark.

use crate::error::{Error, Result};
use crate::graph::RotationSystem;
use crate::permutable::{FHashSet, Permutable};
use itertools::Itertools;

/// A face, as the darts `(node, branch)` walked along its boundary.
pub type Face = Vec<(usize, usize)>;

fn embedded(nodes: Vec<Vec<usize>>) -> RotationSystem {
    let out = RotationSystem::new_unchecked(nodes);
    debug_assert!(out.validate().is_ok(), "{:?}", out);
    out
}

/// The triangle, K3.
pub fn complete3() -> RotationSystem {
    embedded(vec![vec![1, 2], vec![0, 2], vec![0, 1]])
}

/// Hub 0 surrounded by a rim cycle `1..=n`. `wheel(3)` is the tetrahedron.
pub fn wheel(n: usize) -> RotationSystem {
    assert!(n >= 3);
    let hub = (1..=n).collect_vec();
    let rim = (1..=n).map(|i| vec![0, (i + n - 2) % n + 1, i % n + 1]);
    embedded([hub].into_iter().chain(rim).collect())
}

/// Two n-cycles `0..n` and `n..2n` joined by the spokes `(i, n + i)`. `prism(4)` is the cube.
pub fn prism(n: usize) -> RotationSystem {
    assert!(n >= 3);
    let outer = (0..n).map(|i| vec![(i + 1) % n, n + i, (i + n - 1) % n]);
    let inner = (0..n).map(|i| vec![n + (i + n - 1) % n, i, n + (i + 1) % n]);
    embedded(outer.chain(inner).collect())
}

pub fn octahedron() -> RotationSystem {
    embedded(vec![vec![1, 2, 3, 4], vec![0, 4, 5, 2], vec![0, 1, 5, 3], vec![0, 2, 5, 4], vec![0, 3, 5, 1], vec![1, 4, 3, 2]])
}

/// Faces of the embedding. After arriving at `v` from `u`, a face continues along the branch
/// following the reverse branch `v -> u` in `v`'s rotation.
pub fn faces(graph: &RotationSystem) -> Result<Vec<Face>> {
    let mut seen = FHashSet::default();
    let mut faces = vec![];
    for node in 0..graph.len() {
        for branch in 0..graph.degree(node) {
            if seen.contains(&(node, branch)) {
                continue;
            }
            let mut face = vec![];
            let (mut u, mut b) = (node, branch);
            while seen.insert((u, b)) {
                face.push((u, b));
                let v = graph.target(u, b);
                let reverse = graph.reverse_branch(v, u)?;
                (u, b) = (v, (reverse + 1) % graph.degree(v));
            }
            faces.push(face);
        }
    }
    Ok(faces)
}

/// Whether a connected rotation system is embedded in the plane, by Euler's formula V - E + F = 2.
pub fn is_planar_embedding(graph: &RotationSystem) -> Result<bool> {
    let faces = faces(graph)?.len();
    Ok(graph.len() + faces == graph.num_edges() + 2)
}

/// Inserts a new node inside `face`, joined to every node on its boundary.
/// Keeps the embedding planar and the graph triply-connected.
pub fn stacked(graph: &RotationSystem, face: &Face) -> Result<RotationSystem> {
    let new = graph.len();
    let mut nodes = graph.clone().into_nodes();
    let mut corners = vec![];
    for &(u, b) in face {
        let v = graph.target(u, b);
        let position = nodes[v].iter().position(|&t| t == u).ok_or(Error::MalformedGraph { node: v, target: u })?;
        nodes[v].insert(position + 1, new);
        corners.push(v);
    }
    corners.reverse();
    nodes.push(corners);
    Ok(embedded(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_are_planar() {
        let graphs = [complete3(), wheel(3), wheel(7), prism(3), prism(4), prism(8), octahedron()];
        for g in graphs {
            assert!(g.validate().is_ok());
            assert!(is_planar_embedding(&g).unwrap(), "{:?}", g);
        }
    }

    #[test]
    fn face_counts() {
        assert_eq!(faces(&complete3()).unwrap().len(), 2);
        assert_eq!(faces(&wheel(5)).unwrap().len(), 6);
        let cube = faces(&prism(4)).unwrap();
        assert_eq!(cube.len(), 6);
        assert!(cube.iter().all(|f| f.len() == 4));
        assert_eq!(faces(&octahedron()).unwrap().iter().map(|f| f.len()).collect_vec(), vec![3; 8]);
    }

    #[test]
    fn mirrored_embedding_is_planar() {
        assert!(is_planar_embedding(&prism(5).mirrored()).unwrap());
        assert!(!is_planar_embedding(&RotationSystem::new(vec![vec![1, 2, 3], vec![0, 2, 3], vec![0, 3, 1], vec![0, 1, 2]]).unwrap()).unwrap());
    }

    #[test]
    fn stacking() {
        let g = prism(3);
        for face in faces(&g).unwrap() {
            let h = stacked(&g, &face).unwrap();
            assert!(h.validate().is_ok());
            assert!(is_planar_embedding(&h).unwrap());
            assert_eq!(h.len(), 7);
            assert_eq!(h.degree(6), face.len());
            assert_eq!(h.num_edges(), g.num_edges() + face.len());
        }
    }
}
