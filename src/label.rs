//! Numbering the starts of a graph, so that code vectors can be generated one at a time.
//!
//! Labels `0..B` enumerate the `B` branches node-major and branch-minor with clockwise
//! orientation, labels `B..2B` repeat the enumeration counterclockwise.

use crate::code::Start;
use crate::graph::RotationSystem;
use crate::select::Orientation;

impl Start {
    /// The start with the given label, or `None` once all `2B` starts are used up.
    pub fn from_label(graph: &RotationSystem, label: usize) -> Option<Start> {
        let branches = graph.num_branches();
        let (index, orientation) = match label {
            l if l < branches => (l, Orientation::Clockwise),
            l if l < 2 * branches => (l - branches, Orientation::CounterClockwise),
            _ => return None,
        };
        let offsets = graph.offsets();
        let node = offsets.partition_point(|&offset| offset <= index) - 1;
        Some(Start::new(node, index - offsets[node], orientation))
    }

    /// Inverse of [`Start::from_label`].
    pub fn label(&self, graph: &RotationSystem) -> usize {
        let index = graph.offsets()[self.node] + self.branch;
        if self.orientation.is_reversed() { graph.num_branches() + index } else { index }
    }

    /// All starts of the graph, in label order.
    pub fn all(graph: &RotationSystem) -> impl Iterator<Item=Start> + '_ {
        (0..).map_while(move |label| Start::from_label(graph, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::families::{complete3, prism, wheel};
    use crate::permutable::Permutable;
    use crate::select::Orientation::*;
    use itertools::Itertools;

    #[test]
    fn triangle_labels() {
        let g = complete3();
        assert_eq!(Start::from_label(&g, 0), Some(Start::new(0, 0, Clockwise)));
        assert_eq!(Start::from_label(&g, 1), Some(Start::new(0, 1, Clockwise)));
        assert_eq!(Start::from_label(&g, 2), Some(Start::new(1, 0, Clockwise)));
        assert_eq!(Start::from_label(&g, 5), Some(Start::new(2, 1, Clockwise)));
        assert_eq!(Start::from_label(&g, 6), Some(Start::new(0, 0, CounterClockwise)));
        assert_eq!(Start::from_label(&g, 11), Some(Start::new(2, 1, CounterClockwise)));
        assert_eq!(Start::from_label(&g, 12), None);
        assert_eq!(Start::from_label(&g, 1000), None);
    }

    #[test]
    fn uneven_degrees() {
        let g = wheel(4);
        let starts = Start::all(&g).collect_vec();
        assert_eq!(starts.len(), 2 * g.num_branches());
        assert_eq!(starts[3], Start::new(0, 3, Clockwise));
        assert_eq!(starts[4], Start::new(1, 0, Clockwise));
        assert_eq!(starts[16], Start::new(0, 0, CounterClockwise));
        let expected = (0..g.len()).flat_map(|node| (0..g.degree(node)).map(move |branch| (node, branch))).collect_vec();
        for orientation in Orientation::ALL {
            let found = starts.iter().filter(|s| s.orientation == orientation).map(|s| (s.node, s.branch)).collect_vec();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn labels_are_a_bijection() {
        for g in [complete3(), wheel(6), prism(5)] {
            for (label, start) in Start::all(&g).enumerate() {
                assert_eq!(start.label(&g), label);
            }
        }
    }

    #[test]
    fn isolated_nodes_are_skipped() {
        let g = RotationSystem::new(vec![vec![], vec![2], vec![1], vec![]]).unwrap();
        assert_eq!(Start::all(&g).collect_vec(), vec![
            Start::new(1, 0, Clockwise), Start::new(2, 0, Clockwise),
            Start::new(1, 0, CounterClockwise), Start::new(2, 0, CounterClockwise)]);
        assert_eq!(Start::all(&RotationSystem::new(vec![vec![]]).unwrap()).count(), 0);
        assert_eq!(Start::all(&RotationSystem::new(vec![]).unwrap()).count(), 0);
    }
}
