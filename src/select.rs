//! Choosing the next branch of a traversal in cyclic rotation order.

/// Direction in which a node's rotation is scanned.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Orientation {
    /// Increasing branch indices.
    #[default]
    Clockwise,
    /// Decreasing branch indices.
    CounterClockwise,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Clockwise, Orientation::CounterClockwise];

    pub fn is_reversed(self) -> bool { self == Orientation::CounterClockwise }

    /// The branch `steps` positions after `branch` in this orientation, around a node of the given degree.
    fn step(self, branch: usize, steps: usize, degree: usize) -> usize {
        match self {
            Orientation::Clockwise => (branch + steps) % degree,
            Orientation::CounterClockwise => (branch + degree - steps % degree) % degree,
        }
    }
}

/// First unvisited branch after `reference`, scanning the rotation cyclically in the given orientation.
/// Each branch is examined exactly once and `reference` itself comes last.
/// Returns `None` if all branches of the node are visited.
pub fn next_branch(visited: &[bool], reference: usize, orientation: Orientation) -> Option<usize> {
    let degree = visited.len();
    (1..=degree).map(|steps| orientation.step(reference, steps, degree)).find(|&b| !visited[b])
}
