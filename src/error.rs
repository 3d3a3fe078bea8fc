//! Errors raised while validating or traversing rotation systems.
//! Running out of branches or labels is not an error, see [`crate::select`] and [`crate::label`].

use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// The reverse branch of `target -> node` is missing or not unique.
    #[error("node {node} has no unique branch back to node {target}")]
    MalformedGraph { node: usize, target: usize },

    #[error("branch {branch} at node {node} points to missing node {target}")]
    DanglingBranch { node: usize, branch: usize, target: usize },

    /// No unvisited branch was left where a planar triply-connected input always has one.
    #[error("traversal got stuck at node {node}")]
    TraversalStuck { node: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
