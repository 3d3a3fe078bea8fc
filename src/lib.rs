pub mod error;
pub mod permutable;
pub mod select;
pub mod code;
pub mod label;
pub mod valence;
pub mod reduce;

pub use error::{Error, Result};
pub use permutable::*;
pub use reduce::{is_isomorphic, reduce};

#[cfg(any(test, feature = "bench"))]
pub mod bench;
