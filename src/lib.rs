//! # Lazy depth-first tree walking
//!
//! Turns an implicit tree, given only by a root and a "children of"
//! function, into a flat pre-order sequence of nodes computed on demand.
//!
//! ## Core Idea
//!
//! 1. **Deferred expansion**: a node's children are computed only when the
//!    walk reaches them, so `take(k)` on an infinite tree terminates
//! 2. **One cursor, two consumers**: the same "next pending child" step moves
//!    a walker on to its next subtree and detaches subtrees for other threads
//! 3. **Explicit stack**: depth costs one frame on a `Vec`, not one native
//!    call frame
//!
//! ## Usage Example
//!
//! ```
//! use lazywalk::walk;
//!
//! let nodes: Vec<u32> = walk(1u32, |n| if *n < 8 { vec![n * 2, n * 2 + 1] } else { vec![] })
//!     .collect();
//! assert_eq!(nodes, [1, 2, 4, 8, 9, 5, 10, 11, 3, 6, 12, 13, 7, 14, 15]);
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod expand;     // Expansion contract and absent-entry filtering
pub mod walker;     // The lazy splittable walker
pub mod shared;     // Concurrent work stealing over one walker
pub mod fs;         // Directory trees as an expansion
#[cfg(feature = "parallel")]
pub mod parallel;   // Rayon parallel iterator

// Re-exports for convenience
pub use expand::{Expand, Fallible, Present};
pub use walker::{TryWalk, WalkStats, Walker};
pub use shared::SharedWalker;
#[cfg(feature = "parallel")]
pub use parallel::ParWalk;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the walking utilities
#[derive(Error, Debug)]
pub enum WalkError {
    /// Directory entries could not be listed
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        /// Directory being listed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// File type of an entry could not be determined
    #[error("failed to read metadata for {}: {source}", path.display())]
    Metadata {
        /// Entry being inspected
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Walk the tree under `root` in pre-order, `root` first.
pub fn walk<T, F, I>(root: T, expand: F) -> Walker<T, F>
where
    T: Clone,
    F: Fn(&T) -> I,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
{
    Walker::from_node(root, expand)
}

/// Walk each tree of a forest in turn, without a synthetic root.
pub fn walk_forest<T, S, F, I>(roots: S, expand: F) -> Walker<T, F, Present<S::IntoIter, T>>
where
    T: Clone,
    S: IntoIterator,
    S::Item: Into<Option<T>>,
    F: Fn(&T) -> I,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
{
    Walker::from_nodes(roots, expand)
}

/// Walk the tree under `root` with an expansion that can fail.
pub fn try_walk<T, F, I, E>(root: T, expand: F) -> TryWalk<T, Fallible<F>>
where
    T: Clone,
    F: Fn(&T) -> Result<I, E>,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
{
    Walker::from_node(root, Fallible(expand)).into_results()
}

/// Forest form of [`try_walk`].
pub fn try_walk_forest<T, S, F, I, E>(
    roots: S,
    expand: F,
) -> TryWalk<T, Fallible<F>, Present<S::IntoIter, T>>
where
    T: Clone,
    S: IntoIterator,
    S::Item: Into<Option<T>>,
    F: Fn(&T) -> Result<I, E>,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
{
    Walker::from_nodes(roots, Fallible(expand)).into_results()
}

/// Walk the tree under `root` on the rayon thread pool.
#[cfg(feature = "parallel")]
pub fn par_walk<T, F, I>(root: T, expand: F) -> ParWalk<T, F, std::iter::Empty<T>>
where
    T: Clone + Send,
    F: Fn(&T) -> I + Send + Sync,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
    I::IntoIter: Send,
{
    Walker::from_node(root, expand).into_par_walk()
}
