//! Rayon integration.
//!
//! A walker is an unindexed producer: rayon's splitter asks it to detach child
//! subtrees while there are idle threads, and each piece is drained
//! sequentially afterwards. Nodes arrive in no particular order; the set of
//! nodes is the same as a sequential walk.

use std::convert::Infallible;
use std::fmt;

use rayon::iter::plumbing::{bridge_unindexed, Folder, UnindexedConsumer, UnindexedProducer};
use rayon::iter::ParallelIterator;

use crate::expand::Expand;
use crate::walker::Walker;

/// Parallel iterator over the nodes of a walk.
pub struct ParWalk<T, E, R>
where
    E: Expand<T>,
{
    walker: Walker<T, E, R>,
}

impl<T, E, R> ParWalk<T, E, R>
where
    E: Expand<T>,
{
    pub(crate) fn new(walker: Walker<T, E, R>) -> Self {
        Self { walker }
    }
}

impl<T, E, R> Walker<T, E, R>
where
    T: Clone + Send,
    E: Expand<T, Error = Infallible> + Send + Sync,
    E::Children: Send,
    R: Iterator<Item = T> + Send,
{
    /// Drain this walker with rayon.
    pub fn into_par_walk(self) -> ParWalk<T, E, R> {
        ParWalk::new(self)
    }
}

impl<T, E, R> ParallelIterator for ParWalk<T, E, R>
where
    T: Clone + Send,
    E: Expand<T, Error = Infallible> + Send + Sync,
    E::Children: Send,
    R: Iterator<Item = T> + Send,
{
    type Item = T;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        bridge_unindexed(WalkProducer(self.walker), consumer)
    }
}

struct WalkProducer<T, E, R>(Walker<T, E, R>)
where
    E: Expand<T>;

impl<T, E, R> UnindexedProducer for WalkProducer<T, E, R>
where
    T: Clone + Send,
    E: Expand<T, Error = Infallible> + Send + Sync,
    E::Children: Send,
    R: Iterator<Item = T> + Send,
{
    type Item = T;

    fn split(mut self) -> (Self, Option<Self>) {
        let detached = self.0.split().map(WalkProducer);
        (self, detached)
    }

    fn fold_with<F>(self, folder: F) -> F
    where
        F: Folder<Self::Item>,
    {
        folder.consume_iter(self.0)
    }
}

impl<T, E, R> fmt::Debug for ParWalk<T, E, R>
where
    E: Expand<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParWalk").field("walker", &self.walker).finish()
    }
}
