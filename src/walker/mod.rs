//! Lazy depth-first walker
//!
//! A walker unfolds an implicit tree one node at a time. It holds the node it
//! was built for (yielded first), a cursor over that node's not-yet-visited
//! children, and a stack of cursors for the descendants currently being
//! drained. Children are computed only when the walk actually reaches them.
//!
//! The cursor over the walker's own children is shared by two operations:
//! [`Walker::try_advance`] pulls the next sibling from it when the current
//! subtree is finished, and [`Walker::try_split`] detaches the next sibling
//! as an independent walker for another consumer.

mod frontier;
mod stats;

pub use stats::WalkStats;

use std::convert::Infallible;
use std::fmt;
use std::iter::{self, FusedIterator};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::expand::{Expand, Present};
use frontier::Frontier;

/// Lazy, splittable pre-order traversal of an implicit tree or forest.
///
/// `R` is the iterator over forest roots; it is [`iter::Empty`] for walkers
/// built from a single node.
pub struct Walker<T, E, R = iter::Empty<T>>
where
    E: Expand<T>,
{
    expand: Arc<E>,

    /// Node this walker was built for, emitted before anything else
    this: Option<T>,

    /// Cursor over this walker's own children (or forest roots)
    frontier: Frontier<T, E::Children, R>,

    /// Cursors of descendants being drained, innermost last
    active: Vec<Frontier<T, E::Children, R>>,

    stats: WalkStats,
}

impl<T, E> Walker<T, E>
where
    T: Clone,
    E: Expand<T>,
{
    /// Walk the tree rooted at `root`. The root is the first node yielded.
    pub fn from_node(root: T, expand: E) -> Self {
        debug!("creating walker for a single root");
        Self::node(root, Arc::new(expand))
    }

    /// Walk the tree rooted at `root`; an absent root yields nothing.
    pub fn from_optional(root: Option<T>, expand: E) -> Self {
        match root {
            Some(root) => Self::from_node(root, expand),
            None => Self::exhausted(Arc::new(expand)),
        }
    }
}

impl<T, E, I> Walker<T, E, Present<I, T>>
where
    T: Clone,
    E: Expand<T>,
    I: Iterator,
    I::Item: Into<Option<T>>,
{
    /// Walk every tree of a forest, one after the other.
    ///
    /// No synthetic root is emitted. Absent roots are skipped.
    pub fn from_nodes<S>(roots: S, expand: E) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        debug!("creating walker for a forest");
        Self {
            expand: Arc::new(expand),
            this: None,
            frontier: Frontier::Roots(Present::new(roots)),
            active: Vec::new(),
            stats: WalkStats::default(),
        }
    }
}

impl<T, E, R> Walker<T, E, R>
where
    T: Clone,
    E: Expand<T>,
    R: Iterator<Item = T>,
{
    fn node(root: T, expand: Arc<E>) -> Self {
        Self {
            expand,
            frontier: Frontier::Deferred(root.clone()),
            this: Some(root),
            active: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    pub(crate) fn exhausted(expand: Arc<E>) -> Self {
        Self {
            expand,
            this: None,
            frontier: Frontier::Done,
            active: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    /// Produce the next node in pre-order, or `None` once the walk is over.
    ///
    /// An expansion error is returned as-is. The node whose expansion failed
    /// contributes no children; calling again resumes with the next pending
    /// node.
    pub fn try_advance(&mut self) -> Result<Option<T>, E::Error> {
        if let Some(root) = self.this.take() {
            self.stats.record_emit(0);
            return Ok(Some(root));
        }

        loop {
            let node = if self.active.is_empty() {
                match self.next_pending()? {
                    Some(node) => node,
                    None => return Ok(None),
                }
            } else {
                let innermost = self.active.len() - 1;
                match self.active[innermost].next_node(&*self.expand, &mut self.stats)? {
                    Some(node) => node,
                    None => {
                        self.active.pop();
                        continue;
                    }
                }
            };

            self.active.push(Frontier::Deferred(node.clone()));
            self.stats.record_emit(self.active.len());
            return Ok(Some(node));
        }
    }

    /// Detach the next not-yet-started child subtree as its own walker.
    ///
    /// The returned walker is owned by the caller; this walker will never
    /// visit that subtree. Returns `None` once no child is left to hand out.
    pub fn try_split(&mut self) -> Result<Option<Self>, E::Error> {
        let Some(child) = self.next_pending()? else {
            return Ok(None);
        };
        self.stats.record_split();
        trace!(splits = self.stats.splits, "detached child subtree");
        Ok(Some(Self::node(child, Arc::clone(&self.expand))))
    }

    fn next_pending(&mut self) -> Result<Option<T>, E::Error> {
        self.frontier.next_node(&*self.expand, &mut self.stats)
    }

    /// Whether the walker is known to have nothing left.
    ///
    /// A walker whose own children are still unexpanded reports `false`
    /// even if the expansion will turn out empty.
    pub fn is_exhausted(&self) -> bool {
        self.this.is_none() && self.active.is_empty() && self.frontier.is_done()
    }

    /// Number of descendant levels currently being drained.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Counters for this walker (not including walkers split off it).
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Shared handle to the expansion function.
    pub(crate) fn expansion(&self) -> &Arc<E> {
        &self.expand
    }

    /// Turn into an iterator over `Result<T, E::Error>`.
    pub fn into_results(self) -> TryWalk<T, E, R> {
        TryWalk { walker: self }
    }
}

impl<T, E, R> Walker<T, E, R>
where
    T: Clone,
    E: Expand<T, Error = Infallible>,
    R: Iterator<Item = T>,
{
    /// Infallible form of [`Walker::try_split`].
    pub fn split(&mut self) -> Option<Self> {
        match self.try_split() {
            Ok(child) => child,
            Err(never) => match never {},
        }
    }
}

impl<T, E, R> Iterator for Walker<T, E, R>
where
    T: Clone,
    E: Expand<T, Error = Infallible>,
    R: Iterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.try_advance() {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }
}

impl<T, E, R> FusedIterator for Walker<T, E, R>
where
    T: Clone,
    E: Expand<T, Error = Infallible>,
    R: Iterator<Item = T>,
{
}

impl<T, E, R> fmt::Debug for Walker<T, E, R>
where
    E: Expand<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("root_pending", &self.this.is_some())
            .field("frontier", &self.frontier)
            .field("depth", &self.active.len())
            .field("stats", &self.stats)
            .finish()
    }
}

/// Iterator over a walk whose expansion can fail.
///
/// Each expansion error is yielded once; the walk then continues with the
/// next pending node, skipping the children of the node that failed.
pub struct TryWalk<T, E, R = iter::Empty<T>>
where
    E: Expand<T>,
{
    walker: Walker<T, E, R>,
}

impl<T, E, R> TryWalk<T, E, R>
where
    E: Expand<T>,
{
    /// Borrow the underlying walker.
    pub fn walker(&self) -> &Walker<T, E, R> {
        &self.walker
    }

    /// Recover the underlying walker.
    pub fn into_inner(self) -> Walker<T, E, R> {
        self.walker
    }
}

impl<T, E, R> Iterator for TryWalk<T, E, R>
where
    T: Clone,
    E: Expand<T>,
    R: Iterator<Item = T>,
{
    type Item = Result<T, E::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walker.try_advance().transpose()
    }
}

impl<T, E, R> fmt::Debug for TryWalk<T, E, R>
where
    E: Expand<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryWalk").field("walker", &self.walker).finish()
    }
}
