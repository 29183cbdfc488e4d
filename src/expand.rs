//! Expansion functions: the only source of tree structure a walker knows.
//!
//! A node's children are produced on demand by an [`Expand`] implementation.
//! Plain closures `Fn(&T) -> I` are expansions out of the box; entries of
//! `I` may be `T` or `Option<T>`, and `None` entries are dropped before they
//! ever reach a walker.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

/// Maps a node to its direct children.
///
/// Walkers call [`Expand::expand`] at most once per visited node, and never
/// for a node outside the part of the tree the consumer actually reaches.
pub trait Expand<T> {
    /// Lazy sequence of children.
    type Children: Iterator<Item = T>;

    /// Error raised by a failing expansion.
    type Error;

    /// Compute the children of `node`.
    fn expand(&self, node: &T) -> Result<Self::Children, Self::Error>;
}

impl<T, F, I> Expand<T> for F
where
    F: Fn(&T) -> I,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
{
    type Children = Present<I::IntoIter, T>;
    type Error = Infallible;

    fn expand(&self, node: &T) -> Result<Self::Children, Self::Error> {
        Ok(Present::new(self(node)))
    }
}

/// Adapter for expansions that can fail.
///
/// Wraps a closure `Fn(&T) -> Result<I, E>`. The error is reported by
/// [`Walker::try_advance`](crate::Walker::try_advance) and the failing node
/// contributes no children.
#[derive(Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F> fmt::Debug for Fallible<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fallible(..)")
    }
}

impl<T, F, I, E> Expand<T> for Fallible<F>
where
    F: Fn(&T) -> Result<I, E>,
    I: IntoIterator,
    I::Item: Into<Option<T>>,
{
    type Children = Present<I::IntoIter, T>;
    type Error = E;

    fn expand(&self, node: &T) -> Result<Self::Children, Self::Error> {
        (self.0)(node).map(Present::new)
    }
}

/// Iterator that skips absent entries of an expansion result or root list.
pub struct Present<I, T> {
    inner: I,
    _node: PhantomData<fn() -> T>,
}

impl<I, T> Present<I, T> {
    /// Wrap anything iterable whose entries convert into `Option<T>`.
    pub fn new<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: source.into_iter(),
            _node: PhantomData,
        }
    }
}

impl<I, T> Iterator for Present<I, T>
where
    I: Iterator,
    I::Item: Into<Option<T>>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.by_ref().find_map(Into::into)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<I: fmt::Debug, T> fmt::Debug for Present<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Present").field("inner", &self.inner).finish()
    }
}
