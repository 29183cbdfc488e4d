//! Forward-only cursor over the children of one node
//!
//! A frontier starts out holding the node itself and only asks the
//! expansion for children when the first child is requested. Once drained it
//! stays drained.

use std::fmt;
use std::mem;

use tracing::trace;

use super::WalkStats;
use crate::expand::Expand;

/// Pending work for one level of the walk
pub(crate) enum Frontier<T, C, R> {
    /// Node whose children have not been computed yet
    Deferred(T),

    /// Children of an expanded node, not yet visited
    Children(C),

    /// Top-level roots of a forest walk
    Roots(R),

    /// Nothing left at this level
    Done,
}

impl<T, C, R> Frontier<T, C, R>
where
    C: Iterator<Item = T>,
    R: Iterator<Item = T>,
{
    /// Fetch the next unvisited node at this level, expanding on first use.
    ///
    /// A failing expansion leaves the frontier `Done`.
    pub(crate) fn next_node<E>(
        &mut self,
        expand: &E,
        stats: &mut WalkStats,
    ) -> Result<Option<T>, E::Error>
    where
        E: Expand<T, Children = C>,
    {
        loop {
            match mem::replace(self, Frontier::Done) {
                Frontier::Deferred(node) => {
                    stats.record_expansion();
                    trace!("expanding deferred node");
                    *self = Frontier::Children(expand.expand(&node)?);
                }
                Frontier::Children(mut children) => {
                    let next = children.next();
                    if next.is_some() {
                        *self = Frontier::Children(children);
                    }
                    return Ok(next);
                }
                Frontier::Roots(mut roots) => {
                    let next = roots.next();
                    if next.is_some() {
                        *self = Frontier::Roots(roots);
                    }
                    return Ok(next);
                }
                Frontier::Done => return Ok(None),
            }
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        matches!(self, Frontier::Done)
    }
}

impl<T, C, R> fmt::Debug for Frontier<T, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frontier::Deferred(_) => f.write_str("Deferred"),
            Frontier::Children(_) => f.write_str("Children"),
            Frontier::Roots(_) => f.write_str("Roots"),
            Frontier::Done => f.write_str("Done"),
        }
    }
}
