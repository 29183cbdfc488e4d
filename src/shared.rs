//! Walkers shared between threads.
//!
//! [`SharedWalker`] puts a walker behind a lock so any number of threads can
//! take disjoint pieces of work from it. Each `steal` is one exclusive
//! fetch-and-advance of a child cursor: every pending subtree is handed to
//! exactly one thread, and nothing is visited twice.
//!
//! While draining, a worker that notices idle peers splits the children of
//! its own piece back into a shared queue, so work spreads below the root.

use std::convert::Infallible;
use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use parking_lot::Mutex;
use tracing::debug;

use crate::expand::Expand;
use crate::walker::{WalkStats, Walker};
use crate::WalkError;

/// A walker whose work can be taken concurrently.
pub struct SharedWalker<T, E, R>
where
    E: Expand<T>,
{
    inner: Mutex<Walker<T, E, R>>,

    /// Pieces split off by workers, taken before the root walker
    queue: Mutex<Vec<Walker<T, E, R>>>,
}

impl<T, E, R> SharedWalker<T, E, R>
where
    T: Clone,
    E: Expand<T, Error = Infallible>,
    R: Iterator<Item = T>,
{
    /// Share `walker` between threads.
    pub fn new(walker: Walker<T, E, R>) -> Self {
        Self {
            inner: Mutex::new(walker),
            queue: Mutex::new(Vec::new()),
        }
    }

    /// Take the next independent piece of work.
    ///
    /// Pieces offered back by workers come first. Otherwise hands out the
    /// next pending child subtree of the shared walker while one exists;
    /// after that, the remaining work (the root if not yet emitted, plus any
    /// subtree already being drained) is handed out once as a whole. Returns
    /// `None` when nothing is left.
    pub fn steal(&self) -> Option<Walker<T, E, R>> {
        if let Some(piece) = self.queue.lock().pop() {
            return Some(piece);
        }

        let mut walker = self.inner.lock();
        if let Some(child) = walker.split() {
            return Some(child);
        }
        if walker.is_exhausted() {
            return None;
        }

        debug!(depth = walker.depth(), "handing out residual work");
        let empty = Walker::exhausted(walker.expansion().clone());
        Some(mem::replace(&mut *walker, empty))
    }

    /// Counters of the shared walker itself (not of stolen pieces).
    pub fn stats(&self) -> WalkStats {
        self.inner.lock().stats()
    }

    /// Offer a piece of work to other threads.
    pub fn offer(&self, piece: Walker<T, E, R>) {
        self.queue.lock().push(piece);
    }

    /// Recover the shared walker once sharing is over.
    ///
    /// Pieces still sitting in the queue are dropped.
    pub fn into_inner(self) -> Walker<T, E, R> {
        self.inner.into_inner()
    }
}

impl<T, E, R> SharedWalker<T, E, R>
where
    T: Clone + Send,
    E: Expand<T, Error = Infallible> + Send + Sync,
    E::Children: Send,
    R: Iterator<Item = T> + Send,
{
    /// Drain the walk on `threads` scoped worker threads.
    ///
    /// Each worker steals a piece and drains it through `visit`. While other
    /// workers are waiting, it splits its piece's pending children into the
    /// queue for them. A worker stops once nothing is left to steal and no
    /// other worker holds a piece. Returns the merged counters of every
    /// piece drained.
    pub fn drain_with<F>(&self, threads: usize, visit: F) -> Result<WalkStats, WalkError>
    where
        F: Fn(T) + Sync,
    {
        if threads == 0 {
            return Err(WalkError::InvalidConfiguration(
                "worker thread count must be > 0".to_string(),
            ));
        }

        let visit = &visit;
        let busy = &AtomicUsize::new(0);
        let waiting = &AtomicUsize::new(0);
        let totals = thread::scope(|scope| {
            let workers: Vec<_> = (0..threads)
                .map(|_| scope.spawn(move || self.work(visit, busy, waiting)))
                .collect();

            workers
                .into_iter()
                .map(|worker| worker.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .fold(WalkStats::default(), |acc, stats| acc.merge(&stats))
        });

        Ok(totals.merge(&self.stats()))
    }

    fn work<F>(&self, visit: &F, busy: &AtomicUsize, waiting: &AtomicUsize) -> WalkStats
    where
        F: Fn(T),
    {
        let mut stats = WalkStats::default();
        let mut idle = false;

        loop {
            // Claim before stealing so a piece in hand is always counted.
            busy.fetch_add(1, Ordering::SeqCst);
            if let Some(mut piece) = self.steal() {
                if idle {
                    waiting.fetch_sub(1, Ordering::SeqCst);
                    idle = false;
                }
                loop {
                    if waiting.load(Ordering::SeqCst) > 0 {
                        if let Some(child) = piece.split() {
                            self.offer(child);
                        }
                    }
                    match piece.next() {
                        Some(node) => visit(node),
                        None => break,
                    }
                }
                stats = stats.merge(&piece.stats());
                busy.fetch_sub(1, Ordering::SeqCst);
                continue;
            }

            // Only a worker holding a piece can offer more work.
            if busy.fetch_sub(1, Ordering::SeqCst) == 1 {
                break;
            }
            if !idle {
                waiting.fetch_add(1, Ordering::SeqCst);
                idle = true;
            }
            thread::yield_now();
        }

        if idle {
            waiting.fetch_sub(1, Ordering::SeqCst);
        }
        stats
    }
}

impl<T, E, R> fmt::Debug for SharedWalker<T, E, R>
where
    E: Expand<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedWalker").finish_non_exhaustive()
    }
}
