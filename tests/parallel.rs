//! Concurrent draining: rayon and shared work stealing

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ThreadId};
use std::time::Duration;

use common::binary_children;
use lazywalk::{walk, walk_forest, SharedWalker};
use parking_lot::Mutex;

fn sorted(mut nodes: Vec<u32>) -> Vec<u32> {
    nodes.sort_unstable();
    nodes
}

#[cfg(feature = "parallel")]
mod rayon_walk {
    use rayon::prelude::*;

    use super::*;
    use lazywalk::par_walk;

    #[test]
    fn test_par_walk_yields_same_multiset() {
        let sequential: Vec<u32> = walk(1u32, binary_children(1 << 12)).collect();
        let parallel: Vec<u32> = par_walk(1u32, binary_children(1 << 12)).collect();
        assert_eq!(sorted(parallel), sorted(sequential));
    }

    #[test]
    fn test_par_walk_over_forest() {
        let count = walk_forest(vec![1u32, 2, 3], binary_children(64))
            .into_par_walk()
            .count();
        let expected: usize = [1u32, 2, 3]
            .iter()
            .map(|&root| walk(root, binary_children(64)).count())
            .sum();
        assert_eq!(count, expected);
    }

    #[test]
    fn test_par_walk_find_any_stops_early() {
        let found = par_walk(1u32, binary_children(1 << 16)).find_any(|n| *n == 12345);
        assert_eq!(found, Some(12345));
    }
}

#[test]
fn test_shared_walker_drains_everything_once() {
    let shared = SharedWalker::new(walk(1u32, binary_children(1 << 10)));
    let seen = Mutex::new(Vec::new());

    let stats = shared
        .drain_with(4, |node| seen.lock().push(node))
        .expect("positive thread count");

    let expected: Vec<u32> = walk(1u32, binary_children(1 << 10)).collect();
    assert_eq!(stats.emitted, expected.len());
    assert_eq!(sorted(seen.into_inner()), sorted(expected));
}

#[test]
fn test_concurrent_steals_never_duplicate() {
    let roots: Vec<u32> = (1..=200).collect();
    let shared = SharedWalker::new(walk_forest(roots.clone(), |_: &u32| Vec::<u32>::new()));
    let seen = Mutex::new(Vec::new());
    let steals = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                while let Some(piece) = shared.steal() {
                    steals.fetch_add(1, Ordering::Relaxed);
                    seen.lock().extend(piece);
                }
            });
        }
    });

    assert_eq!(steals.load(Ordering::Relaxed), roots.len());
    assert_eq!(sorted(seen.into_inner()), roots);
}

#[test]
fn test_single_thread_drain_matches_sequential_set() {
    let shared = SharedWalker::new(walk(1u32, binary_children(32)));
    let seen = Mutex::new(Vec::new());
    shared
        .drain_with(1, |node| seen.lock().push(node))
        .expect("positive thread count");

    let expected: Vec<u32> = walk(1u32, binary_children(32)).collect();
    assert_eq!(sorted(seen.into_inner()), sorted(expected));
}

#[test]
fn test_drain_spreads_work_below_the_root() {
    let shared = SharedWalker::new(walk(1u32, binary_children(1 << 10)));
    let per_thread: Mutex<HashMap<ThreadId, usize>> = Mutex::new(HashMap::new());

    shared
        .drain_with(8, |_| {
            thread::sleep(Duration::from_micros(50));
            *per_thread.lock().entry(thread::current().id()).or_default() += 1;
        })
        .expect("positive thread count");

    let per_thread = per_thread.into_inner();
    assert_eq!(per_thread.values().sum::<usize>(), (1 << 11) - 1);
    assert!(
        per_thread.len() > 2,
        "only {} of 8 workers visited nodes: {:?}",
        per_thread.len(),
        per_thread.values().collect::<Vec<_>>()
    );
}
