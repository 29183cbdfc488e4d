//! Ordering and filtering behaviour of sequential walks

mod common;

use common::{binary_children, Tree};
use lazywalk::{walk, walk_forest, Walker};
use test_case::test_case;

#[test_case(1, &[1] ; "max one is a single node")]
#[test_case(2, &[1, 2, 3] ; "one level")]
#[test_case(4, &[1, 2, 4, 5, 3, 6, 7] ; "two levels")]
#[test_case(8, &[1, 2, 4, 8, 9, 5, 10, 11, 3, 6, 12, 13, 7, 14, 15] ; "three levels")]
fn test_binary_tree_preorder(max: u32, expected: &[u32]) {
    let nodes: Vec<u32> = walk(1u32, binary_children(max)).collect();
    assert_eq!(nodes, expected);
}

#[test]
fn test_child_subtrees_are_never_interleaved() {
    // r -> [c1, c2], c1 -> [a, b], c2 -> [c, d], a -> [e]
    let expand = |n: &&str| match *n {
        "r" => vec!["c1", "c2"],
        "c1" => vec!["a", "b"],
        "c2" => vec!["c", "d"],
        "a" => vec!["e"],
        _ => vec![],
    };
    let nodes: Vec<&str> = walk("r", expand).collect();
    assert_eq!(nodes, vec!["r", "c1", "a", "e", "b", "c2", "c", "d"]);
}

#[test]
fn test_absent_children_are_dropped() {
    let expand = |n: &char| match n {
        'x' => vec![Some('a'), None, Some('b')],
        _ => vec![None],
    };
    let nodes: Vec<char> = walk('x', expand).collect();
    assert_eq!(nodes, vec!['x', 'a', 'b']);
}

#[test]
fn test_absent_child_list_is_no_children() {
    let lookup = |n: &u32| if *n == 0 { Some(vec![1u32, 2]) } else { None };
    let nodes: Vec<u32> = walk(0u32, move |n: &u32| lookup(n).into_iter().flatten()).collect();
    assert_eq!(nodes, vec![0, 1, 2]);
}

#[test]
fn test_empty_expansion_yields_only_root() {
    let nodes: Vec<&str> = walk("root", |_: &&str| Vec::<&str>::new()).collect();
    assert_eq!(nodes, vec!["root"]);
}

#[test]
fn test_absent_root_yields_nothing() {
    let walker = Walker::from_optional(None::<u32>, binary_children(8));
    assert_eq!(walker.count(), 0);
}

#[test]
fn test_forest_has_no_synthetic_root() {
    let expand = |n: &u32| if *n < 10 { vec![n * 10, n * 10 + 1] } else { vec![] };
    let nodes: Vec<u32> = walk_forest(vec![1u32, 2], expand).collect();
    assert_eq!(nodes, vec![1, 10, 11, 2, 20, 21]);
}

#[test]
fn test_empty_forest_yields_nothing() {
    let nodes: Vec<u32> = walk_forest(Vec::<u32>::new(), binary_children(8)).collect();
    assert!(nodes.is_empty());
}

#[test]
fn test_forest_roots_are_consumed_lazily() {
    let nodes: Vec<u32> = walk_forest(1u32.., |_: &u32| Vec::<u32>::new()).take(5).collect();
    assert_eq!(nodes, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_full_drain_visits_each_node_once() {
    let tree = Tree::from_parents(&[0, 0, 1, 1, 2, 4, 4, 4, 0]);
    let tree_ref = &tree;
    let mut nodes: Vec<usize> = walk(0usize, move |n: &usize| tree_ref.children_of(*n)).collect();
    assert_eq!(nodes, tree.preorder(0));

    nodes.sort_unstable();
    assert_eq!(nodes, (0..tree.len()).collect::<Vec<_>>());
}

#[test]
fn test_exhausted_walker_stays_exhausted() {
    let mut walker = walk(1u32, binary_children(2));
    assert_eq!(walker.by_ref().count(), 3);
    assert_eq!(walker.next(), None);
    assert!(walker.is_exhausted());
    assert!(walker.split().is_none());
}

#[test]
fn test_splits_partition_the_walk() {
    let mut walker = walk(1u32, binary_children(8));
    let mut pieces = Vec::new();
    while let Some(piece) = walker.split() {
        pieces.push(piece.collect::<Vec<_>>());
    }
    pieces.push(walker.collect());

    assert_eq!(
        pieces,
        vec![
            vec![2, 4, 8, 9, 5, 10, 11],
            vec![3, 6, 12, 13, 7, 14, 15],
            vec![1],
        ]
    );
}
