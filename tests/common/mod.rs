//! Shared fixtures for walker integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

/// Implicit binary tree: `n -> [2n, 2n + 1]` while `n < max`.
pub fn binary_children(max: u32) -> impl Fn(&u32) -> Vec<u32> + Clone + Send + Sync {
    move |n: &u32| {
        if *n < max {
            vec![n * 2, n * 2 + 1]
        } else {
            Vec::new()
        }
    }
}

/// Explicit tree over node ids `0..len`, stored as child lists.
#[derive(Debug, Clone)]
pub struct Tree {
    children: Vec<Vec<usize>>,
}

impl Tree {
    /// Build from a parent table: `parents[i]` is the parent of node `i + 1`.
    pub fn from_parents(parents: &[usize]) -> Self {
        let mut children = vec![Vec::new(); parents.len() + 1];
        for (offset, &parent) in parents.iter().enumerate() {
            children[parent].push(offset + 1);
        }
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn children_of(&self, node: usize) -> Vec<usize> {
        self.children[node].clone()
    }

    /// Reference pre-order, computed recursively.
    pub fn preorder(&self, node: usize) -> Vec<usize> {
        let mut out = vec![node];
        for &child in &self.children[node] {
            out.extend(self.preorder(child));
        }
        out
    }

    pub fn depth_of(&self, node: usize) -> usize {
        self.children
            .iter()
            .position(|kids| kids.contains(&node))
            .map_or(0, |parent| self.depth_of(parent) + 1)
    }
}

/// Records every node the expansion was asked about.
#[derive(Debug, Default)]
pub struct ExpansionLog {
    expanded: RefCell<Vec<u32>>,
}

impl ExpansionLog {
    pub fn record(&self, node: u32) {
        self.expanded.borrow_mut().push(node);
    }

    pub fn expanded(&self) -> Vec<u32> {
        self.expanded.borrow().clone()
    }
}
