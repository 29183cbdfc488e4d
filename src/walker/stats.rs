//! Per-walker counters
//!
//! Tracks how much of the tree a walker has actually touched, which is
//! what laziness is measured against.

/// Counters collected while a walker runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkStats {
    /// Nodes handed to the consumer
    pub emitted: usize,

    /// Calls made to the expansion function
    pub expansions: usize,

    /// Subtrees detached through `split`
    pub splits: usize,

    /// Deepest stack of active frames reached
    pub max_depth: usize,
}

impl WalkStats {
    pub(crate) fn record_emit(&mut self, depth: usize) {
        self.emitted += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub(crate) fn record_expansion(&mut self) {
        self.expansions += 1;
    }

    pub(crate) fn record_split(&mut self) {
        self.splits += 1;
    }

    /// Fold counters from another walker (e.g. one split off this one)
    pub fn merge(&self, other: &WalkStats) -> WalkStats {
        WalkStats {
            emitted: self.emitted + other.emitted,
            expansions: self.expansions + other.expansions,
            splits: self.splits + other.splits,
            max_depth: self.max_depth.max(other.max_depth),
        }
    }

    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "Emitted: {} nodes\nExpansions: {}\nSplits: {}\nMax depth: {}",
            self.emitted, self.expansions, self.splits, self.max_depth
        )
    }
}
