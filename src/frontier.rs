use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::graph::{Cost, NodeIndex};

/// Fresh distance vector: every entry `+inf`.
pub fn unreached(node_count: usize) -> Vec<Cost> {
    vec![Cost::INFINITY; node_count]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    cost: OrderedFloat<Cost>,
    potential: OrderedFloat<Cost>,
    node: NodeIndex,
}

// Min-heap by cost. Equal costs pop the larger potential first, i.e. the entry that
// is closer to the source in raw terms, then the lower node index.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.potential.cmp(&other.potential))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of `(tentative cost, node)` without decrease-key.
///
/// A node may sit in the heap several times; only the entry matching the node's
/// current best distance is live. Ordering is total, so a run is fully determined
/// by its inputs.
#[derive(Debug)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
}

impl Frontier {
    pub fn start(node: NodeIndex, cost: Cost, potential: Cost) -> Self {
        let mut frontier = Self {
            heap: BinaryHeap::new(),
        };
        frontier.push(node, cost, potential);
        frontier
    }

    /// `potential` only breaks ties between equal costs; pass `0.0` when there is none.
    pub fn push(&mut self, node: NodeIndex, cost: Cost, potential: Cost) {
        debug_assert!(!cost.is_nan());
        self.heap.push(Entry {
            cost: OrderedFloat(cost),
            potential: OrderedFloat(potential),
            node,
        });
    }

    /// Pops the cheapest live entry, dropping entries superseded in `dist`.
    pub fn pop_live(&mut self, dist: &[Cost]) -> Option<(NodeIndex, Cost)> {
        while let Some(Entry { cost, node, .. }) = self.heap.pop() {
            if cost.0 > dist[node] {
                continue;
            }
            return Some((node, cost.0));
        }
        None
    }
}
