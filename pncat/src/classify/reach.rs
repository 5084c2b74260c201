use std::collections::{BTreeSet, VecDeque};

use smallvec::SmallVec;
use tracing::trace;

use crate::net::{IncidenceIndex, NodeRef, PetriNet};

/// Set of nodes visited by [`reachable_from`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reachable {
    nodes: BTreeSet<NodeRef>,
}

impl Reachable {
    pub fn contains(&self, node: NodeRef) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes.iter().copied()
    }

    /// Nodes of `net` that were not visited, places first.
    pub fn unreached<'a>(&'a self, net: &'a PetriNet) -> impl Iterator<Item = NodeRef> + 'a {
        net.nodes().filter(|node| !self.nodes.contains(node))
    }

    /// True if every place and transition of `net` was visited.
    pub fn covers(&self, net: &PetriNet) -> bool {
        self.unreached(net).next().is_none()
    }
}

/// Breadth first walk along the arcs, starting at `start`.
///
/// From a place the walk moves to its output transitions, from a transition to its output
/// places. Each node is enqueued at most once, so cycles terminate.
pub fn reachable_from(start: NodeRef, index: &IncidenceIndex) -> Reachable {
    let mut nodes = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        let successors: SmallVec<[NodeRef; 8]> = match node {
            NodeRef::Place(pl_id) => {
                index.out_transitions(pl_id).iter().copied().map(NodeRef::Transition).collect()
            }
            NodeRef::Transition(tr_id) => {
                index.out_places(tr_id).iter().copied().map(NodeRef::Place).collect()
            }
        };
        for next in successors {
            if nodes.insert(next) {
                queue.push_back(next);
            }
        }
    }
    trace!(start = ?start, visited = nodes.len(), "Traversal finished.");
    Reachable { nodes }
}

/// Like [`reachable_from`], but starting at a host identifier. None if the indexed net has no
/// such node.
pub fn reachable_from_id(index: &IncidenceIndex, id: &str) -> Option<Reachable> {
    index.net().lookup(id).map(|start| reachable_from(start, index))
}
