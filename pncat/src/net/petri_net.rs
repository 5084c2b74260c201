use std::collections::{BTreeSet, HashMap};

use super::{
    Arc, ArcKind, IncidenceIndex, NetElement, NodeId, NodeRef, PetriNetBuilder, Place, PlaceId,
    Transition, TransitionId,
};
use crate::error::Result;

/// Validated, immutable snapshot of a single petri net.
///
/// Obtained from [`PetriNetBuilder::build`] or [`PetriNet::from_elements`]. Every arc endpoint
/// exists and has the kind required by the arc.
#[derive(Clone, Debug, Default)]
pub struct PetriNet {
    places: Vec<Place>,
    transitions: Vec<Transition>,
    lookup: HashMap<NodeId, NodeRef>,
    // place -> transition
    consumes: BTreeSet<(PlaceId, TransitionId)>,
    // transition -> place, stored as (place, transition) like the incidence rows
    produces: BTreeSet<(PlaceId, TransitionId)>,
}

impl PetriNet {
    pub(super) fn new(
        places: Vec<Place>,
        transitions: Vec<Transition>,
        lookup: HashMap<NodeId, NodeRef>,
        consumes: BTreeSet<(PlaceId, TransitionId)>,
        produces: BTreeSet<(PlaceId, TransitionId)>,
    ) -> Self {
        PetriNet { places, transitions, lookup, consumes, produces }
    }

    pub fn from_elements<I, E>(elements: I) -> Result<PetriNet>
    where
        I: IntoIterator<Item = E>,
        E: Into<NetElement>,
    {
        PetriNetBuilder::from_elements(elements)?.build()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn place(&self, id: PlaceId) -> &Place {
        &self.places[id.index()]
    }

    pub fn transition(&self, id: TransitionId) -> &Transition {
        &self.transitions[id.index()]
    }

    pub fn place_ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.places.iter().map(Place::id)
    }

    pub fn transition_ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.transitions.iter().map(Transition::id)
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn node_count(&self) -> usize {
        self.places.len() + self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Resolve a host identifier to the node it names.
    pub fn lookup(&self, id: &str) -> Option<NodeRef> {
        self.lookup.get(id).copied()
    }

    pub fn node_id(&self, node: NodeRef) -> &NodeId {
        match node {
            NodeRef::Place(pl_id) => self.place(pl_id).id(),
            NodeRef::Transition(tr_id) => self.transition(tr_id).id(),
        }
    }

    /// All nodes, places first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef> {
        let places = (0..self.places.len() as u32).map(|idx| NodeRef::Place(PlaceId(idx)));
        let transitions =
            (0..self.transitions.len() as u32).map(|idx| NodeRef::Transition(TransitionId(idx)));
        places.chain(transitions)
    }

    /// Arcs of the given kind as resolved `(place, transition)` pairs, regardless of direction.
    pub fn flow(&self, kind: ArcKind) -> impl Iterator<Item = (PlaceId, TransitionId)> + '_ {
        match kind {
            ArcKind::PlaceToTransition => self.consumes.iter().copied(),
            ArcKind::TransitionToPlace => self.produces.iter().copied(),
        }
    }

    /// Arcs of the given kind with their host identifiers.
    pub fn arcs(&self, kind: ArcKind) -> impl Iterator<Item = Arc> + '_ {
        self.flow(kind).map(move |(pl_id, tr_id)| {
            let place = self.place(pl_id).id().clone();
            let transition = self.transition(tr_id).id().clone();
            match kind {
                ArcKind::PlaceToTransition => Arc::new(place, transition, kind),
                ArcKind::TransitionToPlace => Arc::new(transition, place, kind),
            }
        })
    }

    /// Derive the incidence index of this net.
    pub fn incidence(&self) -> IncidenceIndex<'_> {
        IncidenceIndex::build(self)
    }
}
