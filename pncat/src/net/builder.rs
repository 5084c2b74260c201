use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::error::{Result, TopologyError};

use super::{
    Arc, ArcKind, NetElement, NodeId, NodeRef, PetriNet, Place, PlaceId, Transition, TransitionId,
};

/// Collects the nodes and arcs of one net before they are validated into a [`PetriNet`].
///
/// Elements can be inserted in any order, arcs are only checked against the nodes in
/// [`PetriNetBuilder::build`].
#[derive(Default, Clone, Debug)]
pub struct PetriNetBuilder {
    places: BTreeMap<NodeId, Place>,
    transitions: BTreeMap<NodeId, Transition>,
    arcs: BTreeSet<Arc>,
}

impl PetriNetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect a flat element list as supplied by a host model.
    ///
    /// Unlike the `insert_*` methods, an identifier appearing twice is rejected instead of
    /// replacing the earlier node.
    pub fn from_elements<I, E>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<NetElement>,
    {
        let mut builder = Self::default();
        for element in elements {
            builder.insert_element(element.into())?;
        }
        Ok(builder)
    }

    pub fn places(&self) -> &BTreeMap<NodeId, Place> {
        &self.places
    }

    pub fn transitions(&self) -> &BTreeMap<NodeId, Transition> {
        &self.transitions
    }

    pub fn arcs(&self) -> &BTreeSet<Arc> {
        &self.arcs
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty() && self.transitions.is_empty() && self.arcs.is_empty()
    }

    /// Insert place into this petri net.
    ///
    /// Returns the existing place for this id, or None if the id is not in use by a place.
    pub fn insert_place(&mut self, place: Place) -> Option<Place> {
        self.places.insert(place.id().clone(), place)
    }

    /// Insert transition into this petri net.
    ///
    /// Returns the existing transition for this id, or None if the id is not in use by a
    /// transition.
    pub fn insert_transition(&mut self, transition: Transition) -> Option<Transition> {
        self.transitions.insert(transition.id().clone(), transition)
    }

    /// Insert arc into this petri net.
    ///
    /// Returns false if an identical arc was already present.
    pub fn insert_arc(&mut self, arc: Arc) -> bool {
        self.arcs.insert(arc)
    }

    /// Insert a single element, rejecting identifiers that are already taken by any node.
    pub fn insert_element(&mut self, element: NetElement) -> Result<()> {
        match element {
            NetElement::Place(place) => {
                self.check_unused(place.id())?;
                self.insert_place(place);
            }
            NetElement::Transition(transition) => {
                self.check_unused(transition.id())?;
                self.insert_transition(transition);
            }
            NetElement::Arc(arc) => {
                self.insert_arc(arc);
            }
        }
        Ok(())
    }

    fn check_unused(&self, id: &NodeId) -> Result<()> {
        if self.places.contains_key(id) || self.transitions.contains_key(id) {
            return Err(TopologyError::IdCollision(id.clone()).into());
        }
        Ok(())
    }

    /// Build the PetriNet
    ///
    /// Places and transitions get dense ids in the order of their identifiers, so building
    /// the same elements always yields the same incidence layout.
    pub fn build(&self) -> Result<PetriNet> {
        if let Some(id) = self.places.keys().find(|id| self.transitions.contains_key(*id)) {
            return Err(TopologyError::IdCollision(id.clone()).into());
        }

        let mut lookup = HashMap::<NodeId, NodeRef>::new();
        for (idx, id) in self.places.keys().enumerate() {
            lookup.insert(id.clone(), NodeRef::Place(PlaceId(idx as u32)));
        }
        for (idx, id) in self.transitions.keys().enumerate() {
            lookup.insert(id.clone(), NodeRef::Transition(TransitionId(idx as u32)));
        }

        let mut consumes = BTreeSet::<(PlaceId, TransitionId)>::new();
        let mut produces = BTreeSet::<(PlaceId, TransitionId)>::new();
        for arc in &self.arcs {
            let resolve = |id: &NodeId| {
                lookup.get(id).copied().ok_or_else(|| TopologyError::UnknownEndpoint {
                    src: arc.src().clone(),
                    dst: arc.dst().clone(),
                    missing: id.clone(),
                })
            };
            let src = resolve(arc.src())?;
            let dst = resolve(arc.dst())?;
            match (arc.kind(), src, dst) {
                (ArcKind::PlaceToTransition, NodeRef::Place(pl), NodeRef::Transition(tr)) => {
                    consumes.insert((pl, tr));
                }
                (ArcKind::TransitionToPlace, NodeRef::Transition(tr), NodeRef::Place(pl)) => {
                    produces.insert((pl, tr));
                }
                (kind, src, dst) => {
                    return Err(TopologyError::KindMismatch {
                        src: arc.src().clone(),
                        dst: arc.dst().clone(),
                        kind,
                        src_kind: src.kind(),
                        dst_kind: dst.kind(),
                    }
                    .into());
                }
            }
        }

        let places = self.places.len();
        let transitions = self.transitions.len();
        let arcs_in = consumes.len();
        let arcs_out = produces.len();
        debug!(places, transitions, arcs_in, arcs_out, "Constructed petri net.");
        Ok(PetriNet::new(
            self.places.values().cloned().collect(),
            self.transitions.values().cloned().collect(),
            lookup,
            consumes,
            produces,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PetriError;

    fn chain() -> PetriNetBuilder {
        let mut net = PetriNetBuilder::new();
        net.insert_place(Place::new("p1", "start"));
        net.insert_place(Place::new("p2", "end"));
        net.insert_transition(Transition::new("t1", "step"));
        net.insert_arc(Arc::new("p1", "t1", ArcKind::PlaceToTransition));
        net.insert_arc(Arc::new("t1", "p2", ArcKind::TransitionToPlace));
        net
    }

    fn topology_error(result: Result<PetriNet>) -> TopologyError {
        match result {
            Err(PetriError::InvalidTopology(err)) => err,
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("net should have been rejected"),
        }
    }

    #[test]
    fn builds_valid_net() {
        let net = chain().build().unwrap();
        assert_eq!(net.place_count(), 2);
        assert_eq!(net.transition_count(), 1);
        assert_eq!(net.arcs(ArcKind::PlaceToTransition).count(), 1);
        assert_eq!(net.arcs(ArcKind::TransitionToPlace).count(), 1);
    }

    #[test]
    fn insert_replaces_same_kind() {
        let mut net = chain();
        let old = net.insert_place(Place::new("p1", "renamed"));
        assert_eq!(old.map(|pl| pl.name().to_string()), Some("start".to_string()));
        assert_eq!(net.places().len(), 2);
    }

    #[test]
    fn duplicate_arcs_collapse() {
        let mut net = chain();
        assert!(!net.insert_arc(Arc::new("p1", "t1", ArcKind::PlaceToTransition)));
        assert_eq!(net.build().unwrap().arcs(ArcKind::PlaceToTransition).count(), 1);
    }

    #[test]
    fn rejects_kind_mismatch() {
        let mut net = chain();
        net.insert_arc(Arc::new("p1", "t1", ArcKind::TransitionToPlace));
        let err = topology_error(net.build());
        assert_eq!(
            err,
            TopologyError::KindMismatch {
                src: "p1".into(),
                dst: "t1".into(),
                kind: ArcKind::TransitionToPlace,
                src_kind: crate::net::NodeKind::Place,
                dst_kind: crate::net::NodeKind::Transition,
            }
        );
    }

    #[test]
    fn rejects_same_kind_endpoints() {
        let mut net = chain();
        net.insert_arc(Arc::new("p1", "p2", ArcKind::PlaceToTransition));
        assert!(matches!(topology_error(net.build()), TopologyError::KindMismatch { .. }));
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let mut net = chain();
        net.insert_arc(Arc::new("t1", "p9", ArcKind::TransitionToPlace));
        let err = topology_error(net.build());
        assert!(matches!(
            err,
            TopologyError::UnknownEndpoint { ref missing, .. } if missing.as_str() == "p9"
        ));
    }

    #[test]
    fn rejects_id_shared_by_place_and_transition() {
        let mut net = chain();
        net.insert_transition(Transition::new("p2", "clash"));
        assert_eq!(topology_error(net.build()), TopologyError::IdCollision("p2".into()));
    }

    #[test]
    fn flat_elements_reject_repeated_ids() {
        let elements: Vec<NetElement> = vec![
            Place::new("p1", "").into(),
            Transition::new("t1", "").into(),
            Place::new("p1", "again").into(),
        ];
        let err = PetriNetBuilder::from_elements(elements).unwrap_err();
        assert!(matches!(
            err,
            PetriError::InvalidTopology(TopologyError::IdCollision(ref id)) if id.as_str() == "p1"
        ));
    }

    #[test]
    fn flat_elements_accept_arcs_before_nodes() {
        let elements: Vec<NetElement> = vec![
            Arc::new("p1", "t1", ArcKind::PlaceToTransition).into(),
            Place::new("p1", "").into(),
            Transition::new("t1", "").into(),
        ];
        let net = PetriNet::from_elements(elements).unwrap();
        assert_eq!(net.arcs(ArcKind::PlaceToTransition).count(), 1);
    }
}
