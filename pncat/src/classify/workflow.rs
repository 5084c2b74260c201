use std::fmt::Display;

use tracing::debug;

use super::reach::reachable_from;
use crate::net::{IncidenceIndex, NodeId, NodeRef, PlaceId};

/// Why a net is not a workflow net.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkflowFailure {
    /// The net has no place that could act as source.
    NoPlaces,
    /// Number of places without input transitions, if not exactly one.
    SourceCount(usize),
    /// Number of places without output transitions, if not exactly one.
    SinkCount(usize),
    /// Number of nodes the source does not reach.
    Unreachable(usize),
}

impl Display for WorkflowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowFailure::NoPlaces => write!(f, "net has no places"),
            WorkflowFailure::SourceCount(n) => write!(f, "expected one source place, found {n}"),
            WorkflowFailure::SinkCount(n) => write!(f, "expected one sink place, found {n}"),
            WorkflowFailure::Unreachable(n) => write!(f, "{n} node(s) unreachable from the source"),
        }
    }
}

/// Outcome of the workflow check together with what was found on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowReport {
    source: Option<NodeId>,
    sink: Option<NodeId>,
    unreached: Vec<NodeId>,
    failure: Option<WorkflowFailure>,
}

impl WorkflowReport {
    pub fn is_workflow(&self) -> bool {
        self.failure.is_none()
    }

    /// The source place, if the net has exactly one.
    pub fn source(&self) -> Option<&NodeId> {
        self.source.as_ref()
    }

    /// The sink place, if the net has exactly one.
    pub fn sink(&self) -> Option<&NodeId> {
        self.sink.as_ref()
    }

    /// Nodes not reachable from the source. Only filled in when the traversal ran.
    pub fn unreached(&self) -> &[NodeId] {
        &self.unreached
    }

    pub fn failure(&self) -> Option<WorkflowFailure> {
        self.failure
    }
}

/// Workflow net: exactly one source place, exactly one sink place and every node reachable
/// from the source. A net consisting of a single place is a workflow net regardless of its
/// transitions.
///
/// At most `unreached_log_limit` unreached identifiers are written to the log, the report
/// always holds all of them.
pub fn check_workflow(index: &IncidenceIndex, unreached_log_limit: usize) -> WorkflowReport {
    let net = index.net();
    let mut report = WorkflowReport { source: None, sink: None, unreached: vec![], failure: None };

    if index.place_count() == 0 {
        report.failure = Some(WorkflowFailure::NoPlaces);
        debug!("Not a workflow net: no places.");
        return report;
    }
    if index.place_count() == 1 {
        let only = net.place(PlaceId(0)).id();
        report.source = Some(only.clone());
        report.sink = Some(only.clone());
        return report;
    }

    let sources: Vec<PlaceId> =
        index.places().filter(|&pl_id| index.in_transitions(pl_id).is_empty()).collect();
    let sinks: Vec<PlaceId> =
        index.places().filter(|&pl_id| index.out_transitions(pl_id).is_empty()).collect();
    if let &[source] = sources.as_slice() {
        report.source = Some(net.place(source).id().clone());
    }
    if let &[sink] = sinks.as_slice() {
        report.sink = Some(net.place(sink).id().clone());
    }
    let failure = match (sources.len(), sinks.len()) {
        (1, 1) => None,
        (1, sinks) => Some(WorkflowFailure::SinkCount(sinks)),
        (sources, _) => Some(WorkflowFailure::SourceCount(sources)),
    };
    if let Some(failure) = failure {
        debug!(%failure, "Not a workflow net.");
        report.failure = Some(failure);
        return report;
    }

    let reached = reachable_from(NodeRef::Place(sources[0]), index);
    report.unreached = reached.unreached(net).map(|node| net.node_id(node).clone()).collect();
    if !report.unreached.is_empty() {
        let unreached = report.unreached.len();
        let shown: Vec<&str> =
            report.unreached.iter().take(unreached_log_limit).map(NodeId::as_str).collect();
        debug!(unreached, shown = ?shown, "Not a workflow net: nodes unreachable from source.");
        report.failure = Some(WorkflowFailure::Unreachable(unreached));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{Arc, ArcKind, NetElement, PetriNet, Place, Transition};

    fn net(places: &[&str], transitions: &[&str], arcs: &[(&str, &str)]) -> PetriNet {
        let mut elements: Vec<NetElement> = Vec::new();
        elements.extend(places.iter().map(|&id| NetElement::from(Place::new(id, ""))));
        elements.extend(transitions.iter().map(|&id| NetElement::from(Transition::new(id, ""))));
        for &(src, dst) in arcs {
            let kind = if places.contains(&src) {
                ArcKind::PlaceToTransition
            } else {
                ArcKind::TransitionToPlace
            };
            elements.push(Arc::new(src, dst, kind).into());
        }
        PetriNet::from_elements(elements).unwrap()
    }

    fn check(net: &PetriNet) -> WorkflowReport {
        check_workflow(&net.incidence(), 16)
    }

    #[test]
    fn single_place() {
        let report = check(&net(&["p1"], &[], &[]));
        assert!(report.is_workflow());
        assert_eq!(report.source().map(NodeId::as_str), Some("p1"));
        assert_eq!(report.sink().map(NodeId::as_str), Some("p1"));
    }

    #[test]
    fn single_place_ignores_transitions() {
        let report = check(&net(&["p1"], &["t1", "t2"], &[("p1", "t1")]));
        assert!(report.is_workflow());
    }

    #[test]
    fn no_places() {
        let report = check(&net(&[], &["t1"], &[]));
        assert_eq!(report.failure(), Some(WorkflowFailure::NoPlaces));
    }

    #[test]
    fn sequence() {
        let report = check(&net(
            &["p1", "p2", "p3"],
            &["t1", "t2"],
            &[("p1", "t1"), ("t1", "p2"), ("p2", "t2"), ("t2", "p3")],
        ));
        assert!(report.is_workflow());
        assert_eq!(report.source().map(NodeId::as_str), Some("p1"));
        assert_eq!(report.sink().map(NodeId::as_str), Some("p3"));
        assert!(report.unreached().is_empty());
    }

    #[test]
    fn two_sources() {
        let report = check(&net(
            &["p1", "p2", "p3"],
            &["t1"],
            &[("p1", "t1"), ("p2", "t1"), ("t1", "p3")],
        ));
        assert_eq!(report.failure(), Some(WorkflowFailure::SourceCount(2)));
        assert_eq!(report.source(), None);
        assert_eq!(report.sink().map(NodeId::as_str), Some("p3"));
    }

    #[test]
    fn disjoint_sources_and_sinks() {
        let report = check(&net(
            &["a1", "a2", "b1", "b2"],
            &["ta", "tb"],
            &[("a1", "ta"), ("ta", "a2"), ("b1", "tb"), ("tb", "b2")],
        ));
        assert_eq!(report.failure(), Some(WorkflowFailure::SourceCount(2)));
    }

    #[test]
    fn two_sinks() {
        let report = check(&net(
            &["p1", "p2", "p3"],
            &["t1"],
            &[("p1", "t1"), ("t1", "p2"), ("t1", "p3")],
        ));
        assert_eq!(report.failure(), Some(WorkflowFailure::SinkCount(2)));
        assert_eq!(report.source().map(NodeId::as_str), Some("p1"));
    }

    #[test]
    fn unreachable_cycle() {
        // p1 -> t1 -> p2 is the process, p3 <-> t2 is a detached loop
        let report = check(&net(
            &["p1", "p2", "p3"],
            &["t1", "t2"],
            &[("p1", "t1"), ("t1", "p2"), ("p3", "t2"), ("t2", "p3")],
        ));
        assert_eq!(report.failure(), Some(WorkflowFailure::Unreachable(2)));
        let unreached: Vec<&str> = report.unreached().iter().map(NodeId::as_str).collect();
        assert_eq!(unreached, vec!["p3", "t2"]);
    }

    #[test]
    fn isolated_transition_is_unreachable() {
        let report = check(&net(&["p1", "p2"], &["t1", "t9"], &[("p1", "t1"), ("t1", "p2")]));
        assert_eq!(report.failure(), Some(WorkflowFailure::Unreachable(1)));
        assert_eq!(report.unreached(), &[NodeId::from("t9")]);
    }

    #[test]
    fn loop_back_to_source_has_no_source() {
        let report = check(&net(
            &["p1", "p2"],
            &["t1", "t2"],
            &[("p1", "t1"), ("t1", "p2"), ("p2", "t2"), ("t2", "p1")],
        ));
        assert_eq!(report.failure(), Some(WorkflowFailure::SourceCount(0)));
    }
}
