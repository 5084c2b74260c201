use tracing::debug;

use crate::net::IncidenceIndex;

/// Free-choice: transitions that share an input place have identical input places.
///
/// Two transitions can only share an input place `p` if both are in `p`'s output set, so it is
/// enough to compare the input sets of the output transitions of every place.
pub fn is_free_choice(index: &IncidenceIndex) -> bool {
    let net = index.net();
    for pl_id in index.places() {
        let gated = index.out_transitions(pl_id);
        let Some((&first, rest)) = gated.split_first() else {
            continue;
        };
        let expected = index.in_places(first);
        if let Some(&other) = rest.iter().find(|&&tr_id| index.in_places(tr_id) != expected) {
            debug!(
                place = %net.place(pl_id).id(),
                transition = %net.transition(first).id(),
                other = %net.transition(other).id(),
                "Not free-choice: transitions share an input place but differ in their inputs."
            );
            return false;
        }
    }
    true
}

/// Marked graph: no place has more than one input or more than one output transition.
///
/// Places without inputs or outputs are accepted, so the source and sink of a sequential
/// process do not disqualify it.
pub fn is_marked_graph(index: &IncidenceIndex) -> bool {
    let violation = index.places().find(|&pl_id| {
        index.in_transitions(pl_id).len() > 1 || index.out_transitions(pl_id).len() > 1
    });
    match violation {
        Some(pl_id) => {
            debug!(
                place = %index.net().place(pl_id).id(),
                inputs = index.in_transitions(pl_id).len(),
                outputs = index.out_transitions(pl_id).len(),
                "Not a marked graph."
            );
            false
        }
        None => true,
    }
}

/// State machine: no transition has more than one input or more than one output place.
pub fn is_state_machine(index: &IncidenceIndex) -> bool {
    let violation = index.transitions().find(|&tr_id| {
        index.in_places(tr_id).len() > 1 || index.out_places(tr_id).len() > 1
    });
    match violation {
        Some(tr_id) => {
            debug!(
                transition = %index.net().transition(tr_id).id(),
                inputs = index.in_places(tr_id).len(),
                outputs = index.out_places(tr_id).len(),
                "Not a state machine."
            );
            false
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{Arc, ArcKind, NetElement, PetriNet, Place, Transition};

    fn net(places: &[&str], transitions: &[&str], arcs: &[(&str, &str)]) -> PetriNet {
        let mut elements: Vec<NetElement> = Vec::new();
        elements.extend(places.iter().map(|&id| NetElement::from(Place::new(id, id))));
        elements.extend(transitions.iter().map(|&id| NetElement::from(Transition::new(id, id))));
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

    fn check(net: &PetriNet) -> (bool, bool, bool) {
        let index = net.incidence();
        (is_free_choice(&index), is_marked_graph(&index), is_state_machine(&index))
    }

    #[test]
    fn empty_net_is_vacuously_everything() {
        assert_eq!(check(&net(&[], &[], &[])), (true, true, true));
    }

    #[test]
    fn no_transitions() {
        assert_eq!(check(&net(&["p1", "p2"], &[], &[])), (true, true, true));
    }

    #[test]
    fn no_places() {
        let (free_choice, _, state_machine) = check(&net(&[], &["t1", "t2"], &[]));
        assert!(free_choice);
        assert!(state_machine);
    }

    #[test]
    fn shared_input_with_identical_inputs_is_free_choice() {
        let net = net(
            &["p1", "p2", "p3"],
            &["t1", "t2"],
            &[("p1", "t1"), ("p1", "t2"), ("t1", "p2"), ("t2", "p3")],
        );
        let (free_choice, marked_graph, state_machine) = check(&net);
        assert!(free_choice);
        assert!(!marked_graph);
        assert!(state_machine);
    }

    #[test]
    fn shared_input_with_different_inputs_is_not_free_choice() {
        // p1 feeds t1 and t2 with inputs {p1} and {p1, p2}
        let first = net(
            &["p1", "p2", "p3"],
            &["t1", "t2"],
            &[("p1", "t1"), ("p1", "t2"), ("p2", "t2"), ("t1", "p3"), ("t2", "p3")],
        );
        // p2 feeds t1 and t2 with inputs {p1, p2} and {p2}
        let second = net(
            &["p1", "p2", "p3"],
            &["t1", "t2"],
            &[("p1", "t1"), ("p2", "t2"), ("p2", "t1"), ("t1", "p3")],
        );
        let (free_choice, _, state_machine) = check(&first);
        assert!(!free_choice);
        assert!(!state_machine);
        assert!(!check(&second).0);
    }

    #[test]
    fn disjoint_inputs_are_free_choice() {
        let net = net(
            &["p1", "p2", "p3", "p4"],
            &["t1", "t2"],
            &[("p1", "t1"), ("p2", "t1"), ("p3", "t2"), ("t1", "p4"), ("t2", "p4")],
        );
        assert!(check(&net).0);
    }

    #[test]
    fn cycle_is_marked_graph_and_state_machine() {
        let net = net(
            &["p1", "p2"],
            &["t1", "t2"],
            &[("p1", "t1"), ("t1", "p2"), ("p2", "t2"), ("t2", "p1")],
        );
        assert_eq!(check(&net), (true, true, true));
    }

    #[test]
    fn synchronisation_is_marked_graph_but_not_state_machine() {
        // t1 forks into p2 and p3, t2 joins them back into p1
        let net = net(
            &["p1", "p2", "p3"],
            &["t1", "t2"],
            &[("p1", "t1"), ("t1", "p2"), ("t1", "p3"), ("p2", "t2"), ("p3", "t2"), ("t2", "p1")],
        );
        assert_eq!(check(&net), (true, true, false));
    }

    #[test]
    fn chain_with_source_and_sink() {
        let net = net(
            &["p1", "p2", "p3"],
            &["t1", "t2"],
            &[("p1", "t1"), ("t1", "p2"), ("p2", "t2"), ("t2", "p3")],
        );
        assert_eq!(check(&net), (true, true, true));
    }

    #[test]
    fn merging_place_is_not_marked_graph() {
        let net = net(
            &["p1", "p2", "p3"],
            &["t1", "t2"],
            &[("p1", "t1"), ("p2", "t2"), ("t1", "p3"), ("t2", "p3")],
        );
        assert_eq!(check(&net), (true, false, true));
    }
}
