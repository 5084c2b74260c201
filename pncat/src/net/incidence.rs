//! Place × transition adjacency derived once per net.
use smallvec::SmallVec;

use super::{ArcKind, PetriNet, PlaceId, TransitionId};

type SmallRow<T> = SmallVec<[T; 4]>;

/// Dense boolean matrix with one row per place and one column per transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IncidenceBool {
    rows: Vec<SmallRow<bool>>,
    cols: usize,
}

impl IncidenceBool {
    pub fn new(places: usize, transitions: usize) -> Self {
        let rows = (0..places).map(|_| SmallRow::from_elem(false, transitions)).collect();
        Self { rows, cols: transitions }
    }

    fn from_flow(
        places: usize,
        transitions: usize,
        flow: impl Iterator<Item = (PlaceId, TransitionId)>,
    ) -> Self {
        let mut matrix = Self::new(places, transitions);
        for (pl_id, tr_id) in flow {
            matrix.rows[pl_id.index()][tr_id.index()] = true;
        }
        matrix
    }

    pub fn places(&self) -> usize {
        self.rows.len()
    }

    pub fn transitions(&self) -> usize {
        self.cols
    }

    pub fn get(&self, place: PlaceId, transition: TransitionId) -> bool {
        self.rows[place.index()][transition.index()]
    }

    pub fn row(&self, place: PlaceId) -> &[bool] {
        &self.rows[place.index()]
    }
}

/// Read-only adjacency of a [`PetriNet`].
///
/// The index borrows the net it was built from, so node ids taken from it always resolve
/// against the same net.
///
/// * `inflow(p, t)`: there is an arc `t -> p`
/// * `outflow(p, t)`: there is an arc `p -> t`
///
/// Both matrices cover every place/transition pair. The per-node neighbour lists are sorted by
/// dense id.
#[derive(Clone, Debug)]
pub struct IncidenceIndex<'a> {
    net: &'a PetriNet,
    inflow: IncidenceBool,
    outflow: IncidenceBool,
    in_transitions: Vec<SmallRow<TransitionId>>,
    out_transitions: Vec<SmallRow<TransitionId>>,
    in_places: Vec<SmallRow<PlaceId>>,
    out_places: Vec<SmallRow<PlaceId>>,
}

impl<'a> IncidenceIndex<'a> {
    pub fn build(net: &'a PetriNet) -> Self {
        let places = net.place_count();
        let transitions = net.transition_count();
        let inflow =
            IncidenceBool::from_flow(places, transitions, net.flow(ArcKind::TransitionToPlace));
        let outflow =
            IncidenceBool::from_flow(places, transitions, net.flow(ArcKind::PlaceToTransition));

        let mut in_transitions = vec![SmallRow::new(); places];
        let mut out_transitions = vec![SmallRow::new(); places];
        let mut in_places = vec![SmallRow::new(); transitions];
        let mut out_places = vec![SmallRow::new(); transitions];
        for pl_idx in 0..places {
            let pl_id = PlaceId(pl_idx as u32);
            for tr_idx in 0..transitions {
                let tr_id = TransitionId(tr_idx as u32);
                if inflow.get(pl_id, tr_id) {
                    in_transitions[pl_idx].push(tr_id);
                    out_places[tr_idx].push(pl_id);
                }
                if outflow.get(pl_id, tr_id) {
                    out_transitions[pl_idx].push(tr_id);
                    in_places[tr_idx].push(pl_id);
                }
            }
        }

        IncidenceIndex {
            net,
            inflow,
            outflow,
            in_transitions,
            out_transitions,
            in_places,
            out_places,
        }
    }

    /// The net this index was derived from.
    pub fn net(&self) -> &'a PetriNet {
        self.net
    }

    pub fn place_count(&self) -> usize {
        self.inflow.places()
    }

    pub fn transition_count(&self) -> usize {
        self.inflow.transitions()
    }

    pub fn places(&self) -> impl Iterator<Item = PlaceId> {
        (0..self.place_count() as u32).map(PlaceId)
    }

    pub fn transitions(&self) -> impl Iterator<Item = TransitionId> {
        (0..self.transition_count() as u32).map(TransitionId)
    }

    pub fn inflow_matrix(&self) -> &IncidenceBool {
        &self.inflow
    }

    pub fn outflow_matrix(&self) -> &IncidenceBool {
        &self.outflow
    }

    /// True iff the transition puts tokens into the place (arc `t -> p`).
    pub fn inflow(&self, place: PlaceId, transition: TransitionId) -> bool {
        self.inflow.get(place, transition)
    }

    /// True iff the place feeds the transition (arc `p -> t`).
    pub fn outflow(&self, place: PlaceId, transition: TransitionId) -> bool {
        self.outflow.get(place, transition)
    }

    pub fn in_transitions(&self, place: PlaceId) -> &[TransitionId] {
        &self.in_transitions[place.index()]
    }

    pub fn out_transitions(&self, place: PlaceId) -> &[TransitionId] {
        &self.out_transitions[place.index()]
    }

    pub fn in_places(&self, transition: TransitionId) -> &[PlaceId] {
        &self.in_places[transition.index()]
    }

    pub fn out_places(&self, transition: TransitionId) -> &[PlaceId] {
        &self.out_places[transition.index()]
    }
}
