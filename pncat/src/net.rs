mod builder;
mod common;
mod incidence;
mod petri_net;

pub use builder::PetriNetBuilder;
pub use common::{
    Arc, ArcKind, NetElement, NodeId, NodeKind, NodeRef, Place, PlaceId, Transition, TransitionId,
};
pub use incidence::{IncidenceBool, IncidenceIndex};
pub use petri_net::PetriNet;
