use std::{borrow::Borrow, fmt::Display, str::FromStr};

use crate::error::PetriError;

/// Host supplied identifier of a place or transition (e.g. a model path like `/f/3`).
#[derive(Eq, PartialEq, Clone, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Dense row index of a place inside one [`PetriNet`](super::PetriNet).
#[derive(Eq, PartialEq, Clone, Copy, PartialOrd, Ord, Hash, Debug)]
pub struct PlaceId(pub u32);
/// Dense column index of a transition inside one [`PetriNet`](super::PetriNet).
#[derive(Eq, PartialEq, Clone, Copy, PartialOrd, Ord, Hash, Debug)]
pub struct TransitionId(pub u32);

impl PlaceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TransitionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Eq, PartialEq, Clone, Copy, PartialOrd, Ord, Hash, Debug)]
pub enum NodeKind {
    Place,
    Transition,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Place => write!(f, "place"),
            NodeKind::Transition => write!(f, "transition"),
        }
    }
}

/// A node resolved to its kind and dense index.
///
/// Resolution happens once while the net is built, so consumers match on the variant instead
/// of looking up node types again.
#[derive(Eq, PartialEq, Clone, Copy, PartialOrd, Ord, Hash, Debug)]
pub enum NodeRef {
    Place(PlaceId),
    Transition(TransitionId),
}

impl NodeRef {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Place(_) => NodeKind::Place,
            NodeRef::Transition(_) => NodeKind::Transition,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Place {
    id: NodeId,
    name: String,
}

impl Place {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Place { id: id.into(), name: name.into() }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Transition {
    id: NodeId,
    name: String,
}

impl Transition {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Transition { id: id.into(), name: name.into() }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Debug)]
pub enum ArcKind {
    PlaceToTransition,
    TransitionToPlace,
}

impl ArcKind {
    /// Kind of node the arc has to start at.
    pub fn src_kind(&self) -> NodeKind {
        match self {
            ArcKind::PlaceToTransition => NodeKind::Place,
            ArcKind::TransitionToPlace => NodeKind::Transition,
        }
    }

    /// Kind of node the arc has to end at.
    pub fn dst_kind(&self) -> NodeKind {
        match self {
            ArcKind::PlaceToTransition => NodeKind::Transition,
            ArcKind::TransitionToPlace => NodeKind::Place,
        }
    }
}

impl Display for ArcKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArcKind::PlaceToTransition => write!(f, "PlaceToTransition"),
            ArcKind::TransitionToPlace => write!(f, "TransitionToPlace"),
        }
    }
}

impl FromStr for ArcKind {
    type Err = PetriError;

    /// Accepts the plain names as well as the meta type names used by modelling tools
    /// (`ArcPlaceToTransition`, `ArcTransitionToPlace`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("Arc").unwrap_or(s) {
            "PlaceToTransition" => Ok(ArcKind::PlaceToTransition),
            "TransitionToPlace" => Ok(ArcKind::TransitionToPlace),
            _ => Err(PetriError::ValueError(format!("Unknown arc kind '{s}'."))),
        }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Arc {
    src: NodeId,
    dst: NodeId,
    kind: ArcKind,
}

impl Arc {
    pub fn new(src: impl Into<NodeId>, dst: impl Into<NodeId>, kind: ArcKind) -> Self {
        Arc { src: src.into(), dst: dst.into(), kind }
    }

    pub fn src(&self) -> &NodeId {
        &self.src
    }

    pub fn dst(&self) -> &NodeId {
        &self.dst
    }

    pub fn kind(&self) -> ArcKind {
        self.kind
    }
}

/// One entry of the flat node/arc collection a host hands over for a single net.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NetElement {
    Place(Place),
    Transition(Transition),
    Arc(Arc),
}

impl From<Place> for NetElement {
    fn from(value: Place) -> Self {
        NetElement::Place(value)
    }
}

impl From<Transition> for NetElement {
    fn from(value: Transition) -> Self {
        NetElement::Transition(value)
    }
}

impl From<Arc> for NetElement {
    fn from(value: Arc) -> Self {
        NetElement::Arc(value)
    }
}
