use crate::{
    classify::ClassifierConfigBuilderError,
    net::{ArcKind, NodeId, NodeKind},
};

/// Reasons a node/arc collection does not describe a valid petri net.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Arc '{src}' -> '{dst}' is declared {kind} but connects a {src_kind} to a {dst_kind}")]
    KindMismatch {
        src: NodeId,
        dst: NodeId,
        kind: ArcKind,
        src_kind: NodeKind,
        dst_kind: NodeKind,
    },
    #[error("Arc '{src}' -> '{dst}' references '{missing}', which is not a node of this net")]
    UnknownEndpoint { src: NodeId, dst: NodeId, missing: NodeId },
    #[error("Identifier '{0}' is used by more than one node")]
    IdCollision(NodeId),
}

#[derive(thiserror::Error, Debug)]
pub enum PetriError {
    #[error("Invalid topology: {0}")]
    InvalidTopology(#[from] TopologyError),
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ClassifierConfigBuilderError),
    #[error("Inappropriate value: {0}")]
    ValueError(String),
}

pub type Result<T> = std::result::Result<T, PetriError>;
