//! Structural categorization of petri nets.
//!
//! A net is assembled from host supplied places, transitions and arcs with
//! [`net::PetriNetBuilder`], validated into an immutable [`net::PetriNet`] and then checked
//! against four structural classes: free-choice net, marked graph, state machine and workflow
//! net. Nothing is simulated, all checks work on the incidence relation of the net.
//!
//! ```
//! use pncat::net::{Arc, ArcKind, PetriNetBuilder, Place, Transition};
//!
//! let mut net = PetriNetBuilder::new();
//! net.insert_place(Place::new("p1", "ready"));
//! net.insert_place(Place::new("p2", "done"));
//! net.insert_transition(Transition::new("t1", "work"));
//! net.insert_arc(Arc::new("p1", "t1", ArcKind::PlaceToTransition));
//! net.insert_arc(Arc::new("t1", "p2", ArcKind::TransitionToPlace));
//!
//! let result = pncat::classify(&net.build()?);
//! assert!(result.is_workflow());
//! assert_eq!(result.to_string(), "free-choice, marked graph, state machine, workflow");
//! # Ok::<(), pncat::PetriError>(())
//! ```
pub mod classify;
pub mod error;
pub mod net;

pub use classify::{
    classify, Category, ClassificationResult, Classifier, ClassifierConfig,
    ClassifierConfigBuilder, ClassifierConfigBuilderError,
};
pub use error::{PetriError, Result, TopologyError};
