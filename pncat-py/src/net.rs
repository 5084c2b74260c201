use std::sync::Arc;

use pncat::net::{self, ArcKind, PetriNetBuilder};
use pyo3::prelude::*;

use crate::PyPetriResult;

#[pyclass(name = "PetriNetBuilder")]
pub struct PyPetriNetBuilder {
    pub net: Arc<net::PetriNetBuilder>,
}

#[pyclass(eq, eq_int, name = "ArcKind")]
#[derive(PartialEq, Eq, Clone, Copy)]
pub enum PyArcKind {
    PlaceToTransition,
    TransitionToPlace,
}

impl From<PyArcKind> for ArcKind {
    fn from(value: PyArcKind) -> Self {
        match value {
            PyArcKind::PlaceToTransition => ArcKind::PlaceToTransition,
            PyArcKind::TransitionToPlace => ArcKind::TransitionToPlace,
        }
    }
}

impl From<ArcKind> for PyArcKind {
    fn from(value: ArcKind) -> Self {
        match value {
            ArcKind::PlaceToTransition => PyArcKind::PlaceToTransition,
            ArcKind::TransitionToPlace => PyArcKind::TransitionToPlace,
        }
    }
}

#[pymethods]
impl PyArcKind {
    /// Accepts the meta type names of a modelling tool, e.g. 'ArcPlaceToTransition'.
    #[staticmethod]
    fn parse(name: &str) -> PyPetriResult<Self> {
        Ok(name.parse::<ArcKind>()?.into())
    }

    fn __str__(&self) -> String {
        ArcKind::from(*self).to_string()
    }
}

#[pymethods]
impl PyPetriNetBuilder {
    #[new]
    fn new() -> Self {
        Self { net: Arc::new(PetriNetBuilder::default()) }
    }

    /// Returns True if a place with this id was replaced.
    #[pyo3(signature = (id, name=""))]
    fn insert_place(&mut self, id: &str, name: &str) -> bool {
        Arc::<net::PetriNetBuilder>::make_mut(&mut self.net)
            .insert_place(net::Place::new(id, name))
            .is_some()
    }

    /// Returns True if a transition with this id was replaced.
    #[pyo3(signature = (id, name=""))]
    fn insert_transition(&mut self, id: &str, name: &str) -> bool {
        Arc::<net::PetriNetBuilder>::make_mut(&mut self.net)
            .insert_transition(net::Transition::new(id, name))
            .is_some()
    }

    /// Returns False if the same arc was inserted before.
    fn insert_arc(&mut self, src: &str, dst: &str, kind: PyArcKind) -> bool {
        Arc::<net::PetriNetBuilder>::make_mut(&mut self.net)
            .insert_arc(net::Arc::new(src, dst, kind.into()))
    }

    /// Check the collected elements without classifying them.
    fn validate(&self, py: Python<'_>) -> PyPetriResult<()> {
        let net = Arc::clone(&self.net);
        py.allow_threads(move || net.build())?;
        Ok(())
    }

    fn __len__(&self) -> usize {
        self.net.places().len() + self.net.transitions().len()
    }
}
