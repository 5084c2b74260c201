mod error;
mod logging;
mod net;
mod result;

use std::sync::Arc;

use error::*;
use logging::TracingToLogging;
use net::{PyArcKind, PyPetriNetBuilder};
use pncat::{Category, Classifier, ClassifierConfigBuilder};
use pyo3::prelude::*;
use result::PyClassificationResult;

/// Classify the net collected in `net`.
///
/// `categories` restricts the evaluated predicates, e.g. `["free-choice", "workflow"]`.
#[pyfunction]
#[pyo3(signature = (net, categories=None))]
fn classify(
    py: Python<'_>,
    net: &PyPetriNetBuilder,
    categories: Option<Vec<String>>,
) -> PyPetriResult<PyClassificationResult> {
    let mut config = ClassifierConfigBuilder::default();
    if let Some(categories) = categories {
        let categories =
            categories.iter().map(|c| c.parse::<Category>()).collect::<pncat::Result<Vec<_>>>()?;
        config.categories(categories);
    }
    let classifier = Classifier::new(config.build().map_err(pncat::PetriError::from)?);
    let net = Arc::clone(&net.net);
    py.allow_threads(move || -> PyPetriResult<PyClassificationResult> {
        let net = net.build()?;
        Ok(classifier.classify(&net).into())
    })
}

/// Structural categorization of petri nets.
#[pymodule]
#[pyo3(name = "pncat")]
fn pncat_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_class::<TracingToLogging>()?;
    m.add_class::<PyPetriNetBuilder>()?;
    m.add_class::<PyArcKind>()?;
    m.add_class::<PyClassificationResult>()?;
    Ok(())
}
