use pncat::error::PetriError;
use pyo3::{
    exceptions::{PyRuntimeError, PyValueError},
    PyErr,
};

pub struct PyPetriError(pub PetriError);

impl From<PyPetriError> for PyErr {
    fn from(error: PyPetriError) -> Self {
        match error.0 {
            err @ (PetriError::InvalidTopology(_) | PetriError::ValueError(_)) => {
                PyValueError::new_err(err.to_string())
            }
            err => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

impl From<PetriError> for PyPetriError {
    fn from(other: PetriError) -> Self {
        Self(other)
    }
}

pub type PyPetriResult<T> = Result<T, PyPetriError>;
