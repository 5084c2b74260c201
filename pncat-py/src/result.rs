use pncat::{classify::WorkflowReport, net::NodeId, ClassificationResult};
use pyo3::prelude::*;

#[pyclass(frozen, name = "ClassificationResult")]
pub struct PyClassificationResult {
    #[pyo3(get)]
    free_choice: bool,
    #[pyo3(get)]
    marked_graph: bool,
    #[pyo3(get)]
    state_machine: bool,
    #[pyo3(get)]
    workflow: bool,
    /// Labels of all satisfied categories.
    #[pyo3(get)]
    categories: Vec<String>,
    #[pyo3(get)]
    source: Option<String>,
    #[pyo3(get)]
    sink: Option<String>,
    #[pyo3(get)]
    unreached: Vec<String>,
    /// Why the net is not a workflow net, None if it is one or the check did not run.
    #[pyo3(get)]
    workflow_failure: Option<String>,
    summary: String,
}

impl From<ClassificationResult> for PyClassificationResult {
    fn from(result: ClassificationResult) -> Self {
        let report = result.workflow();
        let id = |id: &NodeId| id.to_string();
        Self {
            free_choice: result.is_free_choice(),
            marked_graph: result.is_marked_graph(),
            state_machine: result.is_state_machine(),
            workflow: result.is_workflow(),
            categories: result.categories().iter().map(|c| c.to_string()).collect(),
            source: report.and_then(WorkflowReport::source).map(id),
            sink: report.and_then(WorkflowReport::sink).map(id),
            unreached: report.map(|r| r.unreached().iter().map(id).collect()).unwrap_or_default(),
            workflow_failure: report.and_then(WorkflowReport::failure).map(|f| f.to_string()),
            summary: result.to_string(),
        }
    }
}

#[pymethods]
impl PyClassificationResult {
    fn __str__(&self) -> &str {
        &self.summary
    }

    fn __repr__(&self) -> String {
        format!("ClassificationResult({})", self.summary)
    }
}
