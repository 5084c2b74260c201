mod predicates;
pub mod reach;
mod workflow;

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use derive_builder::Builder;
use tracing::debug;

use crate::{
    error::PetriError,
    net::{IncidenceIndex, PetriNet},
};

pub use predicates::{is_free_choice, is_marked_graph, is_state_machine};
pub use workflow::{check_workflow, WorkflowFailure, WorkflowReport};

pub const DEFAULT_UNREACHED_LOG_LIMIT: usize = 16;

/// Structural net classes the classifier can detect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    FreeChoice,
    MarkedGraph,
    StateMachine,
    Workflow,
}

impl Category {
    pub const ALL: [Category; 4] =
        [Category::FreeChoice, Category::MarkedGraph, Category::StateMachine, Category::Workflow];

    pub fn label(&self) -> &'static str {
        match self {
            Category::FreeChoice => "free-choice",
            Category::MarkedGraph => "marked graph",
            Category::StateMachine => "state machine",
            Category::Workflow => "workflow",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = PetriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "freechoice" => Ok(Category::FreeChoice),
            "markedgraph" => Ok(Category::MarkedGraph),
            "statemachine" => Ok(Category::StateMachine),
            "workflow" | "workflownet" => Ok(Category::Workflow),
            _ => Err(PetriError::ValueError(format!("Unknown category '{s}'."))),
        }
    }
}

#[derive(Builder, Clone, Debug)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ClassifierConfig {
    /// Predicates to evaluate.
    #[builder(setter(custom), default = "Category::ALL.into_iter().collect()")]
    pub categories: BTreeSet<Category>,
    /// Maximum number of unreached node ids written to the log by the workflow check.
    #[builder(default = "DEFAULT_UNREACHED_LOG_LIMIT")]
    pub unreached_log_limit: usize,
}

impl ClassifierConfigBuilder {
    pub fn categories<I: IntoIterator<Item = Category>>(&mut self, value: I) -> &mut Self {
        self.categories = Some(value.into_iter().collect());
        self
    }

    fn validate(&self) -> Result<(), String> {
        match &self.categories {
            Some(categories) if categories.is_empty() => {
                Err("at least one category has to be selected".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            categories: Category::ALL.into_iter().collect(),
            unreached_log_limit: DEFAULT_UNREACHED_LOG_LIMIT,
        }
    }
}

/// Categories a net belongs to, out of the ones that were evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassificationResult {
    evaluated: BTreeSet<Category>,
    satisfied: BTreeSet<Category>,
    workflow: Option<WorkflowReport>,
}

impl ClassificationResult {
    /// Satisfied categories.
    pub fn categories(&self) -> &BTreeSet<Category> {
        &self.satisfied
    }

    pub fn evaluated(&self) -> &BTreeSet<Category> {
        &self.evaluated
    }

    /// False for categories that hold but were not evaluated.
    pub fn is(&self, category: Category) -> bool {
        self.satisfied.contains(&category)
    }

    pub fn is_free_choice(&self) -> bool {
        self.is(Category::FreeChoice)
    }

    pub fn is_marked_graph(&self) -> bool {
        self.is(Category::MarkedGraph)
    }

    pub fn is_state_machine(&self) -> bool {
        self.is(Category::StateMachine)
    }

    pub fn is_workflow(&self) -> bool {
        self.is(Category::Workflow)
    }

    /// Details of the workflow check. None if it was not evaluated.
    pub fn workflow(&self) -> Option<&WorkflowReport> {
        self.workflow.as_ref()
    }
}

impl Display for ClassificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.satisfied.is_empty() {
            return write!(f, "none");
        }
        for (idx, category) in self.satisfied.iter().enumerate() {
            if idx == 0 {
                write!(f, "{}", category)?;
            } else {
                write!(f, ", {}", category)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Classifier { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(places = net.place_count(), transitions = net.transition_count())
    )]
    pub fn classify(&self, net: &PetriNet) -> ClassificationResult {
        self.classify_with_index(&IncidenceIndex::build(net))
    }

    /// Classify the net an existing index was built from.
    pub fn classify_with_index(&self, index: &IncidenceIndex) -> ClassificationResult {
        let mut satisfied = BTreeSet::new();
        let mut workflow = None;
        for &category in &self.config.categories {
            let holds = match category {
                Category::FreeChoice => is_free_choice(index),
                Category::MarkedGraph => is_marked_graph(index),
                Category::StateMachine => is_state_machine(index),
                Category::Workflow => {
                    let report = check_workflow(index, self.config.unreached_log_limit);
                    let holds = report.is_workflow();
                    workflow = Some(report);
                    holds
                }
            };
            if holds {
                satisfied.insert(category);
            }
        }
        let result =
            ClassificationResult { evaluated: self.config.categories.clone(), satisfied, workflow };
        debug!(categories = %result, "Classified petri net.");
        result
    }
}

/// Evaluate all categories for `net`.
pub fn classify(net: &PetriNet) -> ClassificationResult {
    Classifier::default().classify(net)
}
