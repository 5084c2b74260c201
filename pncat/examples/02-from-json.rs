use pncat::{
    error::Result as PetriResult,
    net::{Arc, ArcKind, NetElement, PetriNet, Place, Transition},
    Category, Classifier, ClassifierConfigBuilder,
};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Node list as exported by a modelling tool: every node carries its meta type.
const EXPORT: &str = r#"[
    {"path": "/n/1", "meta": "Place", "name": "idle"},
    {"path": "/n/2", "meta": "Place", "name": "busy"},
    {"path": "/n/3", "meta": "Place", "name": "stale"},
    {"path": "/n/4", "meta": "Transition", "name": "start"},
    {"path": "/n/5", "meta": "Transition", "name": "finish"},
    {"path": "/n/6", "meta": "ArcPlaceToTransition", "src": "/n/1", "dst": "/n/4"},
    {"path": "/n/7", "meta": "ArcTransitionToPlace", "src": "/n/4", "dst": "/n/2"},
    {"path": "/n/8", "meta": "ArcPlaceToTransition", "src": "/n/2", "dst": "/n/5"},
    {"path": "/n/9", "meta": "ArcTransitionToPlace", "src": "/n/5", "dst": "/n/1"}
]"#;

#[derive(Deserialize)]
struct ExportedNode {
    path: String,
    meta: String,
    #[serde(default)]
    name: String,
    src: Option<String>,
    dst: Option<String>,
}

impl TryFrom<ExportedNode> for NetElement {
    type Error = pncat::PetriError;

    fn try_from(node: ExportedNode) -> PetriResult<Self> {
        match (node.meta.as_str(), node.src, node.dst) {
            ("Place", _, _) => Ok(Place::new(node.path, node.name).into()),
            ("Transition", _, _) => Ok(Transition::new(node.path, node.name).into()),
            (meta, Some(src), Some(dst)) => Ok(Arc::new(src, dst, meta.parse::<ArcKind>()?).into()),
            (meta, _, _) => Err(pncat::PetriError::ValueError(format!(
                "Node '{}' of type '{meta}' is missing an endpoint.",
                node.path
            ))),
        }
    }
}

fn main() -> PetriResult<()> {
    // set up logging
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::try_new("info,pncat=debug").unwrap())
        .init();

    let nodes: Vec<ExportedNode> = serde_json::from_str(EXPORT).unwrap();
    let elements = nodes.into_iter().map(NetElement::try_from).collect::<PetriResult<Vec<_>>>()?;
    let net = PetriNet::from_elements(elements)?;

    let config = ClassifierConfigBuilder::default()
        .categories([Category::StateMachine, Category::Workflow])
        .unreached_log_limit(4)
        .build()?;
    let result = Classifier::new(config).classify(&net);
    info!(categories = %result, "Exported net classified.");
    if let Some(failure) = result.workflow().and_then(|report| report.failure()) {
        warn!(%failure, "Not a workflow net.");
    }
    Ok(())
}
