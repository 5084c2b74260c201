use pncat::{
    error::Result as PetriResult,
    net::{Arc, ArcKind, PetriNetBuilder, Place, Transition},
    Category,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

//   received ──► check ──► checked ──► ship ──► shipped
//                  │                              ▲
//                  └──────► reject ───────────────┘
fn order_process() -> PetriResult<PetriNetBuilder> {
    let mut net = PetriNetBuilder::default();
    net.insert_place(Place::new("/order/received", "received"));
    net.insert_place(Place::new("/order/checked", "checked"));
    net.insert_place(Place::new("/order/shipped", "shipped"));
    net.insert_transition(Transition::new("/order/check", "check"));
    net.insert_transition(Transition::new("/order/ship", "ship"));
    net.insert_transition(Transition::new("/order/reject", "reject"));
    for (src, dst) in [
        ("/order/received", "/order/check"),
        ("/order/received", "/order/reject"),
        ("/order/checked", "/order/ship"),
    ] {
        net.insert_arc(Arc::new(src, dst, ArcKind::PlaceToTransition));
    }
    for (src, dst) in [
        ("/order/check", "/order/checked"),
        ("/order/ship", "/order/shipped"),
        ("/order/reject", "/order/shipped"),
    ] {
        net.insert_arc(Arc::new(src, dst, ArcKind::TransitionToPlace));
    }
    Ok(net)
}

fn main() -> PetriResult<()> {
    // set up logging
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::try_new("info,pncat=debug").unwrap())
        .init();

    let net = order_process()?.build()?;
    let result = pncat::classify(&net);
    info!(categories = %result, "Order process classified.");
    for category in Category::ALL {
        info!(%category, holds = result.is(category));
    }
    if let Some(workflow) = result.workflow() {
        info!(source = ?workflow.source(), sink = ?workflow.sink(), "Workflow endpoints.");
    }
    Ok(())
}
