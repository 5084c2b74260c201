/// Benchmark for classifying nets of growing size
///
/// Uses N copies of the following stage, chained one after the other:
///
///   pl(i) ──► tr(i) ──► pl(i+1)
///               │          ▲
///               ▼          │
///            pl(i)' ──► tr(i)'
///
/// Every stage forks into two places and joins again, so the net is a free-choice workflow net
/// but neither a marked graph nor a state machine. All predicates have to look at every node.
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use pncat::net::{Arc, ArcKind, IncidenceIndex, PetriNet, PetriNetBuilder, Place, Transition};
use pncat::Classifier;

fn staged_net(stages: u64) -> PetriNet {
    let mut net = PetriNetBuilder::default();
    let place = |idx: u64| format!("pl{idx:06}");
    net.insert_place(Place::new(place(0), "start"));
    for idx in 0..stages {
        let (fork, join, side) = (format!("tr{idx:06}"), format!("tr{idx:06}'"), place(idx) + "'");
        net.insert_place(Place::new(place(idx + 1), ""));
        net.insert_place(Place::new(side.clone(), ""));
        net.insert_transition(Transition::new(fork.clone(), "fork"));
        net.insert_transition(Transition::new(join.clone(), "join"));
        net.insert_arc(Arc::new(place(idx), fork.clone(), ArcKind::PlaceToTransition));
        net.insert_arc(Arc::new(fork.clone(), place(idx + 1), ArcKind::TransitionToPlace));
        net.insert_arc(Arc::new(fork, side.clone(), ArcKind::TransitionToPlace));
        net.insert_arc(Arc::new(side, join.clone(), ArcKind::PlaceToTransition));
        net.insert_arc(Arc::new(join, place(idx + 1), ArcKind::TransitionToPlace));
    }
    net.build().expect("Benchmark net is valid")
}

fn benchmark_classify(c: &mut Criterion) {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            // tracing_subscriber::EnvFilter::try_new("info,pncat=debug").unwrap(),
            tracing_subscriber::EnvFilter::try_new("error").unwrap(),
        )
        .init();

    let classifier = Classifier::default();
    let mut group = c.benchmark_group("classify");
    for &stages in [1, 4, 16, 64, 256, 1024].iter() {
        let net = staged_net(stages);
        let index = IncidenceIndex::build(&net);
        group.throughput(Throughput::Elements(net.node_count() as u64));
        group.bench_with_input(BenchmarkId::new("build-index", stages), &net, |b, net| {
            b.iter(|| classifier.classify(net));
        });
        group.bench_with_input(BenchmarkId::new("reuse-index", stages), &index, |b, index| {
            b.iter(|| classifier.classify_with_index(index));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_classify);
criterion_main!(benches);
