criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        simulating_game,
        flattening_game,
        scanning_play_hands,
        batching_play_hands,
        loading_game_streamed,
        loading_game_batched,
}

fn simulating_game(c: &mut criterion::Criterion) {
    let mut simulator = Simulator::new(0);
    c.bench_function("simulate a full Euchre game", |b| {
        b.iter(|| simulator.game())
    });
}

fn flattening_game(c: &mut criterion::Criterion) {
    let graph = Simulator::new(1).game();
    c.bench_function("flatten a game into leaf buffers", |b| {
        b.iter_batched(
            || graph.clone(),
            |mut graph| graph.flatten(),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn scanning_play_hands(c: &mut criterion::Criterion) {
    let buffers = patched(Simulator::new(2).game());
    let descriptor = Descriptor::<PlayHandCard>::of();
    c.bench_function("stream every column of play hand cards", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(descriptor, buffers.play_hands.leaves());
            let mut n = 0;
            while cursor.advance() {
                for i in 0..cursor.column_count() {
                    n += cursor.value(i).map(|v| !v.is_null() as usize).unwrap_or(0);
                }
            }
            n
        })
    });
}

fn batching_play_hands(c: &mut criterion::Criterion) {
    let buffers = patched(Simulator::new(2).game());
    let descriptor = Descriptor::<PlayHandCard>::of();
    c.bench_function("materialize play hand cards into a batch", |b| {
        b.iter(|| Batch::collect(descriptor, buffers.play_hands.leaves()))
    });
}

fn loading_game_streamed(c: &mut criterion::Criterion) {
    loading(c, Strategy::Stream, "load a game into memory (stream)");
}

fn loading_game_batched(c: &mut criterion::Criterion) {
    loading(c, Strategy::Batch, "load a game into memory (batch)");
}

fn loading(c: &mut criterion::Criterion, strategy: Strategy, name: &str) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let graph = Simulator::new(3).game();
    let loader = Loader::default().strategy(strategy);
    let cancel = CancellationToken::new();
    c.bench_function(name, |b| {
        b.iter_batched(
            || (graph.clone(), Memory::default()),
            |(graph, memory)| runtime.block_on(loader.load(memory.begin(), graph, &cancel)),
            criterion::BatchSize::SmallInput,
        )
    });
}

/// Flattened buffers with every foreign key filled in.
fn patched(mut graph: Graph) -> Buffers {
    assign::<Game>(&mut graph);
    assign::<Deal>(&mut graph);
    assign::<DealPlayer>(&mut graph);
    assign::<CallTrumpDecision>(&mut graph);
    assign::<DiscardCardDecision>(&mut graph);
    assign::<Trick>(&mut graph);
    assign::<PlayCardDecision>(&mut graph);
    let mut buffers = graph.flatten();
    buffers.backpatch(&graph).unwrap();
    buffers
}

fn assign<P>(graph: &mut Graph)
where
    P: Parent,
    Graph: Owns<P>,
{
    for (i, parent) in <Graph as Owns<P>>::arena_mut(graph).iter_mut().enumerate() {
        parent.assign(Key::from(i as i64 + 1));
    }
}

use euchre_store::cursor::*;
use euchre_store::graph::*;
use euchre_store::records::*;
use euchre_store::schema::*;
use euchre_store::store::*;
use euchre_store::synthetic::Simulator;
use euchre_store::*;
use tokio_util::sync::CancellationToken;
