use super::*;
use crate::Error;
use crate::Failure;
use crate::Graph;
use crate::Key;
use crate::Owns;
use crate::cursor::*;
use crate::graph::Buffer;
use crate::records::*;
use crate::schema::*;
use crate::store::Store;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Persists root graphs through a [`Store`], one transaction per graph.
pub struct Loader {
    registry: Registry,
    strategy: Strategy,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(Registry::standard())
    }
}

impl Loader {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            strategy: Strategy::default(),
        }
    }
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Loads one graph inside `store`'s transaction and commits it.
    ///
    /// Either every parent and every leaf of the graph lands, or the
    /// transaction is rolled back and nothing does. The graph is consumed;
    /// callers that want to retry should keep a clone of it from before
    /// the first attempt.
    pub async fn load<S>(
        &self,
        mut store: S,
        mut graph: Graph,
        cancel: &CancellationToken,
    ) -> Result<Receipt, Failure>
    where
        S: Store,
    {
        let result = match self.run(&mut store, &mut graph, cancel).await {
            Ok(receipt) => checkpoint(cancel, Step::Commit, None).map(|_| receipt),
            Err(failure) => Err(failure),
        };
        match result {
            Ok(receipt) => {
                store.commit().await.map_err(|error| Failure {
                    step: Step::Commit,
                    table: None,
                    error,
                })?;
                log::info!("committed game {}: {}", id(&graph), receipt);
                Ok(receipt)
            }
            Err(failure) => {
                match failure.is_cancelled() {
                    true => log::warn!("cancelled during {}, rolling back", failure.step),
                    false => log::warn!("{}, rolling back", failure),
                }
                if let Err(e) = store.rollback().await {
                    log::error!("rollback failed: {}", e);
                }
                Err(failure)
            }
        }
    }

    async fn run<S>(
        &self,
        store: &mut S,
        graph: &mut Graph,
        cancel: &CancellationToken,
    ) -> Result<Receipt, Failure>
    where
        S: Store,
    {
        let mut receipt = Receipt::default();
        log::debug!("inserting {} parents", graph.parents());
        checkpoint(cancel, Step::Parents, Some(GAME))?;
        insert(store, graph.game_mut()).await?;
        receipt.parents += 1;
        receipt.parents += children::<S, Deal>(store, graph, cancel).await?;
        receipt.parents += children::<S, DealPlayer>(store, graph, cancel).await?;
        receipt.parents += children::<S, CallTrumpDecision>(store, graph, cancel).await?;
        receipt.parents += children::<S, DiscardCardDecision>(store, graph, cancel).await?;
        receipt.parents += children::<S, Trick>(store, graph, cancel).await?;
        receipt.parents += children::<S, PlayCardDecision>(store, graph, cancel).await?;

        checkpoint(cancel, Step::Flatten, None)?;
        let mut buffers = graph.flatten();
        log::debug!("flattened {} leaves", buffers.len());

        checkpoint(cancel, Step::Backpatch, None)?;
        buffers.backpatch(graph).map_err(|error| Failure {
            step: Step::Backpatch,
            table: None,
            error,
        })?;

        self.copy(store, &buffers.game_players, cancel, &mut receipt).await?;
        self.copy(store, &buffers.deck_cards, cancel, &mut receipt).await?;
        self.copy(store, &buffers.known_voids, cancel, &mut receipt).await?;
        self.copy(store, &buffers.starting_hands, cancel, &mut receipt).await?;
        self.copy(store, &buffers.call_hands, cancel, &mut receipt).await?;
        self.copy(store, &buffers.call_valid, cancel, &mut receipt).await?;
        self.copy(store, &buffers.call_points, cancel, &mut receipt).await?;
        self.copy(store, &buffers.discard_hands, cancel, &mut receipt).await?;
        self.copy(store, &buffers.discard_points, cancel, &mut receipt).await?;
        self.copy(store, &buffers.trick_cards, cancel, &mut receipt).await?;
        self.copy(store, &buffers.play_hands, cancel, &mut receipt).await?;
        self.copy(store, &buffers.play_played, cancel, &mut receipt).await?;
        self.copy(store, &buffers.play_valid, cancel, &mut receipt).await?;
        self.copy(store, &buffers.play_voids, cancel, &mut receipt).await?;
        self.copy(store, &buffers.play_accounted, cancel, &mut receipt).await?;
        self.copy(store, &buffers.play_points, cancel, &mut receipt).await?;
        Ok(receipt)
    }

    /// Bulk-copies one leaf table. Empty buffers issue no call.
    async fn copy<S, L>(
        &self,
        store: &mut S,
        buffer: &Buffer<L>,
        cancel: &CancellationToken,
        receipt: &mut Receipt,
    ) -> Result<(), Failure>
    where
        S: Store,
        L: Leaf,
    {
        let fail = |error: Error| Failure {
            step: Step::Copy,
            table: Some(L::TABLE),
            error,
        };
        if buffer.is_empty() {
            return Ok(());
        }
        checkpoint(cancel, Step::Copy, Some(L::TABLE))?;
        let descriptor = self.registry.descriptor::<L>().map_err(fail)?;
        let ref mapping = Mapping::identity(&descriptor);
        let rows = match self.strategy {
            Strategy::Stream => {
                let ref mut cursor = Cursor::new(descriptor, buffer.leaves());
                race(store.copy(L::TABLE, mapping, cursor), cancel).await
            }
            Strategy::Batch => {
                let batch = Batch::collect(descriptor, buffer.leaves()).map_err(fail)?;
                let ref mut rows = batch.rows();
                race(store.copy(L::TABLE, mapping, rows), cancel).await
            }
        }
        .map_err(fail)?;
        log::debug!("copied {:>6} rows into {}", rows, L::TABLE);
        receipt.record(L::TABLE, rows);
        Ok(())
    }
}

/// Fails with [`Error::Cancelled`] once cancellation has been requested.
fn checkpoint(
    cancel: &CancellationToken,
    step: Step,
    table: Option<&'static str>,
) -> Result<(), Failure> {
    match cancel.is_cancelled() {
        true => Err(Failure {
            step,
            table,
            error: Error::Cancelled,
        }),
        false => Ok(()),
    }
}

/// Runs a copy unless cancellation wins first, in which case the copy
/// future is dropped mid-flight.
async fn race<F>(copy: F, cancel: &CancellationToken) -> Result<u64, Error>
where
    F: Future<Output = Result<u64, Error>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = copy => result,
    }
}

/// Inserts one parent and keeps the key the store generated for it.
async fn insert<S, P>(store: &mut S, parent: &mut P) -> Result<(), Failure>
where
    S: Store,
    P: Parent,
{
    let fail = |error: Error| Failure {
        step: Step::Parents,
        table: Some(P::TABLE),
        error,
    };
    let id = {
        let names = P::COLUMNS.iter().map(|c| c.name).collect::<Vec<_>>();
        let values = P::COLUMNS
            .iter()
            .map(|c| c.extract(P::TABLE, parent))
            .collect::<Result<Vec<_>, _>>()
            .map_err(fail)?;
        store.insert(P::TABLE, &names, &values).await.map_err(fail)?
    };
    parent.assign(Key::from(id));
    Ok(())
}

/// Inserts every parent of type `C`, each after its owner's key is known.
async fn children<S, C>(
    store: &mut S,
    graph: &mut Graph,
    cancel: &CancellationToken,
) -> Result<usize, Failure>
where
    S: Store,
    C: Child,
    Graph: Owns<C> + Owns<C::Owner>,
{
    let n = <Graph as Owns<C>>::arena(graph).len();
    for index in 0..n {
        checkpoint(cancel, Step::Parents, Some(C::TABLE))?;
        let child = graph.resolve::<C>(index).map_err(|error| Failure {
            step: Step::Parents,
            table: Some(C::TABLE),
            error,
        })?;
        insert(store, child).await?;
    }
    Ok(n)
}

fn id(graph: &Graph) -> String {
    graph
        .game()
        .key()
        .map(|k| k.to_string())
        .unwrap_or_else(|| String::from("?"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;
    use crate::store::*;

    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    /// A game with one deal, one trick of four cards, and one play decision
    /// holding a five card hand.
    fn scenario() -> Graph {
        let mut graph = Graph::new(Game::new(0, [10, 7]));
        for (seat, actor) in ["alice", "bot", "carol", "bot"].iter().enumerate() {
            graph.game_mut().players.push(GamePlayer::new(seat as u8, *actor));
        }
        let deal = graph.deal(Deal::new(0, 3, card("Jh")).called(Suit::Heart, 0, false));
        let trick = graph.trick(Trick::new(deal, 0, 0).won(2));
        for (i, c) in ["9h", "Ah", "Jd", "Th"].iter().enumerate() {
            let trick = graph.trick_mut(trick).unwrap();
            trick.cards.push(TrickCardPlayed::new(i as i16, i as u8, card(c)));
        }
        let mut play = PlayCardDecision::new(trick, 0, 0, Suit::Heart, card("9h"));
        for (i, c) in ["9h", "Ah", "Kc", "Ts", "Qd"].iter().enumerate() {
            play.hand.push(PlayHandCard::new(i as i16, card(c)));
        }
        graph.play(play);
        graph
    }

    fn ordered(rows: Vec<crate::store::Record>, by: &str) -> Vec<Datum> {
        let mut rows = rows;
        rows.sort_by_key(|r| r.get(by).and_then(Datum::int));
        rows.into_iter()
            .filter_map(|r| r.get("card").cloned())
            .collect()
    }

    #[tokio::test]
    async fn scenario_round_trips_through_the_store() {
        let memory = Memory::new();
        let receipt = Loader::default()
            .load(memory.begin(), scenario(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(receipt.parents, 4);
        assert_eq!(receipt.rows(TRICK_CARD_PLAYED), 4);
        assert_eq!(receipt.rows(PLAY_CARD_HAND), 5);
        assert_eq!(receipt.rows(GAME_PLAYER), 4);
        assert_eq!(receipt.copies, 3);

        let played = ordered(memory.rows(TRICK_CARD_PLAYED), "play_order");
        let expected = ["9h", "Ah", "Jd", "Th"].map(|c| Datum::Int2(i16::from(card(c))));
        assert_eq!(played, expected.to_vec());
        let hand = ordered(memory.rows(PLAY_CARD_HAND), "sort_order");
        let expected = ["9h", "Ah", "Kc", "Ts", "Qd"].map(|c| Datum::Int2(i16::from(card(c))));
        assert_eq!(hand, expected.to_vec());

        let trick = memory.rows(TRICK)[0].get("id").cloned();
        let play = memory.rows(PLAY_CARD)[0].get("id").cloned();
        assert!(memory.rows(TRICK_CARD_PLAYED).iter().all(|r| r.get("trick_id").cloned() == trick));
        assert!(memory.rows(PLAY_CARD_HAND).iter().all(|r| r.get("play_card_decision_id").cloned() == play));
    }

    #[tokio::test]
    async fn failed_table_rolls_back_everything() {
        let memory = Memory::new();
        memory.fail_on(PLAY_CARD_HAND);
        let failure = Loader::default()
            .load(memory.begin(), scenario(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(failure.step, Step::Copy);
        assert_eq!(failure.table, Some(PLAY_CARD_HAND));
        assert!(failure.error.retriable());
        assert_eq!(memory.total(), 0);
    }

    #[tokio::test]
    async fn failed_parent_rolls_back_everything() {
        let memory = Memory::new();
        memory.fail_on(TRICK);
        let failure = Loader::default()
            .load(memory.begin(), scenario(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(failure.step, Step::Parents);
        assert_eq!(failure.table, Some(TRICK));
        assert_eq!(memory.total(), 0);
        assert_eq!(memory.copies(), 0);
    }

    #[tokio::test]
    async fn leafless_graph_copies_nothing() {
        let memory = Memory::new();
        let mut graph = Graph::new(Game::new(1, [3, 10]));
        let deal = graph.deal(Deal::new(0, 1, card("Qs")));
        graph.trick(Trick::new(deal, 0, 2));
        graph.player(DealPlayer::new(deal, 0));
        let receipt = Loader::default()
            .load(memory.begin(), graph, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(receipt.copies, 0);
        assert_eq!(memory.copies(), 0);
        assert_eq!(receipt.parents, 4);
        assert_eq!(memory.total(), 4);
    }

    #[tokio::test]
    async fn every_leaf_has_a_parent() {
        let memory = Memory::new();
        let graph = scenario();
        let leaves = graph.leaves() as u64;
        let receipt = Loader::default()
            .load(memory.begin(), graph, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(receipt.leaves(), leaves);
        let games = memory
            .rows(GAME)
            .iter()
            .filter_map(|r| r.get("id").cloned())
            .collect::<Vec<_>>();
        assert!(memory
            .rows(GAME_PLAYER)
            .iter()
            .all(|r| r.get("game_id").is_some_and(|g| games.contains(g))));
    }

    #[tokio::test]
    async fn cancellation_prevents_commit() {
        let memory = Memory::new();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let failure = Loader::default()
            .load(memory.begin(), scenario(), &cancel)
            .await
            .unwrap_err();
        assert!(failure.is_cancelled());
        assert_eq!(failure.step, Step::Parents);
        assert_eq!(memory.total(), 0);
    }

    /// Delegates to a memory transaction and cancels the token once the
    /// `after`th copy call is reached, either when it finishes or, when
    /// `during` is set, while it is still in flight.
    struct Cancelling {
        inner: MemoryTxn,
        cancel: CancellationToken,
        after: usize,
        during: bool,
        copies: usize,
    }

    impl Cancelling {
        fn new(memory: &Memory, cancel: &CancellationToken, after: usize, during: bool) -> Self {
            Self {
                inner: memory.begin(),
                cancel: cancel.clone(),
                after,
                during,
                copies: 0,
            }
        }
    }

    #[async_trait::async_trait]
    impl Store for Cancelling {
        async fn insert(
            &mut self,
            table: &'static str,
            columns: &[&'static str],
            values: &[Value<'_>],
        ) -> Result<i64, Error> {
            self.inner.insert(table, columns, values).await
        }
        async fn copy<'a>(
            &mut self,
            table: &'static str,
            mapping: &[Mapping],
            source: &mut (dyn RowSource<'a> + 'a),
        ) -> Result<u64, Error> {
            self.copies += 1;
            let trigger = self.copies == self.after;
            if trigger && self.during {
                self.cancel.cancel();
                tokio::task::yield_now().await;
            }
            let rows = self.inner.copy(table, mapping, source).await?;
            if trigger {
                self.cancel.cancel();
            }
            Ok(rows)
        }
        async fn commit(self) -> Result<(), Error> {
            self.inner.commit().await
        }
        async fn rollback(self) -> Result<(), Error> {
            self.inner.rollback().await
        }
    }

    #[tokio::test]
    async fn cancellation_between_tables_stops_the_next_copy() {
        let memory = Memory::new();
        let cancel = CancellationToken::new();
        let failure = Loader::default()
            .load(Cancelling::new(&memory, &cancel, 1, false), scenario(), &cancel)
            .await
            .unwrap_err();
        assert!(failure.is_cancelled());
        assert_eq!(failure.step, Step::Copy);
        assert_eq!(failure.table, Some(TRICK_CARD_PLAYED));
        assert_eq!(memory.copies(), 1);
        assert_eq!(memory.total(), 0);
    }

    #[tokio::test]
    async fn cancellation_during_a_copy_abandons_it() {
        let memory = Memory::new();
        let cancel = CancellationToken::new();
        let failure = Loader::default()
            .load(Cancelling::new(&memory, &cancel, 2, true), scenario(), &cancel)
            .await
            .unwrap_err();
        assert!(failure.is_cancelled());
        assert_eq!(failure.step, Step::Copy);
        assert_eq!(failure.table, Some(TRICK_CARD_PLAYED));
        assert_eq!(memory.copies(), 1);
        assert_eq!(memory.total(), 0);
    }

    #[tokio::test]
    async fn cancellation_after_the_last_table_prevents_commit() {
        let memory = Memory::new();
        let cancel = CancellationToken::new();
        let failure = Loader::default()
            .load(Cancelling::new(&memory, &cancel, 3, false), scenario(), &cancel)
            .await
            .unwrap_err();
        assert!(failure.is_cancelled());
        assert_eq!(failure.step, Step::Commit);
        assert_eq!(failure.table, None);
        assert_eq!(memory.copies(), 3);
        assert_eq!(memory.total(), 0);
    }

    /// Declares `card` as an integer while its accessor yields a smallint.
    #[rustfmt::skip]
    static SKEWED: [Column<TrickCardPlayed>; 4] = [
        Column::required("trick_id",   Kind::Int8, |c| (TrickCardPlayed::COLUMNS[0].get)(c)),
        Column::required("play_order", Kind::Int2, |c| (TrickCardPlayed::COLUMNS[1].get)(c)),
        Column::required("seat",       Kind::Int2, |c| (TrickCardPlayed::COLUMNS[2].get)(c)),
        Column::required("card",       Kind::Int4, |c| (TrickCardPlayed::COLUMNS[3].get)(c)),
    ];

    #[tokio::test]
    async fn mistyped_column_aborts_the_graph() {
        for strategy in [Strategy::Stream, Strategy::Batch] {
            let memory = Memory::new();
            let mut registry = Registry::standard();
            registry.describe(Descriptor {
                table: TRICK_CARD_PLAYED,
                columns: &SKEWED,
            });
            let failure = Loader::new(registry)
                .strategy(strategy)
                .load(memory.begin(), scenario(), &CancellationToken::new())
                .await
                .unwrap_err();
            assert_eq!(failure.step, Step::Copy);
            assert_eq!(failure.table, Some(TRICK_CARD_PLAYED));
            assert!(matches!(failure.error, Error::Mismatch { column: "card", .. }));
            assert_eq!(failure.error.class(), crate::Class::Integrity);
            assert_eq!(memory.total(), 0);
        }
    }

    #[tokio::test]
    async fn batch_strategy_loads_the_same_rows() {
        let streamed = Memory::new();
        let batched = Memory::new();
        let cancel = CancellationToken::new();
        let a = Loader::default()
            .load(streamed.begin(), scenario(), &cancel)
            .await
            .unwrap();
        let b = Loader::default()
            .strategy(Strategy::Batch)
            .load(batched.begin(), scenario(), &cancel)
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(streamed.rows(PLAY_CARD_HAND), batched.rows(PLAY_CARD_HAND));
    }

    #[tokio::test]
    async fn duplicate_void_fact_is_a_data_error() {
        let memory = Memory::new();
        let mut graph = scenario();
        let deal = graph.deal_mut(crate::Local::new(0)).unwrap();
        deal.voids.push(DealKnownVoid::new(1, Suit::Club));
        deal.voids.push(DealKnownVoid::new(1, Suit::Club));
        let failure = Loader::default()
            .load(memory.begin(), graph, &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(failure.table, Some(DEAL_KNOWN_VOID));
        assert!(matches!(failure.error, Error::Duplicate { .. }));
        assert_eq!(memory.total(), 0);
    }

    #[tokio::test]
    async fn unregistered_leaf_is_a_configuration_failure() {
        let memory = Memory::new();
        let failure = Loader::new(Registry::default())
            .load(memory.begin(), scenario(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(failure.table, Some(GAME_PLAYER));
        assert_eq!(failure.error.class(), crate::Class::Configuration);
        assert_eq!(memory.total(), 0);
    }
}
