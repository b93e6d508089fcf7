use super::*;
use crate::Error;
use crate::cursor::*;
use crate::records::*;
use crate::schema::*;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// One stored row, by column name.
pub type Record = BTreeMap<&'static str, Datum>;

#[derive(Debug, Clone, Copy)]
struct Constraint {
    primary: &'static [&'static str],
    foreign: Option<(&'static str, &'static str)>,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<&'static str, Vec<Record>>,
    sequences: HashMap<&'static str, i64>,
    constraints: HashMap<&'static str, Constraint>,
    faults: HashSet<&'static str>,
    copies: usize,
}

impl State {
    /// Checks `rows` against the table's keys. `mine` and `owners` are the
    /// calling transaction's staged rows for this table and its owner.
    fn check(
        &self,
        table: &'static str,
        mine: &[Record],
        owners: &[Record],
        rows: &[Record],
    ) -> Result<(), Error> {
        let Some(constraint) = self.constraints.get(table).copied() else {
            return Ok(());
        };
        let mut keys = self
            .tables
            .get(table)
            .into_iter()
            .flatten()
            .chain(mine)
            .map(|r| identity(r, constraint.primary))
            .collect::<HashSet<_>>();
        for row in rows {
            let key = identity(row, constraint.primary);
            if keys.contains(&key) {
                return Err(Error::Duplicate { table, key });
            }
            keys.insert(key);
        }
        if let Some((column, owner)) = constraint.foreign {
            let ids = self
                .tables
                .get(owner)
                .into_iter()
                .flatten()
                .chain(owners)
                .filter_map(|r| r.get("id").and_then(Datum::int))
                .collect::<HashSet<_>>();
            for row in rows {
                let key = row.get(column).and_then(Datum::int).unwrap_or_default();
                if !ids.contains(&key) {
                    return Err(Error::Dangling { table, column, key });
                }
            }
        }
        Ok(())
    }
}

fn identity(record: &Record, columns: &[&'static str]) -> String {
    columns
        .iter()
        .map(|c| format!("{:?}", record.get(c).unwrap_or(&Datum::Null)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// An in-process relational store.
///
/// Tables, identity sequences, and key constraints live behind a shared
/// lock, so clones see the same data. Like real sequences, generated ids
/// are never handed out twice, even across rolled back transactions.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    state: Arc<Mutex<State>>,
}

impl Memory {
    /// A store enforcing the primary and foreign keys of every table.
    pub fn new() -> Self {
        let memory = Self::default();
        {
            let mut state = memory.lock();
            let constraints = &mut state.constraints;
            parent::<Game>(constraints);
            parent::<Deal>(constraints);
            parent::<DealPlayer>(constraints);
            parent::<CallTrumpDecision>(constraints);
            parent::<DiscardCardDecision>(constraints);
            parent::<Trick>(constraints);
            parent::<PlayCardDecision>(constraints);
            leaf::<GamePlayer>(constraints);
            leaf::<DealDeckCard>(constraints);
            leaf::<DealKnownVoid>(constraints);
            leaf::<StartingHandCard>(constraints);
            leaf::<CallHandCard>(constraints);
            leaf::<CallValidDecision>(constraints);
            leaf::<CallPredictedPoints>(constraints);
            leaf::<DiscardHandCard>(constraints);
            leaf::<DiscardPredictedPoints>(constraints);
            leaf::<TrickCardPlayed>(constraints);
            leaf::<PlayHandCard>(constraints);
            leaf::<PlayPlayedCard>(constraints);
            leaf::<PlayValidCard>(constraints);
            leaf::<PlayKnownVoid>(constraints);
            leaf::<PlayAccountedCard>(constraints);
            leaf::<PlayPredictedPoints>(constraints);
        }
        memory
    }
    pub fn begin(&self) -> MemoryTxn {
        MemoryTxn {
            memory: self.clone(),
            staged: HashMap::new(),
        }
    }
    /// Every later insert or copy into `table` fails.
    pub fn fail_on(&self, table: &'static str) {
        self.lock().faults.insert(table);
    }
    /// Committed rows of `table`, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }
    pub fn count(&self, table: &str) -> usize {
        self.lock().tables.get(table).map_or(0, Vec::len)
    }
    /// Committed rows across all tables.
    pub fn total(&self) -> usize {
        self.lock().tables.values().map(Vec::len).sum()
    }
    /// Bulk copies attempted, committed or not.
    pub fn copies(&self) -> usize {
        self.lock().copies
    }
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn parent<P>(constraints: &mut HashMap<&'static str, Constraint>)
where
    P: Parent,
{
    let constraint = Constraint {
        primary: &["id"],
        foreign: P::REFERENCES,
    };
    constraints.insert(P::TABLE, constraint);
}

fn leaf<L>(constraints: &mut HashMap<&'static str, Constraint>)
where
    L: Leaf,
{
    let constraint = Constraint {
        primary: L::PRIMARY,
        foreign: L::COLUMNS
            .first()
            .map(|c| (c.name, <L::Parent as Parent>::TABLE)),
    };
    constraints.insert(L::TABLE, constraint);
}

/// A transaction against a [`Memory`] store.
///
/// Rows are staged privately and applied on commit. Dropping or rolling
/// back discards them.
#[derive(Debug)]
pub struct MemoryTxn {
    memory: Memory,
    staged: HashMap<&'static str, Vec<Record>>,
}

impl MemoryTxn {
    /// Rows staged for `table` and not yet committed.
    pub fn staged(&self, table: &str) -> usize {
        self.staged.get(table).map_or(0, Vec::len)
    }
    fn stage(&mut self, table: &'static str, rows: Vec<Record>) -> Result<(), Error> {
        let state = self.memory.lock();
        let owner = state
            .constraints
            .get(table)
            .and_then(|c| c.foreign)
            .map(|(_, owner)| owner);
        let empty = Vec::new();
        let mine = self.staged.get(table).unwrap_or(&empty);
        let theirs = owner.and_then(|o| self.staged.get(o)).unwrap_or(&empty);
        state.check(table, mine, theirs, &rows)?;
        drop(state);
        self.staged.entry(table).or_default().extend(rows);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for MemoryTxn {
    async fn insert(
        &mut self,
        table: &'static str,
        columns: &[&'static str],
        values: &[Value<'_>],
    ) -> Result<i64, Error> {
        let id = {
            let mut state = self.memory.lock();
            if state.faults.contains(table) {
                return Err(Error::Transient(format!("injected failure inserting into {}", table)));
            }
            let sequence = state.sequences.entry(table).or_default();
            *sequence += 1;
            *sequence
        };
        let record = std::iter::once(("id", Datum::Int8(id)))
            .chain(columns.iter().copied().zip(values.iter().copied().map(Datum::from)))
            .collect::<Record>();
        self.stage(table, vec![record])?;
        Ok(id)
    }
    async fn copy<'a>(
        &mut self,
        table: &'static str,
        mapping: &[Mapping],
        source: &mut (dyn RowSource<'a> + 'a),
    ) -> Result<u64, Error> {
        {
            let mut state = self.memory.lock();
            state.copies += 1;
            if state.faults.contains(table) {
                return Err(Error::Transient(format!("injected failure copying into {}", table)));
            }
        }
        let ordinals = mapping
            .iter()
            .map(|m| source.ordinal(m.source).map(|i| (i, m.target)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut rows = Vec::with_capacity(source.len());
        while source.advance() {
            let record = ordinals
                .iter()
                .map(|(i, target)| source.value(*i).map(|v| (*target, Datum::from(v))))
                .collect::<Result<Record, _>>()?;
            rows.push(record);
        }
        let n = rows.len() as u64;
        self.stage(table, rows)?;
        Ok(n)
    }
    async fn commit(self) -> Result<(), Error> {
        let mut state = self.memory.lock();
        for (table, rows) in self.staged {
            state.tables.entry(table).or_default().extend(rows);
        }
        Ok(())
    }
    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}
