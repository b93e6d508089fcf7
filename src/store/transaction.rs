use crate::Error;
use crate::cursor::*;
use crate::schema::Value;

/// One open unit of work against a relational store.
///
/// Parents go through [`insert`](Store::insert), one row at a time, because
/// the loader needs each generated key back. Leaves go through
/// [`copy`](Store::copy), one call per table. Nothing is visible outside the
/// transaction until [`commit`](Store::commit); dropping it without
/// committing discards everything.
#[async_trait::async_trait]
pub trait Store: Send + Sized {
    /// Inserts one row and returns its generated `id`.
    async fn insert(
        &mut self,
        table: &'static str,
        columns: &[&'static str],
        values: &[Value<'_>],
    ) -> Result<i64, Error>;
    /// Bulk-loads every remaining row of `source` into `table`, matching
    /// columns by name through `mapping`. Returns rows written.
    async fn copy<'a>(
        &mut self,
        table: &'static str,
        mapping: &[Mapping],
        source: &mut (dyn RowSource<'a> + 'a),
    ) -> Result<u64, Error>;
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}
