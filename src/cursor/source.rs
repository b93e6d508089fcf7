use crate::Error;
use crate::schema::Kind;
use crate::schema::Value;

/// A forward-only, single-pass view of rows, addressed by column ordinal.
///
/// This is what the store's bulk-copy primitive consumes. Resolve names to
/// ordinals once with [`ordinal`](RowSource::ordinal) before the row loop;
/// every per-row call goes by ordinal. Values borrow from the underlying
/// records (`'a`), not from the source, so a caller may hold a row's values
/// while advancing.
pub trait RowSource<'a>: Send {
    /// Destination table, for error context.
    fn table(&self) -> &'static str;
    /// Total rows, whether or not they have been visited.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Move to the next row. `false` once exhausted, and forever after.
    fn advance(&mut self) -> bool;
    fn column_count(&self) -> usize;
    fn column_name(&self, ordinal: usize) -> Result<&'static str, Error>;
    fn column_type(&self, ordinal: usize) -> Result<Kind, Error>;
    fn ordinal(&self, name: &str) -> Result<usize, Error> {
        (0..self.column_count())
            .find(|i| self.column_name(*i).is_ok_and(|n| n == name))
            .ok_or_else(|| Error::UnknownColumn {
                table: self.table(),
                column: name.to_string(),
            })
    }
    /// Value of a column in the current row.
    fn value(&self, ordinal: usize) -> Result<Value<'a>, Error>;
    fn is_null(&self, ordinal: usize) -> Result<bool, Error> {
        self.value(ordinal).map(|v| v.is_null())
    }
    /// Leaf columns are scalar. There is nothing to stream.
    fn bytes(&self, ordinal: usize, _offset: usize, _buffer: &mut [u8]) -> Result<usize, Error> {
        Err(Error::Unsupported {
            table: self.table(),
            column: self.column_name(ordinal)?,
            access: "byte",
        })
    }
    /// Leaf columns are scalar. There is nothing to stream.
    fn chars(&self, ordinal: usize, _offset: usize, _buffer: &mut [char]) -> Result<usize, Error> {
        Err(Error::Unsupported {
            table: self.table(),
            column: self.column_name(ordinal)?,
            access: "character",
        })
    }
}
