use super::*;
use crate::Key;

/// A row that needs a generated identity before anything can reference it.
///
/// Inserted one at a time through the store's normal insert path, which
/// hands back the new key.
pub trait Parent: Sized + Send + Sync + 'static {
    /// Table the record is inserted into.
    const TABLE: &'static str;
    /// Columns written on insert. Excludes the generated `id`; an owner
    /// foreign key, if any, comes first.
    const COLUMNS: &'static [Column<Self>];
    /// Foreign key clause for `CREATE TABLE`, if this parent has an owner.
    const REFERENCES: Option<(&'static str, &'static str)>;
    fn key(&self) -> Option<Key<Self>>;
    fn assign(&mut self, key: Key<Self>);
    /// `CREATE TABLE IF NOT EXISTS` for this parent.
    fn creates() -> String {
        let columns = std::iter::once(format!("{:<24}BIGSERIAL PRIMARY KEY", "id"))
            .chain(Self::COLUMNS.iter().map(Column::definition))
            .chain(Self::REFERENCES.map(|(column, table)| {
                format!("FOREIGN KEY ({}) REFERENCES {} (id) ON DELETE CASCADE", column, table)
            }))
            .collect::<Vec<_>>()
            .join(",\n    ");
        format!("CREATE TABLE IF NOT EXISTS {} (\n    {}\n);", Self::TABLE, columns)
    }
}

/// A row representing one element of a many-valued attribute of exactly
/// one [`Parent`].
///
/// Its first column is always the foreign key to the owner, filled in by
/// [`attach`](Leaf::attach) once the owner's key is known.
pub trait Leaf: Sized + Send + Sync + 'static {
    type Parent: Parent;
    /// Destination table.
    const TABLE: &'static str;
    /// Columns in table order, foreign key first.
    const COLUMNS: &'static [Column<Self>];
    /// Columns of the composite primary key.
    const PRIMARY: &'static [&'static str];
    /// Backpatch the owner's generated key.
    fn attach(&mut self, key: Key<Self::Parent>);
    /// `CREATE TABLE IF NOT EXISTS` for this leaf.
    fn creates() -> String {
        let foreign = Self::COLUMNS.first().map(|c| c.name).unwrap_or_default();
        let columns = Self::COLUMNS
            .iter()
            .map(Column::definition)
            .chain(std::iter::once(format!(
                "PRIMARY KEY ({})",
                Self::PRIMARY.join(", ")
            )))
            .chain(std::iter::once(format!(
                "FOREIGN KEY ({}) REFERENCES {} (id) ON DELETE CASCADE",
                foreign,
                <Self::Parent as Parent>::TABLE
            )))
            .collect::<Vec<_>>()
            .join(",\n    ");
        format!("CREATE TABLE IF NOT EXISTS {} (\n    {}\n);", Self::TABLE, columns)
    }
}

/// A [`Parent`] that is itself owned by another parent.
///
/// Its owner's key must be known before it can be inserted.
pub trait Child: Parent {
    type Owner: Parent;
    fn owner(&self) -> &crate::Link<Self::Owner>;
    fn owner_mut(&mut self) -> &mut crate::Link<Self::Owner>;
}
