use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;

/// What a committed load wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    /// Parent rows inserted one at a time.
    pub parents: usize,
    /// Leaf rows copied, per table. Tables with nothing to copy are absent.
    pub tables: BTreeMap<&'static str, u64>,
    /// Bulk copy calls issued.
    pub copies: usize,
}

impl Receipt {
    pub fn record(&mut self, table: &'static str, rows: u64) {
        self.copies += 1;
        *self.tables.entry(table).or_default() += rows;
    }
    pub fn rows(&self, table: &str) -> u64 {
        self.tables.get(table).copied().unwrap_or_default()
    }
    pub fn leaves(&self) -> u64 {
        self.tables.values().sum()
    }
    /// Absorbs another receipt, for running totals across graphs.
    pub fn merge(&mut self, other: Receipt) {
        self.parents += other.parents;
        self.copies += other.copies;
        for (table, rows) in other.tables {
            *self.tables.entry(table).or_default() += rows;
        }
    }
}

impl Display for Receipt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} parents, {} leaves over {} copies",
            self.parents,
            self.leaves(),
            self.copies
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_up() {
        let mut total = Receipt::default();
        let mut one = Receipt {
            parents: 3,
            ..Receipt::default()
        };
        one.record("trick_card_played", 4);
        one.record("game_player", 4);
        total.merge(one.clone());
        total.merge(one);
        assert_eq!(total.parents, 6);
        assert_eq!(total.copies, 4);
        assert_eq!(total.rows("trick_card_played"), 8);
        assert_eq!(total.leaves(), 16);
        assert_eq!(total.to_string(), "6 parents, 16 leaves over 4 copies");
    }
}
