use super::*;
use crate::Error;
use crate::schema::*;

/// A leaf buffer materialized into owned rows.
///
/// The alternative to streaming: every value is extracted and validated
/// up front, so integrity errors surface before the store is touched, at
/// the cost of a second copy of the table in memory.
#[derive(Debug, Clone)]
pub struct Batch {
    table: &'static str,
    columns: Vec<(&'static str, Kind)>,
    rows: Vec<Vec<Datum>>,
}

impl Batch {
    pub fn collect<T: 'static>(descriptor: Descriptor<T>, records: &[T]) -> Result<Self, Error> {
        let rows = records
            .iter()
            .map(|record| {
                descriptor
                    .columns
                    .iter()
                    .map(|column| column.extract(descriptor.table, record).map(Datum::from))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            table: descriptor.table,
            columns: descriptor.columns.iter().map(|c| (c.name, c.kind)).collect(),
            rows,
        })
    }
    pub fn table(&self) -> &'static str {
        self.table
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    /// A fresh forward-only pass over the rows.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            batch: self,
            position: None,
        }
    }
}

/// Forward-only pass over a [`Batch`].
pub struct Rows<'a> {
    batch: &'a Batch,
    position: Option<usize>,
}

impl<'a> Rows<'a> {
    fn column(&self, ordinal: usize) -> Result<(&'static str, Kind), Error> {
        self.batch
            .columns
            .get(ordinal)
            .copied()
            .ok_or(Error::Ordinal {
                table: self.batch.table,
                ordinal,
                count: self.batch.columns.len(),
            })
    }
}

impl<'a> RowSource<'a> for Rows<'a> {
    fn table(&self) -> &'static str {
        self.batch.table
    }
    fn len(&self) -> usize {
        self.batch.rows.len()
    }
    fn advance(&mut self) -> bool {
        let next = self.position.map_or(0, |i| i.saturating_add(1).min(self.batch.rows.len()));
        self.position = Some(next);
        next < self.batch.rows.len()
    }
    fn column_count(&self) -> usize {
        self.batch.columns.len()
    }
    fn column_name(&self, ordinal: usize) -> Result<&'static str, Error> {
        self.column(ordinal).map(|(name, _)| name)
    }
    fn column_type(&self, ordinal: usize) -> Result<Kind, Error> {
        self.column(ordinal).map(|(_, kind)| kind)
    }
    fn value(&self, ordinal: usize) -> Result<Value<'a>, Error> {
        self.column(ordinal)?;
        let batch: &'a Batch = self.batch;
        self.position
            .and_then(|i| batch.rows.get(i))
            .and_then(|row| row.get(ordinal))
            .map(Datum::value)
            .ok_or(Error::NoRow { table: batch.table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;
    use crate::cards::*;
    use crate::records::*;

    #[test]
    fn materializes_every_row() {
        let mut hand = ["9c", "Tc", "Jc", "Qc", "Kc"]
            .iter()
            .enumerate()
            .map(|(i, c)| StartingHandCard::new(i as i16, Card::try_from(*c).unwrap()))
            .collect::<Vec<_>>();
        hand.iter_mut().for_each(|c| c.attach(Key::from(11)));
        let batch = Batch::collect(Descriptor::of(), &hand).unwrap();
        assert_eq!(batch.len(), 5);
        assert_eq!(batch.table(), STARTING_HAND_CARD);
        let mut rows = batch.rows();
        let mut count = 0;
        while rows.advance() {
            assert_eq!(rows.value(0).unwrap(), Value::Int8(11));
            assert_eq!(rows.value(1).unwrap(), Value::Int2(count));
            count += 1;
        }
        assert_eq!(count, 5);
        assert!(matches!(rows.value(0), Err(Error::NoRow { .. })));
    }

    #[test]
    fn validation_happens_up_front() {
        let hand = vec![StartingHandCard::new(0, Card::new(Rank::Ace, Suit::Spade))];
        assert!(matches!(
            Batch::collect(Descriptor::of(), &hand),
            Err(Error::Null {
                column: "deal_player_id",
                ..
            })
        ));
    }

    #[test]
    fn text_borrows_from_batch() {
        let mut players = vec![GamePlayer::new(0, "greedy"), GamePlayer::new(1, "random")];
        players.iter_mut().for_each(|p| p.attach(Key::from(3)));
        let batch = Batch::collect(Descriptor::of(), &players).unwrap();
        let mut rows = batch.rows();
        let actor = rows.ordinal("actor").unwrap();
        assert!(rows.advance());
        let first = rows.value(actor).unwrap();
        assert!(rows.advance());
        assert_eq!(first, Value::Text("greedy"));
        assert_eq!(rows.value(actor).unwrap(), Value::Text("random"));
    }
}
