use super::*;
use crate::Error;
use crate::schema::*;

/// Streams a slice of typed records as rows.
///
/// One implementation serves every leaf type: the descriptor supplies the
/// columns, and each value is read straight off the record by its accessor
/// when asked for. Nothing is copied up front and nothing is allocated per
/// row.
pub struct Cursor<'a, T: 'static> {
    descriptor: Descriptor<T>,
    rows: &'a [T],
    position: Option<usize>,
}

impl<'a, T: 'static> Cursor<'a, T> {
    pub fn new(descriptor: Descriptor<T>, rows: &'a [T]) -> Self {
        Self {
            descriptor,
            rows,
            position: None,
        }
    }
    fn column(&self, ordinal: usize) -> Result<&'static Column<T>, Error> {
        self.descriptor
            .columns
            .get(ordinal)
            .ok_or(Error::Ordinal {
                table: self.descriptor.table,
                ordinal,
                count: self.descriptor.columns.len(),
            })
    }
    fn row(&self) -> Result<&'a T, Error> {
        self.position
            .and_then(|i| self.rows.get(i))
            .ok_or(Error::NoRow {
                table: self.descriptor.table,
            })
    }
}

impl<'a, T> RowSource<'a> for Cursor<'a, T>
where
    T: Sync + 'static,
{
    fn table(&self) -> &'static str {
        self.descriptor.table
    }
    fn len(&self) -> usize {
        self.rows.len()
    }
    fn advance(&mut self) -> bool {
        let next = self.position.map_or(0, |i| i.saturating_add(1).min(self.rows.len()));
        self.position = Some(next);
        next < self.rows.len()
    }
    fn column_count(&self) -> usize {
        self.descriptor.columns.len()
    }
    fn column_name(&self, ordinal: usize) -> Result<&'static str, Error> {
        self.column(ordinal).map(|c| c.name)
    }
    fn column_type(&self, ordinal: usize) -> Result<Kind, Error> {
        self.column(ordinal).map(|c| c.kind)
    }
    fn value(&self, ordinal: usize) -> Result<Value<'a>, Error> {
        let column = self.column(ordinal)?;
        column.extract(self.descriptor.table, self.row()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;
    use crate::cards::*;
    use crate::records::*;

    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    fn played() -> Vec<TrickCardPlayed> {
        ["9h", "Ah", "Jd", "Th"]
            .iter()
            .enumerate()
            .map(|(i, c)| TrickCardPlayed::new(i as i16, i as u8, card(c)))
            .map(|mut c| {
                c.attach(Key::from(7));
                c
            })
            .collect()
    }

    #[test]
    fn streams_rows_in_order() {
        let rows = played();
        let mut cursor = Cursor::new(Descriptor::of(), &rows);
        let order = cursor.ordinal("play_order").unwrap();
        let column = cursor.ordinal("card").unwrap();
        let mut seen = Vec::new();
        while cursor.advance() {
            assert_eq!(cursor.value(0).unwrap(), Value::Int8(7));
            seen.push((cursor.value(order).unwrap(), cursor.value(column).unwrap()));
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], (Value::Int2(0), Value::from(card("9h"))));
        assert_eq!(seen[3], (Value::Int2(3), Value::from(card("Th"))));
    }

    #[test]
    fn forward_only_and_exhausts_once() {
        let rows = played();
        let mut cursor = Cursor::new(Descriptor::of(), &rows[..1]);
        assert!(matches!(cursor.value(0), Err(Error::NoRow { .. })));
        assert!(cursor.advance());
        assert!(!cursor.advance());
        assert!(!cursor.advance());
        assert!(matches!(cursor.value(0), Err(Error::NoRow { .. })));
    }

    #[test]
    fn describes_columns_by_ordinal() {
        let rows = played();
        let cursor = Cursor::new(Descriptor::<TrickCardPlayed>::of(), &rows);
        assert_eq!(cursor.column_count(), 4);
        assert_eq!(cursor.column_name(2).unwrap(), "seat");
        assert_eq!(cursor.column_type(0).unwrap(), Kind::Int8);
        assert!(matches!(
            cursor.column_name(4),
            Err(Error::Ordinal {
                ordinal: 4,
                count: 4,
                ..
            })
        ));
        assert!(matches!(
            cursor.ordinal("suit"),
            Err(Error::UnknownColumn { .. })
        ));
    }

    #[test]
    fn unpatched_foreign_key_is_refused() {
        let rows = vec![TrickCardPlayed::new(0, 0, card("Ks"))];
        let mut cursor = Cursor::new(Descriptor::of(), &rows);
        assert!(cursor.advance());
        assert!(matches!(
            cursor.value(0),
            Err(Error::Null {
                column: "trick_id",
                ..
            })
        ));
        assert!(matches!(cursor.is_null(0), Err(Error::Null { .. })));
        assert!(!cursor.is_null(1).unwrap());
    }

    #[test]
    fn streaming_access_fails_fast() {
        let rows = played();
        let mut cursor = Cursor::new(Descriptor::<TrickCardPlayed>::of(), &rows);
        assert!(cursor.advance());
        let ref mut bytes = [0u8; 8];
        let ref mut chars = ['\0'; 8];
        assert!(matches!(
            cursor.bytes(3, 0, bytes),
            Err(Error::Unsupported { access: "byte", .. })
        ));
        assert!(matches!(
            cursor.chars(3, 0, chars),
            Err(Error::Unsupported {
                access: "character",
                ..
            })
        ));
    }
}
