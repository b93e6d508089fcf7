use super::*;
use crate::Error;

/// One column of a record's table: name, semantic type, and how to read
/// the value out of a record.
pub struct Column<T> {
    pub name: &'static str,
    pub kind: Kind,
    pub nullable: bool,
    pub get: for<'a> fn(&'a T) -> Value<'a>,
}

impl<T> Column<T> {
    pub const fn required(name: &'static str, kind: Kind, get: for<'a> fn(&'a T) -> Value<'a>) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            get,
        }
    }
    pub const fn optional(name: &'static str, kind: Kind, get: for<'a> fn(&'a T) -> Value<'a>) -> Self {
        Self {
            name,
            kind,
            nullable: true,
            get,
        }
    }
    /// Reads this column out of `record`, refusing values that disagree
    /// with the declared kind or nullability.
    pub fn extract<'a>(&self, table: &'static str, record: &'a T) -> Result<Value<'a>, Error> {
        let value = (self.get)(record);
        match value.kind() {
            None if self.nullable => Ok(value),
            None => Err(Error::Null {
                table,
                column: self.name,
            }),
            Some(kind) if kind == self.kind => Ok(value),
            Some(found) => Err(Error::Mismatch {
                table,
                column: self.name,
                expected: self.kind,
                found,
            }),
        }
    }
    /// Column definition for `CREATE TABLE`.
    pub fn definition(&self) -> String {
        format!(
            "{:<24}{}{}",
            self.name,
            self.kind.sql(),
            if self.nullable { "" } else { " NOT NULL" }
        )
    }
}

impl<T> Copy for Column<T> {}
impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(Option<i16>, f32);

    const SEAT: Column<Probe> = Column::required("seat", Kind::Int2, |p| Value::from(p.0));
    const BAD: Column<Probe> = Column::required("seat", Kind::Int4, |p| Value::from(p.0));
    const SOFT: Column<Probe> = Column::optional("seat", Kind::Int2, |p| Value::from(p.0));
    const POINTS: Column<Probe> = Column::required("points", Kind::Float4, |p| Value::Float4(p.1));

    #[test]
    fn extract_accepts_declared_kind() {
        let probe = Probe(Some(2), 1.5);
        assert_eq!(SEAT.extract("t", &probe).unwrap(), Value::Int2(2));
        assert_eq!(POINTS.extract("t", &probe).unwrap(), Value::Float4(1.5));
    }

    #[test]
    fn extract_rejects_kind_mismatch() {
        let probe = Probe(Some(2), 0.);
        assert!(matches!(
            BAD.extract("t", &probe),
            Err(Error::Mismatch {
                expected: Kind::Int4,
                found: Kind::Int2,
                ..
            })
        ));
    }

    #[test]
    fn extract_rejects_null_in_required_column() {
        let probe = Probe(None, 0.);
        assert!(matches!(SEAT.extract("t", &probe), Err(Error::Null { .. })));
        assert_eq!(SOFT.extract("t", &probe).unwrap(), Value::Null);
    }

    #[test]
    fn definition_marks_not_null() {
        assert!(SEAT.definition().ends_with("SMALLINT NOT NULL"));
        assert!(SOFT.definition().ends_with("SMALLINT"));
    }
}
