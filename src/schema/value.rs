use super::Kind;

/// A scalar read out of a record by a column accessor.
///
/// Borrows text from the record so streaming a row allocates nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Text(&'a str),
}

impl Value<'_> {
    /// `None` for null, which fits any nullable kind.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(Kind::Bool),
            Value::Int2(_) => Some(Kind::Int2),
            Value::Int4(_) => Some(Kind::Int4),
            Value::Int8(_) => Some(Kind::Int8),
            Value::Float4(_) => Some(Kind::Float4),
            Value::Text(_) => Some(Kind::Text),
        }
    }
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl<T> From<Option<T>> for Value<'_>
where
    T: Into<Value<'static>>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
impl From<u8> for Value<'_> {
    fn from(n: u8) -> Self {
        Value::Int2(n as i16)
    }
}
impl From<i16> for Value<'_> {
    fn from(n: i16) -> Self {
        Value::Int2(n)
    }
}
impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Value::Int8(n)
    }
}
impl From<f32> for Value<'_> {
    fn from(x: f32) -> Self {
        Value::Float4(x)
    }
}
impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(s)
    }
}
impl<T> From<crate::Key<T>> for Value<'_> {
    fn from(key: crate::Key<T>) -> Self {
        Value::Int8(key.inner())
    }
}
impl From<crate::cards::Card> for Value<'_> {
    fn from(card: crate::cards::Card) -> Self {
        Value::Int2(i16::from(card))
    }
}
impl From<crate::cards::Suit> for Value<'_> {
    fn from(suit: crate::cards::Suit) -> Self {
        Value::Int2(i16::from(suit))
    }
}

/// Owned twin of [`Value`], for rows that outlive their records.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Bool(bool),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Text(String),
}

impl Datum {
    pub fn value(&self) -> Value<'_> {
        match self {
            Datum::Null => Value::Null,
            Datum::Bool(b) => Value::Bool(*b),
            Datum::Int2(n) => Value::Int2(*n),
            Datum::Int4(n) => Value::Int4(*n),
            Datum::Int8(n) => Value::Int8(*n),
            Datum::Float4(x) => Value::Float4(*x),
            Datum::Text(s) => Value::Text(s),
        }
    }
    pub fn int(&self) -> Option<i64> {
        match self {
            Datum::Int2(n) => Some(*n as i64),
            Datum::Int4(n) => Some(*n as i64),
            Datum::Int8(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<Value<'_>> for Datum {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::Null => Datum::Null,
            Value::Bool(b) => Datum::Bool(b),
            Value::Int2(n) => Datum::Int2(n),
            Value::Int4(n) => Datum::Int4(n),
            Value::Int8(n) => Datum::Int8(n),
            Value::Float4(x) => Datum::Float4(x),
            Value::Text(s) => Datum::Text(s.to_owned()),
        }
    }
}

#[cfg(feature = "database")]
mod sql {
    use super::*;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::IsNull;
    use tokio_postgres::types::ToSql;
    use tokio_postgres::types::Type;

    /// Binary encoding delegates to the wrapped scalar. The declared
    /// column type must match the variant exactly; no widening.
    impl ToSql for Value<'_> {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(b) => b.to_sql(ty, out),
                Value::Int2(n) => n.to_sql(ty, out),
                Value::Int4(n) => n.to_sql(ty, out),
                Value::Int8(n) => n.to_sql(ty, out),
                Value::Float4(x) => x.to_sql(ty, out),
                Value::Text(s) => s.to_sql(ty, out),
            }
        }
        fn accepts(ty: &Type) -> bool {
            matches!(
                *ty,
                Type::BOOL | Type::INT2 | Type::INT4 | Type::INT8 | Type::FLOAT4 | Type::TEXT
            )
        }
        fn to_sql_checked(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self.kind() {
                Some(kind) if kind.pg() != *ty => Err(format!(
                    "cannot encode {} as {}",
                    kind.pg(),
                    ty
                )
                .into()),
                _ => self.to_sql(ty, out),
            }
        }
    }
}
