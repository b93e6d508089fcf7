/// Semantic type of a column.
///
/// Leaf columns are scalar: small integers, floats, short text. There is
/// no blob kind.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int2,
    Int4,
    Int8,
    Float4,
    Text,
}

impl Kind {
    /// SQL type name used in DDL.
    pub const fn sql(&self) -> &'static str {
        match self {
            Kind::Bool => "BOOLEAN",
            Kind::Int2 => "SMALLINT",
            Kind::Int4 => "INTEGER",
            Kind::Int8 => "BIGINT",
            Kind::Float4 => "REAL",
            Kind::Text => "TEXT",
        }
    }
    /// Wire type for binary COPY.
    #[cfg(feature = "database")]
    pub fn pg(&self) -> tokio_postgres::types::Type {
        use tokio_postgres::types::Type;
        match self {
            Kind::Bool => Type::BOOL,
            Kind::Int2 => Type::INT2,
            Kind::Int4 => Type::INT4,
            Kind::Int8 => Type::INT8,
            Kind::Float4 => Type::FLOAT4,
            Kind::Text => Type::TEXT,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.sql())
    }
}
