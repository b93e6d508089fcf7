//! Error types for the persistence engine.
//!
//! Every fallible operation returns [`Error`]. The [`Loader`](crate::Loader)
//! wraps it in a [`Failure`] that records which step, and which table, was
//! running when it surfaced.
use crate::schema::Kind;

/// Errors that can occur while flattening, streaming, or loading a graph.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A reader was requested for a leaf type nobody registered.
    #[error("no leaf descriptor registered for {leaf}")]
    Unregistered { leaf: &'static str },

    /// A column ordinal past the end of the descriptor.
    #[error("column ordinal {ordinal} out of range for {table} ({count} columns)")]
    Ordinal {
        table: &'static str,
        ordinal: usize,
        count: usize,
    },

    /// A column name absent from the descriptor.
    #[error("no column named {column} in {table}")]
    UnknownColumn {
        table: &'static str,
        column: String,
    },

    /// A value was read before the first `advance` or after exhaustion.
    #[error("cursor over {table} is not positioned on a row")]
    NoRow { table: &'static str },

    /// An accessor returned a value of a different kind than declared.
    #[error("{table}.{column} declared {expected} but produced {found}")]
    Mismatch {
        table: &'static str,
        column: &'static str,
        expected: Kind,
        found: Kind,
    },

    /// An accessor returned null for a NOT NULL column.
    #[error("{table}.{column} is not nullable")]
    Null {
        table: &'static str,
        column: &'static str,
    },

    /// A leaf or parent references an owner that has no generated key yet.
    #[error("{table} references a {parent} that has no generated key")]
    Unresolved {
        table: &'static str,
        parent: &'static str,
    },

    /// Two rows of one table share a primary key.
    #[error("duplicate key ({key}) in {table}")]
    Duplicate { table: &'static str, key: String },

    /// A row references an owner row that does not exist.
    #[error("{table}.{column} references missing row {key}")]
    Dangling {
        table: &'static str,
        column: &'static str,
        key: i64,
    },

    /// Byte or character streaming on a scalar column.
    #[error("{access} streaming is not supported ({table}.{column})")]
    Unsupported {
        table: &'static str,
        column: &'static str,
        access: &'static str,
    },

    /// A `PostgreSQL` operation failed.
    #[cfg(feature = "database")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// A store operation failed for a reason other than `PostgreSQL`.
    #[error("store error: {0}")]
    Transient(String),

    /// The caller cancelled the load.
    #[error("load cancelled")]
    Cancelled,
}

/// How an [`Error`] should be treated by whoever drives the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// Programming mistake. Fatal, never retried.
    Configuration,
    /// Bad data in the graph. Aborts the table and the graph.
    Integrity,
    /// Connectivity or store failure. The whole graph may be retried.
    Transient,
    /// Deliberate termination, not a failure.
    Cancelled,
}

impl Error {
    pub fn class(&self) -> Class {
        match self {
            Self::Unregistered { .. }
            | Self::Ordinal { .. }
            | Self::UnknownColumn { .. }
            | Self::NoRow { .. } => Class::Configuration,
            Self::Mismatch { .. }
            | Self::Null { .. }
            | Self::Unresolved { .. }
            | Self::Duplicate { .. }
            | Self::Dangling { .. }
            | Self::Unsupported { .. } => Class::Integrity,
            #[cfg(feature = "database")]
            // SQLSTATE 22xxx data exception, 23xxx constraint violation
            Self::Postgres(e) => match e.code().map(|state| state.code()) {
                Some(code) if code.starts_with("22") || code.starts_with("23") => Class::Integrity,
                _ => Class::Transient,
            },
            Self::Transient(_) => Class::Transient,
            Self::Cancelled => Class::Cancelled,
        }
    }
    pub fn retriable(&self) -> bool {
        self.class() == Class::Transient
    }
}

/// A load that did not commit.
#[derive(Debug, thiserror::Error)]
#[error("{step} failed{}: {error}", .table.map(|t| format!(" on {}", t)).unwrap_or_default())]
pub struct Failure {
    pub step: crate::Step,
    pub table: Option<&'static str>,
    #[source]
    pub error: Error,
}

impl Failure {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.error, Error::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Step;

    #[test]
    fn classes() {
        let unregistered = Error::Unregistered { leaf: "Foo" };
        let null = Error::Null {
            table: "trick_card_played",
            column: "trick_id",
        };
        assert_eq!(unregistered.class(), Class::Configuration);
        assert_eq!(null.class(), Class::Integrity);
        assert_eq!(Error::Transient("eof".into()).class(), Class::Transient);
        assert_eq!(Error::Cancelled.class(), Class::Cancelled);
        assert!(Error::Transient("eof".into()).retriable());
        assert!(!unregistered.retriable());
    }

    #[test]
    fn failure_names_step_and_table() {
        let failure = Failure {
            step: Step::Copy,
            table: Some("deal_deck_card"),
            error: Error::Transient("connection reset".into()),
        };
        assert_eq!(
            failure.to_string(),
            "copy failed on deal_deck_card: store error: connection reset"
        );
        let failure = Failure {
            step: Step::Commit,
            table: None,
            error: Error::Cancelled,
        };
        assert_eq!(failure.to_string(), "commit failed: load cancelled");
        assert!(failure.is_cancelled());
    }
}
