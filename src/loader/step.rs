use std::fmt::Display;
use std::fmt::Formatter;

/// Where a load is, or where it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Parents,
    Flatten,
    Backpatch,
    Copy,
    Commit,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Step::Parents => "parents",
                Step::Flatten => "flatten",
                Step::Backpatch => "backpatch",
                Step::Copy => "copy",
                Step::Commit => "commit",
            }
        )
    }
}

/// How a leaf buffer is handed to the store's bulk copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(clap::ValueEnum))]
pub enum Strategy {
    /// Stream rows straight off the buffer.
    #[default]
    Stream,
    /// Materialize and validate the whole table first.
    Batch,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Stream => write!(f, "stream"),
            Strategy::Batch => write!(f, "batch"),
        }
    }
}
