use crate::schema::Descriptor;

/// Pairs a source column with the destination column it loads into.
///
/// Copies are mapped by name, so the destination table may order its
/// columns however it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub source: &'static str,
    pub target: &'static str,
}

impl Mapping {
    /// Every descriptor column loads into the column of the same name.
    pub fn identity<T: 'static>(descriptor: &Descriptor<T>) -> Vec<Self> {
        descriptor
            .names()
            .map(|name| Self {
                source: name,
                target: name,
            })
            .collect()
    }
}
