use std::fmt::Debug;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Index of a `T` within its arena in the owning graph.
///
/// Stable for the lifetime of the graph; meaningless outside of it.
pub struct Local<T> {
    index: usize,
    marker: PhantomData<T>,
}

impl<T> Local<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Copy for Local<T> {}
impl<T> Clone for Local<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for Local<T> {}
impl<T> PartialEq for Local<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Hash for Local<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.index.hash(state);
    }
}

impl<T> Debug for Local<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Local").field(&self.index).finish()
    }
}
