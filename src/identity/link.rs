use super::*;
use std::fmt::Debug;
use std::fmt::Formatter;

/// A parent record's reference to the record that owns it.
///
/// Holds the owner's arena index from construction, and the owner's
/// generated key once the owner has been inserted.
pub struct Link<P> {
    local: Local<P>,
    key: Option<Key<P>>,
}

impl<P> Link<P> {
    pub fn new(local: Local<P>) -> Self {
        Self { local, key: None }
    }
    pub fn local(&self) -> Local<P> {
        self.local
    }
    pub fn key(&self) -> Option<Key<P>> {
        self.key
    }
    pub fn resolve(&mut self, key: Key<P>) {
        self.key = Some(key);
    }
}

impl<P> Copy for Link<P> {}
impl<P> Clone for Link<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Debug for Link<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link")
            .field("local", &self.local)
            .field("key", &self.key)
            .finish()
    }
}
