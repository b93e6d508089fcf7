use super::*;
use crate::Error;
use crate::records::*;
use std::any::Any;
use std::any::TypeId;
use std::collections::HashMap;

/// Table name and ordered columns for one leaf type.
pub struct Descriptor<T: 'static> {
    pub table: &'static str,
    pub columns: &'static [Column<T>],
}

impl<T: 'static> Descriptor<T> {
    pub fn of() -> Self
    where
        T: Leaf,
    {
        Self {
            table: T::TABLE,
            columns: T::COLUMNS,
        }
    }
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }
}

impl<T: 'static> Copy for Descriptor<T> {}
impl<T: 'static> Clone for Descriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

/// Lookup of leaf descriptors by Rust type.
///
/// Both load strategies go through here, so a leaf type becomes loadable
/// by registration alone. Asking for a type that was never registered is
/// a configuration error naming the type.
#[derive(Default)]
pub struct Registry {
    descriptors: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    /// A registry holding every leaf in the schema.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.register::<GamePlayer>();
        registry.register::<DealDeckCard>();
        registry.register::<DealKnownVoid>();
        registry.register::<StartingHandCard>();
        registry.register::<CallHandCard>();
        registry.register::<CallValidDecision>();
        registry.register::<CallPredictedPoints>();
        registry.register::<DiscardHandCard>();
        registry.register::<DiscardPredictedPoints>();
        registry.register::<TrickCardPlayed>();
        registry.register::<PlayHandCard>();
        registry.register::<PlayPlayedCard>();
        registry.register::<PlayValidCard>();
        registry.register::<PlayKnownVoid>();
        registry.register::<PlayAccountedCard>();
        registry.register::<PlayPredictedPoints>();
        registry
    }
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Leaf,
    {
        self.describe(Descriptor::<T>::of())
    }
    /// Registers an explicit descriptor for `T`, replacing any earlier one.
    pub fn describe<T>(&mut self, descriptor: Descriptor<T>) -> &mut Self
    where
        T: 'static,
    {
        self.descriptors.insert(TypeId::of::<T>(), Box::new(descriptor));
        self
    }
    pub fn descriptor<T>(&self) -> Result<Descriptor<T>, Error>
    where
        T: 'static,
    {
        self.descriptors
            .get(&TypeId::of::<T>())
            .and_then(|any| any.downcast_ref::<Descriptor<T>>())
            .copied()
            .ok_or(Error::Unregistered {
                leaf: std::any::type_name::<T>(),
            })
    }
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registers_every_leaf() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), 16);
        let descriptor = registry.descriptor::<TrickCardPlayed>().unwrap();
        assert_eq!(descriptor.table, TRICK_CARD_PLAYED);
        assert_eq!(
            descriptor.names().collect::<Vec<_>>(),
            vec!["trick_id", "play_order", "seat", "card"]
        );
    }

    #[test]
    fn unregistered_leaf_is_named() {
        let registry = Registry::default();
        match registry.descriptor::<PlayKnownVoid>() {
            Err(Error::Unregistered { leaf }) => assert!(leaf.ends_with("PlayKnownVoid")),
            other => panic!("expected unregistered error, got {:?}", other.map(|d| d.table)),
        }
    }

    #[test]
    fn foreign_key_leads_every_leaf() {
        let registry = Registry::standard();
        let first = |table: &str, column: &str| (table.to_string(), column.to_string());
        let leads = [
            registry.descriptor::<GamePlayer>().map(|d| first(d.table, d.columns[0].name)),
            registry.descriptor::<DealKnownVoid>().map(|d| first(d.table, d.columns[0].name)),
            registry.descriptor::<StartingHandCard>().map(|d| first(d.table, d.columns[0].name)),
            registry.descriptor::<PlayAccountedCard>().map(|d| first(d.table, d.columns[0].name)),
        ];
        let expected = ["game_id", "deal_id", "deal_player_id", "play_card_decision_id"];
        for (lead, column) in leads.into_iter().zip(expected) {
            assert_eq!(lead.unwrap().1, column);
        }
    }
}
