//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Item masters and batches are entities: two records with the same name are
/// the same record even when their attributes differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
