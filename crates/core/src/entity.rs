//! Entity trait: identity that survives copies and snapshots.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Identifier type of the entity.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
