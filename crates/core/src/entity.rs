//! Entity trait: identity + continuity across edits.

/// Entity marker + minimal interface.
///
/// Stores key their records by this identifier: an upsert replaces the record
/// whose id matches, otherwise appends.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
