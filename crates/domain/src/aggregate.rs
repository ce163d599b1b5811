//! Core entity, aggregate and snapshot traits.

use serde::{Serialize, de::DeserializeOwned};

use crate::error::OperationResult;

/// Trait for domain entities.
///
/// An entity has an identity that stays the same while its attributes change.
/// Two entities are the same entity when their ids are equal.
pub trait Entity {
    /// The identifier type of the entity.
    type Id: Copy + Eq + std::fmt::Debug;

    /// Returns the entity's identifier.
    fn id(&self) -> Self::Id;
}

/// Trait for aggregate roots.
///
/// An aggregate is a cluster of domain objects that is treated as a single unit.
/// All invariant-preserving changes to the cluster go through the root.
pub trait AggregateRoot: Entity {
    /// Returns the aggregate type name.
    ///
    /// Used by storage and logging to tell aggregates apart.
    fn aggregate_type() -> &'static str;
}

/// Trait for aggregates that can be captured as a plain snapshot and rebuilt
/// from one.
///
/// Restoring a snapshot taken from an aggregate and snapshotting the result
/// again must yield an identical snapshot: the snapshot carries all state.
pub trait Snapshot: AggregateRoot + Sized {
    /// The serializable snapshot representation.
    type State: Serialize + DeserializeOwned + Clone;

    /// Captures the full state of the aggregate.
    fn snapshot(&self) -> Self::State;

    /// Rebuilds an aggregate from a snapshot, reporting structural violations.
    fn restore(state: Self::State) -> OperationResult<Self>;
}
