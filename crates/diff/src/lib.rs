//! Change tracking for the sets attached to an entity revision.
//!
//! Aliases, identifiers, relationships and relationship attributes are
//! stored as immutable sets. When an entity is edited, the old and new
//! versions of each set are compared field-by-field (never by stored id)
//! and split into items that are unchanged, added or removed. The storage
//! layer then relinks the unchanged rows and only creates rows for the added
//! ones.
//!
//! Nothing in here touches storage.

mod field;
mod partition;

pub use crate::field::{Field, Fields, comparator};
pub use crate::partition::{Partition, added, dedup, partition, removed, unchanged};
