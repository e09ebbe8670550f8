//! SQLite persistence for entity revision sets.
//!
//! Every revision of an entity references a handful of sets (aliases,
//! identifiers, relationships); relationships in turn reference a set of
//! relationship attributes. Sets are immutable. Editing an entity never
//! changes an existing set: the new item list is diffed against the old set
//! and a new set is built that links the unchanged item rows and inserts
//! the added ones.
//!
//! # Architecture
//! - [`Database`] owns the pool and runs migrations.
//! - [`Repository`] loads sets, diffs them against new input and records
//!   revisions and redirects.
//! - [`create_new_set_with_items`] materializes a diff through a
//!   [`SetWriter`], which is bound to the caller's transaction. The diff
//!   itself lives in the `folio-diff` crate and never touches the database.

mod db;
mod entity;
pub mod error;
mod items;
mod kind;
mod materialize;
mod models;
mod repo;
mod writer;

pub use crate::db::Database;
pub use crate::entity::{EntityKind, EntitySets};
pub use crate::items::{
    Alias, Identifier, NewItem, Relationship, RelationshipAttribute, RelationshipAttributeValue, SetItem,
    default_comparator,
};
pub use crate::kind::{ItemId, RevisionId, SetId, SetKind, SetRef};
pub use crate::materialize::{create_new_relationship_attribute_set_with_items, create_new_set_with_items};
pub use crate::repo::{Repository, SetChanges};
pub use crate::writer::{SetWriter, SqliteSetWriter};
