//! The items that make up each kind of set.

mod alias;
mod attribute;
mod identifier;
mod relationship;

pub use self::alias::Alias;
pub use self::attribute::{RelationshipAttribute, RelationshipAttributeValue};
pub use self::identifier::Identifier;
pub use self::relationship::Relationship;
use crate::error::Error;
use crate::kind::{ItemId, SetKind};
use folio_diff::Fields;
use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;

/// An element of a set.
///
/// Items are compared by [`COMPARISON_FIELDS`](Self::COMPARISON_FIELDS),
/// never by their stored id. An item that has been persisted carries its
/// row id; an item built from user input does not.
pub trait SetItem: Fields + Clone + Send + Sync + 'static {
    const KIND: SetKind;
    /// Fields that decide whether two items are "the same" across revisions.
    const COMPARISON_FIELDS: &'static [&'static str];

    #[doc(hidden)]
    type Row: for<'r> FromRow<'r, SqliteRow> + TryInto<Self, Error = Error> + Send + Unpin;

    /// Stored row id, if this item has been persisted.
    fn id(&self) -> Option<ItemId>;

    /// Borrow the item for insertion as a new row.
    fn as_new(&self) -> NewItem<'_>;
}

/// An item about to be written as a new row.
///
/// Whatever id the item carries is ignored: new rows always get a freshly
/// generated id.
#[derive(Debug, Clone, Copy)]
pub enum NewItem<'a> {
    Alias(&'a Alias),
    Identifier(&'a Identifier),
    Relationship(&'a Relationship),
    RelationshipAttribute(&'a RelationshipAttribute),
}
impl NewItem<'_> {
    pub fn kind(&self) -> SetKind {
        match self {
            Self::Alias(_) => SetKind::Alias,
            Self::Identifier(_) => SetKind::Identifier,
            Self::Relationship(_) => SetKind::Relationship,
            Self::RelationshipAttribute(_) => SetKind::RelationshipAttribute,
        }
    }
}

/// The equality predicate for an item type, built from its comparison fields.
pub fn default_comparator<T: SetItem>() -> impl Fn(&T, &T) -> bool {
    folio_diff::comparator::<T>(T::COMPARISON_FIELDS)
}
