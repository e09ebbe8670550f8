//! Turning an unchanged/added partition into a new immutable set.
//!
//! A set is never modified once written. Every revision that changes a
//! set's membership gets a brand-new set row: unchanged items are linked in
//! by their existing row ids, and added items get fresh rows. An empty set
//! is represented by the absence of a set, never by an empty set row.

use crate::error::{ErrorKind, Result};
use crate::items::{NewItem, RelationshipAttribute, SetItem};
use crate::kind::SetRef;
use crate::writer::SetWriter;
use exn::OptionExt;
use tracing::instrument;

/// Create a new set containing `unchanged` (linked by id) and `added`
/// (inserted as new rows).
///
/// Returns `Ok(None)` without touching the writer when both lists are empty.
/// Every unchanged item must carry its stored id; one that does not is
/// rejected with [`ErrorKind::InvalidArgument`] before anything is written.
///
/// All writes go through `writer`, which must wrap a transaction owned by the
/// caller: on error nothing is committed, and the caller is expected to drop
/// (roll back) that transaction. Unchanged items are attached before added
/// items are created; the order within each list is not significant.
#[instrument(skip_all, fields(kind = %T::KIND, unchanged = unchanged.len(), added = added.len()))]
pub async fn create_new_set_with_items<T, W>(writer: &mut W, unchanged: &[T], added: &[T]) -> Result<Option<SetRef>>
where
    T: SetItem,
    W: SetWriter + ?Sized,
{
    if unchanged.is_empty() && added.is_empty() {
        tracing::debug!("no items; not creating a set");
        return Ok(None);
    }
    let existing = unchanged
        .iter()
        .map(|item| {
            item.id()
                .ok_or_raise(|| ErrorKind::InvalidArgument(format!("unchanged {} item has no id", T::KIND)))
        })
        .collect::<Result<Vec<_>>>()?;

    let set = SetRef::new(T::KIND, writer.insert_set(T::KIND).await?);
    for id in existing {
        writer.attach(set, id).await?;
    }
    for item in added {
        let new = item.as_new();
        let id = writer.insert_item(new).await?;
        if let NewItem::RelationshipAttribute(attribute) = new {
            writer.insert_attribute_value(id, attribute.value.text_value.as_deref()).await?;
        }
        writer.attach(set, id).await?;
    }
    tracing::debug!(%set, "created set");
    Ok(Some(set))
}

/// Create a new relationship attribute set.
///
/// Each added attribute also gets its value row, keyed by the attribute's
/// newly generated id.
pub async fn create_new_relationship_attribute_set_with_items<W>(
    writer: &mut W,
    unchanged: &[RelationshipAttribute],
    added: &[RelationshipAttribute],
) -> Result<Option<SetRef>>
where
    W: SetWriter + ?Sized,
{
    create_new_set_with_items(writer, unchanged, added).await
}
