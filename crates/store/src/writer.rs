//! The write operations needed to materialize a set.

use crate::error::{ErrorKind, Result};
use crate::items::NewItem;
use crate::kind::{ItemId, SetId, SetKind, SetRef};
use async_trait::async_trait;
use exn::ResultExt;
use sqlx::{Sqlite, SqliteConnection};

/// Persistence operations used by the set materializer.
///
/// Implementations are bound to a single transaction for their whole
/// lifetime. They never begin, commit or roll back; whoever created the
/// transaction does that.
#[async_trait]
pub trait SetWriter: Send {
    /// Insert an empty set row of the given kind, returning its id.
    async fn insert_set(&mut self, kind: SetKind) -> Result<SetId>;

    /// Link an existing item row into a set.
    async fn attach(&mut self, set: SetRef, item: ItemId) -> Result<()>;

    /// Insert a new item row, returning its generated id.
    async fn insert_item(&mut self, item: NewItem<'_>) -> Result<ItemId>;

    /// Insert the value row belonging to a relationship attribute row.
    async fn insert_attribute_value(&mut self, attribute: ItemId, text_value: Option<&str>) -> Result<()>;
}

/// [`SetWriter`] over a borrowed SQLite connection, typically an open
/// transaction (`&mut *tx`).
pub struct SqliteSetWriter<'c> {
    conn: &'c mut SqliteConnection,
}
impl<'c> SqliteSetWriter<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SetWriter for SqliteSetWriter<'_> {
    async fn insert_set(&mut self, kind: SetKind) -> Result<SetId> {
        let id: i64 = sqlx::query_scalar(kind.insert_set_query())
            .fetch_one(&mut *self.conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(SetId::from(id))
    }

    async fn attach(&mut self, set: SetRef, item: ItemId) -> Result<()> {
        sqlx::query(set.kind.attach_query())
            .bind(set.id.get())
            .bind(item.get())
            .execute(&mut *self.conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    async fn insert_item(&mut self, item: NewItem<'_>) -> Result<ItemId> {
        let query = match item {
            NewItem::Alias(alias) => {
                sqlx::query_scalar::<Sqlite, i64>(include_str!("../queries/alias/insert.sql"))
                    .bind(alias.name.as_str())
                    .bind(alias.sort_name.as_str())
                    .bind(alias.language_id)
                    .bind(alias.primary)
            },
            NewItem::Identifier(identifier) => {
                sqlx::query_scalar::<Sqlite, i64>(include_str!("../queries/identifier/insert.sql"))
                    .bind(identifier.type_id)
                    .bind(identifier.value.as_str())
            },
            NewItem::Relationship(relationship) => {
                sqlx::query_scalar::<Sqlite, i64>(include_str!("../queries/relationship/insert.sql"))
                    .bind(relationship.type_id)
                    .bind(relationship.source_bbid.to_string())
                    .bind(relationship.target_bbid.to_string())
                    .bind(relationship.attribute_set_id.map(SetId::get))
            },
            NewItem::RelationshipAttribute(attribute) => {
                sqlx::query_scalar::<Sqlite, i64>(include_str!("../queries/relationship_attribute/insert.sql"))
                    .bind(attribute.attribute_type)
            },
        };
        let id: i64 = query.fetch_one(&mut *self.conn).await.or_raise(|| ErrorKind::Database)?;
        Ok(ItemId::from(id))
    }

    async fn insert_attribute_value(&mut self, attribute: ItemId, text_value: Option<&str>) -> Result<()> {
        sqlx::query(include_str!("../queries/relationship_attribute/insert_text_value.sql"))
            .bind(attribute.get())
            .bind(text_value)
            .execute(&mut *self.conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }
}
