//! Repository for sets, revisions and entity redirects.
//!
//! Sets only make sense as part of a revision: a revision's entity data
//! points at one set of each kind, and the next revision either reuses that
//! set (nothing changed) or gets a new one built from the previous set's
//! unchanged items plus whatever was added.

use crate::Database;
use crate::entity::{EntityKind, EntitySets};
use crate::error::{ErrorKind, Result};
use crate::items::SetItem;
use crate::kind::{RevisionId, SetId, SetRef};
use crate::materialize::create_new_set_with_items;
use crate::models::{EntityDataRow, parse_bbid};
use crate::writer::SqliteSetWriter;
use exn::{OptionExt, ResultExt};
use folio_diff::Partition;
use sqlx::{Sqlite, SqliteConnection, SqliteExecutor, SqlitePool, Transaction};
use std::collections::HashSet;
use time::UtcDateTime;
use tracing::instrument;
use uuid::Uuid;

/// Outcome of replacing the items of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetChanges<T> {
    /// The set the new revision should reference. This is the old set when
    /// nothing changed, and `None` when there are no items left.
    pub set: Option<SetRef>,
    /// Items kept from the old set (with their stored ids).
    pub unchanged: Vec<T>,
    pub added: Vec<T>,
    pub removed: Vec<T>,
}
impl<T> SetChanges<T> {
    pub fn is_changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Load the items of a set through any executor (pool, connection or open
/// transaction).
async fn fetch_set_items<'c, T: SetItem>(executor: impl SqliteExecutor<'c>, set: SetId) -> Result<Vec<T>> {
    let rows: Vec<T::Row> = sqlx::query_as(T::KIND.list_query())
        .bind(set.get())
        .fetch_all(executor)
        .await
        .or_raise(|| ErrorKind::Database)?;
    rows.into_iter().map(|row| row.try_into()).collect()
}

/// Repository for sets, revisions and entities.
///
/// Reads go through the pool. Writes that belong to a revision take the
/// caller's connection (normally `&mut *tx`), so that everything a revision
/// creates is committed or rolled back together.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Start a transaction for a batch of revision writes.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        self.pool.begin().await.or_raise(|| ErrorKind::Database)
    }

    // =========================================================================
    // Entities
    // =========================================================================

    pub async fn create_entity(&self, bbid: Uuid, kind: EntityKind) -> Result<()> {
        sqlx::query(include_str!("../queries/entity/insert.sql"))
            .bind(bbid.to_string())
            .bind(kind.to_string())
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    /// Point `source` at `target`, replacing any previous redirect.
    pub async fn add_redirect(&self, source: Uuid, target: Uuid) -> Result<()> {
        if source == target {
            exn::bail!(ErrorKind::InvalidArgument(format!("entity {source} cannot redirect to itself")));
        }
        sqlx::query(include_str!("../queries/entity/insert_redirect.sql"))
            .bind(source.to_string())
            .bind(target.to_string())
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    /// Follow redirects from `bbid` until reaching an entity that is not
    /// redirected. An entity with no redirect resolves to itself.
    ///
    /// Returns [`ErrorKind::RedirectCycle`] if the chain loops.
    #[instrument(skip(self))]
    pub async fn resolve_redirect(&self, bbid: Uuid) -> Result<Uuid> {
        let mut current = bbid;
        let mut visited = HashSet::from([bbid]);
        loop {
            let target: Option<String> = sqlx::query_scalar(include_str!("../queries/entity/get_redirect.sql"))
                .bind(current.to_string())
                .fetch_optional(&self.pool)
                .await
                .or_raise(|| ErrorKind::Database)?;
            let Some(target) = target else {
                return Ok(current);
            };
            let target = parse_bbid(&target)?;
            if !visited.insert(target) {
                exn::bail!(ErrorKind::RedirectCycle(target));
            }
            tracing::trace!(from = %current, to = %target, "following redirect");
            current = target;
        }
    }

    // =========================================================================
    // Sets
    // =========================================================================

    /// Get the items of a set, ordered by row id.
    pub async fn get_set_items<T: SetItem>(&self, set: SetId) -> Result<Vec<T>> {
        fetch_set_items(&self.pool, set).await
    }

    /// Replace the items of `old` (if any) with `new_items`.
    ///
    /// Items are matched with `cmp`. When nothing was added or removed the
    /// old set is kept as-is; otherwise a new set is created in `conn`,
    /// relinking the unchanged rows and inserting the added ones. An empty
    /// result means no set at all.
    #[instrument(skip_all, fields(kind = %T::KIND, old = ?old, new = new_items.len()))]
    pub async fn update_set<T: SetItem>(
        &self,
        conn: &mut SqliteConnection,
        old: Option<SetId>,
        new_items: &[T],
        cmp: impl Fn(&T, &T) -> bool,
    ) -> Result<SetChanges<T>> {
        let old_items: Vec<T> = match old {
            Some(set) => fetch_set_items(&mut *conn, set).await?,
            None => Vec::new(),
        };
        let Partition { unchanged, added, removed } = folio_diff::partition(&old_items, new_items, &cmp);
        tracing::debug!(unchanged = unchanged.len(), added = added.len(), removed = removed.len(), "partitioned set");

        let set = match old {
            Some(set) if added.is_empty() && removed.is_empty() => Some(SetRef::new(T::KIND, set)),
            _ => {
                let mut writer = SqliteSetWriter::new(conn);
                create_new_set_with_items(&mut writer, &unchanged, &added).await?
            },
        };
        Ok(SetChanges { set, unchanged, added, removed })
    }

    // =========================================================================
    // Revisions
    // =========================================================================

    /// Record a revision of `bbid` whose entity data references `sets`.
    pub async fn create_revision(
        &self,
        conn: &mut SqliteConnection,
        bbid: Uuid,
        parent: Option<RevisionId>,
        sets: &EntitySets,
    ) -> Result<RevisionId> {
        let id: i64 = sqlx::query_scalar(include_str!("../queries/revision/insert.sql"))
            .bind(bbid.to_string())
            .bind(parent.map(RevisionId::get))
            .bind(UtcDateTime::now().unix_timestamp())
            .fetch_one(&mut *conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        sqlx::query(include_str!("../queries/revision/insert_entity_data.sql"))
            .bind(id)
            .bind(sets.aliases.map(SetId::get))
            .bind(sets.identifiers.map(SetId::get))
            .bind(sets.relationships.map(SetId::get))
            .execute(&mut *conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        tracing::debug!(revision = id, %bbid, "created revision");
        Ok(RevisionId::from(id))
    }

    pub async fn get_revision_sets(&self, revision: RevisionId) -> Result<EntitySets> {
        let row: Option<EntityDataRow> = sqlx::query_as(include_str!("../queries/revision/get_entity_data.sql"))
            .bind(revision.get())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(row.ok_or_raise(|| ErrorKind::RevisionNotFound(revision.get()))?.into())
    }

    pub async fn get_parent_revision(&self, revision: RevisionId) -> Result<Option<RevisionId>> {
        let parent: Option<Option<i64>> = sqlx::query_scalar(include_str!("../queries/revision/get_parent.sql"))
            .bind(revision.get())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(parent.ok_or_raise(|| ErrorKind::RevisionNotFound(revision.get()))?.map(RevisionId::from))
    }

    /// The most recent revision of an entity, if it has any.
    pub async fn get_latest_revision(&self, bbid: Uuid) -> Result<Option<RevisionId>> {
        let id: Option<i64> = sqlx::query_scalar(include_str!("../queries/revision/get_latest.sql"))
            .bind(bbid.to_string())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(id.map(RevisionId::from))
    }
}
