use crate::EntitySets;
use crate::kind::SetId;

#[derive(sqlx::FromRow)]
pub(crate) struct EntityDataRow {
    #[sqlx(default)]
    alias_set_id: Option<i64>,
    #[sqlx(default)]
    identifier_set_id: Option<i64>,
    #[sqlx(default)]
    relationship_set_id: Option<i64>,
}
impl From<EntityDataRow> for EntitySets {
    fn from(row: EntityDataRow) -> Self {
        Self {
            aliases: row.alias_set_id.map(SetId::from),
            identifiers: row.identifier_set_id.map(SetId::from),
            relationships: row.relationship_set_id.map(SetId::from),
        }
    }
}
