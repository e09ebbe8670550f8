//! Rows as stored in the item tables, and their conversion into items.

use crate::error::Error;
use crate::items::{Alias, Identifier, Relationship, RelationshipAttribute, RelationshipAttributeValue};
use crate::kind::{ItemId, SetId};
use crate::models::parse_bbid;

#[derive(sqlx::FromRow)]
pub struct AliasRow {
    id: i64,
    name: String,
    sort_name: String,
    #[sqlx(default)]
    language_id: Option<i64>,
    is_primary: bool,
}
impl TryFrom<AliasRow> for Alias {
    type Error = Error;
    fn try_from(row: AliasRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ItemId::from(row.id)),
            name: row.name,
            sort_name: row.sort_name,
            language_id: row.language_id,
            primary: row.is_primary,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct IdentifierRow {
    id: i64,
    type_id: i64,
    value: String,
}
impl TryFrom<IdentifierRow> for Identifier {
    type Error = Error;
    fn try_from(row: IdentifierRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ItemId::from(row.id)),
            type_id: row.type_id,
            value: row.value,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct RelationshipRow {
    id: i64,
    type_id: i64,
    source_bbid: String,
    target_bbid: String,
    #[sqlx(default)]
    attribute_set_id: Option<i64>,
}
impl TryFrom<RelationshipRow> for Relationship {
    type Error = Error;
    fn try_from(row: RelationshipRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ItemId::from(row.id)),
            type_id: row.type_id,
            source_bbid: parse_bbid(&row.source_bbid)?,
            target_bbid: parse_bbid(&row.target_bbid)?,
            attribute_set_id: row.attribute_set_id.map(SetId::from),
        })
    }
}

/// Relationship attribute joined with its (optional) text value row.
#[derive(sqlx::FromRow)]
pub struct RelationshipAttributeRow {
    id: i64,
    attribute_type: i64,
    #[sqlx(default)]
    text_value: Option<String>,
}
impl TryFrom<RelationshipAttributeRow> for RelationshipAttribute {
    type Error = Error;
    fn try_from(row: RelationshipAttributeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ItemId::from(row.id)),
            attribute_type: row.attribute_type,
            value: RelationshipAttributeValue { text_value: row.text_value },
        })
    }
}
