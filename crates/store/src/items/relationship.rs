use crate::items::{NewItem, SetItem};
use crate::kind::{ItemId, SetId, SetKind};
use crate::models::RelationshipRow;
use folio_diff::{Field, Fields};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A typed, directed edge between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub type_id: i64,
    pub source_bbid: Uuid,
    pub target_bbid: Uuid,
    /// Set of attributes qualifying this relationship (e.g. a position in
    /// a series), if any.
    #[serde(default)]
    pub attribute_set_id: Option<SetId>,
}
impl Relationship {
    pub fn new(type_id: i64, source_bbid: Uuid, target_bbid: Uuid) -> Self {
        Self {
            id: None,
            type_id,
            source_bbid,
            target_bbid,
            attribute_set_id: None,
        }
    }

    pub fn with_attribute_set(mut self, set: SetId) -> Self {
        self.attribute_set_id = Some(set);
        self
    }
}

impl Fields for Relationship {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        Some(match name {
            "id" => return self.id.map(|id| Field::Int(id.get())),
            "type_id" => Field::Int(self.type_id),
            "source_bbid" => Field::Bytes(self.source_bbid.as_bytes()),
            "target_bbid" => Field::Bytes(self.target_bbid.as_bytes()),
            "attribute_set_id" => self.attribute_set_id.map_or(Field::Null, |id| Field::Int(id.get())),
            _ => return None,
        })
    }
}

impl SetItem for Relationship {
    const KIND: SetKind = SetKind::Relationship;
    const COMPARISON_FIELDS: &'static [&'static str] = &["type_id", "source_bbid", "target_bbid", "attribute_set_id"];
    type Row = RelationshipRow;

    fn id(&self) -> Option<ItemId> {
        self.id
    }

    fn as_new(&self) -> NewItem<'_> {
        NewItem::Relationship(self)
    }
}
