use crate::items::{NewItem, SetItem};
use crate::kind::{ItemId, SetKind};
use crate::models::IdentifierRow;
use folio_diff::{Field, Fields};
use serde::{Deserialize, Serialize};

/// An external identifier (ISBN, Wikidata QID, ...) of a given type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub type_id: i64,
    pub value: String,
}
impl Identifier {
    pub fn new(type_id: i64, value: impl Into<String>) -> Self {
        Self { id: None, type_id, value: value.into() }
    }
}

impl Fields for Identifier {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        Some(match name {
            "id" => return self.id.map(|id| Field::Int(id.get())),
            "type_id" => Field::Int(self.type_id),
            "value" => Field::Text(&self.value),
            _ => return None,
        })
    }
}

impl SetItem for Identifier {
    const KIND: SetKind = SetKind::Identifier;
    const COMPARISON_FIELDS: &'static [&'static str] = &["type_id", "value"];
    type Row = IdentifierRow;

    fn id(&self) -> Option<ItemId> {
        self.id
    }

    fn as_new(&self) -> NewItem<'_> {
        NewItem::Identifier(self)
    }
}
