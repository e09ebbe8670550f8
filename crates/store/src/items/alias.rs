use crate::items::{NewItem, SetItem};
use crate::kind::{ItemId, SetKind};
use crate::models::AliasRow;
use folio_diff::{Field, Fields};
use serde::{Deserialize, Serialize};

/// A name an entity is known by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub name: String,
    pub sort_name: String,
    #[serde(default)]
    pub language_id: Option<i64>,
    #[serde(default)]
    pub primary: bool,
}
impl Alias {
    pub fn new(name: impl Into<String>, sort_name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            sort_name: sort_name.into(),
            language_id: None,
            primary: false,
        }
    }

    pub fn with_language(mut self, language_id: i64) -> Self {
        self.language_id = Some(language_id);
        self
    }

    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }
}

impl Fields for Alias {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        Some(match name {
            "id" => return self.id.map(|id| Field::Int(id.get())),
            "name" => Field::Text(&self.name),
            "sort_name" => Field::Text(&self.sort_name),
            "language_id" => self.language_id.map_or(Field::Null, Field::Int),
            "primary" => Field::Bool(self.primary),
            _ => return None,
        })
    }
}

impl SetItem for Alias {
    const KIND: SetKind = SetKind::Alias;
    const COMPARISON_FIELDS: &'static [&'static str] = &["name", "sort_name", "language_id", "primary"];
    type Row = AliasRow;

    fn id(&self) -> Option<ItemId> {
        self.id
    }

    fn as_new(&self) -> NewItem<'_> {
        NewItem::Alias(self)
    }
}
