use crate::items::{NewItem, SetItem};
use crate::kind::{ItemId, SetKind};
use crate::models::RelationshipAttributeRow;
use folio_diff::{Field, Fields};
use serde::{Deserialize, Serialize};

/// A typed qualifier on a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub attribute_type: i64,
    #[serde(default)]
    pub value: RelationshipAttributeValue,
}
impl RelationshipAttribute {
    pub fn text(attribute_type: i64, text_value: impl Into<String>) -> Self {
        Self {
            id: None,
            attribute_type,
            value: RelationshipAttributeValue { text_value: Some(text_value.into()) },
        }
    }
}

/// The value stored alongside a relationship attribute, one row per
/// attribute row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipAttributeValue {
    pub text_value: Option<String>,
}

impl Fields for RelationshipAttribute {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        Some(match name {
            "id" => return self.id.map(|id| Field::Int(id.get())),
            "attribute_type" => Field::Int(self.attribute_type),
            "text_value" => self.value.text_value.as_deref().map_or(Field::Null, Field::Text),
            _ => return None,
        })
    }
}

impl SetItem for RelationshipAttribute {
    const KIND: SetKind = SetKind::RelationshipAttribute;
    const COMPARISON_FIELDS: &'static [&'static str] = &["attribute_type", "text_value"];
    type Row = RelationshipAttributeRow;

    fn id(&self) -> Option<ItemId> {
        self.id
    }

    fn as_new(&self) -> NewItem<'_> {
        NewItem::RelationshipAttribute(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::default_comparator;

    #[test]
    fn test_same_type_and_text_is_unchanged() {
        let cmp = default_comparator::<RelationshipAttribute>();
        let stored = RelationshipAttribute { id: Some(ItemId::from(3_i64)), ..RelationshipAttribute::text(1, "4") };
        assert!(cmp(&stored, &RelationshipAttribute::text(1, "4")));
        assert!(!cmp(&stored, &RelationshipAttribute::text(1, "5")));
        assert!(!cmp(&stored, &RelationshipAttribute::text(2, "4")));
    }

    #[test]
    fn test_missing_text_value_differs_from_empty_text() {
        let cmp = default_comparator::<RelationshipAttribute>();
        let missing = RelationshipAttribute { id: None, attribute_type: 1, value: RelationshipAttributeValue::default() };
        assert!(!cmp(&missing, &RelationshipAttribute::text(1, "")));
    }

    #[test]
    fn test_deserialize_without_id() {
        let attribute: RelationshipAttribute =
            serde_json::from_str(r#"{"attribute_type": 1, "value": {"text_value": "x"}}"#).unwrap();
        assert_eq!(attribute, RelationshipAttribute::text(1, "x"));
    }
}
