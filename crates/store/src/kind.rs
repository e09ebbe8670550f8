//! Set kinds and the identifiers of stored rows.

use crate::error::{Error, ErrorKind};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generated id of a set row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(i64);
impl SetId {
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Generated id of a set item row (alias, identifier, relationship or
/// relationship attribute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);
impl ItemId {
    pub fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(i64);
impl RevisionId {
    pub fn get(self) -> i64 {
        self.0
    }
}

/// The kinds of set attached to entity revisions.
///
/// Each kind owns a set table, a join table linking sets to items, and an
/// item table. The kind is tied to its item type at compile time through
/// [`SetItem::KIND`](crate::SetItem::KIND).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetKind {
    #[display("aliases")]
    Alias,
    #[display("identifiers")]
    Identifier,
    #[display("relationships")]
    Relationship,
    #[display("relationship_attributes")]
    RelationshipAttribute,
}
impl SetKind {
    pub const ALL: [SetKind; 4] = [Self::Alias, Self::Identifier, Self::Relationship, Self::RelationshipAttribute];

    pub(crate) fn insert_set_query(self) -> &'static str {
        match self {
            Self::Alias => include_str!("../queries/alias/insert_set.sql"),
            Self::Identifier => include_str!("../queries/identifier/insert_set.sql"),
            Self::Relationship => include_str!("../queries/relationship/insert_set.sql"),
            Self::RelationshipAttribute => include_str!("../queries/relationship_attribute/insert_set.sql"),
        }
    }

    pub(crate) fn attach_query(self) -> &'static str {
        match self {
            Self::Alias => include_str!("../queries/alias/attach.sql"),
            Self::Identifier => include_str!("../queries/identifier/attach.sql"),
            Self::Relationship => include_str!("../queries/relationship/attach.sql"),
            Self::RelationshipAttribute => include_str!("../queries/relationship_attribute/attach.sql"),
        }
    }

    pub(crate) fn list_query(self) -> &'static str {
        match self {
            Self::Alias => include_str!("../queries/alias/list.sql"),
            Self::Identifier => include_str!("../queries/identifier/list.sql"),
            Self::Relationship => include_str!("../queries/relationship/list.sql"),
            Self::RelationshipAttribute => include_str!("../queries/relationship_attribute/list.sql"),
        }
    }
}

/// Parse a relation name, as used on the command line and in older data
/// exports (`aliases`, `relationshipAttributes`, ...).
impl FromStr for SetKind {
    type Err = Error;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name.trim() {
            "" => exn::bail!(ErrorKind::InvalidArgument("set relation name is blank".to_string())),
            "alias" | "aliases" => Self::Alias,
            "identifier" | "identifiers" => Self::Identifier,
            "relationship" | "relationships" => Self::Relationship,
            "relationship_attribute" | "relationship_attributes" | "relationshipAttributes" => {
                Self::RelationshipAttribute
            },
            other => exn::bail!(ErrorKind::InvalidArgument(format!("unknown set relation: {other:?}"))),
        })
    }
}

/// A persisted set: which kind, and which row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{kind}#{id}")]
pub struct SetRef {
    pub kind: SetKind,
    pub id: SetId,
}
impl SetRef {
    pub fn new(kind: SetKind, id: impl Into<SetId>) -> Self {
        Self { kind, id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("aliases", SetKind::Alias)]
    #[case("identifier", SetKind::Identifier)]
    #[case(" relationships ", SetKind::Relationship)]
    #[case("relationshipAttributes", SetKind::RelationshipAttribute)]
    #[case("relationship_attributes", SetKind::RelationshipAttribute)]
    fn test_parse_relation_name(#[case] input: &str, #[case] expected: SetKind) {
        assert_eq!(input.parse::<SetKind>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("editions")]
    fn test_reject_relation_name(#[case] input: &str) {
        let err = input.parse::<SetKind>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in SetKind::ALL {
            assert_eq!(kind.to_string().parse::<SetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_set_ref_display() {
        assert_eq!(SetRef::new(SetKind::Identifier, 42_i64).to_string(), "identifiers#42");
    }
}
