//! Entities and the sets recorded for them at each revision.

use crate::error::{Error, ErrorKind};
use crate::kind::SetId;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[display("author")]
    Author,
    #[display("work")]
    Work,
    #[display("edition")]
    Edition,
    #[display("edition_group")]
    EditionGroup,
    #[display("publisher")]
    Publisher,
    #[display("series")]
    Series,
}
impl FromStr for EntityKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "author" => Self::Author,
            "work" => Self::Work,
            "edition" => Self::Edition,
            "edition_group" => Self::EditionGroup,
            "publisher" => Self::Publisher,
            "series" => Self::Series,
            other => exn::bail!(ErrorKind::InvalidArgument(format!("unknown entity kind: {other:?}"))),
        })
    }
}

/// The sets an entity had at one revision. `None` means "no items of this
/// kind", never "unknown".
///
/// Relationship attribute sets are not listed here: they hang off
/// individual relationships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySets {
    pub aliases: Option<SetId>,
    pub identifiers: Option<SetId>,
    pub relationships: Option<SetId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EntityKind::Author)]
    #[case(EntityKind::EditionGroup)]
    #[case(EntityKind::Series)]
    fn test_kind_round_trip(#[case] kind: EntityKind) {
        assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
    }

    #[test]
    fn test_unknown_kind() {
        let err = "magazine".parse::<EntityKind>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidArgument(_)));
    }
}
