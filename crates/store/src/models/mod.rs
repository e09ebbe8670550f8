mod item;
mod revision;

pub use self::item::{AliasRow, IdentifierRow, RelationshipAttributeRow, RelationshipRow};
pub(crate) use self::revision::EntityDataRow;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use uuid::Uuid;

pub(crate) fn parse_bbid(text: &str) -> Result<Uuid> {
    Uuid::parse_str(text).or_raise(|| ErrorKind::InvalidData("bbid"))
}
