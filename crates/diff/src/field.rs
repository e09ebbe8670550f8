//! Named-field access and comparators built on top of it.

/// The value of a single comparison field.
///
/// Borrowed from the item being compared so that building a comparator
/// never allocates per comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// Present, but explicitly empty (e.g. an alias with no language).
    Null,
    Bool(bool),
    Int(i64),
    Text(&'a str),
    Bytes(&'a [u8]),
}

/// Items that expose their comparison fields by name.
pub trait Fields {
    /// Look up a field by name.
    ///
    /// Returns `None` when the item has no such field. A missing field is
    /// only ever equal to another missing field, never to a concrete value
    /// (including [`Field::Null`]).
    fn field(&self, name: &str) -> Option<Field<'_>>;
}

/// Build an equality predicate that holds when both items agree on every
/// named field.
///
/// With no fields at all, every pair of items is considered equal.
///
/// ```
/// use folio_diff::{Field, Fields, comparator};
///
/// struct Tag(&'static str, i64);
/// impl Fields for Tag {
///     fn field(&self, name: &str) -> Option<Field<'_>> {
///         match name {
///             "name" => Some(Field::Text(self.0)),
///             "weight" => Some(Field::Int(self.1)),
///             _ => None,
///         }
///     }
/// }
///
/// let by_name = comparator::<Tag>(&["name"]);
/// assert!(by_name(&Tag("fluff", 1), &Tag("fluff", 2)));
/// let by_both = comparator::<Tag>(&["name", "weight"]);
/// assert!(!by_both(&Tag("fluff", 1), &Tag("fluff", 2)));
/// ```
pub fn comparator<T: Fields + ?Sized>(fields: &[&str]) -> impl Fn(&T, &T) -> bool + use<T> {
    let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    move |a: &T, b: &T| fields.iter().all(|name| a.field(name) == b.field(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Default)]
    struct Alias {
        id: Option<i64>,
        name: &'static str,
        language: Option<i64>,
        primary: Option<bool>,
    }
    impl Fields for Alias {
        fn field(&self, name: &str) -> Option<Field<'_>> {
            match name {
                "id" => self.id.map(Field::Int),
                "name" => Some(Field::Text(self.name)),
                "language" => Some(self.language.map_or(Field::Null, Field::Int)),
                "primary" => self.primary.map(Field::Bool),
                _ => None,
            }
        }
    }

    #[rstest]
    #[case(&["name"], true)]
    #[case(&["name", "language"], true)]
    #[case(&["name", "language", "id"], false)]
    #[case(&[], true)]
    fn test_compares_only_named_fields(#[case] fields: &[&str], #[case] expected: bool) {
        let a = Alias { id: Some(1), name: "Terry Pratchett", language: Some(120), ..Default::default() };
        let b = Alias { id: Some(7), name: "Terry Pratchett", language: Some(120), ..Default::default() };
        assert_eq!(comparator::<Alias>(fields)(&a, &b), expected);
    }

    #[test]
    fn test_null_is_a_value() {
        let a = Alias { name: "Anonymous", ..Default::default() };
        let b = Alias { name: "Anonymous", language: Some(1), ..Default::default() };
        let cmp = comparator::<Alias>(&["name", "language"]);
        assert!(cmp(&a, &a));
        assert!(!cmp(&a, &b));
    }

    #[test]
    fn test_missing_field_never_matches_present_field() {
        let present = Alias { name: "x", primary: Some(false), ..Default::default() };
        let missing = Alias { name: "x", primary: None, ..Default::default() };
        let cmp = comparator::<Alias>(&["primary"]);
        assert!(!cmp(&present, &missing));
        assert!(!cmp(&missing, &present));
        // Both sides missing agree, the same as two undefined values would.
        assert!(cmp(&missing, &missing));
    }

    #[test]
    fn test_unknown_field_names_are_missing_on_both_sides() {
        let a = Alias { name: "a", ..Default::default() };
        let b = Alias { name: "b", ..Default::default() };
        assert!(comparator::<Alias>(&["colour"])(&a, &b));
    }
}
