//! Unchanged/added/removed classification of two versions of a set.
//!
//! Classification is defined purely by the comparator. Stored identity
//! plays no part: an item with a fresh id but identical comparison fields is
//! still "unchanged", which is why [`unchanged`] returns items taken from the
//! *old* collection (so the caller can relink the existing rows).
//!
//! Every result is deduplicated under the comparator, keeping the first
//! representative in input order. All operations are quadratic; sets
//! attached to a single entity are small.

use tracing::instrument;

/// The three-way split of an old and a new version of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    /// Items present in both versions, taken from the old version.
    pub unchanged: Vec<T>,
    /// Items only present in the new version.
    pub added: Vec<T>,
    /// Items only present in the old version.
    pub removed: Vec<T>,
}
impl<T> Partition<T> {
    /// Whether the new version differs from the old one at all.
    pub fn is_changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

fn contains<T>(haystack: &[T], needle: &T, cmp: &impl Fn(&T, &T) -> bool) -> bool {
    haystack.iter().any(|candidate| cmp(candidate, needle))
}

/// Remove items equivalent (under `cmp`) to an earlier item.
pub fn dedup<T: Clone>(items: &[T], cmp: impl Fn(&T, &T) -> bool) -> Vec<T> {
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !contains(&kept, item, &cmp) {
            kept.push(item.clone());
        }
    }
    kept
}

fn difference<T: Clone>(from: &[T], without: &[T], cmp: &impl Fn(&T, &T) -> bool) -> Vec<T> {
    let mut kept: Vec<T> = Vec::new();
    for item in from {
        if !contains(without, item, cmp) && !contains(&kept, item, cmp) {
            kept.push(item.clone());
        }
    }
    kept
}

/// Items of `old` that have an equivalent in `new`.
pub fn unchanged<T: Clone>(old: &[T], new: &[T], cmp: impl Fn(&T, &T) -> bool) -> Vec<T> {
    let mut kept: Vec<T> = Vec::new();
    for item in old {
        if contains(new, item, &cmp) && !contains(&kept, item, &cmp) {
            kept.push(item.clone());
        }
    }
    kept
}

/// Items of `new` that have no equivalent in `old`.
pub fn added<T: Clone>(old: &[T], new: &[T], cmp: impl Fn(&T, &T) -> bool) -> Vec<T> {
    difference(new, old, &cmp)
}

/// Items of `old` that have no equivalent in `new`.
///
/// Not needed to build the next set, but useful to anyone who needs an
/// explicit removal list (audit logs, edit summaries).
pub fn removed<T: Clone>(old: &[T], new: &[T], cmp: impl Fn(&T, &T) -> bool) -> Vec<T> {
    difference(old, new, &cmp)
}

/// Compute all three partitions at once.
#[instrument(level = "trace", skip_all, fields(old = old.len(), new = new.len()))]
pub fn partition<T: Clone>(old: &[T], new: &[T], cmp: impl Fn(&T, &T) -> bool) -> Partition<T> {
    Partition {
        unchanged: unchanged(old, new, &cmp),
        added: added(old, new, &cmp),
        removed: removed(old, new, &cmp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Fields, comparator};
    use rstest::{fixture, rstest};

    #[derive(Debug, Clone, PartialEq)]
    struct Identifier {
        id: Option<i64>,
        kind: i64,
        value: &'static str,
    }
    impl Fields for Identifier {
        fn field(&self, name: &str) -> Option<Field<'_>> {
            match name {
                "id" => self.id.map(Field::Int),
                "kind" => Some(Field::Int(self.kind)),
                "value" => Some(Field::Text(self.value)),
                _ => None,
            }
        }
    }

    fn stored(id: i64, kind: i64, value: &'static str) -> Identifier {
        Identifier { id: Some(id), kind, value }
    }

    fn fresh(kind: i64, value: &'static str) -> Identifier {
        Identifier { id: None, kind, value }
    }

    fn semantic(a: &Identifier, b: &Identifier) -> bool {
        comparator::<Identifier>(&["kind", "value"])(a, b)
    }

    #[fixture]
    fn old() -> Vec<Identifier> {
        vec![
            stored(1, 10, "0-441-17271-7"),
            stored(2, 11, "Q190192"),
            stored(3, 12, "OL27448W"),
            // A duplicate of the first identifier under a different row.
            stored(4, 10, "0-441-17271-7"),
        ]
    }

    #[fixture]
    fn new() -> Vec<Identifier> {
        vec![
            fresh(10, "0-441-17271-7"),
            fresh(11, "Q190192"),
            fresh(13, "9780441172719"),
            fresh(13, "9780441172719"),
        ]
    }

    #[rstest]
    fn test_unchanged_keeps_old_identities(old: Vec<Identifier>, new: Vec<Identifier>) {
        let result = unchanged(&old, &new, semantic);
        assert_eq!(result, vec![stored(1, 10, "0-441-17271-7"), stored(2, 11, "Q190192")]);
    }

    #[rstest]
    fn test_added_is_deduplicated(old: Vec<Identifier>, new: Vec<Identifier>) {
        assert_eq!(added(&old, &new, semantic), vec![fresh(13, "9780441172719")]);
    }

    #[rstest]
    fn test_removed(old: Vec<Identifier>, new: Vec<Identifier>) {
        assert_eq!(removed(&old, &new, semantic), vec![stored(3, 12, "OL27448W")]);
    }

    #[rstest]
    fn test_identity_is_irrelevant(old: Vec<Identifier>) {
        // Same ids, different content: nothing is unchanged.
        let renumbered = vec![stored(1, 99, "x"), stored(2, 99, "y")];
        assert!(unchanged(&old, &renumbered, semantic).is_empty());
        // Different ids, same content: everything is unchanged.
        let copied: Vec<_> = old.iter().map(|i| stored(i.id.unwrap() + 100, i.kind, i.value)).collect();
        assert!(added(&old, &copied, semantic).is_empty());
        assert!(removed(&old, &copied, semantic).is_empty());
    }

    #[rstest]
    fn test_unchanged_and_added_cover_new_exactly_once(old: Vec<Identifier>, new: Vec<Identifier>) {
        let p = partition(&old, &new, semantic);
        for item in &p.unchanged {
            assert!(!p.added.iter().any(|a| semantic(a, item)), "{item:?} is both unchanged and added");
        }
        for item in &new {
            let matches = p.unchanged.iter().chain(p.added.iter()).filter(|c| semantic(c, item)).count();
            assert_eq!(matches, 1, "{item:?} must be covered exactly once");
        }
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![stored(1, 1, "a")], vec![])]
    #[case(vec![], vec![fresh(1, "a"), fresh(1, "a")])]
    #[case(vec![stored(1, 1, "a"), stored(2, 2, "b")], vec![fresh(2, "b"), fresh(3, "c")])]
    fn test_removed_is_added_with_arguments_swapped(#[case] old: Vec<Identifier>, #[case] new: Vec<Identifier>) {
        assert_eq!(removed(&old, &new, semantic), added(&new, &old, semantic));
    }

    #[rstest]
    fn test_idempotence(old: Vec<Identifier>) {
        assert_eq!(unchanged(&old, &old, semantic), dedup(&old, semantic));
        assert!(added(&old, &old, semantic).is_empty());
        assert!(removed(&old, &old, semantic).is_empty());
        assert!(!partition(&old, &old, semantic).is_changed());
    }

    #[test]
    fn test_empty_inputs() {
        let p = partition::<Identifier>(&[], &[], semantic);
        assert!(p.unchanged.is_empty() && p.added.is_empty() && p.removed.is_empty());
    }

    #[test]
    fn test_dedup_keeps_first_representative() {
        let items = vec![stored(5, 1, "a"), stored(6, 1, "a"), stored(7, 2, "a")];
        assert_eq!(dedup(&items, semantic), vec![stored(5, 1, "a"), stored(7, 2, "a")]);
    }
}
