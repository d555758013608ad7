//! Context set algebra
//!
//! AND narrows scope by intersection, OR widens it by union.

use std::collections::BTreeSet;

use crate::scope::{ClauseContext, ScopePair};

/// Union of all contexts; collapses to global once the global pair is present
pub fn union<'a, I>(contexts: I) -> ClauseContext
where
    I: IntoIterator<Item = &'a ClauseContext>,
{
    let mut pairs = BTreeSet::new();
    for context in contexts {
        if context.is_global() {
            return ClauseContext::global();
        }
        pairs.extend(context.pairs().cloned());
    }
    ClauseContext::new(pairs)
}

/// Pairwise intersection across all contexts
///
/// No input, or any empty input, yields the empty context.
pub fn intersect<'a, I>(contexts: I) -> ClauseContext
where
    I: IntoIterator<Item = &'a ClauseContext>,
{
    let mut contexts = contexts.into_iter();
    let Some(first) = contexts.next() else {
        return ClauseContext::empty();
    };

    let mut result: BTreeSet<ScopePair> = first.clone().into_pairs();
    for context in contexts {
        if result.is_empty() {
            break;
        }
        result = result
            .iter()
            .flat_map(|left| context.pairs().filter_map(move |right| left.intersect(right)))
            .collect();
    }
    ClauseContext::new(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{IssueTypeScope, ProjectScope};

    fn pair(project: Option<i64>, issue_type: Option<&str>) -> ScopePair {
        ScopePair::new(
            project.map_or(ProjectScope::All, ProjectScope::Id),
            issue_type.map_or(IssueTypeScope::All, |t| IssueTypeScope::Id(t.to_string())),
        )
    }

    #[test]
    fn test_union_of_nothing_is_empty() {
        assert!(union([]).is_empty());
    }

    #[test]
    fn test_union_keeps_all_pairs() {
        let a = ClauseContext::new([pair(Some(10), None), pair(Some(20), Some("1"))]);
        let b = ClauseContext::new([pair(Some(20), Some("1")), pair(None, Some("2"))]);
        let result = union([&a, &b]);
        assert_eq!(
            result,
            ClauseContext::new([
                pair(Some(10), None),
                pair(Some(20), Some("1")),
                pair(None, Some("2")),
            ])
        );
    }

    #[test]
    fn test_union_with_global_is_global() {
        let a = ClauseContext::projects([10]);
        assert_eq!(union([&a, &ClauseContext::global()]), ClauseContext::global());
    }

    #[test]
    fn test_intersect_of_nothing_is_empty() {
        assert!(intersect([]).is_empty());
    }

    #[test]
    fn test_intersect_single_context_is_identity() {
        let a = ClauseContext::projects([10, 20]);
        assert_eq!(intersect([&a]), a);
    }

    #[test]
    fn test_intersect_with_empty_is_empty() {
        let a = ClauseContext::projects([10]);
        assert!(intersect([&a, &ClauseContext::empty()]).is_empty());
    }

    #[test]
    fn test_intersect_alls() {
        let projects = ClauseContext::projects([10, 20]);
        let types = ClauseContext::issue_types(["1"]);
        let result = intersect([&projects, &types]);
        assert_eq!(
            result,
            ClauseContext::new([pair(Some(10), Some("1")), pair(Some(20), Some("1"))])
        );
    }

    #[test]
    fn test_intersect_disjoint_projects() {
        let a = ClauseContext::projects([10]);
        let b = ClauseContext::projects([20]);
        assert!(intersect([&a, &b]).is_empty());
    }

    #[test]
    fn test_intersect_with_global_is_identity() {
        let a = ClauseContext::new([pair(Some(10), Some("1")), pair(None, Some("2"))]);
        assert_eq!(intersect([&ClauseContext::global(), &a]), a);
    }

    #[test]
    fn test_intersect_complex() {
        let a = ClauseContext::new([
            pair(Some(10), None),
            pair(Some(20), Some("1")),
            pair(None, Some("2")),
        ]);
        let b = ClauseContext::new([pair(Some(10), Some("2")), pair(Some(20), Some("3"))]);
        // (10,*)∩(10,2) and (*,2)∩(10,2) coincide
        assert_eq!(intersect([&a, &b]), ClauseContext::new([pair(Some(10), Some("2"))]));
    }
}
