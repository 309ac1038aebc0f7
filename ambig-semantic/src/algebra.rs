//! Operations over semantic trees. Illegal outcomes are signalled with
//! `None`, never with panics, so callers can prune and move on.

use std::cmp::Ordering;

use crate::{func_eq, SemanticNode, SemanticTree};

/// The canonical order over semantic nodes: by function name, then by
/// children. Sorting with this order makes array comparison
/// order-insensitive.
pub fn compare(a: &SemanticNode, b: &SemanticNode) -> Ordering {
    a.func
        .name
        .cmp(&b.func.name)
        .then_with(|| compare_children(a.children.as_deref(), b.children.as_deref()))
}

fn compare_children(a: Option<&[SemanticNode]>, b: Option<&[SemanticNode]>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                let ord = compare(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.len().cmp(&b.len())
        }
    }
}

/// Sorts a semantic tree in the canonical order.
pub fn sort(tree: &mut SemanticTree) {
    tree.sort_by(compare);
}

/// Merges two reduced semantics into one array, or returns `None` when the
/// merger is illegal: a node repeats, or two distinct nodes share a
/// function that forbids multiple uses.
pub fn merge_rhs(a: &[SemanticNode], b: &[SemanticNode]) -> Option<SemanticTree> {
    if is_illegal_rhs(a, b) {
        return None;
    }
    let mut out = a.to_vec();
    out.extend(b.iter().cloned());
    Some(out)
}

/// Whether merging `addition` into `children` would be illegal.
pub fn is_illegal_rhs(children: &[SemanticNode], addition: &[SemanticNode]) -> bool {
    children.iter().any(|x| {
        addition
            .iter()
            .any(|y| x == y || (x.func.forbids_multiple && func_eq(&x.func, &y.func)))
    })
}

/// Whether the reduced semantic already carries a function the unreduced
/// one would introduce again, where that function forbids multiple uses.
pub fn is_forbidden_multiple(rhs: &[SemanticNode], lhs: &[SemanticNode]) -> bool {
    lhs.iter().any(|l| {
        l.func.forbids_multiple && rhs.iter().any(|r| func_eq(&r.func, &l.func))
    })
}

/// Applies each function of the unreduced semantic to the reduced children.
/// A function capped at one child distributes over several children; any
/// other arity violation is illegal.
pub fn reduce(lhs: &[SemanticNode], rhs: &[SemanticNode]) -> Option<SemanticTree> {
    let mut out = Vec::with_capacity(lhs.len());
    for node in lhs {
        let func = &node.func;
        if rhs.len() > func.max_params {
            if func.max_params == 1 {
                for child in rhs {
                    out.push(func.node_with(vec![child.clone()]));
                }
            } else {
                return None;
            }
        } else if rhs.len() < func.min_params {
            return None;
        } else {
            out.push(func.node_with(rhs.to_vec()));
        }
    }
    Some(out)
}

/// Applies the unreduced semantic ignoring arity requirements. Used when a
/// comparison needs a total reduction of a derivation that is still open.
pub fn reduce_forced(lhs: &[SemanticNode], rhs: &[SemanticNode]) -> SemanticTree {
    lhs.iter()
        .map(|node| node.func.node_with(rhs.to_vec()))
        .collect()
}

/// Deep equality over two optional semantics. Two absent semantics are
/// equal.
pub fn arrays_equal(a: Option<&[SemanticNode]>, b: Option<&[SemanticNode]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Sums the costs of every function used in the tree.
pub fn sum_costs(tree: &[SemanticNode]) -> f64 {
    tree.iter()
        .map(|node| {
            node.func.cost
                + node
                    .children
                    .as_deref()
                    .map(sum_costs)
                    .unwrap_or(0.0)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SemanticFunc;

    #[test]
    fn test_merge_forbids_duplicates() {
        let me = SemanticFunc::argument("me", 0.0);
        let repos = SemanticFunc::new("repos-liked-by", 0.5, 1, 1, true);
        let liked = repos.node_with(vec![me.node()]);

        assert!(merge_rhs(&[liked.clone()], &[liked.clone()]).is_none());
        assert!(merge_rhs(&[liked.clone()], &[me.node()]).is_some());
        assert!(is_forbidden_multiple(&[liked], &[repos.node()]));
    }

    #[test]
    fn test_reduce_distributes_unary() {
        let not = SemanticFunc::new("not", 0.5, 1, 1, false);
        let a = SemanticFunc::argument("a", 0.0);
        let b = SemanticFunc::argument("b", 0.0);

        let out = reduce(&[not.node()], &[a.node(), b.node()]).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], not.node_with(vec![a.node()]));
        assert_eq!(out[1], not.node_with(vec![b.node()]));
    }

    #[test]
    fn test_reduce_respects_arity() {
        let pair = SemanticFunc::new("pair", 0.0, 2, 2, false);
        let a = SemanticFunc::argument("a", 0.0);
        let b = SemanticFunc::argument("b", 0.0);
        let c = SemanticFunc::argument("c", 0.0);

        assert!(reduce(&[pair.node()], &[a.node()]).is_none());
        assert!(reduce(&[pair.node()], &[a.node(), b.node(), c.node()]).is_none());
        assert!(reduce(&[pair.node()], &[a.node(), b.node()]).is_some());
    }

    #[test]
    fn test_sorted_children_make_order_irrelevant() {
        let f = SemanticFunc::new("f", 0.0, 0, 9, false);
        let a = SemanticFunc::argument("a", 0.0);
        let b = SemanticFunc::argument("b", 0.0);

        let forward = reduce(&[f.node()], &[a.node(), b.node()]).unwrap();
        let backward = reduce(&[f.node()], &[b.node(), a.node()]).unwrap();
        assert!(arrays_equal(Some(&forward), Some(&backward)));
        assert!(arrays_equal(None, None));
        assert!(!arrays_equal(Some(&forward), None));
    }
}
