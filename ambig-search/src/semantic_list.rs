//! The semantic reduction list: a persistent list of semantic frames,
//! reduced incrementally while a derivation grows. Frames are either
//! reduced arrays or unreduced semantics awaiting the children of the
//! branches below them.

use rpds::List;

use ambig_semantic as semantic;
use ambig_semantic::SemanticTree;

use crate::error::Discarded;
use crate::local_prelude::*;

/// One frame of the semantic list.
#[derive(Clone, Debug, PartialEq)]
pub enum SemFrame {
    /// A reduced semantic array.
    Reduced(SemanticTree),
    /// An unreduced semantic awaiting children.
    Unreduced {
        tree: SemanticTree,
        /// The continuation's semantic-bearing count at insertion. The
        /// frame may reduce only once every such branch has closed.
        sym_count: u32,
    },
}

pub type SemList = List<SemFrame>;

/// Appends a nonterminal rule's semantic. An illegal merger or reduction
/// prunes the derivation.
pub fn append(list: &SemList, rule: &Rule, cur_sym_count: u32) -> Result<SemList, Discarded> {
    if let Some(inserted) = &rule.inserted_semantic {
        // The inserted, already-reduced semantic sits above the rule's own.
        let mut out = list.clone();
        if let Some(sem) = &rule.semantic {
            out = if sem.is_reduced {
                out.push_front(SemFrame::Reduced(sem.tree.clone()))
            } else {
                out.push_front(SemFrame::Unreduced {
                    tree: sem.tree.clone(),
                    sym_count: cur_sym_count,
                })
            };
        }
        return Ok(out.push_front(SemFrame::Reduced(inserted.clone())));
    }

    let Some(sem) = &rule.semantic else {
        return Ok(list.clone());
    };
    let rhs_can_produce = rule
        .nonterminal()
        .map(|nt| nt.rhs_can_produce_semantic)
        .unwrap_or(false);

    if sem.is_reduced {
        match list.first() {
            Some(SemFrame::Reduced(prev)) => {
                let merged = semantic::merge_rhs(prev, &sem.tree).ok_or(Discarded)?;
                Ok(list
                    .drop_first()
                    .expect("nonempty list")
                    .push_front(SemFrame::Reduced(merged)))
            }
            Some(SemFrame::Unreduced { tree, .. }) if !rhs_can_produce => {
                // Nothing below will add to this semantic, so the waiting
                // frame takes it as its whole argument now.
                let reduced = semantic::reduce(tree, &sem.tree).ok_or(Discarded)?;
                reduce_walk(
                    list.drop_first().expect("nonempty list"),
                    reduced,
                    cur_sym_count,
                )
            }
            Some(SemFrame::Unreduced { tree, .. }) => {
                if is_illegal_semantic_reduction(list, tree, &sem.tree) {
                    return Err(Discarded);
                }
                Ok(list.push_front(SemFrame::Reduced(sem.tree.clone())))
            }
            None => Ok(list.push_front(SemFrame::Reduced(sem.tree.clone()))),
        }
    } else {
        if let Some(SemFrame::Reduced(prev)) = list.first() {
            if semantic::is_forbidden_multiple(prev, &sem.tree) {
                return Err(Discarded);
            }
        }
        Ok(list.push_front(SemFrame::Unreduced {
            tree: sem.tree.clone(),
            sym_count: cur_sym_count,
        }))
    }
}

/// Look-ahead for an illegal parse: a waiting single-child functor over a
/// reduced parent would, once applied to the new semantic, merge illegally
/// with that parent. Catches the illegal state earlier than a plain
/// reducer would.
fn is_illegal_semantic_reduction(
    list: &SemList,
    head_tree: &SemanticTree,
    new_rhs: &SemanticTree,
) -> bool {
    let single_child_functor = head_tree.len() == 1
        && head_tree[0].children.is_none()
        && head_tree[0].func.max_params == 1;
    if !single_child_functor {
        return false;
    }
    let mut frames = list.iter();
    frames.next();
    let Some(SemFrame::Reduced(parent)) = frames.next() else {
        return false;
    };
    match semantic::reduce(head_tree, new_rhs) {
        Some(reduced) => semantic::is_illegal_rhs(parent, &reduced),
        None => true,
    }
}

/// Reduces the list after a terminal rule. Walks from the head, merging
/// reduced frames and reducing waiting frames whose branches have all
/// closed, then pushes the result back on.
pub fn reduce_on_terminal(
    list: &SemList,
    rule: &Rule,
    cur_sym_count: u32,
) -> Result<SemList, Discarded> {
    match &rule.semantic {
        Some(sem) => {
            debug_assert!(sem.is_reduced, "terminal semantics are reduced");
            reduce_walk(list.clone(), sem.tree.clone(), cur_sym_count)
        }
        None => match list.first() {
            Some(SemFrame::Reduced(prev)) => reduce_walk(
                list.drop_first().expect("nonempty list"),
                prev.clone(),
                cur_sym_count,
            ),
            _ => Ok(list.clone()),
        },
    }
}

fn reduce_walk(
    mut rest: SemList,
    mut cur: SemanticTree,
    cur_sym_count: u32,
) -> Result<SemList, Discarded> {
    loop {
        let next = match rest.first() {
            Some(SemFrame::Reduced(prev)) => {
                Some(semantic::merge_rhs(prev, &cur).ok_or(Discarded)?)
            }
            Some(SemFrame::Unreduced { tree, sym_count }) if cur_sym_count <= *sym_count => {
                Some(semantic::reduce(tree, &cur).ok_or(Discarded)?)
            }
            _ => None,
        };
        match next {
            Some(merged) => {
                cur = merged;
                rest = rest.drop_first().expect("nonempty list");
            }
            None => break,
        }
    }
    Ok(rest.push_front(SemFrame::Reduced(cur)))
}

/// A totally reduced semantic, for comparing two derivations.
#[derive(Clone, Debug)]
pub enum ForcedSemantic {
    Tree(SemanticTree),
    Absent,
    /// The forced merger was illegal. Legal for a derivation whose open
    /// branches would have separated the offending semantics.
    Illegal,
}

impl ForcedSemantic {
    pub fn tree(&self) -> Option<&SemanticTree> {
        match self {
            ForcedSemantic::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

/// Merges the whole list ignoring arity requirements, then sorts the
/// result canonically so comparison is order-insensitive.
pub fn force_complete(list: &SemList) -> ForcedSemantic {
    let mut cur: Option<SemanticTree> = None;
    for frame in list.iter() {
        match frame {
            SemFrame::Reduced(tree) => {
                cur = Some(match cur {
                    Some(prev) => match semantic::merge_rhs(tree, &prev) {
                        Some(merged) => merged,
                        None => return ForcedSemantic::Illegal,
                    },
                    None => tree.clone(),
                });
            }
            SemFrame::Unreduced { tree, .. } => {
                cur = Some(semantic::reduce_forced(
                    tree,
                    cur.as_deref().unwrap_or(&[]),
                ));
            }
        }
    }
    match cur {
        Some(mut tree) => {
            semantic::sort(&mut tree);
            ForcedSemantic::Tree(tree)
        }
        None => ForcedSemantic::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambig_semantic::SemanticFunc;
    use std::rc::Rc;

    fn lhs_rule(tree: SemanticTree) -> Rule {
        Rule {
            rhs: RuleRhs::Nonterminal(NonterminalRhs {
                syms: Rc::from(&[Symbol::from(0usize)][..]),
                insertion: None,
                rhs_can_produce_semantic: true,
                second_rhs_can_produce_semantic: false,
            }),
            semantic: Some(RuleSemantic {
                tree,
                is_reduced: false,
            }),
            inserted_semantic: None,
            gram_props: None,
            person_number: None,
            is_transposition: false,
        }
    }

    fn terminal_rule(tree: Option<SemanticTree>) -> Rule {
        Rule {
            rhs: RuleRhs::Terminal(TerminalRhs {
                token: "x".into(),
                text: None,
                tense: None,
                is_placeholder: false,
            }),
            semantic: tree.map(|tree| RuleSemantic {
                tree,
                is_reduced: true,
            }),
            inserted_semantic: None,
            gram_props: None,
            person_number: None,
            is_transposition: false,
        }
    }

    #[test]
    fn test_waiting_frame_reduces_when_branches_close() {
        let f = SemanticFunc::new("f", 0.0, 0, 9, false);
        let a = SemanticFunc::argument("a", 0.0);
        let b = SemanticFunc::argument("b", 0.0);

        // `f` waits while one semantic-bearing sibling is pending.
        let list = append(&SemList::new(), &lhs_rule(vec![f.node()]), 0).unwrap();
        // The first branch's terminal carries `a`; the sibling is open.
        let list = reduce_on_terminal(&list, &terminal_rule(Some(vec![a.node()])), 1).unwrap();
        assert_eq!(list.len(), 2);

        // The second branch's terminal carries `b`; everything closes.
        let list = reduce_on_terminal(&list, &terminal_rule(Some(vec![b.node()])), 0).unwrap();
        assert_eq!(list.len(), 1);
        let expected = f.node_with(vec![a.node(), b.node()]);
        assert_eq!(list.first(), Some(&SemFrame::Reduced(vec![expected])));
    }

    #[test]
    fn test_forbidden_multiple_prunes() {
        let liked = SemanticFunc::new("repos-liked-by", 0.5, 1, 1, true);
        let me = SemanticFunc::argument("me", 0.0);

        let reduced = vec![liked.node_with(vec![me.node()])];
        let list = SemList::new().push_front(SemFrame::Reduced(reduced));
        assert_eq!(
            append(&list, &lhs_rule(vec![liked.node()]), 0),
            Err(Discarded)
        );
    }

    #[test]
    fn test_force_complete_sorts() {
        let a = SemanticFunc::argument("a", 0.0);
        let b = SemanticFunc::argument("b", 0.0);

        let forward = SemList::new()
            .push_front(SemFrame::Reduced(vec![a.node()]))
            .push_front(SemFrame::Reduced(vec![b.node()]));
        let backward = SemList::new()
            .push_front(SemFrame::Reduced(vec![b.node()]))
            .push_front(SemFrame::Reduced(vec![a.node()]));

        let forced_forward = force_complete(&forward);
        let forced_backward = force_complete(&backward);
        assert_eq!(forced_forward.tree(), forced_backward.tree());
        assert!(force_complete(&SemList::new()).tree().is_none());
    }
}
