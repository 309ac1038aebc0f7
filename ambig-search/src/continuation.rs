//! The continuation list: work still owed by ancestor rules. For each
//! unfinished binary rule, the right sibling to parse next; for each
//! insertion that emits after its branch, the pending text.
//!
//! The list is persistent. Every push builds a new head sharing the tail
//! with the parent derivation; published cells are never mutated.

use std::rc::Rc;

use rpds::List;

use crate::local_prelude::*;

/// One pending item of a derivation's continuation.
#[derive(Clone, Debug)]
pub enum ContItem {
    /// A pending right-sibling nonterminal.
    Sym {
        sym: Symbol,
        /// Grammatical properties for the terminal rules of this branch.
        gram_props: Option<Rc<GramProps>>,
        /// How many pending items up to this one can yield a semantic.
        sym_count: u32,
    },
    /// Pending inserted text, emitted once the branch before it closes.
    Text {
        text: Vec<TextItem>,
        /// Carried through unchanged: pending text yields no semantic.
        sym_count: u32,
    },
}

pub type ContList = List<ContItem>;

impl ContItem {
    pub fn sym_count(&self) -> u32 {
        match self {
            ContItem::Sym { sym_count, .. } | ContItem::Text { sym_count, .. } => *sym_count,
        }
    }
}

/// The semantic-bearing count at the head of the list, 0 when empty.
pub fn head_sym_count(list: &ContList) -> u32 {
    list.first().map(ContItem::sym_count).unwrap_or(0)
}

/// Prepends a pending right sibling.
pub fn push_sibling(
    list: &ContList,
    sym: Symbol,
    gram_props: Option<Rc<GramProps>>,
    can_produce_semantic: bool,
) -> ContList {
    let sym_count = head_sym_count(list) + can_produce_semantic as u32;
    list.push_front(ContItem::Sym {
        sym,
        gram_props,
        sym_count,
    })
}

/// Prepends pending inserted text.
pub fn push_pending_text(list: &ContList, text: Vec<TextItem>) -> ContList {
    let sym_count = head_sym_count(list);
    list.push_front(ContItem::Text { text, sym_count })
}

/// Whether two lists carry the same sequence of pending symbols. Pending
/// text does not distinguish rightmost symbols.
pub fn syms_equal(a: &ContList, b: &ContList) -> bool {
    let syms = |list: &'_ ContList| {
        list.iter()
            .filter_map(|item| match item {
                ContItem::Sym { sym, .. } => Some(*sym),
                ContItem::Text { .. } => None,
            })
            .collect::<Vec<_>>()
    };
    syms(a) == syms(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sym_counts_accumulate() {
        let list = ContList::new();
        let [a, b] = {
            let mut source = SymbolSource::new();
            source.sym()
        };

        let list = push_sibling(&list, a, None, true);
        assert_eq!(head_sym_count(&list), 1);
        let list = push_pending_text(&list, vec![TextItem::str("and")]);
        assert_eq!(head_sym_count(&list), 1);
        let list = push_sibling(&list, b, None, false);
        assert_eq!(head_sym_count(&list), 1);
        let list = push_sibling(&list, b, None, true);
        assert_eq!(head_sym_count(&list), 2);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_syms_equal_ignores_pending_text() {
        let [a, b] = {
            let mut source = SymbolSource::new();
            source.sym()
        };
        let plain = push_sibling(&push_sibling(&ContList::new(), b, None, false), a, None, false);
        let with_text = push_pending_text(&plain, vec![TextItem::str("to")]);

        assert!(syms_equal(&plain, &with_text));
        let other = push_sibling(&plain, b, None, false);
        assert!(!syms_equal(&plain, &other));
    }
}
