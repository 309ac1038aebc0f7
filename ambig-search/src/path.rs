//! Derivation state. A path is one derivation in progress below a root
//! nonterminal; applying a rule builds a new path that shares its
//! persistent lists and lineage with its parent.

use std::rc::Rc;

use rpds::{List, Vector};

use crate::conjugate::conjugate;
use crate::continuation::{self, ContItem, ContList};
use crate::error::{Discarded, SearchError};
use crate::local_prelude::*;
use crate::person_number::{self, PnList};
use crate::semantic_list::{self, SemList};

/// A derivation in progress below a chosen root nonterminal.
#[derive(Clone, Debug)]
pub struct Path<'g> {
    /// The next nonterminal to expand, absent at a terminal frontier.
    pub cur_sym: Option<Symbol>,
    /// Pending right siblings and pending inserted text.
    pub next_item_list: ContList,
    /// Semantic frames, newest first.
    pub semantic_list: SemList,
    /// Person-number properties awaiting a verb below them.
    pub person_number_list: PnList,
    /// Grammatical properties governing the very next terminal rule.
    pub gram_props: Option<Rc<GramProps>>,
    /// Surface items accumulated so far. Never mutated once published;
    /// extension clones the structure-shared vector first.
    pub text: Vector<TextItem>,
    /// Space-prefixed concatenation of emitted terminal tokens. The
    /// equivalence key for bucketing.
    pub terminals: String,
    /// Grammar symbols consumed, compared against the budget.
    pub sym_count: usize,
    /// The nonterminal the last rule expanded.
    pub lhs: Symbol,
    /// The last rule taken, absent on the root.
    pub rule: Option<&'g Rule>,
    /// Lineage for rebuilding parse trees.
    pub prev: Option<Rc<Path<'g>>>,
}

impl<'g> Path<'g> {
    /// The root of a search: one pending symbol, nothing emitted yet.
    pub fn root(sym: Symbol) -> Self {
        Path {
            cur_sym: Some(sym),
            next_item_list: List::new(),
            semantic_list: List::new(),
            person_number_list: List::new(),
            gram_props: None,
            text: Vector::new(),
            terminals: String::new(),
            sym_count: 1,
            lhs: sym,
            rule: None,
            prev: None,
        }
    }

    /// Whether every pending branch has closed.
    pub fn is_complete(&self) -> bool {
        self.cur_sym.is_none() && self.next_item_list.is_empty()
    }
}

/// Applies one rule to a path. `None` means the derivation was pruned by
/// an illegal semantic operation; conjugation failures are fatal.
pub fn create_path<'g>(
    prev: &Rc<Path<'g>>,
    rule: &'g Rule,
) -> Result<Option<Path<'g>>, SearchError> {
    let lhs = prev.cur_sym.expect("create_path on a closed path");
    match &rule.rhs {
        RuleRhs::Nonterminal(nt) => nonterminal_path(prev, lhs, rule, nt),
        RuleRhs::Terminal(t) => terminal_path(prev, lhs, rule, t),
    }
}

fn nonterminal_path<'g>(
    prev: &Rc<Path<'g>>,
    lhs: Symbol,
    rule: &'g Rule,
    nt: &'g NonterminalRhs,
) -> Result<Option<Path<'g>>, SearchError> {
    let cur_sym_count = continuation::head_sym_count(&prev.next_item_list);
    let semantic_list = match semantic_list::append(&prev.semantic_list, rule, cur_sym_count) {
        Ok(list) => list,
        Err(Discarded) => return Ok(None),
    };

    let mut person_number_list = prev.person_number_list.clone();
    if let Some(person_number) = &rule.person_number {
        person_number_list = person_number::push(
            &person_number_list,
            person_number.clone(),
            &prev.next_item_list,
        );
    }

    let mut next_item_list = prev.next_item_list.clone();
    let mut text = prev.text.clone();
    match &nt.insertion {
        None => {
            if nt.syms.len() == 2 {
                next_item_list = continuation::push_sibling(
                    &next_item_list,
                    nt.syms[1],
                    rule.gram_props.clone(),
                    nt.second_rhs_can_produce_semantic,
                );
            }
        }
        Some(insertion) if insertion.index == 1 => {
            next_item_list =
                continuation::push_pending_text(&next_item_list, insertion.text.clone());
        }
        Some(insertion) => {
            // Insertion compilation already applied grammatical properties,
            // so only person-number conjugation remains.
            for item in &insertion.text {
                push_text(
                    &mut text,
                    conjugate(item, &person_number_list, None, None)?,
                );
            }
        }
    }

    Ok(Some(Path {
        cur_sym: Some(nt.syms[0]),
        next_item_list,
        semantic_list,
        person_number_list,
        gram_props: rule.gram_props.clone(),
        text,
        terminals: prev.terminals.clone(),
        sym_count: prev.sym_count
            + if nt.insertion.is_some() {
                1
            } else {
                nt.syms.len()
            },
        lhs,
        rule: Some(rule),
        prev: Some(Rc::clone(prev)),
    }))
}

fn terminal_path<'g>(
    prev: &Rc<Path<'g>>,
    lhs: Symbol,
    rule: &'g Rule,
    t: &'g TerminalRhs,
) -> Result<Option<Path<'g>>, SearchError> {
    let cur_sym_count = continuation::head_sym_count(&prev.next_item_list);
    let semantic_list =
        match semantic_list::reduce_on_terminal(&prev.semantic_list, rule, cur_sym_count) {
            Ok(list) => list,
            Err(Discarded) => return Ok(None),
        };

    let mut terminals = prev.terminals.clone();
    terminals.push(' ');
    terminals.push_str(&t.token);

    let mut text = prev.text.clone();
    if let Some(item) = &t.text {
        push_text(
            &mut text,
            conjugate(
                item,
                &prev.person_number_list,
                prev.gram_props.as_deref(),
                t.tense.as_deref(),
            )?,
        );
    } else if t.is_placeholder {
        text.push_back_mut(TextItem::str(&t.token[..]));
    }

    // Drain pending text in order, then adopt the next pending symbol.
    let mut next_item_list = prev.next_item_list.clone();
    let mut cur_sym = None;
    let mut gram_props = None;
    loop {
        match next_item_list.first().cloned() {
            Some(ContItem::Text { text: pending, .. }) => {
                next_item_list = next_item_list.drop_first().expect("nonempty list");
                for item in &pending {
                    push_text(
                        &mut text,
                        conjugate(item, &prev.person_number_list, None, None)?,
                    );
                }
            }
            Some(ContItem::Sym {
                sym,
                gram_props: props,
                ..
            }) => {
                next_item_list = next_item_list.drop_first().expect("nonempty list");
                cur_sym = Some(sym);
                gram_props = props;
                break;
            }
            None => break,
        }
    }

    let person_number_list = person_number::truncate(&prev.person_number_list, &next_item_list);

    Ok(Some(Path {
        cur_sym,
        next_item_list,
        semantic_list,
        person_number_list,
        gram_props,
        text,
        terminals,
        sym_count: prev.sym_count + 1,
        lhs,
        rule: Some(rule),
        prev: Some(Rc::clone(prev)),
    }))
}

/// Appends a conjugated item, splicing sequences into their elements so
/// adjacent plain strings can later merge.
fn push_text(text: &mut Vector<TextItem>, item: TextItem) {
    match item {
        TextItem::Seq(items) => {
            for item in items {
                push_text(text, item);
            }
        }
        other => {
            text.push_back_mut(other);
        }
    }
}
