//! Grammar rule representation.

use std::rc::Rc;

use ambig_semantic::SemanticTree;

use crate::local_prelude::*;

/// A grammar rule: one alternative of a nonterminal.
#[derive(Clone, Debug)]
pub struct Rule {
    /// The rule's right-hand side.
    pub rhs: RuleRhs,
    /// The rule's semantic, unreduced or reduced.
    pub semantic: Option<RuleSemantic>,
    /// A reduced semantic contributed by an insertion this rule was
    /// compiled from.
    pub inserted_semantic: Option<SemanticTree>,
    /// Grammatical properties imposed on terminal rules below this RHS.
    pub gram_props: Option<Rc<GramProps>>,
    /// A person-number property for conjugating a verb below this rule.
    pub person_number: Option<PersonNumber>,
    /// Transposition rules are removed before any search runs.
    pub is_transposition: bool,
}

/// The two right-hand-side shapes a rule can have.
#[derive(Clone, Debug)]
pub enum RuleRhs {
    Nonterminal(NonterminalRhs),
    Terminal(TerminalRhs),
}

/// A right-hand side of one or two nonterminal symbols.
#[derive(Clone, Debug)]
pub struct NonterminalRhs {
    /// One or two symbols. An insertion rule expands only the first;
    /// a second symbol on an insertion rule is a trailing blank.
    pub syms: Rc<[Symbol]>,
    /// Present on insertion rules: fixed text emitted at a position.
    pub insertion: Option<Insertion>,
    /// Whether any symbol below this RHS can produce a semantic.
    pub rhs_can_produce_semantic: bool,
    /// Whether the second RHS symbol can produce a semantic.
    pub second_rhs_can_produce_semantic: bool,
}

/// A right-hand side holding a single literal token.
#[derive(Clone, Debug)]
pub struct TerminalRhs {
    /// The terminal token. May contain spaces, or be empty.
    pub token: String,
    /// Display text, possibly awaiting conjugation.
    pub text: Option<TextItem>,
    /// The tense this token was written in, checked against a parent's
    /// accepted tense.
    pub tense: Option<String>,
    /// A placeholder terminal emits its own token as text, e.g. `<int>`.
    pub is_placeholder: bool,
}

/// Fixed text an insertion rule emits before or after its single
/// expanded symbol.
#[derive(Clone, Debug)]
pub struct Insertion {
    /// 0 emits the text before the expanded symbol, 1 after it.
    pub index: usize,
    /// The compiled text, already conjugated for grammatical properties
    /// but not for person-number.
    pub text: Vec<TextItem>,
}

/// A rule's semantic together with its reduction state.
#[derive(Clone, Debug)]
pub struct RuleSemantic {
    pub tree: SemanticTree,
    /// Reduced semantics are complete arrays; unreduced ones await the
    /// children that rules below will produce.
    pub is_reduced: bool,
}

impl Rule {
    /// Whether the rule's right-hand side is a literal token.
    pub fn is_terminal(&self) -> bool {
        matches!(self.rhs, RuleRhs::Terminal(_))
    }

    /// The nonterminal right-hand side, if this rule has one.
    pub fn nonterminal(&self) -> Option<&NonterminalRhs> {
        match &self.rhs {
            RuleRhs::Nonterminal(nt) => Some(nt),
            RuleRhs::Terminal(_) => None,
        }
    }

    /// The terminal right-hand side, if this rule has one.
    pub fn terminal(&self) -> Option<&TerminalRhs> {
        match &self.rhs {
            RuleRhs::Terminal(t) => Some(t),
            RuleRhs::Nonterminal(_) => None,
        }
    }
}

impl NonterminalRhs {
    /// Whether this RHS expands two symbols, not counting insertions.
    pub fn is_binary(&self) -> bool {
        self.insertion.is_none() && self.syms.len() == 2
    }
}
