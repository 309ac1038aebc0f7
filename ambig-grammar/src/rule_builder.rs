//! Grammar rules can be built with the builder pattern.

use std::mem;
use std::rc::Rc;

use ambig_semantic::SemanticTree;

use crate::local_prelude::*;

/// The rule builder. Attribute setters apply to the next `to` or `word`
/// call, which adds the rule and leaves the builder ready for another.
pub struct RuleBuilder<'a> {
    grammar: &'a mut Grammar,
    lhs: Option<Symbol>,
    semantic: Option<RuleSemantic>,
    inserted_semantic: Option<SemanticTree>,
    gram_props: Option<Rc<GramProps>>,
    person_number: Option<PersonNumber>,
    insertion: Option<Insertion>,
    tense: Option<String>,
    is_placeholder: bool,
    is_transposition: bool,
}

impl<'a> RuleBuilder<'a> {
    /// Creates a rule builder.
    pub fn new(grammar: &'a mut Grammar) -> Self {
        RuleBuilder {
            grammar,
            lhs: None,
            semantic: None,
            inserted_semantic: None,
            gram_props: None,
            person_number: None,
            insertion: None,
            tense: None,
            is_placeholder: false,
            is_transposition: false,
        }
    }

    /// Starts building a new rule with the given LHS.
    pub fn rule(mut self, lhs: Symbol) -> Self {
        self.lhs = Some(lhs);
        self
    }

    /// Attaches an unreduced semantic, awaiting children from the rules
    /// below.
    pub fn lhs_semantic(mut self, tree: SemanticTree) -> Self {
        self.semantic = Some(RuleSemantic {
            tree,
            is_reduced: false,
        });
        self
    }

    /// Attaches a reduced semantic.
    pub fn rhs_semantic(mut self, tree: SemanticTree) -> Self {
        self.semantic = Some(RuleSemantic {
            tree,
            is_reduced: true,
        });
        self
    }

    /// Attaches a reduced semantic contributed by an insertion.
    pub fn inserted_semantic(mut self, tree: SemanticTree) -> Self {
        self.inserted_semantic = Some(tree);
        self
    }

    /// Attaches a grammatical-property triple.
    pub fn gram_props(mut self, props: Rc<GramProps>) -> Self {
        self.gram_props = Some(props);
        self
    }

    /// Attaches a person-number property.
    pub fn person_number(mut self, person_number: impl Into<PersonNumber>) -> Self {
        self.person_number = Some(person_number.into());
        self
    }

    /// Makes the next nonterminal rule an insertion emitting the given
    /// text before (`index` 0) or after (`index` 1) its expanded symbol.
    pub fn insert(mut self, index: usize, text: Vec<TextItem>) -> Self {
        debug_assert!(index <= 1, "insertion index must be 0 or 1");
        self.insertion = Some(Insertion { index, text });
        self
    }

    /// Records the tense the next terminal token was written in.
    pub fn tense(mut self, tense: impl Into<String>) -> Self {
        self.tense = Some(tense.into());
        self
    }

    /// Makes the next terminal rule a placeholder, emitting its own token.
    pub fn placeholder(mut self) -> Self {
        self.is_placeholder = true;
        self
    }

    /// Marks the next rule as a transposition.
    pub fn transposition(mut self) -> Self {
        self.is_transposition = true;
        self
    }

    /// Adds a nonterminal rule with the given RHS symbols.
    pub fn to(mut self, syms: impl AsRef<[Symbol]>) -> Self {
        let lhs = self.lhs.expect("rule() must be called before to()");
        let rule = Rule {
            rhs: RuleRhs::Nonterminal(NonterminalRhs {
                syms: syms.as_ref().into(),
                insertion: self.insertion.take(),
                rhs_can_produce_semantic: false,
                second_rhs_can_produce_semantic: false,
            }),
            semantic: self.semantic.take(),
            inserted_semantic: self.inserted_semantic.take(),
            gram_props: self.gram_props.take(),
            person_number: self.person_number.take(),
            is_transposition: mem::take(&mut self.is_transposition),
        };
        self.tense = None;
        self.is_placeholder = false;
        self.grammar.add_rule(lhs, rule);
        self
    }

    /// Adds a terminal rule. The token doubles as display text, except for
    /// empty tokens and placeholders, which display nothing of their own.
    pub fn word(self, token: impl Into<String>) -> Self {
        let token = token.into();
        let text = if token.is_empty() || self.is_placeholder {
            None
        } else {
            Some(TextItem::str(&token[..]))
        };
        self.finish_terminal(token, text)
    }

    /// Adds a terminal rule with explicit display text, e.g. a substituted
    /// string or an inflection table.
    pub fn word_with_text(self, token: impl Into<String>, text: TextItem) -> Self {
        self.finish_terminal(token.into(), Some(text))
    }

    /// Adds a terminal rule without display text.
    pub fn word_silent(self, token: impl Into<String>) -> Self {
        self.finish_terminal(token.into(), None)
    }

    fn finish_terminal(mut self, token: String, text: Option<TextItem>) -> Self {
        let lhs = self.lhs.expect("rule() must be called before word()");
        let rule = Rule {
            rhs: RuleRhs::Terminal(TerminalRhs {
                token,
                text,
                tense: self.tense.take(),
                is_placeholder: mem::take(&mut self.is_placeholder),
            }),
            semantic: self.semantic.take(),
            inserted_semantic: self.inserted_semantic.take(),
            gram_props: self.gram_props.take(),
            person_number: self.person_number.take(),
            is_transposition: mem::take(&mut self.is_transposition),
        };
        self.insertion = None;
        self.grammar.add_rule(lhs, rule);
        self
    }
}
