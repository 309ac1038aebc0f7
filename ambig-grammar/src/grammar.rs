//! Definition of the grammar type.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;

use log::debug;

use crate::local_prelude::*;
use crate::rule_builder::RuleBuilder;

/// A grammar: an ordered mapping from nonterminal symbols to their rules.
///
/// The start symbol is irrelevant here. Every nonterminal serves, in turn,
/// as the root of an ambiguity search.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    /// The symbol source.
    sym_source: SymbolSource,
    /// Rules, keyed by their left-hand-side symbol.
    rules: BTreeMap<Symbol, Vec<Rule>>,
}

impl Grammar {
    /// Creates an empty grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty grammar with the given symbol source.
    pub fn with_sym_source(sym_source: SymbolSource) -> Self {
        Grammar {
            sym_source,
            rules: BTreeMap::new(),
        }
    }

    /// Returns generated symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        self.sym_source.sym()
    }

    /// Returns generated symbols with the given names.
    pub fn with_names<const N: usize, S: Into<Cow<'static, str>>>(
        &mut self,
        names: [S; N],
    ) -> [Symbol; N] {
        self.sym_source.with_names(names)
    }

    /// Generates a new unique symbol.
    pub fn next_sym(&mut self, name: Option<Cow<str>>) -> Symbol {
        self.sym_source.next_sym(name)
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Allows mutable access to the symbol source through a reference.
    pub fn sym_source_mut(&mut self) -> &mut SymbolSource {
        &mut self.sym_source
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder::new(self).rule(lhs)
    }

    /// Adds a finished rule for the given nonterminal.
    pub fn add_rule(&mut self, lhs: Symbol, rule: Rule) {
        if let RuleRhs::Nonterminal(nt) = &rule.rhs {
            debug_assert!(
                (1..=2).contains(&nt.syms.len()),
                "nonterminal RHS must hold one or two symbols"
            );
        }
        self.rules.entry(lhs).or_default().push(rule);
    }

    /// Returns the rules of the given nonterminal, or an empty slice for a
    /// symbol with no rules.
    pub fn rules_for(&self, sym: Symbol) -> &[Rule] {
        self.rules.get(&sym).map(|rules| &rules[..]).unwrap_or(&[])
    }

    /// Iterates over nonterminals and their rules, in symbol order.
    pub fn nonterminals(&self) -> impl Iterator<Item = (Symbol, &[Rule])> {
        self.rules.iter().map(|(&sym, rules)| (sym, &rules[..]))
    }

    /// Removes every transposition rule. Any ambiguity a transposition
    /// would create is already visible in its source rules.
    pub fn remove_transpositions(&mut self) {
        let mut removed = 0usize;
        for rules in self.rules.values_mut() {
            let before = rules.len();
            rules.retain(|rule| !rule.is_transposition);
            removed += before - rules.len();
        }
        if removed > 0 {
            debug!("removed {} transposition rules", removed);
        }
    }

    /// Computes which symbols can produce a semantic and stamps the
    /// `rhs_can_produce_semantic` flags onto every nonterminal rule.
    ///
    /// A symbol can produce a semantic if any of its rules carries one, or
    /// expands a symbol that can. The set is a fixed point over the rules.
    pub fn stamp_semantic_capabilities(&mut self) {
        let mut can_produce = SymbolBitSet::new();
        can_produce.reset(&self.sym_source);

        let mut changed = true;
        while changed {
            changed = false;
            for (&lhs, rules) in &self.rules {
                if can_produce[lhs] {
                    continue;
                }
                let lhs_can = rules.iter().any(|rule| {
                    rule.semantic.is_some()
                        || rule.inserted_semantic.is_some()
                        || rule
                            .nonterminal()
                            .map(|nt| expanded_syms(nt).iter().any(|&sym| can_produce[sym]))
                            .unwrap_or(false)
                });
                if lhs_can {
                    can_produce.set(lhs, true);
                    changed = true;
                }
            }
        }

        for rules in self.rules.values_mut() {
            for rule in rules {
                if let RuleRhs::Nonterminal(nt) = &mut rule.rhs {
                    nt.rhs_can_produce_semantic =
                        expanded_syms(nt).iter().any(|&sym| can_produce[sym]);
                    nt.second_rhs_can_produce_semantic = nt.is_binary() && can_produce[nt.syms[1]];
                }
            }
        }
    }

    /// Formats the grammar to a `String`. The output looks like this:
    ///
    /// ```ignore
    /// start ::= np vp;
    /// np ::= "users";
    /// ```
    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (lhs, rules) in self.nonterminals() {
            for rule in rules {
                let lhs = self.sym_source.name_of(lhs);
                match &rule.rhs {
                    RuleRhs::Nonterminal(nt) => {
                        let rhs = nt
                            .syms
                            .iter()
                            .map(|&sym| self.sym_source.name_of(sym))
                            .collect::<Vec<_>>()
                            .join(" ");
                        writeln!(&mut result, "{} ::= {};", lhs, rhs)
                            .expect("writing to String failed");
                    }
                    RuleRhs::Terminal(t) => {
                        writeln!(&mut result, "{} ::= \"{}\";", lhs, t.token)
                            .expect("writing to String failed");
                    }
                }
            }
        }
        result
    }
}

/// The symbols an expansion of this RHS actually visits. An insertion
/// rule expands only its first symbol.
fn expanded_syms(nt: &NonterminalRhs) -> &[Symbol] {
    if nt.insertion.is_some() {
        &nt.syms[..1]
    } else {
        &nt.syms[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambig_semantic::SemanticFunc;

    #[test]
    fn test_remove_transpositions() {
        let mut grammar = Grammar::new();
        let [start, a, b] = grammar.sym();
        grammar
            .rule(start)
            .to([a, b])
            .rule(start)
            .transposition()
            .to([b, a]);

        grammar.remove_transpositions();
        assert_eq!(grammar.rules_for(start).len(), 1);
    }

    #[test]
    fn test_semantic_capability_closure() {
        let mut grammar = Grammar::new();
        let [start, carrier, plain] = grammar.sym();
        let me = SemanticFunc::argument("me", 0.0);
        grammar
            .rule(start)
            .to([carrier, plain])
            .rule(carrier)
            .rhs_semantic(vec![me.node()])
            .word("me")
            .rule(plain)
            .word("x");

        grammar.stamp_semantic_capabilities();
        let nt = grammar.rules_for(start)[0].nonterminal().unwrap();
        assert!(nt.rhs_can_produce_semantic);
        assert!(!nt.second_rhs_can_produce_semantic);
    }
}
